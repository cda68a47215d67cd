//! Simulation module
//!
//! All physics lives here. This module has no rendering or platform dependencies:
//! - One tick is one unit of time
//! - Seeded RNG only
//! - Stable iteration order (insertion order of balls)

pub mod collision;
pub mod frame;
pub mod geometry;
pub mod params;
pub mod state;
pub mod tick;

pub use collision::{
    WallHit, ball_ball_collision, ball_wall_collision, ball_wall_crossing, contain_ball, move_ball,
    resolve_pairs,
};
pub use frame::{BallSprite, Frame};
pub use geometry::{
    Hexagon, SIDES, closest_point_on_segment, edge_clearance, hexagon_vertices,
    point_segment_distance, reflect, segment_intersection, wall_normal,
};
pub use params::Params;
pub use state::{Ball, PALETTE, SimState};
pub use tick::{Command, Controls, TickInput, TickReport, apply_input, step, tick};
