//! Hex Bounce - balls bouncing inside a spinning hexagon
//!
//! Core modules:
//! - `sim`: Collision and integration engine (geometry, wall/pair resolvers, tick)
//! - `renderer`: CPU tessellation of a frame snapshot into vertex data
//! - `settings`: JSON-backed simulation settings

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation defaults (one tick is one unit of time)
pub mod consts {
    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_MASS: f32 = 1.0;
    /// Spawn velocity is drawn uniformly from [-BALL_SPAWN_SPEED, BALL_SPAWN_SPEED] per axis
    pub const BALL_SPAWN_SPEED: f32 = 5.0;

    /// Downward acceleration added to vel.y every tick (screen coordinates, y down)
    pub const GRAVITY: f32 = 0.2;
    /// Per-tick velocity damping (air/rolling friction)
    pub const DAMPING: f32 = 0.99;

    /// Wall restitution
    pub const DEFAULT_RESTITUTION: f32 = 0.8;
    pub const MIN_RESTITUTION: f32 = 0.0;
    pub const MAX_RESTITUTION: f32 = 1.0;
    pub const RESTITUTION_STEP: f32 = 0.1;

    /// Hexagon boundary
    pub const HEX_RADIUS: f32 = 200.0;
    pub const HEX_CENTER: [f32; 2] = [400.0, 300.0];

    /// Rotation rate in radians per tick
    pub const DEFAULT_ROTATION_SPEED: f32 = 0.02;
    pub const ROTATION_STEP: f32 = 0.02;
    pub const MAX_ROTATION_SPEED: f32 = DEFAULT_ROTATION_SPEED * 20.0;

    /// Wall resolver sub-steps per tick (tunneling guard)
    pub const WALL_SUBSTEPS: u32 = 10;

    /// Target tick rate of the driver loop
    pub const TICK_RATE_HZ: u32 = 60;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
