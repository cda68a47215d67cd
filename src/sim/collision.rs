//! Collision detection and response
//!
//! Ball-vs-wall uses sub-stepping so a fast ball cannot skip over a wall
//! within one tick. Ball-vs-ball is an impulse exchange along the contact
//! normal plus positional de-penetration.

use glam::Vec2;

use super::geometry::{
    SIDES, closest_point_on_segment, edge_clearance, edges, inset_vertices,
    point_segment_distance, reflect, segment_intersection, signed_edge_distance, wall_normal,
};
use super::state::Ball;

/// Result of a wall collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Whether a collision occurred
    pub hit: bool,
    /// Index of the edge that was hit
    pub edge: usize,
    /// Outward wall normal (away from the hexagon center)
    pub normal: Vec2,
    /// Distance to move inward so the ball rests tangent to the wall
    pub penetration: f32,
}

impl WallHit {
    pub fn miss() -> Self {
        Self {
            hit: false,
            edge: 0,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn against(edge: usize, wall_start: Vec2, wall_end: Vec2, pos: Vec2, radius: f32) -> Self {
        let penetration = radius - signed_edge_distance(wall_start, wall_end, pos);
        Self {
            hit: true,
            edge,
            normal: wall_normal(wall_start, wall_end),
            penetration: penetration.max(0.0),
        }
    }
}

/// Check a ball position against the walls
///
/// The first edge (in vertex order) within `radius` wins. There is no
/// nearest-edge search, so a ball touching two walls at a corner only
/// reports the lower-indexed one.
pub fn ball_wall_collision(pos: Vec2, radius: f32, vertices: &[Vec2; SIDES]) -> WallHit {
    for (i, wall_start, wall_end) in edges(vertices) {
        if point_segment_distance(wall_start, wall_end, pos) <= radius {
            return WallHit::against(i, wall_start, wall_end, pos, radius);
        }
    }
    WallHit::miss()
}

/// Check whether the motion `from..to` crosses a wall outright
///
/// Only matters when one sub-step moves further than the ball is wide.
pub fn ball_wall_crossing(from: Vec2, to: Vec2, radius: f32, vertices: &[Vec2; SIDES]) -> WallHit {
    for (i, wall_start, wall_end) in edges(vertices) {
        if segment_intersection(from, to, wall_start, wall_end).is_some() {
            return WallHit::against(i, wall_start, wall_end, to, radius);
        }
    }
    WallHit::miss()
}

/// Advance a ball through one tick against the walls
///
/// The tick's displacement is split into `substeps` equal moves. A hit pushes
/// the ball back tangent to the wall, reflects its velocity and scales it by
/// `restitution`, and the remaining moves use the new velocity. At most one
/// wall is handled per sub-step. Returns the number of bounces.
pub fn move_ball(
    ball: &mut Ball,
    vertices: &[Vec2; SIDES],
    restitution: f32,
    substeps: u32,
) -> u32 {
    let substeps = substeps.max(1);
    let mut step_vel = ball.vel / substeps as f32;
    let mut current = ball.pos;
    let mut bounces = 0;

    for _ in 0..substeps {
        let next = current + step_vel;

        let mut result = ball_wall_collision(next, ball.radius, vertices);
        if !result.hit {
            result = ball_wall_crossing(current, next, ball.radius, vertices);
        }

        if result.hit {
            current = next - result.normal * result.penetration;
            ball.vel = reflect(ball.vel, result.normal) * restitution;
            step_vel = ball.vel / substeps as f32;
            bounces += 1;
        } else {
            current = next;
        }
    }

    if let Some(contained) = contain_ball(current, ball.radius, vertices) {
        log::trace!("Ball {} nudged off a corner", ball.id);
        current = contained;
    }

    ball.pos = current;
    bounces
}

/// Project a ball center back into the region where it clears every wall
///
/// Returns `None` when the ball already clears all walls by `radius`.
/// Velocity is left alone; this only fixes residual corner penetration.
pub fn contain_ball(pos: Vec2, radius: f32, vertices: &[Vec2; SIDES]) -> Option<Vec2> {
    if edge_clearance(vertices, pos) >= radius {
        return None;
    }

    let Some(inset) = inset_vertices(vertices, radius) else {
        // Hexagon too small for the ball; the center is the best we can do
        return Some(vertices.iter().copied().sum::<Vec2>() / SIDES as f32);
    };

    edges(&inset)
        .map(|(_, a, b)| closest_point_on_segment(a, b, pos))
        .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)))
}

/// Resolve a collision between two balls
///
/// Applies an elastic impulse along the contact normal when the balls
/// approach, then pushes them apart by half the overlap each. Exactly
/// coincident centers have no normal and are skipped. Returns whether the
/// pair was resolved.
pub fn ball_ball_collision(a: &mut Ball, b: &mut Ball) -> bool {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let contact = a.radius + b.radius;

    if distance > contact || distance <= 0.0 {
        return false;
    }

    let normal = delta / distance;
    let vel_along_normal = (b.vel - a.vel).dot(normal);

    // Already separating
    if vel_along_normal > 0.0 {
        return false;
    }

    let impulse = 2.0 * vel_along_normal / (a.mass + b.mass);
    a.vel += impulse * b.mass * normal;
    b.vel -= impulse * a.mass * normal;

    let overlap = contact - distance;
    a.pos -= normal * overlap * 0.5;
    b.pos += normal * overlap * 0.5;

    true
}

/// Resolve every unordered pair once, in index order. Returns the number of contacts.
pub fn resolve_pairs(balls: &mut [Ball]) -> u32 {
    let mut contacts = 0;
    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if ball_ball_collision(a, b) {
                contacts += 1;
            }
        }
    }
    contacts
}
