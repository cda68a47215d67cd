//! Hexagon boundary geometry
//!
//! A hexagon is stored as (center, circumradius, angle); its vertices are
//! always derived, never cached across a rotation.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

use crate::polar_to_cartesian;

/// Number of hexagon sides
pub const SIDES: usize = 6;

/// Slack used when checking that a ball clears the walls
pub const CONTACT_EPSILON: f32 = 1e-3;

/// Vertices of a regular hexagon, enumerated by increasing angle
///
/// Vertex `i` sits at `center + radius * (cos(angle + i*π/3), sin(angle + i*π/3))`.
pub fn hexagon_vertices(center: Vec2, radius: f32, angle: f32) -> [Vec2; SIDES] {
    std::array::from_fn(|i| center + polar_to_cartesian(radius, angle + i as f32 * FRAC_PI_3))
}

/// Closest point to `point` on the finite segment `seg_start..seg_end`
pub fn closest_point_on_segment(seg_start: Vec2, seg_end: Vec2, point: Vec2) -> Vec2 {
    let seg = seg_end - seg_start;
    let len_sq = seg.length_squared();

    if len_sq == 0.0 {
        return seg_start;
    }

    let t = ((point - seg_start).dot(seg) / len_sq).clamp(0.0, 1.0);
    seg_start + seg * t
}

/// Distance from `point` to the finite segment `seg_start..seg_end`
///
/// A zero-length segment degrades to the distance to `seg_start`.
#[inline]
pub fn point_segment_distance(seg_start: Vec2, seg_end: Vec2, point: Vec2) -> f32 {
    point.distance(closest_point_on_segment(seg_start, seg_end, point))
}

/// Intersection point of segments `p1..p2` and `p3..p4`
///
/// Returns `None` for parallel segments or when the lines cross outside
/// either segment.
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.perp_dot(d2);

    if denom == 0.0 {
        return None;
    }

    let diff = p3 - p1;
    let t = diff.perp_dot(d2) / denom;
    let u = diff.perp_dot(d1) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + d1 * t)
    } else {
        None
    }
}

/// Unit normal of a wall, pointing away from the hexagon center
///
/// The edge direction rotated by -90°, `(dy, -dx)`. Outward for vertices
/// enumerated by increasing angle, as `hexagon_vertices` does.
#[inline]
pub fn wall_normal(seg_start: Vec2, seg_end: Vec2) -> Vec2 {
    let d = seg_end - seg_start;
    Vec2::new(d.y, -d.x).normalize_or_zero()
}

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Iterate the edges `(index, start, end)` of a closed polygon
pub fn edges(vertices: &[Vec2; SIDES]) -> impl Iterator<Item = (usize, Vec2, Vec2)> + '_ {
    (0..SIDES).map(move |i| (i, vertices[i], vertices[(i + 1) % SIDES]))
}

/// Signed distance from `point` to the line of one edge (positive inside)
#[inline]
pub fn signed_edge_distance(seg_start: Vec2, seg_end: Vec2, point: Vec2) -> f32 {
    (seg_start - point).dot(wall_normal(seg_start, seg_end))
}

/// Smallest signed distance from `point` to any edge line (positive inside)
pub fn edge_clearance(vertices: &[Vec2; SIDES], point: Vec2) -> f32 {
    edges(vertices)
        .map(|(_, a, b)| signed_edge_distance(a, b, point))
        .fold(f32::INFINITY, f32::min)
}

/// Shrink a regular polygon so every edge moves inward by `margin`
///
/// Returns `None` when the polygon is too small to shrink that far.
pub fn inset_vertices(vertices: &[Vec2; SIDES], margin: f32) -> Option<[Vec2; SIDES]> {
    let center = vertices.iter().copied().sum::<Vec2>() / SIDES as f32;
    let apothem = edge_clearance(vertices, center);

    if apothem <= margin {
        return None;
    }

    let scale = (apothem - margin) / apothem;
    Some(std::array::from_fn(|i| center + (vertices[i] - center) * scale))
}

/// The rotating boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hexagon {
    /// Fixed center
    pub center: Vec2,
    /// Circumradius (center to vertex)
    pub radius: f32,
    /// Current rotation (radians, unbounded)
    pub angle: f32,
}

impl Hexagon {
    pub fn new(center: Vec2, radius: f32, angle: f32) -> Self {
        Self {
            center,
            radius,
            angle,
        }
    }

    /// Vertices at the current angle
    #[inline]
    pub fn vertices(&self) -> [Vec2; SIDES] {
        hexagon_vertices(self.center, self.radius, self.angle)
    }

    /// Distance from center to each edge
    #[inline]
    pub fn apothem(&self) -> f32 {
        self.radius * FRAC_PI_6.cos()
    }

    /// Advance the rotation. Trig handles the wraparound.
    #[inline]
    pub fn rotate(&mut self, rate: f32) {
        self.angle += rate;
    }

    /// Whether a ball at `pos` clears every wall by at least `radius`
    pub fn contains_ball(&self, pos: Vec2, radius: f32) -> bool {
        edge_clearance(&self.vertices(), pos) >= radius - CONTACT_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_hexagon_vertices_radius_and_spacing() {
        let center = Vec2::new(400.0, 300.0);
        let verts = hexagon_vertices(center, 200.0, 0.3);

        for (i, v) in verts.iter().enumerate() {
            assert!((v.distance(center) - 200.0).abs() < 1e-3);

            let next = verts[(i + 1) % SIDES];
            let a = (*v - center).to_angle();
            let b = (next - center).to_angle();
            let mut spacing = b - a;
            if spacing < 0.0 {
                spacing += 2.0 * PI;
            }
            assert!((spacing - FRAC_PI_3).abs() < 1e-4);
        }
    }

    #[test]
    fn test_first_vertex_at_angle() {
        let verts = hexagon_vertices(Vec2::ZERO, 10.0, 0.0);
        assert!((verts[0] - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_point_segment_distance_interior() {
        let d = point_segment_distance(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 3.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_segment_distance_clamped_to_endpoint() {
        let d = point_segment_distance(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(13.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_segment_distance_degenerate() {
        let p = Vec2::new(2.0, 2.0);
        let d = point_segment_distance(p, p, Vec2::new(5.0, 6.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        let p = hit.expect("segments cross");
        assert!((p - Vec2::new(5.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_segment_intersection_parallel() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_segment_intersection_lines_cross_outside_segments() {
        // The infinite lines meet at (5, 0) but the second segment stops short
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 1.0),
            Vec2::new(5.0, 4.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_wall_normals_point_outward() {
        let center = Vec2::new(400.0, 300.0);
        for angle in [0.0, 0.4, 1.7, -2.9, 25.0] {
            let verts = hexagon_vertices(center, 200.0, angle);
            for (_, a, b) in edges(&verts) {
                let n = wall_normal(a, b);
                let mid = (a + b) * 0.5;
                assert!((n.length() - 1.0).abs() < 1e-5);
                assert!(n.dot(mid - center) > 0.0);
            }
        }
    }

    #[test]
    fn test_reflect_off_vertical_wall() {
        let reflected = reflect(Vec2::new(100.0, 20.0), Vec2::new(-1.0, 0.0));
        assert!((reflected - Vec2::new(-100.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn test_edge_clearance_at_center_is_apothem() {
        let hex = Hexagon::new(Vec2::new(400.0, 300.0), 200.0, 0.7);
        let clearance = edge_clearance(&hex.vertices(), hex.center);
        assert!((clearance - hex.apothem()).abs() < 1e-2);
    }

    #[test]
    fn test_inset_vertices() {
        let hex = Hexagon::new(Vec2::ZERO, 200.0, 0.0);
        let inset = inset_vertices(&hex.vertices(), 15.0).expect("room to inset");
        let clearance = edge_clearance(&inset, Vec2::ZERO);
        assert!((clearance - (hex.apothem() - 15.0)).abs() < 1e-2);

        assert!(inset_vertices(&hex.vertices(), 500.0).is_none());
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut hex = Hexagon::new(Vec2::ZERO, 100.0, 0.0);
        hex.rotate(0.02);
        hex.rotate(-0.05);
        assert!((hex.angle + 0.03).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_reflect_is_involution(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            theta in 0.0f32..(2.0 * PI),
        ) {
            let v = Vec2::new(vx, vy);
            let n = Vec2::from_angle(theta);
            let back = reflect(reflect(v, n), n);
            prop_assert!((back - v).length() < 1e-2);
        }

        #[test]
        fn prop_reflect_preserves_tangent(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            theta in 0.0f32..(2.0 * PI),
        ) {
            let v = Vec2::new(vx, vy);
            let n = Vec2::from_angle(theta);
            let t = n.perp();
            let r = reflect(v, n);
            prop_assert!((r.dot(t) - v.dot(t)).abs() < 1e-2);
            prop_assert!((r.dot(n) + v.dot(n)).abs() < 1e-2);
        }

        #[test]
        fn prop_vertices_on_circumcircle(
            cx in -1000.0f32..1000.0,
            cy in -1000.0f32..1000.0,
            radius in 1.0f32..500.0,
            angle in -50.0f32..50.0,
        ) {
            let center = Vec2::new(cx, cy);
            for v in hexagon_vertices(center, radius, angle) {
                prop_assert!((v.distance(center) - radius).abs() < radius * 1e-4 + 1e-3);
            }
        }

        #[test]
        fn prop_point_segment_distance_not_below_line_distance(
            px in -300.0f32..300.0,
            py in -300.0f32..300.0,
            angle in -10.0f32..10.0,
        ) {
            let verts = hexagon_vertices(Vec2::ZERO, 200.0, angle);
            let p = Vec2::new(px, py);
            for (_, a, b) in edges(&verts) {
                let seg = point_segment_distance(a, b, p);
                let line = signed_edge_distance(a, b, p).abs();
                prop_assert!(seg + 1e-3 >= line);
            }
        }
    }
}
