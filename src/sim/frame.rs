//! Read-only snapshot handed to a renderer after each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::SIDES;
use super::state::SimState;
use super::tick::Controls;

/// A ball as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSprite {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
}

/// Everything needed to draw one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    /// Hexagon as collided against this tick
    pub vertices: [Vec2; SIDES],
    pub balls: Vec<BallSprite>,
    pub restitution: f32,
    pub rotation_rate: f32,
    pub controls: Controls,
}

impl Frame {
    pub fn capture(state: &SimState) -> Self {
        Self {
            tick: state.time_ticks,
            vertices: state.vertices,
            balls: state
                .balls
                .iter()
                .map(|b| BallSprite {
                    id: b.id,
                    pos: b.pos,
                    radius: b.radius,
                    color: b.rgb(),
                })
                .collect(),
            restitution: state.params.restitution(),
            rotation_rate: state.params.rotation_rate(),
            controls: Controls::from_state(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_capture_matches_state() {
        let mut state = SimState::with_seed(8);
        state.spawn_ball();
        state.spawn_ball();
        tick(&mut state, &TickInput::default());

        let frame = Frame::capture(&state);
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.vertices, state.vertices);
        assert_eq!(frame.balls.len(), 2);
        assert_eq!(frame.balls[1].pos, state.balls[1].pos);
        assert_eq!(frame.balls[1].color, state.balls[1].rgb());
        assert!(frame.controls.remove);
    }

    #[test]
    fn test_frame_serializes() {
        let mut state = SimState::with_seed(8);
        state.spawn_ball();
        let frame = Frame::capture(&state);

        let json = serde_json::to_string(&frame).unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.balls, frame.balls);
        assert_eq!(back.tick, frame.tick);
    }
}
