//! Fixed-rate simulation tick
//!
//! Input is applied between ticks; a tick then runs forces, wall collisions,
//! ball-ball collisions and the hexagon rotation, in that order.

use serde::{Deserialize, Serialize};

use super::collision::{contain_ball, move_ball, resolve_pairs};
use super::state::SimState;

/// A parameter mutation requested by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Append a ball at the center with a random velocity
    AddBall,
    /// Drop the most recently added ball
    RemoveBall,
    /// Raise restitution by one step (capped at 1)
    MoreBouncy,
    /// Reset restitution to its default
    RestoreBounce,
    /// Raise the rotation rate by one step
    SpinFaster,
    /// Lower the rotation rate by one step
    SpinSlower,
}

/// Commands queued since the last tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Which commands would currently change something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub add: bool,
    pub remove: bool,
    pub more_bouncy: bool,
    pub restore: bool,
    pub faster: bool,
    pub slower: bool,
}

impl Controls {
    pub fn from_state(state: &SimState) -> Self {
        Self {
            add: true,
            remove: !state.balls.is_empty(),
            more_bouncy: state.params.can_be_bouncier(),
            restore: !state.params.is_default_restitution(),
            faster: state.params.can_spin_faster(),
            slower: state.params.can_spin_slower(),
        }
    }

    pub fn allows(&self, command: Command) -> bool {
        match command {
            Command::AddBall => self.add,
            Command::RemoveBall => self.remove,
            Command::MoreBouncy => self.more_bouncy,
            Command::RestoreBounce => self.restore,
            Command::SpinFaster => self.faster,
            Command::SpinSlower => self.slower,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Ball-wall bounces
    pub wall_bounces: u32,
    /// Ball-ball contacts resolved
    pub ball_contacts: u32,
}

/// Apply queued commands to the state
pub fn apply_input(state: &mut SimState, input: &TickInput) {
    for &command in &input.commands {
        match command {
            Command::AddBall => {
                state.spawn_ball();
            }
            Command::RemoveBall => {
                state.remove_ball();
            }
            Command::MoreBouncy => {
                let restitution = state.params.more_bouncy();
                log::debug!("Restitution raised to {:.2}", restitution);
            }
            Command::RestoreBounce => {
                let restitution = state.params.restore_restitution();
                log::debug!("Restitution restored to {:.2}", restitution);
            }
            Command::SpinFaster => {
                let rate = state.params.spin_faster();
                log::debug!("Rotation rate now {:.3} rad/tick", rate);
            }
            Command::SpinSlower => {
                let rate = state.params.spin_slower();
                log::debug!("Rotation rate now {:.3} rad/tick", rate);
            }
        }
    }
}

/// Apply `input`, then advance the simulation by one tick
pub fn tick(state: &mut SimState, input: &TickInput) -> TickReport {
    apply_input(state, input);
    step(state)
}

/// Advance the simulation by one tick
pub fn step(state: &mut SimState) -> TickReport {
    let mut report = TickReport::default();
    let gravity = state.params.gravity;
    let damping = state.params.damping;

    // Forces
    for ball in &mut state.balls {
        ball.vel.y += gravity;
        ball.vel *= damping;
    }

    // Geometry for this tick; the renderer draws these same vertices
    state.vertices = state.hexagon.vertices();

    let restitution = state.params.restitution();
    let substeps = state.params.substeps;
    for ball in &mut state.balls {
        report.wall_bounces += move_ball(ball, &state.vertices, restitution, substeps);
    }

    report.ball_contacts = resolve_pairs(&mut state.balls);

    // Pair separation can push a ball back into a wall
    for ball in &mut state.balls {
        if let Some(contained) = contain_ball(ball.pos, ball.radius, &state.vertices) {
            ball.pos = contained;
        }
    }

    // Takes effect for the next tick's geometry
    state.hexagon.rotate(state.params.rotation_rate());
    state.time_ticks += 1;

    if report.wall_bounces > 0 || report.ball_contacts > 0 {
        log::trace!(
            "tick {}: {} wall bounces, {} ball contacts",
            state.time_ticks,
            report.wall_bounces,
            report.ball_contacts
        );
    }

    report
}
