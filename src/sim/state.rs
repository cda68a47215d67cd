//! Simulation state and core types
//!
//! `SimState` owns everything a tick mutates: the balls, the hexagon, the
//! runtime parameters and the seeded RNG used to spawn balls.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Hexagon, SIDES};
use super::params::Params;
use crate::Settings;

/// Ball colors (RGB)
pub const PALETTE: [[u8; 3]; 6] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
    [0, 255, 255],
];

/// A ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Index into [`PALETTE`]
    pub color: u8,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            mass,
            color: 0,
        }
    }

    /// RGB color from the palette
    pub fn rgb(&self) -> [u8; 3] {
        PALETTE[self.color as usize % PALETTE.len()]
    }

    /// 1/2 m |v|^2
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Settings the state was built from
    pub settings: Settings,
    /// Runtime parameters (restitution, rotation, forces)
    pub params: Params,
    /// Rotating boundary
    pub hexagon: Hexagon,
    /// Vertices the last tick collided against (what a renderer should draw)
    pub vertices: [Vec2; SIDES],
    /// Balls in insertion order; removal pops the newest
    pub balls: Vec<Ball>,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// Create a state from settings, spawning `settings.initial_balls` balls
    pub fn new(settings: Settings) -> Self {
        let hexagon = Hexagon::new(settings.hex_center, settings.hex_radius, 0.0);
        let mut state = Self {
            params: Params::from_settings(&settings),
            vertices: hexagon.vertices(),
            hexagon,
            balls: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            next_id: 1,
            settings,
        };

        for _ in 0..state.settings.initial_balls {
            state.spawn_ball();
        }

        state
    }

    /// Empty hexagon with the given seed and default settings
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings {
            seed,
            initial_balls: 0,
            ..Default::default()
        })
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a ball at the hexagon center with a random velocity and color
    pub fn spawn_ball(&mut self) -> u32 {
        let speed = self.settings.spawn_speed;
        let vel = if speed > 0.0 {
            Vec2::new(
                self.rng.random_range(-speed..=speed),
                self.rng.random_range(-speed..=speed),
            )
        } else {
            Vec2::ZERO
        };
        let color = self.rng.random_range(0..PALETTE.len()) as u8;

        let id = self.next_ball_id();
        let mut ball = Ball::new(
            id,
            self.hexagon.center,
            vel,
            self.settings.ball_radius,
            self.settings.ball_mass,
        );
        ball.color = color;
        self.balls.push(ball);

        log::debug!("Spawned ball {} with velocity {:?}", id, vel);
        id
    }

    /// Insert a ball with explicit position and velocity
    pub fn push_ball(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_ball_id();
        let ball = Ball::new(
            id,
            pos,
            vel,
            self.settings.ball_radius,
            self.settings.ball_mass,
        );
        self.balls.push(ball);
        id
    }

    /// Remove the most recently added ball
    pub fn remove_ball(&mut self) -> Option<Ball> {
        let ball = self.balls.pop();
        if let Some(ball) = &ball {
            log::debug!("Removed ball {}", ball.id);
        }
        ball
    }

    /// Total kinetic energy of all balls
    pub fn kinetic_energy(&self) -> f32 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }
}
