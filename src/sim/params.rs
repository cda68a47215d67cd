//! Runtime simulation parameters
//!
//! Restitution and rotation rate change between ticks in response to input.
//! Both are private and only move through the clamping setters below.

use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::consts::MAX_RESTITUTION;

/// Parameters read by the tick, mutated by input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Added to vel.y each tick
    pub gravity: f32,
    /// Multiplies velocity each tick
    pub damping: f32,
    /// Wall resolver sub-steps per tick
    pub substeps: u32,

    restitution: f32,
    default_restitution: f32,
    min_restitution: f32,
    restitution_step: f32,

    rotation_rate: f32,
    rotation_step: f32,
    max_rotation: f32,
}

impl Params {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            gravity: settings.gravity,
            damping: settings.damping,
            substeps: settings.substeps.max(1),
            restitution: settings.default_restitution,
            default_restitution: settings.default_restitution,
            min_restitution: settings.min_restitution,
            restitution_step: settings.restitution_step,
            rotation_rate: settings.default_rotation,
            rotation_step: settings.rotation_step,
            max_rotation: settings.max_rotation,
        }
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    #[inline]
    pub fn default_restitution(&self) -> f32 {
        self.default_restitution
    }

    #[inline]
    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    /// Set restitution, clamped to [min_restitution, 1]
    pub fn set_restitution(&mut self, value: f32) -> f32 {
        self.restitution = value.clamp(self.min_restitution, MAX_RESTITUTION);
        self.restitution
    }

    /// One step bouncier
    pub fn more_bouncy(&mut self) -> f32 {
        self.set_restitution(self.restitution + self.restitution_step)
    }

    /// Back to the configured default
    pub fn restore_restitution(&mut self) -> f32 {
        self.restitution = self.default_restitution;
        self.restitution
    }

    /// Set rotation rate, clamped to [-max_rotation, max_rotation]
    pub fn set_rotation_rate(&mut self, value: f32) -> f32 {
        self.rotation_rate = value.clamp(-self.max_rotation, self.max_rotation);
        self.rotation_rate
    }

    pub fn spin_faster(&mut self) -> f32 {
        self.set_rotation_rate(self.rotation_rate + self.rotation_step)
    }

    pub fn spin_slower(&mut self) -> f32 {
        self.set_rotation_rate(self.rotation_rate - self.rotation_step)
    }

    pub fn can_be_bouncier(&self) -> bool {
        self.restitution < MAX_RESTITUTION
    }

    pub fn is_default_restitution(&self) -> bool {
        self.restitution == self.default_restitution
    }

    pub fn can_spin_faster(&self) -> bool {
        self.rotation_rate < self.max_rotation
    }

    pub fn can_spin_slower(&self) -> bool {
        self.rotation_rate > -self.max_rotation
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
