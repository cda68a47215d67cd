//! Simulation settings
//!
//! Loaded once at startup from an optional JSON file. Missing fields fall
//! back to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Static simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Balls ===
    /// Shared ball radius
    pub ball_radius: f32,
    /// Shared ball mass
    pub ball_mass: f32,
    /// Spawn speed bound per axis
    pub spawn_speed: f32,
    /// Balls present before the first tick
    pub initial_balls: u32,

    // === Forces ===
    /// Added to vel.y each tick
    pub gravity: f32,
    /// Multiplies velocity each tick
    pub damping: f32,

    // === Restitution ===
    pub default_restitution: f32,
    pub min_restitution: f32,
    pub restitution_step: f32,

    // === Hexagon ===
    pub hex_center: Vec2,
    pub hex_radius: f32,
    /// Radians per tick
    pub default_rotation: f32,
    pub rotation_step: f32,
    /// Rotation is clamped to [-max_rotation, max_rotation]
    pub max_rotation: f32,

    // === Integration ===
    /// Wall resolver sub-steps per tick
    pub substeps: u32,
    /// Driver loop rate
    pub tick_rate_hz: u32,
    /// RNG seed for spawned balls
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            spawn_speed: BALL_SPAWN_SPEED,
            initial_balls: 1,

            gravity: GRAVITY,
            damping: DAMPING,

            default_restitution: DEFAULT_RESTITUTION,
            min_restitution: MIN_RESTITUTION,
            restitution_step: RESTITUTION_STEP,

            hex_center: Vec2::from_array(HEX_CENTER),
            hex_radius: HEX_RADIUS,
            default_rotation: DEFAULT_ROTATION_SPEED,
            rotation_step: ROTATION_STEP,
            max_rotation: MAX_ROTATION_SPEED,

            substeps: WALL_SUBSTEPS,
            tick_rate_hz: TICK_RATE_HZ,
            seed: 0,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(msg: impl Into<String>) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid(msg.into()))
        }

        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            return invalid("ball_radius must be finite and > 0");
        }
        if !(self.ball_mass.is_finite() && self.ball_mass > 0.0) {
            return invalid("ball_mass must be finite and > 0");
        }
        if !(self.spawn_speed.is_finite() && self.spawn_speed >= 0.0) {
            return invalid("spawn_speed must be finite and >= 0");
        }
        if !self.gravity.is_finite() {
            return invalid("gravity must be finite");
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return invalid("damping must be within [0, 1]");
        }
        if !(0.0..=MAX_RESTITUTION).contains(&self.min_restitution) {
            return invalid("min_restitution must be within [0, 1]");
        }
        if !(self.min_restitution..=MAX_RESTITUTION).contains(&self.default_restitution) {
            return invalid("default_restitution must be within [min_restitution, 1]");
        }
        if !self.hex_center.is_finite() {
            return invalid("hex_center must be finite");
        }
        // The ball has to fit between opposite walls
        let apothem = self.hex_radius * std::f32::consts::FRAC_PI_6.cos();
        if !(self.hex_radius.is_finite() && apothem > self.ball_radius) {
            return invalid("hex_radius too small to hold a ball");
        }
        if !(self.max_rotation.is_finite() && self.max_rotation >= 0.0) {
            return invalid("max_rotation must be finite and >= 0");
        }
        if !(self.restitution_step.is_finite() && self.restitution_step >= 0.0) {
            return invalid("restitution_step must be finite and >= 0");
        }
        if !(self.rotation_step.is_finite() && self.rotation_step >= 0.0) {
            return invalid("rotation_step must be finite and >= 0");
        }
        if self.default_rotation.abs() > self.max_rotation {
            return invalid("default_rotation exceeds max_rotation");
        }
        if self.substeps == 0 {
            return invalid("substeps must be > 0");
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick_rate_hz must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.substeps, 10);
        assert!((settings.max_rotation - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "gravity": 0.5, "seed": 7 }"#).unwrap();
        assert_eq!(settings.gravity, 0.5);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            hex_center: Vec2::new(10.0, 20.0),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_tiny_hexagon() {
        let err = Settings::from_json(r#"{ "hex_radius": 10.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(err.to_string().contains("hex_radius"));
    }

    #[test]
    fn test_rejects_restitution_out_of_range() {
        let err = Settings::from_json(r#"{ "default_restitution": 1.5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_substeps() {
        assert!(Settings::from_json(r#"{ "substeps": 0 }"#).is_err());
    }

    #[test]
    fn test_rejects_bad_steps() {
        let err = Settings::from_json(r#"{ "rotation_step": -0.02 }"#).unwrap_err();
        assert!(err.to_string().contains("rotation_step"));

        let err = Settings::from_json(r#"{ "restitution_step": -0.1 }"#).unwrap_err();
        assert!(err.to_string().contains("restitution_step"));

        let nan = Settings {
            rotation_step: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("hex-bounce-{}.json", std::process::id()));
        let settings = Settings {
            seed: 42,
            gravity: 0.3,
            ..Default::default()
        };

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.unwrap(), settings);
    }

    #[test]
    fn test_parse_error() {
        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/hex-bounce.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
