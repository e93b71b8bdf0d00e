//! Debug-tunable simulation parameters
//!
//! Every field has a documented range. Setters clamp instead of failing,
//! and log a warning when a value had to be adjusted.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TiltError};

/// Inclusive range of a tunable parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamRange {
    pub const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self { name, min, max, default }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into range; NaN maps to the default
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            log::warn!("{} is NaN, using default {}", self.name, self.default);
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            log::warn!(
                "{} = {} is outside [{}, {}], clamped to {}",
                self.name, value, self.min, self.max, clamped
            );
        }
        clamped
    }

    /// Error describing `value` as out of this range
    pub fn check(&self, value: f32) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(TiltError::OutOfRangeParameter {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Multiplier on the rigid region's gravity strength
pub const GRAVITY_SCALE: ParamRange = ParamRange::new("gravity_scale", 0.5, 10.0, 1.0);
/// Distance under which two bubbles are linked when drawn
pub const LINK_THRESHOLD: ParamRange = ParamRange::new("link_threshold", 0.0, 200.0, 50.0);
/// Bubble radius
pub const RADIUS: ParamRange = ParamRange::new("radius", 0.0, 30.0, 5.0);
/// Bubbles generated per particle region
pub const PARTICLE_COUNT: ParamRange = ParamRange::new("particle_count", 3.0, 50.0, 3.0);
/// Signed speed multiplier applied to bubble base velocities
pub const SPEED_FACTOR: ParamRange = ParamRange::new("speed_factor", -1.0, 1.0, 1.0);
/// Bubble acceleration for a full tilt, units/s
pub const GRAVITY_STRENGTH: ParamRange = ParamRange::new("gravity_strength", 0.0, 400.0, 300.0);

/// Flat, range-documented tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// [0.5, 10], default 1
    pub gravity_scale: f32,
    /// [0, 200], default 50
    pub link_threshold: f32,
    /// [0, 30], default 5
    pub radius: f32,
    /// [3, 50], default 3
    pub particle_count: u32,
    /// [-1, 1], default 1
    pub speed_factor: f32,
    /// [0, 400], default 300
    pub gravity_strength: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_scale: GRAVITY_SCALE.default,
            link_threshold: LINK_THRESHOLD.default,
            radius: RADIUS.default,
            particle_count: PARTICLE_COUNT.default as u32,
            speed_factor: SPEED_FACTOR.default,
            gravity_strength: GRAVITY_STRENGTH.default,
        }
    }
}

impl SimulationConfig {
    pub fn set_gravity_scale(&mut self, value: f32) -> f32 {
        self.gravity_scale = GRAVITY_SCALE.clamp(value);
        self.gravity_scale
    }

    pub fn set_link_threshold(&mut self, value: f32) -> f32 {
        self.link_threshold = LINK_THRESHOLD.clamp(value);
        self.link_threshold
    }

    pub fn set_radius(&mut self, value: f32) -> f32 {
        self.radius = RADIUS.clamp(value);
        self.radius
    }

    pub fn set_particle_count(&mut self, value: u32) -> u32 {
        self.particle_count = PARTICLE_COUNT.clamp(value as f32) as u32;
        self.particle_count
    }

    pub fn set_speed_factor(&mut self, value: f32) -> f32 {
        self.speed_factor = SPEED_FACTOR.clamp(value);
        self.speed_factor
    }

    pub fn set_gravity_strength(&mut self, value: f32) -> f32 {
        self.gravity_strength = GRAVITY_STRENGTH.clamp(value);
        self.gravity_strength
    }

    /// First out-of-range field, if any
    pub fn validate(&self) -> Result<()> {
        GRAVITY_SCALE.check(self.gravity_scale)?;
        LINK_THRESHOLD.check(self.link_threshold)?;
        RADIUS.check(self.radius)?;
        PARTICLE_COUNT.check(self.particle_count as f32)?;
        SPEED_FACTOR.check(self.speed_factor)?;
        GRAVITY_STRENGTH.check(self.gravity_strength)
    }

    /// Copy with every field clamped into range
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.set_gravity_scale(self.gravity_scale);
        out.set_link_threshold(self.link_threshold);
        out.set_radius(self.radius);
        out.set_particle_count(self.particle_count);
        out.set_speed_factor(self.speed_factor);
        out.set_gravity_strength(self.gravity_strength);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_setters_clamp() {
        let mut config = SimulationConfig::default();
        assert_eq!(config.set_gravity_scale(42.0), 10.0);
        assert_eq!(config.set_radius(-3.0), 0.0);
        assert_eq!(config.set_particle_count(1), 3);
        assert_eq!(config.set_particle_count(500), 50);
        assert_eq!(config.set_speed_factor(f32::NAN), 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_field() {
        let config = SimulationConfig {
            link_threshold: 250.0,
            ..Default::default()
        };
        match config.validate() {
            Err(TiltError::OutOfRangeParameter { name, .. }) => assert_eq!(name, "link_threshold"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(config.sanitized().validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"radius": 12.0}"#).unwrap();
        assert_eq!(config.radius, 12.0);
        assert_eq!(config.particle_count, 3);
    }
}
