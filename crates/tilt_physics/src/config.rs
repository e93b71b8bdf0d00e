//! Physics configuration

use serde::{Deserialize, Serialize};

use crate::material::PhysicsMaterial;

/// Rigid world configuration
///
/// Lengths are in region units (pixels for the reference scenes), the
/// world's y axis points up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity magnitude for a unit gravity direction, units/s²
    pub gravity_strength: f32,

    /// Gravity direction before any tilt is received
    pub gravity_direction: [f32; 2],

    /// Fixed timestep for physics simulation
    pub timestep: f32,

    /// Maximum number of substeps per frame
    pub max_substeps: u32,

    /// Solver iterations for velocity
    pub velocity_iterations: usize,

    /// Region units per simulated meter (Rapier length unit)
    pub pixels_per_meter: f32,

    /// Enable continuous collision detection on entities
    pub ccd_enabled: bool,

    /// Enable sleeping for inactive bodies
    pub sleeping_enabled: bool,

    /// Thickness of the left and right walls
    pub vertical_wall_thickness: f32,

    /// Thickness of the bottom wall
    pub horizontal_wall_thickness: f32,

    /// Width of the bottom wall (narrower than the region so entities can fall past it)
    pub bottom_wall_width: f32,

    /// Edge length of spawned entities
    pub entity_size: f32,

    /// Mass of spawned entities
    pub entity_mass: f32,

    /// Number of entities created when the world is populated
    pub initial_entities: usize,

    /// Material of spawned entities
    pub entity_material: PhysicsMaterial,

    /// Material of the boundary walls
    pub wall_material: PhysicsMaterial,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_strength: 980.0,
            gravity_direction: [0.0, -1.0],
            timestep: 1.0 / 60.0,
            max_substeps: 4,
            velocity_iterations: 4,
            pixels_per_meter: 50.0,
            ccd_enabled: true,
            sleeping_enabled: true,
            vertical_wall_thickness: 1.0,
            horizontal_wall_thickness: 15.0,
            bottom_wall_width: 100.0,
            entity_size: 50.0,
            entity_mass: 1.0,
            initial_entities: 10,
            entity_material: PhysicsMaterial::default(),
            wall_material: PhysicsMaterial::wall(),
        }
    }
}

impl PhysicsConfig {
    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Check values that would make the solver misbehave
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(crate::PhysicsError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.max_substeps == 0 {
            return Err(crate::PhysicsError::InvalidConfig(
                "max_substeps must be at least 1".to_string(),
            ));
        }
        if self.velocity_iterations == 0 {
            return Err(crate::PhysicsError::InvalidConfig(
                "velocity_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.pixels_per_meter.is_finite() && self.pixels_per_meter > 0.0) {
            return Err(crate::PhysicsError::InvalidConfig(format!(
                "pixels_per_meter must be positive, got {}",
                self.pixels_per_meter
            )));
        }
        if !self.gravity_strength.is_finite() {
            return Err(crate::PhysicsError::InvalidConfig(format!(
                "gravity_strength must be finite, got {}",
                self.gravity_strength
            )));
        }
        Ok(())
    }
}
