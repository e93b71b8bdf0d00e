//! Collider types

use crate::material::PhysicsMaterial;
use rapier2d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a collider in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub(crate) rapier::ColliderHandle);

impl ColliderHandle {
    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::ColliderHandle {
        self.0
    }
}

/// Collision shape type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Circle with radius
    Ball { radius: f32 },
    /// Axis-aligned box with half-extents
    Cuboid { half_extents: [f32; 2] },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Cuboid {
            half_extents: [0.5, 0.5],
        }
    }
}

impl ColliderShape {
    /// Create a ball shape
    pub fn ball(radius: f32) -> Self {
        Self::Ball { radius }
    }

    /// Create a box shape from full size
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::Cuboid {
            half_extents: [width * 0.5, height * 0.5],
        }
    }

    /// Create a square box shape from its edge length
    pub fn square(size: f32) -> Self {
        Self::from_size(size, size)
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(self) -> rapier::SharedShape {
        match self {
            Self::Ball { radius } => rapier::SharedShape::ball(radius),
            Self::Cuboid { half_extents } => {
                rapier::SharedShape::cuboid(half_extents[0], half_extents[1])
            }
        }
    }
}

/// Description for creating a collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Collision shape
    pub shape: ColliderShape,
    /// Physics material
    pub material: PhysicsMaterial,
    /// Explicit mass; when `None` the mass comes from the material density
    pub mass: Option<f32>,
    /// User data (entity ID, etc.)
    pub user_data: u128,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::default(),
            material: PhysicsMaterial::default(),
            mass: None,
            user_data: 0,
        }
    }
}

impl ColliderDesc {
    /// Create a new collider description with a shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Set material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set an explicit mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Set user data
    pub fn with_user_data(mut self, data: u128) -> Self {
        self.user_data = data;
        self
    }

    /// Build a Rapier collider builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::ColliderBuilder {
        let builder = rapier::ColliderBuilder::new(self.shape.to_rapier())
            .friction(self.material.friction)
            .restitution(self.material.restitution)
            .user_data(self.user_data);

        match self.mass {
            Some(mass) => builder.mass(mass),
            None => builder.density(self.material.density),
        }
    }
}
