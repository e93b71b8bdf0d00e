//! Error types for the physics system

use thiserror::Error;
use tilt_core::EntityId;

/// Physics system errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Rigid body not found
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(crate::body::RigidBodyHandle),

    /// Collider not found
    #[error("Collider not found: {0:?}")]
    ColliderNotFound(crate::collider::ColliderHandle),

    /// Entity is not (or no longer) part of this world
    #[error("Entity {0} is not in the rigid world")]
    EntityNotFound(EntityId),

    /// Gravity components must be finite
    #[error("Invalid gravity direction: ({0}, {1})")]
    InvalidGravity(f32, f32),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
