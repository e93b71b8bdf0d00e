//! Scene errors

use thiserror::Error;
use tilt_physics::PhysicsError;

use crate::region::RegionId;

/// Errors raised while building or addressing linked scenes
#[derive(Debug, Error)]
pub enum SceneError {
    /// No region is registered under this id
    #[error("Unknown region {0}")]
    UnknownRegion(RegionId),

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
