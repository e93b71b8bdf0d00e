//! Error types shared by the Tilt crates

use thiserror::Error;

use crate::id::EntityId;

/// Core error taxonomy
///
/// None of these are fatal. Callers either skip the operation
/// (`InvalidEntityReference`) or clamp the input and keep going
/// (`InvalidDimension`, `OutOfRangeParameter`).
#[derive(Debug, Error)]
pub enum TiltError {
    /// Entity is not present in the region it was looked up in
    #[error("Entity {id} is not in region {region}")]
    InvalidEntityReference { id: EntityId, region: String },

    /// Non-positive or non-finite size/radius
    #[error("Invalid dimension for {what}: {value}")]
    InvalidDimension { what: &'static str, value: f32 },

    /// Configuration value outside its documented range
    #[error("Parameter {name} = {value} is outside [{min}, {max}]")]
    OutOfRangeParameter {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Unparseable color string
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, TiltError>;
