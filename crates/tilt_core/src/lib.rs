//! # tilt_core - Tilt Core
//!
//! Primitives shared by every crate in the Tilt workspace:
//! - **Geometry**: [`Vec2`] and [`Extent`]
//! - **Identity**: [`EntityId`] handed out by an [`IdGenerator`]
//! - **Appearance**: [`Color`] and [`Palette`]
//! - **Timing**: [`FrameClock`] producing one [`FrameContext`] per frame
//! - **Input**: [`Tilt`] samples mapped to a clamped gravity direction
//! - **Tuning**: [`SimulationConfig`] with range-clamped parameters
//!
//! Nothing here owns simulation state; regions and worlds live in the
//! physics, particle and scene crates.

pub mod color;
pub mod config;
pub mod error;
pub mod extent;
pub mod frame;
pub mod id;
pub mod tilt;
pub mod vector;

pub use color::*;
pub use config::*;
pub use error::*;
pub use extent::*;
pub use frame::*;
pub use id::*;
pub use tilt::*;
pub use vector::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::color::{Color, Palette};
    pub use crate::config::{ParamRange, SimulationConfig};
    pub use crate::error::{Result, TiltError};
    pub use crate::extent::Extent;
    pub use crate::frame::{FrameClock, FrameContext};
    pub use crate::id::{EntityId, IdGenerator};
    pub use crate::tilt::Tilt;
    pub use crate::vector::Vec2;
}
