//! Tilt Particles - kinematic bubble regions
//!
//! Particles here are not simulated by a solver. Each one moves on a straight
//! line plus a constant gravity offset, bounces off the left and right edges,
//! and is free to leave through the top or bottom. The scene orchestrator
//! picks those escapees up and moves them to a neighbouring region.
//!
//! ```ignore
//! use tilt_particles::prelude::*;
//! use tilt_core::Extent;
//!
//! let mut region = ParticleRegion::new(Extent::new(800.0, 600.0));
//! region.regenerate(3);
//! region.set_gravity(0.0, 1.0);
//! region.step(1.0 / 60.0);
//! let pairs = region.links(50.0);
//! ```

pub mod particle;
pub mod region;

pub mod prelude {
    pub use crate::particle::KinematicParticle;
    pub use crate::region::{ParticleRegion, MIN_RADIUS, RANDOM_SPEED};
}

pub use prelude::*;
