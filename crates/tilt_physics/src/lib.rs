//! Tilt Physics - Rapier 2D rigid region
//!
//! This crate provides the rigid half of the Tilt scenes: a bounded world of
//! collidable boxes that fall under a tiltable gravity vector.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  RigidWorld                    │
//! │  ┌──────────────┐  ┌────────────────────────┐ │
//! │  │ RigidEntity  │  │ walls: left/right/bottom│ │
//! │  │  (mirrors)   │  └────────────────────────┘ │
//! │  └──────┬───────┘                              │
//! │         ▼ handles                              │
//! │  ┌─────────────────────────────────────────┐  │
//! │  │        PhysicsWorld (Rapier pipeline)    │  │
//! │  └─────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tilt_physics::prelude::*;
//! use tilt_core::{Color, Extent, Vec2};
//!
//! let mut world = RigidWorld::new(Extent::new(800.0, 600.0), PhysicsConfig::default())?;
//! let id = world.add_entity(Vec2::new(0.0, 100.0), 50.0, Color::RED);
//! world.set_gravity_direction(0.3, -1.0)?;
//! world.step(1.0 / 60.0);
//! println!("{:?}", world.entity(id).map(|e| e.position()));
//! ```

pub mod body;
pub mod collider;
pub mod config;
pub mod entity;
pub mod error;
pub mod material;
pub mod rigid_world;
pub mod walls;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{RigidBodyDesc, RigidBodyHandle, RigidBodyType};
    pub use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::entity::RigidEntity;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::material::PhysicsMaterial;
    pub use crate::rigid_world::{RigidWorld, MIN_BODY_SIZE};
    pub use crate::walls::{Wall, WallPlacement};
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
