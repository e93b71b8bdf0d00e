//! Tilt Scenes - three linked regions and the transfers between them
//!
//! ```text
//! ┌──────────────────────────┐
//! │ upper   (bubbles, y down)│◄──┐
//! ├──────────────────────────┤   │ lower-exit-bottom
//! │ middle  (cubes,   y up)  │   │
//! ├──────────────────────────┤   │
//! │ lower   (bubbles, y down)│───┘
//! └──────────────────────────┘
//!          ▲
//!   Orchestrator: rules evaluated in order after every step
//! ```
//!
//! Regions never talk to each other. After each step the [`Orchestrator`]
//! looks for entities past a boundary, removes them from their region and
//! spawns an equivalent entity in the neighbour, translating coordinates
//! and velocity between the two frames.
//!
//! ```ignore
//! use tilt_scenes::prelude::*;
//! use tilt_core::{FrameClock, Tilt};
//!
//! let mut scenes = LinkedScenes::new(LayoutConfig::default(), PhysicsConfig::default(), SimulationConfig::default(), None)?;
//! let mut clock = FrameClock::new();
//! let report = scenes.advance(&clock.tick(Some(Tilt::new(20.0, -10.0))));
//! for event in &report.events {
//!     println!("{} moved {} -> {}", event.rule, event.source, event.destination);
//! }
//! ```

pub mod error;
pub mod events;
pub mod orchestrator;
pub mod particle_scene;
pub mod region;
pub mod rigid_region;
pub mod rule;
pub mod scenes;
pub mod topology;

pub mod prelude {
    pub use crate::error::{Result, SceneError};
    pub use crate::events::{TransferEvent, TransferReport};
    pub use crate::orchestrator::Orchestrator;
    pub use crate::particle_scene::ParticleScene;
    pub use crate::region::{EntityKind, EntityView, FreshVelocity, Region, RegionId, SpawnRequest};
    pub use crate::rigid_region::RigidRegion;
    pub use crate::rule::{
        Anchor, Axis, AxisMap, BoundaryPredicate, Comparison, Dimension, RegionRef, RuleExtents, SpawnTransform,
        TransferRule, VelocityPolicy, VelocitySource,
    };
    pub use crate::scenes::{LayoutConfig, LinkedScenes};
    pub use crate::topology::{Topology, LOWER_EXIT_STRIP};

    pub use tilt_core::SimulationConfig;
    pub use tilt_physics::PhysicsConfig;
}

pub use prelude::*;
