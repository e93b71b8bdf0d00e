//! Region capability shared by every scene

use core::fmt;
use serde::{Deserialize, Serialize};
use tilt_core::{Color, EntityId, Extent, FrameContext, SimulationConfig, Vec2};

/// Stable identity of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u8);

impl RegionId {
    /// Upper bubble region
    pub const UPPER: Self = Self(0);
    /// Middle rigid region
    pub const MIDDLE: Self = Self(1);
    /// Lower bubble region
    pub const LOWER: Self = Self(2);

    pub const ALL: [Self; 3] = [Self::UPPER, Self::MIDDLE, Self::LOWER];
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UPPER => write!(f, "upper"),
            Self::MIDDLE => write!(f, "middle"),
            Self::LOWER => write!(f, "lower"),
            Self(n) => write!(f, "region-{}", n),
        }
    }
}

/// Motion model of the entities a region holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Collidable boxes simulated by the rigid solver
    Rigid,
    /// Kinematic bubbles
    Particle,
}

/// Read-only copy of one entity, in its region's own coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Spawn velocity speed changes rescale from (particles only)
    pub base_velocity: Option<Vec2>,
    pub color: Color,
    /// Edge length for rigid boxes, radius for particles
    pub size: f32,
    /// Rotation in radians
    pub angle: f32,
}

/// Live and base velocity drawn for a new entity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FreshVelocity {
    pub velocity: Vec2,
    pub base: Vec2,
}

/// What a region needs to create an entity on behalf of a transfer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec2,
    /// Explicit starting velocity; `None` lets the region derive one
    pub velocity: Option<Vec2>,
    pub base_velocity: Option<Vec2>,
    pub color: Color,
}

impl SpawnRequest {
    pub fn at(position: Vec2, color: Color) -> Self {
        Self {
            position,
            velocity: None,
            base_velocity: None,
            color,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_base_velocity(mut self, base: Vec2) -> Self {
        self.base_velocity = Some(base);
        self
    }
}

/// A bounded simulation area the orchestrator can move entities in and out of
///
/// Gravity directions are always given in screen space (x right, y down,
/// components in `[-1, 1]`); each region converts to its own frame.
pub trait Region: Send {
    fn id(&self) -> RegionId;

    fn name(&self) -> &str;

    fn kind(&self) -> EntityKind;

    fn extent(&self) -> Extent;

    /// Advance the simulation by `frame.delta`
    fn step(&mut self, frame: &FrameContext);

    fn resize(&mut self, extent: Extent);

    /// Snapshot of every entity
    fn entities(&self) -> Vec<EntityView>;

    fn entity_count(&self) -> usize;

    fn contains(&self, id: EntityId) -> bool;

    /// Detach an entity, returning its last state; unknown ids give `None`
    fn remove(&mut self, id: EntityId) -> Option<EntityView>;

    /// Create an entity and return its new id
    fn spawn(&mut self, request: SpawnRequest) -> EntityId;

    /// Starting motion of a brand new entity of this region
    fn fresh_velocity(&mut self) -> FreshVelocity {
        FreshVelocity::default()
    }

    fn set_gravity_direction(&mut self, direction: Vec2);

    fn apply_config(&mut self, config: &SimulationConfig);

    /// Pairs of nearby entities to draw links between
    fn links(&self) -> Vec<(EntityId, EntityId)> {
        Vec::new()
    }
}
