//! Rigid region backed by the Rapier world

use rand::Rng;
use tilt_core::{EntityId, Extent, FrameContext, Palette, SimulationConfig, Vec2};
use tilt_physics::{PhysicsConfig, RigidEntity, RigidWorld};

use crate::error::Result;
use crate::region::{EntityKind, EntityView, Region, RegionId, SpawnRequest};

/// The middle scene: cubes falling under tilt gravity
pub struct RigidRegion {
    id: RegionId,
    name: String,
    world: RigidWorld,
    palette: Palette,
}

impl RigidRegion {
    pub fn new(id: RegionId, name: impl Into<String>, extent: Extent, config: PhysicsConfig) -> Result<Self> {
        Ok(Self {
            id,
            name: name.into(),
            world: RigidWorld::new(extent, config)?,
            palette: Palette::cubes(),
        })
    }

    /// Add the configured number of cubes at random positions
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<EntityId> {
        let count = self.world.config().initial_entities;
        self.world.populate(count, &self.palette, rng)
    }

    pub fn world(&self) -> &RigidWorld {
        &self.world
    }
}

fn view(entity: &RigidEntity) -> EntityView {
    EntityView {
        id: entity.id(),
        kind: EntityKind::Rigid,
        position: entity.position(),
        velocity: entity.velocity(),
        base_velocity: None,
        color: entity.color(),
        size: entity.size(),
        angle: entity.angle(),
    }
}

impl Region for RigidRegion {
    fn id(&self) -> RegionId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Rigid
    }

    fn extent(&self) -> Extent {
        self.world.extent()
    }

    fn step(&mut self, frame: &FrameContext) {
        self.world.step(frame.delta);
    }

    fn resize(&mut self, extent: Extent) {
        self.world.resize(extent);
    }

    fn entities(&self) -> Vec<EntityView> {
        self.world.entities().iter().map(view).collect()
    }

    fn entity_count(&self) -> usize {
        self.world.entity_count()
    }

    fn contains(&self, id: EntityId) -> bool {
        self.world.contains(id)
    }

    fn remove(&mut self, id: EntityId) -> Option<EntityView> {
        self.world.remove_entity(id).ok().map(|e| view(&e))
    }

    fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        let size = self.world.config().entity_size;
        let velocity = request.velocity.unwrap_or(Vec2::ZERO);
        self.world
            .add_entity_with_velocity(request.position, size, request.color, velocity)
    }

    fn set_gravity_direction(&mut self, direction: Vec2) {
        // Screen y points down, the world's y points up
        if let Err(e) = self.world.set_gravity_direction(direction.x, -direction.y) {
            log::warn!("{}: {}", self.name, e);
        }
    }

    fn apply_config(&mut self, config: &SimulationConfig) {
        self.world.set_gravity_scale(config.gravity_scale);
    }
}
