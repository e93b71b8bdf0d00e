//! Bubble region adapter

use tilt_core::{EntityId, Extent, FrameContext, SimulationConfig, Vec2};
use tilt_particles::{KinematicParticle, ParticleRegion};

use crate::region::{EntityKind, EntityView, FreshVelocity, Region, RegionId, SpawnRequest};

/// An upper or lower bubble scene
pub struct ParticleScene {
    id: RegionId,
    name: String,
    region: ParticleRegion,
    link_threshold: f32,
    particle_count: u32,
}

impl ParticleScene {
    /// Scene with `config.particle_count` random bubbles
    pub fn new(id: RegionId, name: impl Into<String>, region: ParticleRegion, config: &SimulationConfig) -> Self {
        let config = config.sanitized();
        let mut scene = Self {
            id,
            name: name.into(),
            region,
            link_threshold: config.link_threshold,
            particle_count: config.particle_count,
        };
        scene.region.set_radius(config.radius);
        scene.region.set_gravity_strength(config.gravity_strength);
        scene.region.apply_speed(config.speed_factor);
        scene.region.regenerate(config.particle_count as usize);
        scene
    }

    pub fn region(&self) -> &ParticleRegion {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut ParticleRegion {
        &mut self.region
    }

    pub fn link_threshold(&self) -> f32 {
        self.link_threshold
    }
}

fn view(particle: &KinematicParticle) -> EntityView {
    EntityView {
        id: particle.id(),
        kind: EntityKind::Particle,
        position: particle.position(),
        velocity: particle.velocity(),
        base_velocity: Some(particle.base_velocity()),
        color: particle.color(),
        size: particle.radius(),
        angle: 0.0,
    }
}

impl Region for ParticleScene {
    fn id(&self) -> RegionId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Particle
    }

    fn extent(&self) -> Extent {
        self.region.extent()
    }

    fn step(&mut self, frame: &FrameContext) {
        self.region.step(frame.delta);
    }

    fn resize(&mut self, extent: Extent) {
        self.region.resize(extent);
        log::info!("{} resized to {}x{}", self.name, extent.width, extent.height);
    }

    fn entities(&self) -> Vec<EntityView> {
        self.region.particles().iter().map(view).collect()
    }

    fn entity_count(&self) -> usize {
        self.region.len()
    }

    fn contains(&self, id: EntityId) -> bool {
        self.region.contains(id)
    }

    fn remove(&mut self, id: EntityId) -> Option<EntityView> {
        self.region.remove_particle(id).map(|p| view(&p))
    }

    fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        let radius = self.region.radius();
        let SpawnRequest {
            position,
            velocity,
            base_velocity,
            color,
        } = request;
        match (velocity, base_velocity) {
            (Some(v), base) => self.region.add_particle_with_velocity(position, radius, color, v, base),
            (None, Some(base)) => self.region.add_particle_with_base(position, radius, color, base),
            (None, None) => self.region.add_particle(position, radius, color),
        }
    }

    fn fresh_velocity(&mut self) -> FreshVelocity {
        let base = self.region.random_velocity();
        FreshVelocity {
            velocity: self.region.scaled_velocity(base),
            base,
        }
    }

    fn set_gravity_direction(&mut self, direction: Vec2) {
        self.region.set_gravity(direction.x, direction.y);
    }

    fn apply_config(&mut self, config: &SimulationConfig) {
        let config = config.sanitized();
        self.link_threshold = config.link_threshold;
        self.region.set_radius(config.radius);
        self.region.set_gravity_strength(config.gravity_strength);
        self.region.apply_speed(config.speed_factor);

        if config.particle_count != self.particle_count {
            log::debug!("{} particle count: {}", self.name, config.particle_count);
            self.particle_count = config.particle_count;
            self.region.regenerate(config.particle_count as usize);
        }
    }

    fn links(&self) -> Vec<(EntityId, EntityId)> {
        self.region.links(self.link_threshold)
    }
}
