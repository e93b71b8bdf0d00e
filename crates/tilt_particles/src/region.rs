//! Particle region - owns a set of bubbles and integrates them each frame

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilt_core::config::{GRAVITY_STRENGTH, RADIUS, SPEED_FACTOR};
use tilt_core::{next_entity_id, Color, EntityId, Extent, Palette, TiltError, Vec2};

use crate::particle::KinematicParticle;

/// Spawn speed bound on each axis, units/s
pub const RANDOM_SPEED: f32 = 200.0;

/// Smallest radius a particle may have
pub const MIN_RADIUS: f32 = 0.5;

/// Region of kinematic particles
///
/// Coordinates have their origin at the top-left corner with y growing
/// downward; the visible area is `[0, w] x [0, h]`.
pub struct ParticleRegion {
    extent: Extent,
    particles: Vec<KinematicParticle>,
    radius: f32,
    gravity_direction: Vec2,
    gravity_strength: f32,
    speed_direction: f32,
    speed_magnitude: f32,
    palette: Palette,
    rng: StdRng,
}

impl ParticleRegion {
    /// Create an empty region seeded from the OS
    pub fn new(extent: Extent) -> Self {
        Self::with_rng(extent, StdRng::from_entropy())
    }

    /// Create an empty region with a deterministic seed
    pub fn with_seed(extent: Extent, seed: u64) -> Self {
        Self::with_rng(extent, StdRng::seed_from_u64(seed))
    }

    fn with_rng(extent: Extent, rng: StdRng) -> Self {
        Self {
            extent: extent.sanitized(),
            particles: Vec::new(),
            radius: RADIUS.default,
            gravity_direction: Vec2::ZERO,
            gravity_strength: GRAVITY_STRENGTH.default,
            speed_direction: 1.0,
            speed_magnitude: 1.0,
            palette: Palette::bubbles(),
            rng,
        }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Radius used for new particles
    pub fn radius(&self) -> f32 {
        self.radius
    }

    // ==================== Particles ====================

    /// Add a particle with a random base velocity in `[-200, 200]` per axis
    ///
    /// The current speed factor applies to the starting velocity.
    pub fn add_particle(&mut self, position: Vec2, radius: f32, color: Color) -> EntityId {
        let base = self.random_velocity();
        self.add_particle_with_base(position, radius, color, base)
    }

    /// Add a particle whose velocity is `base` under the current speed factor
    pub fn add_particle_with_base(&mut self, position: Vec2, radius: f32, color: Color, base: Vec2) -> EntityId {
        let base = if base.is_finite() {
            base
        } else {
            log::warn!("Invalid particle base velocity {:?}, spawning at rest", base);
            Vec2::ZERO
        };
        let velocity = self.scaled_velocity(base);
        self.insert(position, radius, color, velocity, base)
    }

    /// Add a particle with an explicit velocity
    ///
    /// `base_velocity` defaults to `velocity` when not given.
    pub fn add_particle_with_velocity(
        &mut self,
        position: Vec2,
        radius: f32,
        color: Color,
        velocity: Vec2,
        base_velocity: Option<Vec2>,
    ) -> EntityId {
        let velocity = if velocity.is_finite() {
            velocity
        } else {
            log::warn!("Invalid particle velocity {:?}, spawning at rest", velocity);
            Vec2::ZERO
        };
        let base = base_velocity.filter(|b| b.is_finite()).unwrap_or(velocity);
        self.insert(position, radius, color, velocity, base)
    }

    /// Add a particle at a random position with a palette color and the region radius
    pub fn add_random_particle(&mut self) -> EntityId {
        let position = Vec2::new(
            self.rng.gen_range(0.0..=self.extent.width),
            self.rng.gen_range(0.0..=self.extent.height),
        );
        let color = self.palette.pick(&mut self.rng);
        self.add_particle(position, self.radius, color)
    }

    /// Draw a random base velocity without creating a particle
    pub fn random_velocity(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(-RANDOM_SPEED..=RANDOM_SPEED),
            self.rng.gen_range(-RANDOM_SPEED..=RANDOM_SPEED),
        )
    }

    /// Velocity a particle with `base` would have under the current speed factor
    pub fn scaled_velocity(&self, base: Vec2) -> Vec2 {
        if self.speed_direction == 0.0 {
            Vec2::ZERO
        } else {
            base * (self.speed_direction * self.speed_magnitude)
        }
    }

    /// Replace every particle with `count` random ones
    pub fn regenerate(&mut self, count: usize) {
        self.particles.clear();
        for _ in 0..count {
            self.add_random_particle();
        }
        log::info!("Particle region regenerated with {} particles", count);
    }

    fn insert(&mut self, position: Vec2, radius: f32, color: Color, velocity: Vec2, base: Vec2) -> EntityId {
        let position = if position.is_finite() {
            position
        } else {
            log::warn!("Invalid particle position {:?}, using region center", position);
            self.extent.half()
        };
        let id = next_entity_id();
        self.particles.push(KinematicParticle {
            id,
            position,
            velocity,
            base_velocity: base,
            gravity: self.gravity_direction * self.gravity_strength,
            radius: sanitize_radius(radius),
            color,
        });
        id
    }

    /// Detach a particle; unknown ids are ignored
    pub fn remove_particle(&mut self, id: EntityId) -> Option<KinematicParticle> {
        let index = self.particles.iter().position(|p| p.id == id)?;
        Some(self.particles.swap_remove(index))
    }

    pub fn particles(&self) -> &[KinematicParticle] {
        &self.particles
    }

    pub fn particle(&self, id: EntityId) -> Option<&KinematicParticle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.particle(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    // ==================== Tuning ====================

    /// Point gravity along `(gx, gy)` (screen space, y down) for every particle
    pub fn set_gravity(&mut self, gx: f32, gy: f32) {
        if !(gx.is_finite() && gy.is_finite()) {
            log::warn!("Ignoring non-finite particle gravity ({}, {})", gx, gy);
            return;
        }
        self.gravity_direction = Vec2::new(gx, gy);
        self.apply_gravity();
    }

    /// Acceleration for a unit direction, clamped to `[0, 400]`
    pub fn set_gravity_strength(&mut self, strength: f32) -> f32 {
        self.gravity_strength = GRAVITY_STRENGTH.clamp(strength);
        self.apply_gravity();
        self.gravity_strength
    }

    pub fn gravity_strength(&self) -> f32 {
        self.gravity_strength
    }

    /// Ambient gravity vector given to particles
    pub fn gravity(&self) -> Vec2 {
        self.gravity_direction * self.gravity_strength
    }

    fn apply_gravity(&mut self) {
        let g = self.gravity();
        for p in &mut self.particles {
            p.gravity = g;
        }
    }

    /// Rescale every particle from its base velocity
    ///
    /// `direction` is reduced to its sign; zero stops every particle.
    pub fn set_speed_factor(&mut self, direction: f32, magnitude: f32) {
        let direction = if direction.is_nan() || direction == 0.0 {
            0.0
        } else {
            direction.signum()
        };
        let magnitude = if magnitude.is_finite() { magnitude.abs() } else { 0.0 };

        self.speed_direction = direction;
        self.speed_magnitude = magnitude;
        for p in &mut self.particles {
            p.rescale(direction, magnitude);
        }
    }

    /// Apply a signed speed in `[-1, 1]` (sign = direction, size = magnitude)
    pub fn apply_speed(&mut self, speed: f32) {
        let speed = SPEED_FACTOR.clamp(speed);
        self.set_speed_factor(speed, speed.abs());
    }

    /// Current `(direction, magnitude)`
    pub fn speed_factor(&self) -> (f32, f32) {
        (self.speed_direction, self.speed_magnitude)
    }

    /// Change the radius of every particle and of future ones
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = sanitize_radius(radius);
        for p in &mut self.particles {
            p.radius = self.radius;
        }
    }

    // ==================== Simulation ====================

    /// Integrate every particle by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let width = self.extent.width;
        for p in &mut self.particles {
            p.integrate(width, dt);
        }
    }

    /// Change the region size and pull particles back inside
    pub fn resize(&mut self, extent: Extent) {
        self.extent = extent.sanitized();
        let Extent { width, height } = self.extent;
        for p in &mut self.particles {
            p.position.x = p.position.x.clamp(0.0, width);
            p.position.y = p.position.y.clamp(0.0, height);
        }
    }

    /// Pairs of distinct particles closer than `threshold`
    pub fn links(&self, threshold: f32) -> Vec<(EntityId, EntityId)> {
        let mut pairs = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if a.position.distance(b.position) < threshold {
                    pairs.push((a.id, b.id));
                }
            }
        }
        pairs
    }
}

fn sanitize_radius(radius: f32) -> f32 {
    if radius.is_finite() && radius >= MIN_RADIUS {
        radius
    } else {
        let err = TiltError::InvalidDimension {
            what: "particle radius",
            value: radius,
        };
        log::warn!("{}, clamping to {}", err, MIN_RADIUS);
        MIN_RADIUS
    }
}
