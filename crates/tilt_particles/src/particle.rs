//! A single kinematic particle and its integration rule

use tilt_core::{Color, EntityId, Vec2};

/// A bouncing bubble
///
/// `base_velocity` is the velocity the particle was spawned with. Speed
/// changes always rescale from it, never from the current velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicParticle {
    pub(crate) id: EntityId,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) base_velocity: Vec2,
    pub(crate) gravity: Vec2,
    pub(crate) radius: f32,
    pub(crate) color: Color,
}

impl KinematicParticle {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn base_velocity(&self) -> Vec2 {
        self.base_velocity
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set velocity from `base_velocity`: `v = direction * base * magnitude`
    ///
    /// A zero direction stops the particle but keeps its base velocity.
    pub(crate) fn rescale(&mut self, direction: f32, magnitude: f32) {
        self.velocity = if direction == 0.0 {
            Vec2::ZERO
        } else {
            self.base_velocity * (direction * magnitude)
        };
    }

    /// Advance by `dt` seconds inside a region of the given width
    ///
    /// 1. Horizontal gravity is dropped while the particle touches a side wall.
    /// 2. Position integrates velocity plus gravity.
    /// 3. Leaving the sides clamps x back in and points vx inward.
    ///
    /// The vertical axis is never reflected: leaving through the top or
    /// bottom is how particles move to another region.
    pub(crate) fn integrate(&mut self, width: f32, dt: f32) {
        let r = self.radius;

        if self.position.x <= r || self.position.x >= width - r {
            self.gravity.x = 0.0;
        }

        self.position.x += (self.velocity.x + self.gravity.x) * dt;
        self.position.y += (self.velocity.y + self.gravity.y) * dt;

        if width < 2.0 * r {
            self.position.x = width * 0.5;
        } else if self.position.x < r {
            self.position.x = r;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > width - r {
            self.position.x = width - r;
            self.velocity.x = -self.velocity.x.abs();
        }
    }
}
