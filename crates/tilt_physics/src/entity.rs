//! Rigid entities: a body handle plus the state mirrored from it

use tilt_core::{Color, EntityId, Vec2};

use crate::body::RigidBodyHandle;
use crate::world::PhysicsWorld;

/// A collidable box living in a [`crate::RigidWorld`]
///
/// The world owns the body; the entity only keeps its handle. Position,
/// velocity and angle are copies refreshed after every step, so renderers
/// can read them without touching the simulation.
#[derive(Debug, Clone)]
pub struct RigidEntity {
    pub(crate) id: EntityId,
    pub(crate) body: RigidBodyHandle,
    pub(crate) size: f32,
    pub(crate) mass: f32,
    pub(crate) color: Color,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) angle: f32,
}

impl RigidEntity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Edge length of the collision box
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Rotation in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Refresh the mirrored state from the simulation
    pub(crate) fn sync(&mut self, physics: &PhysicsWorld) {
        match (
            physics.body_position(self.body),
            physics.body_linear_velocity(self.body),
            physics.body_rotation(self.body),
        ) {
            (Ok(p), Ok(v), Ok(a)) => {
                self.position = p.into();
                self.velocity = v.into();
                self.angle = a;
            }
            _ => log::warn!("Entity {} lost its rigid body", self.id),
        }
    }
}
