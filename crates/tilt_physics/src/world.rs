//! Physics world - thin container around the Rapier pipeline

use crate::body::{RigidBodyDesc, RigidBodyHandle};
use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use rapier2d::prelude as rapier;
use std::num::NonZeroUsize;

/// The Rapier simulation state behind a [`crate::RigidWorld`]
pub struct PhysicsWorld {
    /// Fixed timestep
    timestep: f32,

    /// Maximum substeps per `step` call
    max_substeps: u32,

    /// Rapier physics pipeline
    pipeline: rapier::PhysicsPipeline,

    /// Gravity
    gravity: rapier::Vector<f32>,

    /// Integration parameters
    integration_params: rapier::IntegrationParameters,

    /// Island manager
    islands: rapier::IslandManager,

    /// Broad phase
    broad_phase: rapier::DefaultBroadPhase,

    /// Narrow phase
    narrow_phase: rapier::NarrowPhase,

    /// Impulse joint set
    impulse_joints: rapier::ImpulseJointSet,

    /// Multibody joint set
    multibody_joints: rapier::MultibodyJointSet,

    /// CCD solver
    ccd_solver: rapier::CCDSolver,

    /// Rigid body set
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,

    /// Accumulated time for fixed timestep
    accumulated_time: f32,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: &PhysicsConfig) -> Self {
        let gravity = rapier::Vector::new(
            config.gravity_direction[0] * config.gravity_strength,
            config.gravity_direction[1] * config.gravity_strength,
        );

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.length_unit = config.pixels_per_meter;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.velocity_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            timestep: config.timestep,
            max_substeps: config.max_substeps.max(1),
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            accumulated_time: 0.0,
        }
    }

    /// Set gravity
    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.gravity = rapier::Vector::new(x, y);
    }

    /// Get gravity
    pub fn gravity(&self) -> [f32; 2] {
        [self.gravity.x, self.gravity.y]
    }

    // ==================== Rigid Bodies ====================

    /// Create a rigid body
    pub fn create_rigid_body(&mut self, desc: &RigidBodyDesc) -> RigidBodyHandle {
        let handle = self.bodies.insert(desc.to_rapier_builder());
        RigidBodyHandle(handle)
    }

    /// Remove a rigid body together with its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) -> Result<()> {
        self.bodies
            .remove(
                handle.0,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true, // Remove attached colliders
            )
            .map(|_| ())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get rigid body position
    pub fn body_position(&self, handle: RigidBodyHandle) -> Result<[f32; 2]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let pos = b.translation();
                [pos.x, pos.y]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Set rigid body position
    pub fn set_body_position(&mut self, handle: RigidBodyHandle, x: f32, y: f32) -> Result<()> {
        self.bodies
            .get_mut(handle.0)
            .map(|b| b.set_translation(rapier::Vector::new(x, y), true))
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get rigid body rotation (radians)
    pub fn body_rotation(&self, handle: RigidBodyHandle) -> Result<f32> {
        self.bodies
            .get(handle.0)
            .map(|b| b.rotation().angle())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get rigid body linear velocity
    pub fn body_linear_velocity(&self, handle: RigidBodyHandle) -> Result<[f32; 2]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let vel = b.linvel();
                [vel.x, vel.y]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Wake every dynamic body
    pub fn wake_all(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            if body.is_dynamic() {
                body.wake_up(true);
            }
        }
    }

    // ==================== Colliders ====================

    /// Create a collider attached to a rigid body
    pub fn create_collider(&mut self, desc: &ColliderDesc, parent: Option<RigidBodyHandle>) -> ColliderHandle {
        let builder = desc.to_rapier_builder();
        let handle = match parent {
            Some(body) => self.colliders.insert_with_parent(builder, body.0, &mut self.bodies),
            None => self.colliders.insert(builder),
        };
        ColliderHandle(handle)
    }

    /// Replace the shape of a collider
    pub fn set_collider_shape(&mut self, handle: ColliderHandle, shape: ColliderShape) -> Result<()> {
        self.colliders
            .get_mut(handle.0)
            .map(|c| c.set_shape(shape.to_rapier()))
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    // ==================== Simulation ====================

    /// Step the physics simulation with fixed timestep
    ///
    /// Time beyond `max_substeps` worth of steps is dropped instead of
    /// carried into the next frame.
    pub fn step(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return;
        }
        self.accumulated_time += delta_time;

        let mut steps = 0;
        while self.accumulated_time >= self.timestep && steps < self.max_substeps {
            self.step_internal();
            self.accumulated_time -= self.timestep;
            steps += 1;
        }

        if self.accumulated_time >= self.timestep {
            log::trace!(
                "Physics fell behind by {:.4}s, dropping backlog",
                self.accumulated_time
            );
            self.accumulated_time %= self.timestep;
        }
    }

    /// Internal fixed timestep
    fn step_internal(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    // ==================== Debug ====================

    /// Get number of rigid bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Get number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Get number of active (awake) bodies
    pub fn active_body_count(&self) -> usize {
        self.islands.active_dynamic_bodies().len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}
