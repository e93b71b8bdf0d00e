//! Rigid world - a bounded region of collidable boxes

use rand::Rng;
use tilt_core::config::GRAVITY_SCALE;
use tilt_core::{next_entity_id, Color, EntityId, Extent, Palette, TiltError, Vec2};

use crate::body::RigidBodyDesc;
use crate::collider::{ColliderDesc, ColliderShape};
use crate::config::PhysicsConfig;
use crate::entity::RigidEntity;
use crate::error::{PhysicsError, Result};
use crate::walls::{Wall, WallBody, WallPlacement, MIN_WALL_THICKNESS};
use crate::world::PhysicsWorld;

/// Smallest edge length accepted for an entity
pub const MIN_BODY_SIZE: f32 = 1.0;

/// Rapier-backed region with three static walls (left, right, bottom)
///
/// Coordinates are centered on the region with y pointing up, so the
/// visible area is `[-w/2, w/2] x [-h/2, h/2]`.
pub struct RigidWorld {
    config: PhysicsConfig,
    physics: PhysicsWorld,
    extent: Extent,
    walls: Vec<WallBody>,
    entities: Vec<RigidEntity>,
    gravity_direction: Vec2,
    gravity_scale: f32,
}

impl RigidWorld {
    /// Create a world for a region of `extent`, with its walls in place
    pub fn new(extent: Extent, config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        let extent = extent.sanitized();
        let mut physics = PhysicsWorld::new(&config);

        let walls = Wall::ALL
            .iter()
            .map(|&wall| {
                let placement = WallPlacement::for_extent(wall, extent, &config);
                let body = physics.create_rigid_body(
                    &RigidBodyDesc::fixed().with_position(placement.position.x, placement.position.y),
                );
                let collider = physics.create_collider(
                    &ColliderDesc::new(placement.shape(wall)).with_material(config.wall_material),
                    Some(body),
                );
                WallBody {
                    wall,
                    body,
                    collider,
                    placement,
                }
            })
            .collect();

        log::info!(
            "Rigid world created ({}x{}, gravity strength {})",
            extent.width, extent.height, config.gravity_strength
        );

        let gravity_direction = Vec2::from(config.gravity_direction);
        let mut world = Self {
            config,
            physics,
            extent,
            walls,
            entities: Vec::new(),
            gravity_direction,
            gravity_scale: GRAVITY_SCALE.default,
        };
        world.apply_gravity();
        Ok(world)
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    // ==================== Entities ====================

    /// Insert a resting box of edge `size` at `position`
    pub fn add_entity(&mut self, position: Vec2, size: f32, color: Color) -> EntityId {
        self.add_entity_with_velocity(position, size, color, Vec2::ZERO)
    }

    /// Insert a box with an initial linear velocity
    ///
    /// Non-positive sizes are clamped to [`MIN_BODY_SIZE`].
    pub fn add_entity_with_velocity(
        &mut self,
        position: Vec2,
        size: f32,
        color: Color,
        velocity: Vec2,
    ) -> EntityId {
        let size = if size.is_finite() && size > 0.0 {
            size
        } else {
            let err = TiltError::InvalidDimension {
                what: "entity size",
                value: size,
            };
            log::warn!("{}, clamping to {}", err, MIN_BODY_SIZE);
            MIN_BODY_SIZE
        };
        let position = if position.is_finite() {
            position
        } else {
            log::warn!("Invalid entity position {:?}, using origin", position);
            Vec2::ZERO
        };
        let velocity = if velocity.is_finite() { velocity } else { Vec2::ZERO };

        let id = next_entity_id();
        let body = self.physics.create_rigid_body(
            &RigidBodyDesc::dynamic()
                .with_position(position.x, position.y)
                .with_linear_velocity(velocity.x, velocity.y)
                .with_ccd(self.config.ccd_enabled)
                .with_can_sleep(self.config.sleeping_enabled),
        );
        self.physics.create_collider(
            &ColliderDesc::new(ColliderShape::square(size))
                .with_material(self.config.entity_material)
                .with_mass(self.config.entity_mass)
                .with_user_data(id.raw() as u128),
            Some(body),
        );

        self.entities.push(RigidEntity {
            id,
            body,
            size,
            mass: self.config.entity_mass,
            color,
            position,
            velocity,
            angle: 0.0,
        });

        log::debug!("Rigid entity {} added at ({:.1}, {:.1})", id, position.x, position.y);
        id
    }

    /// Fill the region with `count` boxes at random positions, colors cycling through `palette`
    pub fn populate<R: Rng + ?Sized>(&mut self, count: usize, palette: &Palette, rng: &mut R) -> Vec<EntityId> {
        let half = self.extent.half();
        let size = self.config.entity_size;
        (0..count)
            .map(|i| {
                let x = rng.gen_range(-half.x..=half.x);
                let y = rng.gen_range(-half.y..=half.y);
                self.add_entity(Vec2::new(x, y), size, palette.cycle(i))
            })
            .collect()
    }

    /// Detach an entity and free its body
    pub fn remove_entity(&mut self, id: EntityId) -> Result<RigidEntity> {
        let index = self
            .entities
            .iter()
            .position(|e| e.id == id)
            .ok_or(PhysicsError::EntityNotFound(id))?;
        let entity = self.entities.swap_remove(index);

        if let Err(e) = self.physics.remove_rigid_body(entity.body) {
            log::warn!("Entity {} had no body to remove: {}", id, e);
        }
        log::debug!("Rigid entity {} removed", id);
        Ok(entity)
    }

    pub fn entities(&self) -> &[RigidEntity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&RigidEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Bodies in the simulation, walls included
    pub fn body_count(&self) -> usize {
        self.physics.body_count()
    }

    /// Dynamic bodies that are currently awake
    pub fn active_body_count(&self) -> usize {
        self.physics.active_body_count()
    }

    // ==================== Gravity ====================

    /// Point gravity along `(gx, gy)` in world space (y up)
    ///
    /// The vector is multiplied by the configured strength and the current
    /// gravity scale. Non-finite components are rejected and the previous
    /// gravity stays in effect.
    pub fn set_gravity_direction(&mut self, gx: f32, gy: f32) -> Result<()> {
        if !(gx.is_finite() && gy.is_finite()) {
            return Err(PhysicsError::InvalidGravity(gx, gy));
        }
        self.gravity_direction = Vec2::new(gx, gy);
        self.apply_gravity();
        Ok(())
    }

    pub fn gravity_direction(&self) -> Vec2 {
        self.gravity_direction
    }

    /// Set the gravity multiplier, clamped to `[0.5, 10]`
    pub fn set_gravity_scale(&mut self, scale: f32) -> f32 {
        self.gravity_scale = GRAVITY_SCALE.clamp(scale);
        self.apply_gravity();
        self.gravity_scale
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    /// Effective gravity vector
    pub fn gravity(&self) -> Vec2 {
        self.physics.gravity().into()
    }

    fn apply_gravity(&mut self) {
        let g = self.gravity_direction * (self.config.gravity_strength * self.gravity_scale);
        self.physics.set_gravity(g.x, g.y);
        self.physics.wake_all();
    }

    // ==================== Boundaries ====================

    /// Move one wall and change its thickness; its length is kept
    pub fn set_boundary(&mut self, wall: Wall, position: Vec2, thickness: f32) {
        if !position.is_finite() {
            log::warn!("Ignoring non-finite position for {:?} wall", wall);
            return;
        }
        let thickness = if thickness.is_finite() && thickness >= MIN_WALL_THICKNESS {
            thickness
        } else {
            log::warn!("Invalid wall thickness {}, clamping to {}", thickness, MIN_WALL_THICKNESS);
            MIN_WALL_THICKNESS
        };

        let Some(index) = self.walls.iter().position(|w| w.wall == wall) else {
            return;
        };
        let placement = WallPlacement {
            position,
            length: self.walls[index].placement.length,
            thickness,
        };
        self.place_wall(index, placement);
    }

    /// Current placement of a wall
    pub fn wall(&self, wall: Wall) -> Option<WallPlacement> {
        self.walls.iter().find(|w| w.wall == wall).map(|w| w.placement)
    }

    /// Change the region size and re-lay all walls
    pub fn resize(&mut self, extent: Extent) {
        self.extent = extent.sanitized();
        for index in 0..self.walls.len() {
            let placement = WallPlacement::for_extent(self.walls[index].wall, self.extent, &self.config);
            self.place_wall(index, placement);
        }
        log::info!("Rigid world resized to {}x{}", self.extent.width, self.extent.height);
    }

    fn place_wall(&mut self, index: usize, placement: WallPlacement) {
        let WallBody { wall, body, collider, .. } = self.walls[index];
        let moved = self
            .physics
            .set_body_position(body, placement.position.x, placement.position.y)
            .and_then(|_| self.physics.set_collider_shape(collider, placement.shape(wall)));
        match moved {
            Ok(()) => self.walls[index].placement = placement,
            Err(e) => log::warn!("Could not move {:?} wall: {}", wall, e),
        }
    }

    // ==================== Simulation ====================

    /// Advance by `dt` seconds and refresh every entity's mirrored state
    pub fn step(&mut self, dt: f32) {
        self.physics.step(dt);
        for entity in &mut self.entities {
            entity.sync(&self.physics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world() -> RigidWorld {
        RigidWorld::new(Extent::new(800.0, 600.0), PhysicsConfig::default()).unwrap()
    }

    #[test]
    fn test_new_world_has_walls_only() {
        let world = world();
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.body_count(), 3);
        assert_eq!(world.wall(Wall::Right).unwrap().position, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PhysicsConfig::default().with_timestep(-1.0);
        assert!(RigidWorld::new(Extent::default(), config).is_err());
    }

    #[test]
    fn test_add_and_remove_entity() {
        let mut world = world();
        let id = world.add_entity(Vec2::new(10.0, 20.0), 50.0, Color::RED);

        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.body_count(), 4);
        let entity = world.entity(id).unwrap();
        assert_eq!(entity.position(), Vec2::new(10.0, 20.0));
        assert_eq!(entity.color(), Color::RED);
        assert_relative_eq!(entity.mass(), 1.0);

        let removed = world.remove_entity(id).unwrap();
        assert_eq!(removed.id(), id);
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.body_count(), 3);
    }

    #[test]
    fn test_remove_stale_entity_is_an_error_not_a_panic() {
        let mut world = world();
        let id = world.add_entity(Vec2::ZERO, 50.0, Color::BLUE);
        world.remove_entity(id).unwrap();

        assert!(matches!(world.remove_entity(id), Err(PhysicsError::EntityNotFound(_))));
        assert_eq!(world.body_count(), 3);
    }

    #[test]
    fn test_non_positive_size_is_clamped() {
        let mut world = world();
        let id = world.add_entity(Vec2::ZERO, -4.0, Color::YELLOW);
        assert_eq!(world.entity(id).unwrap().size(), MIN_BODY_SIZE);
        let id = world.add_entity(Vec2::ZERO, f32::NAN, Color::YELLOW);
        assert_eq!(world.entity(id).unwrap().size(), MIN_BODY_SIZE);
    }

    #[test]
    fn test_entities_fall_and_mirror_updates() {
        let mut world = world();
        let id = world.add_entity(Vec2::new(-300.0, 200.0), 50.0, Color::RED);

        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }

        let entity = world.entity(id).unwrap();
        assert!(entity.position().y < 200.0);
        assert!(entity.velocity().y < 0.0);
    }

    #[test]
    fn test_gravity_direction_and_scale() {
        let mut world = world();
        world.set_gravity_direction(1.0, 0.0).unwrap();
        assert_relative_eq!(world.gravity().x, 980.0);
        assert_relative_eq!(world.gravity().y, 0.0);

        assert_relative_eq!(world.set_gravity_scale(2.0), 2.0);
        assert_relative_eq!(world.gravity().x, 1960.0);

        // Scaling never compounds
        world.set_gravity_scale(2.0);
        assert_relative_eq!(world.gravity().x, 1960.0);

        assert_relative_eq!(world.set_gravity_scale(100.0), 10.0);
    }

    #[test]
    fn test_non_finite_gravity_is_rejected() {
        let mut world = world();
        world.set_gravity_direction(0.5, -0.5).unwrap();
        assert!(world.set_gravity_direction(f32::INFINITY, 0.0).is_err());
        assert_eq!(world.gravity_direction(), Vec2::new(0.5, -0.5));
    }

    #[test]
    fn test_tilted_gravity_pushes_sideways() {
        let mut world = world();
        world.set_gravity_direction(1.0, 0.0).unwrap();
        let id = world.add_entity(Vec2::ZERO, 20.0, Color::RED);

        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }

        assert!(world.entity(id).unwrap().position().x > 0.0);
    }

    #[test]
    fn test_set_boundary_keeps_length() {
        let mut world = world();
        world.set_boundary(Wall::Bottom, Vec2::new(0.0, -250.0), 30.0);

        let bottom = world.wall(Wall::Bottom).unwrap();
        assert_eq!(bottom.position, Vec2::new(0.0, -250.0));
        assert_eq!(bottom.thickness, 30.0);
        assert_eq!(bottom.length, 100.0);

        world.set_boundary(Wall::Left, Vec2::new(-380.0, 0.0), 0.0);
        assert_eq!(world.wall(Wall::Left).unwrap().thickness, MIN_WALL_THICKNESS);
    }

    #[test]
    fn test_resize_relays_walls() {
        let mut world = world();
        world.resize(Extent::new(1000.0, 400.0));

        assert_eq!(world.extent(), Extent::new(1000.0, 400.0));
        assert_eq!(world.wall(Wall::Left).unwrap().position, Vec2::new(-500.0, 0.0));
        assert_eq!(world.wall(Wall::Right).unwrap().length, 400.0);
        assert_eq!(world.wall(Wall::Bottom).unwrap().position, Vec2::new(0.0, -200.0));
    }

    #[test]
    fn test_populate_cycles_palette_within_bounds() {
        let mut world = world();
        let mut rng = StdRng::seed_from_u64(3);
        let ids = world.populate(10, &Palette::cubes(), &mut rng);

        assert_eq!(ids.len(), 10);
        assert_eq!(world.entity(ids[0]).unwrap().color(), Color::RED);
        assert_eq!(world.entity(ids[1]).unwrap().color(), Color::YELLOW);
        assert_eq!(world.entity(ids[2]).unwrap().color(), Color::BLUE);
        for entity in world.entities() {
            assert!(world.extent().contains_centered(entity.position()));
            assert_eq!(entity.size(), 50.0);
        }
    }

    #[test]
    fn test_box_lands_on_bottom_wall() {
        let mut world = world();
        let id = world.add_entity(Vec2::new(0.0, 0.0), 20.0, Color::BLUE);

        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }

        // Bottom wall top face is at -300 + 7.5, box half size is 10
        let y = world.entity(id).unwrap().position().y;
        assert!(y > -300.0, "box fell through the bottom wall: {}", y);
        assert!(y < -270.0, "box did not settle: {}", y);
    }
}
