//! Static boundary walls of a rigid world

use serde::{Deserialize, Serialize};
use tilt_core::{Extent, Vec2};

use crate::body::RigidBodyHandle;
use crate::collider::{ColliderHandle, ColliderShape};
use crate::config::PhysicsConfig;

/// Thinnest wall the world accepts
pub const MIN_WALL_THICKNESS: f32 = 0.5;

/// One of the three boundary walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Bottom,
}

impl Wall {
    pub const ALL: [Wall; 3] = [Wall::Left, Wall::Right, Wall::Bottom];

    /// Left and right walls run along y, the bottom wall along x
    pub fn is_vertical(self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }
}

/// Placement of a wall: center position, length along the wall, thickness across it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPlacement {
    pub position: Vec2,
    pub length: f32,
    pub thickness: f32,
}

impl WallPlacement {
    /// Collision box of this placement for the given wall
    pub fn shape(&self, wall: Wall) -> ColliderShape {
        if wall.is_vertical() {
            ColliderShape::from_size(self.thickness, self.length)
        } else {
            ColliderShape::from_size(self.length, self.thickness)
        }
    }

    /// Default placement of `wall` for a region of `extent` (centered, y up)
    pub fn for_extent(wall: Wall, extent: Extent, config: &PhysicsConfig) -> Self {
        let half = extent.half();
        match wall {
            Wall::Left => Self {
                position: Vec2::new(-half.x, 0.0),
                length: extent.height,
                thickness: config.vertical_wall_thickness,
            },
            Wall::Right => Self {
                position: Vec2::new(half.x, 0.0),
                length: extent.height,
                thickness: config.vertical_wall_thickness,
            },
            Wall::Bottom => Self {
                position: Vec2::new(0.0, -half.y),
                length: config.bottom_wall_width,
                thickness: config.horizontal_wall_thickness,
            },
        }
    }
}

/// A wall's simulation handles and current placement
#[derive(Debug, Clone, Copy)]
pub struct WallBody {
    pub wall: Wall,
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub placement: WallPlacement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_extent() {
        let config = PhysicsConfig::default();
        let extent = Extent::new(800.0, 600.0);

        let left = WallPlacement::for_extent(Wall::Left, extent, &config);
        assert_eq!(left.position, Vec2::new(-400.0, 0.0));
        assert_eq!(left.length, 600.0);

        let bottom = WallPlacement::for_extent(Wall::Bottom, extent, &config);
        assert_eq!(bottom.position, Vec2::new(0.0, -300.0));
        assert_eq!(bottom.length, 100.0);
        assert_eq!(bottom.thickness, 15.0);
    }

    #[test]
    fn test_shape_orientation() {
        let placement = WallPlacement {
            position: Vec2::ZERO,
            length: 10.0,
            thickness: 2.0,
        };
        assert_eq!(
            placement.shape(Wall::Right),
            ColliderShape::Cuboid { half_extents: [1.0, 5.0] }
        );
        assert_eq!(
            placement.shape(Wall::Bottom),
            ColliderShape::Cuboid { half_extents: [5.0, 1.0] }
        );
    }
}
