//! Transfer rules: when an entity leaves one region and where it reappears

use serde::{Deserialize, Serialize};
use tilt_core::{Extent, Vec2};

use crate::region::RegionId;

/// Which region a dimension is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionRef {
    Source,
    Destination,
    Region(RegionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Width,
    Height,
}

/// A length expressed as `factor * dimension(region) + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub reference: RegionRef,
    pub dimension: Dimension,
    pub factor: f32,
    pub offset: f32,
}

impl Anchor {
    pub const fn new(reference: RegionRef, dimension: Dimension, factor: f32, offset: f32) -> Self {
        Self {
            reference,
            dimension,
            factor,
            offset,
        }
    }

    /// Fixed value independent of any region
    pub const fn constant(value: f32) -> Self {
        Self::new(RegionRef::Source, Dimension::Width, 0.0, value)
    }

    pub fn resolve(&self, extents: &RuleExtents<'_>) -> f32 {
        let extent = extents.get(self.reference);
        let length = match self.dimension {
            Dimension::Width => extent.width,
            Dimension::Height => extent.height,
        };
        self.factor * length + self.offset
    }
}

/// Region sizes a rule is evaluated against
///
/// Sizes are captured once at the start of a transfer pass.
#[derive(Debug, Clone, Copy)]
pub struct RuleExtents<'a> {
    pub source: Extent,
    pub destination: Extent,
    pub all: &'a [(RegionId, Extent)],
}

impl RuleExtents<'_> {
    fn get(&self, reference: RegionRef) -> Extent {
        match reference {
            RegionRef::Source => self.source,
            RegionRef::Destination => self.destination,
            RegionRef::Region(id) => match self.all.iter().find(|(r, _)| *r == id) {
                Some((_, extent)) => *extent,
                None => {
                    log::warn!("Rule refers to unknown region {}, using source size", id);
                    self.source
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Strictly less than the threshold
    Below,
    /// Strictly greater than the threshold
    Above,
}

/// Boundary test on one coordinate of an entity in its source region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPredicate {
    pub axis: Axis,
    pub comparison: Comparison,
    pub threshold: Anchor,
}

impl BoundaryPredicate {
    pub const fn below(axis: Axis, threshold: Anchor) -> Self {
        Self {
            axis,
            comparison: Comparison::Below,
            threshold,
        }
    }

    pub const fn above(axis: Axis, threshold: Anchor) -> Self {
        Self {
            axis,
            comparison: Comparison::Above,
            threshold,
        }
    }

    pub fn matches(&self, position: Vec2, extents: &RuleExtents<'_>) -> bool {
        let value = match self.axis {
            Axis::X => position.x,
            Axis::Y => position.y,
        };
        let threshold = self.threshold.resolve(extents);
        match self.comparison {
            Comparison::Below => value < threshold,
            Comparison::Above => value > threshold,
        }
    }
}

/// How one coordinate of the spawn position is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisMap {
    /// `(source coordinate + offset) * scale`
    Carry { offset: Anchor, scale: f32 },
    /// Independent of the source coordinate
    Fixed(Anchor),
}

impl AxisMap {
    /// Keep the coordinate as is
    pub const fn identity() -> Self {
        Self::Carry {
            offset: Anchor::constant(0.0),
            scale: 1.0,
        }
    }

    pub fn apply(&self, value: f32, extents: &RuleExtents<'_>) -> f32 {
        match self {
            Self::Carry { offset, scale } => (value + offset.resolve(extents)) * scale,
            Self::Fixed(anchor) => anchor.resolve(extents),
        }
    }
}

/// Maps a source position (and velocity) into the destination frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTransform {
    pub x: AxisMap,
    pub y: AxisMap,
    /// Negate vertical velocity, for moves between y-down and y-up frames
    pub flip_velocity_y: bool,
}

impl SpawnTransform {
    pub fn position(&self, source: Vec2, extents: &RuleExtents<'_>) -> Vec2 {
        Vec2::new(self.x.apply(source.x, extents), self.y.apply(source.y, extents))
    }

    pub fn velocity(&self, velocity: Vec2) -> Vec2 {
        if self.flip_velocity_y {
            velocity.flip_y()
        } else {
            velocity
        }
    }
}

/// Where a transferred entity's velocity comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocitySource {
    /// Carried over from the removed entity
    Inherit,
    /// Drawn by the destination region as for a brand new entity
    Fresh,
}

/// Sign handling applied to the spawn velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityPolicy {
    Preserve,
    /// Both components made non-negative
    Absolute,
}

impl VelocityPolicy {
    pub fn apply(self, velocity: Vec2) -> Vec2 {
        match self {
            Self::Preserve => velocity,
            Self::Absolute => velocity.abs(),
        }
    }
}

/// One directed boundary crossing between two regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRule {
    pub name: String,
    pub source: RegionId,
    pub destination: RegionId,
    pub predicate: BoundaryPredicate,
    pub spawn: SpawnTransform,
    pub velocity: VelocitySource,
    pub policy: VelocityPolicy,
}
