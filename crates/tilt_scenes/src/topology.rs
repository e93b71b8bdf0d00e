//! Ordered sets of transfer rules

use serde::{Deserialize, Serialize};

use crate::region::RegionId;
use crate::rule::{
    Anchor, Axis, AxisMap, BoundaryPredicate, Dimension, RegionRef, SpawnTransform, TransferRule, VelocityPolicy,
    VelocitySource,
};

/// Height of the strip at the top of the lower region that hands bubbles to the middle
pub const LOWER_EXIT_STRIP: f32 = 400.0;

/// Rules evaluated in order on every transfer pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    rules: Vec<TransferRule>,
}

impl Topology {
    pub fn new(rules: Vec<TransferRule>) -> Self {
        Self { rules }
    }

    /// The upper/middle/lower layout
    ///
    /// Upper and lower hold bubbles (y down, origin top-left); the middle
    /// holds rigid cubes (y up, origin at the center).
    ///
    /// Some anchors name a fixed region. Cubes leaving the top are offset by
    /// half the lower width. Bubbles leaving the top of the upper region
    /// reappear at the upper height, on the lower region's bottom exit line.
    pub fn reference() -> Self {
        use Dimension::{Height, Width};
        use RegionRef::{Destination, Source};

        let (upper, middle, lower) = (RegionId::UPPER, RegionId::MIDDLE, RegionId::LOWER);
        let bubble_to_cube_x = AxisMap::Carry {
            offset: Anchor::new(Destination, Width, -0.5, 0.0),
            scale: 0.5,
        };

        Self::new(vec![
            TransferRule {
                name: "middle-exit-bottom".into(),
                source: middle,
                destination: lower,
                predicate: BoundaryPredicate::below(Axis::Y, Anchor::new(Source, Height, -0.5, 0.0)),
                spawn: SpawnTransform {
                    x: AxisMap::Carry {
                        offset: Anchor::new(Destination, Width, 0.5, 0.0),
                        scale: 1.0,
                    },
                    y: AxisMap::Fixed(Anchor::constant(0.0)),
                    flip_velocity_y: false,
                },
                velocity: VelocitySource::Fresh,
                policy: VelocityPolicy::Absolute,
            },
            TransferRule {
                name: "middle-exit-top".into(),
                source: middle,
                destination: upper,
                predicate: BoundaryPredicate::above(Axis::Y, Anchor::new(Source, Height, 1.0, 0.0)),
                spawn: SpawnTransform {
                    x: AxisMap::Carry {
                        offset: Anchor::new(RegionRef::Region(lower), Width, 0.5, 0.0),
                        scale: 1.0,
                    },
                    y: AxisMap::Fixed(Anchor::new(Destination, Height, 1.0, 0.0)),
                    flip_velocity_y: false,
                },
                velocity: VelocitySource::Fresh,
                policy: VelocityPolicy::Absolute,
            },
            TransferRule {
                name: "upper-exit-top".into(),
                source: upper,
                destination: lower,
                predicate: BoundaryPredicate::below(Axis::Y, Anchor::constant(0.0)),
                spawn: SpawnTransform {
                    x: AxisMap::identity(),
                    y: AxisMap::Fixed(Anchor::new(RegionRef::Region(upper), Height, 1.0, 0.0)),
                    flip_velocity_y: false,
                },
                velocity: VelocitySource::Inherit,
                policy: VelocityPolicy::Preserve,
            },
            TransferRule {
                name: "lower-exit-bottom".into(),
                source: lower,
                destination: upper,
                predicate: BoundaryPredicate::above(Axis::Y, Anchor::new(RegionRef::Region(upper), Height, 1.0, 0.0)),
                spawn: SpawnTransform {
                    x: AxisMap::identity(),
                    y: AxisMap::Fixed(Anchor::constant(0.0)),
                    flip_velocity_y: false,
                },
                velocity: VelocitySource::Inherit,
                policy: VelocityPolicy::Preserve,
            },
            TransferRule {
                name: "lower-exit-strip".into(),
                source: lower,
                destination: middle,
                predicate: BoundaryPredicate::below(Axis::Y, Anchor::new(Source, Height, 1.0, -LOWER_EXIT_STRIP)),
                spawn: SpawnTransform {
                    x: bubble_to_cube_x,
                    y: AxisMap::Fixed(Anchor::new(Destination, Height, -0.5, 0.0)),
                    flip_velocity_y: true,
                },
                velocity: VelocitySource::Inherit,
                policy: VelocityPolicy::Preserve,
            },
            TransferRule {
                name: "upper-exit-bottom".into(),
                source: upper,
                destination: middle,
                predicate: BoundaryPredicate::above(Axis::Y, Anchor::new(Source, Height, 1.0, 0.0)),
                spawn: SpawnTransform {
                    x: bubble_to_cube_x,
                    y: AxisMap::Fixed(Anchor::new(Destination, Height, 0.5, 0.0)),
                    flip_velocity_y: true,
                },
                velocity: VelocitySource::Inherit,
                policy: VelocityPolicy::Preserve,
            },
        ])
    }

    pub fn rules(&self) -> &[TransferRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&TransferRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Append a rule; it is evaluated after the existing ones
    pub fn push(&mut self, rule: TransferRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
