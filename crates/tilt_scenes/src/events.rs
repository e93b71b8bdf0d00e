//! Transfer events

use serde::{Deserialize, Serialize};
use tilt_core::{Color, EntityId, Vec2};

use crate::region::RegionId;

/// One entity moved from one region to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Name of the rule that fired
    pub rule: String,
    pub source: RegionId,
    pub destination: RegionId,
    /// Id the entity had in the source region
    pub removed: EntityId,
    /// Id of the entity created in the destination
    pub spawned: EntityId,
    /// Position in the source frame when the rule fired
    pub from: Vec2,
    /// Spawn position in the destination frame
    pub to: Vec2,
    /// Spawn velocity handed to the destination, if explicit
    pub velocity: Option<Vec2>,
    pub color: Color,
}

impl TransferEvent {
    /// Check if the entity entered `region`
    pub fn is_into(&self, region: RegionId) -> bool {
        self.destination == region
    }

    /// Check if the entity left `region`
    pub fn is_out_of(&self, region: RegionId) -> bool {
        self.source == region
    }
}

/// Outcome of one transfer pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    pub events: Vec<TransferEvent>,
    /// Matched ids that were already gone when the pass tried to remove them
    pub stale: usize,
}

impl TransferReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.stale == 0
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Events produced by one rule
    pub fn by_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a TransferEvent> + 'a {
        self.events.iter().filter(move |e| e.rule == rule)
    }

    /// Entities that arrived in `region` minus those that left it
    pub fn net_flow(&self, region: RegionId) -> i64 {
        self.events.iter().fold(0, |acc, e| {
            acc + i64::from(e.is_into(region)) - i64::from(e.is_out_of(region))
        })
    }
}
