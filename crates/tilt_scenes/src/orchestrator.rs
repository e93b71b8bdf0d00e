//! Transfer pass: moves entities that crossed a boundary into the neighbouring region

use std::collections::HashSet;

use tilt_core::{EntityId, Extent, TiltError};

use crate::events::{TransferEvent, TransferReport};
use crate::region::{Region, RegionId, SpawnRequest};
use crate::rule::{RuleExtents, TransferRule, VelocitySource};
use crate::topology::Topology;

/// Applies a [`Topology`] to a set of regions
///
/// Holds no per-frame state. Each pass runs every rule in order as three
/// phases: match against a snapshot of the source, detach the matches,
/// spawn their replacements in the destination. An entity created earlier
/// in the pass is never matched again, so nothing moves twice per pass.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    topology: Topology,
}

impl Orchestrator {
    pub fn new(topology: Topology) -> Self {
        Self { topology }
    }

    /// Orchestrator for [`Topology::reference`]
    pub fn reference() -> Self {
        Self::new(Topology::reference())
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Run one transfer pass over `regions`
    pub fn transfer(&self, regions: &mut [Box<dyn Region>]) -> TransferReport {
        let extents: Vec<(RegionId, Extent)> = regions.iter().map(|r| (r.id(), r.extent())).collect();
        let mut spawned = HashSet::new();
        let mut report = TransferReport::default();

        for rule in self.topology.rules() {
            self.apply_rule(rule, regions, &extents, &mut spawned, &mut report);
        }

        if !report.is_empty() {
            log::trace!("Transfer pass: {} moved, {} stale", report.len(), report.stale);
        }
        report
    }

    fn apply_rule(
        &self,
        rule: &TransferRule,
        regions: &mut [Box<dyn Region>],
        all: &[(RegionId, Extent)],
        spawned: &mut HashSet<EntityId>,
        report: &mut TransferReport,
    ) {
        let lookup = |id: RegionId| {
            let index = regions.iter().position(|r| r.id() == id)?;
            let extent = all.iter().find(|(r, _)| *r == id).map(|(_, e)| *e)?;
            Some((index, extent))
        };
        let (Some((src, source)), Some((dst, destination))) = (lookup(rule.source), lookup(rule.destination))
        else {
            log::warn!(
                "Rule {} links missing regions {} -> {}, skipping",
                rule.name, rule.source, rule.destination
            );
            return;
        };
        let extents = RuleExtents {
            source,
            destination,
            all,
        };

        let matches: Vec<EntityId> = regions[src]
            .entities()
            .into_iter()
            .filter(|v| !spawned.contains(&v.id) && rule.predicate.matches(v.position, &extents))
            .map(|v| v.id)
            .collect();

        for id in matches {
            let Some(removed) = regions[src].remove(id) else {
                report.stale += 1;
                let err = TiltError::InvalidEntityReference {
                    id,
                    region: regions[src].name().to_string(),
                };
                log::debug!("{}: {}, skipped", rule.name, err);
                continue;
            };

            let to = rule.spawn.position(removed.position, &extents);
            let mut request = SpawnRequest::at(to, removed.color);
            match rule.velocity {
                VelocitySource::Inherit => {
                    let carry = |v| rule.policy.apply(rule.spawn.velocity(v));
                    request.velocity = Some(carry(removed.velocity));
                    request.base_velocity = removed.base_velocity.map(carry);
                }
                VelocitySource::Fresh => {
                    let fresh = regions[dst].fresh_velocity();
                    request.velocity = Some(rule.policy.apply(fresh.velocity));
                    request.base_velocity = Some(fresh.base);
                }
            }

            let new_id = regions[dst].spawn(request);
            spawned.insert(new_id);
            log::debug!(
                "{}: {} ({:.1}, {:.1}) -> {} ({:.1}, {:.1}) as {}",
                rule.name,
                id,
                removed.position.x,
                removed.position.y,
                rule.destination,
                to.x,
                to.y,
                new_id
            );

            report.events.push(TransferEvent {
                rule: rule.name.clone(),
                source: rule.source,
                destination: rule.destination,
                removed: id,
                spawned: new_id,
                from: removed.position,
                to,
                velocity: request.velocity,
                color: removed.color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle_scene::ParticleScene;
    use crate::rule::{Anchor, Axis, AxisMap, BoundaryPredicate, SpawnTransform, VelocityPolicy};
    use tilt_core::{Color, SimulationConfig, Vec2};
    use tilt_particles::ParticleRegion;

    fn empty_scene(id: RegionId) -> Box<dyn Region> {
        let region = ParticleRegion::with_seed(Extent::new(800.0, 600.0), 1);
        let mut scene = ParticleScene::new(id, id.to_string(), region, &SimulationConfig::default());
        scene.region_mut().regenerate(0);
        Box::new(scene)
    }

    fn ping_pong() -> Topology {
        let rule = |name: &str, source, destination| TransferRule {
            name: name.into(),
            source,
            destination,
            predicate: BoundaryPredicate::below(Axis::X, Anchor::constant(100.0)),
            spawn: SpawnTransform {
                x: AxisMap::identity(),
                y: AxisMap::identity(),
                flip_velocity_y: false,
            },
            velocity: VelocitySource::Inherit,
            policy: VelocityPolicy::Preserve,
        };
        Topology::new(vec![
            rule("a-to-b", RegionId::UPPER, RegionId::LOWER),
            rule("b-to-a", RegionId::LOWER, RegionId::UPPER),
        ])
    }

    #[test]
    fn test_entity_moves_once_per_pass() {
        let mut regions = vec![empty_scene(RegionId::UPPER), empty_scene(RegionId::LOWER)];
        let id = regions[0].spawn(SpawnRequest::at(Vec2::new(50.0, 50.0), Color::RED).with_velocity(Vec2::ZERO));

        let orchestrator = Orchestrator::new(ping_pong());
        let report = orchestrator.transfer(&mut regions);

        assert_eq!(report.len(), 1);
        assert_eq!(report.events[0].removed, id);
        assert_eq!(regions[0].entity_count(), 0);
        assert_eq!(regions[1].entity_count(), 1);

        // Next pass sends it back
        let report = orchestrator.transfer(&mut regions);
        assert_eq!(report.events[0].rule, "b-to-a");
        assert_eq!(regions[0].entity_count(), 1);
    }

    #[test]
    fn test_missing_region_skips_rule() {
        let mut regions = vec![empty_scene(RegionId::UPPER)];
        regions[0].spawn(SpawnRequest::at(Vec2::new(50.0, 50.0), Color::RED));

        let report = Orchestrator::new(ping_pong()).transfer(&mut regions);
        assert!(report.is_empty());
        assert_eq!(regions[0].entity_count(), 1);
    }
}
