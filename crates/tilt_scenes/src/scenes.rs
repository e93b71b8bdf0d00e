//! The three linked scenes and their per-frame driver

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tilt_core::{EntityId, Extent, FrameContext, SimulationConfig, Tilt};
use tilt_particles::ParticleRegion;
use tilt_physics::PhysicsConfig;

use crate::error::{Result, SceneError};
use crate::events::TransferReport;
use crate::orchestrator::Orchestrator;
use crate::particle_scene::ParticleScene;
use crate::region::{EntityView, Region, RegionId};
use crate::rigid_region::RigidRegion;

/// Sizes of the three stacked regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub upper: Extent,
    pub middle: Extent,
    pub lower: Extent,
}

/// Upper bubbles, middle cubes, lower bubbles, linked by an [`Orchestrator`]
pub struct LinkedScenes {
    regions: Vec<Box<dyn Region>>,
    orchestrator: Orchestrator,
    config: SimulationConfig,
}

impl LinkedScenes {
    /// Build and populate the reference scenes
    ///
    /// A seed makes the initial population and every random spawn velocity
    /// reproducible.
    pub fn new(
        layout: LayoutConfig,
        physics: PhysicsConfig,
        config: SimulationConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        let config = config.sanitized();
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let upper = ParticleScene::new(
            RegionId::UPPER,
            "upper",
            ParticleRegion::with_seed(layout.upper, rng.gen()),
            &config,
        );
        let mut middle = RigidRegion::new(RegionId::MIDDLE, "middle", layout.middle, physics)?;
        middle.apply_config(&config);
        middle.populate(&mut rng);
        let lower = ParticleScene::new(
            RegionId::LOWER,
            "lower",
            ParticleRegion::with_seed(layout.lower, rng.gen()),
            &config,
        );

        let scenes = Self::from_regions(
            vec![Box::new(upper), Box::new(middle), Box::new(lower)],
            Orchestrator::reference(),
            config,
        );
        log::info!("Linked scenes ready with {} entities", scenes.total_entities());
        Ok(scenes)
    }

    /// Drive arbitrary regions with a custom orchestrator
    pub fn from_regions(regions: Vec<Box<dyn Region>>, orchestrator: Orchestrator, config: SimulationConfig) -> Self {
        Self {
            regions,
            orchestrator,
            config,
        }
    }

    /// One frame: apply the tilt sample (if any), step every region, then transfer
    pub fn advance(&mut self, frame: &FrameContext) -> TransferReport {
        if let Some(tilt) = frame.tilt {
            self.apply_tilt(tilt);
        }
        for region in &mut self.regions {
            region.step(frame);
        }
        let report = self.orchestrator.transfer(&mut self.regions);
        log::trace!(
            "Frame {}: dt {:.4}, {} entities, {} transfers",
            frame.frame,
            frame.delta,
            self.total_entities(),
            report.len()
        );
        report
    }

    /// Point every region's gravity along the device tilt
    pub fn apply_tilt(&mut self, tilt: Tilt) {
        let direction = tilt.gravity_direction();
        for region in &mut self.regions {
            region.set_gravity_direction(direction);
        }
    }

    pub fn resize_region(&mut self, id: RegionId, extent: Extent) -> Result<()> {
        let region = self
            .regions
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(SceneError::UnknownRegion(id))?;
        region.resize(extent);
        Ok(())
    }

    /// Apply tuning parameters, clamped into their ranges
    pub fn apply_config(&mut self, config: &SimulationConfig) {
        let config = config.sanitized();
        if config != self.config {
            log::info!("Simulation config changed: {:?}", config);
        }
        for region in &mut self.regions {
            region.apply_config(&config);
        }
        self.config = config;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn region(&self, id: RegionId) -> Option<&dyn Region> {
        self.regions.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut dyn Region> {
        match self.regions.iter_mut().find(|r| r.id() == id) {
            Some(region) => Some(region.as_mut()),
            None => None,
        }
    }

    pub fn regions(&self) -> impl Iterator<Item = &dyn Region> {
        self.regions.iter().map(|r| r.as_ref())
    }

    /// Entity snapshots per region, in region order
    pub fn views(&self) -> Vec<(RegionId, Vec<EntityView>)> {
        self.regions.iter().map(|r| (r.id(), r.entities())).collect()
    }

    /// Link pairs of one region (empty for rigid regions)
    pub fn links(&self, id: RegionId) -> Vec<(EntityId, EntityId)> {
        self.region(id).map(|r| r.links()).unwrap_or_default()
    }

    pub fn total_entities(&self) -> usize {
        self.regions.iter().map(|r| r.entity_count()).sum()
    }

    /// Region holding `id`, if any
    pub fn locate(&self, id: EntityId) -> Option<RegionId> {
        self.regions.iter().find(|r| r.contains(id)).map(|r| r.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenes() -> LinkedScenes {
        LinkedScenes::new(
            LayoutConfig::default(),
            PhysicsConfig::default(),
            SimulationConfig::default(),
            Some(11),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_population() {
        let scenes = scenes();
        assert_eq!(scenes.region(RegionId::UPPER).unwrap().entity_count(), 3);
        assert_eq!(scenes.region(RegionId::MIDDLE).unwrap().entity_count(), 10);
        assert_eq!(scenes.region(RegionId::LOWER).unwrap().entity_count(), 3);
        assert_eq!(scenes.total_entities(), 16);
    }

    #[test]
    fn test_resize_unknown_region() {
        let mut scenes = scenes();
        assert!(matches!(
            scenes.resize_region(RegionId(9), Extent::new(10.0, 10.0)),
            Err(SceneError::UnknownRegion(RegionId(9)))
        ));
        assert!(scenes.resize_region(RegionId::LOWER, Extent::new(400.0, 300.0)).is_ok());
        assert_eq!(scenes.region(RegionId::LOWER).unwrap().extent(), Extent::new(400.0, 300.0));
    }

    #[test]
    fn test_apply_config_is_clamped() {
        let mut scenes = scenes();
        let config = SimulationConfig {
            particle_count: 500,
            gravity_scale: 0.0,
            ..SimulationConfig::default()
        };
        scenes.apply_config(&config);

        assert_eq!(scenes.config().particle_count, 50);
        assert_eq!(scenes.config().gravity_scale, 0.5);
        assert_eq!(scenes.region(RegionId::UPPER).unwrap().entity_count(), 50);
    }

    #[test]
    fn test_links_empty_for_rigid_region() {
        let scenes = scenes();
        assert!(scenes.links(RegionId::MIDDLE).is_empty());
    }
}
