//! Transfer pass behaviour across the reference regions

use std::collections::{HashMap, HashSet};

use tilt_core::{Color, EntityId, Extent, FrameClock, FrameContext, SimulationConfig, Tilt, Vec2};
use tilt_particles::ParticleRegion;
use tilt_scenes::prelude::*;

fn bubbles(id: RegionId) -> Box<dyn Region> {
    bubbles_with(id, &SimulationConfig::default())
}

fn bubbles_with(id: RegionId, config: &SimulationConfig) -> Box<dyn Region> {
    let region = ParticleRegion::with_seed(Extent::new(800.0, 600.0), u64::from(id.0) + 1);
    let mut scene = ParticleScene::new(id, id.to_string(), region, config);
    scene.region_mut().regenerate(0);
    Box::new(scene)
}

/// Reference layout with no entities in it
fn empty_regions() -> Vec<Box<dyn Region>> {
    let middle = RigidRegion::new(RegionId::MIDDLE, "middle", Extent::new(800.0, 600.0), PhysicsConfig::default())
        .expect("default physics config is valid");
    vec![bubbles(RegionId::UPPER), Box::new(middle), bubbles(RegionId::LOWER)]
}

fn region(regions: &mut [Box<dyn Region>], id: RegionId) -> &mut Box<dyn Region> {
    regions.iter_mut().find(|r| r.id() == id).unwrap()
}

fn count(regions: &[Box<dyn Region>], id: RegionId) -> usize {
    regions.iter().find(|r| r.id() == id).unwrap().entity_count()
}

fn find(regions: &[Box<dyn Region>], id: EntityId) -> Option<(RegionId, EntityView)> {
    regions
        .iter()
        .find_map(|r| r.entities().into_iter().find(|v| v.id == id).map(|v| (r.id(), v)))
}

#[test]
fn test_cube_falling_out_becomes_lower_bubble() {
    let mut regions = empty_regions();
    let cube = region(&mut regions, RegionId::MIDDLE)
        .spawn(SpawnRequest::at(Vec2::new(-100.0, -310.0), Color::YELLOW).with_velocity(Vec2::new(-50.0, -400.0)));

    let report = Orchestrator::reference().transfer(&mut regions);

    assert_eq!(count(&regions, RegionId::MIDDLE), 0);
    assert_eq!(count(&regions, RegionId::LOWER), 1);
    assert_eq!(report.len(), 1);

    let event = &report.events[0];
    assert_eq!(event.rule, "middle-exit-bottom");
    assert_eq!(event.removed, cube);
    assert_eq!(event.to, Vec2::new(300.0, 0.0));

    let (home, bubble) = find(&regions, event.spawned).unwrap();
    assert_eq!(home, RegionId::LOWER);
    assert_eq!(bubble.color, Color::YELLOW);
    assert!(bubble.velocity.x >= 0.0 && bubble.velocity.y >= 0.0);
}

#[test]
fn test_entity_moves_at_most_once_per_pass() {
    let mut regions = empty_regions();
    region(&mut regions, RegionId::MIDDLE).spawn(SpawnRequest::at(Vec2::new(0.0, -310.0), Color::RED));

    // The new bubble lands at y = 0, inside the lower exit strip, but must wait a pass
    let orchestrator = Orchestrator::reference();
    let first = orchestrator.transfer(&mut regions);
    assert_eq!(first.len(), 1);
    assert_eq!(count(&regions, RegionId::LOWER), 1);

    let second = orchestrator.transfer(&mut regions);
    assert_eq!(second.len(), 1);
    assert_eq!(second.events[0].rule, "lower-exit-strip");
    assert_eq!(count(&regions, RegionId::MIDDLE), 1);
    assert_eq!(count(&regions, RegionId::LOWER), 0);
}

#[test]
fn test_bubbles_keep_velocity_between_particle_regions() {
    let mut regions = empty_regions();
    region(&mut regions, RegionId::UPPER).spawn(
        SpawnRequest::at(Vec2::new(100.0, -5.0), Color::BLUE)
            .with_velocity(Vec2::new(-30.0, -60.0))
            .with_base_velocity(Vec2::new(-60.0, -120.0)),
    );

    let report = Orchestrator::reference().transfer(&mut regions);
    assert_eq!(report.events[0].rule, "upper-exit-top");

    let (home, bubble) = find(&regions, report.events[0].spawned).unwrap();
    assert_eq!(home, RegionId::LOWER);
    assert_eq!(bubble.position, Vec2::new(100.0, 600.0));
    assert_eq!(bubble.velocity, Vec2::new(-30.0, -60.0));
    assert_eq!(bubble.base_velocity, Some(Vec2::new(-60.0, -120.0)));
    assert_eq!(bubble.color, Color::BLUE);
}

#[test]
fn test_bubble_to_cube_flips_vertical_velocity() {
    let mut regions = empty_regions();
    region(&mut regions, RegionId::LOWER)
        .spawn(SpawnRequest::at(Vec2::new(600.0, 150.0), Color::RED).with_velocity(Vec2::new(10.0, -40.0)));
    region(&mut regions, RegionId::UPPER)
        .spawn(SpawnRequest::at(Vec2::new(200.0, 605.0), Color::BLUE).with_velocity(Vec2::new(-5.0, 70.0)));

    let report = Orchestrator::reference().transfer(&mut regions);
    assert_eq!(report.len(), 2);
    assert_eq!(count(&regions, RegionId::MIDDLE), 2);

    let strip = report.by_rule("lower-exit-strip").next().unwrap();
    let (_, cube) = find(&regions, strip.spawned).unwrap();
    assert_eq!(cube.kind, EntityKind::Rigid);
    assert_eq!(cube.position, Vec2::new(100.0, -300.0));
    assert_eq!(cube.velocity, Vec2::new(10.0, 40.0));
    assert_eq!(cube.color, Color::RED);

    let drop = report.by_rule("upper-exit-bottom").next().unwrap();
    let (_, cube) = find(&regions, drop.spawned).unwrap();
    assert_eq!(cube.position, Vec2::new(-100.0, 300.0));
    assert_eq!(cube.velocity, Vec2::new(-5.0, -70.0));
}

#[test]
fn test_lower_bottom_exit_uses_upper_height() {
    let mut regions = empty_regions();
    region(&mut regions, RegionId::UPPER).resize(Extent::new(800.0, 400.0));
    let id = region(&mut regions, RegionId::LOWER)
        .spawn(SpawnRequest::at(Vec2::new(50.0, 450.0), Color::RED).with_velocity(Vec2::new(0.0, 10.0)));

    let report = Orchestrator::reference().transfer(&mut regions);
    assert_eq!(report.events[0].rule, "lower-exit-bottom");
    assert_eq!(report.events[0].removed, id);
    assert_eq!(count(&regions, RegionId::UPPER), 1);
}

#[test]
fn test_fresh_bubbles_move_inward_under_reversed_speed() {
    let config = SimulationConfig {
        speed_factor: -1.0,
        ..SimulationConfig::default()
    };
    let middle = RigidRegion::new(RegionId::MIDDLE, "middle", Extent::new(800.0, 600.0), PhysicsConfig::default())
        .expect("default physics config is valid");
    let mut regions: Vec<Box<dyn Region>> = vec![
        bubbles_with(RegionId::UPPER, &config),
        Box::new(middle),
        bubbles_with(RegionId::LOWER, &config),
    ];
    let orchestrator = Orchestrator::reference();

    for i in 0..20 {
        let x = -380.0 + i as f32 * 38.0;
        region(&mut regions, RegionId::MIDDLE).spawn(SpawnRequest::at(Vec2::new(x, -310.0), Color::BLUE));

        let report = orchestrator.transfer(&mut regions);
        let event = report.by_rule("middle-exit-bottom").next().unwrap();
        let velocity = event.velocity.unwrap();
        assert!(velocity.x >= 0.0 && velocity.y >= 0.0, "{:?}", velocity);

        let (_, bubble) = find(&regions, event.spawned).unwrap();
        assert_eq!(bubble.velocity, velocity);
        region(&mut regions, RegionId::LOWER).remove(event.spawned);
    }
}

#[test]
fn test_top_exit_from_middle_uses_lower_width() {
    let mut regions = empty_regions();
    region(&mut regions, RegionId::UPPER).resize(Extent::new(600.0, 400.0));
    region(&mut regions, RegionId::LOWER).resize(Extent::new(1000.0, 700.0));
    region(&mut regions, RegionId::MIDDLE).spawn(SpawnRequest::at(Vec2::new(50.0, 610.0), Color::RED));

    let report = Orchestrator::reference().transfer(&mut regions);
    let event = &report.events[0];
    assert_eq!(event.rule, "middle-exit-top");
    assert_eq!(event.to, Vec2::new(550.0, 400.0));
    assert_eq!(find(&regions, event.spawned).unwrap().0, RegionId::UPPER);
}

#[test]
fn test_upper_top_exit_does_not_bounce_back_into_shorter_upper() {
    let mut regions = empty_regions();
    region(&mut regions, RegionId::UPPER).resize(Extent::new(800.0, 400.0));
    region(&mut regions, RegionId::UPPER)
        .spawn(SpawnRequest::at(Vec2::new(100.0, -1.0), Color::YELLOW).with_velocity(Vec2::new(0.0, -60.0)));

    let orchestrator = Orchestrator::reference();
    let frame = FrameContext::with_delta(1.0 / 60.0);
    let mut events = Vec::new();
    for _ in 0..6 {
        for r in regions.iter_mut() {
            r.step(&frame);
        }
        events.extend(orchestrator.transfer(&mut regions).events);
    }

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].rule, "upper-exit-top");
    assert_eq!(events[0].to, Vec2::new(100.0, 400.0));
    assert_eq!(count(&regions, RegionId::LOWER), 1);
}

#[test]
fn test_unequal_layout_has_no_immediate_returns() {
    let layout = LayoutConfig {
        upper: Extent::new(800.0, 400.0),
        middle: Extent::new(800.0, 600.0),
        lower: Extent::new(1000.0, 700.0),
    };
    let mut scenes = LinkedScenes::new(layout, PhysicsConfig::default(), SimulationConfig::default(), Some(77)).unwrap();
    let total = scenes.total_entities();
    let mut clock = FrameClock::new();
    // Gentle tilt so bubbles drift both up and down
    let tilt = Tilt::new(20.0, 30.0);
    let reverse = |rule: &str| match rule {
        "upper-exit-top" => Some("lower-exit-bottom"),
        "lower-exit-bottom" => Some("upper-exit-top"),
        _ => None,
    };

    let mut previous: HashMap<EntityId, String> = HashMap::new();
    for frame in 0..400 {
        let report = scenes.advance(&clock.tick_seconds(1.0 / 60.0, (frame == 0).then_some(tilt)));
        assert_eq!(scenes.total_entities(), total);

        for event in &report.events {
            if let Some(came_by) = previous.get(&event.removed) {
                assert_ne!(
                    reverse(came_by.as_str()),
                    Some(event.rule.as_str()),
                    "{} bounced straight back via {}",
                    event.removed,
                    event.rule
                );
            }
        }
        // The random initial population may start past an exit line
        if frame > 0 {
            previous = report.events.iter().map(|e| (e.spawned, e.rule.clone())).collect();
        }
    }
}

/// Region whose snapshot lists entities it can no longer hand over
struct Ghosts {
    views: Vec<EntityView>,
}

impl Region for Ghosts {
    fn id(&self) -> RegionId {
        RegionId::UPPER
    }

    fn name(&self) -> &str {
        "ghosts"
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Particle
    }

    fn extent(&self) -> Extent {
        Extent::new(800.0, 600.0)
    }

    fn step(&mut self, _frame: &FrameContext) {}

    fn resize(&mut self, _extent: Extent) {}

    fn entities(&self) -> Vec<EntityView> {
        self.views.clone()
    }

    fn entity_count(&self) -> usize {
        self.views.len()
    }

    fn contains(&self, _id: EntityId) -> bool {
        false
    }

    fn remove(&mut self, _id: EntityId) -> Option<EntityView> {
        None
    }

    fn spawn(&mut self, _request: SpawnRequest) -> EntityId {
        unreachable!("ghosts never receive entities")
    }

    fn set_gravity_direction(&mut self, _direction: Vec2) {}

    fn apply_config(&mut self, _config: &SimulationConfig) {}
}

#[test]
fn test_stale_ids_are_skipped() {
    let ghost = |raw| EntityView {
        id: EntityId::from_raw(raw),
        kind: EntityKind::Particle,
        position: Vec2::new(10.0, -20.0),
        velocity: Vec2::ZERO,
        base_velocity: None,
        color: Color::RED,
        size: 5.0,
        angle: 0.0,
    };
    let mut regions: Vec<Box<dyn Region>> = vec![
        Box::new(Ghosts {
            views: vec![ghost(u64::MAX), ghost(u64::MAX - 1)],
        }),
        bubbles(RegionId::LOWER),
    ];

    let report = Orchestrator::reference().transfer(&mut regions);
    assert_eq!(report.stale, 2);
    assert!(report.events.is_empty());
    assert_eq!(count(&regions, RegionId::LOWER), 0);
}

#[test]
fn test_linked_scenes_conserve_entities() {
    let mut scenes = LinkedScenes::new(
        LayoutConfig::default(),
        PhysicsConfig::default(),
        SimulationConfig::default(),
        Some(2024),
    )
    .unwrap();
    let total = scenes.total_entities();
    let mut clock = FrameClock::new();
    let tilts = [Tilt::new(90.0, 0.0), Tilt::new(-90.0, 30.0), Tilt::new(10.0, -60.0)];

    for frame in 0..600 {
        let tilt = (frame % 100 == 0).then(|| tilts[(frame / 100) % tilts.len()]);
        let report = scenes.advance(&clock.tick_seconds(1.0 / 60.0, tilt));

        assert_eq!(scenes.total_entities(), total);

        let mut seen = HashSet::new();
        for (_, views) in scenes.views() {
            for view in views {
                assert!(seen.insert(view.id), "{} is in two regions", view.id);
            }
        }
        for event in &report.events {
            assert_eq!(scenes.locate(event.removed), None);
        }
    }
}
