//! End-to-end runs of the bridge over the rapier2d world

use glam::Vec2;

use pegboard::consts::SIM_DT;
use pegboard::renderer::RenderSurface;
use pegboard::{
    BridgeConfig, PegboardLayout, PhysicsWorld, RapierWorld, SimulationBridge, SpawnPolicy,
    SpriteList, StaticGeometry, pegboard_layout,
};

type Bridge = SimulationBridge<RapierWorld, SpriteList>;

fn scenario_geometry() -> Vec<StaticGeometry> {
    vec![
        StaticGeometry::segment(Vec2::new(0.0, 10.0), Vec2::new(800.0, 10.0), 10.0),
        StaticGeometry::segment(Vec2::new(750.0, 10.0), Vec2::new(800.0, 30.0), 10.0),
        // Bumpers sit outside the spawn range so drops land straight on the floor
        StaticGeometry::circle(Vec2::new(30.0, 400.0), 20.0, 0.3).with_image("images/bumper.png"),
        StaticGeometry::circle(Vec2::new(30.0, 600.0), 20.0, 0.3).with_image("images/bumper.png"),
        StaticGeometry::circle(Vec2::new(770.0, 400.0), 20.0, 0.3).with_image("images/bumper.png"),
    ]
}

fn scenario_config(seed: u64) -> BridgeConfig {
    BridgeConfig {
        seed,
        spawn_interval: 20,
        fixed_dt: SIM_DT,
        spawn: SpawnPolicy {
            x_min: 100.0,
            x_max: 700.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn build(config: BridgeConfig, geometry: &[StaticGeometry]) -> Bridge {
    let world = RapierWorld::new(config.gravity);
    let mut bridge = SimulationBridge::new(config, world, SpriteList::new()).unwrap();
    bridge.initialize(geometry).unwrap();
    bridge
}

/// Every entity's sprite exists and every sprite is either static or paired
fn assert_paired(bridge: &Bridge) {
    let entities = bridge.entities();
    assert_eq!(bridge.world().dynamic_body_count(), entities.len());
    assert_eq!(
        bridge.surface().visual_count(),
        bridge.static_visual_count() + entities.len()
    );
    for entity in entities {
        assert!(bridge.world().contains(entity.body));
        assert!(bridge.surface().sprite(entity.visual).is_some());
    }
}

#[test]
fn scenario_200_frames() {
    let mut bridge = build(scenario_config(2024), &scenario_geometry());
    assert_eq!(bridge.static_visual_count(), 5);

    for _ in 0..200 {
        bridge.tick(SIM_DT).unwrap();
        assert_paired(&bridge);
    }

    let count = bridge.entity_count();
    assert!((9..=11).contains(&count), "entity count {count}");
    assert_eq!(bridge.stats().spawned, 10);
}

#[test]
fn sprites_follow_bodies() {
    let mut bridge = build(scenario_config(5), &scenario_geometry());
    for _ in 0..150 {
        bridge.tick(SIM_DT).unwrap();
    }

    for entity in bridge.entities() {
        let sprite = bridge.surface().sprite(entity.visual).unwrap();
        let body_pos = bridge.world().position(entity.body);
        let body_deg = bridge.world().angle(entity.body).to_degrees();
        assert_eq!(sprite.position, body_pos);
        assert!((sprite.angle_degrees - body_deg).abs() < 1e-4);
        assert_eq!(sprite.size, Vec2::splat(30.0));
    }
}

#[test]
fn balls_fall_from_spawn_height() {
    let mut bridge = build(scenario_config(11), &scenario_geometry());
    for _ in 0..10 {
        bridge.tick(SIM_DT).unwrap();
    }
    let first = bridge.entities()[0];
    for _ in 0..20 {
        bridge.tick(SIM_DT).unwrap();
    }
    assert!(bridge.world().position(first.body).y < 800.0);
}

#[test]
fn fixed_step_determinism() {
    let run = || {
        let mut bridge = build(scenario_config(77), &pegboard_layout(&PegboardLayout::default()));
        for _ in 0..300 {
            bridge.tick(SIM_DT).unwrap();
        }
        bridge.snapshot()
    };

    let a = run();
    let b = run();
    assert_eq!(a.frame, 300);
    assert!(!a.entities.is_empty());
    assert_eq!(a, b);
}

#[test]
fn balls_without_ground_are_reaped() {
    // No floor: everything eventually falls below zero
    let geometry = [StaticGeometry::circle(Vec2::new(400.0, 400.0), 20.0, 0.3)];
    let mut bridge = build(scenario_config(3), &geometry);

    let mut below_last_frame: Vec<u32> = Vec::new();
    for _ in 0..400 {
        bridge.tick(SIM_DT).unwrap();
        for id in &below_last_frame {
            assert!(bridge.entities().iter().all(|e| e.id != *id), "entity {id} survived");
        }
        assert_paired(&bridge);

        below_last_frame = bridge
            .entities()
            .iter()
            .filter(|e| bridge.world().position(e.body).y < 0.0)
            .map(|e| e.id)
            .collect();
    }

    let stats = bridge.stats();
    assert!(stats.reaped > 0);
    assert_eq!(stats.spawned - stats.reaped, bridge.entity_count() as u64);
    // Only the circle remains among static bodies
    assert_eq!(bridge.world().body_count(), 1 + bridge.entity_count());
}

#[test]
fn full_pegboard_keeps_pairing() {
    let mut bridge = build(BridgeConfig::with_seed(1), &pegboard_layout(&PegboardLayout::default()));
    assert_eq!(bridge.static_body_count(), 39);
    // 36 bumper sprites + 3 ground lines
    assert_eq!(bridge.static_visual_count(), 39);

    for _ in 0..600 {
        bridge.tick(SIM_DT).unwrap();
        assert_paired(&bridge);
    }
    bridge.draw();

    let surface = bridge.surface();
    assert_eq!(surface.vertices().len(), surface.visual_count() * 6);
    assert!(surface.batches().iter().any(|b| b.image.as_deref() == Some("images/coin_01.png")));
}

#[test]
fn exhausted_world_keeps_cadence() {
    let config = scenario_config(9);
    let world = RapierWorld::new(config.gravity).with_capacity_limit(2);
    let mut bridge = SimulationBridge::new(config, world, SpriteList::new()).unwrap();
    bridge.initialize(&scenario_geometry()).unwrap();

    let mut failures = 0;
    for _ in 0..100 {
        if bridge.tick(SIM_DT).is_err() {
            failures += 1;
        }
        assert_paired(&bridge);
    }

    // Spawns due on frames 10, 30, 50, 70, 90; the last three hit the cap
    assert_eq!(bridge.entity_count(), 2);
    assert_eq!(failures, 3);
    assert_eq!(bridge.stats().spawn_failures, 3);
    assert_eq!(bridge.frame(), 100);
}

#[test]
fn rejected_geometry_leaves_world_empty() {
    let geometry = [
        StaticGeometry::circle(Vec2::new(200.0, 400.0), 20.0, 0.3).with_image("images/bumper.png"),
        StaticGeometry::circle(Vec2::new(600.0, 400.0), 20.0, 0.3).with_image("images/bumper.png"),
    ];
    let config = scenario_config(4);
    let world = RapierWorld::new(config.gravity);
    let surface = SpriteList::new().with_capacity_limit(1);
    let mut bridge = SimulationBridge::new(config, world, surface).unwrap();

    assert!(bridge.initialize(&geometry).is_err());
    assert!(!bridge.is_initialized());
    assert_eq!(bridge.world().body_count(), 0);
    assert_eq!(bridge.world().collider_count(), 0);
    assert_eq!(bridge.surface().visual_count(), 0);

    bridge.initialize(&geometry[..1]).unwrap();
    assert_eq!(bridge.world().body_count(), 1);
    assert_eq!(bridge.static_body_count(), 1);
    bridge.tick(SIM_DT).unwrap();
}
