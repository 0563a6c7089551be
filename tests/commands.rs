mod common;

use bumbles_core::config::{AppConfig, WorldConfigPatch};
use bumbles_data::{Gender, LiveEvent};
use bumbles_lib::{World, WorldError};
use common::WorldBuilder;

fn seeded(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.seed = Some(seed);
    config
}

#[test]
fn test_reinitializing_a_seeded_world_replays_it() {
    let mut world = World::new(seeded(401)).unwrap();
    world.initialize(seeded(401)).unwrap();
    let first = world.snapshot();
    for _ in 0..100 {
        world.tick(16.0).unwrap();
    }
    let after_first_run = world.snapshot();

    world.initialize(seeded(401)).unwrap();
    assert_eq!(world.snapshot(), first);
    for _ in 0..100 {
        world.tick(16.0).unwrap();
    }
    assert_eq!(world.snapshot(), after_first_run);
}

#[test]
fn test_reset_empties_everything() {
    let mut world = World::new(seeded(402)).unwrap();
    world.initialize(seeded(402)).unwrap();
    world.tick(16.0).unwrap();
    world.reset();

    assert!(!world.running);
    assert_eq!(world.tick, 0);
    assert!(world.bumbles.is_empty() && world.food.is_empty() && world.water.is_empty());
    assert_eq!(world.stats.total_born, 0);
    assert!(world.tick(16.0).unwrap().is_empty());

    let once = world.stats.clone();
    world.reset();
    assert_eq!(world.stats, once);
}

#[test]
fn test_spawned_agent_is_announced_on_next_tick() {
    let mut world = WorldBuilder::new().with_seed(403).calm().build();
    let id = world.spawn_agent(Some(Gender::Male)).unwrap();
    assert_eq!(world.stats.total_born, 1);

    let events = world.tick(16.0).unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        LiveEvent::Birth { id: born, parent_ids: None, gen: 1, .. } if *born == id
    )));
    assert!(world.select_agent(id).is_some());
}

#[test]
fn test_placed_fire_shows_up_in_stats() {
    let mut world = WorldBuilder::new().with_seed(404).calm().build();
    world.place_fire(100.0, 100.0).unwrap();
    world.place_water(900.0, 600.0).unwrap();
    assert_eq!(
        world.place_food(1_001.0, 10.0),
        Err(WorldError::OutOfBounds { x: 1_001.0, y: 10.0 })
    );
    world.tick(16.0).unwrap();
    assert_eq!(world.stats.active_fires, 1);
    assert_eq!(world.stats.water_sources, 1);
    assert_eq!(world.stats.food_sources, 0);
}

#[test]
fn test_speed_patch_scales_elapsed_time() {
    let mut world = WorldBuilder::new().with_seed(405).calm().build();
    world.spawn_agent(None).unwrap();
    world
        .update_config(&WorldConfigPatch {
            simulation_speed: Some(3.0),
            ..Default::default()
        })
        .unwrap();
    world.tick(16.0).unwrap();
    assert!((world.bumbles[0].vitals.age - 48.0).abs() < 1e-9);

    let rejected = world.update_config(&WorldConfigPatch {
        simulation_speed: Some(0.0),
        ..Default::default()
    });
    assert!(matches!(rejected, Err(WorldError::InvalidConfig(_))));
    assert_eq!(world.config.world.simulation_speed, 3.0);
}

#[test]
fn test_paused_world_ignores_ticks_until_resumed() {
    let mut world = WorldBuilder::new().with_seed(406).calm().build();
    world.spawn_agent(None).unwrap();
    world.set_running(false);
    assert!(world.tick(16.0).unwrap().is_empty());
    assert_eq!(world.bumbles[0].vitals.age, 0.0);

    world.set_running(true);
    let events = world.tick(16.0).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(world.bumbles[0].vitals.age, 16.0);
}
