mod common;

use bumbles_data::{Bumble, Gender, LiveEvent};
use bumbles_lib::World;
use common::{BumbleBuilder, WorldBuilder};
use uuid::Uuid;

fn adult(gender: Gender, x: f64) -> BumbleBuilder {
    BumbleBuilder::new()
        .gender(gender)
        .at(x, 350.0)
        .age(50_000.0)
        .immortal()
        .thirst(0.0)
        .stress(0.0)
        .fertility(1.2)
        .size(1.2)
        .vampire(false)
}

/// A fertile pair side by side that will bond on the first tick.
fn courting_pair(seed: u64, max_population: usize) -> World {
    let mut world = WorldBuilder::new()
        .with_seed(seed)
        .calm()
        .with_config(|c| {
            c.lifecycle.pairing_chance = 1.0;
            c.world.max_population = max_population;
        })
        .with_bumble(adult(Gender::Female, 500.0))
        .with_bumble(adult(Gender::Male, 502.0))
        .build();
    world.bumbles[0].genetics.intelligence = 0.3;
    world
}

fn births(events: &[LiveEvent]) -> Vec<(Uuid, Option<(Uuid, Uuid)>, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            LiveEvent::Birth {
                id,
                parent_ids,
                gen,
                ..
            } => Some((*id, *parent_ids, *gen)),
            _ => None,
        })
        .collect()
}

fn by_id(world: &World, id: Uuid) -> &Bumble {
    world.select_agent(id).unwrap()
}

#[test]
fn test_pair_bonds_and_produces_litter() {
    let mut world = courting_pair(301, 500);
    let (mother, father) = (world.bumbles[0].id(), world.bumbles[1].id());

    let events = world.tick(16.0).unwrap();
    let born = births(&events);
    assert!(!born.is_empty());
    for &(id, parents, gen) in &born {
        assert_eq!(parents, Some((mother, father)));
        assert_eq!(gen, 2);
        let child = by_id(&world, id);
        let d = by_id(&world, mother).distance_to(child.physics.x, child.physics.y);
        assert!((30.0 - 1e-9..=70.0 + 1e-9).contains(&d), "child at {d}");
    }
    assert_eq!(world.alive_count(), 2 + born.len());
    assert_eq!(world.stats.total_born as usize, born.len());

    assert_eq!(by_id(&world, mother).intel.mate_id, Some(father));
    assert_eq!(by_id(&world, father).intel.mate_id, Some(mother));
    assert!(by_id(&world, mother).vitals.reproduction_cooldown > 0.0);
    assert!(by_id(&world, father).vitals.reproduction_cooldown > 0.0);
    assert_eq!(world.stats.mated_pairs, 1);
    assert_eq!(world.generation, 1);
}

#[test]
fn test_litter_is_capped_by_population_limit() {
    let mut world = courting_pair(302, 3);
    let events = world.tick(16.0).unwrap();
    assert_eq!(births(&events).len(), 1);
    assert_population!(world, 3);

    for _ in 0..50 {
        world.tick(16.0).unwrap();
        assert!(world.alive_count() <= 3);
    }
}

#[test]
fn test_bonded_pair_does_not_remate() {
    let mut world = courting_pair(303, 500);
    let first = births(&world.tick(16.0).unwrap()).len();
    assert!(first > 0);
    for b in world.bumbles.iter_mut() {
        b.vitals.reproduction_cooldown = 0.0;
    }
    let again = births(&world.tick(16.0).unwrap());
    assert!(again.is_empty());
}

#[test]
fn test_widow_loses_bond_when_partner_dies() {
    let mut world = courting_pair(304, 500);
    world.tick(16.0).unwrap();
    let (mother, father) = (world.bumbles[0].id(), world.bumbles[1].id());
    assert_eq!(by_id(&world, father).intel.mate_id, Some(mother));

    world.bumbles[0].vitals.energy = 0.0;
    let events = world.tick(16.0).unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, LiveEvent::Death { id, .. } if *id == mother)));
    assert_bumble_dead!(world, mother);
    assert_eq!(by_id(&world, father).intel.mate_id, None);
    assert_eq!(world.stats.mated_pairs, 0);
}

#[test]
fn test_generation_advances_once_founders_are_gone() {
    let mut world = courting_pair(305, 500);
    for b in world.bumbles.iter_mut() {
        b.identity.generation = 2;
    }

    let events = world.tick(16.0).unwrap();
    let advanced: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            LiveEvent::GenerationAdvanced { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(advanced, vec![(1, 2)]);
    assert_eq!(world.generation, 2);
    assert_eq!(world.stats.generation, 2);
    assert!(births(&events).iter().all(|&(_, _, gen)| gen == 3));
}

#[test]
fn test_well_fed_founders_grow_without_losses() {
    let mut world = WorldBuilder::new()
        .with_seed(306)
        .calm()
        .with_config(|c| {
            c.lifecycle.pairing_chance = 1.0;
            c.world.max_population = 20;
        })
        .with_bumble(adult(Gender::Male, 480.0))
        .with_bumble(adult(Gender::Male, 520.0))
        .with_bumble(adult(Gender::Female, 490.0))
        .with_bumble(adult(Gender::Female, 510.0))
        .build();
    for b in world.bumbles.iter_mut() {
        b.genetics.intelligence = 0.3;
    }

    let mut last = world.alive_count();
    for _ in 0..300 {
        for b in world.bumbles.iter_mut() {
            b.vitals.energy = b.vitals.max_energy;
            b.vitals.thirst = 0.0;
        }
        world.tick(16.0).unwrap();
        let now = world.alive_count();
        assert!(now >= last, "population fell from {last} to {now}");
        assert!(now <= 20);
        last = now;
    }
    assert!(last > 4);
    assert_eq!(world.stats.total_deaths, 0);
}
