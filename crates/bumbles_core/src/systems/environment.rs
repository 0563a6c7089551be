//! Fire, food and water dynamics, run once per tick after the agents move.

use crate::config::{EcologyConfig, WorldConfig};
use crate::environment::Environment;
use crate::lifecycle::frames;
use crate::resources::{create_berry_with_rng, create_fire_with_rng};
use crate::spatial_hash::SpatialHash;
use bumbles_data::{Bumble, Fire, Food, FoodKind, Water};
use rand::Rng;
use uuid::Uuid;

pub const FIRE_INTENSITY_FLOOR: f64 = 0.1;
pub const FIRE_DECAY: f64 = 0.3;
pub const WATER_DAMPING: f64 = 0.8;
/// Water must hold more than this to damp a fire.
pub const DAMPING_WATER_LEVEL: f64 = 20.0;
pub const SPREAD_REACH: f64 = 20.0;
pub const SPREAD_RADIUS_FACTOR: f64 = 0.7;
/// Regrowth multiplier for food within `fire.radius + SCORCH_MARGIN`.
pub const SCORCHED_REGROWTH: f64 = 0.1;
pub const SCORCH_MARGIN: f64 = 10.0;
pub const PICKUP_RADIUS: f64 = 20.0;
pub const PICKUP_CAP: f64 = 8.0;
pub const PICKUP_MIN_FOOD: f64 = 8.0;
pub const DRAW_MARGIN: f64 = 15.0;
pub const DRAW_CAP: f64 = 15.0;
pub const DRAW_MIN_THIRST: f64 = 30.0;
pub const DRAW_MIN_WATER: f64 = 5.0;

/// A fire lit this tick by spreading from `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ignition {
    pub source: Uuid,
    pub fire: Uuid,
    pub x: f64,
    pub y: f64,
}

/// Ages every fire, drops burnt-out ones, damps fires next to water and
/// rolls for spread onto nearby bushes.
pub fn update_fires_with_rng<R: Rng>(
    fires: &mut Vec<Fire>,
    food: &[Food],
    water: &[Water],
    ecology: &EcologyConfig,
    dt_ms: f64,
    rng: &mut R,
) -> Vec<Ignition> {
    for fire in fires.iter_mut() {
        fire.duration += dt_ms;
        if fire.max_duration > 0.0 {
            fire.intensity -= FIRE_DECAY * dt_ms / fire.max_duration;
        }
        fire.intensity = fire.intensity.clamp(0.0, 1.0);
    }
    fires.retain(|f| f.duration < f.max_duration && f.intensity > FIRE_INTENSITY_FLOOR);

    let mut ignitions = Vec::new();
    let mut lit = Vec::new();
    for fire in fires.iter_mut() {
        let doused = water.iter().any(|w| {
            w.current_water > DAMPING_WATER_LEVEL
                && distance(fire.x, fire.y, w.x, w.y) < fire.radius + w.radius
        });
        if doused {
            fire.intensity *= WATER_DAMPING;
        }

        if rng.gen::<f64>() >= ecology.fire_spread_chance {
            continue;
        }
        let fuel: Vec<&Food> = food
            .iter()
            .filter(|f| {
                f.kind == FoodKind::Bush
                    && distance(fire.x, fire.y, f.x, f.y) < fire.radius + SPREAD_REACH
            })
            .collect();
        if fuel.is_empty() {
            continue;
        }
        let target = fuel[rng.gen_range(0..fuel.len())];
        let mut spark = create_fire_with_rng(target.x, target.y, ecology.fire_duration_ms, rng);
        spark.radius *= SPREAD_RADIUS_FACTOR;
        ignitions.push(Ignition {
            source: fire.id,
            fire: spark.id,
            x: spark.x,
            y: spark.y,
        });
        lit.push(spark);
    }
    fires.extend(lit);
    ignitions
}

/// Regrows food, lets ripe bushes drop berries and applies ambient grazing.
/// Returns the energy grazed.
///
/// `fires` is the fire list as it stood when the tick began; `bumbles` is
/// the slice indexed by `spatial_hash`.
#[allow(clippy::too_many_arguments)]
pub fn update_food_with_rng<R: Rng>(
    food: &mut Vec<Food>,
    fires: &[Fire],
    bumbles: &[Bumble],
    spatial_hash: &SpatialHash,
    env: &Environment,
    world: &WorldConfig,
    ecology: &EcologyConfig,
    dt_ms: f64,
    rng: &mut R,
) -> f64 {
    regrow_food(food, fires, env, dt_ms);
    spawn_berries_with_rng(food, world, ecology.berry_spawn_chance, rng);
    let grazed = graze(food, bumbles, spatial_hash);
    food.retain(|f| !(f.kind == FoodKind::Berry && f.energy <= 0.0));
    grazed
}

pub fn regrow_food(food: &mut [Food], fires: &[Fire], env: &Environment, dt_ms: f64) {
    let humidity = env.humidity_factor();
    let steps = frames(dt_ms);
    for f in food.iter_mut().filter(|f| f.regrows()) {
        let scorched = fires
            .iter()
            .any(|fire| distance(f.x, f.y, fire.x, fire.y) < fire.radius + SCORCH_MARGIN);
        let mut rate = f.regrowth_rate * humidity;
        if scorched {
            rate *= SCORCHED_REGROWTH;
        }
        f.energy = (f.energy + rate * steps).clamp(0.0, f.max_energy);
    }
}

/// Ripe bushes (above 70% energy with berries left) may drop one berry
/// each. Returns how many berries were dropped.
pub fn spawn_berries_with_rng<R: Rng>(
    food: &mut Vec<Food>,
    world: &WorldConfig,
    chance: f64,
    rng: &mut R,
) -> usize {
    let mut dropped = Vec::new();
    for bush in food.iter_mut() {
        if bush.kind != FoodKind::Bush
            || bush.energy <= bush.max_energy * 0.7
            || bush.berry_count == 0
            || rng.gen::<f64>() >= chance
        {
            continue;
        }
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        let reach = 15.0 + rng.gen::<f64>() * 10.0;
        let x = bush.x + angle.cos() * reach;
        let y = bush.y + angle.sin() * reach;
        if x > 0.0 && x < world.width && y > 0.0 && y < world.height {
            dropped.push(create_berry_with_rng(bush, x, y, rng));
            bush.berry_count -= 1;
        }
    }
    let count = dropped.len();
    food.extend(dropped);
    count
}

/// Hungry bumbles next to a food source share it evenly, up to
/// [`PICKUP_CAP`] each. Only the sources are depleted.
pub fn graze(food: &mut [Food], bumbles: &[Bumble], spatial_hash: &SpatialHash) -> f64 {
    let mut total = 0.0;
    for f in food.iter_mut() {
        if f.energy <= PICKUP_MIN_FOOD {
            continue;
        }
        let mut claimants = 0usize;
        spatial_hash.query_callback(f.x, f.y, PICKUP_RADIUS, |idx| {
            if let Some(b) = bumbles.get(idx) {
                if b.is_alive
                    && b.vitals.energy < b.vitals.max_energy * 0.9
                    && b.distance_to(f.x, f.y) < PICKUP_RADIUS
                {
                    claimants += 1;
                }
            }
        });
        if claimants == 0 {
            continue;
        }
        let share = (f.energy / claimants as f64).min(PICKUP_CAP);
        let taken = share * claimants as f64;
        f.energy = (f.energy - taken).max(0.0);
        total += taken;
    }
    total
}

/// Refills every source, then lets thirsty bumbles at the edge draw from
/// it. Returns the water drawn.
pub fn update_water(
    water: &mut [Water],
    bumbles: &[Bumble],
    spatial_hash: &SpatialHash,
    dt_ms: f64,
) -> f64 {
    let steps = frames(dt_ms);
    let mut total = 0.0;
    for w in water.iter_mut() {
        w.current_water = (w.current_water + w.refill_rate * steps).min(w.capacity);

        let reach = w.radius + DRAW_MARGIN;
        let mut claimants = 0usize;
        spatial_hash.query_callback(w.x, w.y, reach, |idx| {
            if let Some(b) = bumbles.get(idx) {
                if b.is_alive && b.vitals.thirst > DRAW_MIN_THIRST && b.distance_to(w.x, w.y) < reach
                {
                    claimants += 1;
                }
            }
        });
        if claimants == 0 || w.current_water <= DRAW_MIN_WATER {
            continue;
        }
        let share = (w.current_water / claimants as f64).min(DRAW_CAP);
        let drawn = share * claimants as f64;
        w.current_water = (w.current_water - drawn).max(0.0);
        total += drawn;
    }
    total
}

#[inline]
fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}
