//! Per-bumble behavior selection and steering.
//!
//! Each tick a bumble picks exactly one [`Plan`] by walking the priority
//! chain Flee → Feed → SeekWater → SeekFood → Wander. The chosen plan applies
//! its steering impulse, then the state-independent physics runs: jitter,
//! speed limit, integration, wall bounce, friction, stress and thirst.
//!
//! Reads of other bumbles go through the tick-start snapshot. A vampire's
//! bite is returned as a [`Drain`] and settled by [`apply_drains`] after
//! every bumble has moved; neither side changes energy before then.

use crate::config::AppConfig;
use crate::environment::Environment;
use crate::lifecycle::{frames, MAX_STRESS};
use crate::snapshot::InternalBumbleSnapshot;
use crate::spatial_hash::SpatialHash;
use bumbles_data::{BehaviorState, Bumble, Fire, Food, FoodKind, Water};
use rand::Rng;

/// Distance past a fire's edge at which bumbles notice it.
pub const FIRE_AWARENESS: f64 = 60.0;
/// Distance past a fire's edge at which bumbles actively flee.
pub const FIRE_DANGER: f64 = 40.0;
pub const FLEE_TIME_MS: f64 = 2000.0;
pub const THIRSTY: f64 = 60.0;
pub const EAT_RANGE: f64 = 18.0;
pub const DRINK_MARGIN: f64 = 10.0;
pub const MAX_DRINK: f64 = 30.0;
pub const MAX_BITE: f64 = 25.0;
/// Sources at or below this are ignored by seekers.
pub const MIN_SOURCE: f64 = 5.0;
pub const WORLD_MARGIN: f64 = 50.0;

pub struct BehaviorContext<'a> {
    pub env: &'a Environment,
    pub config: &'a AppConfig,
    pub food: &'a [Food],
    pub water: &'a [Water],
    pub fires: &'a [Fire],
    pub snapshots: &'a [InternalBumbleSnapshot],
    /// Built over `snapshots`, same indexing.
    pub spatial_hash: &'a SpatialHash,
    pub dt_ms: f64,
}

/// The state chosen this tick, with the object it acts on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plan {
    /// `fire` is the closest fire in awareness range, or `None` while
    /// coasting on a flee timer.
    Flee { fire: Option<usize> },
    Feed { victim: usize },
    SeekWater { water: usize },
    SeekFood { food: usize },
    Wander,
}

impl Plan {
    pub fn state(&self) -> BehaviorState {
        match self {
            Plan::Flee { .. } => BehaviorState::Flee,
            Plan::Feed { .. } => BehaviorState::Feed,
            Plan::SeekWater { .. } => BehaviorState::SeekWater,
            Plan::SeekFood { .. } => BehaviorState::SeekFood,
            Plan::Wander => BehaviorState::Wander,
        }
    }
}

/// A bite to settle once the pass is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drain {
    /// Indices into the tick's snapshot list, which match the bumble list.
    pub vampire: usize,
    pub victim: usize,
    /// Energy requested; the victim may have less.
    pub energy: f64,
    pub stress: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviorOutput {
    pub state: BehaviorState,
    pub drain: Option<Drain>,
    pub water_drunk: f64,
    pub food_eaten: f64,
}

#[inline]
fn intelligence_bonus(b: &Bumble) -> f64 {
    b.genetics.intelligence * 0.3
}

#[inline]
fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// Adds an impulse of `strength` toward `(tx, ty)`. Zero distance is a no-op.
fn steer_toward(b: &mut Bumble, tx: f64, ty: f64, strength: f64) {
    let dx = tx - b.physics.x;
    let dy = ty - b.physics.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > 0.0 {
        b.physics.vx += dx / dist * strength;
        b.physics.vy += dy / dist * strength;
    }
}

pub fn water_sight(b: &Bumble) -> f64 {
    80.0 + b.genetics.eye_size * 40.0 + intelligence_bonus(b) * 40.0
}

pub fn food_sight(b: &Bumble) -> f64 {
    100.0 + b.genetics.eye_size * 50.0 + intelligence_bonus(b) * 50.0
}

/// Energy below which a bumble goes looking for food.
pub fn hunger_threshold(b: &Bumble) -> f64 {
    50.0 + b.genetics.size * 10.0
}

pub fn feed_radius(b: &Bumble) -> f64 {
    25.0 + b.genetics.vampire_strength * 20.0
}

fn closest_fire(b: &Bumble, fires: &[Fire]) -> Option<usize> {
    fires
        .iter()
        .enumerate()
        .map(|(i, f)| (i, b.distance_to(f.x, f.y), f.radius))
        .filter(|&(_, d, r)| d < r + FIRE_AWARENESS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _, _)| i)
}

fn find_victim(b: &Bumble, self_idx: usize, ctx: &BehaviorContext) -> Option<usize> {
    let radius = feed_radius(b);
    let mut best: Option<(usize, f64)> = None;
    ctx.spatial_hash
        .query_callback(b.physics.x, b.physics.y, radius, |idx| {
            if idx == self_idx {
                return;
            }
            let Some(s) = ctx.snapshots.get(idx) else {
                return;
            };
            if !s.is_alive || s.is_vampire {
                return;
            }
            let d = b.distance_to(s.x, s.y);
            if d < radius && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((idx, d));
            }
        });
    best.map(|(idx, _)| idx)
}

fn find_water(b: &Bumble, water: &[Water]) -> Option<usize> {
    let sight = water_sight(b);
    water
        .iter()
        .enumerate()
        .filter(|(_, w)| w.current_water > MIN_SOURCE)
        .map(|(i, w)| (i, b.distance_to(w.x, w.y)))
        .filter(|&(_, d)| d < sight)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Best (energy × quality) / distance within sight.
fn find_food(b: &Bumble, food: &[Food]) -> Option<usize> {
    let sight = food_sight(b);
    food.iter()
        .enumerate()
        .filter(|(_, f)| f.energy > MIN_SOURCE)
        .filter_map(|(i, f)| {
            let d = b.distance_to(f.x, f.y);
            (d < sight).then(|| (i, f.energy * f.quality / d.max(1.0)))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Walks the priority chain; the first applicable state wins.
pub fn select_plan(b: &Bumble, self_idx: usize, ctx: &BehaviorContext) -> Plan {
    let fire = closest_fire(b, ctx.fires);
    if fire.is_some() || b.intel.flee_time > 0.0 {
        return Plan::Flee { fire };
    }

    if b.is_vampire()
        && b.intel.vampire_feed_cooldown <= 0.0
        && b.vitals.energy < b.vitals.max_energy * 0.6
    {
        if let Some(victim) = find_victim(b, self_idx, ctx) {
            return Plan::Feed { victim };
        }
    }

    if b.vitals.thirst > THIRSTY {
        if let Some(water) = find_water(b, ctx.water) {
            return Plan::SeekWater { water };
        }
    }

    // Reaching here means there is no water target this tick.
    if b.vitals.energy < hunger_threshold(b) {
        if let Some(food) = find_food(b, ctx.food) {
            return Plan::SeekFood { food };
        }
    }

    Plan::Wander
}

/// Runs one tick of behavior and movement for `b`, which sits at
/// `self_idx` in the snapshot list.
pub fn update_behavior_with_rng<R: Rng>(
    b: &mut Bumble,
    self_idx: usize,
    ctx: &BehaviorContext,
    rng: &mut R,
) -> BehaviorOutput {
    let plan = select_plan(b, self_idx, ctx);
    let mut output = BehaviorOutput {
        state: plan.state(),
        ..Default::default()
    };
    b.intel.state = output.state;
    b.intel.target_food = None;
    b.intel.target_water = None;

    let ib = intelligence_bonus(b);
    let mut stress_delta = 0.0;
    b.intel.learning_experience += ctx.dt_ms * 0.001 * b.genetics.intelligence;
    if b.is_vampire() {
        stress_delta += if ctx.env.is_night() { -1.0 } else { 2.0 };
    }

    match plan {
        Plan::Flee { fire: Some(idx) } => {
            let fire = &ctx.fires[idx];
            let d = b.distance_to(fire.x, fire.y);
            let danger = fire.radius + FIRE_DANGER;
            if d < danger {
                let panic = 2.0 - b.genetics.heat_resistance;
                let strength = (danger - d) / danger * panic;
                // Away from the fire: steer toward the mirrored point.
                let away_x = 2.0 * b.physics.x - fire.x;
                let away_y = 2.0 * b.physics.y - fire.y;
                steer_toward(b, away_x, away_y, strength * 3.0);
                stress_delta += (5.0 * (1.0 - b.genetics.heat_resistance)).max(0.0);
                b.intel.flee_time = FLEE_TIME_MS;
            }
        }
        Plan::Flee { fire: None } => {}
        Plan::Feed { victim } => {
            b.intel.vampire_feed_cooldown = ctx.config.ecology.vampire_feed_cooldown_ms;
            output.drain = Some(Drain {
                vampire: self_idx,
                victim,
                energy: 5.0 + b.genetics.vampire_strength * 10.0,
                stress: 20.0,
            });
        }
        Plan::SeekWater { water } => {
            let source = &ctx.water[water];
            let d = b.distance_to(source.x, source.y);
            if d < source.radius + DRINK_MARGIN {
                let drink = MAX_DRINK.min(source.current_water).min(b.vitals.thirst);
                b.vitals.thirst = (b.vitals.thirst - drink).max(0.0);
                output.water_drunk = drink;
                stress_delta -= 1.0;
            } else {
                b.intel.target_water = Some(source.id);
                steer_toward(b, source.x, source.y, 0.5 + ib * 0.2);
            }
        }
        Plan::SeekFood { food } => {
            let source = &ctx.food[food];
            let d = b.distance_to(source.x, source.y);
            if d < EAT_RANGE {
                let bite = MAX_BITE.min(source.energy) / b.genetics.metabolism;
                let gain = bite * (1.0 + b.genetics.intelligence * 0.2);
                b.vitals.energy = (b.vitals.energy + gain).min(b.vitals.max_energy);
                output.food_eaten = gain;
                if source.kind == FoodKind::GoldenBerry && rng.gen::<f64>() < 0.1 {
                    b.genetics.intelligence =
                        (b.genetics.intelligence + 0.02).min(crate::genetics::INTELLIGENCE.max);
                    b.intel.learning_experience += 10.0;
                }
                stress_delta -= 2.0;
            } else {
                b.intel.target_food = Some(source.id);
                steer_toward(b, source.x, source.y, 0.4 + ib * 0.2);
            }
        }
        Plan::Wander => wander(b, ctx, rng),
    }

    stress_delta += integrate_motion(b, ctx, rng);

    b.intel.stress = (b.intel.stress + stress_delta - 0.1).clamp(0.0, MAX_STRESS);
    let thirst_gain = ctx.config.lifecycle.thirst_rate / b.genetics.metabolism * frames(ctx.dt_ms);
    b.vitals.thirst = (b.vitals.thirst + thirst_gain).min(b.vitals.max_thirst);

    output
}

/// Settles the tick's bites. Each victim loses at most the energy it has,
/// shared among its biters in proportion to what they asked for; each bite
/// adds its stress in full. Bites on the dead are void. Returns the total
/// energy moved.
pub fn apply_drains(bumbles: &mut [Bumble], drains: &[Drain]) -> f64 {
    let mut requested = vec![0.0; bumbles.len()];
    for drain in drains {
        if bumbles.get(drain.victim).is_some_and(|v| v.is_alive) {
            requested[drain.victim] += drain.energy.max(0.0);
        }
    }

    let mut available = vec![0.0; bumbles.len()];
    for (idx, victim) in bumbles.iter_mut().enumerate() {
        if requested[idx] <= 0.0 {
            continue;
        }
        let taken = requested[idx].min(victim.vitals.energy.max(0.0));
        victim.vitals.energy = (victim.vitals.energy - taken).max(0.0);
        available[idx] = taken;
    }

    let mut total = 0.0;
    for drain in drains {
        let Some(&pool) = available.get(drain.victim) else {
            continue;
        };
        if requested[drain.victim] <= 0.0 {
            continue;
        }
        let share = pool * drain.energy.max(0.0) / requested[drain.victim];
        if let Some(victim) = bumbles.get_mut(drain.victim) {
            victim.intel.stress = (victim.intel.stress + drain.stress).min(MAX_STRESS);
        }
        if let Some(vampire) = bumbles.get_mut(drain.vampire) {
            if vampire.is_alive {
                vampire.vitals.energy =
                    (vampire.vitals.energy + share).min(vampire.vitals.max_energy);
            }
        }
        total += share;
    }
    total
}

fn wander<R: Rng>(b: &mut Bumble, ctx: &BehaviorContext, rng: &mut R) {
    let world = &ctx.config.world;
    b.physics.wander_time += ctx.dt_ms;

    let interval = 4000.0 - b.genetics.intelligence * 1500.0;
    if b.physics.wander_time > interval + rng.gen::<f64>() * 2000.0 {
        let range = if b.genetics.intelligence > 0.7 {
            250.0
        } else {
            150.0
        };
        let hi_x = (world.width - WORLD_MARGIN).max(WORLD_MARGIN);
        let hi_y = (world.height - WORLD_MARGIN).max(WORLD_MARGIN);
        b.physics.wander_x =
            (b.physics.x + (rng.gen::<f64>() - 0.5) * range).clamp(WORLD_MARGIN, hi_x);
        b.physics.wander_y =
            (b.physics.y + (rng.gen::<f64>() - 0.5) * range).clamp(WORLD_MARGIN, hi_y);
        b.physics.wander_time = 0.0;
    }

    let (tx, ty) = (b.physics.wander_x, b.physics.wander_y);
    if b.distance_to(tx, ty) > 15.0 {
        steer_toward(b, tx, ty, 0.12 + b.genetics.sociability * 0.08);
    }
}

/// Maximum speed before the flee allowance.
pub fn max_speed(b: &Bumble, env: &Environment) -> f64 {
    let speed_multiplier = 1.0 + (b.genetics.speed - 1.0) * 0.8;
    let vampire_bonus = if b.is_vampire() {
        env.vampire_activity()
    } else {
        1.0
    };
    (1.2 + b.genetics.speed * 0.8) * speed_multiplier * vampire_bonus
}

/// Jitter, speed limit, integration, walls and friction. Returns stress
/// picked up from wall hits.
fn integrate_motion<R: Rng>(b: &mut Bumble, ctx: &BehaviorContext, rng: &mut R) -> f64 {
    let world = &ctx.config.world;
    let mut stress = 0.0;

    if rng.gen::<f64>() < 0.04 {
        let variation = 0.3 + b.genetics.aggression * 0.2;
        b.physics.vx += (rng.gen::<f64>() - 0.5) * variation;
        b.physics.vy += (rng.gen::<f64>() - 0.5) * variation;
    }

    let mut limit = max_speed(b, ctx.env);
    if b.intel.flee_time > 0.0 {
        limit *= 1.8;
    }
    let speed = (b.physics.vx * b.physics.vx + b.physics.vy * b.physics.vy).sqrt();
    if speed > limit && speed > 0.0 {
        b.physics.vx = b.physics.vx / speed * limit;
        b.physics.vy = b.physics.vy / speed * limit;
    }

    let step = frames(ctx.dt_ms);
    b.physics.x += b.physics.vx * step;
    b.physics.y += b.physics.vy * step;

    let margin = 15.0 + b.genetics.size * 5.0;
    let max_x = (world.width - margin).max(margin);
    let max_y = (world.height - margin).max(margin);
    if b.physics.x <= margin || b.physics.x >= max_x {
        b.physics.vx *= -0.7;
        b.physics.x = b.physics.x.clamp(margin, max_x);
        stress += 1.0;
    }
    if b.physics.y <= margin || b.physics.y >= max_y {
        b.physics.vy *= -0.7;
        b.physics.y = b.physics.y.clamp(margin, max_y);
        stress += 1.0;
    }

    let friction = 0.98 - b.genetics.intelligence * 0.01;
    b.physics.vx *= friction;
    b.physics.vy *= friction;

    stress
}
