//! Female-choice mate search and litter production.

use crate::config::AppConfig;
use crate::lifecycle::{create_bumble_with_rng, is_mature, MAX_STRESS};
use crate::naming::NameRegistry;
use crate::spatial_hash::SpatialHash;
use bumbles_data::Bumble;
use rand::Rng;

/// Size females find most attractive.
pub const IDEAL_SIZE: f64 = 1.2;
pub const STRESS_CEILING: f64 = 80.0;
pub const THIRST_CEILING: f64 = 80.0;
/// Offspring are kept this far inside the world edge.
pub const NURSERY_MARGIN: f64 = 30.0;

/// How appealing `male` is to `female`, in `[0, 1]`. Zero for non-males.
pub fn attractiveness(female: &Bumble, male: &Bumble) -> f64 {
    if !male.is_male() {
        return 0.0;
    }
    let g = &male.genetics;

    let antenna = (g.antenna_size / 1.5).min(1.0) * 0.35;
    let genetic = (g.fertility * 0.3 + g.longevity * 0.25 + g.intelligence * 0.25
        + g.immunity * 0.2)
        .min(1.0)
        * 0.3;
    let size = (1.0 - (g.size - IDEAL_SIZE).abs() / IDEAL_SIZE).max(0.0) * 0.2;
    let vigor = (male.vitals.energy / male.vitals.max_energy)
        * (1.0 - male.intel.stress / 100.0)
        * (1.0 - male.vitals.thirst / 100.0)
        * 0.1;
    let d = female.distance_to(male.physics.x, male.physics.y);
    let proximity = (1.0 - d / 80.0).max(0.0) * g.sociability * 0.05;

    let mut score = antenna + genetic + size + vigor + proximity;
    if g.is_vampire {
        score += if female.genetics.aggression > 0.7 {
            0.1
        } else {
            -0.2
        };
    }
    score.clamp(0.0, 1.0)
}

pub fn search_radius(female: &Bumble) -> f64 {
    50.0 + female.genetics.intelligence * 30.0
}

pub fn selectivity(female: &Bumble) -> f64 {
    0.25 + female.genetics.intelligence * 0.15
}

/// Alive, unmated, rested, mature females that are calm and watered enough.
pub fn is_eligible_female(b: &Bumble, config: &AppConfig) -> bool {
    b.is_alive
        && !b.is_male()
        && b.intel.mate_id.is_none()
        && b.vitals.reproduction_cooldown <= 0.0
        && is_mature(b, config.lifecycle.maturity_age_ms)
        && b.intel.stress < STRESS_CEILING
        && b.vitals.thirst < THIRST_CEILING
}

fn is_available_male(b: &Bumble) -> bool {
    b.is_alive
        && b.is_male()
        && b.intel.mate_id.is_none()
        && b.vitals.reproduction_cooldown <= 0.0
}

/// Picks a mate for `bumbles[female_idx]` among nearby available males.
///
/// `spatial_hash` must index `bumbles` by position. Candidates above the
/// female's selectivity are drawn by roulette weighted by score squared.
/// If none qualify, the threshold is relaxed once by her desperation and
/// the best remaining candidate is taken.
pub fn find_mate_with_rng<R: Rng>(
    female_idx: usize,
    bumbles: &[Bumble],
    spatial_hash: &SpatialHash,
    rng: &mut R,
) -> Option<usize> {
    let female = bumbles.get(female_idx)?;
    let radius = search_radius(female);

    let mut ranked: Vec<(usize, f64)> = Vec::new();
    spatial_hash.query_callback(female.physics.x, female.physics.y, radius, |idx| {
        if idx == female_idx {
            return;
        }
        if let Some(male) = bumbles.get(idx) {
            if is_available_male(male) && female.distance_to(male.physics.x, male.physics.y) < radius
            {
                ranked.push((idx, attractiveness(female, male)));
            }
        }
    });
    if ranked.is_empty() {
        return None;
    }
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let threshold = selectivity(female);
    let suitable: Vec<(usize, f64)> = ranked
        .iter()
        .copied()
        .filter(|&(_, s)| s >= threshold)
        .collect();

    if suitable.is_empty() {
        let age_ratio = if female.vitals.max_age > 0.0 {
            female.vitals.age / female.vitals.max_age
        } else {
            1.0
        };
        let desperation = female.intel.stress / 100.0 + age_ratio;
        let relaxed = (threshold - desperation * 0.2).max(0.1);
        return ranked
            .iter()
            .find(|&&(_, s)| s >= relaxed)
            .map(|&(idx, _)| idx);
    }

    let total: f64 = suitable.iter().map(|&(_, s)| s * s).sum();
    let pick = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    for &(idx, s) in &suitable {
        acc += s * s;
        if pick <= acc {
            return Some(idx);
        }
    }
    suitable.first().map(|&(idx, _)| idx)
}

/// Number of offspring from one mating, before any population cap.
pub fn litter_size_with_rng<R: Rng>(p1: &Bumble, p2: &Bumble, rng: &mut R) -> usize {
    let fertility = ((p1.genetics.fertility + p2.genetics.fertility) / 2.0
        - (p1.intel.stress + p2.intel.stress) / 200.0
        - (p1.vitals.thirst + p2.vitals.thirst) / 400.0)
        .max(0.0);
    let compatibility = 1.0 - (p1.genetics.size - p2.genetics.size).abs() / 2.0;
    let base = fertility * compatibility;

    let mut count = 0;
    if rng.gen::<f64>() < base {
        count += 1;
    }
    if rng.gen::<f64>() < base * 0.7 {
        count += 1;
    }
    if rng.gen::<f64>() < base * 0.4 && fertility > 0.8 {
        count += 1;
    }
    if rng.gen::<f64>() < base * 0.2 && fertility > 1.0 {
        count += 1;
    }
    count
}

/// Produces up to `max_offspring` children placed on a ring around `p1`.
pub fn reproduce_with_rng<R: Rng>(
    p1: &Bumble,
    p2: &Bumble,
    generation: u32,
    max_offspring: usize,
    config: &AppConfig,
    names: &mut NameRegistry,
    rng: &mut R,
) -> Vec<Bumble> {
    let count = litter_size_with_rng(p1, p2, rng).min(max_offspring);
    let world = &config.world;
    let hi_x = (world.width - NURSERY_MARGIN).max(NURSERY_MARGIN);
    let hi_y = (world.height - NURSERY_MARGIN).max(NURSERY_MARGIN);

    (0..count)
        .map(|_| {
            let mut child =
                create_bumble_with_rng(config, generation, None, Some((p1, p2)), names, rng);
            let angle = rng.gen::<f64>() * std::f64::consts::TAU;
            let dist = 30.0 + rng.gen::<f64>() * 40.0;
            child.physics.x = (p1.physics.x + angle.cos() * dist).clamp(NURSERY_MARGIN, hi_x);
            child.physics.y = (p1.physics.y + angle.sin() * dist).clamp(NURSERY_MARGIN, hi_y);
            child.intel.stress = ((p1.intel.stress + p2.intel.stress) / 4.0).min(MAX_STRESS);
            child.vitals.thirst =
                ((p1.vitals.thirst + p2.vitals.thirst) / 4.0).min(child.vitals.max_thirst);
            child.intel.learning_experience =
                (p1.intel.learning_experience + p2.intel.learning_experience) / 8.0;
            child
        })
        .collect()
}

/// Runs one mating round over the living population and returns the
/// offspring. Pairs are bonded through `mate_id` both ways.
pub fn run_mating_with_rng<R: Rng>(
    bumbles: &mut [Bumble],
    spatial_hash: &SpatialHash,
    config: &AppConfig,
    names: &mut NameRegistry,
    rng: &mut R,
) -> Vec<Bumble> {
    let max_population = config.world.max_population;
    let alive = bumbles.iter().filter(|b| b.is_alive).count();
    let cooldown = config.lifecycle.reproduction_cooldown_ms / config.lifecycle.reproduction_frequency;

    let females: Vec<usize> = bumbles
        .iter()
        .enumerate()
        .filter(|(_, b)| is_eligible_female(b, config))
        .map(|(i, _)| i)
        .collect();

    let mut offspring = Vec::new();
    for fi in females {
        let room = max_population.saturating_sub(alive + offspring.len());
        if room == 0 {
            break;
        }
        let Some(mi) = find_mate_with_rng(fi, bumbles, spatial_hash, rng) else {
            continue;
        };
        let sociability = bumbles[fi].genetics.sociability;
        if rng.gen::<f64>() >= config.lifecycle.pairing_chance * (1.0 + sociability * 0.5) {
            continue;
        }

        let generation = bumbles[fi]
            .identity
            .generation
            .max(bumbles[mi].identity.generation)
            + 1;
        let children = reproduce_with_rng(
            &bumbles[fi],
            &bumbles[mi],
            generation,
            room,
            config,
            names,
            rng,
        );
        tracing::debug!(
            mother = %bumbles[fi].identity.name,
            father = %bumbles[mi].identity.name,
            litter = children.len(),
            "Pair bonded"
        );

        let (female_id, male_id) = (bumbles[fi].id(), bumbles[mi].id());
        for (idx, partner) in [(fi, male_id), (mi, female_id)] {
            let parent = &mut bumbles[idx];
            parent.intel.mate_id = Some(partner);
            parent.vitals.reproduction_cooldown = cooldown;
            parent.intel.stress = (parent.intel.stress - 10.0).max(0.0);
        }
        offspring.extend(children);
    }
    offspring
}
