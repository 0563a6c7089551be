use crate::config::AppConfig;
use crate::genetics::GeneticsLogic;
use crate::naming::NameRegistry;
use crate::resources::new_id;
use bumbles_data::{
    Bumble, DeathCause, Fire, Gender, Genetics, Health, Identity, Intel, Physics, Vitals,
};
use rand::Rng;

/// Per-frame rates are expressed against a 16 ms frame.
pub const FRAME_MS: f64 = 16.0;
pub const MAX_THIRST: f64 = 100.0;
pub const MAX_STRESS: f64 = 100.0;
/// Acquired disease resistance never exceeds this.
pub const MAX_DISEASE_RESISTANCE: f64 = 150.0;
const BORDER: f64 = 50.0;

#[inline]
pub fn frames(dt_ms: f64) -> f64 {
    dt_ms / FRAME_MS
}

/// Harm taken this tick, used to attribute an energy-class death.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Exposure {
    pub burned: bool,
    pub sickened: bool,
}

/// Builds a new bumble. With `parents` the genetics are inherited and the
/// generation is taken as given; without them a fresh trait vector is drawn.
/// The caller places offspring; otherwise the position is random inside the
/// world border.
pub fn create_bumble_with_rng<R: Rng>(
    config: &AppConfig,
    generation: u32,
    gender: Option<Gender>,
    parents: Option<(&Bumble, &Bumble)>,
    names: &mut NameRegistry,
    rng: &mut R,
) -> Bumble {
    let world = &config.world;
    let gender = gender.unwrap_or_else(|| {
        if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    });
    let genetics = match parents {
        Some((p1, p2)) => Genetics::inherit_with_rng(
            &p1.genetics,
            &p2.genetics,
            gender,
            world.vampire_chance,
            &config.evolution,
            rng,
        ),
        None => Genetics::generate_initial_with_rng(gender, world.vampire_chance, rng),
    };

    let energy = 60.0 + genetics.size * 20.0 + rng.gen::<f64>() * 30.0;
    let thirst = 20.0 + rng.gen::<f64>() * 20.0;
    let health = 80.0 + genetics.immunity * 15.0 + rng.gen::<f64>() * 20.0;
    let vampire_bonus = if genetics.is_vampire { 1.5 } else { 1.0 };
    let max_age = config.lifecycle.base_lifespan_ms * genetics.longevity * vampire_bonus;

    let x = random_inside(world.width, rng);
    let y = random_inside(world.height, rng);
    let physics = Physics {
        x,
        y,
        vx: (rng.gen::<f64>() - 0.5) * 0.8,
        vy: (rng.gen::<f64>() - 0.5) * 0.8,
        wander_x: rng.gen::<f64>() * world.width,
        wander_y: rng.gen::<f64>() * world.height,
        wander_time: 0.0,
    };

    let name = names.acquire(gender, rng);
    let id = new_id(rng);
    let stress = 10.0 + rng.gen::<f64>() * 20.0;

    Bumble {
        identity: Identity {
            id,
            name,
            gender,
            generation,
            parent_ids: parents.map(|(p1, p2)| (p1.id(), p2.id())),
        },
        physics,
        vitals: Vitals {
            energy,
            max_energy: energy,
            thirst,
            max_thirst: MAX_THIRST,
            age: 0.0,
            max_age,
            reproduction_cooldown: 0.0,
        },
        health: Health {
            health,
            max_health: health,
            disease_resistance: genetics.immunity * 100.0,
            is_diseased: false,
        },
        intel: Intel {
            stress,
            ..Intel::default()
        },
        genetics,
        is_alive: true,
    }
}

fn random_inside<R: Rng>(extent: f64, rng: &mut R) -> f64 {
    rng.gen::<f64>() * (extent - 2.0 * BORDER).max(0.0) + BORDER
}

/// Advances age and runs every cooldown toward zero.
pub fn age_step(bumble: &mut Bumble, dt_ms: f64) {
    bumble.vitals.age += dt_ms;
    bumble.vitals.reproduction_cooldown = (bumble.vitals.reproduction_cooldown - dt_ms).max(0.0);
    bumble.intel.flee_time = (bumble.intel.flee_time - dt_ms).max(0.0);
    bumble.intel.vampire_feed_cooldown = (bumble.intel.vampire_feed_cooldown - dt_ms).max(0.0);
}

/// Base burn rate per frame: bigger bodies cost more, efficient metabolisms less.
#[inline]
pub fn base_metabolic_rate(genetics: &Genetics) -> f64 {
    (0.015 + genetics.size * 0.01) / genetics.metabolism
}

pub fn apply_metabolism(bumble: &mut Bumble, dt_ms: f64) {
    let activity = 1.0 + (bumble.physics.vx.abs() + bumble.physics.vy.abs()) * 0.1;
    let vampire_bonus = if bumble.is_vampire() { 0.8 } else { 1.0 };
    let cost = base_metabolic_rate(&bumble.genetics) * activity * vampire_bonus * frames(dt_ms);
    bumble.vitals.energy = (bumble.vitals.energy - cost.max(0.0)).max(0.0);
}

/// Burns a bumble standing inside any fire. Returns the energy lost.
pub fn apply_fire_damage(bumble: &mut Bumble, fires: &[Fire], dt_ms: f64) -> f64 {
    let heat: f64 = fires
        .iter()
        .filter(|f| bumble.distance_to(f.x, f.y) < f.radius)
        .map(|f| f.intensity)
        .sum();
    if heat <= 0.0 {
        return 0.0;
    }

    let vulnerability = (1.0 - bumble.genetics.heat_resistance).max(0.0);
    let damage = heat * vulnerability * 0.3 * frames(dt_ms);
    bumble.vitals.energy = (bumble.vitals.energy - damage).max(0.0);
    bumble.intel.stress = (bumble.intel.stress + damage * 2.0).min(MAX_STRESS);
    damage
}

/// Rolls for disease exposure. Returns `true` if the bumble fell ill; a
/// resisted exposure strengthens acquired resistance instead.
pub fn apply_disease_with_rng<R: Rng>(bumble: &mut Bumble, disease_rate: f64, rng: &mut R) -> bool {
    let exposure_chance = disease_rate * (1.0 - bumble.genetics.immunity / 2.0);
    if exposure_chance <= 0.0 || rng.gen::<f64>() >= exposure_chance {
        return false;
    }

    let strength = 0.5 + rng.gen::<f64>() * 0.5;
    if bumble.health.disease_resistance < strength * 100.0 {
        bumble.vitals.energy = (bumble.vitals.energy - strength * 15.0).max(0.0);
        bumble.intel.stress = (bumble.intel.stress + strength * 10.0).min(MAX_STRESS);
        bumble.health.is_diseased = true;
        true
    } else {
        bumble.health.disease_resistance =
            (bumble.health.disease_resistance + 1.0).min(MAX_DISEASE_RESISTANCE);
        bumble.health.is_diseased = false;
        false
    }
}

/// First matching cause wins: age, energy, thirst, then overcrowding.
///
/// An energy-class death is attributed to fire or disease when either did
/// harm this tick, and to starvation otherwise.
pub fn evaluate_death_with_rng<R: Rng>(
    bumble: &Bumble,
    population: usize,
    exposure: Exposure,
    config: &AppConfig,
    rng: &mut R,
) -> Option<DeathCause> {
    if !bumble.is_alive {
        return None;
    }
    if bumble.vitals.age >= bumble.vitals.max_age {
        return Some(DeathCause::Age);
    }
    if bumble.vitals.energy <= 0.0 {
        return Some(if exposure.burned {
            DeathCause::Fire
        } else if exposure.sickened {
            DeathCause::Disease
        } else {
            DeathCause::Starvation
        });
    }
    if bumble.vitals.thirst >= bumble.vitals.max_thirst {
        return Some(DeathCause::Dehydration);
    }
    if population > config.lifecycle.overcrowding_threshold
        && rng.gen::<f64>() < config.lifecycle.overcrowding_chance
    {
        return Some(DeathCause::Overcrowding);
    }
    None
}

/// Flips `is_alive` and frees the name. Returns `false` if already dead.
pub fn kill(bumble: &mut Bumble, names: &mut NameRegistry) -> bool {
    if !bumble.is_alive {
        return false;
    }
    bumble.is_alive = false;
    names.release(&bumble.identity.name);
    bumble.vitals.energy = bumble.vitals.energy.max(0.0);
    true
}

/// Pulls every bounded quantity back into its declared range.
pub fn clamp_vitals(bumble: &mut Bumble) {
    let v = &mut bumble.vitals;
    v.energy = v.energy.clamp(0.0, v.max_energy);
    v.thirst = v.thirst.clamp(0.0, v.max_thirst);
    bumble.intel.stress = bumble.intel.stress.clamp(0.0, MAX_STRESS);
    bumble.health.health = bumble.health.health.clamp(0.0, bumble.health.max_health);
}

#[inline]
pub fn is_mature(bumble: &Bumble, maturity_age_ms: f64) -> bool {
    bumble.vitals.age > maturity_age_ms
}
