use bumbles_data::{Bumble, Fire, Food, SimulationStats, Water};

/// Recomputes the snapshot parts of `stats` from the current collections.
///
/// Cumulative counters (births, deaths by cause, consumption) are owned by
/// the caller and left untouched. Averages cover living bumbles only and
/// keep their previous values when nobody is alive; antenna size is
/// averaged over males.
pub fn refresh_stats(
    stats: &mut SimulationStats,
    bumbles: &[Bumble],
    food: &[Food],
    water: &[Water],
    fires: &[Fire],
    generation: u32,
    is_night: bool,
) {
    let alive: Vec<&Bumble> = bumbles.iter().filter(|b| b.is_alive).collect();

    stats.generation = generation;
    stats.population = alive.len();
    stats.male_count = alive
        .iter()
        .filter(|b| b.is_male())
        .count();
    stats.female_count = alive.len() - stats.male_count;
    stats.vampire_count = alive.iter().filter(|b| b.is_vampire()).count();
    stats.mated_pairs = count_pairs(&alive);
    stats.food_sources = food.len();
    stats.water_sources = water.len();
    stats.active_fires = fires.len();
    stats.is_night = is_night;

    if alive.is_empty() {
        return;
    }
    let mean = |f: fn(&Bumble) -> f64| alive.iter().map(|b| f(b)).sum::<f64>() / alive.len() as f64;
    stats.average_size = mean(|b| b.genetics.size);
    stats.average_speed = mean(|b| b.genetics.speed);
    stats.average_fertility = mean(|b| b.genetics.fertility);
    stats.average_longevity = mean(|b| b.genetics.longevity);
    stats.average_eye_size = mean(|b| b.genetics.eye_size);
    stats.average_intelligence = mean(|b| b.genetics.intelligence);
    stats.average_immunity = mean(|b| b.genetics.immunity);
    stats.average_heat_resistance = mean(|b| b.genetics.heat_resistance);
    stats.average_health = mean(|b| b.health.health);
    stats.average_stress = mean(|b| b.intel.stress);
    stats.average_thirst = mean(|b| b.vitals.thirst);
    stats.average_learning_experience = mean(|b| b.intel.learning_experience);

    let males: Vec<f64> = alive
        .iter()
        .filter(|b| b.is_male())
        .map(|b| b.genetics.antenna_size)
        .collect();
    if !males.is_empty() {
        stats.average_antenna_size = males.iter().sum::<f64>() / males.len() as f64;
    }
}

/// Living pairs whose bond points both ways.
fn count_pairs(alive: &[&Bumble]) -> usize {
    alive
        .iter()
        .filter(|b| !b.is_male())
        .filter(|f| {
            f.intel.mate_id.is_some_and(|mate| {
                alive
                    .iter()
                    .any(|m| m.id() == mate && m.intel.mate_id == Some(f.id()))
            })
        })
        .count()
}
