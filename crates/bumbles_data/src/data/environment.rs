use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Bush,
    Berry,
    GoldenBerry,
}

/// A point food source.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub energy: f64,
    pub max_energy: f64,
    /// Energy regained per 16 ms frame before climate modifiers.
    pub regrowth_rate: f64,
    pub kind: FoodKind,
    pub quality: f64,
    /// Berries a bush may still drop; always zero for berries.
    pub berry_count: u32,
    pub parent_bush_id: Option<Uuid>,
}

impl Food {
    /// Berries only ever deplete; bushes and golden berries grow back.
    #[inline]
    pub fn regrows(&self) -> bool {
        self.kind != FoodKind::Berry
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Water {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub capacity: f64,
    pub current_water: f64,
    pub refill_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Fire {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub intensity: f64,
    /// Milliseconds burned so far.
    pub duration: f64,
    pub max_duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Age,
    Starvation,
    Fire,
    Disease,
    Dehydration,
    Overcrowding,
}

impl DeathCause {
    pub fn as_str(self) -> &'static str {
        match self {
            DeathCause::Age => "age",
            DeathCause::Starvation => "starvation",
            DeathCause::Fire => "fire",
            DeathCause::Disease => "disease",
            DeathCause::Dehydration => "dehydration",
            DeathCause::Overcrowding => "overcrowding",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deaths broken down by cause.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DeathCounts {
    pub age: u64,
    pub starvation: u64,
    pub fire: u64,
    pub disease: u64,
    pub dehydration: u64,
    pub overcrowding: u64,
}

impl DeathCounts {
    pub fn record(&mut self, cause: DeathCause) {
        let slot = match cause {
            DeathCause::Age => &mut self.age,
            DeathCause::Starvation => &mut self.starvation,
            DeathCause::Fire => &mut self.fire,
            DeathCause::Disease => &mut self.disease,
            DeathCause::Dehydration => &mut self.dehydration,
            DeathCause::Overcrowding => &mut self.overcrowding,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        self.age + self.starvation + self.fire + self.disease + self.dehydration + self.overcrowding
    }
}

/// Aggregated statistics republished at the end of every tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationStats {
    pub generation: u32,
    pub population: usize,
    pub male_count: usize,
    pub female_count: usize,
    pub vampire_count: usize,
    pub total_born: u64,
    pub total_deaths: u64,
    pub deaths: DeathCounts,
    pub average_size: f64,
    pub average_speed: f64,
    pub average_fertility: f64,
    pub average_longevity: f64,
    pub average_antenna_size: f64,
    pub average_eye_size: f64,
    pub average_intelligence: f64,
    pub average_immunity: f64,
    pub average_heat_resistance: f64,
    pub average_health: f64,
    pub average_stress: f64,
    pub average_thirst: f64,
    pub average_learning_experience: f64,
    pub mated_pairs: usize,
    pub food_sources: usize,
    pub water_sources: usize,
    pub total_food_consumed: f64,
    pub total_water_consumed: f64,
    pub active_fires: usize,
    pub is_night: bool,
}

impl Default for SimulationStats {
    /// The empty-world record; averages hold population baselines rather than zero.
    fn default() -> Self {
        Self {
            generation: 1,
            population: 0,
            male_count: 0,
            female_count: 0,
            vampire_count: 0,
            total_born: 0,
            total_deaths: 0,
            deaths: DeathCounts::default(),
            average_size: 1.0,
            average_speed: 1.0,
            average_fertility: 0.5,
            average_longevity: 1.0,
            average_antenna_size: 0.5,
            average_eye_size: 0.7,
            average_intelligence: 0.8,
            average_immunity: 0.7,
            average_heat_resistance: 0.6,
            average_health: 80.0,
            average_stress: 30.0,
            average_thirst: 20.0,
            average_learning_experience: 0.0,
            mated_pairs: 0,
            food_sources: 0,
            water_sources: 0,
            total_food_consumed: 0.0,
            total_water_consumed: 0.0,
            active_fires: 0,
            is_night: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
/// Tagged union of all simulation events emitted during a tick.
///
/// Serialised with `#[serde(tag = "event")]` for streaming JSONL output.
pub enum LiveEvent {
    /// A bumble hatched from a mating or was spawned directly.
    Birth {
        id: Uuid,
        name: String,
        parent_ids: Option<(Uuid, Uuid)>,
        gen: u32,
        tick: u64,
        timestamp: String,
    },
    Death {
        id: Uuid,
        name: String,
        age_ms: f64,
        tick: u64,
        timestamp: String,
        cause: DeathCause,
        x: f64,
        y: f64,
    },
    /// A burning fire ignited a nearby bush.
    FireSpread {
        source: Uuid,
        id: Uuid,
        tick: u64,
        timestamp: String,
        x: f64,
        y: f64,
    },
    GenerationAdvanced {
        from: u32,
        to: u32,
        tick: u64,
        timestamp: String,
    },
    /// The last living bumble died.
    Extinction {
        tick: u64,
        timestamp: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_death_counts_record_one_slot() {
        let mut counts = DeathCounts::default();
        counts.record(DeathCause::Fire);
        counts.record(DeathCause::Fire);
        counts.record(DeathCause::Age);
        assert_eq!(counts.fire, 2);
        assert_eq!(counts.age, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_live_event_is_tagged() {
        let event = LiveEvent::Extinction {
            tick: 7,
            timestamp: "now".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"Extinction\""));
    }

    #[test]
    fn test_berries_do_not_regrow() {
        let berry = Food {
            id: Uuid::nil(),
            x: 0.0,
            y: 0.0,
            energy: 1.0,
            max_energy: 2.0,
            regrowth_rate: 0.1,
            kind: FoodKind::Berry,
            quality: 1.0,
            berry_count: 0,
            parent_bush_id: None,
        };
        assert!(!berry.regrows());
    }
}
