//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to a `bumbles.toml`
//! file. Every section has defaults, so a file only needs the keys it
//! overrides.
//!
//! ## Example `bumbles.toml`
//!
//! ```toml
//! [world]
//! width = 1000.0
//! height = 700.0
//! max_population = 150
//! vampire_chance = 5.0
//! seed = 42
//!
//! [evolution]
//! mutation_rate = 0.1
//!
//! [ecology]
//! fire_spread_chance = 0.005
//! ```

use serde::{Deserialize, Serialize};

/// World-level simulation configuration.
///
/// Owned by whichever driver hosts the world; the engine reads it every tick
/// and changes it only through [`WorldConfigPatch`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub initial_males: usize,
    pub initial_females: usize,
    pub max_population: usize,
    /// Food sources per square unit of world area.
    pub food_density: f64,
    /// Per-tick chance of disease exposure before immunity is applied.
    pub disease_rate: f64,
    /// Percent chance, 0 to 100, that a newborn is a vampire.
    pub vampire_chance: f64,
    pub night_cycle: bool,
    /// Length of one day (and one night) in seconds.
    pub night_cycle_duration: f64,
    pub simulation_speed: f64,
    /// Upper bound on the raw elapsed time of one tick, in milliseconds.
    pub max_delta_ms: f64,
    /// Relative humidity in percent; scales food regrowth.
    pub humidity: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            initial_males: 2,
            initial_females: 2,
            max_population: 150,
            food_density: 0.0001,
            disease_rate: 0.001,
            vampire_chance: 5.0,
            night_cycle: true,
            night_cycle_duration: 60.0,
            simulation_speed: 1.0,
            max_delta_ms: 50.0,
            humidity: 50.0,
            seed: None,
        }
    }
}

/// Mutation channel parameters for genetic inheritance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub mutation_rate: f64,
    pub major_mutation_rate: f64,
    pub intelligence_major_mutation_rate: f64,
    /// Half-width of the uniform minor mutation offset.
    pub minor_mutation_amount: f64,
    /// Half-width of the uniform major mutation offset.
    pub major_mutation_amount: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.1,
            major_mutation_rate: 0.02,
            intelligence_major_mutation_rate: 0.05,
            minor_mutation_amount: 0.15,
            major_mutation_amount: 0.4,
        }
    }
}

/// Aging, reproduction timing and population pressure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LifecycleConfig {
    pub base_lifespan_ms: f64,
    pub reproduction_cooldown_ms: f64,
    /// Divides the reproduction cooldown; 2.0 halves the wait.
    pub reproduction_frequency: f64,
    pub maturity_age_ms: f64,
    pub overcrowding_threshold: usize,
    pub overcrowding_chance: f64,
    /// Thirst gained per frame before the metabolism divisor.
    pub thirst_rate: f64,
    /// Per-tick chance that a female bonds with her chosen mate, before the
    /// sociability bonus.
    pub pairing_chance: f64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            base_lifespan_ms: 120_000.0,
            reproduction_cooldown_ms: 20_000.0,
            reproduction_frequency: 1.0,
            maturity_age_ms: 45_000.0,
            overcrowding_threshold: 200,
            overcrowding_chance: 0.003,
            thirst_rate: 0.05,
            pairing_chance: 0.006,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EcologyConfig {
    pub fire_duration_ms: f64,
    pub fire_spread_chance: f64,
    pub berry_spawn_chance: f64,
    pub vampire_feed_cooldown_ms: f64,
}

impl Default for EcologyConfig {
    fn default() -> Self {
        Self {
            fire_duration_ms: 30_000.0,
            fire_spread_chance: 0.005,
            berry_spawn_chance: 0.003,
            vampire_feed_cooldown_ms: 5_000.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub evolution: EvolutionConfig,
    pub lifecycle: LifecycleConfig,
    pub ecology: EcologyConfig,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(
            self.world.width >= 200.0,
            "World width too small (min 200)"
        );
        anyhow::ensure!(
            self.world.width <= 10_000.0,
            "World width too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.height >= 200.0,
            "World height too small (min 200)"
        );
        anyhow::ensure!(
            self.world.height <= 10_000.0,
            "World height too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.max_population > 0,
            "Max population must be positive"
        );
        anyhow::ensure!(
            self.world.max_population <= 10_000,
            "Max population too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.food_density >= 0.0,
            "Food density must be non-negative"
        );
        anyhow::ensure!(
            self.world.food_density <= 0.001,
            "Food density too large (max 0.001)"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.world.disease_rate),
            "Disease rate must be in [0, 1]"
        );
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.world.vampire_chance),
            "Vampire chance must be a percentage in [0, 100]"
        );
        anyhow::ensure!(
            self.world.night_cycle_duration > 0.0,
            "Night cycle duration must be positive"
        );
        anyhow::ensure!(
            self.world.simulation_speed > 0.0 && self.world.simulation_speed <= 10.0,
            "Simulation speed must be in (0, 10]"
        );
        anyhow::ensure!(self.world.max_delta_ms > 0.0, "Max delta must be positive");
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.world.humidity),
            "Humidity must be a percentage in [0, 100]"
        );

        // Evolution validation
        for (name, rate) in [
            ("Mutation rate", self.evolution.mutation_rate),
            ("Major mutation rate", self.evolution.major_mutation_rate),
            (
                "Intelligence major mutation rate",
                self.evolution.intelligence_major_mutation_rate,
            ),
        ] {
            anyhow::ensure!((0.0..=1.0).contains(&rate), "{name} must be in [0, 1]");
        }
        anyhow::ensure!(
            self.evolution.minor_mutation_amount >= 0.0,
            "Minor mutation amount must be non-negative"
        );
        anyhow::ensure!(
            self.evolution.major_mutation_amount >= 0.0,
            "Major mutation amount must be non-negative"
        );

        // Lifecycle validation
        anyhow::ensure!(
            self.lifecycle.base_lifespan_ms > 0.0,
            "Base lifespan must be positive"
        );
        anyhow::ensure!(
            self.lifecycle.reproduction_cooldown_ms >= 0.0,
            "Reproduction cooldown must be non-negative"
        );
        anyhow::ensure!(
            self.lifecycle.reproduction_frequency > 0.0,
            "Reproduction frequency must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.lifecycle.overcrowding_chance),
            "Overcrowding chance must be in [0, 1]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.lifecycle.pairing_chance),
            "Pairing chance must be in [0, 1]"
        );
        anyhow::ensure!(
            self.lifecycle.thirst_rate >= 0.0,
            "Thirst rate must be non-negative"
        );

        // Ecology validation
        anyhow::ensure!(
            self.ecology.fire_duration_ms > 0.0,
            "Fire duration must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecology.fire_spread_chance),
            "Fire spread chance must be in [0, 1]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecology.berry_spawn_chance),
            "Berry spawn chance must be in [0, 1]"
        );
        anyhow::ensure!(
            self.ecology.vampire_feed_cooldown_ms >= 0.0,
            "Vampire feed cooldown must be non-negative"
        );

        Ok(())
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of the rule sections, used to tell apart runs made under
    /// different rules. World geometry and seed are not part of it.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.lifecycle).as_bytes());
        hasher.update(format!("{:?}", self.ecology).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Applies a partial world update, keeping the old configuration if the
    /// result does not validate.
    pub fn apply_patch(&mut self, patch: &WorldConfigPatch) -> anyhow::Result<()> {
        let mut candidate = self.clone();
        patch.apply_to(&mut candidate.world);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

/// A partial [`WorldConfig`]; `None` fields leave the current value alone.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WorldConfigPatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub max_population: Option<usize>,
    pub food_density: Option<f64>,
    pub disease_rate: Option<f64>,
    pub vampire_chance: Option<f64>,
    pub night_cycle: Option<bool>,
    pub night_cycle_duration: Option<f64>,
    pub simulation_speed: Option<f64>,
    pub humidity: Option<f64>,
}

impl WorldConfigPatch {
    pub fn apply_to(&self, world: &mut WorldConfig) {
        if let Some(v) = self.width {
            world.width = v;
        }
        if let Some(v) = self.height {
            world.height = v;
        }
        if let Some(v) = self.max_population {
            world.max_population = v;
        }
        if let Some(v) = self.food_density {
            world.food_density = v;
        }
        if let Some(v) = self.disease_rate {
            world.disease_rate = v;
        }
        if let Some(v) = self.vampire_chance {
            world.vampire_chance = v;
        }
        if let Some(v) = self.night_cycle {
            world.night_cycle = v;
        }
        if let Some(v) = self.night_cycle_duration {
            world.night_cycle_duration = v;
        }
        if let Some(v) = self.simulation_speed {
            world.simulation_speed = v;
        }
        if let Some(v) = self.humidity {
            world.humidity = v;
        }
    }
}
