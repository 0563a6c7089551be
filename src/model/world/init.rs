use crate::model::world::{timestamp, World, CELL_SIZE};
use bumbles_core::config::AppConfig;
use bumbles_core::environment::Environment;
use bumbles_core::lifecycle::create_bumble_with_rng;
use bumbles_core::metrics::Metrics;
use bumbles_core::naming::NameRegistry;
use bumbles_core::resources::{create_food_with_rng, create_water_with_rng};
use bumbles_core::spatial_hash::SpatialHash;
use bumbles_core::systems::stats::refresh_stats;
use bumbles_data::{FoodKind, Gender, LiveEvent, SimulationStats};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const MIN_FOOD: usize = 12;
pub const GOLDEN_BERRIES: usize = 3;
pub const MIN_WATER: usize = 2;
/// Water sources keep this far from the world edge.
pub const WATER_BORDER: f64 = 50.0;

fn seeded_rng(config: &AppConfig) -> ChaCha8Rng {
    match config.world.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl World {
    /// An empty, paused world. Call [`World::initialize`] to populate it.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let rng = seeded_rng(&config);
        Ok(Self {
            tick: 0,
            generation: 1,
            running: false,
            bumbles: Vec::new(),
            food: Vec::new(),
            water: Vec::new(),
            fires: Vec::new(),
            stats: SimulationStats::default(),
            env: Environment::from_config(&config.world),
            names: NameRegistry::new(),
            metrics: Metrics::new(),
            rng,
            spatial_hash: SpatialHash::new(CELL_SIZE, config.world.width, config.world.height),
            pending_events: Vec::new(),
            snapshots: Vec::new(),
            config,
        })
    }

    /// Clears the world and seeds it with the founding population, food and
    /// water, then starts it running.
    pub fn initialize(&mut self, config: AppConfig) -> anyhow::Result<()> {
        config.validate()?;
        self.config = config;
        self.reset();

        let founders = std::iter::repeat(Gender::Male)
            .take(self.config.world.initial_males)
            .chain(std::iter::repeat(Gender::Female).take(self.config.world.initial_females));
        for gender in founders {
            let b = create_bumble_with_rng(
                &self.config,
                self.generation,
                Some(gender),
                None,
                &mut self.names,
                &mut self.rng,
            );
            self.pending_events.push(LiveEvent::Birth {
                id: b.id(),
                name: b.identity.name.clone(),
                parent_ids: None,
                gen: b.identity.generation,
                tick: self.tick,
                timestamp: timestamp(),
            });
            self.bumbles.push(b);
        }

        let (w, h) = (self.config.world.width, self.config.world.height);
        let food_count = (w * h * self.config.world.food_density).floor() as usize;
        for _ in 0..food_count.max(MIN_FOOD) {
            let (x, y) = (self.rng.gen::<f64>() * w, self.rng.gen::<f64>() * h);
            self.food.push(create_food_with_rng(x, y, None, &mut self.rng));
        }
        for _ in 0..GOLDEN_BERRIES {
            let (x, y) = (self.rng.gen::<f64>() * w, self.rng.gen::<f64>() * h);
            self.food
                .push(create_food_with_rng(x, y, Some(FoodKind::GoldenBerry), &mut self.rng));
        }
        for _ in 0..(food_count / 6).max(MIN_WATER) {
            let x = WATER_BORDER + self.rng.gen::<f64>() * (w - 2.0 * WATER_BORDER);
            let y = WATER_BORDER + self.rng.gen::<f64>() * (h - 2.0 * WATER_BORDER);
            self.water.push(create_water_with_rng(x, y, &mut self.rng));
        }

        self.stats.total_born = self.bumbles.len() as u64;
        refresh_stats(
            &mut self.stats,
            &self.bumbles,
            &self.food,
            &self.water,
            &self.fires,
            self.generation,
            self.env.is_night(),
        );
        self.running = true;
        tracing::info!(
            population = self.bumbles.len(),
            food = self.food.len(),
            water = self.water.len(),
            seed = ?self.config.world.seed,
            rules = %self.config.fingerprint(),
            "World initialized"
        );
        Ok(())
    }

    /// Empties every collection and restores the starting counters. The
    /// configuration is kept; a seeded world also restarts its random stream.
    pub fn reset(&mut self) {
        self.running = false;
        self.tick = 0;
        self.generation = 1;
        self.bumbles.clear();
        self.food.clear();
        self.water.clear();
        self.fires.clear();
        self.names.clear();
        self.pending_events.clear();
        self.snapshots.clear();
        self.stats = SimulationStats::default();
        self.env = Environment::from_config(&self.config.world);
        self.metrics = Metrics::new();
        if self.config.world.seed.is_some() {
            self.rng = seeded_rng(&self.config);
        }
        tracing::debug!("World reset");
    }
}
