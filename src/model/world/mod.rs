use bumbles_core::config::AppConfig;
use bumbles_core::environment::Environment;
use bumbles_core::metrics::Metrics;
use bumbles_core::naming::NameRegistry;
use bumbles_core::snapshot::InternalBumbleSnapshot;
use bumbles_core::spatial_hash::SpatialHash;
use bumbles_data::{Bumble, Fire, Food, LiveEvent, SimulationStats, Water};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub mod commands;
pub mod finalize;
pub mod init;
pub mod update;

/// Grid cell edge used for every radius query in a tick.
pub const CELL_SIZE: f64 = 50.0;

/// Rejected commands. A rejected command leaves the world untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldError {
    #[error("position ({x}, {y}) is outside the world")]
    OutOfBounds { x: f64, y: f64 },
    #[error("population is already at the cap of {0}")]
    PopulationCap(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The whole simulation: owns the population, the resources and the clock,
/// and runs one tick at a time.
pub struct World {
    pub config: AppConfig,
    pub tick: u64,
    pub generation: u32,
    pub running: bool,
    pub bumbles: Vec<Bumble>,
    pub food: Vec<Food>,
    pub water: Vec<Water>,
    pub fires: Vec<Fire>,
    pub stats: SimulationStats,
    pub env: Environment,
    pub names: NameRegistry,
    pub metrics: Metrics,
    pub rng: ChaCha8Rng,
    pub spatial_hash: SpatialHash,
    /// Events raised by commands between ticks, handed out by the next tick.
    pending_events: Vec<LiveEvent>,
    snapshots: Vec<InternalBumbleSnapshot>,
}

impl World {
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.bumbles.iter().filter(|b| b.is_alive).count()
    }

    pub fn is_extinct(&self) -> bool {
        self.alive_count() == 0
    }

    fn rebuild_index(&mut self) {
        let (w, h) = (self.config.world.width, self.config.world.height);
        if self.spatial_hash.width != w || self.spatial_hash.height != h {
            self.spatial_hash = SpatialHash::new(CELL_SIZE, w, h);
        }
        let positions: Vec<(f64, f64)> = self
            .bumbles
            .iter()
            .map(|b| (b.physics.x, b.physics.y))
            .collect();
        self.spatial_hash.build(&positions);
    }
}

pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
