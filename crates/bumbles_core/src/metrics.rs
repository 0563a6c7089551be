//! Tick metrics and logging setup.
//!
//! The world records every tick here; a summary line goes to the log once
//! every [`REPORT_INTERVAL`] ticks.

use std::collections::HashMap;
use std::time::Duration;

pub const REPORT_INTERVAL: u64 = 1000;

/// Running counters for one world.
#[derive(Debug)]
pub struct Metrics {
    tick_count: u64,
    population: usize,
    food_count: usize,
    busy: Duration,
    counters: HashMap<String, u64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: 0,
            population: 0,
            food_count: 0,
            busy: Duration::ZERO,
            counters: HashMap::new(),
        }
    }

    /// Records a completed tick with its wall-clock duration.
    pub fn record_tick(&mut self, duration: Duration, population: usize, food: usize) {
        self.tick_count += 1;
        self.population = population;
        self.food_count = food;
        self.busy += duration;

        if self.tick_count % REPORT_INTERVAL == 0 {
            tracing::info!(
                tick = self.tick_count,
                population,
                food,
                births = self.counter("births"),
                deaths = self.counter("deaths"),
                avg_tick_us = self.average_tick().as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn increment_counter(&mut self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&mut self, name: &str, amount: u64) {
        *self.counters.entry(name.to_string()).or_insert(0) += amount;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.population
    }

    #[must_use]
    pub fn food_count(&self) -> usize {
        self.food_count
    }

    /// Mean wall-clock time spent inside a tick.
    #[must_use]
    pub fn average_tick(&self) -> Duration {
        if self.tick_count == 0 {
            Duration::ZERO
        } else {
            self.busy / self.tick_count.min(u32::MAX as u64) as u32
        }
    }
}

/// Installs a global `fmt` subscriber. Unknown levels fall back to `info`;
/// a second call is a no-op.
pub fn init_logging(level: &str) {
    let level = level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
