use crate::config::WorldConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

/// Climate and the day/night clock.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Environment {
    /// Seconds of simulated time since the world was initialized.
    pub clock_secs: f64,
    /// Length of one day (and of one night) in seconds.
    pub cycle_duration_secs: f64,
    pub night_cycle: bool,
    /// Relative humidity, percent.
    pub humidity: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            clock_secs: 0.0,
            cycle_duration_secs: 60.0,
            night_cycle: true,
            humidity: 50.0,
        }
    }
}

impl Environment {
    pub fn from_config(config: &WorldConfig) -> Self {
        let mut env = Self::default();
        env.sync_config(config);
        env
    }

    /// Picks up settings that may change between ticks.
    pub fn sync_config(&mut self, config: &WorldConfig) {
        self.cycle_duration_secs = config.night_cycle_duration;
        self.night_cycle = config.night_cycle;
        self.humidity = config.humidity;
    }

    pub fn tick(&mut self, dt_ms: f64) {
        if self.night_cycle {
            self.clock_secs += dt_ms / 1000.0;
        }
    }

    /// Fraction of the full day+night period elapsed, in `[0, 1)`.
    #[must_use]
    pub fn cycle_progress(&self) -> f64 {
        let period = self.cycle_duration_secs * 2.0;
        if period <= 0.0 {
            return 0.0;
        }
        self.clock_secs.rem_euclid(period) / period
    }

    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        if self.night_cycle && self.cycle_progress() > 0.5 {
            TimeOfDay::Night
        } else {
            TimeOfDay::Day
        }
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.time_of_day() == TimeOfDay::Night
    }

    /// Multiplier on food regrowth: 0.5 when bone dry, 1.3 when saturated.
    #[must_use]
    pub fn humidity_factor(&self) -> f64 {
        0.5 + (self.humidity / 100.0) * 0.8
    }

    /// Vampires hunt at night and sluggishly by day.
    #[must_use]
    pub fn vampire_activity(&self) -> f64 {
        if self.is_night() {
            1.3
        } else {
            0.7
        }
    }
}
