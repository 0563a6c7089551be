//! Per-world registry of names held by living bumbles.

use bumbles_data::Gender;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub const MALE_NAMES: [&str; 30] = [
    "Buzz", "Zap", "Bingo", "Zippy", "Bouncer", "Dash", "Fizz", "Spark", "Wobble", "Zoom",
    "Bumpy", "Zigzag", "Bloop", "Chirp", "Pip", "Zest", "Bouncy", "Whistle", "Wiggle", "Zing",
    "Bubbles", "Doodle", "Flicker", "Giggles", "Hop", "Jingle", "Kick", "Loop", "Marble",
    "Nibble",
];

pub const FEMALE_NAMES: [&str; 30] = [
    "Bella", "Daisy", "Luna", "Ruby", "Ivy", "Poppy", "Rose", "Lily", "Sage", "Willow", "Iris",
    "Fern", "Clover", "Honey", "Pearl", "Sky", "Rain", "Dawn", "Grace", "Joy", "Hope", "Faith",
    "Star", "Gem", "Bloom", "Breeze", "Glow", "Shine", "Dream", "Angel",
];

const RANDOM_SUFFIX_ATTEMPTS: usize = 64;

/// Names are unique among living bumbles and return to the pool on death.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    in_use: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes an unused name from the gender's pool, or a numbered variant of
    /// a pool name once the pool is exhausted.
    pub fn acquire<R: Rng>(&mut self, gender: Gender, rng: &mut R) -> String {
        let pool: &[&str] = match gender {
            Gender::Male => &MALE_NAMES,
            Gender::Female => &FEMALE_NAMES,
        };

        let free: Vec<&str> = pool
            .iter()
            .copied()
            .filter(|n| !self.in_use.contains(*n))
            .collect();
        if let Some(name) = free.choose(rng) {
            return self.claim((*name).to_string());
        }

        let base = pool.choose(rng).copied().unwrap_or("Bumble");
        for _ in 0..RANDOM_SUFFIX_ATTEMPTS {
            let candidate = format!("{base} {}", rng.gen_range(0..1000));
            if !self.in_use.contains(&candidate) {
                return self.claim(candidate);
            }
        }

        let mut n = 1000u64;
        loop {
            let candidate = format!("{base} {n}");
            if !self.in_use.contains(&candidate) {
                return self.claim(candidate);
            }
            n += 1;
        }
    }

    /// Returns `false` if the name was not held.
    pub fn release(&mut self, name: &str) -> bool {
        self.in_use.remove(name)
    }

    pub fn is_in_use(&self, name: &str) -> bool {
        self.in_use.contains(name)
    }

    pub fn len(&self) -> usize {
        self.in_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_use.is_empty()
    }

    pub fn clear(&mut self) {
        self.in_use.clear();
    }

    fn claim(&mut self, name: String) -> String {
        self.in_use.insert(name.clone());
        name
    }
}
