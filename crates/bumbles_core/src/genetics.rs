//! Trait generation and inheritance.
//!
//! Every scalar trait has a fixed clamp range. Offspring take the parental
//! mean plus two independent mutation channels: a frequent minor drift and a
//! rare major jump. The major channel is what lets traits such as large
//! antennae appear or vanish within a few generations.

use crate::config::EvolutionConfig;
use bumbles_data::{Color, Gender, Genetics};
use rand::Rng;

/// Inclusive clamp range of one trait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitRange {
    pub min: f64,
    pub max: f64,
}

impl TraitRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const SIZE: TraitRange = TraitRange::new(0.4, 2.5);
pub const SPEED: TraitRange = TraitRange::new(0.2, 2.0);
pub const FERTILITY: TraitRange = TraitRange::new(0.05, 1.2);
pub const LONGEVITY: TraitRange = TraitRange::new(0.3, 2.0);
pub const AGGRESSION: TraitRange = TraitRange::new(0.0, 1.5);
pub const ANTENNA_SIZE: TraitRange = TraitRange::new(0.1, 2.0);
pub const EYE_SIZE: TraitRange = TraitRange::new(0.2, 1.5);
pub const INTELLIGENCE: TraitRange = TraitRange::new(0.3, 1.8);
pub const IMMUNITY: TraitRange = TraitRange::new(0.2, 1.5);
pub const HEAT_RESISTANCE: TraitRange = TraitRange::new(0.1, 1.8);
pub const METABOLISM: TraitRange = TraitRange::new(0.4, 1.6);
pub const SOCIABILITY: TraitRange = TraitRange::new(0.0, 1.5);
pub const CAMOUFLAGE: TraitRange = TraitRange::new(0.0, 1.2);
pub const VAMPIRE_STRENGTH: TraitRange = TraitRange::new(0.0, 1.0);

/// Vampires are drawn desaturated and dark.
pub fn saturation_range(is_vampire: bool) -> TraitRange {
    if is_vampire {
        TraitRange::new(0.1, 0.4)
    } else {
        TraitRange::new(0.2, 1.0)
    }
}

pub fn brightness_range(is_vampire: bool) -> TraitRange {
    if is_vampire {
        TraitRange::new(0.2, 0.5)
    } else {
        TraitRange::new(0.3, 1.0)
    }
}

pub trait GeneticsLogic {
    fn generate_initial_with_rng<R: Rng>(gender: Gender, vampire_chance: f64, rng: &mut R)
        -> Self;
    fn inherit_with_rng<R: Rng>(
        p1: &Self,
        p2: &Self,
        gender: Gender,
        vampire_chance: f64,
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Self;
    fn is_within_ranges(&self, gender: Gender) -> bool;
}

impl GeneticsLogic for Genetics {
    /// Draws a fresh trait vector. `vampire_chance` is a percentage.
    fn generate_initial_with_rng<R: Rng>(
        gender: Gender,
        vampire_chance: f64,
        rng: &mut R,
    ) -> Self {
        let is_vampire = rng.gen::<f64>() < vampire_chance / 100.0;
        let antenna_size = if gender == Gender::Male {
            0.3 + rng.gen::<f64>()
        } else {
            0.0
        };
        let vampire_strength = if is_vampire {
            0.3 + rng.gen::<f64>() * 0.4
        } else {
            0.0
        };
        let (saturation, brightness) = if is_vampire {
            (0.1 + rng.gen::<f64>() * 0.3, 0.2 + rng.gen::<f64>() * 0.3)
        } else {
            (0.3 + rng.gen::<f64>() * 0.7, 0.4 + rng.gen::<f64>() * 0.5)
        };

        Self {
            size: 0.6 + rng.gen::<f64>() * 1.2,
            speed: 0.4 + rng.gen::<f64>(),
            fertility: 0.2 + rng.gen::<f64>() * 0.7,
            longevity: 0.6 + rng.gen::<f64>() * 0.8,
            aggression: rng.gen::<f64>() * 0.6,
            antenna_size,
            eye_size: 0.4 + rng.gen::<f64>() * 0.6,
            intelligence: 0.5 + rng.gen::<f64>() * 0.8,
            immunity: 0.4 + rng.gen::<f64>() * 0.8,
            heat_resistance: 0.3 + rng.gen::<f64>() * 0.8,
            metabolism: 0.6 + rng.gen::<f64>() * 0.6,
            sociability: rng.gen::<f64>(),
            camouflage: rng.gen::<f64>() * 0.8,
            is_vampire,
            vampire_strength,
            color: Color {
                hue: rng.gen::<f64>() * 360.0,
                saturation,
                brightness,
            },
        }
    }

    fn inherit_with_rng<R: Rng>(
        p1: &Self,
        p2: &Self,
        gender: Gender,
        vampire_chance: f64,
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Self {
        let major = config.major_mutation_rate;
        let mix = |a: f64, b: f64, range: TraitRange, major_rate: f64, rng: &mut R| {
            mutate_trait(a, b, range, config, major_rate, rng)
        };

        let is_vampire =
            p1.is_vampire || p2.is_vampire || rng.gen::<f64>() < vampire_chance / 100.0;

        let size = mix(p1.size, p2.size, SIZE, major, rng);
        let speed = mix(p1.speed, p2.speed, SPEED, major, rng);
        let fertility = mix(p1.fertility, p2.fertility, FERTILITY, major, rng);
        let longevity = mix(p1.longevity, p2.longevity, LONGEVITY, major, rng);
        let aggression = mix(p1.aggression, p2.aggression, AGGRESSION, major, rng);
        let antenna_size = if gender == Gender::Male {
            mix(p1.antenna_size, p2.antenna_size, ANTENNA_SIZE, major, rng)
        } else {
            0.0
        };
        let eye_size = mix(p1.eye_size, p2.eye_size, EYE_SIZE, major, rng);
        let intelligence = mix(
            p1.intelligence,
            p2.intelligence,
            INTELLIGENCE,
            config.intelligence_major_mutation_rate,
            rng,
        );
        let immunity = mix(p1.immunity, p2.immunity, IMMUNITY, major, rng);
        let heat_resistance = mix(
            p1.heat_resistance,
            p2.heat_resistance,
            HEAT_RESISTANCE,
            major,
            rng,
        );
        let metabolism = mix(p1.metabolism, p2.metabolism, METABOLISM, major, rng);
        let sociability = mix(p1.sociability, p2.sociability, SOCIABILITY, major, rng);
        let camouflage = mix(p1.camouflage, p2.camouflage, CAMOUFLAGE, major, rng);

        let vampire_strength = if !is_vampire {
            0.0
        } else if p1.is_vampire && p2.is_vampire {
            mix(
                p1.vampire_strength,
                p2.vampire_strength,
                VAMPIRE_STRENGTH,
                major,
                rng,
            )
        } else {
            0.3 + rng.gen::<f64>() * 0.4
        };

        let hue = inherit_hue(p1.color.hue, p2.color.hue, is_vampire, config, rng);
        let saturation = mix(
            p1.color.saturation,
            p2.color.saturation,
            saturation_range(is_vampire),
            major,
            rng,
        );
        let brightness = mix(
            p1.color.brightness,
            p2.color.brightness,
            brightness_range(is_vampire),
            major,
            rng,
        );

        Self {
            size,
            speed,
            fertility,
            longevity,
            aggression,
            antenna_size,
            eye_size,
            intelligence,
            immunity,
            heat_resistance,
            metabolism,
            sociability,
            camouflage,
            is_vampire,
            vampire_strength,
            color: Color {
                hue,
                saturation,
                brightness,
            },
        }
    }

    fn is_within_ranges(&self, gender: Gender) -> bool {
        let antenna_ok = match gender {
            Gender::Male => ANTENNA_SIZE.contains(self.antenna_size),
            Gender::Female => self.antenna_size == 0.0,
        };
        let strength_ok = if self.is_vampire {
            VAMPIRE_STRENGTH.contains(self.vampire_strength)
        } else {
            self.vampire_strength == 0.0
        };

        antenna_ok
            && strength_ok
            && SIZE.contains(self.size)
            && SPEED.contains(self.speed)
            && FERTILITY.contains(self.fertility)
            && LONGEVITY.contains(self.longevity)
            && AGGRESSION.contains(self.aggression)
            && EYE_SIZE.contains(self.eye_size)
            && INTELLIGENCE.contains(self.intelligence)
            && IMMUNITY.contains(self.immunity)
            && HEAT_RESISTANCE.contains(self.heat_resistance)
            && METABOLISM.contains(self.metabolism)
            && SOCIABILITY.contains(self.sociability)
            && CAMOUFLAGE.contains(self.camouflage)
            && (0.0..360.0).contains(&self.color.hue)
            && saturation_range(self.is_vampire).contains(self.color.saturation)
            && brightness_range(self.is_vampire).contains(self.color.brightness)
    }
}

/// Parental mean, then the minor and major channels, then the clamp.
pub fn mutate_trait<R: Rng>(
    a: f64,
    b: f64,
    range: TraitRange,
    config: &EvolutionConfig,
    major_rate: f64,
    rng: &mut R,
) -> f64 {
    let mut value = (a + b) / 2.0;
    if rng.gen::<f64>() < config.mutation_rate {
        value += (rng.gen::<f64>() - 0.5) * 2.0 * config.minor_mutation_amount;
    }
    if rng.gen::<f64>() < major_rate {
        value += (rng.gen::<f64>() - 0.5) * 2.0 * config.major_mutation_amount;
    }
    range.clamp(value)
}

fn inherit_hue<R: Rng>(
    h1: f64,
    h2: f64,
    is_vampire: bool,
    config: &EvolutionConfig,
    rng: &mut R,
) -> f64 {
    let mut hue = (h1 + h2) / 2.0;
    if rng.gen::<f64>() < config.mutation_rate {
        let spread = if is_vampire { 30.0 } else { 45.0 };
        hue += (rng.gen::<f64>() - 0.5) * 2.0 * spread;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360.0
    if wrapped >= 360.0 || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn extreme(high: bool, vampire: bool) -> Genetics {
        let v = if high { 1.0e6 } else { -1.0e6 };
        Genetics {
            size: v,
            speed: v,
            fertility: v,
            longevity: v,
            aggression: v,
            antenna_size: v,
            eye_size: v,
            intelligence: v,
            immunity: v,
            heat_resistance: v,
            metabolism: v,
            sociability: v,
            camouflage: v,
            is_vampire: vampire,
            vampire_strength: v,
            color: Color {
                hue: v,
                saturation: v,
                brightness: v,
            },
        }
    }

    #[test]
    fn test_initial_genetics_within_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for i in 0..2000 {
            let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
            let g = Genetics::generate_initial_with_rng(gender, 50.0, &mut rng);
            assert!(g.is_within_ranges(gender), "{g:?}");
        }
    }

    #[test]
    fn test_females_have_no_antennae() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = EvolutionConfig::default();
        let mom = Genetics::generate_initial_with_rng(Gender::Female, 0.0, &mut rng);
        let dad = Genetics::generate_initial_with_rng(Gender::Male, 0.0, &mut rng);
        for _ in 0..200 {
            let child =
                Genetics::inherit_with_rng(&mom, &dad, Gender::Female, 0.0, &config, &mut rng);
            assert_eq!(child.antenna_size, 0.0);
        }
    }

    #[test]
    fn test_inherit_extreme_parents_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = EvolutionConfig {
            mutation_rate: 1.0,
            major_mutation_rate: 1.0,
            intelligence_major_mutation_rate: 1.0,
            ..Default::default()
        };
        for i in 0..10_000 {
            let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
            let p1 = extreme(i % 3 == 0, i % 5 == 0);
            let p2 = extreme(i % 4 == 0, i % 7 == 0);
            let child = Genetics::inherit_with_rng(&p1, &p2, gender, 50.0, &config, &mut rng);
            assert!(child.is_within_ranges(gender), "iteration {i}: {child:?}");
        }
    }

    #[test]
    fn test_vampirism_is_dominant() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = EvolutionConfig::default();
        let mut vamp = Genetics::generate_initial_with_rng(Gender::Male, 0.0, &mut rng);
        vamp.is_vampire = true;
        vamp.vampire_strength = 0.5;
        let plain = Genetics::generate_initial_with_rng(Gender::Female, 0.0, &mut rng);
        for _ in 0..100 {
            let child =
                Genetics::inherit_with_rng(&vamp, &plain, Gender::Male, 0.0, &config, &mut rng);
            assert!(child.is_vampire);
            assert!((0.3..=0.7).contains(&child.vampire_strength));
        }
    }

    #[test]
    fn test_no_mutation_yields_parental_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = EvolutionConfig {
            mutation_rate: 0.0,
            major_mutation_rate: 0.0,
            intelligence_major_mutation_rate: 0.0,
            ..Default::default()
        };
        let p1 = Genetics {
            size: 1.0,
            ..Default::default()
        };
        let p2 = Genetics {
            size: 2.0,
            ..Default::default()
        };
        let child = Genetics::inherit_with_rng(&p1, &p2, Gender::Female, 0.0, &config, &mut rng);
        assert!((child.size - 1.5).abs() < 1e-12);
        assert!((child.color.hue - p1.color.hue).abs() < 1e-12);
    }

    #[test]
    fn test_hue_wraps() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let config = EvolutionConfig {
            mutation_rate: 0.0,
            ..Default::default()
        };
        let hue = inherit_hue(350.0, 390.0, false, &config, &mut rng);
        assert!((hue - 10.0).abs() < 1e-9);
    }
}
