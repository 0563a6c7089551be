//! Factories for food, water and fire.

use bumbles_data::{Fire, Food, FoodKind, Water};
use rand::Rng;
use uuid::Uuid;

/// Seeded worlds must hand out reproducible ids.
#[inline]
pub fn new_id<R: Rng>(rng: &mut R) -> Uuid {
    Uuid::from_u128(rng.gen::<u128>())
}

/// 60% bushes; of the rest, 85% berries and 15% golden berries.
pub fn roll_food_kind<R: Rng>(rng: &mut R) -> FoodKind {
    if rng.gen::<f64>() < 0.6 {
        FoodKind::Bush
    } else if rng.gen::<f64>() < 0.85 {
        FoodKind::Berry
    } else {
        FoodKind::GoldenBerry
    }
}

/// (base energy, energy variance, regrowth per frame)
fn kind_profile(kind: FoodKind) -> (f64, f64, f64) {
    match kind {
        FoodKind::Bush => (35.0, 25.0, 0.015),
        FoodKind::Berry => (20.0, 15.0, 0.03),
        FoodKind::GoldenBerry => (60.0, 20.0, 0.005),
    }
}

pub fn create_food_with_rng<R: Rng>(x: f64, y: f64, kind: Option<FoodKind>, rng: &mut R) -> Food {
    let kind = kind.unwrap_or_else(|| roll_food_kind(rng));
    let quality = 0.5 + rng.gen::<f64>() * 1.5;
    let (base, variance, regrowth) = kind_profile(kind);
    let energy = (base + rng.gen::<f64>() * variance) * quality;
    let berry_count = if kind == FoodKind::Bush {
        (2.0 + quality * 3.0).floor() as u32
    } else {
        0
    };

    Food {
        id: new_id(rng),
        x,
        y,
        energy,
        max_energy: energy * 1.2,
        regrowth_rate: regrowth / quality,
        kind,
        quality,
        berry_count,
        parent_bush_id: None,
    }
}

/// A berry dropped by `bush`.
pub fn create_berry_with_rng<R: Rng>(bush: &Food, x: f64, y: f64, rng: &mut R) -> Food {
    let mut berry = create_food_with_rng(x, y, Some(FoodKind::Berry), rng);
    berry.parent_bush_id = Some(bush.id);
    berry
}

pub fn create_water_with_rng<R: Rng>(x: f64, y: f64, rng: &mut R) -> Water {
    Water {
        id: new_id(rng),
        x,
        y,
        radius: 20.0 + rng.gen::<f64>() * 15.0,
        capacity: 100.0,
        current_water: 80.0 + rng.gen::<f64>() * 20.0,
        refill_rate: 0.05 + rng.gen::<f64>() * 0.03,
    }
}

pub fn create_fire_with_rng<R: Rng>(x: f64, y: f64, base_duration_ms: f64, rng: &mut R) -> Fire {
    Fire {
        id: new_id(rng),
        x,
        y,
        radius: 15.0 + rng.gen::<f64>() * 20.0,
        intensity: 0.7 + rng.gen::<f64>() * 0.3,
        duration: 0.0,
        max_duration: base_duration_ms * (0.8 + rng.gen::<f64>() * 0.4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_food_fields_in_declared_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..500 {
            let food = create_food_with_rng(10.0, 10.0, None, &mut rng);
            assert!((0.5..=2.0).contains(&food.quality));
            assert!(food.energy > 0.0 && food.energy <= food.max_energy);
            match food.kind {
                FoodKind::Bush => assert!((3..=8).contains(&food.berry_count)),
                _ => assert_eq!(food.berry_count, 0),
            }
        }
    }

    #[test]
    fn test_berry_links_to_bush() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let bush = create_food_with_rng(0.0, 0.0, Some(FoodKind::Bush), &mut rng);
        let berry = create_berry_with_rng(&bush, 5.0, 5.0, &mut rng);
        assert_eq!(berry.kind, FoodKind::Berry);
        assert_eq!(berry.parent_bush_id, Some(bush.id));
    }

    #[test]
    fn test_fire_duration_jitter() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for _ in 0..100 {
            let fire = create_fire_with_rng(0.0, 0.0, 30_000.0, &mut rng);
            assert!((24_000.0..=36_000.0).contains(&fire.max_duration));
            assert!((0.7..=1.0).contains(&fire.intensity));
        }
    }

    #[test]
    fn test_seeded_ids_repeat() {
        let a = new_id(&mut ChaCha8Rng::seed_from_u64(5));
        let b = new_id(&mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
