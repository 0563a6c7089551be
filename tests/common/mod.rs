pub mod macros;

use bumbles_core::config::AppConfig;
use bumbles_core::lifecycle::create_bumble_with_rng;
use bumbles_core::resources::{create_fire_with_rng, create_food_with_rng, create_water_with_rng};
use bumbles_data::{Bumble, FoodKind, Gender};
use bumbles_lib::World;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Assembles a running world by hand; nothing is spawned unless asked for.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    bumbles: Vec<BumbleBuilder>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(0);
        Self {
            config,
            bumbles: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// No disease, fire spread, berry drops or vampires.
    pub fn calm(self) -> Self {
        self.with_config(|c| {
            c.world.disease_rate = 0.0;
            c.world.vampire_chance = 0.0;
            c.ecology.fire_spread_chance = 0.0;
            c.ecology.berry_spawn_chance = 0.0;
        })
    }

    pub fn with_bumble(mut self, bumble: BumbleBuilder) -> Self {
        self.bumbles.push(bumble);
        self
    }

    pub fn with_food(mut self, x: f64, y: f64, kind: FoodKind, energy: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            let mut food = create_food_with_rng(x, y, Some(kind), &mut world.rng);
            food.energy = energy;
            food.max_energy = food.max_energy.max(energy);
            world.food.push(food);
        }));
        self
    }

    pub fn with_water(mut self, x: f64, y: f64, current_water: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            let mut water = create_water_with_rng(x, y, &mut world.rng);
            water.current_water = current_water;
            world.water.push(water);
        }));
        self
    }

    pub fn with_fire(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            let mut fire =
                create_fire_with_rng(x, y, world.config.ecology.fire_duration_ms, &mut world.rng);
            fire.radius = radius;
            fire.intensity = 1.0;
            world.fires.push(fire);
        }));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for modifier in self.mods {
            modifier(&mut world);
        }
        for builder in self.bumbles {
            let b = builder.build_in(&mut world);
            world.bumbles.push(b);
        }
        world.set_running(true);
        world
    }
}

/// Overrides applied on top of a freshly drawn bumble.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct BumbleBuilder {
    gender: Option<Gender>,
    pos: Option<(f64, f64)>,
    energy: Option<f64>,
    thirst: Option<f64>,
    stress: Option<f64>,
    age: Option<f64>,
    immortal: bool,
    heat_resistance: Option<f64>,
    fertility: Option<f64>,
    size: Option<f64>,
    vampire: Option<bool>,
}

#[allow(dead_code)]
impl BumbleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn male() -> Self {
        Self::new().gender(Gender::Male)
    }

    pub fn female() -> Self {
        Self::new().gender(Gender::Female)
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.pos = Some((x, y));
        self
    }

    pub fn energy(mut self, amount: f64) -> Self {
        self.energy = Some(amount);
        self
    }

    pub fn thirst(mut self, amount: f64) -> Self {
        self.thirst = Some(amount);
        self
    }

    pub fn stress(mut self, amount: f64) -> Self {
        self.stress = Some(amount);
        self
    }

    pub fn age(mut self, ms: f64) -> Self {
        self.age = Some(ms);
        self
    }

    /// Never dies of old age during a test.
    pub fn immortal(mut self) -> Self {
        self.immortal = true;
        self
    }

    pub fn heat_resistance(mut self, value: f64) -> Self {
        self.heat_resistance = Some(value);
        self
    }

    pub fn fertility(mut self, value: f64) -> Self {
        self.fertility = Some(value);
        self
    }

    pub fn size(mut self, value: f64) -> Self {
        self.size = Some(value);
        self
    }

    pub fn vampire(mut self, is_vampire: bool) -> Self {
        self.vampire = Some(is_vampire);
        self
    }

    /// Draws the bumble from the world's own generator and name pool.
    pub fn build_in(self, world: &mut World) -> Bumble {
        let mut b = create_bumble_with_rng(
            &world.config,
            world.generation,
            self.gender,
            None,
            &mut world.names,
            &mut world.rng,
        );
        if let Some((x, y)) = self.pos {
            b.physics.x = x;
            b.physics.y = y;
            b.physics.vx = 0.0;
            b.physics.vy = 0.0;
        }
        if let Some(v) = self.energy {
            b.vitals.energy = v;
            b.vitals.max_energy = b.vitals.max_energy.max(v);
        }
        if let Some(v) = self.thirst {
            b.vitals.thirst = v;
        }
        if let Some(v) = self.stress {
            b.intel.stress = v;
        }
        if let Some(v) = self.age {
            b.vitals.age = v;
        }
        if self.immortal {
            b.vitals.max_age = f64::MAX;
        }
        if let Some(v) = self.heat_resistance {
            b.genetics.heat_resistance = v;
        }
        if let Some(v) = self.fertility {
            b.genetics.fertility = v;
        }
        if let Some(v) = self.size {
            b.genetics.size = v;
        }
        if let Some(v) = self.vampire {
            b.genetics.is_vampire = v;
        }
        b
    }
}
