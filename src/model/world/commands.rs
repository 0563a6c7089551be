use crate::model::world::{timestamp, World, WorldError};
use bumbles_core::config::WorldConfigPatch;
use bumbles_core::lifecycle::create_bumble_with_rng;
use bumbles_core::resources::{create_fire_with_rng, create_food_with_rng, create_water_with_rng};
use bumbles_core::snapshot::WorldSnapshot;
use bumbles_data::{Bumble, Gender, LiveEvent};
use uuid::Uuid;

impl World {
    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            tracing::debug!(running, "Run state changed");
        }
        self.running = running;
    }

    fn check_bounds(&self, x: f64, y: f64) -> Result<(), WorldError> {
        let world = &self.config.world;
        let inside = x.is_finite()
            && y.is_finite()
            && (0.0..=world.width).contains(&x)
            && (0.0..=world.height).contains(&y);
        if inside {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds { x, y })
        }
    }

    /// Drops a food source of a random kind at `(x, y)`.
    pub fn place_food(&mut self, x: f64, y: f64) -> Result<Uuid, WorldError> {
        self.check_bounds(x, y)?;
        let food = create_food_with_rng(x, y, None, &mut self.rng);
        let id = food.id;
        self.food.push(food);
        Ok(id)
    }

    pub fn place_fire(&mut self, x: f64, y: f64) -> Result<Uuid, WorldError> {
        self.check_bounds(x, y)?;
        let fire = create_fire_with_rng(x, y, self.config.ecology.fire_duration_ms, &mut self.rng);
        let id = fire.id;
        tracing::debug!(x, y, "Fire placed");
        self.fires.push(fire);
        Ok(id)
    }

    pub fn place_water(&mut self, x: f64, y: f64) -> Result<Uuid, WorldError> {
        self.check_bounds(x, y)?;
        let water = create_water_with_rng(x, y, &mut self.rng);
        let id = water.id;
        self.water.push(water);
        Ok(id)
    }

    /// Adds a founder-style bumble of the current generation at a random
    /// position. `None` picks the gender at random.
    pub fn spawn_agent(&mut self, gender: Option<Gender>) -> Result<Uuid, WorldError> {
        let cap = self.config.world.max_population;
        if self.alive_count() >= cap {
            return Err(WorldError::PopulationCap(cap));
        }
        let b = create_bumble_with_rng(
            &self.config,
            self.generation,
            gender,
            None,
            &mut self.names,
            &mut self.rng,
        );
        let id = b.id();
        self.pending_events.push(LiveEvent::Birth {
            id,
            name: b.identity.name.clone(),
            parent_ids: None,
            gen: b.identity.generation,
            tick: self.tick,
            timestamp: timestamp(),
        });
        self.stats.total_born += 1;
        self.stats.population = self.alive_count() + 1;
        self.bumbles.push(b);
        Ok(id)
    }

    /// Looks a living bumble up by id. Never mutates.
    #[must_use]
    pub fn select_agent(&self, id: Uuid) -> Option<&Bumble> {
        self.bumbles.iter().find(|b| b.is_alive && b.id() == id)
    }

    /// Applies a partial world configuration. An invalid patch is rejected
    /// whole and the current configuration stays in force.
    pub fn update_config(&mut self, patch: &WorldConfigPatch) -> Result<(), WorldError> {
        self.config
            .apply_patch(patch)
            .map_err(|e| WorldError::InvalidConfig(e.to_string()))?;
        self.env.sync_config(&self.config.world);
        tracing::info!(?patch, "Configuration updated");
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            generation: self.generation,
            is_night: self.env.is_night(),
            running: self.running,
            width: self.config.world.width,
            height: self.config.world.height,
            bumbles: self.bumbles.clone(),
            food: self.food.clone(),
            water: self.water.clone(),
            fires: self.fires.clone(),
            stats: self.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumbles_core::config::AppConfig;

    fn world() -> World {
        let mut config = AppConfig::default();
        config.world.seed = Some(41);
        config.world.max_population = 3;
        World::new(config).unwrap()
    }

    #[test]
    fn test_place_rejects_outside_points() {
        let mut world = world();
        assert_eq!(
            world.place_food(-1.0, 10.0),
            Err(WorldError::OutOfBounds { x: -1.0, y: 10.0 })
        );
        assert!(world.place_fire(10.0, 701.0).is_err());
        assert!(world.place_water(f64::NAN, 1.0).is_err());
        assert!(world.food.is_empty() && world.fires.is_empty() && world.water.is_empty());

        let id = world.place_water(500.0, 350.0).unwrap();
        assert_eq!(world.water[0].id, id);
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut world = world();
        for _ in 0..3 {
            world.spawn_agent(None).unwrap();
        }
        assert_eq!(world.spawn_agent(None), Err(WorldError::PopulationCap(3)));
        assert_eq!(world.bumbles.len(), 3);
        assert_eq!(world.stats.total_born, 3);
    }

    #[test]
    fn test_select_agent_is_a_pure_lookup() {
        let mut world = world();
        let id = world.spawn_agent(Some(Gender::Female)).unwrap();
        let found = world.select_agent(id).map(|b| b.identity.gender);
        assert_eq!(found, Some(Gender::Female));
        assert!(world.select_agent(Uuid::nil()).is_none());
    }

    #[test]
    fn test_invalid_patch_keeps_config() {
        let mut world = world();
        let before = world.config.clone();
        let patch = WorldConfigPatch {
            humidity: Some(250.0),
            ..Default::default()
        };
        assert!(matches!(
            world.update_config(&patch),
            Err(WorldError::InvalidConfig(_))
        ));
        assert_eq!(world.config, before);

        let patch = WorldConfigPatch {
            humidity: Some(80.0),
            night_cycle: Some(false),
            ..Default::default()
        };
        world.update_config(&patch).unwrap();
        assert_eq!(world.env.humidity, 80.0);
        assert!(!world.env.night_cycle);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut world = world();
        world.spawn_agent(None).unwrap();
        world.place_food(10.0, 10.0).unwrap();
        let snap = world.snapshot();
        assert_eq!(snap.bumbles.len(), 1);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"generation\":1"));
    }
}
