use crate::model::world::{timestamp, World};
use bumbles_core::lifecycle::{
    age_step, apply_disease_with_rng, apply_fire_damage, apply_metabolism, clamp_vitals,
    evaluate_death_with_rng, kill, Exposure,
};
use bumbles_core::snapshot::InternalBumbleSnapshot;
use bumbles_core::systems::behavior::{
    apply_drains, update_behavior_with_rng, BehaviorContext, Drain,
};
use bumbles_core::systems::environment::{
    update_fires_with_rng, update_food_with_rng, update_water,
};
use bumbles_core::systems::mating::run_mating_with_rng;
use bumbles_data::{Fire, LiveEvent};
use std::time::Instant;

impl World {
    /// Advances the simulation by one tick of `raw_dt_ms` wall-clock time.
    ///
    /// The elapsed time is clamped to `max_delta_ms` and then scaled by the
    /// speed multiplier; a NaN or infinite delta counts as zero. Stages run in a fixed order:
    /// - day/night clock
    /// - behavior, aging, metabolism, fire and disease for every bumble,
    ///   reading food, water, fires and other bumbles as they stood when
    ///   the tick began
    /// - deferred vampire drains, then death evaluation
    /// - mating over the survivors, offspring appended, generation check
    /// - fires, then food, then water
    /// - widow cleanup, removal of the dead, statistics
    ///
    /// A paused world does nothing and returns no events.
    pub fn tick(&mut self, raw_dt_ms: f64) -> anyhow::Result<Vec<LiveEvent>> {
        if !self.running {
            return Ok(Vec::new());
        }
        let started = Instant::now();
        let mut events = std::mem::take(&mut self.pending_events);

        self.tick += 1;
        let world = &self.config.world;
        let raw_dt_ms = if raw_dt_ms.is_finite() {
            raw_dt_ms
        } else {
            tracing::warn!(raw_dt_ms, "Non-finite tick delta treated as zero");
            0.0
        };
        let dt = raw_dt_ms.clamp(0.0, world.max_delta_ms) * world.simulation_speed;

        self.env.sync_config(&self.config.world);
        self.env.tick(dt);
        let fires_at_start = self.fires.clone();
        let alive_at_start = self.alive_count();

        self.capture_snapshots();
        let exposures = self.pass_agents(dt);
        self.pass_deaths(&exposures, &mut events);
        self.pass_mating(&mut events);
        self.pass_environment(&fires_at_start, dt, &mut events);

        self.finalize_tick(alive_at_start, &mut events);
        self.metrics
            .record_tick(started.elapsed(), self.bumbles.len(), self.food.len());
        Ok(events)
    }

    fn capture_snapshots(&mut self) {
        self.snapshots.clear();
        self.snapshots
            .extend(self.bumbles.iter().map(InternalBumbleSnapshot::from));
        self.rebuild_index();
    }

    /// Behavior and lifecycle for every living bumble. Returns what each one
    /// was exposed to, by index.
    fn pass_agents(&mut self, dt: f64) -> Vec<Exposure> {
        let mut exposures = vec![Exposure::default(); self.bumbles.len()];
        let mut drains: Vec<Drain> = Vec::new();
        let (mut eaten, mut drunk) = (0.0, 0.0);

        let ctx = BehaviorContext {
            env: &self.env,
            config: &self.config,
            food: &self.food,
            water: &self.water,
            fires: &self.fires,
            snapshots: &self.snapshots,
            spatial_hash: &self.spatial_hash,
            dt_ms: dt,
        };
        let disease_rate = self.config.world.disease_rate;

        for (idx, b) in self.bumbles.iter_mut().enumerate() {
            if !b.is_alive {
                continue;
            }
            let output = update_behavior_with_rng(b, idx, &ctx, &mut self.rng);
            drains.extend(output.drain);
            eaten += output.food_eaten;
            drunk += output.water_drunk;

            age_step(b, dt);
            apply_metabolism(b, dt);
            exposures[idx].burned = apply_fire_damage(b, ctx.fires, dt) > 0.0;
            exposures[idx].sickened = apply_disease_with_rng(b, disease_rate, &mut self.rng);
            clamp_vitals(b);
        }

        let drained = apply_drains(&mut self.bumbles, &drains);
        if drained > 0.0 {
            tracing::trace!(bites = drains.len(), drained, "Vampire drains settled");
        }

        self.metrics.add_to_counter("food_eaten", eaten.round() as u64);
        self.metrics.add_to_counter("water_drunk", drunk.round() as u64);
        exposures
    }

    fn pass_deaths(&mut self, exposures: &[Exposure], events: &mut Vec<LiveEvent>) {
        let population = self.alive_count();
        for (idx, b) in self.bumbles.iter_mut().enumerate() {
            let exposure = exposures.get(idx).copied().unwrap_or_default();
            let Some(cause) =
                evaluate_death_with_rng(b, population, exposure, &self.config, &mut self.rng)
            else {
                continue;
            };
            if !kill(b, &mut self.names) {
                continue;
            }
            self.stats.deaths.record(cause);
            self.stats.total_deaths += 1;
            self.metrics.increment_counter("deaths");
            tracing::debug!(name = %b.identity.name, %cause, age_ms = b.vitals.age, "Bumble died");
            events.push(LiveEvent::Death {
                id: b.id(),
                name: b.identity.name.clone(),
                age_ms: b.vitals.age,
                tick: self.tick,
                timestamp: timestamp(),
                cause,
                x: b.physics.x,
                y: b.physics.y,
            });
        }
    }

    fn pass_mating(&mut self, events: &mut Vec<LiveEvent>) {
        self.rebuild_index();
        let offspring = run_mating_with_rng(
            &mut self.bumbles,
            &self.spatial_hash,
            &self.config,
            &mut self.names,
            &mut self.rng,
        );
        if offspring.is_empty() {
            return;
        }

        for child in &offspring {
            tracing::debug!(name = %child.identity.name, gen = child.identity.generation, "Bumble born");
            events.push(LiveEvent::Birth {
                id: child.id(),
                name: child.identity.name.clone(),
                parent_ids: child.identity.parent_ids,
                gen: child.identity.generation,
                tick: self.tick,
                timestamp: timestamp(),
            });
        }
        self.stats.total_born += offspring.len() as u64;
        self.metrics
            .add_to_counter("births", offspring.len() as u64);
        self.bumbles.extend(offspring);

        let current = self.generation;
        let elders_remain = self
            .bumbles
            .iter()
            .any(|b| b.is_alive && b.identity.generation == current);
        if !elders_remain {
            self.generation += 1;
            tracing::info!(from = current, to = self.generation, "Generation advanced");
            events.push(LiveEvent::GenerationAdvanced {
                from: current,
                to: self.generation,
                tick: self.tick,
                timestamp: timestamp(),
            });
        }
    }

    /// `fires_at_start` feeds the food stage so regrowth sees the same fires
    /// the bumbles saw.
    fn pass_environment(&mut self, fires_at_start: &[Fire], dt: f64, events: &mut Vec<LiveEvent>) {
        let ignitions = update_fires_with_rng(
            &mut self.fires,
            &self.food,
            &self.water,
            &self.config.ecology,
            dt,
            &mut self.rng,
        );
        for spark in ignitions {
            tracing::debug!(x = spark.x, y = spark.y, "Fire spread");
            events.push(LiveEvent::FireSpread {
                source: spark.source,
                id: spark.fire,
                tick: self.tick,
                timestamp: timestamp(),
                x: spark.x,
                y: spark.y,
            });
        }

        self.stats.total_food_consumed += update_food_with_rng(
            &mut self.food,
            fires_at_start,
            &self.bumbles,
            &self.spatial_hash,
            &self.env,
            &self.config.world,
            &self.config.ecology,
            dt,
            &mut self.rng,
        );
        self.stats.total_water_consumed +=
            update_water(&mut self.water, &self.bumbles, &self.spatial_hash, dt);
    }
}
