use crate::model::world::{timestamp, World};
use bumbles_core::systems::stats::refresh_stats;
use bumbles_data::LiveEvent;
use std::collections::HashSet;
use uuid::Uuid;

impl World {
    /// End-of-tick bookkeeping: widowed bumbles drop their bond, the dead
    /// are removed and statistics are republished.
    pub fn finalize_tick(&mut self, alive_at_start: usize, events: &mut Vec<LiveEvent>) {
        self.clear_widowed();
        self.bumbles.retain(|b| b.is_alive);

        if alive_at_start > 0 && self.bumbles.is_empty() {
            tracing::info!(tick = self.tick, "Population extinct");
            events.push(LiveEvent::Extinction {
                tick: self.tick,
                timestamp: timestamp(),
            });
        }

        refresh_stats(
            &mut self.stats,
            &self.bumbles,
            &self.food,
            &self.water,
            &self.fires,
            self.generation,
            self.env.is_night(),
        );
    }

    /// Clears `mate_id` on every living bumble whose partner is gone.
    /// Returns how many bonds were dropped.
    pub fn clear_widowed(&mut self) -> usize {
        let living: HashSet<Uuid> = self
            .bumbles
            .iter()
            .filter(|b| b.is_alive)
            .map(|b| b.id())
            .collect();
        let mut widowed = 0;
        for b in self.bumbles.iter_mut().filter(|b| b.is_alive) {
            if b.intel.mate_id.is_some_and(|mate| !living.contains(&mate)) {
                b.intel.mate_id = None;
                widowed += 1;
            }
        }
        widowed
    }
}
