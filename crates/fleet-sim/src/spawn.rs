//! Periodic package generation.

use std::ops::RangeInclusive;

use tracing::debug;

use fleet_agent::PackageStore;
use fleet_core::{FleetConfig, PackageId, SimRng, Tick};
use fleet_grid::Grid;

/// Emits one package every `spawn_interval` ticks until `total_packages`
/// have been created.
///
/// Client, reward and deadline are drawn from one seeded stream in that
/// order, so the sequence of packages depends only on the seed and the
/// client list.
pub struct PackageSpawner {
    rng:       SimRng,
    rewards:   RangeInclusive<u32>,
    deadlines: RangeInclusive<u64>,
    interval:  u64,
    total:     usize,
    spawned:   usize,
}

impl PackageSpawner {
    pub fn new(config: &FleetConfig) -> Self {
        Self {
            rng:       SimRng::new(config.seed),
            rewards:   config.reward_range.clone(),
            deadlines: config.deadline_range.clone(),
            interval:  config.spawn_interval,
            total:     config.total_packages,
            spawned:   0,
        }
    }

    #[inline]
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.total - self.spawned
    }

    /// `true` if `now` is a spawn tick and the quota is not used up.
    pub fn is_due(&self, now: Tick) -> bool {
        self.spawned < self.total && now.is_multiple_of(self.interval)
    }

    /// Spawn into `packages` if due.  A grid without clients spawns nothing.
    pub fn spawn(&mut self, now: Tick, grid: &Grid, packages: &mut PackageStore) -> Option<PackageId> {
        if !self.is_due(now) {
            return None;
        }
        let client   = *self.rng.choose(grid.clients())?;
        let reward   = self.rng.gen_range(self.rewards.clone());
        let deadline = self.rng.gen_range(self.deadlines.clone());

        let id = packages.spawn(client, reward, deadline, now);
        self.spawned += 1;
        debug!(package = %id, tick = %now, client = %client, reward, deadline, "spawned");
        Some(id)
    }
}
