//! The simulation parameter set.

use std::ops::RangeInclusive;

use crate::{FleetError, FleetResult, Tick};

/// Top-level simulation parameters.
///
/// Grid dimensions and the station/client counts describe the map the
/// generator should build; the engine only checks that the grid it receives
/// has matching dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    pub rows:    usize,
    pub columns: usize,

    /// Tick budget.  The run covers ticks `1..=max_ticks` at most.
    pub max_ticks: u64,

    pub stations: usize,
    pub clients:  usize,

    pub drones:   usize,
    pub robots:   usize,
    pub scooters: usize,

    /// Total packages that will ever be spawned.
    pub total_packages: usize,

    /// A package spawns on every tick that is a multiple of this value.
    pub spawn_interval: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Reward drawn uniformly from this range at spawn.
    pub reward_range: RangeInclusive<u32>,

    /// Deadline (ticks allowed since creation) drawn uniformly at spawn.
    pub deadline_range: RangeInclusive<u64>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            rows:           20,
            columns:        20,
            max_ticks:      1_000,
            stations:       3,
            clients:        10,
            drones:         3,
            robots:         2,
            scooters:       2,
            total_packages: 50,
            spawn_interval: 10,
            seed:           42,
            reward_range:   200..=800,
            deadline_range: 10..=20,
        }
    }
}

impl FleetConfig {
    /// Number of agents across all kinds.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.drones + self.robots + self.scooters
    }

    /// The last tick the run may execute.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// Reject parameter sets the engine cannot run.
    pub fn validate(&self) -> FleetResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(FleetError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.spawn_interval == 0 {
            return Err(FleetError::Config("spawn_interval must be at least 1".into()));
        }
        if self.reward_range.is_empty() {
            return Err(FleetError::Config(format!(
                "reward_range {:?} is empty",
                self.reward_range
            )));
        }
        if *self.reward_range.start() == 0 {
            return Err(FleetError::Config("rewards must be positive".into()));
        }
        if self.deadline_range.is_empty() {
            return Err(FleetError::Config(format!(
                "deadline_range {:?} is empty",
                self.deadline_range
            )));
        }
        // Base + stations + clients must fit on the map.
        let special = 1 + self.stations + self.clients;
        if special > self.rows * self.columns {
            return Err(FleetError::Config(format!(
                "{special} special cells do not fit on a {}x{} grid",
                self.rows, self.columns
            )));
        }
        Ok(())
    }
}
