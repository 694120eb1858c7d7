//! Fluent builder for constructing a [`Sim`].

use fleet_agent::{Agent, FleetBuilder, PackageStore};
use fleet_core::{AgentId, FleetConfig, Ledger, Tick};
use fleet_dispatch::{AssignmentPolicy, GreedyCostPolicy};
use fleet_grid::{BatteryAStar, Grid, Planner};

use crate::{PackageSpawner, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P, A>`].
///
/// # Required inputs
///
/// - [`FleetConfig`]: tick budget, package quota, spawn interval, seed, …
/// - [`Grid`]: a validated map whose dimensions match the config
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                            |
/// |-----------------|----------------------------------------------------|
/// | `.planner(p)`   | [`BatteryAStar`]                                   |
/// | `.policy(a)`    | [`GreedyCostPolicy::default()`]                    |
/// | `.fleet(v)`     | drones, robots, scooters from the config counts    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, grid)
///     .policy(GreedyCostPolicy::new(weights))
///     .build()?;
/// let report = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: Planner, A: AssignmentPolicy> {
    config:  FleetConfig,
    grid:    Grid,
    planner: P,
    policy:  A,
    fleet:   Option<Vec<Agent>>,
}

impl SimBuilder<BatteryAStar, GreedyCostPolicy> {
    pub fn new(config: FleetConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            planner: BatteryAStar,
            policy:  GreedyCostPolicy::default(),
            fleet:   None,
        }
    }
}

impl<P: Planner, A: AssignmentPolicy> SimBuilder<P, A> {
    /// Replace the path planner.
    pub fn planner<Q: Planner>(self, planner: Q) -> SimBuilder<Q, A> {
        SimBuilder {
            config:  self.config,
            grid:    self.grid,
            planner,
            policy:  self.policy,
            fleet:   self.fleet,
        }
    }

    /// Replace the assignment policy.
    pub fn policy<B: AssignmentPolicy>(self, policy: B) -> SimBuilder<P, B> {
        SimBuilder {
            config:  self.config,
            grid:    self.grid,
            planner: self.planner,
            policy,
            fleet:   self.fleet,
        }
    }

    /// Supply the fleet instead of building it from the config counts.
    ///
    /// Ids must be sequential from 0 in slice order.
    pub fn fleet(mut self, agents: Vec<Agent>) -> Self {
        self.fleet = Some(agents);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`] at tick 0.
    pub fn build(self) -> SimResult<Sim<P, A>> {
        self.config.validate()?;

        if self.grid.rows() != self.config.rows || self.grid.cols() != self.config.columns {
            return Err(SimError::GridMismatch {
                rows:     self.config.rows,
                cols:     self.config.columns,
                got_rows: self.grid.rows(),
                got_cols: self.grid.cols(),
            });
        }

        let agents = match self.fleet {
            Some(agents) => agents,
            None => FleetBuilder::from_counts(
                self.grid.base(),
                self.config.drones,
                self.config.robots,
                self.config.scooters,
            )
            .build(),
        };
        if agents.is_empty() {
            return Err(SimError::NoAgents);
        }
        if let Some((index, agent)) =
            agents.iter().enumerate().find(|(i, a)| a.id != AgentId(*i as u32))
        {
            return Err(SimError::AgentIdMismatch { index, id: agent.id });
        }

        Ok(Sim {
            spawner:  PackageSpawner::new(&self.config),
            config:   self.config,
            grid:     self.grid,
            agents,
            packages: PackageStore::new(),
            ledger:   Ledger::default(),
            planner:  self.planner,
            policy:   self.policy,
            now:      Tick::ZERO,
            report:   None,
        })
    }
}
