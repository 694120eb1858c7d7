//! The `Sim` struct and its tick loop.

use tracing::{info, trace};

use fleet_agent::{Agent, PackageCensus, PackageStore, TickContext};
use fleet_core::ledger::UNDELIVERED_PENALTY;
use fleet_core::{FleetConfig, Ledger, Tick};
use fleet_dispatch::{AssignmentPolicy, dispatch_one};
use fleet_grid::{Grid, Planner};

use crate::{PackageSpawner, SimObserver, SimReport};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P, A>` owns all run state and drives the three-phase tick loop
/// (spawn, assign, advance).  Ticks are numbered from 1; tick 0 is the
/// initial state.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Planner, A: AssignmentPolicy> {
    pub config: FleetConfig,

    /// Immutable after construction; shared by reference each tick.
    pub grid: Grid,

    /// The fleet in registration order.  `agents[i].id == AgentId(i)`.
    pub agents: Vec<Agent>,

    /// Every package spawned so far, plus the base pool.
    pub packages: PackageStore,

    pub ledger: Ledger,

    pub planner: P,
    pub policy:  A,

    pub(crate) spawner: PackageSpawner,

    /// Last tick executed.
    pub(crate) now: Tick,

    pub(crate) report: Option<SimReport>,
}

impl<P: Planner, A: AssignmentPolicy> Sim<P, A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a termination condition holds, then [`finish`](Self::finish).
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimReport {
        info!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            agents = self.agents.len(),
            packages = self.config.total_packages,
            max_ticks = self.config.max_ticks,
            "simulation start"
        );
        while !self.is_done() {
            self.step(observer);
        }
        self.finish(observer)
    }

    /// Execute exactly one tick, ignoring the termination conditions.
    ///
    /// Returns the tick just executed.  Useful for tests and incremental
    /// stepping.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> Tick {
        let now = self.now.next();
        self.process_tick(now, observer);
        self.now = now;
        now
    }

    /// `true` once the tick budget is spent, every package is resolved, or
    /// every agent is dead.
    pub fn is_done(&self) -> bool {
        self.now >= self.config.end_tick()
            || self.ledger.resolved() >= self.config.total_packages as u64
            || self.agents.iter().all(|a| !a.is_alive())
    }

    /// Last tick executed (`Tick(0)` before the first step).
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.now
    }

    pub fn package_census(&self) -> PackageCensus {
        self.packages.census()
    }

    /// Close the run: committed-but-unloaded cargo of live agents goes back
    /// to the pool and every pooled package is charged the undelivered
    /// penalty.
    ///
    /// Idempotent; later calls return the first report without touching the
    /// ledger again.
    pub fn finish<O: SimObserver>(&mut self, observer: &mut O) -> SimReport {
        if let Some(report) = &self.report {
            return report.clone();
        }

        for agent in self.agents.iter_mut().filter(|a| a.is_alive()) {
            agent.release_unloaded(&mut self.packages);
        }
        let unassigned = self.packages.pool_len() as i64;
        self.ledger.profit += UNDELIVERED_PENALTY * unassigned;

        let report = SimReport::new(self.now, &self.ledger, &self.agents, &self.packages);
        info!(
            tick = %report.final_tick,
            profit = report.profit,
            delivered = report.delivered,
            late = report.late,
            dropped = report.dropped,
            dead_agents = report.dead_agents,
            unassigned = report.unassigned,
            "simulation end"
        );
        observer.on_sim_end(&report);
        self.report = Some(report.clone());
        report
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        observer.on_tick_start(now);

        // ── Phase 1: spawn ────────────────────────────────────────────────
        if let Some(id) = self.spawner.spawn(now, &self.grid, &mut self.packages) {
            observer.on_package_spawned(now, self.packages.get(id));
        }

        // ── Phase 2: assign ───────────────────────────────────────────────
        //
        // Bounded by the pool size at the start of the phase; each call
        // removes at most one package.
        for _ in 0..self.packages.pool_len() {
            match dispatch_one(&self.policy, &self.grid, &mut self.agents, &mut self.packages) {
                Some(assignment) => observer.on_assignment(now, &assignment),
                None => break,
            }
        }

        // ── Phase 3: advance agents in registration order ─────────────────
        let ctx = TickContext::new(&self.grid, &self.planner, now);
        for agent in &mut self.agents {
            let delta = agent.tick(&ctx, &mut self.packages);
            self.ledger.apply(&delta);
        }

        trace!(
            tick = %now,
            profit = self.ledger.profit,
            delivered = self.ledger.delivered,
            dropped = self.ledger.dropped,
            pending = self.packages.pool_len(),
            "tick"
        );
        observer.on_tick_end(now, &self.ledger, self.packages.pool_len());
    }
}
