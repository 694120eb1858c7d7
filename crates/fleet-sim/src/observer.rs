//! Simulation observer trait for progress reporting and data collection.

use fleet_agent::Package;
use fleet_core::{Ledger, Tick};
use fleet_dispatch::Assignment;

use crate::SimReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, ledger: &Ledger, pending: usize) {
///         if tick.is_multiple_of(self.interval) {
///             println!("{tick}: profit {} with {pending} waiting", ledger.profit);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before spawning.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when a new package joins the pool.
    fn on_package_spawned(&mut self, _tick: Tick, _package: &Package) {}

    /// Called after each successful assignment.
    fn on_assignment(&mut self, _tick: Tick, _assignment: &Assignment) {}

    /// Called after every agent has advanced.
    ///
    /// `pending` is the pool size at the end of the tick.
    fn on_tick_end(&mut self, _tick: Tick, _ledger: &Ledger, _pending: usize) {}

    /// Called once with the final report.
    fn on_sim_end(&mut self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
