//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use fleet_core::{Ledger, Tick};
use fleet_sim::{SimObserver, SimReport};

use crate::row::{AgentReportRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and the final agent report
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    /// Write a summary row every `interval` ticks.
    interval:   u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// An observer that records every tick.
    pub fn new(writer: W) -> Self {
        Self { writer, interval: 1, last_error: None }
    }

    /// Record only ticks that are multiples of `interval` (0 disables tick
    /// summaries).
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, ledger: &Ledger, pending: usize) {
        if !tick.is_multiple_of(self.interval) {
            return;
        }
        let row = TickSummaryRow {
            tick:        tick.0,
            profit:      ledger.profit,
            delivered:   ledger.delivered,
            dropped:     ledger.dropped,
            dead_agents: ledger.dead_agents,
            pending:     pending as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        let rows: Vec<AgentReportRow> = report.agents.iter().map(AgentReportRow::from).collect();
        let result = self.writer.write_agent_report(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
