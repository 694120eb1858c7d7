//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `agent_report.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentReportRow, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    agents:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "profit", "delivered", "dropped", "dead_agents", "pending"])?;

        let mut agents = Writer::from_path(dir.join("agent_report.csv"))?;
        agents.write_record(["agent_id", "kind", "row", "col", "state", "battery", "undelivered"])?;

        Ok(Self { summaries, agents, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.profit.to_string(),
            row.delivered.to_string(),
            row.dropped.to_string(),
            row.dead_agents.to_string(),
            row.pending.to_string(),
        ])?;
        Ok(())
    }

    fn write_agent_report(&mut self, rows: &[AgentReportRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.agent_id.to_string(),
                row.kind.to_string(),
                row.row.to_string(),
                row.col.to_string(),
                row.state.to_string(),
                row.battery.to_string(),
                row.undelivered_list(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.agents.flush()?;
        Ok(())
    }
}
