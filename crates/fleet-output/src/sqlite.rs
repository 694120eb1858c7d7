//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `tick_summaries` and `agent_report`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentReportRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick        INTEGER PRIMARY KEY,
                 profit      INTEGER NOT NULL,
                 delivered   INTEGER NOT NULL,
                 dropped     INTEGER NOT NULL,
                 dead_agents INTEGER NOT NULL,
                 pending     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_report (
                 agent_id    INTEGER PRIMARY KEY,
                 kind        TEXT    NOT NULL,
                 pos_row     INTEGER NOT NULL,
                 pos_col     INTEGER NOT NULL,
                 state       TEXT    NOT NULL,
                 battery     INTEGER NOT NULL,
                 undelivered TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, profit, delivered, dropped, dead_agents, pending) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick,
                row.profit,
                row.delivered,
                row.dropped,
                row.dead_agents,
                row.pending,
            ],
        )?;
        Ok(())
    }

    fn write_agent_report(&mut self, rows: &[AgentReportRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_report \
                 (agent_id, kind, pos_row, pos_col, state, battery, undelivered) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.kind,
                    row.row,
                    row.col,
                    row.state,
                    row.battery,
                    row.undelivered_list(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
