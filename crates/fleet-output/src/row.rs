//! Plain data row types written by output backends.

use fleet_sim::AgentSnapshot;

/// Ledger totals at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub profit:      i64,
    pub delivered:   u64,
    pub dropped:     u64,
    pub dead_agents: u64,
    /// Pool size after the tick.
    pub pending:     u64,
}

/// Terminal state of one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReportRow {
    pub agent_id:    u32,
    pub kind:        &'static str,
    pub row:         u64,
    pub col:         u64,
    pub state:       &'static str,
    pub battery:     u32,
    /// Ids of packages still in the agent's cargo list.
    pub undelivered: Vec<u32>,
}

impl AgentReportRow {
    /// `;`-separated package ids, empty when nothing is left.
    pub fn undelivered_list(&self) -> String {
        self.undelivered.iter().map(u32::to_string).collect::<Vec<_>>().join(";")
    }
}

impl From<&AgentSnapshot> for AgentReportRow {
    fn from(snap: &AgentSnapshot) -> Self {
        Self {
            agent_id:    snap.id.0,
            kind:        snap.kind.as_str(),
            row:         snap.position.row as u64,
            col:         snap.position.col as u64,
            state:       snap.state.as_str(),
            battery:     snap.battery,
            undelivered: snap.undelivered.iter().map(|p| p.0).collect(),
        }
    }
}
