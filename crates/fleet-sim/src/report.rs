//! End-of-run report.

use fleet_agent::{Agent, AgentKind, AgentState, PackageStore};
use fleet_core::{AgentId, Coord, Ledger, PackageId, Tick};

/// Terminal state of one agent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub id:          AgentId,
    pub kind:        AgentKind,
    pub position:    Coord,
    pub state:       AgentState,
    pub battery:     u32,
    /// Packages still in the cargo list.
    pub undelivered: Vec<PackageId>,
}

impl AgentSnapshot {
    pub fn of(agent: &Agent) -> Self {
        Self {
            id:          agent.id,
            kind:        agent.kind,
            position:    agent.position,
            state:       agent.state,
            battery:     agent.battery,
            undelivered: agent.cargo.clone(),
        }
    }
}

/// Outcome of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimReport {
    /// Last tick executed.
    pub final_tick:  Tick,
    pub profit:      i64,
    pub delivered:   u64,
    pub late:        u64,
    pub dropped:     u64,
    pub dead_agents: u64,
    /// Packages left in the pool when the run ended.
    pub unassigned:  u64,
    pub spawned:     u64,
    pub agents:      Vec<AgentSnapshot>,
}

impl SimReport {
    pub(crate) fn new(final_tick: Tick, ledger: &Ledger, agents: &[Agent], packages: &PackageStore) -> Self {
        Self {
            final_tick,
            profit:      ledger.profit,
            delivered:   ledger.delivered,
            late:        ledger.late,
            dropped:     ledger.dropped,
            dead_agents: ledger.dead_agents,
            unassigned:  packages.pool_len() as u64,
            spawned:     packages.len() as u64,
            agents:      agents.iter().map(AgentSnapshot::of).collect(),
        }
    }
}
