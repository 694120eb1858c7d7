//! Profit ledger.
//!
//! Agents never touch shared counters: each lifecycle step returns a
//! [`LedgerDelta`] and the simulation clock folds it into the run's
//! [`Ledger`].

/// Applied once when an agent's battery is exhausted.
pub const DEATH_PENALTY: i64 = -500;

/// Applied per package that is dropped or still undelivered at end of run.
pub const UNDELIVERED_PENALTY: i64 = -200;

/// Added on top of the reward when a package arrives after its deadline.
pub const LATE_PENALTY: i64 = -50;

/// Ledger effect of one agent's tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerDelta {
    pub profit:    i64,
    pub delivered: u32,
    /// Subset of `delivered` that arrived after the deadline.
    pub late:      u32,
    pub dropped:   u32,
    /// Assigned-but-never-picked-up packages handed back to the pool.
    pub returned:  u32,
    pub died:      bool,
}

impl LedgerDelta {
    /// `true` when applying this delta would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == LedgerDelta::default()
    }
}

/// Running totals for a whole simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ledger {
    pub profit:      i64,
    pub delivered:   u64,
    pub late:        u64,
    pub dropped:     u64,
    pub dead_agents: u64,
}

impl Ledger {
    /// Fold one agent's tick result into the totals.
    pub fn apply(&mut self, delta: &LedgerDelta) {
        self.profit    += delta.profit;
        self.delivered += delta.delivered as u64;
        self.late      += delta.late as u64;
        self.dropped   += delta.dropped as u64;
        if delta.died {
            self.dead_agents += 1;
        }
    }

    /// Packages that reached a terminal outcome (delivered or lost).
    #[inline]
    pub fn resolved(&self) -> u64 {
        self.delivered + self.dropped
    }
}
