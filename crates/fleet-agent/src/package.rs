//! Packages and the store that owns them.
//!
//! Every package is in exactly one place at a time, and the store is the only
//! type that moves packages between places:
//!
//! ```text
//!   spawn ──▶ Pool ──assign──▶ Agent(id) ──deliver──▶ Delivered
//!              ▲                  │  │
//!              └────release───────┘  └──mark_dropped──▶ Dropped
//! ```
//!
//! `release` is only legal while the package is still [`Location::AtBase`];
//! once picked up a package either reaches its client or is lost.

use std::collections::VecDeque;

use fleet_core::{AgentId, Coord, PackageId, Tick};

// ── Package ───────────────────────────────────────────────────────────────────

/// Physical position of a package that has not reached a terminal outcome.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// Waiting at the base (in the pool, or committed but not yet loaded).
    #[default]
    AtBase,
    /// Loaded onto the holding agent.
    WithAgent,
}

/// Logical owner of a package.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Holder {
    /// In the base's pending queue.
    #[default]
    Pool,
    /// In this agent's cargo list.
    Agent(AgentId),
    Delivered,
    Dropped,
}

impl Holder {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Holder::Delivered | Holder::Dropped)
    }
}

/// A delivery request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub id:       PackageId,
    /// Destination client cell.
    pub client:   Coord,
    pub reward:   u32,
    /// Ticks after `created` before delivery counts as late.
    pub deadline: u64,
    pub created:  Tick,
    pub location: Location,
    pub holder:   Holder,
}

impl Package {
    /// Delivery at `now` would be late.
    #[inline]
    pub fn is_late(&self, now: Tick) -> bool {
        now.since(self.created) > self.deadline
    }
}

// ── PackageCensus ─────────────────────────────────────────────────────────────

/// Where every spawned package currently is.
///
/// `pool + committed + carried + delivered + dropped == spawned` at all times.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageCensus {
    pub spawned:   usize,
    pub pool:      usize,
    /// Assigned to an agent but still at the base.
    pub committed: usize,
    /// Loaded onto an agent.
    pub carried:   usize,
    pub delivered: usize,
    pub dropped:   usize,
}

impl PackageCensus {
    /// `true` when every spawned package is accounted for exactly once.
    pub fn is_conserved(&self) -> bool {
        self.pool + self.committed + self.carried + self.delivered + self.dropped == self.spawned
    }
}

// ── PackageStore ──────────────────────────────────────────────────────────────

/// Owns every package of a run plus the base's FIFO pool.
///
/// Ids are dense and issued in spawn order, so `PackageId(n)` is always the
/// n-th spawned package.
#[derive(Clone, Debug, Default)]
pub struct PackageStore {
    packages: Vec<Package>,
    pool:     VecDeque<PackageId>,
}

impl PackageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a package at the base and queue it at the back of the pool.
    pub fn spawn(&mut self, client: Coord, reward: u32, deadline: u64, now: Tick) -> PackageId {
        let id = PackageId(self.packages.len() as u32);
        self.packages.push(Package {
            id,
            client,
            reward,
            deadline,
            created:  now,
            location: Location::AtBase,
            holder:   Holder::Pool,
        });
        self.pool.push_back(id);
        id
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this store.
    #[inline]
    pub fn get(&self, id: PackageId) -> &Package {
        &self.packages[id.index()]
    }

    /// Total packages ever spawned.
    #[inline]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    /// Pending packages, oldest first.
    pub fn pool(&self) -> impl ExactSizeIterator<Item = PackageId> + '_ {
        self.pool.iter().copied()
    }

    #[inline]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Move a pooled package to `agent`.  Returns `false` (and changes
    /// nothing) if the package is not in the pool.
    pub fn assign(&mut self, id: PackageId, agent: AgentId) -> bool {
        let Some(pos) = self.pool.iter().position(|&p| p == id) else {
            return false;
        };
        self.pool.remove(pos);
        self.packages[id.index()].holder = Holder::Agent(agent);
        true
    }

    /// Load a committed package.  Returns `true` if it was at the base.
    pub fn pick_up(&mut self, id: PackageId) -> bool {
        let pkg = &mut self.packages[id.index()];
        if pkg.location == Location::AtBase && matches!(pkg.holder, Holder::Agent(_)) {
            pkg.location = Location::WithAgent;
            true
        } else {
            false
        }
    }

    pub fn mark_delivered(&mut self, id: PackageId) {
        self.packages[id.index()].holder = Holder::Delivered;
    }

    pub fn mark_dropped(&mut self, id: PackageId) {
        self.packages[id.index()].holder = Holder::Dropped;
    }

    /// Hand a committed, never-loaded package back to the back of the pool.
    /// Returns `false` if the package has already been picked up.
    pub fn release(&mut self, id: PackageId) -> bool {
        let pkg = &mut self.packages[id.index()];
        if pkg.location != Location::AtBase || !matches!(pkg.holder, Holder::Agent(_)) {
            return false;
        }
        pkg.holder = Holder::Pool;
        self.pool.push_back(id);
        true
    }

    pub fn census(&self) -> PackageCensus {
        let mut census = PackageCensus { spawned: self.packages.len(), ..Default::default() };
        for pkg in &self.packages {
            match (pkg.holder, pkg.location) {
                (Holder::Pool, _)                         => census.pool += 1,
                (Holder::Agent(_), Location::AtBase)      => census.committed += 1,
                (Holder::Agent(_), Location::WithAgent)   => census.carried += 1,
                (Holder::Delivered, _)                    => census.delivered += 1,
                (Holder::Dropped, _)                      => census.dropped += 1,
            }
        }
        census
    }
}
