//! Assignment policy seam and the default greedy policy.

use tracing::debug;

use fleet_core::{AgentId, Coord, PackageId};
use fleet_grid::Grid;

use fleet_agent::{Agent, PackageStore};

use crate::cost::{CostWeights, projected_cost};

/// One chosen (package, agent) pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub package: PackageId,
    pub agent:   AgentId,
    /// Projected cost that won the choice.
    pub cost:    i64,
}

/// Pluggable package-to-agent choice.
///
/// `choose` is a pure read; [`dispatch_one`] applies the result.  The
/// `Send + Sync` bound lets a policy score agents on worker threads.
pub trait AssignmentPolicy: Send + Sync {
    /// Pick at most one pooled package and the agent that should take it.
    fn choose(&self, grid: &Grid, agents: &[Agent], packages: &PackageStore) -> Option<Assignment>;
}

// ── GreedyCostPolicy ──────────────────────────────────────────────────────────

/// Oldest serviceable package to the cheapest qualifying agent.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyCostPolicy {
    pub weights: CostWeights,
}

impl GreedyCostPolicy {
    pub fn new(weights: CostWeights) -> Self {
        Self { weights }
    }

    /// `(cost, registration index)` of the cheapest qualifying agent.
    fn cheapest(
        &self,
        grid:     &Grid,
        agents:   &[Agent],
        packages: &PackageStore,
        client:   Coord,
    ) -> Option<(i64, usize)> {
        let score = |(i, agent): (usize, &Agent)| {
            if !agent.can_accept() {
                return None;
            }
            projected_cost(grid, agent, packages, client, self.weights).map(|c| (c, i))
        };

        #[cfg(not(feature = "parallel"))]
        {
            agents.iter().enumerate().filter_map(score).min()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            agents.par_iter().enumerate().filter_map(score).min()
        }
    }
}

impl AssignmentPolicy for GreedyCostPolicy {
    fn choose(&self, grid: &Grid, agents: &[Agent], packages: &PackageStore) -> Option<Assignment> {
        packages.pool().find_map(|package| {
            let client = packages.get(package).client;
            self.cheapest(grid, agents, packages, client)
                .map(|(cost, i)| Assignment { package, agent: agents[i].id, cost })
        })
    }
}

// ── dispatch_one ──────────────────────────────────────────────────────────────

/// Ask `policy` for one assignment and apply it.
///
/// The package leaves the pool, its holder becomes the agent, and its id is
/// appended to the agent's cargo list, all or nothing.  A choice naming a
/// dead or full agent, or a package no longer pooled, is refused and
/// `None` is returned.
pub fn dispatch_one<A: AssignmentPolicy + ?Sized>(
    policy:   &A,
    grid:     &Grid,
    agents:   &mut [Agent],
    packages: &mut PackageStore,
) -> Option<Assignment> {
    let choice = policy.choose(grid, agents, packages)?;

    let agent = agents.iter_mut().find(|a| a.id == choice.agent)?;
    if !agent.can_accept() || !packages.assign(choice.package, choice.agent) {
        return None;
    }
    agent.commit(choice.package);

    debug!(package = %choice.package, agent = %choice.agent, cost = choice.cost, "assigned");
    Some(choice)
}
