//! Fleet construction.

use fleet_core::{AgentId, Coord};

use crate::{Agent, AgentKind, Capability};

/// Builds a fleet with sequential ids in insertion order, every agent fully
/// charged at the base.
///
/// ```rust,ignore
/// let fleet = FleetBuilder::new(grid.base())
///     .add(AgentKind::Drone, 3)
///     .add(AgentKind::Robot, 2)
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct FleetBuilder {
    base:    Coord,
    members: Vec<(AgentKind, Capability)>,
}

impl FleetBuilder {
    pub fn new(base: Coord) -> Self {
        Self { base, members: Vec::new() }
    }

    /// Drones first, then robots, then scooters.
    pub fn from_counts(base: Coord, drones: usize, robots: usize, scooters: usize) -> Self {
        Self::new(base)
            .add(AgentKind::Drone, drones)
            .add(AgentKind::Robot, robots)
            .add(AgentKind::Scooter, scooters)
    }

    /// Append `count` agents with the preset capability of `kind`.
    pub fn add(self, kind: AgentKind, count: usize) -> Self {
        self.add_custom(kind, kind.capability(), count)
    }

    /// Append `count` agents with an explicit capability.
    pub fn add_custom(mut self, kind: AgentKind, capability: Capability, count: usize) -> Self {
        self.members.extend(std::iter::repeat_n((kind, capability), count));
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn build(self) -> Vec<Agent> {
        self.members
            .into_iter()
            .enumerate()
            .map(|(i, (kind, cap))| Agent::with_capability(AgentId(i as u32), kind, cap, self.base))
            .collect()
    }
}
