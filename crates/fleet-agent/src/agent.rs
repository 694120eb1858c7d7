//! The delivery agent.

use std::collections::VecDeque;

use fleet_core::{AgentId, Coord, PackageId};
use fleet_grid::BatteryProfile;

use crate::package::{Location, PackageStore};
use crate::{AgentKind, Capability};

/// Lifecycle state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// Stationary with nothing to do.
    #[default]
    Idle,
    /// Following a path.
    Moving,
    /// Parked on a base or station cell until the battery is full.
    Charging,
    /// Battery exhausted.  Terminal: a dead agent never acts again.
    Dead,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Idle     => "idle",
            AgentState::Moving   => "moving",
            AgentState::Charging => "charging",
            AgentState::Dead     => "dead",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member of the fleet.
///
/// `cargo` lists both loaded packages and packages committed to this agent
/// but still at the base, in assignment order.  Its length never exceeds
/// `capability.capacity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    pub id:         AgentId,
    pub kind:       AgentKind,
    pub capability: Capability,
    pub position:   Coord,
    pub battery:    u32,
    pub state:      AgentState,
    /// Remaining route; the front is the next cell to enter.
    pub path:       VecDeque<Coord>,
    pub cargo:      Vec<PackageId>,
}

impl Agent {
    /// A fully charged, idle agent with the preset capability of `kind`.
    pub fn new(id: AgentId, kind: AgentKind, at: Coord) -> Self {
        Self::with_capability(id, kind, kind.capability(), at)
    }

    pub fn with_capability(id: AgentId, kind: AgentKind, capability: Capability, at: Coord) -> Self {
        Self {
            id,
            kind,
            capability,
            position: at,
            battery:  capability.max_battery,
            state:    AgentState::Idle,
            path:     VecDeque::new(),
            cargo:    Vec::new(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state != AgentState::Dead
    }

    /// Alive and with a free cargo slot.
    #[inline]
    pub fn can_accept(&self) -> bool {
        self.is_alive() && self.cargo.len() < self.capability.capacity
    }

    #[inline]
    pub fn is_battery_critical(&self) -> bool {
        self.capability.is_critical(self.battery)
    }

    /// Search parameters for a route starting from the current state.
    pub fn battery_profile(&self) -> BatteryProfile {
        BatteryProfile {
            terrain:     self.capability.terrain,
            max_battery: self.capability.max_battery,
            battery:     self.battery,
            consumption: self.capability.consumption,
            speed:       self.capability.speed,
            recharge:    self.capability.recharge_increment(),
        }
    }

    /// Add one recharge increment, capped at the maximum.
    pub fn recharge(&mut self) {
        let max = self.capability.max_battery;
        self.battery = self.battery.saturating_add(self.capability.recharge_increment()).min(max);
    }

    /// Commit a package to this agent.  The caller has already moved it out
    /// of the pool.
    pub fn commit(&mut self, id: PackageId) {
        debug_assert!(self.cargo.len() < self.capability.capacity);
        self.cargo.push(id);
    }

    /// Oldest cargo entry that is actually loaded.
    pub fn first_carried(&self, packages: &PackageStore) -> Option<PackageId> {
        self.cargo
            .iter()
            .copied()
            .find(|&id| packages.get(id).location == Location::WithAgent)
    }

    /// Number of loaded packages.
    pub fn carried_count(&self, packages: &PackageStore) -> usize {
        self.cargo
            .iter()
            .filter(|&&id| packages.get(id).location == Location::WithAgent)
            .count()
    }

    /// Load every committed package still at the base.  Returns how many
    /// were loaded.
    pub fn pick_up(&mut self, packages: &mut PackageStore) -> u32 {
        let mut loaded = 0;
        for &id in &self.cargo {
            if packages.pick_up(id) {
                loaded += 1;
            }
        }
        loaded
    }

    /// Return every committed-but-unloaded package to the pool and drop it
    /// from the cargo list.  Returns how many were released.
    pub fn release_unloaded(&mut self, packages: &mut PackageStore) -> u32 {
        let mut released = 0;
        self.cargo.retain(|&id| {
            if packages.release(id) {
                released += 1;
                false
            } else {
                true
            }
        });
        released
    }

    pub(crate) fn set_path(&mut self, path: Vec<Coord>) {
        self.path = VecDeque::from(path);
    }
}
