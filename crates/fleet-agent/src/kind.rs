//! Agent kinds and their capability presets.

use fleet_grid::Terrain;

/// The fixed bundle of numbers that distinguishes one agent kind from
/// another.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capability {
    pub terrain:     Terrain,
    /// Grid steps per tick.
    pub speed:       u32,
    pub max_battery: u32,
    /// Battery spent per moving tick, covering up to `speed` steps.
    pub consumption: u32,
    /// Operating cost charged to the ledger every tick the agent is alive.
    pub cost:        u32,
    /// Maximum packages in the cargo list (carried + committed).
    pub capacity:    usize,
}

impl Capability {
    /// Charge gained per recharge event: a quarter of the maximum, at least 1.
    #[inline]
    pub fn recharge_increment(&self) -> u32 {
        (self.max_battery / 4).max(1)
    }

    /// At or below a quarter of the maximum.
    #[inline]
    pub fn is_critical(&self, battery: u32) -> bool {
        (battery as u64) * 100 <= 25 * self.max_battery as u64
    }
}

/// The three agent kinds of a fleet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    /// Fast, fragile flyer; ignores walls and carries one package.
    Drone,
    /// Slow ground robot with a large battery and cargo bay.
    Robot,
    /// Middle ground.
    Scooter,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Drone, AgentKind::Robot, AgentKind::Scooter];

    /// The preset capability for this kind.
    pub fn capability(self) -> Capability {
        match self {
            AgentKind::Drone => Capability {
                terrain:     Terrain::Air,
                speed:       3,
                max_battery: 100,
                consumption: 10,
                cost:        15,
                capacity:    1,
            },
            AgentKind::Robot => Capability {
                terrain:     Terrain::Ground,
                speed:       1,
                max_battery: 300,
                consumption: 2,
                cost:        1,
                capacity:    4,
            },
            AgentKind::Scooter => Capability {
                terrain:     Terrain::Ground,
                speed:       2,
                max_battery: 200,
                consumption: 5,
                cost:        4,
                capacity:    2,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Drone   => "drone",
            AgentKind::Robot   => "robot",
            AgentKind::Scooter => "scooter",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
