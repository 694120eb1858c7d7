//! Route cost projection.
//!
//! The projection replays an agent's whole committed route leg by leg using
//! the BFS estimator:
//!
//! ```text
//! position → cargo[0].client → … → cargo[n-1].client → base → candidate
//! ```
//!
//! Each leg of `d` cells takes `ceil(d / speed)` ticks and needs
//! `ticks × consumption` battery.  When the projected battery could not
//! cover a leg, the projection assumes a full recharge on the way and
//! charges the leg's station count as an extra-stop penalty.  A flat
//! discount per station seen across all legs favours routes with more
//! recharge opportunities.

use fleet_core::Coord;
use fleet_grid::{Grid, estimate};

use fleet_agent::{Agent, PackageStore};

/// Tunable weights of the projection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostWeights {
    /// Cost per projected tick of travel.
    pub distance:         i64,
    /// Cost removed per station seen on the route.
    pub station_discount: i64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self { distance: 10, station_discount: 2 }
    }
}

/// Projected cost for `agent` to finish its cargo, return to base and then
/// deliver to `candidate`.
///
/// `None` if any leg is unreachable for the agent's terrain.
pub fn projected_cost(
    grid:      &Grid,
    agent:     &Agent,
    packages:  &PackageStore,
    candidate: Coord,
    weights:   CostWeights,
) -> Option<i64> {
    let cap     = agent.capability;
    let speed   = cap.speed.max(1);
    let terrain = cap.terrain;

    let stops = agent
        .cargo
        .iter()
        .map(|&id| packages.get(id).client)
        .chain([grid.base(), candidate]);

    let mut cost:     i64 = 0;
    let mut battery:  i64 = agent.battery as i64;
    let mut stations: i64 = 0;
    let mut from = agent.position;

    for to in stops {
        let leg    = estimate(grid, from, to, terrain)?;
        let ticks  = leg.distance.div_ceil(speed) as i64;
        let needed = ticks * cap.consumption as i64;

        cost += ticks * weights.distance;
        if battery <= needed {
            battery = cap.max_battery as i64;
            cost += leg.stations as i64;
        }
        battery  -= needed;
        stations += leg.stations as i64;
        from = to;
    }

    Some(cost - weights.station_discount * stations)
}
