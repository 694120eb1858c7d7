//! Battery-agnostic route estimation for assignment scoring.
//!
//! Scoring every (agent × package) pair with the full battery-aware planner
//! would be wasteful, so the assignment policy uses this breadth-first
//! search over passability alone.
//!
//! Besides the step distance it reports how many base/station cells were
//! discovered while searching.  That counts the explored frontier, not the
//! cells on the eventual shortest path, so it is only a rough density hint.

use std::collections::VecDeque;

use fleet_core::Coord;
use fleet_core::coord::SNEW;

use crate::{Grid, Terrain};

/// Result of a successful [`estimate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteEstimate {
    /// Shortest step count ignoring battery.
    pub distance: u32,
    /// Base/station cells discovered before the goal was reached.
    pub stations: u32,
}

/// Breadth-first distance from `from` to `to` for an agent of `terrain`.
///
/// Returns `None` when no passable route exists.  Neighbours are expanded
/// south, north, east, west; a recharge cell is counted when first
/// discovered.  The start cell is never counted.
pub fn estimate(grid: &Grid, from: Coord, to: Coord, terrain: Terrain) -> Option<RouteEstimate> {
    if !grid.contains(from) || !grid.contains(to) {
        return None;
    }

    let mut visited = vec![false; grid.cell_count()];
    let mut queue: VecDeque<(Coord, u32)> = VecDeque::new();
    let mut stations = 0u32;

    visited[grid.index(from)] = true;
    queue.push_back((from, 0));

    while let Some((cur, dist)) = queue.pop_front() {
        if cur == to {
            return Some(RouteEstimate { distance: dist, stations });
        }
        for next in cur.neighbours(&SNEW, grid.rows(), grid.cols()) {
            let i = grid.index(next);
            if visited[i] || !terrain.passes(grid.cell(next)) {
                continue;
            }
            visited[i] = true;
            if grid.cell(next).is_recharge() {
                stations += 1;
            }
            queue.push_back((next, dist + 1));
        }
    }

    None
}
