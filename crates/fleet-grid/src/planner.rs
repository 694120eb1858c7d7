//! Planner trait and the default battery-aware A*.
//!
//! # Pluggability
//!
//! The agent lifecycle calls path planning through the [`Planner`] trait, so
//! callers can swap in a different search without touching the state
//! machine.  [`BatteryAStar`] is the default.
//!
//! # State space
//!
//! Search nodes are keyed on remaining battery as well as cell: a
//! low-battery arrival at a cell may fail later where a high-battery arrival
//! through a station would succeed.
//!
//! Battery is spent the way a moving agent spends it: `consumption` once at
//! the start of every tick, which then covers up to `speed` steps.  The
//! charge must stay strictly positive after each payment.  Entering a base or
//! station cell adds `recharge` (capped at `max_battery`); if that leaves the
//! agent below maximum it stops to charge, and its next step opens a fresh
//! tick.  With `speed = consumption = 1` this is one unit per step.
//!
//! Nodes also carry the steps already taken in the current tick.  The search cost is the step count; the
//! Manhattan heuristic is consistent for unit steps, so the first goal pop is
//! optimal.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use fleet_core::Coord;
use fleet_core::coord::NSWE;

use crate::{Cell, Grid, Terrain};

// ── BatteryProfile ────────────────────────────────────────────────────────────

/// The slice of an agent's capability that path search needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatteryProfile {
    pub terrain:     Terrain,
    pub max_battery: u32,
    /// Charge at the start cell.
    pub battery:     u32,
    /// Battery paid at the start of every moving tick.
    pub consumption: u32,
    /// Grid steps one tick's payment covers.
    pub speed:       u32,
    /// Charge added on entering a base or station cell.
    pub recharge:    u32,
}

impl BatteryProfile {
    /// One unit per step: the plain battery model.
    pub fn unit(terrain: Terrain, battery: u32, max_battery: u32, recharge: u32) -> Self {
        Self { terrain, max_battery, battery, consumption: 1, speed: 1, recharge }
    }

    /// Battery and steps-into-tick after stepping into `cell` having already
    /// taken `moved` steps this tick, or `None` if the tick's payment would
    /// leave the agent at zero.
    #[inline]
    pub fn after_step(&self, battery: u32, moved: u32, cell: Cell) -> Option<(u32, u32)> {
        let left = if moved == 0 {
            battery.checked_sub(self.consumption).filter(|&b| b > 0)?
        } else {
            battery
        };
        let mut moved = moved + 1;
        let mut battery = left;
        if cell.is_recharge() {
            battery = left.saturating_add(self.recharge).min(self.max_battery);
            if battery < self.max_battery {
                moved = 0;
            }
        }
        if moved >= self.speed.max(1) {
            moved = 0;
        }
        Some((battery, moved))
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// Implementations must be `Send + Sync` so a planner can be shared by
/// reference with the assignment policy's parallel scoring.
pub trait Planner: Send + Sync {
    /// Plan a route from `from` to `to`.
    ///
    /// The returned coordinates exclude `from` and end at `to`.  An empty
    /// vector means "no feasible route right now" and is not an error.
    /// `from == to` yields `vec![to]`.
    fn plan(&self, grid: &Grid, from: Coord, to: Coord, profile: &BatteryProfile) -> Vec<Coord>;
}

// ── BatteryAStar ──────────────────────────────────────────────────────────────

/// A* over `(cell, battery, steps into tick)` with a Manhattan heuristic.
///
/// Neighbours expand north, south, west, east; equal-`f` entries pop in
/// insertion order.
#[derive(Copy, Clone, Debug, Default)]
pub struct BatteryAStar;

impl Planner for BatteryAStar {
    fn plan(&self, grid: &Grid, from: Coord, to: Coord, profile: &BatteryProfile) -> Vec<Coord> {
        battery_astar(grid, from, to, profile)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// `(row-major cell index, remaining battery, steps taken this tick)`.
type State = (usize, u32, u32);

fn battery_astar(grid: &Grid, from: Coord, to: Coord, profile: &BatteryProfile) -> Vec<Coord> {
    if from == to {
        return vec![to];
    }
    if !grid.contains(from) || !grid.contains(to) {
        return Vec::new();
    }

    let cols = grid.cols();
    let at = |i: usize| Coord::new(i / cols, i % cols);

    let start: State = (grid.index(from), profile.battery.min(profile.max_battery), 0);

    let mut g: FxHashMap<State, u32> = FxHashMap::default();
    let mut parent: FxHashMap<State, State> = FxHashMap::default();
    let mut closed: FxHashSet<State> = FxHashSet::default();

    // Min-heap on (f, seq).  `seq` is unique, so it breaks f-ties by
    // insertion order and the trailing state is never compared.
    let mut open: BinaryHeap<Reverse<(u32, u64, State)>> = BinaryHeap::new();
    let mut seq = 0u64;

    g.insert(start, 0);
    open.push(Reverse((from.manhattan(to), seq, start)));

    while let Some(Reverse((_, _, state))) = open.pop() {
        if !closed.insert(state) {
            continue;
        }
        let (idx, battery, moved) = state;
        let here = at(idx);
        if here == to {
            return reconstruct(&parent, state, start, at);
        }

        let g_here = g.get(&state).copied().unwrap_or(u32::MAX);
        for next in here.neighbours(&NSWE, grid.rows(), cols) {
            let cell = grid.cell(next);
            if !profile.terrain.passes(cell) {
                continue;
            }
            let Some((next_battery, next_moved)) = profile.after_step(battery, moved, cell) else {
                continue;
            };
            let next_state = (grid.index(next), next_battery, next_moved);
            if closed.contains(&next_state) {
                continue;
            }
            let tentative = g_here.saturating_add(1);
            if tentative < g.get(&next_state).copied().unwrap_or(u32::MAX) {
                g.insert(next_state, tentative);
                parent.insert(next_state, state);
                seq += 1;
                open.push(Reverse((tentative + next.manhattan(to), seq, next_state)));
            }
        }
    }

    Vec::new()
}

fn reconstruct(
    parent: &FxHashMap<State, State>,
    goal:   State,
    start:  State,
    at:     impl Fn(usize) -> Coord,
) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut cur = goal;
    while cur != start {
        path.push(at(cur.0));
        match parent.get(&cur) {
            Some(&prev) => cur = prev,
            None => break,
        }
    }
    path.reverse();
    path
}
