//! Per-tick agent state machine.
//!
//! One call to [`Agent::tick`] runs these steps in order:
//!
//! 1. dead agents do nothing; live agents pay their operating cost;
//! 2. standing on the base loads every committed package;
//! 3. a charging agent below maximum takes one increment and stops;
//! 4. an agent without a path plans one (cargo client, else base, else park);
//! 5. a critically low agent re-plans toward its cargo;
//! 6. a moving agent spends its consumption and walks up to `speed` cells,
//!    halting to charge on a base or station that leaves it below maximum;
//! 7. after moving it delivers the oldest loaded package if standing on its
//!    client;
//! 8. an empty battery kills the agent and disposes of its cargo.

use tracing::{debug, info, warn};

use fleet_core::ledger::{DEATH_PENALTY, LATE_PENALTY, UNDELIVERED_PENALTY};
use fleet_core::{Coord, LedgerDelta, Tick};
use fleet_grid::{Cell, Grid, Planner};

use crate::package::{Location, PackageStore};
use crate::{Agent, AgentState};

// ── TickContext ───────────────────────────────────────────────────────────────

/// Read-only inputs shared by every agent's step within one tick.
pub struct TickContext<'a, P: Planner + ?Sized> {
    pub grid:    &'a Grid,
    pub planner: &'a P,
    pub now:     Tick,
}

impl<'a, P: Planner + ?Sized> TickContext<'a, P> {
    pub fn new(grid: &'a Grid, planner: &'a P, now: Tick) -> Self {
        Self { grid, planner, now }
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

impl Agent {
    /// Advance this agent by one tick and return its ledger effect.
    pub fn tick<P: Planner + ?Sized>(
        &mut self,
        ctx: &TickContext<'_, P>,
        packages: &mut PackageStore,
    ) -> LedgerDelta {
        let mut delta = LedgerDelta::default();
        if !self.is_alive() {
            return delta;
        }
        delta.profit -= self.capability.cost as i64;

        if self.position == ctx.grid.base() {
            self.load_at_base(packages, ctx.now);
        }

        if self.state == AgentState::Charging && self.battery < self.capability.max_battery {
            self.recharge();
            debug!(agent = %self.id, tick = %ctx.now, battery = self.battery, "charging");
            return delta;
        }

        let planned = if self.path.is_empty() { self.plan_next(ctx, packages) } else { false };

        if !planned && !self.path.is_empty() && self.is_battery_critical() {
            self.replan_toward_cargo(ctx, packages);
        }

        if !self.path.is_empty() {
            self.advance(ctx.grid, packages, ctx.now);
            self.try_deliver(packages, ctx.now, &mut delta);
        }

        if self.battery == 0 {
            self.die(packages, ctx.now, &mut delta);
        }
        delta
    }

    fn load_at_base(&mut self, packages: &mut PackageStore, now: Tick) {
        let loaded = self.pick_up(packages);
        if loaded > 0 {
            debug!(agent = %self.id, tick = %now, loaded, "picked up at base");
        }
    }

    /// Step 4.  Returns `true` if the planner was consulted.
    fn plan_next<P: Planner + ?Sized>(
        &mut self,
        ctx: &TickContext<'_, P>,
        packages: &PackageStore,
    ) -> bool {
        let base = ctx.grid.base();
        let goal = match self.first_carried(packages) {
            Some(id) => packages.get(id).client,
            None if self.position != base => base,
            None => {
                self.state = if self.battery < self.capability.max_battery {
                    AgentState::Charging
                } else {
                    AgentState::Idle
                };
                return false;
            }
        };
        self.plan_to(ctx, goal);
        true
    }

    /// Step 5.
    fn replan_toward_cargo<P: Planner + ?Sized>(
        &mut self,
        ctx: &TickContext<'_, P>,
        packages: &PackageStore,
    ) {
        let Some(id) = self.first_carried(packages) else { return };
        let goal = packages.get(id).client;
        debug!(agent = %self.id, tick = %ctx.now, battery = self.battery, to = %goal, "battery critical, replanning");
        self.plan_to(ctx, goal);
    }

    fn plan_to<P: Planner + ?Sized>(&mut self, ctx: &TickContext<'_, P>, goal: Coord) {
        let route = ctx.planner.plan(ctx.grid, self.position, goal, &self.battery_profile());
        if route.is_empty() {
            // Stranded agents retry every tick; only the first failure warns.
            if self.state == AgentState::Idle {
                debug!(agent = %self.id, tick = %ctx.now, to = %goal, "still no feasible path");
            } else {
                warn!(agent = %self.id, tick = %ctx.now, from = %self.position, to = %goal, battery = self.battery, "no feasible path");
            }
            self.state = AgentState::Idle;
        } else {
            debug!(agent = %self.id, tick = %ctx.now, to = %goal, steps = route.len(), "planned");
        }
        self.set_path(route);
    }

    /// Step 6.
    fn advance(&mut self, grid: &Grid, packages: &mut PackageStore, now: Tick) {
        self.battery = self.battery.saturating_sub(self.capability.consumption);
        self.state = AgentState::Moving;

        for _ in 0..self.capability.speed {
            let Some(next) = self.path.pop_front() else { break };
            self.position = next;

            let cell = grid.cell(next);
            if !cell.is_recharge() {
                continue;
            }
            if cell == Cell::Base {
                self.load_at_base(packages, now);
            }
            self.recharge();
            if self.battery < self.capability.max_battery {
                self.state = AgentState::Charging;
                debug!(agent = %self.id, tick = %now, at = %next, battery = self.battery, "stopped to charge");
                break;
            }
        }
    }

    /// Step 7.
    fn try_deliver(&mut self, packages: &mut PackageStore, now: Tick, delta: &mut LedgerDelta) {
        let Some(id) = self.first_carried(packages) else { return };
        let pkg = packages.get(id);
        if pkg.client != self.position {
            return;
        }

        let late = pkg.is_late(now);
        delta.profit    += pkg.reward as i64;
        delta.delivered += 1;
        if late {
            delta.profit += LATE_PENALTY;
            delta.late   += 1;
        }
        debug!(agent = %self.id, tick = %now, package = %id, reward = pkg.reward, late, "delivered");

        self.cargo.retain(|&c| c != id);
        packages.mark_delivered(id);
    }

    /// Step 8.
    fn die(&mut self, packages: &mut PackageStore, now: Tick, delta: &mut LedgerDelta) {
        self.state    = AgentState::Dead;
        delta.died    = true;
        delta.profit += DEATH_PENALTY;

        for id in self.cargo.drain(..) {
            match packages.get(id).location {
                Location::WithAgent => {
                    packages.mark_dropped(id);
                    delta.dropped += 1;
                    delta.profit  += UNDELIVERED_PENALTY;
                }
                Location::AtBase => {
                    packages.release(id);
                    delta.returned += 1;
                }
            }
        }
        self.path.clear();

        info!(
            agent = %self.id,
            kind = %self.kind,
            tick = %now,
            at = %self.position,
            dropped = delta.dropped,
            returned = delta.returned,
            "battery exhausted"
        );
    }
}
