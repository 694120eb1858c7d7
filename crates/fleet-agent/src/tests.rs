//! Unit tests for fleet-agent.

#[cfg(test)]
mod helpers {
    use fleet_core::{AgentId, Coord, PackageId, Tick};
    use fleet_grid::{Grid, GridBuilder, Terrain};

    use crate::{Agent, AgentKind, Capability, PackageStore};

    pub fn grid(rows: &[&str]) -> Grid {
        GridBuilder::from_rows(rows).unwrap().build().unwrap()
    }

    /// Ground agent with unit cost.
    pub fn cap(speed: u32, max_battery: u32, consumption: u32, capacity: usize) -> Capability {
        Capability { terrain: Terrain::Ground, speed, max_battery, consumption, cost: 1, capacity }
    }

    pub fn agent(cap: Capability, at: Coord) -> Agent {
        Agent::with_capability(AgentId(0), AgentKind::Robot, cap, at)
    }

    /// Spawn a package for `client` and commit it to `agent`.
    pub fn commit(store: &mut PackageStore, agent: &mut Agent, client: Coord, reward: u32, deadline: u64, created: Tick) -> PackageId {
        let id = store.spawn(client, reward, deadline, created);
        assert!(store.assign(id, agent.id));
        agent.commit(id);
        id
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kind {
    use fleet_grid::Terrain;

    use crate::AgentKind;

    use super::helpers::cap;

    #[test]
    fn presets_differ_by_kind() {
        let drone = AgentKind::Drone.capability();
        let robot = AgentKind::Robot.capability();
        assert_eq!(drone.terrain, Terrain::Air);
        assert_eq!(robot.terrain, Terrain::Ground);
        assert!(drone.speed > robot.speed);
        assert!(drone.capacity < robot.capacity);
        assert_eq!(AgentKind::Scooter.to_string(), "scooter");
    }

    #[test]
    fn every_preset_can_move_and_charge() {
        let names: Vec<_> = AgentKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["drone", "robot", "scooter"]);
        for kind in AgentKind::ALL {
            let c = kind.capability();
            assert!(c.speed >= 1 && c.capacity >= 1, "{kind}");
            assert!(c.consumption < c.max_battery, "{kind}");
            assert!(c.recharge_increment() >= 1, "{kind}");
        }
    }

    #[test]
    fn recharge_increment_is_a_quarter_and_at_least_one() {
        assert_eq!(cap(1, 100, 1, 1).recharge_increment(), 25);
        assert_eq!(cap(1, 3, 1, 1).recharge_increment(), 1);
    }

    #[test]
    fn critical_threshold_is_inclusive() {
        let c = cap(1, 100, 1, 1);
        assert!(c.is_critical(25));
        assert!(c.is_critical(0));
        assert!(!c.is_critical(26));
    }
}

// ── Package store ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod package {
    use fleet_core::{AgentId, Coord, Tick};

    use crate::{Holder, Location, PackageStore};

    #[test]
    fn pool_is_fifo() {
        let mut store = PackageStore::new();
        let a = store.spawn(Coord::new(0, 1), 100, 10, Tick(1));
        let b = store.spawn(Coord::new(0, 2), 100, 10, Tick(1));
        let c = store.spawn(Coord::new(0, 3), 100, 10, Tick(2));
        assert_eq!(store.pool().collect::<Vec<_>>(), vec![a, b, c]);

        assert!(store.assign(b, AgentId(0)));
        assert_eq!(store.pool().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(store.get(b).holder, Holder::Agent(AgentId(0)));
    }

    #[test]
    fn assign_requires_a_pooled_package() {
        let mut store = PackageStore::new();
        let a = store.spawn(Coord::new(0, 1), 100, 10, Tick(1));
        assert!(store.assign(a, AgentId(0)));
        assert!(!store.assign(a, AgentId(1)));
        assert_eq!(store.get(a).holder, Holder::Agent(AgentId(0)));
    }

    #[test]
    fn release_only_before_pickup() {
        let mut store = PackageStore::new();
        let a = store.spawn(Coord::new(0, 1), 100, 10, Tick(1));
        let b = store.spawn(Coord::new(0, 2), 100, 10, Tick(1));
        store.assign(a, AgentId(0));
        store.assign(b, AgentId(0));

        assert!(store.pick_up(a));
        assert!(!store.pick_up(a));
        assert!(!store.release(a));
        assert_eq!(store.get(a).location, Location::WithAgent);

        assert!(store.release(b));
        assert_eq!(store.get(b).holder, Holder::Pool);
        assert_eq!(store.pool().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn pooled_packages_cannot_be_picked_up() {
        let mut store = PackageStore::new();
        let a = store.spawn(Coord::new(0, 1), 100, 10, Tick(1));
        assert!(!store.pick_up(a));
        assert_eq!(store.get(a).location, Location::AtBase);
    }

    #[test]
    fn census_counts_every_package_once() {
        let mut store = PackageStore::new();
        let ids: Vec<_> = (0..5).map(|i| store.spawn(Coord::new(0, i + 1), 100, 10, Tick(1))).collect();
        for &id in &ids[..4] {
            store.assign(id, AgentId(0));
        }
        store.pick_up(ids[1]);
        store.pick_up(ids[2]);
        store.pick_up(ids[3]);
        store.mark_delivered(ids[2]);
        store.mark_dropped(ids[3]);

        assert!(store.get(ids[2]).holder.is_terminal());
        assert!(store.get(ids[3]).holder.is_terminal());
        assert!(!store.get(ids[0]).holder.is_terminal());
        assert!(!store.get(ids[4]).holder.is_terminal());

        let census = store.census();
        assert_eq!(census.spawned, 5);
        assert_eq!(census.pool, 1);
        assert_eq!(census.committed, 1);
        assert_eq!(census.carried, 1);
        assert_eq!(census.delivered, 1);
        assert_eq!(census.dropped, 1);
        assert!(census.is_conserved());
    }

    #[test]
    fn lateness_is_strictly_after_the_deadline() {
        let mut store = PackageStore::new();
        let a = store.spawn(Coord::new(0, 1), 100, 20, Tick(1));
        assert!(!store.get(a).is_late(Tick(21)));
        assert!(store.get(a).is_late(Tick(22)));
    }
}

// ── Fleet builder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use fleet_core::{AgentId, Coord};

    use crate::{AgentKind, AgentState, FleetBuilder};

    use super::helpers::cap;

    #[test]
    fn ids_follow_kind_order() {
        let base = Coord::new(2, 3);
        let fleet = FleetBuilder::from_counts(base, 2, 1, 1).build();
        let kinds: Vec<_> = fleet.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AgentKind::Drone, AgentKind::Drone, AgentKind::Robot, AgentKind::Scooter]);
        for (i, agent) in fleet.iter().enumerate() {
            assert_eq!(agent.id, AgentId(i as u32));
            assert_eq!(agent.position, base);
            assert_eq!(agent.battery, agent.capability.max_battery);
            assert_eq!(agent.state, AgentState::Idle);
        }
    }

    #[test]
    fn custom_capability_is_kept() {
        let c = cap(4, 9, 2, 3);
        let fleet = FleetBuilder::new(Coord::default()).add_custom(AgentKind::Scooter, c, 2).build();
        assert_eq!(fleet.len(), 2);
        assert!(fleet.iter().all(|a| a.capability == c && a.battery == 9));
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use fleet_core::{AgentId, Coord, Tick};
    use fleet_grid::BatteryAStar;

    use crate::{Agent, AgentKind, AgentState, Holder, Location, PackageStore, TickContext};

    use super::helpers::{agent, cap, commit, grid};

    #[test]
    fn corridor_delivery() {
        let g = grid(&["B . . . D"]);
        let client = Coord::new(0, 4);
        let mut store = PackageStore::new();
        let mut a = agent(cap(1, 5, 1, 1), g.base());
        let id = commit(&mut store, &mut a, client, 500, 20, Tick(1));

        let mut profit = 0;
        let mut delivered_at = None;
        for t in 1..=4 {
            let delta = a.tick(&TickContext::new(&g, &BatteryAStar, Tick(t)), &mut store);
            profit += delta.profit;
            if delta.delivered == 1 {
                delivered_at = Some(t);
            }
            if t == 1 {
                assert_eq!(store.get(id).location, Location::WithAgent);
                assert_eq!(a.state, AgentState::Moving);
            }
        }

        assert_eq!(delivered_at, Some(4));
        assert_eq!(profit, 500 - 4);
        assert_eq!(a.position, client);
        assert_eq!(a.battery, 1);
        assert!(a.cargo.is_empty());
        assert_eq!(store.get(id).holder, Holder::Delivered);
    }

    #[test]
    fn preset_drone_covers_more_cells_than_battery_ticks() {
        // 12 cells is beyond 100 / 10 single-step payments; at 3 cells per
        // tick the drone needs four.
        let g = grid(&["B . . . . . . . . . . . D"]);
        let client = Coord::new(0, 12);
        let mut store = PackageStore::new();
        let mut a = Agent::new(AgentId(0), AgentKind::Drone, g.base());
        let id = commit(&mut store, &mut a, client, 500, 20, Tick(1));

        let mut profit = 0;
        for t in 1..=4 {
            profit += a.tick(&TickContext::new(&g, &BatteryAStar, Tick(t)), &mut store).profit;
        }

        assert_eq!(a.position, client);
        assert_eq!(a.battery, 60);
        assert_eq!(store.get(id).holder, Holder::Delivered);
        assert_eq!(profit, 500 - 4 * 15);
    }

    #[test]
    fn late_delivery_is_penalised() {
        let g = grid(&["B D"]);
        let mut store = PackageStore::new();
        let mut a = agent(cap(1, 5, 1, 1), g.base());
        commit(&mut store, &mut a, Coord::new(0, 1), 300, 0, Tick(0));

        let delta = a.tick(&TickContext::new(&g, &BatteryAStar, Tick(2)), &mut store);
        assert_eq!(delta.delivered, 1);
        assert_eq!(delta.late, 1);
        assert_eq!(delta.profit, 300 - 50 - 1);
    }

    #[test]
    fn parks_and_charges_at_base() {
        let g = grid(&["B . D"]);
        let mut store = PackageStore::new();
        let mut a = agent(cap(1, 8, 1, 1), g.base());
        a.battery = 3;

        let mut seen = Vec::new();
        for t in 1..=5 {
            let delta = a.tick(&TickContext::new(&g, &BatteryAStar, Tick(t)), &mut store);
            assert_eq!(delta.profit, -1);
            seen.push((a.state, a.battery));
        }
        assert_eq!(
            seen,
            vec![
                (AgentState::Charging, 3),
                (AgentState::Charging, 5),
                (AgentState::Charging, 7),
                (AgentState::Charging, 8),
                (AgentState::Idle, 8),
            ]
        );
    }

    #[test]
    fn station_interrupts_movement_until_full() {
        let g = grid(&["B . S . D"]);
        let client = Coord::new(0, 4);
        let mut store = PackageStore::new();
        let mut a = agent(cap(3, 8, 1, 1), g.base());
        a.battery = 4;
        commit(&mut store, &mut a, client, 100, 50, Tick(1));

        let ctx = |t| TickContext::new(&g, &BatteryAStar, Tick(t));

        a.tick(&ctx(1), &mut store);
        assert_eq!(a.position, Coord::new(0, 2));
        assert_eq!(a.state, AgentState::Charging);
        assert_eq!(a.battery, 5);
        assert_eq!(a.path.len(), 2);

        a.tick(&ctx(2), &mut store);
        assert_eq!((a.position, a.battery), (Coord::new(0, 2), 7));
        a.tick(&ctx(3), &mut store);
        assert_eq!((a.position, a.battery), (Coord::new(0, 2), 8));

        let delta = a.tick(&ctx(4), &mut store);
        assert_eq!(a.position, client);
        assert_eq!(delta.delivered, 1);
        assert_eq!(a.battery, 7);
    }

    #[test]
    fn critical_battery_replans_toward_cargo() {
        let g = grid(&["D . B . ."]);
        let client = Coord::new(0, 0);

        for (battery, expected) in [(3, Coord::new(0, 1)), (12, Coord::new(0, 3))] {
            let mut store = PackageStore::new();
            let mut a = agent(cap(1, 12, 1, 1), g.base());
            a.battery = battery;
            a.state = AgentState::Moving;
            commit(&mut store, &mut a, client, 100, 50, Tick(1));
            a.path.extend([Coord::new(0, 3), Coord::new(0, 4)]);

            a.tick(&TickContext::new(&g, &BatteryAStar, Tick(1)), &mut store);
            assert_eq!(a.position, expected, "battery {battery}");
        }
    }

    #[test]
    fn infeasible_route_leaves_agent_in_place() {
        let g = grid(&["B . . . D"]);
        let mut store = PackageStore::new();
        let mut a = agent(cap(1, 10, 1, 1), g.base());
        a.battery = 2;
        commit(&mut store, &mut a, Coord::new(0, 4), 100, 50, Tick(1));

        let delta = a.tick(&TickContext::new(&g, &BatteryAStar, Tick(1)), &mut store);
        assert_eq!(delta.profit, -1);
        assert_eq!(a.position, g.base());
        assert_eq!(a.battery, 2);
        assert_eq!(a.state, AgentState::Idle);
        assert!(a.path.is_empty());
    }

    #[test]
    fn death_drops_carried_and_returns_committed() {
        let g = grid(&["B . . . D"]);
        let client = Coord::new(0, 4);
        let mut store = PackageStore::new();
        let mut a = agent(cap(1, 3, 1, 2), Coord::new(0, 1));
        let carried = commit(&mut store, &mut a, client, 100, 50, Tick(1));
        let committed = commit(&mut store, &mut a, client, 100, 50, Tick(1));
        store.pick_up(carried);
        a.battery = 1;
        a.state = AgentState::Moving;
        a.path.extend([Coord::new(0, 2), Coord::new(0, 3), client]);

        let delta = a.tick(&TickContext::new(&g, &BatteryAStar, Tick(5)), &mut store);
        assert!(delta.died);
        assert_eq!(delta.profit, -1 - 500 - 200);
        assert_eq!(delta.dropped, 1);
        assert_eq!(delta.returned, 1);
        assert_eq!(a.state, AgentState::Dead);
        assert!(a.cargo.is_empty() && a.path.is_empty());
        assert_eq!(store.get(carried).holder, Holder::Dropped);
        assert_eq!(store.get(committed).holder, Holder::Pool);
        assert_eq!(store.pool().collect::<Vec<_>>(), vec![committed]);
        assert!(store.census().is_conserved());

        let after = a.tick(&TickContext::new(&g, &BatteryAStar, Tick(6)), &mut store);
        assert!(after.is_empty());
    }

    #[test]
    fn release_unloaded_keeps_carried_cargo() {
        let mut store = PackageStore::new();
        let mut a = agent(cap(1, 3, 1, 2), Coord::new(0, 1));
        let carried = commit(&mut store, &mut a, Coord::new(0, 4), 100, 50, Tick(1));
        let committed = commit(&mut store, &mut a, Coord::new(0, 4), 100, 50, Tick(1));
        store.pick_up(carried);

        assert_eq!(a.carried_count(&store), 1);
        assert_eq!(a.release_unloaded(&mut store), 1);
        assert_eq!(a.cargo, vec![carried]);
        assert_eq!(a.carried_count(&store), 1);
        assert_eq!(store.get(committed).holder, Holder::Pool);
    }
}
