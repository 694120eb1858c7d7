//! Unit tests for fleet-grid.
//!
//! All grids are hand-written symbol rows or seeded random fills, so the
//! tests run without any map file.

#[cfg(test)]
mod helpers {
    use std::collections::VecDeque;

    use fleet_core::coord::NSWE;
    use fleet_core::{Coord, SimRng};

    use crate::{BatteryProfile, Cell, Grid, GridBuilder, Terrain};

    pub fn grid(rows: &[&str]) -> Grid {
        GridBuilder::from_rows(rows).unwrap().build().unwrap()
    }

    pub fn profile(terrain: Terrain, battery: u32, max_battery: u32, recharge: u32) -> BatteryProfile {
        BatteryProfile::unit(terrain, battery, max_battery, recharge)
    }

    /// Exhaustive BFS over (cell, battery, steps into tick): the reference
    /// for optimality.
    pub fn brute_force_steps(grid: &Grid, from: Coord, to: Coord, p: &BatteryProfile) -> Option<usize> {
        if from == to {
            return Some(1);
        }
        let levels = p.max_battery as usize + 1;
        let phases = p.speed.max(1) as usize;
        let key = |c: Coord, b: u32, m: u32| (grid.index(c) * levels + b as usize) * phases + m as usize;
        let mut seen = vec![false; grid.cell_count() * levels * phases];
        let mut queue = VecDeque::new();
        let start = p.battery.min(p.max_battery);
        seen[key(from, start, 0)] = true;
        queue.push_back((from, start, 0u32, 0usize));
        while let Some((cur, battery, moved, steps)) = queue.pop_front() {
            if cur == to {
                return Some(steps);
            }
            for next in cur.neighbours(&NSWE, grid.rows(), grid.cols()) {
                let cell = grid.cell(next);
                if !p.terrain.passes(cell) {
                    continue;
                }
                let Some((b, m)) = p.after_step(battery, moved, cell) else { continue };
                let k = key(next, b, m);
                if !seen[k] {
                    seen[k] = true;
                    queue.push_back((next, b, m, steps + 1));
                }
            }
        }
        None
    }

    /// Walk `path` from `from`, asserting adjacency, passability and a
    /// strictly positive battery after every step.
    pub fn assert_feasible(grid: &Grid, from: Coord, path: &[Coord], p: &BatteryProfile) {
        let mut cur = from;
        let mut battery = p.battery;
        let mut moved = 0;
        for &next in path {
            assert_eq!(cur.manhattan(next), 1, "non-adjacent step {cur} -> {next}");
            assert!(p.terrain.passes(grid.cell(next)), "impassable cell {next}");
            (battery, moved) = p
                .after_step(battery, moved, grid.cell(next))
                .unwrap_or_else(|| panic!("battery exhausted entering {next}"));
            assert!(battery > 0 && battery <= p.max_battery);
            cur = next;
        }
    }

    /// A 5×5 grid: base top-left, client bottom-right, seeded walls and
    /// stations elsewhere.  `None` if the fill disconnects the client.
    pub fn random_grid(seed: u64) -> Option<Grid> {
        let mut rng = SimRng::new(seed);
        let mut b = GridBuilder::new(5, 5);
        for row in 0..5 {
            for col in 0..5 {
                let roll = rng.gen_range(0u32..10);
                let cell = match roll {
                    0..=2 => Cell::Wall,
                    3 => Cell::Station,
                    _ => Cell::Road,
                };
                b.set(Coord::new(row, col), cell).unwrap();
            }
        }
        b.set(Coord::new(0, 0), Cell::Base).unwrap();
        b.set(Coord::new(4, 4), Cell::Client).unwrap();
        b.build().ok()
    }
}

// ── Grid & builder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use fleet_core::Coord;

    use crate::{Cell, GridBuilder, GridError, Terrain};

    #[test]
    fn parses_spaced_and_compact_rows() {
        let a = GridBuilder::from_rows(&["B . # D", ". S . ."]).unwrap().build().unwrap();
        let b = GridBuilder::from_rows(&["B.#D", ".S.."]).unwrap().build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows(), 2);
        assert_eq!(a.cols(), 4);
        assert_eq!(a.base(), Coord::new(0, 0));
        assert_eq!(a.clients(), &[Coord::new(0, 3)]);
        assert_eq!(a.cell(Coord::new(1, 1)), Cell::Station);
    }

    #[test]
    fn render_matches_input() {
        let rows = ["B . # D", ". S . ."];
        let grid = GridBuilder::from_rows(&rows).unwrap().build().unwrap();
        assert_eq!(grid.render(), rows.join("\n"));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = GridBuilder::from_rows(&["B . D", ". ."]).unwrap_err();
        assert!(matches!(err, GridError::RaggedRow { row: 1, got: 2, expected: 3 }));
    }

    #[test]
    fn unknown_symbol_rejected() {
        let err = GridBuilder::from_rows(&["B x D"]).unwrap_err();
        assert!(matches!(err, GridError::UnknownSymbol { symbol: 'x', .. }));
    }

    #[test]
    fn base_count_must_be_one() {
        let none = GridBuilder::from_rows(&[". . D"]).unwrap().build();
        assert!(matches!(none, Err(GridError::BaseCount(0))));
        let two = GridBuilder::from_rows(&["B B D"]).unwrap().build();
        assert!(matches!(two, Err(GridError::BaseCount(2))));
    }

    #[test]
    fn lone_base_without_clients_rejected() {
        let err = GridBuilder::from_rows(&["B"]).unwrap().build().unwrap_err();
        assert!(matches!(err, GridError::NoClients));
    }

    #[test]
    fn walled_off_client_rejected() {
        let err = GridBuilder::from_rows(&["B # D"]).unwrap().build().unwrap_err();
        assert!(matches!(err, GridError::Unreachable { cell: "client", .. }));
    }

    #[test]
    fn walled_off_station_rejected() {
        let err = GridBuilder::from_rows(&["B . D", "# # #", ". S ."]).unwrap().build().unwrap_err();
        assert!(matches!(err, GridError::Unreachable { cell: "station", .. }));
    }

    #[test]
    fn set_out_of_bounds_errors() {
        let mut b = GridBuilder::new(2, 2);
        assert!(b.set(Coord::new(2, 0), Cell::Wall).is_err());
        assert!(b.set(Coord::new(1, 1), Cell::Client).is_ok());
    }

    #[test]
    fn passability_by_terrain() {
        let grid = GridBuilder::from_rows(&["B # D", ". . ."]).unwrap().build().unwrap();
        let wall = Coord::new(0, 1);
        assert!(grid.passable(wall, Terrain::Air));
        assert!(!grid.passable(wall, Terrain::Ground));
        assert!(grid.passable(Coord::new(1, 1), Terrain::Ground));
        assert!(!grid.passable(Coord::new(2, 0), Terrain::Air));
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use fleet_core::Coord;

    use super::helpers::{assert_feasible, brute_force_steps, grid, profile, random_grid};
    use crate::{BatteryAStar, BatteryProfile, Planner, Terrain};

    fn per_tick(battery: u32, max_battery: u32, consumption: u32, speed: u32) -> BatteryProfile {
        BatteryProfile {
            terrain: Terrain::Air,
            max_battery,
            battery,
            consumption,
            speed,
            recharge: (max_battery / 4).max(1),
        }
    }

    #[test]
    fn start_equals_goal_is_single_step() {
        let g = grid(&["B . D"]);
        let p = profile(Terrain::Ground, 5, 5, 1);
        let path = BatteryAStar.plan(&g, Coord::new(0, 2), Coord::new(0, 2), &p);
        assert_eq!(path, vec![Coord::new(0, 2)]);
    }

    #[test]
    fn corridor_path_excludes_start_and_ends_at_goal() {
        let g = grid(&["B . . . D"]);
        let p = profile(Terrain::Ground, 5, 5, 1);
        let path = BatteryAStar.plan(&g, g.base(), Coord::new(0, 4), &p);
        assert_eq!(path, (1..=4).map(|c| Coord::new(0, c)).collect::<Vec<_>>());
        assert_feasible(&g, g.base(), &path, &p);
    }

    #[test]
    fn exact_battery_is_infeasible() {
        // Four steps with four units would arrive at zero.
        let g = grid(&["B . . . D"]);
        let p = profile(Terrain::Ground, 4, 4, 1);
        assert!(BatteryAStar.plan(&g, g.base(), Coord::new(0, 4), &p).is_empty());
    }

    #[test]
    fn wall_blocks_ground_but_not_air() {
        let g = grid(&[". # D", "B # .", ". . ."]);
        let from = Coord::new(0, 0);
        let to = Coord::new(0, 2);
        let ground = profile(Terrain::Ground, 20, 20, 5);
        let air = profile(Terrain::Air, 20, 20, 5);

        let ground_path = BatteryAStar.plan(&g, from, to, &ground);
        assert_eq!(ground_path.len(), 6);
        assert!(ground_path.iter().all(|&c| g.cell(c) != crate::Cell::Wall));

        let air_path = BatteryAStar.plan(&g, from, to, &air);
        assert_eq!(air_path.len(), 2);
        assert_eq!(air_path[0], Coord::new(0, 1));
    }

    #[test]
    fn enclosed_goal_unreachable_for_ground_only() {
        // Bottom row is cut off from the base by a wall line.
        let g = grid(&["B . D", "# # #", ". . ."]);
        let target = Coord::new(2, 1);
        let ground = profile(Terrain::Ground, 50, 50, 5);
        let air = profile(Terrain::Air, 50, 50, 5);
        assert!(BatteryAStar.plan(&g, g.base(), target, &ground).is_empty());
        assert_eq!(BatteryAStar.plan(&g, g.base(), target, &air).len(), 3);
    }

    #[test]
    fn station_detour_restores_feasibility() {
        let g = grid(&["B . . . D", ". . S . ."]);
        let to = Coord::new(0, 4);
        let p = profile(Terrain::Ground, 4, 10, 3);
        let path = BatteryAStar.plan(&g, g.base(), to, &p);
        assert_eq!(path.len(), 6);
        assert!(path.contains(&Coord::new(1, 2)));
        assert_eq!(path.last(), Some(&to));
        assert_feasible(&g, g.base(), &path, &p);
    }

    #[test]
    fn recharge_is_capped_at_max() {
        let g = grid(&["B S S . D"]);
        let p = profile(Terrain::Ground, 5, 5, 4);
        let path = BatteryAStar.plan(&g, g.base(), Coord::new(0, 4), &p);
        assert_eq!(path.len(), 4);
        // 5 → S: min(4+4, 5)=5 → S: 5 → 4 → 3
        let mut battery = p.battery;
        let mut moved = 0;
        for &c in &path {
            (battery, moved) = p.after_step(battery, moved, g.cell(c)).unwrap();
            assert!(battery <= p.max_battery);
        }
        assert_eq!(battery, 3);
    }

    #[test]
    fn zero_battery_cannot_move() {
        let g = grid(&["B . D"]);
        let p = profile(Terrain::Ground, 0, 5, 1);
        assert!(BatteryAStar.plan(&g, g.base(), Coord::new(0, 2), &p).is_empty());
    }

    #[test]
    fn one_payment_covers_a_whole_tick() {
        // 12 cells at 3 per tick is four payments of 10, well inside 100.
        let g = grid(&["B . . . . . . . . . . . D"]);
        let to = Coord::new(0, 12);
        let p = per_tick(100, 100, 10, 3);
        let path = BatteryAStar.plan(&g, g.base(), to, &p);
        assert_eq!(path.len(), 12);
        assert_feasible(&g, g.base(), &path, &p);
    }

    #[test]
    fn range_is_ticks_times_speed() {
        // 30 battery pays for two ticks (20, 10); the third would hit zero.
        let p = per_tick(30, 30, 10, 3);
        let six = grid(&["B . . . . . D"]);
        assert_eq!(BatteryAStar.plan(&six, six.base(), Coord::new(0, 6), &p).len(), 6);
        let seven = grid(&["B . . . . . . D"]);
        assert!(BatteryAStar.plan(&seven, seven.base(), Coord::new(0, 7), &p).is_empty());
    }

    #[test]
    fn station_stop_opens_a_new_tick() {
        let p = per_tick(20, 40, 10, 3);
        // Pay 10 → step onto S: 10 + 10 = 20 < 40, so the tick ends there.
        assert_eq!(p.after_step(20, 0, crate::Cell::Station), Some((20, 0)));
        // Mid-tick steps are free; the third step closes the tick.
        assert_eq!(p.after_step(20, 1, crate::Cell::Road), Some((20, 2)));
        assert_eq!(p.after_step(20, 2, crate::Cell::Road), Some((20, 0)));
        // A payment that lands on zero is refused.
        assert_eq!(p.after_step(10, 0, crate::Cell::Road), None);
    }

    #[test]
    fn matches_brute_force_with_multi_step_ticks() {
        let mut checked = 0;
        for seed in 0..150u64 {
            let Some(g) = random_grid(seed) else { continue };
            let to = Coord::new(4, 4);
            for (battery, consumption, speed) in [(6u32, 2u32, 2u32), (9, 3, 3), (4, 1, 2)] {
                let p = per_tick(battery, 9, consumption, speed);
                let path = BatteryAStar.plan(&g, g.base(), to, &p);
                match brute_force_steps(&g, g.base(), to, &p) {
                    None => assert!(path.is_empty(), "seed {seed}: expected no path"),
                    Some(steps) => {
                        assert_eq!(path.len(), steps, "seed {seed} battery {battery} speed {speed}");
                        assert_feasible(&g, g.base(), &path, &p);
                    }
                }
                checked += 1;
            }
        }
        assert!(checked > 30, "too few valid random grids: {checked}");
    }

    #[test]
    fn matches_brute_force_on_random_grids() {
        let mut checked = 0;
        for seed in 0..150u64 {
            let Some(g) = random_grid(seed) else { continue };
            let to = Coord::new(4, 4);
            for terrain in [Terrain::Ground, Terrain::Air] {
                for battery in [2u32, 4, 6, 9] {
                    let p = profile(terrain, battery, 9, 2);
                    let path = BatteryAStar.plan(&g, g.base(), to, &p);
                    let expected = brute_force_steps(&g, g.base(), to, &p);
                    match expected {
                        None => assert!(path.is_empty(), "seed {seed}: expected no path"),
                        Some(steps) => {
                            assert_eq!(path.len(), steps, "seed {seed} {terrain} battery {battery}");
                            assert_feasible(&g, g.base(), &path, &p);
                        }
                    }
                    checked += 1;
                }
            }
        }
        assert!(checked > 100, "too few valid random grids: {checked}");
    }
}

// ── Estimator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod estimator {
    use fleet_core::Coord;

    use super::helpers::grid;
    use crate::{RouteEstimate, Terrain, estimate};

    #[test]
    fn same_cell_is_zero() {
        let g = grid(&["B . D"]);
        assert_eq!(
            estimate(&g, g.base(), g.base(), Terrain::Ground),
            Some(RouteEstimate { distance: 0, stations: 0 })
        );
    }

    #[test]
    fn corridor_distance() {
        let g = grid(&["B . . . D"]);
        let est = estimate(&g, g.base(), Coord::new(0, 4), Terrain::Ground).unwrap();
        assert_eq!(est.distance, 4);
        assert_eq!(est.stations, 0);
    }

    #[test]
    fn ignores_battery_and_walls_for_air() {
        let g = grid(&["B # D", ". . ."]);
        let to = Coord::new(0, 2);
        assert_eq!(estimate(&g, g.base(), to, Terrain::Ground).unwrap().distance, 4);
        assert_eq!(estimate(&g, g.base(), to, Terrain::Air).unwrap().distance, 2);
    }

    #[test]
    fn unreachable_is_none() {
        let g = grid(&["B . D", "# # #", ". . ."]);
        assert_eq!(estimate(&g, g.base(), Coord::new(2, 0), Terrain::Ground), None);
    }

    #[test]
    fn counts_stations_on_explored_frontier() {
        // The station sits off the shortest path but is discovered before
        // the client is dequeued.
        let g = grid(&["B . D", "S . ."]);
        let est = estimate(&g, g.base(), Coord::new(0, 2), Terrain::Ground).unwrap();
        assert_eq!(est.distance, 2);
        assert_eq!(est.stations, 1);
    }

    #[test]
    fn counts_base_as_recharge_cell() {
        let g = grid(&["D . B"]);
        let est = estimate(&g, Coord::new(0, 1), Coord::new(0, 0), Terrain::Ground).unwrap();
        assert_eq!(est.distance, 1);
        assert_eq!(est.stations, 1);
    }
}
