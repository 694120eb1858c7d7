//! Map sources for the demo: procedural generation or a symbol file.
//!
//! A generated map holds the base, the configured stations and clients, and
//! a random road/wall fill, shuffled.  Fills that cut a station or client
//! off from the base are thrown away and drawn again.

use std::path::Path;

use anyhow::{Context, Result, bail};

use fleet_core::{FleetConfig, SimRng};
use fleet_grid::{Cell, Grid, GridBuilder, GridError};

/// Give up after this many rejected fills.
const MAX_ATTEMPTS: usize = 100_000;

/// Share of filler cells that become walls.  Much above 0.4 the open cells
/// stop percolating and almost every draw on a 20×20 map is rejected.
const WALL_PROBABILITY: f64 = 0.3;

/// Draw maps until one passes grid validation.  Returns the grid and the
/// number of attempts it took.
pub fn generate(config: &FleetConfig, rng: &mut SimRng) -> Result<(Grid, usize)> {
    let total = config.rows * config.columns;

    for attempt in 1..=MAX_ATTEMPTS {
        let mut cells = Vec::with_capacity(total);
        cells.push(Cell::Base);
        cells.extend(std::iter::repeat_n(Cell::Station, config.stations));
        cells.extend(std::iter::repeat_n(Cell::Client, config.clients));
        while cells.len() < total {
            cells.push(if rng.gen_bool(WALL_PROBABILITY) { Cell::Wall } else { Cell::Road });
        }
        rng.shuffle(&mut cells);

        match GridBuilder::from_cells(config.rows, config.columns, cells)?.build() {
            Ok(grid) => return Ok((grid, attempt)),
            Err(GridError::Unreachable { .. }) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    bail!(
        "no connected {}x{} map with {} stations and {} clients after {MAX_ATTEMPTS} attempts",
        config.rows,
        config.columns,
        config.stations,
        config.clients,
    )
}

/// Read a map written as space-separated symbol rows (`B`, `S`, `D`, `.`, `#`).
pub fn load(path: &Path) -> Result<Grid> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading map {}", path.display()))?;
    let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let grid = GridBuilder::from_rows(&rows)?
        .build()
        .with_context(|| format!("validating map {}", path.display()))?;
    Ok(grid)
}
