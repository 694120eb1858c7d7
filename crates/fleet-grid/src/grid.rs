//! Grid representation and builder.
//!
//! # Data layout
//!
//! Cells are stored row-major in one `Vec<Cell>`; `Coord { row, col }` maps
//! to index `row * cols + col`.  The base coordinate and the client list are
//! extracted once at build time so hot paths never rescan the map.
//!
//! A built `Grid` is immutable and shared by `&Grid` across every component
//! for the whole run.

use std::collections::VecDeque;

use fleet_core::Coord;
use fleet_core::coord::NSWE;

use crate::{Cell, GridError, GridResult, Terrain};

// ── Grid ──────────────────────────────────────────────────────────────────────

/// A validated, immutable delivery map.
///
/// Do not construct directly; use [`GridBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows:    usize,
    cols:    usize,
    cells:   Vec<Cell>,
    base:    Coord,
    clients: Vec<Coord>,
}

impl Grid {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The single base coordinate.
    #[inline]
    pub fn base(&self) -> Coord {
        self.base
    }

    /// Client coordinates in row-major discovery order.
    #[inline]
    pub fn clients(&self) -> &[Coord] {
        &self.clients
    }

    /// Row-major index of `at`.  `at` must be in bounds.
    #[inline]
    pub fn index(&self, at: Coord) -> usize {
        at.row * self.cols + at.col
    }

    #[inline]
    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    /// Classification of `at`.
    ///
    /// # Panics
    /// Panics if `at` is outside the grid.
    #[inline]
    pub fn cell(&self, at: Coord) -> Cell {
        self.cells[self.index(at)]
    }

    /// Whether an agent of `terrain` may stand on `at`.  Off-grid is never
    /// passable.
    #[inline]
    pub fn passable(&self, at: Coord, terrain: Terrain) -> bool {
        self.contains(at) && terrain.passes(self.cell(at))
    }

    /// Coordinates of every cell of `kind`, row-major.
    pub fn cells_of(&self, kind: Cell) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == kind)
            .map(|(i, _)| Coord::new(i / self.cols, i % self.cols))
    }

    /// Render as space-separated symbol rows (`B . # S D`).
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2);
        for row in 0..self.rows {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.cols {
                if col > 0 {
                    out.push(' ');
                }
                out.push(self.cells[row * self.cols + col].symbol());
            }
        }
        out
    }

    /// Cells a ground agent can reach from the base, as a row-major mask.
    fn ground_reachable(&self) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        seen[self.index(self.base)] = true;
        queue.push_back(self.base);

        while let Some(cur) = queue.pop_front() {
            for next in cur.neighbours(&NSWE, self.rows, self.cols) {
                let i = self.index(next);
                if !seen[i] && Terrain::Ground.passes(self.cells[i]) {
                    seen[i] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Incremental grid construction with validation on [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use fleet_grid::GridBuilder;
///
/// let grid = GridBuilder::from_rows(&["B . . D"]).unwrap().build().unwrap();
/// assert_eq!(grid.cols(), 4);
/// assert_eq!(grid.clients().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GridBuilder {
    rows:  usize,
    cols:  usize,
    cells: Vec<Cell>,
}

impl GridBuilder {
    /// An all-road grid of the given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![Cell::Road; rows * cols] }
    }

    /// Parse symbol rows.  Whitespace between symbols is ignored, so both
    /// `"B..D"` and `"B . . D"` work.
    pub fn from_rows<S: AsRef<str>>(lines: &[S]) -> GridResult<Self> {
        let mut cells = Vec::new();
        let mut cols = None;

        for (row, line) in lines.iter().enumerate() {
            let mut width = 0;
            for symbol in line.as_ref().chars().filter(|c| !c.is_whitespace()) {
                let cell = Cell::from_symbol(symbol).ok_or(GridError::UnknownSymbol {
                    symbol,
                    at: Coord::new(row, width),
                })?;
                cells.push(cell);
                width += 1;
            }
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(GridError::RaggedRow { row, got: width, expected });
                }
                Some(_) => {}
            }
        }

        Ok(Self { rows: lines.len(), cols: cols.unwrap_or(0), cells })
    }

    /// Build from a flat row-major cell list (used by the map generator).
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> GridResult<Self> {
        if cells.len() != rows * cols {
            return Err(GridError::RaggedRow { row: 0, got: cells.len(), expected: rows * cols });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Overwrite one cell.
    pub fn set(&mut self, at: Coord, cell: Cell) -> GridResult<&mut Self> {
        if at.row >= self.rows || at.col >= self.cols {
            return Err(GridError::OutOfBounds(at));
        }
        self.cells[at.row * self.cols + at.col] = cell;
        Ok(self)
    }

    /// Validate and freeze.
    ///
    /// Requires exactly one base, at least one client, and every station and
    /// client reachable from the base through non-wall cells.
    pub fn build(self) -> GridResult<Grid> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::Empty);
        }

        let mut bases = Vec::new();
        let mut clients = Vec::new();
        for (i, cell) in self.cells.iter().enumerate() {
            let at = Coord::new(i / self.cols, i % self.cols);
            match cell {
                Cell::Base   => bases.push(at),
                Cell::Client => clients.push(at),
                _ => {}
            }
        }
        if bases.len() != 1 {
            return Err(GridError::BaseCount(bases.len()));
        }
        if clients.is_empty() {
            return Err(GridError::NoClients);
        }

        let grid = Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells,
            base: bases[0],
            clients,
        };

        let reachable = grid.ground_reachable();
        for kind in [Cell::Station, Cell::Client] {
            if let Some(at) = grid.cells_of(kind).find(|&at| !reachable[grid.index(at)]) {
                return Err(GridError::Unreachable { cell: kind.as_str(), at });
            }
        }

        Ok(grid)
    }
}
