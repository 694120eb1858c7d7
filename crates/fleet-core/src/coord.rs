//! Grid coordinates.

use std::fmt;

/// Unit offsets in (row, col) order: north, south, west, east.
pub const NSWE: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Unit offsets in (row, col) order: south, north, east, west.
pub const SNEW: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A cell position on a `rows × cols` grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    /// The cell one step away along `(d_row, d_col)`, if that cell lies
    /// inside a `rows × cols` grid.
    #[inline]
    pub fn step(self, (d_row, d_col): (isize, isize), rows: usize, cols: usize) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < rows && col < cols).then_some(Coord { row, col })
    }

    /// In-bounds 4-neighbours visited in the order given by `offsets`.
    pub fn neighbours(
        self,
        offsets: &'static [(isize, isize); 4],
        rows:    usize,
        cols:    usize,
    ) -> impl Iterator<Item = Coord> {
        offsets.iter().filter_map(move |&d| self.step(d, rows, cols))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}
