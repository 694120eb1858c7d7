//! Cell classification and terrain passability.

/// Static classification of one grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Road,
    Wall,
    /// The single depot: agents start here, pick up packages and recharge.
    Base,
    /// Recharge point without package pickup.
    Station,
    /// Delivery destination.
    Client,
}

impl Cell {
    /// `true` for cells that recharge an agent entering them.
    #[inline]
    pub fn is_recharge(self) -> bool {
        matches!(self, Cell::Base | Cell::Station)
    }

    /// Single-character map symbol.
    pub fn symbol(self) -> char {
        match self {
            Cell::Road    => '.',
            Cell::Wall    => '#',
            Cell::Base    => 'B',
            Cell::Station => 'S',
            Cell::Client  => 'D',
        }
    }

    /// Parse a map symbol; `None` for anything unknown.
    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Road),
            '#' => Some(Cell::Wall),
            'B' => Some(Cell::Base),
            'S' => Some(Cell::Station),
            'D' => Some(Cell::Client),
            _   => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cell::Road    => "road",
            Cell::Wall    => "wall",
            Cell::Base    => "base",
            Cell::Station => "station",
            Cell::Client  => "client",
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an agent interacts with the map.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    /// Flies over everything, walls included.
    Air,
    /// Blocked by walls.
    Ground,
}

impl Terrain {
    /// Whether an agent of this terrain may enter `cell`.
    #[inline]
    pub fn passes(self, cell: Cell) -> bool {
        match self {
            Terrain::Air    => true,
            Terrain::Ground => cell != Cell::Wall,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Air    => "air",
            Terrain::Ground => "ground",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
