//! Grid construction errors.

use thiserror::Error;

use fleet_core::Coord;

/// Errors produced while building or validating a [`Grid`][crate::Grid].
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow { row: usize, got: usize, expected: usize },

    #[error("unknown cell symbol {symbol:?} at {at}")]
    UnknownSymbol { symbol: char, at: Coord },

    #[error("coordinate {0} lies outside the grid")]
    OutOfBounds(Coord),

    #[error("grid has {0} base cells, expected exactly one")]
    BaseCount(usize),

    #[error("grid has no client cells")]
    NoClients,

    #[error("{cell} cell at {at} is not reachable from the base")]
    Unreachable { cell: &'static str, at: Coord },
}

pub type GridResult<T> = Result<T, GridError>;
