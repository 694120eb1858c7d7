use fleet_core::{AgentId, FleetError};
use fleet_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] FleetError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("grid is {got_rows}x{got_cols} but the configuration expects {rows}x{cols}")]
    GridMismatch {
        rows:     usize,
        cols:     usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("fleet has no agents")]
    NoAgents,

    #[error("agent at index {index} has id {id}; ids must run 0, 1, 2, …")]
    AgentIdMismatch {
        index: usize,
        id:    AgentId,
    },
}

pub type SimResult<T> = Result<T, SimError>;
