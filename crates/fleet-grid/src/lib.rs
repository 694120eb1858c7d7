//! `fleet-grid`: the static world and the searches that run over it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`cell`]      | `Cell`, `Terrain`                                         |
//! | [`grid`]      | `Grid` (row-major cells + base + clients), `GridBuilder`  |
//! | [`planner`]   | `Planner` trait, `BatteryProfile`, `BatteryAStar`         |
//! | [`estimator`] | `estimate` (battery-agnostic BFS), `RouteEstimate`        |
//! | [`error`]     | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod cell;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod planner;

#[cfg(test)]
mod tests;

pub use cell::{Cell, Terrain};
pub use error::{GridError, GridResult};
pub use estimator::{RouteEstimate, estimate};
pub use grid::{Grid, GridBuilder};
pub use planner::{BatteryAStar, BatteryProfile, Planner};
