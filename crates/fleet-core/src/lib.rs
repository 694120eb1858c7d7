//! `fleet-core`: foundational types for the `rust_fleet` delivery simulation.
//!
//! Every other `fleet-*` crate depends on this one.  It has no `fleet-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `PackageId`                                  |
//! | [`coord`]    | `Coord`, Manhattan distance, grid neighbourhoods        |
//! | [`time`]     | `Tick`                                                  |
//! | [`rng`]      | `SimRng` (seeded, deterministic)                        |
//! | [`config`]   | `FleetConfig`: the simulation parameter set            |
//! | [`ledger`]   | profit constants, `LedgerDelta`, `Ledger`               |
//! | [`error`]    | `FleetError`, `FleetResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod coord;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FleetConfig;
pub use coord::Coord;
pub use error::{FleetError, FleetResult};
pub use ids::{AgentId, PackageId};
pub use ledger::{Ledger, LedgerDelta};
pub use rng::SimRng;
pub use time::Tick;
