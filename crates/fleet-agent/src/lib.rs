//! `fleet-agent`: delivery agents, their cargo, and what they do each tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`kind`]      | `AgentKind` presets and the `Capability` record            |
//! | [`package`]   | `Package`, `Location`, `Holder`, `PackageStore`            |
//! | [`agent`]     | `Agent`, `AgentState`                                      |
//! | [`lifecycle`] | `TickContext`, `Agent::tick`: the per-tick state machine  |
//! | [`builder`]   | `FleetBuilder` (sequential id assignment)                  |
//!
//! # Design notes
//!
//! Drones, robots and scooters behave identically; they differ only in the
//! numbers of their [`Capability`].  One concrete [`Agent`] type carries a
//! capability record instead of one type per kind.
//!
//! Packages live in one [`PackageStore`] indexed by [`PackageId`]; each
//! records its [`Holder`] (the base pool, one agent, or a terminal outcome).
//! Agents keep only ids in their cargo list, so moving a package between the
//! pool and an agent is an index update, never a copy.
//!
//! [`Agent::tick`] returns a [`LedgerDelta`] instead of mutating shared
//! counters; the simulation clock folds the deltas.
//!
//! [`PackageId`]: fleet_core::PackageId
//! [`LedgerDelta`]: fleet_core::LedgerDelta

pub mod agent;
pub mod builder;
pub mod kind;
pub mod lifecycle;
pub mod package;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentState};
pub use builder::FleetBuilder;
pub use kind::{AgentKind, Capability};
pub use lifecycle::TickContext;
pub use package::{Holder, Location, Package, PackageCensus, PackageStore};
