//! `fleet-dispatch`: hands pooled packages to agents.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`cost`]   | `CostWeights`, `projected_cost`: route cost projection   |
//! | [`policy`] | `AssignmentPolicy` trait, `GreedyCostPolicy`, `dispatch_one` |
//!
//! # Per-call contract
//!
//! One [`dispatch_one`] call assigns at most one package: the oldest pooled
//! package that some live agent with a free cargo slot can reach goes to the
//! agent with the lowest projected cost (ties to the lowest registration
//! index).  The clock calls it repeatedly until it returns `None`.
//!
//! The heuristic is myopic by construction; it never revisits earlier
//! assignments.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores candidate agents on Rayon's thread pool.        |

pub mod cost;
pub mod policy;


pub use cost::{CostWeights, projected_cost};
pub use policy::{Assignment, AssignmentPolicy, GreedyCostPolicy, dispatch_one};
