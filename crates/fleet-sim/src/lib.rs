//! `fleet-sim`: the simulation clock for rust_fleet.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 1..=config.max_ticks:
//!   ① Spawn   : on every `spawn_interval`-th tick, one package with a
//!                random client, reward and deadline joins the pool.
//!   ② Assign  : dispatch_one is called up to pool-size times, stopping at
//!                the first call that assigns nothing.
//!   ③ Advance : every agent runs one lifecycle step in registration order;
//!                the returned ledger deltas are folded into the ledger.
//!   stop early once every package is resolved or every agent is dead
//! finish: unloaded cargo goes back to the pool, pool packages are penalised
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores assignment candidates on Rayon's thread pool.   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on [`SimReport`].    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_core::FleetConfig;
//! use fleet_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, grid).build()?;
//! let report = sim.run(&mut NoopObserver);
//! println!("profit {}", report.profit);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;
pub mod spawn;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{AgentSnapshot, SimReport};
pub use sim::Sim;
pub use spawn::PackageSpawner;
