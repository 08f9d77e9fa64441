//! Headless balance simulator.
//!
//! Plays many games with a scripted pilot whose crash odds grow as gaps get
//! narrower, to check how quickly runs reach each difficulty tier and what
//! gaps and spacings the placement actually produces.
//!
//! The simulator drives [`Run`](crate::core::run::Run) directly, so its
//! numbers come from the same code the game uses.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport, TierPlacements};
pub use runner::{run_simulation, run_simulation_with_store};
