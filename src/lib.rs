//! Skyward - obstacle placement, recycling and scoring for a side-scrolling
//! flap-through-the-gap game.
//!
//! The crate is engine-agnostic: a 2D engine renders sprites at the positions
//! exposed by [`Run::pipes`], forwards input and collisions as [`RunSignal`]s
//! and calls [`Run::tick`] every frame.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod core;
pub mod pipes;
pub mod simulator;
pub mod utils;

pub use config::{ConfigError, GameConfig};
pub use constants::*;
pub use crate::core::{
    DifficultyModel, DifficultyTable, DifficultyTier, PauseState, Run, RunEvent, RunSignal,
    RunState, ScoreTracker, SignalSource, TickResult, TierSpec,
};
pub use pipes::{ObstaclePair, PipeHalf, PipePairPool, Placement, Position};
pub use utils::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
