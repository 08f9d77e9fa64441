//! Utility modules: persistence and logging.

pub mod logging;
pub mod persistence;

pub use logging::*;
pub use persistence::*;
