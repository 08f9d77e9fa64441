//! Run flow, scoring and difficulty.

pub mod difficulty;
pub mod run;
pub mod score;
pub mod signals;
pub mod tick;

pub use difficulty::*;
pub use run::*;
pub use score::*;
pub use signals::*;
pub use tick::*;
