//! Scrolling obstacle pairs.
//!
//! A fixed number of upper/lower pipe pairs scroll left at a constant speed.
//! When a pair has fully left the field it is placed again to the right of
//! the rightmost pipe with a fresh random gap, which is also what scores a point.

pub mod pool;
pub mod spawner;
pub mod types;

pub use pool::*;
pub use spawner::*;
pub use types::*;
