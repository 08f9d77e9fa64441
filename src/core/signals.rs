//! Discrete signals the engine sends into a run.
//!
//! Input devices and the collision system live in the engine. They only need
//! to produce [`RunSignal`]s, either by calling [`Run::handle`](crate::core::run::Run::handle)
//! directly or through any [`SignalSource`] such as an mpsc channel.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSignal {
    /// Pointer down or space bar.
    Flap,
    /// Pause button.
    Pause,
    /// Leaving the pause menu; starts the resume countdown.
    Resume,
    /// The bird touched a pipe.
    Collision,
    /// The bird left the top or bottom of the field.
    OutOfBounds,
    /// Start a fresh run immediately.
    Restart,
}

/// Anything that can hand over pending signals without blocking.
pub trait SignalSource {
    fn poll_signal(&mut self) -> Option<RunSignal>;
}

impl SignalSource for Receiver<RunSignal> {
    fn poll_signal(&mut self) -> Option<RunSignal> {
        self.try_recv().ok()
    }
}

impl SignalSource for VecDeque<RunSignal> {
    fn poll_signal(&mut self) -> Option<RunSignal> {
        self.pop_front()
    }
}
