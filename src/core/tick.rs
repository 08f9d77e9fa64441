//! Events produced by a run.
//!
//! The engine maps these to sprite moves, text updates and sounds. The run
//! itself never touches presentation types.

use crate::core::difficulty::DifficultyTier;

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    // ── Obstacles ───────────────────────────────────────────────
    /// A pair left the field and was placed again on the right.
    PipeRecycled {
        pair_id: usize,
        tier: DifficultyTier,
        x: f32,
        gap: u32,
        spacing: u32,
    },

    // ── Score ───────────────────────────────────────────────────
    ScoreChanged { score: u32 },
    /// Best score went up and was written to the store.
    NewBestScore { best: u32 },
    DifficultyChanged { tier: DifficultyTier },

    // ── Player ──────────────────────────────────────────────────
    /// Engine should set the bird's vertical velocity to `velocity_y`.
    Flapped { velocity_y: f32 },

    // ── Run flow ────────────────────────────────────────────────
    Paused,
    /// Whole seconds left on the resume or restart countdown.
    CountdownTick { remaining: u32 },
    Resumed,
    GameOver { score: u32, best: u32 },
    Restarted,
}

/// Everything that happened during one `tick`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<RunEvent>,
}

impl TickResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RunEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = RunEvent>) {
        self.events.extend(events);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pairs recycled this tick.
    pub fn recycled(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RunEvent::PipeRecycled { .. }))
            .count()
    }

    pub fn restarted(&self) -> bool {
        self.events.contains(&RunEvent::Restarted)
    }
}
