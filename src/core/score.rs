//! Run score and persisted best score.

use crate::constants::BEST_SCORE_KEY;
use crate::utils::persistence::KeyValueStore;

/// Current score for this run plus the best score seen by this process.
///
/// `best` only ever grows. Writing it back is left to [`persist`](Self::persist)
/// so callers decide when the store is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    current: u32,
    best: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { current: 0, best }
    }

    /// Load the best score from `store`. Absent or unparseable values count as 0.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best = match store.get(BEST_SCORE_KEY) {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                log::debug!("Stored best score {:?} is not a number, starting at 0", raw);
                0
            }),
            None => 0,
        };
        Self::with_best(best)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn increment(&mut self) -> u32 {
        self.current = self.current.saturating_add(1);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Promote the current score to best if it beats it.
    /// Returns `true` when the caller should persist the new best.
    pub fn commit_if_best(&mut self) -> bool {
        if self.current > self.best {
            self.best = self.current;
            true
        } else {
            false
        }
    }

    /// Write the best score to `store`. Failures are logged and dropped.
    pub fn persist(&self, store: &mut impl KeyValueStore) {
        if let Err(e) = store.set(BEST_SCORE_KEY, &self.best.to_string()) {
            log::warn!("Failed to save best score {}: {}", self.best, e);
        }
    }
}
