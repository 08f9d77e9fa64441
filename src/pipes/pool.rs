//! Fixed pool of obstacle pairs scrolled across the field.

use super::spawner::{place_obstacle_pair, rightmost_x};
use super::types::{ObstaclePair, PipeHalf, Placement};
use crate::config::GameConfig;
use crate::core::difficulty::TierSpec;
use rand::Rng;

/// Pairs are created once per run and repositioned in place when they leave
/// the left edge.
#[derive(Debug, Clone)]
pub struct PipePairPool {
    pairs: Vec<ObstaclePair>,
    velocity_x: f32,
    pipe_width: f32,
    /// Halves seen past the edge in the last scan that did not complete a pair.
    pending_halves: usize,
}

impl PipePairPool {
    /// Unplaced pool of `count` pairs parked at `start_x`.
    ///
    /// # Panics
    ///
    /// If `count` is zero or odd; pipes are recycled two at a time.
    pub fn new(count: usize, start_x: f32, velocity_x: f32, pipe_width: f32) -> Self {
        assert!(
            count > 0 && count % 2 == 0,
            "pipe pool size must be even and non-zero, got {}",
            count
        );
        Self {
            pairs: (0..count).map(|id| ObstaclePair::new(id, start_x)).collect(),
            velocity_x,
            pipe_width,
            pending_halves: 0,
        }
    }

    /// Create `count` pairs and place them left to right, each one spaced
    /// from whichever pipe is currently rightmost.
    pub fn initialize<R: Rng>(
        count: usize,
        start_x: f32,
        tier: &TierSpec,
        config: &GameConfig,
        rng: &mut R,
    ) -> Self {
        let mut pool = Self::new(count, start_x, config.scroll_velocity, config.pipe_width);
        for index in 0..count {
            pool.place(index, tier, config, rng);
        }
        pool
    }

    /// Re-place the pair at `index` using the current rightmost x as anchor.
    pub fn place<R: Rng>(
        &mut self,
        index: usize,
        tier: &TierSpec,
        config: &GameConfig,
        rng: &mut R,
    ) -> Placement {
        let anchor = self.rightmost_x();
        place_obstacle_pair(&mut self.pairs[index], tier, anchor, config, rng)
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn velocity_x(&self) -> f32 {
        self.velocity_x
    }

    pub fn pending_halves(&self) -> usize {
        self.pending_halves
    }

    pub fn rightmost_x(&self) -> f32 {
        rightmost_x(&self.pairs)
    }

    /// Shift every pipe horizontally by `dx`.
    pub fn advance(&mut self, dx: f32) {
        for pair in &mut self.pairs {
            pair.translate(dx);
        }
    }

    /// Scroll by the pool velocity for `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.advance(self.velocity_x * dt);
    }

    /// Indices of pairs that have fully left the field, in pool order.
    ///
    /// Halves are scanned upper then lower; each one past the edge goes into
    /// an accumulator and every second one completes a pair. The caller must
    /// re-place the reported pairs before the next scan.
    pub fn detect_fully_scrolled(&mut self) -> Vec<usize> {
        let mut ready = Vec::new();
        let mut pending: Vec<usize> = Vec::with_capacity(2);

        for (index, pair) in self.pairs.iter().enumerate() {
            for half in PipeHalf::BOTH {
                if pair.right_edge(half, self.pipe_width) > 0.0 {
                    continue;
                }
                pending.push(index);
                if pending.len() == 2 {
                    debug_assert_eq!(pending[0], pending[1], "pipe halves out of step");
                    ready.push(pending[0]);
                    pending.clear();
                }
            }
        }

        self.pending_halves = pending.len();
        ready
    }
}
