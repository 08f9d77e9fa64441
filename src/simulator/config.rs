//! Simulation configuration.

use crate::config::GameConfig;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of games to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Fixed frame step in seconds
    pub step_secs: f32,

    /// Game time after which a run is cut off
    pub max_secs_per_run: f32,

    /// Chance of crashing at any gap, however wide
    pub base_crash_chance: f64,

    /// Extra crash chance scaled by how much narrower a gap is than the widest easy gap
    pub narrow_gap_penalty: f64,

    /// Horizontal position of the bird's left edge
    pub bird_x: f32,

    /// Output level (0 = report only, 1 = banner and settings too, 2 = also log every run)
    pub verbosity: u8,

    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        let game = GameConfig::default();
        Self {
            num_runs: 500,
            seed: None,
            step_secs: 1.0 / 60.0,
            max_secs_per_run: 600.0,
            base_crash_chance: 0.01,
            narrow_gap_penalty: 0.2,
            bird_x: game.field_width * 0.1,
            verbosity: 1,
            game,
        }
    }
}

impl SimConfig {
    /// Small deterministic batch for tests and quick checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 20,
            seed: Some(seed),
            max_secs_per_run: 120.0,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Crash probability when passing a gap of `gap` pixels.
    pub fn crash_chance(&self, gap: f32) -> f64 {
        let widest = self.game.difficulty.easy.vertical_gap[1] as f32;
        let narrowness = ((widest - gap) / widest).clamp(0.0, 1.0) as f64;
        (self.base_crash_chance + self.narrow_gap_penalty * narrowness).clamp(0.0, 1.0)
    }
}
