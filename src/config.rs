//! Tunable game parameters.
//!
//! [`GameConfig::default`] reproduces the reference game. A config can also be
//! loaded from JSON; any field left out keeps its default value.

use crate::constants::*;
use crate::core::difficulty::{DifficultyTable, DifficultyTier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub pipe_width: f32,
    /// Number of obstacle pairs kept in the pool.
    pub pool_size: usize,
    /// X coordinate every pair starts from before its first placement.
    pub pool_start_x: f32,
    /// Horizontal velocity applied to every pipe (px/s, negative scrolls left).
    pub scroll_velocity: f32,
    /// Upward speed handed to the engine on each flap (px/s).
    pub flap_velocity: f32,
    pub resume_countdown_secs: f32,
    pub game_over_countdown_secs: f32,
    pub difficulty: DifficultyTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            margin_top: GAP_MARGIN_TOP,
            margin_bottom: GAP_MARGIN_BOTTOM,
            pipe_width: PIPE_WIDTH,
            pool_size: PIPES_TO_RENDER,
            pool_start_x: POOL_START_X,
            scroll_velocity: PIPE_SCROLL_VELOCITY,
            flap_velocity: FLAP_VELOCITY,
            resume_countdown_secs: RESUME_COUNTDOWN_SECS,
            game_over_countdown_secs: GAME_OVER_COUNTDOWN_SECS,
            difficulty: DifficultyTable::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    NotFinite(&'static str),
    NonPositive(&'static str),
    NoVerticalRoom { available: f32 },
    OddPoolSize(usize),
    ScrollNotLeftward(f32),
    FirstThresholdNotZero(u32),
    ThresholdsNotAscending(DifficultyTier),
    InvalidRange {
        tier: DifficultyTier,
        range: &'static str,
        bounds: [u32; 2],
    },
    GapExceedsField {
        tier: DifficultyTier,
        max_gap: u32,
        available: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read config: {}", e),
            Self::Parse(e) => write!(f, "could not parse config: {}", e),
            Self::NotFinite(field) => write!(f, "{} must be a finite number", field),
            Self::NonPositive(field) => write!(f, "{} must be greater than zero", field),
            Self::NoVerticalRoom { available } => {
                write!(f, "margins leave no vertical room ({} px)", available)
            }
            Self::OddPoolSize(n) => write!(
                f,
                "pool size must be even and non-zero so pipes recycle in pairs (got {})",
                n
            ),
            Self::ScrollNotLeftward(v) => {
                write!(f, "scroll velocity must be negative (got {})", v)
            }
            Self::FirstThresholdNotZero(t) => {
                write!(f, "easy tier must start at score 0 (got {})", t)
            }
            Self::ThresholdsNotAscending(tier) => {
                write!(f, "{} tier threshold is below the previous tier", tier)
            }
            Self::InvalidRange {
                tier,
                range,
                bounds,
            } => write!(
                f,
                "{} tier {} range [{}, {}] must satisfy 0 < min <= max",
                tier, range, bounds[0], bounds[1]
            ),
            Self::GapExceedsField {
                tier,
                max_gap,
                available,
            } => write!(
                f,
                "{} tier gap up to {} px does not fit in {} px of vertical room",
                tier, max_gap, available
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

fn valid_range(bounds: [u32; 2]) -> bool {
    bounds[0] > 0 && bounds[0] <= bounds[1]
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Vertical space a gap may occupy once both margins are taken.
    pub fn vertical_room(&self) -> f32 {
        self.field_height - self.margin_top - self.margin_bottom
    }

    /// Check the config before a run uses it. Non-finite values are rejected
    /// first, so every later comparison sees a real number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("pipe_width", self.pipe_width),
            ("pool_start_x", self.pool_start_x),
            ("scroll_velocity", self.scroll_velocity),
            ("flap_velocity", self.flap_velocity),
            ("resume_countdown_secs", self.resume_countdown_secs),
            ("game_over_countdown_secs", self.game_over_countdown_secs),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("pipe_width", self.pipe_width),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.margin_top < 0.0 || self.margin_bottom < 0.0 {
            return Err(ConfigError::NonPositive("margin"));
        }
        if self.resume_countdown_secs < 0.0 || self.game_over_countdown_secs < 0.0 {
            return Err(ConfigError::NonPositive("countdown"));
        }

        let available = self.vertical_room();
        if available <= 0.0 {
            return Err(ConfigError::NoVerticalRoom { available });
        }
        if self.pool_size == 0 || self.pool_size % 2 != 0 {
            return Err(ConfigError::OddPoolSize(self.pool_size));
        }
        if self.scroll_velocity >= 0.0 {
            return Err(ConfigError::ScrollNotLeftward(self.scroll_velocity));
        }

        if self.difficulty.easy.threshold != 0 {
            return Err(ConfigError::FirstThresholdNotZero(
                self.difficulty.easy.threshold,
            ));
        }

        let mut previous_threshold = 0;
        for (tier, spec) in self.difficulty.iter() {
            if spec.threshold < previous_threshold {
                return Err(ConfigError::ThresholdsNotAscending(tier));
            }
            previous_threshold = spec.threshold;

            for (range, bounds) in [
                ("vertical gap", spec.vertical_gap),
                ("horizontal spacing", spec.horizontal_spacing),
            ] {
                if !valid_range(bounds) {
                    return Err(ConfigError::InvalidRange {
                        tier,
                        range,
                        bounds,
                    });
                }
            }

            if spec.vertical_gap[1] as f32 > available {
                return Err(ConfigError::GapExceedsField {
                    tier,
                    max_gap: spec.vertical_gap[1],
                    available,
                });
            }
        }

        Ok(())
    }
}
