//! Score-driven difficulty tiers.
//!
//! Each tier narrows the vertical gap and tightens the horizontal spacing
//! between obstacle pairs. The active tier only ever moves forward during a
//! run; a restart returns it to [`DifficultyTier::Easy`].

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Named difficulty levels, ordered easiest first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Randomization ranges for one tier. Both ranges are inclusive `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpec {
    /// Score at which this tier becomes active.
    pub threshold: u32,
    /// Distance between the upper and lower pipe of a pair.
    pub vertical_gap: [u32; 2],
    /// Distance from the rightmost pipe to a newly placed pair.
    pub horizontal_spacing: [u32; 2],
}

/// The three tiers with their thresholds and ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: TierSpec,
    pub normal: TierSpec,
    pub hard: TierSpec,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: TierSpec {
                threshold: EASY_THRESHOLD,
                vertical_gap: EASY_VERTICAL_GAP,
                horizontal_spacing: EASY_HORIZONTAL_SPACING,
            },
            normal: TierSpec {
                threshold: NORMAL_THRESHOLD,
                vertical_gap: NORMAL_VERTICAL_GAP,
                horizontal_spacing: NORMAL_HORIZONTAL_SPACING,
            },
            hard: TierSpec {
                threshold: HARD_THRESHOLD,
                vertical_gap: HARD_VERTICAL_GAP,
                horizontal_spacing: HARD_HORIZONTAL_SPACING,
            },
        }
    }
}

impl DifficultyTable {
    pub fn spec(&self, tier: DifficultyTier) -> &TierSpec {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Normal => &self.normal,
            DifficultyTier::Hard => &self.hard,
        }
    }

    /// Tiers paired with their specs, easiest first.
    pub fn iter(&self) -> impl Iterator<Item = (DifficultyTier, &TierSpec)> + '_ {
        DifficultyTier::ALL.into_iter().map(move |t| (t, self.spec(t)))
    }

    /// Highest tier whose threshold has been reached by `score`.
    pub fn tier_for(&self, score: u32) -> DifficultyTier {
        self.iter()
            .filter(|(_, spec)| score >= spec.threshold)
            .map(|(tier, _)| tier)
            .last()
            .unwrap_or(DifficultyTier::Easy)
    }
}

/// Tracks the active tier for a run. Never moves backwards until [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct DifficultyModel {
    current: DifficultyTier,
}

impl DifficultyModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> DifficultyTier {
        self.current
    }

    /// Re-evaluate the tier for `score`. Returns the new tier if it changed.
    pub fn advance(&mut self, table: &DifficultyTable, score: u32) -> Option<DifficultyTier> {
        let candidate = table.tier_for(score);
        if candidate > self.current {
            log::info!(
                "Difficulty raised from {} to {} at score {}",
                self.current,
                candidate,
                score
            );
            self.current = candidate;
            Some(candidate)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.current = DifficultyTier::Easy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        let table = DifficultyTable::default();
        assert_eq!(table.tier_for(0), DifficultyTier::Easy);
        assert_eq!(table.tier_for(29), DifficultyTier::Easy);
        assert_eq!(table.tier_for(30), DifficultyTier::Normal);
        assert_eq!(table.tier_for(59), DifficultyTier::Normal);
        assert_eq!(table.tier_for(60), DifficultyTier::Hard);
        assert_eq!(table.tier_for(u32::MAX), DifficultyTier::Hard);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(DifficultyTier::Easy < DifficultyTier::Normal);
        assert!(DifficultyTier::Normal < DifficultyTier::Hard);
        assert_eq!(DifficultyTier::Hard.index(), 2);
    }

    #[test]
    fn test_reference_ranges() {
        let table = DifficultyTable::default();
        assert_eq!(table.easy.vertical_gap, [150, 200]);
        assert_eq!(table.easy.horizontal_spacing, [300, 350]);
        assert_eq!(table.normal.vertical_gap, [140, 190]);
        assert_eq!(table.hard.horizontal_spacing, [250, 310]);
    }

    #[test]
    fn test_model_never_regresses_on_increasing_scores() {
        let table = DifficultyTable::default();
        let mut model = DifficultyModel::new();
        let mut previous = model.current();
        for score in 0..200 {
            model.advance(&table, score);
            assert!(model.current() >= previous);
            previous = model.current();
        }
        assert_eq!(model.current(), DifficultyTier::Hard);
    }

    #[test]
    fn test_model_ignores_lower_score() {
        let table = DifficultyTable::default();
        let mut model = DifficultyModel::new();
        assert_eq!(model.advance(&table, 61), Some(DifficultyTier::Hard));
        assert_eq!(model.advance(&table, 5), None);
        assert_eq!(model.current(), DifficultyTier::Hard);
    }

    #[test]
    fn test_model_reports_each_transition_once() {
        let table = DifficultyTable::default();
        let mut model = DifficultyModel::new();
        let transitions: Vec<_> = (1..=70).filter_map(|s| model.advance(&table, s)).collect();
        assert_eq!(transitions, vec![DifficultyTier::Normal, DifficultyTier::Hard]);
    }

    #[test]
    fn test_reset_returns_to_easy() {
        let table = DifficultyTable::default();
        let mut model = DifficultyModel::new();
        model.advance(&table, 45);
        model.reset();
        assert_eq!(model.current(), DifficultyTier::Easy);
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&DifficultyTier::Normal).unwrap();
        assert_eq!(json, "\"normal\"");
    }
}
