//! Obstacle placement and the recycle step that drives scoring and difficulty.

use super::pool::PipePairPool;
use super::types::{ObstaclePair, Placement};
use crate::config::GameConfig;
use crate::core::difficulty::{DifficultyModel, DifficultyTier, TierSpec};
use crate::core::score::ScoreTracker;
use rand::Rng;

/// What happened when one pair was moved back to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Recycled {
    pub pair_id: usize,
    /// Tier whose ranges were used for this placement.
    pub tier: DifficultyTier,
    pub placement: Placement,
    /// Score after the increment for this pair.
    pub score: u32,
    /// The score beat the best score and should be persisted.
    pub new_best: bool,
    /// Set when this recycle pushed the run into a harder tier.
    pub tier_changed: Option<DifficultyTier>,
}

fn draw<R: Rng>(rng: &mut R, bounds: [u32; 2]) -> u32 {
    let lo = bounds[0].min(bounds[1]);
    let hi = bounds[0].max(bounds[1]);
    rng.gen_range(lo..=hi)
}

/// Largest x across every pipe in `pairs`, never less than 0.
pub fn rightmost_x(pairs: &[ObstaclePair]) -> f32 {
    pairs
        .iter()
        .flat_map(|p| [p.upper.x, p.lower.x])
        .fold(0.0, f32::max)
}

/// Place `pair` to the right of `rightmost_x` with a random gap drawn from `tier`.
///
/// A gap wider than the room between the margins is shrunk to fit so the
/// vertical position range can never be inverted.
pub fn place_obstacle_pair<R: Rng>(
    pair: &mut ObstaclePair,
    tier: &TierSpec,
    rightmost_x: f32,
    config: &GameConfig,
    rng: &mut R,
) -> Placement {
    let mut vertical_gap = draw(rng, tier.vertical_gap);
    let room = config.vertical_room().max(0.0).floor() as u32;
    let clamped = vertical_gap > room;
    if clamped {
        log::warn!(
            "Gap of {} px does not fit in {} px between margins, clamping",
            vertical_gap,
            room
        );
        vertical_gap = room;
    }

    let top = config.margin_top.max(0.0).ceil() as u32;
    let lowest = (config.field_height - config.margin_bottom - vertical_gap as f32)
        .max(0.0)
        .floor() as u32;
    let vertical_position = rng.gen_range(top..=lowest.max(top));

    let horizontal_spacing = draw(rng, tier.horizontal_spacing);

    pair.upper.x = rightmost_x + horizontal_spacing as f32;
    pair.upper.y = vertical_position as f32;
    pair.lower.x = pair.upper.x;
    pair.lower.y = pair.upper.y + vertical_gap as f32;
    pair.active = true;

    log::debug!(
        "Placed pair {} at x={} (gap {} at y={})",
        pair.id,
        pair.upper.x,
        vertical_gap,
        vertical_position
    );

    Placement {
        vertical_gap,
        vertical_position,
        horizontal_spacing,
        clamped,
    }
}

/// Move every fully scrolled pair back to the right edge.
///
/// Each recycle uses the tier active before it, then bumps the score,
/// promotes the best score and re-evaluates the difficulty.
pub fn recycle_pipes<R: Rng>(
    pool: &mut PipePairPool,
    difficulty: &mut DifficultyModel,
    score: &mut ScoreTracker,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<Recycled> {
    let scrolled = pool.detect_fully_scrolled();
    let mut recycled = Vec::with_capacity(scrolled.len());

    for index in scrolled {
        let tier = difficulty.current();
        let placement = pool.place(index, config.difficulty.spec(tier), config, rng);

        let current = score.increment();
        let new_best = score.commit_if_best();
        let tier_changed = difficulty.advance(&config.difficulty, current);

        recycled.push(Recycled {
            pair_id: pool.pairs()[index].id,
            tier,
            placement,
            score: current,
            new_best,
            tier_changed,
        });
    }

    recycled
}
