//! Simulation report generation.

use crate::core::difficulty::DifficultyTier;
use crate::core::tick::RunEvent;
use serde::Serialize;
use std::collections::BTreeMap;

/// Running totals of placements made in one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TierPlacements {
    pub count: u64,
    pub gap_total: u64,
    pub spacing_total: u64,
}

/// Statistics for one simulated game.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub final_score: u32,
    pub best_after: u32,
    pub final_tier: DifficultyTier,
    pub seconds_survived: f32,
    pub timed_out: bool,
    pub gaps_attempted: u32,
    pub new_bests: u32,
    pub placements: [TierPlacements; 3],
}

impl RunStats {
    /// Fold one run event into the totals.
    pub fn record(&mut self, event: &RunEvent) {
        match event {
            RunEvent::PipeRecycled {
                tier, gap, spacing, ..
            } => {
                let totals = &mut self.placements[tier.index()];
                totals.count += 1;
                totals.gap_total += *gap as u64;
                totals.spacing_total += *spacing as u64;
            }
            RunEvent::NewBestScore { .. } => self.new_bests += 1,
            _ => {}
        }
    }
}

/// Aggregated results from multiple simulated games.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,

    pub avg_score: f64,
    pub median_score: u32,
    pub max_score: u32,
    pub final_best_score: u32,
    pub avg_seconds_survived: f64,

    /// Share of runs that reached each tier (easy, normal, hard)
    pub tier_reach_rate: [f64; 3],

    pub placements_per_tier: [u64; 3],
    pub avg_gap_per_tier: [f64; 3],
    pub avg_spacing_per_tier: [f64; 3],

    /// Runs per score bucket of ten (key is the bucket's lowest score)
    pub score_distribution: BTreeMap<u32, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(total: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs as u64;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let avg_score = average(runs.iter().map(|r| r.final_score as f64).sum(), n);
        let avg_seconds_survived =
            average(runs.iter().map(|r| r.seconds_survived as f64).sum(), n);

        let median_score = {
            let mut sorted: Vec<u32> = runs.iter().map(|r| r.final_score).collect();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        let max_score = runs.iter().map(|r| r.final_score).max().unwrap_or(0);
        let final_best_score = runs.iter().map(|r| r.best_after).max().unwrap_or(0);

        let mut tier_reach_rate = [0.0; 3];
        let mut placements_per_tier = [0u64; 3];
        let mut avg_gap_per_tier = [0.0; 3];
        let mut avg_spacing_per_tier = [0.0; 3];
        for tier in DifficultyTier::ALL {
            let i = tier.index();
            let reached = runs.iter().filter(|r| r.final_tier >= tier).count() as f64;
            tier_reach_rate[i] = average(reached, n);

            let count: u64 = runs.iter().map(|r| r.placements[i].count).sum();
            let gaps: u64 = runs.iter().map(|r| r.placements[i].gap_total).sum();
            let spacings: u64 = runs.iter().map(|r| r.placements[i].spacing_total).sum();
            placements_per_tier[i] = count;
            avg_gap_per_tier[i] = average(gaps as f64, count);
            avg_spacing_per_tier[i] = average(spacings as f64, count);
        }

        let mut score_distribution = BTreeMap::new();
        for run in &runs {
            *score_distribution
                .entry(run.final_score / 10 * 10)
                .or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_timed_out,
            avg_score,
            median_score,
            max_score,
            final_best_score,
            avg_seconds_survived,
            tier_reach_rate,
            placements_per_tier,
            avg_gap_per_tier,
            avg_spacing_per_tier,
            score_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── SCORES ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:         {:.1}\n", self.avg_score));
        report.push_str(&format!("  Median Score:      {}\n", self.median_score));
        report.push_str(&format!("  Max Score:         {}\n", self.max_score));
        report.push_str(&format!("  Best Score Saved:  {}\n", self.final_best_score));
        report.push_str(&format!(
            "  Avg Survival:      {:.1}s\n\n",
            self.avg_seconds_survived
        ));

        report.push_str("── SCORE DISTRIBUTION ───────────────────────────────────────────\n");
        for (bucket, runs) in &self.score_distribution {
            let pct = average(*runs as f64 * 100.0, self.num_runs as u64);
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:>4}-{:<4} {:>5.1}% {}\n",
                bucket,
                bucket + 9,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── DIFFICULTY ───────────────────────────────────────────────────\n");
        report.push_str("  Tier     Reached   Placed    Avg Gap   Avg Spacing\n");
        report.push_str("  ──────   ───────   ──────    ───────   ───────────\n");
        for tier in DifficultyTier::ALL {
            let i = tier.index();
            report.push_str(&format!(
                "  {:<6}   {:>6.1}%   {:>6}    {:>7.1}   {:>11.1}\n",
                tier.name(),
                self.tier_reach_rate[i] * 100.0,
                self.placements_per_tier[i],
                self.avg_gap_per_tier[i],
                self.avg_spacing_per_tier[i]
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.median_score < 5 {
            "TOO HARD - Most runs end within a few pipes"
        } else if self.tier_reach_rate[DifficultyTier::Hard.index()] > 0.5 {
            "TOO EASY - Most runs reach the hard tier"
        } else {
            "GOOD - Tiers are reached progressively"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        if self.runs_timed_out > 0 {
            report.push_str(&format!(
                "  ⚠️  {} runs hit the time limit - raise it or the crash odds\n",
                self.runs_timed_out
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
