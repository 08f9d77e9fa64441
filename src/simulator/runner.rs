//! Plays simulated games against a real [`Run`].
//!
//! The simulator stands in for the engine: it ticks the run at a fixed step,
//! watches pipes pass the bird, and reports crashes back through a signal
//! channel exactly as a collision system would. The best score is carried
//! from game to game through a shared store, which can be the on-disk one so
//! it also carries over between invocations.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::config::ConfigError;
use crate::core::run::Run;
use crate::core::signals::RunSignal;
use crate::utils::persistence::{KeyValueStore, MemoryStore};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::mpsc;

/// Keeps the pilot's dice independent from the pipe layout for the same seed.
const PILOT_SEED_SALT: u64 = 0x5eed_b12d;

/// Run the full simulation against a fresh in-memory store.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, ConfigError> {
    run_simulation_with_store(config, MemoryStore::new()).map(|(report, _)| report)
}

/// Run the full simulation, loading and saving the best score in `store`.
/// The store is handed back once every run is done.
pub fn run_simulation_with_store<S: KeyValueStore>(
    config: &SimConfig,
    mut store: S,
) -> Result<(SimReport, S), ConfigError> {
    config.game.validate()?;

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    let base_seed = config.seed.unwrap_or_else(rand::random);

    for run_idx in 0..config.num_runs {
        let seed = base_seed.wrapping_add(run_idx as u64);
        let (stats, returned) = simulate_single_run(config, store, seed)?;
        store = returned;

        if config.verbosity >= 2 {
            log::info!(
                "Run {}/{} - score {}, tier {}, {:.1}s{}",
                run_idx + 1,
                config.num_runs,
                stats.final_score,
                stats.final_tier,
                stats.seconds_survived,
                if stats.timed_out { " (timed out)" } else { "" }
            );
        }
        all_runs.push(stats);
    }

    Ok((SimReport::from_runs(all_runs), store))
}

/// Play one game to a crash or the time limit.
fn simulate_single_run<S: KeyValueStore>(
    config: &SimConfig,
    store: S,
    seed: u64,
) -> Result<(RunStats, S), ConfigError> {
    let mut run = Run::seeded(config.game.clone(), store, seed)?;
    let mut pilot = ChaCha8Rng::seed_from_u64(seed ^ PILOT_SEED_SALT);
    let (collisions, mut signals) = mpsc::channel();

    let mut stats = RunStats::default();
    let mut last_x: Vec<f32> = run.pipes().iter().map(|p| p.x()).collect();
    let mut elapsed = 0.0f32;

    while elapsed < config.max_secs_per_run {
        let result = run.tick(config.step_secs);
        elapsed += config.step_secs;
        for event in &result.events {
            stats.record(event);
        }

        for pair in run.pipes() {
            let previous = last_x[pair.id];
            if previous > config.bird_x && pair.x() <= config.bird_x {
                stats.gaps_attempted += 1;
                if pilot.gen_bool(config.crash_chance(pair.gap())) {
                    collisions.send(RunSignal::Collision).ok();
                }
            }
            last_x[pair.id] = pair.x();
        }

        for event in run.pump(&mut signals) {
            stats.record(&event);
        }
        if run.is_game_over() {
            break;
        }
    }

    stats.timed_out = !run.is_game_over();
    if stats.timed_out {
        // Commit the best score the same way a crash would
        for event in run.game_over() {
            stats.record(&event);
        }
    }

    stats.final_score = run.score();
    stats.final_tier = run.tier();
    stats.best_after = run.best_score();
    stats.seconds_survived = elapsed;

    Ok((stats, run.into_store()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::constants::BEST_SCORE_KEY;

    #[test]
    fn test_same_seed_same_report() {
        let config = SimConfig::quick(1234);
        let a = run_simulation(&config).unwrap();
        let b = run_simulation(&config).unwrap();
        assert_eq!(a.max_score, b.max_score);
        assert_eq!(a.median_score, b.median_score);
        assert_eq!(a.placements_per_tier, b.placements_per_tier);
    }

    #[test]
    fn test_invalid_game_config_is_rejected() {
        let config = SimConfig {
            game: GameConfig {
                pool_size: 1,
                ..Default::default()
            },
            ..SimConfig::quick(1)
        };
        assert!(run_simulation(&config).is_err());
    }

    #[test]
    fn test_certain_crash_ends_at_first_gap() {
        let config = SimConfig {
            base_crash_chance: 1.0,
            ..SimConfig::quick(9)
        };
        let (stats, store) = simulate_single_run(&config, MemoryStore::new(), 9).unwrap();
        assert!(!stats.timed_out);
        assert_eq!(stats.gaps_attempted, 1);
        assert_eq!(stats.final_score, 0);
        assert!(store.get(BEST_SCORE_KEY).is_none());
    }

    #[test]
    fn test_perfect_pilot_times_out_and_saves_best() {
        let config = SimConfig {
            base_crash_chance: 0.0,
            narrow_gap_penalty: 0.0,
            max_secs_per_run: 60.0,
            ..SimConfig::quick(3)
        };
        let (stats, store) = simulate_single_run(&config, MemoryStore::new(), 3).unwrap();
        assert!(stats.timed_out);
        assert!(stats.final_score > 0);
        assert_eq!(stats.best_after, stats.final_score);
        assert_eq!(
            store.get(BEST_SCORE_KEY),
            Some(stats.final_score.to_string())
        );
    }

    #[test]
    fn test_best_score_never_drops_across_runs() {
        let report = run_simulation(&SimConfig::quick(77)).unwrap();
        let bests: Vec<u32> = report.run_stats.iter().map(|r| r.best_after).collect();
        assert!(bests.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(report.final_best_score, report.max_score);
    }

    #[test]
    fn test_best_score_carries_over_through_given_store() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "9999").unwrap();

        let (report, store) = run_simulation_with_store(&SimConfig::quick(4), store).unwrap();
        assert_eq!(report.final_best_score, 9999);
        assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("9999"));
        assert_eq!(store.writes(), 1);
    }
}
