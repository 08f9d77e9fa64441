//! Integration test: best score persistence
//!
//! The best score is read once when a run is created and written back every
//! time it improves, through whichever store the run was given.

use skyward::utils::init_test_logging;
use skyward::{
    GameConfig, JsonFileStore, KeyValueStore, MemoryStore, Run, RunSignal, BEST_SCORE_KEY,
};
use std::fs;
use std::path::PathBuf;

const FRAME: f32 = 1.0 / 60.0;

fn play_until_score<S: KeyValueStore>(run: &mut Run<S>, target: u32) {
    while run.score() < target {
        run.tick(FRAME);
    }
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("skyward-best-{}-{}", name, std::process::id()));
    fs::remove_dir_all(&dir).ok();
    dir
}

#[test]
fn test_cold_start_then_restart_keeps_best() {
    let mut run = Run::seeded(GameConfig::new(), MemoryStore::new(), 1).unwrap();
    assert_eq!(run.best_score(), 0);

    play_until_score(&mut run, 5);
    assert_eq!(run.best_score(), 5);
    assert_eq!(run.store().get(BEST_SCORE_KEY).as_deref(), Some("5"));

    run.handle(RunSignal::Collision);
    run.handle(RunSignal::Restart);
    assert_eq!(run.score(), 0);
    assert_eq!(run.best_score(), 5);
    assert_eq!(run.store().get(BEST_SCORE_KEY).as_deref(), Some("5"));
}

#[test]
fn test_lower_score_does_not_overwrite() {
    let mut store = MemoryStore::new();
    store.set(BEST_SCORE_KEY, "40").unwrap();
    let mut run = Run::seeded(GameConfig::new(), store, 2).unwrap();

    play_until_score(&mut run, 3);
    run.handle(RunSignal::Collision);

    assert_eq!(run.best_score(), 40);
    let store = run.into_store();
    assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("40"));
    assert_eq!(store.writes(), 1);
}

#[test]
fn test_game_over_does_not_rewrite_committed_best() {
    let mut run = Run::seeded(GameConfig::new(), MemoryStore::new(), 3).unwrap();
    play_until_score(&mut run, 2);
    let writes = run.store().writes();

    run.handle(RunSignal::Collision);
    assert_eq!(run.store().writes(), writes);
}

#[test]
fn test_best_is_written_once_per_improvement() {
    let mut run = Run::seeded(GameConfig::new(), MemoryStore::new(), 4).unwrap();
    play_until_score(&mut run, 4);
    assert_eq!(run.store().writes(), 4);
}

#[test]
fn test_malformed_store_value_starts_at_zero() {
    let mut store = MemoryStore::new();
    store.set(BEST_SCORE_KEY, "NaN").unwrap();
    let mut run = Run::seeded(GameConfig::new(), store, 5).unwrap();
    assert_eq!(run.best_score(), 0);

    play_until_score(&mut run, 1);
    assert_eq!(run.store().get(BEST_SCORE_KEY).as_deref(), Some("1"));
}

#[test]
fn test_file_store_carries_best_between_runs() {
    init_test_logging();
    let dir = temp_dir("file");
    let path = dir.join("storage.json");

    {
        let mut run = Run::seeded(GameConfig::new(), JsonFileStore::open(&path), 6).unwrap();
        play_until_score(&mut run, 3);
        run.handle(RunSignal::Collision);
    }

    let run = Run::seeded(GameConfig::new(), JsonFileStore::open(&path), 7).unwrap();
    assert_eq!(run.best_score(), 3);

    let raw = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[BEST_SCORE_KEY], "3");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_best_never_decreases_over_many_runs() {
    let mut store = MemoryStore::new();
    let mut last_best = 0;

    for seed in 0..10u64 {
        let mut run = Run::seeded(GameConfig::new(), store, seed).unwrap();
        assert!(run.best_score() >= last_best);
        play_until_score(&mut run, (seed as u32 * 7) % 11);
        run.handle(RunSignal::Collision);
        assert!(run.best_score() >= last_best);
        last_best = run.best_score();
        store = run.into_store();
    }
    assert_eq!(last_best, 10);
}
