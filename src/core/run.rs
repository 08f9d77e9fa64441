//! A single play session: obstacle pool, score, difficulty and run flow.
//!
//! The engine owns the frame loop and calls [`Run::tick`] once per frame
//! with the elapsed time. Input and collisions come in as [`RunSignal`]s.
//!
//! ```text
//!   Running ──Collision/OutOfBounds──▶ GameOver ──countdown / Restart──▶ Running
//! ```
//!
//! Pausing is tracked separately from the run state. While paused nothing
//! advances; resuming waits out a short countdown before pipes move again.

use crate::config::{ConfigError, GameConfig};
use crate::core::difficulty::{DifficultyModel, DifficultyTier};
use crate::core::score::ScoreTracker;
use crate::core::signals::{RunSignal, SignalSource};
use crate::core::tick::{RunEvent, TickResult};
use crate::pipes::{recycle_pipes, ObstaclePair, PipePairPool};
use crate::utils::persistence::KeyValueStore;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunState {
    Running,
    /// Recycling and scoring are suspended until the countdown runs out.
    GameOver { restart_in: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PauseState {
    Active,
    Paused,
    /// Counting down before pipes move again.
    Resuming { remaining: f32 },
}

/// Step a countdown. Returns the newly shown whole second, if it changed,
/// and whether the countdown finished.
fn step_countdown(remaining: &mut f32, dt: f32) -> (Option<u32>, bool) {
    let before = remaining.ceil() as u32;
    *remaining -= dt;
    if *remaining <= 0.0 {
        return (None, true);
    }
    let after = remaining.ceil() as u32;
    ((after < before).then_some(after), false)
}

pub struct Run<S: KeyValueStore, R: Rng = ChaCha8Rng> {
    config: GameConfig,
    pool: PipePairPool,
    score: ScoreTracker,
    difficulty: DifficultyModel,
    state: RunState,
    pause: PauseState,
    store: S,
    rng: R,
}

impl<S: KeyValueStore> Run<S, ChaCha8Rng> {
    /// Deterministic run, used by tests and the simulator.
    pub fn seeded(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, store, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<S: KeyValueStore, R: Rng> Run<S, R> {
    /// Validate `config`, load the best score from `store` and lay out the pool.
    pub fn new(config: GameConfig, store: S, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let score = ScoreTracker::load(&store);
        let pool = PipePairPool::initialize(
            config.pool_size,
            config.pool_start_x,
            &config.difficulty.easy,
            &config,
            &mut rng,
        );
        log::info!(
            "Run started with {} pipe pairs, best score {}",
            pool.len(),
            score.best()
        );
        Ok(Self {
            config,
            pool,
            score,
            difficulty: DifficultyModel::new(),
            state: RunState::Running,
            pause: PauseState::Active,
            store,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pipes(&self) -> &[ObstaclePair] {
        self.pool.pairs()
    }

    pub fn pool(&self) -> &PipePairPool {
        &self.pool
    }

    pub fn score(&self) -> u32 {
        self.score.current()
    }

    pub fn best_score(&self) -> u32 {
        self.score.best()
    }

    pub fn tier(&self) -> DifficultyTier {
        self.difficulty.current()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, RunState::GameOver { .. })
    }

    /// True when pipes scroll and flaps are accepted.
    pub fn is_live(&self) -> bool {
        self.state == RunState::Running && self.pause == PauseState::Active
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Advance the run by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickResult {
        let dt = dt.max(0.0);
        let mut result = TickResult::new();

        if let RunState::GameOver { mut restart_in } = self.state {
            let (shown, done) = step_countdown(&mut restart_in, dt);
            if done {
                result.extend(self.restart());
            } else {
                self.state = RunState::GameOver { restart_in };
                if let Some(remaining) = shown {
                    result.push(RunEvent::CountdownTick { remaining });
                }
            }
            return result;
        }

        match self.pause {
            PauseState::Paused => return result,
            PauseState::Resuming { mut remaining } => {
                let (shown, done) = step_countdown(&mut remaining, dt);
                if done {
                    self.pause = PauseState::Active;
                    result.push(RunEvent::Resumed);
                } else {
                    self.pause = PauseState::Resuming { remaining };
                    if let Some(remaining) = shown {
                        result.push(RunEvent::CountdownTick { remaining });
                    }
                }
                return result;
            }
            PauseState::Active => {}
        }

        self.pool.tick(dt);
        let recycled = recycle_pipes(
            &mut self.pool,
            &mut self.difficulty,
            &mut self.score,
            &self.config,
            &mut self.rng,
        );

        for event in recycled {
            result.push(RunEvent::PipeRecycled {
                pair_id: event.pair_id,
                tier: event.tier,
                x: self.pool.pairs()[event.pair_id].x(),
                gap: event.placement.vertical_gap,
                spacing: event.placement.horizontal_spacing,
            });
            result.push(RunEvent::ScoreChanged { score: event.score });
            if event.new_best {
                log::debug!("New best score {}", self.score.best());
                self.score.persist(&mut self.store);
                result.push(RunEvent::NewBestScore {
                    best: self.score.best(),
                });
            }
            if let Some(tier) = event.tier_changed {
                result.push(RunEvent::DifficultyChanged { tier });
            }
        }

        result
    }

    pub fn handle(&mut self, signal: RunSignal) -> Vec<RunEvent> {
        match signal {
            RunSignal::Flap => self.flap().into_iter().collect(),
            RunSignal::Pause => self.pause(),
            RunSignal::Resume => self.resume(),
            RunSignal::Collision | RunSignal::OutOfBounds => self.game_over(),
            RunSignal::Restart => self.restart(),
        }
    }

    /// Handle every signal `source` has queued.
    pub fn pump(&mut self, source: &mut impl SignalSource) -> Vec<RunEvent> {
        let mut events = Vec::new();
        while let Some(signal) = source.poll_signal() {
            events.extend(self.handle(signal));
        }
        events
    }

    pub fn flap(&self) -> Option<RunEvent> {
        self.is_live().then(|| RunEvent::Flapped {
            velocity_y: -self.config.flap_velocity,
        })
    }

    pub fn pause(&mut self) -> Vec<RunEvent> {
        if self.state != RunState::Running || self.pause == PauseState::Paused {
            return Vec::new();
        }
        self.pause = PauseState::Paused;
        log::debug!("Run paused at score {}", self.score.current());
        vec![RunEvent::Paused]
    }

    /// Start (or restart) the resume countdown.
    pub fn resume(&mut self) -> Vec<RunEvent> {
        if self.state != RunState::Running || self.pause == PauseState::Active {
            return Vec::new();
        }
        let remaining = self.config.resume_countdown_secs;
        if remaining <= 0.0 {
            self.pause = PauseState::Active;
            return vec![RunEvent::Resumed];
        }
        self.pause = PauseState::Resuming { remaining };
        vec![RunEvent::CountdownTick {
            remaining: remaining.ceil() as u32,
        }]
    }

    pub fn game_over(&mut self) -> Vec<RunEvent> {
        if self.is_game_over() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.score.commit_if_best() {
            self.score.persist(&mut self.store);
            events.push(RunEvent::NewBestScore {
                best: self.score.best(),
            });
        }

        let restart_in = self.config.game_over_countdown_secs;
        self.state = RunState::GameOver { restart_in };
        self.pause = PauseState::Active;
        log::info!(
            "Game over with score {} (best {})",
            self.score.current(),
            self.score.best()
        );

        events.push(RunEvent::GameOver {
            score: self.score.current(),
            best: self.score.best(),
        });
        if restart_in > 0.0 {
            events.push(RunEvent::CountdownTick {
                remaining: restart_in.ceil() as u32,
            });
        }
        events
    }

    /// Fresh pool, zero score, easy tier. The best score carries over.
    pub fn restart(&mut self) -> Vec<RunEvent> {
        self.pool = PipePairPool::initialize(
            self.config.pool_size,
            self.config.pool_start_x,
            &self.config.difficulty.easy,
            &self.config,
            &mut self.rng,
        );
        self.score.reset();
        self.difficulty.reset();
        self.state = RunState::Running;
        self.pause = PauseState::Active;
        log::info!("Run restarted, best score {}", self.score.best());
        vec![RunEvent::Restarted]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BEST_SCORE_KEY;
    use crate::utils::persistence::MemoryStore;

    fn new_run() -> Run<MemoryStore> {
        Run::seeded(GameConfig::new(), MemoryStore::new(), 42).unwrap()
    }

    /// Ticks until the first pair recycles.
    fn tick_until_recycle(run: &mut Run<MemoryStore>) -> TickResult {
        for _ in 0..10_000 {
            let result = run.tick(1.0 / 60.0);
            if result.recycled() > 0 {
                return result;
            }
        }
        panic!("no pipe recycled");
    }

    #[test]
    fn test_step_countdown_whole_seconds() {
        let mut remaining = 3.0;
        assert_eq!(step_countdown(&mut remaining, 0.5), (None, false));
        assert_eq!(step_countdown(&mut remaining, 0.5), (Some(2), false));
        assert_eq!(step_countdown(&mut remaining, 1.0), (Some(1), false));
        assert_eq!(step_countdown(&mut remaining, 1.0), (None, true));
    }

    #[test]
    fn test_new_run_starts_running() {
        let run = new_run();
        assert_eq!(run.state(), RunState::Running);
        assert_eq!(run.pause_state(), PauseState::Active);
        assert_eq!(run.score(), 0);
        assert_eq!(run.tier(), DifficultyTier::Easy);
        assert_eq!(run.pipes().len(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            pool_size: 5,
            ..Default::default()
        };
        assert!(Run::seeded(config, MemoryStore::new(), 1).is_err());
    }

    #[test]
    fn test_nan_scroll_cannot_start_a_run() {
        let config = GameConfig {
            scroll_velocity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            Run::seeded(config, MemoryStore::new(), 1),
            Err(ConfigError::NotFinite("scroll_velocity"))
        ));
    }

    #[test]
    fn test_tick_scrolls_pipes() {
        let mut run = new_run();
        let before = run.pipes()[0].x();
        run.tick(0.1);
        assert!((run.pipes()[0].x() - (before - 20.0)).abs() < 1e-3);
    }

    #[test]
    fn test_recycle_scores_and_persists() {
        let mut run = new_run();
        let result = tick_until_recycle(&mut run);
        assert_eq!(run.score(), 1);
        assert_eq!(run.best_score(), 1);
        assert!(result
            .events
            .contains(&RunEvent::ScoreChanged { score: 1 }));
        assert!(result.events.contains(&RunEvent::NewBestScore { best: 1 }));
        assert_eq!(run.store().get(BEST_SCORE_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn test_paused_run_does_not_move() {
        let mut run = new_run();
        assert_eq!(run.handle(RunSignal::Pause), vec![RunEvent::Paused]);
        let before = run.pipes()[0].x();
        assert!(run.tick(5.0).is_empty());
        assert_eq!(run.pipes()[0].x(), before);
    }

    #[test]
    fn test_flap_only_when_live() {
        let mut run = new_run();
        assert_eq!(
            run.flap(),
            Some(RunEvent::Flapped {
                velocity_y: -300.0
            })
        );
        run.pause();
        assert!(run.flap().is_none());
        run.resume();
        assert!(run.flap().is_none());
    }

    #[test]
    fn test_resume_counts_down_before_moving() {
        let mut run = new_run();
        run.pause();
        assert_eq!(
            run.resume(),
            vec![RunEvent::CountdownTick { remaining: 3 }]
        );

        let before = run.pipes()[0].x();
        assert_eq!(
            run.tick(1.0).events,
            vec![RunEvent::CountdownTick { remaining: 2 }]
        );
        assert_eq!(
            run.tick(1.0).events,
            vec![RunEvent::CountdownTick { remaining: 1 }]
        );
        assert_eq!(run.tick(1.0).events, vec![RunEvent::Resumed]);
        assert_eq!(run.pipes()[0].x(), before);
        assert!(run.is_live());

        run.tick(0.1);
        assert!(run.pipes()[0].x() < before);
    }

    #[test]
    fn test_resume_again_restarts_countdown() {
        let mut run = new_run();
        run.pause();
        run.resume();
        run.tick(2.5);
        run.resume();
        assert_eq!(
            run.pause_state(),
            PauseState::Resuming { remaining: 3.0 }
        );
    }

    #[test]
    fn test_resume_when_active_is_ignored() {
        let mut run = new_run();
        assert!(run.resume().is_empty());
        assert!(run.is_live());
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut run = new_run();
        tick_until_recycle(&mut run);

        let events = run.handle(RunSignal::Collision);
        assert!(events.contains(&RunEvent::GameOver { score: 1, best: 1 }));
        assert!(run.is_game_over());
        assert!(run.handle(RunSignal::OutOfBounds).is_empty());
        assert!(run.flap().is_none());
    }

    #[test]
    fn test_game_over_suspends_scrolling() {
        let mut run = new_run();
        run.game_over();
        let before = run.pipes()[0].x();
        run.tick(1.0);
        assert_eq!(run.pipes()[0].x(), before);
    }

    #[test]
    fn test_game_over_countdown_restarts() {
        let mut run = new_run();
        tick_until_recycle(&mut run);
        run.game_over();

        assert!(!run.tick(1.0).restarted());
        assert!(!run.tick(1.0).restarted());
        assert!(run.tick(1.0).restarted());

        assert_eq!(run.state(), RunState::Running);
        assert_eq!(run.score(), 0);
        assert_eq!(run.best_score(), 1);
        assert_eq!(run.tier(), DifficultyTier::Easy);
    }

    #[test]
    fn test_restart_signal_is_immediate() {
        let mut run = new_run();
        run.game_over();
        assert_eq!(run.handle(RunSignal::Restart), vec![RunEvent::Restarted]);
        assert!(run.is_live());
    }

    #[test]
    fn test_pump_drains_queue() {
        let mut run = new_run();
        let mut queue: std::collections::VecDeque<RunSignal> =
            [RunSignal::Flap, RunSignal::Pause, RunSignal::Flap]
                .into_iter()
                .collect();
        let events = run.pump(&mut queue);
        assert_eq!(
            events,
            vec![
                RunEvent::Flapped {
                    velocity_y: -300.0
                },
                RunEvent::Paused
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut run = new_run();
        let before = run.pipes()[0].x();
        run.tick(-1.0);
        assert_eq!(run.pipes()[0].x(), before);
    }
}
