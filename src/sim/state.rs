//! Run state and level transitions
//!
//! Everything the simulation mutates lives in `GameState`. Level transitions
//! generate the replacement level first and only then swap it in.

use serde::{Deserialize, Serialize};

use super::level::Level;
use super::player::Player;
use super::sampler::Sampler;
use crate::error::GenResult;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Camp reached, waiting for the action key
    LevelComplete,
    /// Lives exhausted, waiting for the action key
    GameOver,
}

/// Things that happened during a tick, for the host to react to (sound, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh level was swapped in
    LevelStarted { level: u32 },
    Jumped,
    FellIntoCanyon,
    CollectableFound { index: usize },
    CampReached,
    /// A life was lost and the level restarted
    LifeLost { lives_left: u32 },
    GameOver,
}

/// Stream offset separating decoration randomness from gameplay randomness
const FX_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Gameplay RNG (level layouts)
    sampler: Sampler,
    /// Decoration RNG (particles)
    fx: Sampler,
    /// 1-based level number
    pub level_number: u32,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    /// World offset applied when drawing; not used for gameplay checks
    pub scroll_pos: f32,
    pub player: Player,
    pub level: Level,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new run with default tuning
    pub fn new(seed: u64) -> GenResult<Self> {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> GenResult<Self> {
        tuning.validate()?;
        let mut sampler = Sampler::new(seed);
        let mut fx = Sampler::new(seed ^ FX_STREAM);
        let level = Level::generate(&mut sampler, &mut fx, &tuning)?;

        log::info!("New run with seed {}", seed);

        Ok(Self {
            seed,
            sampler,
            fx,
            level_number: 1,
            score: 0,
            lives: tuning.starting_lives,
            phase: GamePhase::Playing,
            scroll_pos: tuning.start_scroll,
            player: Player::spawn(tuning.start_scroll),
            level,
            time_ticks: 0,
            events: vec![GameEvent::LevelStarted { level: 1 }],
            tuning,
        })
    }

    /// Generate and swap in a new level. On failure nothing changes.
    fn start_level(&mut self, level_number: u32, score: u32) -> GenResult<()> {
        let level = Level::generate(&mut self.sampler, &mut self.fx, &self.tuning)?;

        self.level = level;
        self.level_number = level_number;
        self.score = score;
        self.scroll_pos = self.tuning.start_scroll;
        self.player = Player::spawn(self.tuning.start_scroll);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted {
            level: level_number,
        });

        log::info!(
            "Level {} started (score {}, lives {})",
            level_number,
            score,
            self.lives
        );
        Ok(())
    }

    /// LevelComplete -> Playing on the next level, score carried
    pub fn advance_level(&mut self) -> GenResult<()> {
        self.start_level(self.level_number + 1, self.score)
    }

    /// GameOver -> Playing from scratch
    pub fn restart_run(&mut self) -> GenResult<()> {
        self.start_level(1, 0)?;
        self.lives = self.tuning.starting_lives;
        Ok(())
    }

    /// Take a life after falling off the world.
    ///
    /// With lives left the current level number restarts on a freshly generated
    /// layout, keeping the score; otherwise the run is over.
    /// If the replacement level cannot be generated the life is not taken and
    /// the error is returned.
    pub fn lose_life(&mut self) -> GenResult<()> {
        let lives_left = self.lives.saturating_sub(1);
        if lives_left > 0 {
            self.start_level(self.level_number, self.score)?;
            self.lives = lives_left;
            self.events.push(GameEvent::LifeLost { lives_left });
        } else {
            self.lives = 0;
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!(
                "Game over on level {} with score {}",
                self.level_number,
                self.score
            );
        }
        Ok(())
    }

    /// Mark the level complete (camp reached)
    pub fn complete_level(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::LevelComplete;
            log::info!("Level {} complete, score {}", self.level_number, self.score);
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Split borrow for the campfire update
    pub(crate) fn campfire_parts(&mut self) -> (&mut Level, &mut Sampler) {
        (&mut self.level, &mut self.fx)
    }

    /// Decoration RNG for the renderer's color sampling
    pub fn fx_sampler(&self) -> Sampler {
        self.fx.clone()
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run() {
        let mut state = GameState::new(12345).unwrap();
        assert_eq!(state.level_number, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.world_x, -1288.0);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelStarted { level: 1 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_advance_level_carries_score() {
        let mut state = GameState::new(1).unwrap();
        let old_canyons = state.level.canyons.clone();
        state.score = 4;
        state.complete_level();
        assert_eq!(state.phase, GamePhase::LevelComplete);

        state.advance_level().unwrap();
        assert_eq!(state.level_number, 2);
        assert_eq!(state.score, 4);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.level.canyons, old_canyons);
        assert!(!state.level.camp.is_reached);
    }

    #[test]
    fn test_lose_life_regenerates_same_level() {
        let mut state = GameState::new(2).unwrap();
        state.level_number = 3;
        state.score = 7;
        state.player.plummet();
        state.drain_events();

        state.lose_life().unwrap();
        assert_eq!(state.lives, 2);
        assert_eq!(state.level_number, 3);
        assert_eq!(state.score, 7);
        assert!(!state.player.is_plummeting);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::LevelStarted { level: 3 },
                GameEvent::LifeLost { lives_left: 2 }
            ]
        );
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut state = GameState::new(3).unwrap();
        state.lives = 1;
        let canyons = state.level.canyons.clone();
        state.lose_life().unwrap();
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        // No regeneration on game over
        assert_eq!(state.level.canyons, canyons);
    }

    #[test]
    fn test_failed_regeneration_keeps_life() {
        let mut state = GameState::new(5).unwrap();
        state.player.plummet();
        let canyons = state.level.canyons.clone();
        state.drain_events();

        state.tuning.canyon_separation = 1e9;
        state.tuning.max_attempts = 1;
        state.tuning.max_layout_attempts = 1;
        for _ in 0..3 {
            assert!(state.lose_life().is_err());
        }
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level.canyons, canyons);
        assert!(state.player.is_plummeting);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_run_resets_counters() {
        let mut state = GameState::new(4).unwrap();
        state.level_number = 5;
        state.score = 12;
        state.lives = 0;
        state.phase = GamePhase::GameOver;

        state.restart_run().unwrap();
        assert_eq!(state.level_number, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_invalid_tuning_refused() {
        let tuning = Tuning {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(GameState::with_tuning(1, tuning).is_err());
    }
}
