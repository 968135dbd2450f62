//! Fixed timestep simulation tick
//!
//! One tick per rendered frame. Key events queued since the previous tick are
//! applied first, in arrival order, then the world advances.

use super::collision::{check_camp_arrival, check_canyon_fall, collect_items};
use super::player::move_player;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::CANVAS_HEIGHT;
use crate::error::GenResult;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Jump, or continue/restart on the end-of-level and game-over screens
    Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub key_events: Vec<KeyEvent>,
}

impl TickInput {
    pub fn press(mut self, key: Key) -> Self {
        self.key_events.push(KeyEvent { key, pressed: true });
        self
    }

    pub fn release(mut self, key: Key) -> Self {
        self.key_events.push(KeyEvent {
            key,
            pressed: false,
        });
        self
    }

    /// Queue an event from a host key handler
    pub fn push(&mut self, event: KeyEvent) {
        self.key_events.push(event);
    }

    pub fn clear(&mut self) {
        self.key_events.clear();
    }
}

/// Apply one key event
pub fn handle_key(state: &mut GameState, event: KeyEvent) -> GenResult<()> {
    match (event.key, event.pressed) {
        (Key::Left, true) => state.player.press_left(),
        (Key::Left, false) => state.player.release_left(),
        (Key::Right, true) => state.player.press_right(),
        (Key::Right, false) => state.player.release_right(),
        (Key::Action, true) => match state.phase {
            GamePhase::LevelComplete => state.advance_level()?,
            GamePhase::GameOver => state.restart_run()?,
            GamePhase::Playing => {
                if state.player.try_jump() {
                    state.push_event(GameEvent::Jumped);
                }
            }
        },
        (Key::Action, false) => {}
    }
    Ok(())
}

/// Advance the game state by one tick.
///
/// Returns an error only if a level transition could not generate its new
/// level; the state is then left exactly as it was before that transition.
pub fn tick(state: &mut GameState, input: &TickInput) -> GenResult<()> {
    for event in &input.key_events {
        handle_key(state, *event)?;
    }

    if state.phase == GamePhase::GameOver {
        return Ok(());
    }

    state.time_ticks += 1;

    if check_canyon_fall(&mut state.player, &state.level.canyons) {
        log::debug!("Fell into canyon at world x {}", state.player.world_x);
        state.push_event(GameEvent::FellIntoCanyon);
    }

    let found = collect_items(&state.player, &mut state.level.collectables);
    for index in found {
        state.score += 1;
        log::debug!("Collectable {} found, score {}", index, state.score);
        state.push_event(GameEvent::CollectableFound { index });
    }

    if state.level.camp.is_reached {
        let (level, fx) = state.campfire_parts();
        level.update_campfire(fx);
    } else if check_camp_arrival(&state.player, &mut state.level.camp) {
        state.push_event(GameEvent::CampReached);
    }

    move_player(
        &mut state.player,
        &mut state.scroll_pos,
        &state.level.platforms,
        state.level.camp.is_reached,
    );

    if state.level.camp.is_reached {
        state.complete_level();
        return Ok(());
    }

    if state.player.y > CANVAS_HEIGHT {
        state.lose_life()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::canyon::{Canyon, CanyonLayout};
    use crate::sim::platform::derive_platforms;
    use crate::sim::scenery::Collectable;

    /// A run whose level has a single known canyon and no collectables
    fn controlled_state(seed: u64, canyon: Canyon) -> GameState {
        let mut state = GameState::new(seed).unwrap();
        state.level.canyons = CanyonLayout::from_gaps(vec![canyon], &state.tuning);
        state.level.platforms = derive_platforms(&state.level.canyons, 50.0);
        state.level.collectables.clear();
        state.drain_events();
        state
    }

    /// Put the player at `world_x` without moving the camera
    fn place_player(state: &mut GameState, world_x: f32) {
        state.player.x = world_x + state.scroll_pos;
        state.player.world_x = world_x;
    }

    #[test]
    fn test_grounded_in_canyon_plummets_same_tick() {
        let mut state = controlled_state(1, Canyon::gap(500.0, 60.0));
        state.level.platforms.clear();
        place_player(&mut state, 500.0);

        tick(&mut state, &TickInput::default()).unwrap();
        assert!(state.player.is_plummeting);
        assert_eq!(state.player.y, FLOOR_Y + PLUMMET_STEP);
        assert_eq!(state.drain_events(), vec![GameEvent::FellIntoCanyon]);
    }

    #[test]
    fn test_plummet_costs_a_life() {
        let mut state = controlled_state(2, Canyon::gap(500.0, 60.0));
        state.level.platforms.clear();
        state.score = 3;
        place_player(&mut state, 500.0);

        let mut ticks = 0;
        while state.lives == 3 {
            tick(&mut state, &TickInput::default()).unwrap();
            ticks += 1;
            assert!(ticks < 100);
        }
        // (576 - 432) / 4 = 36 steps to reach the bottom edge, one more to pass it
        assert_eq!(ticks, 37);
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.player.is_plummeting);
        assert_eq!(state.player.world_x, -1288.0);
    }

    #[test]
    fn test_last_life_goes_to_game_over() {
        let mut state = controlled_state(3, Canyon::gap(500.0, 60.0));
        state.level.platforms.clear();
        state.lives = 1;
        place_player(&mut state, 500.0);

        for _ in 0..40 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert!(state.drain_events().contains(&GameEvent::GameOver));

        // Frozen until the action key
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.time_ticks, ticks);

        state.score = 9;
        tick(&mut state, &TickInput::default().press(Key::Action)).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level_number, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_jump_clears_narrow_canyon() {
        // 45 half width: no platform, must be jumped
        let mut state = controlled_state(4, Canyon::gap(0.0, 45.0));
        assert!(state.level.platforms.is_empty());
        place_player(&mut state, -60.0);

        tick(&mut state, &TickInput::default().press(Key::Right).press(Key::Action)).unwrap();
        assert!(state.drain_events().contains(&GameEvent::Jumped));
        assert_eq!(state.player.y, FLOOR_Y - JUMP_HEIGHT + GRAVITY_STEP);

        for _ in 0..80 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        assert!(!state.player.is_plummeting);
        assert!(state.player.world_x > 45.0);
        assert!(state.player.on_floor());
    }

    #[test]
    fn test_walking_into_wide_canyon_falls() {
        let mut state = controlled_state(5, Canyon::gap(0.0, 120.0));
        place_player(&mut state, -140.0);

        let input = TickInput::default().press(Key::Right);
        tick(&mut state, &input).unwrap();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        assert!(state.player.is_plummeting);
        // Keys are dead while plummeting
        tick(&mut state, &TickInput::default().press(Key::Right)).unwrap();
        assert!(!state.player.is_right);
    }

    #[test]
    fn test_platform_carries_player_over_wide_canyon() {
        let mut state = controlled_state(6, Canyon::gap(0.0, 120.0));
        // Platform spans (-90, 90) at y 372
        assert_eq!(state.level.platforms.len(), 1);
        place_player(&mut state, -140.0);

        // Jump from the lip and walk onto the platform
        tick(&mut state, &TickInput::default().press(Key::Action).press(Key::Right)).unwrap();
        let mut landed = false;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default()).unwrap();
            if !state.player.is_falling && state.player.y == 368.0 {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(!state.player.is_plummeting);

        // Walk the rest of the platform, drop off the far end past the canyon
        for _ in 0..80 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        assert!(!state.player.is_plummeting);
        assert!(state.player.world_x > 120.0);
    }

    #[test]
    fn test_pickup_scores_once() {
        let mut state = controlled_state(7, Canyon::gap(900.0, 60.0));
        state.level.collectables = vec![Collectable {
            x: 100.0,
            y: 390.0,
            size: 30.0,
            is_found: false,
        }];
        place_player(&mut state, 100.0);
        state.player.y = 405.0;

        tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.score, 1);
        assert!(state.level.collectables[0].is_found);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::CollectableFound { index: 0 }]
        );

        tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_camp_completes_level_and_continue_advances() {
        let mut state = controlled_state(8, Canyon::gap(-900.0, 60.0));
        state.score = 2;
        place_player(&mut state, 1697.0);
        let old_canyons = state.level.canyons.clone();

        tick(&mut state, &TickInput::default().press(Key::Right)).unwrap();
        assert!(state.level.camp.is_reached);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.drain_events(), vec![GameEvent::CampReached]);
        // Horizontal input ignored now
        let x = state.player.world_x;
        tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.player.world_x, x);

        tick(&mut state, &TickInput::default().press(Key::Action)).unwrap();
        assert_eq!(state.level_number, 2);
        assert_eq!(state.score, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.level.canyons, old_canyons);
        assert!(!state.level.camp.is_reached);
    }

    #[test]
    fn test_key_release_stops_walking() {
        let mut state = controlled_state(9, Canyon::gap(900.0, 60.0));
        tick(&mut state, &TickInput::default().press(Key::Left)).unwrap();
        let x = state.player.world_x;
        tick(&mut state, &TickInput::default().release(Key::Left)).unwrap();
        assert_eq!(state.player.world_x, x);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput::default().press(Key::Right),
            TickInput::default(),
            TickInput::default().press(Key::Action),
            TickInput::default(),
            TickInput::default().release(Key::Right),
        ];
        let mut a = GameState::new(99999).unwrap();
        let mut b = GameState::new(99999).unwrap();
        for input in &inputs {
            tick(&mut a, input).unwrap();
            tick(&mut b, input).unwrap();
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.level.canyons, b.level.canyons);
    }
}
