//! Player kinematics
//!
//! The character lives in two coordinate systems. `x` is where it is drawn on
//! screen and `scroll_pos` is how far the world has been shifted; `world_x =
//! x - scroll_pos` is the only position gameplay checks ever look at.

use serde::{Deserialize, Serialize};

use super::platform::{Platform, check_platform_contact};
use crate::consts::*;

/// Which way the character is facing (both keys held reads as idle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Idle,
    Left,
    Right,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Screen-space x
    pub x: f32,
    /// Level-space x, refreshed at the end of every move
    pub world_x: f32,
    /// Feet position; `FLOOR_Y` when standing on the ground
    pub y: f32,
    pub is_left: bool,
    pub is_right: bool,
    /// Airborne (jump arc or walking off a ledge)
    pub is_falling: bool,
    /// Dropping into a canyon; only cleared by replacing the player
    pub is_plummeting: bool,
}

impl Player {
    /// Fresh player standing mid-screen on the floor
    pub fn spawn(scroll_pos: f32) -> Self {
        let x = CANVAS_WIDTH / 2.0;
        Self {
            x,
            world_x: x - scroll_pos,
            y: FLOOR_Y,
            is_left: false,
            is_right: false,
            is_falling: false,
            is_plummeting: false,
        }
    }

    pub fn facing(&self) -> Facing {
        match (self.is_left, self.is_right) {
            (true, false) => Facing::Left,
            (false, true) => Facing::Right,
            _ => Facing::Idle,
        }
    }

    /// Exactly on the floor line (the only height at which canyons swallow you)
    #[inline]
    pub fn on_floor(&self) -> bool {
        self.y == FLOOR_Y
    }

    /// Key-down for left; ignored while plummeting
    pub fn press_left(&mut self) {
        if !self.is_plummeting {
            self.is_left = true;
        }
    }

    pub fn press_right(&mut self) {
        if !self.is_plummeting {
            self.is_right = true;
        }
    }

    pub fn release_left(&mut self) {
        self.is_left = false;
    }

    pub fn release_right(&mut self) {
        self.is_right = false;
    }

    /// Start a jump if standing on something. Returns whether it happened.
    pub fn try_jump(&mut self) -> bool {
        if self.is_falling || self.is_plummeting {
            return false;
        }
        self.is_falling = true;
        self.y -= JUMP_HEIGHT;
        true
    }

    /// Enter the plummeting state
    pub fn plummet(&mut self) {
        self.is_plummeting = true;
    }
}

/// Advance the player one tick.
///
/// 1. Horizontal: walk within the middle band of the screen, scroll the world
///    beyond it. Skipped entirely once the camp is reached.
/// 2. Vertical: airborne players stand on any platform they touch, otherwise
///    fall by `GRAVITY_STEP`. At or below the floor they are grounded.
/// 3. Plummeting overrides everything: no walking, no jump state, fast descent.
/// 4. `world_x` is recomputed last.
pub fn move_player(
    player: &mut Player,
    scroll_pos: &mut f32,
    platforms: &[Platform],
    camp_reached: bool,
) {
    if !camp_reached {
        if player.is_left {
            if player.x > CANVAS_WIDTH * SCROLL_MARGIN_LEFT {
                player.x -= WALK_SPEED;
            } else {
                *scroll_pos += WALK_SPEED;
            }
        }
        if player.is_right {
            if player.x < CANVAS_WIDTH * SCROLL_MARGIN_RIGHT {
                player.x += WALK_SPEED;
            } else {
                *scroll_pos -= WALK_SPEED;
            }
        }
    }

    if player.y < FLOOR_Y {
        // Contact is tested with last tick's world_x
        let on_platform = platforms
            .iter()
            .any(|p| check_platform_contact(p, player.world_x, player.y));
        if on_platform {
            player.is_falling = false;
        } else {
            player.y += GRAVITY_STEP;
            player.is_falling = true;
        }
    } else {
        player.is_falling = false;
    }

    if player.is_plummeting {
        player.is_left = false;
        player.is_right = false;
        player.is_falling = false;
        player.y += PLUMMET_STEP;
    }

    player.world_x = player.x - *scroll_pos;
}
