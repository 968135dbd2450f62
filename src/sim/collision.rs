//! Spatial queries against the generated level
//!
//! All checks take the player's `world_x`; screen-space `x` never enters
//! gameplay decisions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::canyon::CanyonLayout;
use super::player::Player;
use super::scenery::Collectable;
use crate::consts::{CAMP_REACH, PICKUP_RADIUS, PICKUP_Y_OFFSET};

/// The level goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    pub x: f32,
    pub is_reached: bool,
}

impl Camp {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            is_reached: false,
        }
    }
}

/// Send the player plummeting if they stand on the floor over a canyon.
///
/// The height test is an exact comparison with the floor line: a player in
/// mid-jump passes over the gap untouched. Returns true only on the tick the
/// player starts plummeting.
pub fn check_canyon_fall(player: &mut Player, canyons: &CanyonLayout) -> bool {
    if player.is_plummeting || !player.on_floor() {
        return false;
    }
    if canyons.all().iter().any(|c| c.spans(player.world_x)) {
        player.plummet();
        return true;
    }
    false
}

/// Point the pickup radius is measured from (roughly the character's middle)
#[inline]
pub fn pickup_point(player: &Player) -> Vec2 {
    Vec2::new(player.world_x, player.y - PICKUP_Y_OFFSET)
}

/// Mark every unfound collectable within reach as found.
///
/// Returns the indices picked up this tick; each collectable can appear at
/// most once over its lifetime.
pub fn collect_items(player: &Player, collectables: &mut [Collectable]) -> Vec<usize> {
    let reach = pickup_point(player);
    let mut found = Vec::new();
    for (i, c) in collectables.iter_mut().enumerate() {
        if c.is_found {
            continue;
        }
        if Vec2::new(c.x, c.y).distance(reach) <= PICKUP_RADIUS {
            c.is_found = true;
            found.push(i);
        }
    }
    found
}

/// Latch the camp as reached once the player is within `CAMP_REACH`.
///
/// Returns true only on the tick the camp flips to reached.
pub fn check_camp_arrival(player: &Player, camp: &mut Camp) -> bool {
    if camp.is_reached {
        return false;
    }
    if (camp.x - player.world_x).abs() <= CAMP_REACH {
        camp.is_reached = true;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FLOOR_Y;
    use crate::sim::canyon::Canyon;
    use crate::tuning::Tuning;

    fn player_at(world_x: f32, y: f32) -> Player {
        let mut p = Player::spawn(0.0);
        p.x = world_x;
        p.world_x = world_x;
        p.y = y;
        p
    }

    fn single_canyon() -> CanyonLayout {
        CanyonLayout::from_gaps(vec![Canyon::gap(500.0, 60.0)], &Tuning::default())
    }

    #[test]
    fn test_grounded_over_canyon_plummets() {
        let layout = single_canyon();
        let mut p = player_at(500.0, FLOOR_Y);
        assert!(check_canyon_fall(&mut p, &layout));
        assert!(p.is_plummeting);
        // Already plummeting: no second trigger
        assert!(!check_canyon_fall(&mut p, &layout));
        assert!(p.is_plummeting);
    }

    #[test]
    fn test_airborne_over_canyon_is_safe() {
        let layout = single_canyon();
        let mut p = player_at(500.0, FLOOR_Y - 2.0);
        assert!(!check_canyon_fall(&mut p, &layout));
        assert!(!p.is_plummeting);
    }

    #[test]
    fn test_canyon_edges() {
        let layout = single_canyon();
        let mut p = player_at(440.0, FLOOR_Y);
        assert!(check_canyon_fall(&mut p, &layout));

        let mut p = player_at(560.0, FLOOR_Y);
        assert!(!check_canyon_fall(&mut p, &layout));
    }

    #[test]
    fn test_blocker_swallows_too() {
        let layout = single_canyon();
        let mut p = player_at(-2000.0, FLOOR_Y);
        assert!(check_canyon_fall(&mut p, &layout));
    }

    #[test]
    fn test_pickup_within_reach() {
        let mut cs = vec![Collectable {
            x: 100.0,
            y: 390.0,
            size: 30.0,
            is_found: false,
        }];
        let p = player_at(100.0, 405.0);
        assert_eq!(collect_items(&p, &mut cs), vec![0]);
        assert!(cs[0].is_found);
        // Never collected twice
        assert!(collect_items(&p, &mut cs).is_empty());
    }

    #[test]
    fn test_pickup_radius_boundary() {
        let mut cs = vec![
            Collectable {
                x: 130.0,
                y: 417.0,
                size: 30.0,
                is_found: false,
            },
            Collectable {
                x: 131.0,
                y: 417.0,
                size: 30.0,
                is_found: false,
            },
        ];
        let p = player_at(100.0, FLOOR_Y);
        assert_eq!(collect_items(&p, &mut cs), vec![0]);
        assert!(!cs[1].is_found);
    }

    #[test]
    fn test_camp_arrival_latches() {
        let mut camp = Camp::new(1700.0);
        assert!(!check_camp_arrival(&player_at(1694.0, FLOOR_Y), &mut camp));
        assert!(check_camp_arrival(&player_at(1695.0, FLOOR_Y), &mut camp));
        assert!(camp.is_reached);
        // Walking away does not undo it
        assert!(!check_camp_arrival(&player_at(0.0, FLOOR_Y), &mut camp));
        assert!(camp.is_reached);
    }
}
