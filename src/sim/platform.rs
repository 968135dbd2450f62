//! Bridging platforms over wide canyons
//!
//! A platform covers the central 75% of its canyon, leaving a lip on each side,
//! and floats `PLATFORM_RISE` above the floor where a jump can reach it.

use serde::{Deserialize, Serialize};

use super::canyon::{Canyon, CanyonLayout};
use crate::consts::{FLOOR_Y, PLATFORM_CONTACT_TOLERANCE, PLATFORM_COVERAGE, PLATFORM_RISE};

/// A flat ledge; `x` is its left end and `y` its walking surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Platform {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Platform for a single canyon
pub fn derive_platform(canyon: &Canyon) -> Platform {
    Platform {
        x: canyon.x - canyon.half_width * PLATFORM_COVERAGE,
        y: FLOOR_Y - PLATFORM_RISE,
        width: canyon.half_width * 2.0 * PLATFORM_COVERAGE,
    }
}

/// Platforms for every crossable canyon wider than `min_half_width`.
///
/// The impassable canyon never gets one, wherever it sits in the layout.
pub fn derive_platforms(layout: &CanyonLayout, min_half_width: f32) -> Vec<Platform> {
    layout
        .crossable()
        .filter(|c| c.half_width > min_half_width)
        .map(derive_platform)
        .collect()
}

/// Whether a player at `(world_x, y)` is standing on `platform`.
///
/// Horizontally the ends are exclusive; vertically the feet must be at most
/// `PLATFORM_CONTACT_TOLERANCE` above the surface (never below it).
pub fn check_platform_contact(platform: &Platform, world_x: f32, y: f32) -> bool {
    if world_x <= platform.x || world_x >= platform.right() {
        return false;
    }
    let d = platform.y - y;
    (0.0..PLATFORM_CONTACT_TOLERANCE).contains(&d)
}
