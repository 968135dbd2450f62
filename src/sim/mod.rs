//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod canyon;
pub mod collision;
pub mod emitter;
pub mod level;
pub mod platform;
pub mod player;
pub mod sampler;
pub mod scenery;
pub mod state;
pub mod tick;

pub use canyon::{Canyon, CanyonKind, CanyonLayout, generate_canyons};
pub use collision::{Camp, check_camp_arrival, check_canyon_fall, collect_items};
pub use emitter::{Emitter, EmitterKind, Particle};
pub use level::Level;
pub use platform::{Platform, check_platform_contact, derive_platform, derive_platforms};
pub use player::{Facing, Player, move_player};
pub use sampler::Sampler;
pub use scenery::{
    Cloud, Collectable, Mountain, Tree, place_clouds, place_collectables, place_mountains,
    place_trees,
};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Key, KeyEvent, TickInput, handle_key, tick};
