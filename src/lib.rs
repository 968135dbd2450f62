//! Backpacking Adventure - a canyon-hopping side scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, player physics, run state)
//! - `renderer`: Draw-command generation and 2D canvas painting
//! - `tuning`: Data-driven level generation parameters
//! - `settings`: Presentation and audio preferences

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use error::{GenError, GenResult};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 1024.0;
    pub const CANVAS_HEIGHT: f32 = 576.0;
    /// Ground line, three quarters of the way down the canvas
    pub const FLOOR_Y: f32 = CANVAS_HEIGHT * 0.75;

    /// Horizontal walk step per tick
    pub const WALK_SPEED: f32 = 5.0;
    /// The character only walks inside [LEFT, RIGHT] * width; past that the world scrolls
    pub const SCROLL_MARGIN_LEFT: f32 = 0.2;
    pub const SCROLL_MARGIN_RIGHT: f32 = 0.8;

    /// Instant rise applied by a jump
    pub const JUMP_HEIGHT: f32 = 100.0;
    /// Descent per tick while airborne
    pub const GRAVITY_STEP: f32 = 2.0;
    /// Descent per tick once inside a canyon
    pub const PLUMMET_STEP: f32 = 4.0;

    /// Platforms sit this far above the floor
    pub const PLATFORM_RISE: f32 = 60.0;
    /// Fraction of the canyon span a platform covers
    pub const PLATFORM_COVERAGE: f32 = 0.75;
    /// Vertical window (exclusive upper bound) for standing on a platform
    pub const PLATFORM_CONTACT_TOLERANCE: f32 = 5.0;

    /// Pickup reach, measured from a point this far above the feet
    pub const PICKUP_RADIUS: f32 = 30.0;
    pub const PICKUP_Y_OFFSET: f32 = 15.0;

    /// 1-D distance to the camp that counts as arrival
    pub const CAMP_REACH: f32 = 5.0;
}
