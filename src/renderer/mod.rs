//! 2D rendering module
//!
//! `scene` turns game state into draw commands; `canvas` paints them onto a
//! browser `CanvasRenderingContext2d`.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{DrawCmd, Rgba, build_scene};
