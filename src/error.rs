//! Level generation errors
//!
//! Gameplay outcomes (falling, running out of lives) are never errors. These
//! only cover broken tuning and runaway rejection sampling.

use std::fmt;

/// Errors surfaced while building a level
#[derive(Debug, Clone, PartialEq)]
pub enum GenError {
    /// A rejection-sampling loop gave up before finding an acceptable value
    SamplingExhausted { what: &'static str, attempts: u32 },
    /// A sampling range with `min > max` or non-finite bounds
    InvalidRange { name: &'static str, min: f32, max: f32 },
    /// Any other rejected tuning value
    InvalidTuning(String),
}

/// Convenience alias for generation results.
pub type GenResult<T> = Result<T, GenError>;

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::SamplingExhausted { what, attempts } => {
                write!(f, "could not place {} after {} attempts", what, attempts)
            }
            GenError::InvalidRange { name, min, max } => {
                write!(f, "invalid range for {}: [{}, {})", name, min, max)
            }
            GenError::InvalidTuning(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for GenError {}
