//! Seeded random draws and bounded rejection sampling
//!
//! Every placement routine pulls from one `Sampler` so a level is a pure
//! function of the run seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{GenError, GenResult};
use crate::tuning::{CountRange, SampleRange};

/// Deterministic uniform sampler
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: Pcg32,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform draw from `[min, max)`; a degenerate range yields `min`
    pub fn between(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..max)
    }

    #[inline]
    pub fn uniform(&mut self, range: SampleRange) -> f32 {
        self.between(range.min, range.max)
    }

    /// Uniform count from an inclusive range
    pub fn count(&mut self, range: CountRange) -> u32 {
        if range.min >= range.max {
            return range.min;
        }
        self.rng.random_range(range.min..=range.max)
    }

    /// Pick one element uniformly
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..items.len());
        items.get(idx)
    }

    /// Draw candidates until one is accepted.
    ///
    /// `draw` receives the attempt index (0 for the first draw) so callers can
    /// switch ranges on retries. Every candidate is checked by `accept` against
    /// the full set of existing placements; a rejection discards the candidate
    /// and starts over with a fresh draw.
    pub fn sample_until<D, A>(
        &mut self,
        what: &'static str,
        max_attempts: u32,
        mut draw: D,
        mut accept: A,
    ) -> GenResult<f32>
    where
        D: FnMut(&mut Self, u32) -> f32,
        A: FnMut(f32) -> bool,
    {
        for attempt in 0..max_attempts {
            let candidate = draw(self, attempt);
            if accept(candidate) {
                if attempt > 0 {
                    log::debug!("{} placed after {} rejections", what, attempt);
                }
                return Ok(candidate);
            }
        }
        Err(GenError::SamplingExhausted {
            what,
            attempts: max_attempts,
        })
    }
}
