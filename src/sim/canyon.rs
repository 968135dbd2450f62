//! Canyon layout generation
//!
//! A layout is `canyon_count` random gaps plus one oversized gap far behind
//! the start that blocks backward travel. The blocker is tagged with
//! `CanyonKind::Impassable` so consumers exclude it by kind rather than by
//! its position in the list.

use serde::{Deserialize, Serialize};

use super::sampler::Sampler;
use crate::error::{GenError, GenResult};
use crate::tuning::Tuning;

/// What a canyon is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanyonKind {
    /// Regular gap: jump it or cross on a platform
    Gap,
    /// Fixed blocker behind the start, never meant to be crossed
    Impassable,
}

/// A gap in the ground, centered on `x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canyon {
    pub x: f32,
    pub half_width: f32,
    pub kind: CanyonKind,
}

impl Canyon {
    pub fn gap(x: f32, half_width: f32) -> Self {
        Self {
            x,
            half_width,
            kind: CanyonKind::Gap,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - self.half_width
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.half_width
    }

    /// Point new canyons keep their distance from
    #[inline]
    pub fn separation_reference(&self) -> f32 {
        self.right()
    }

    /// Whether `x` lies over the gap, `[left, right)`
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.left() && x < self.right()
    }

    #[inline]
    pub fn is_impassable(&self) -> bool {
        self.kind == CanyonKind::Impassable
    }
}

/// Every canyon in a level, random gaps first and the blocker last
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanyonLayout {
    canyons: Vec<Canyon>,
}

impl CanyonLayout {
    /// Build a layout from explicit canyons (the blocker is appended)
    pub fn from_gaps(gaps: Vec<Canyon>, tuning: &Tuning) -> Self {
        let mut canyons: Vec<Canyon> = gaps
            .into_iter()
            .map(|c| Canyon {
                kind: CanyonKind::Gap,
                ..c
            })
            .collect();
        canyons.push(Canyon {
            x: tuning.impassable_x,
            half_width: tuning.impassable_half_width,
            kind: CanyonKind::Impassable,
        });
        Self { canyons }
    }

    /// All canyons, including the blocker
    pub fn all(&self) -> &[Canyon] {
        &self.canyons
    }

    /// Canyons a player is expected to get across
    pub fn crossable(&self) -> impl Iterator<Item = &Canyon> {
        self.canyons.iter().filter(|c| !c.is_impassable())
    }

    pub fn impassable(&self) -> Option<&Canyon> {
        self.canyons.iter().find(|c| c.is_impassable())
    }

    /// First canyon whose span covers `x`
    pub fn spanning(&self, x: f32) -> Option<&Canyon> {
        self.canyons.iter().find(|c| c.spans(x))
    }

    pub fn len(&self) -> usize {
        self.canyons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canyons.is_empty()
    }
}

/// Generate a canyon layout.
///
/// Each candidate center must sit at least `canyon_separation` away from the
/// right edge of every canyon accepted so far; a rejected candidate is redrawn
/// and re-checked against all of them. If one canyon cannot be placed within
/// `max_attempts` draws the whole layout is thrown away and started over, up to
/// `max_layout_attempts` times.
pub fn generate_canyons(sampler: &mut Sampler, tuning: &Tuning) -> GenResult<CanyonLayout> {
    tuning.canyon_x.check("canyon x")?;
    tuning.canyon_half_width.check("canyon half width")?;

    for layout_attempt in 0..tuning.max_layout_attempts {
        match try_layout(sampler, tuning) {
            Ok(gaps) => {
                if layout_attempt > 0 {
                    log::debug!("canyon layout settled after {} restarts", layout_attempt);
                }
                return Ok(CanyonLayout::from_gaps(gaps, tuning));
            }
            Err(GenError::SamplingExhausted { .. }) => {
                log::warn!(
                    "canyon layout jammed (attempt {}/{}), restarting",
                    layout_attempt + 1,
                    tuning.max_layout_attempts
                );
            }
            Err(e) => return Err(e),
        }
    }

    Err(GenError::SamplingExhausted {
        what: "canyon layout",
        attempts: tuning.max_layout_attempts,
    })
}

fn try_layout(sampler: &mut Sampler, tuning: &Tuning) -> GenResult<Vec<Canyon>> {
    let mut gaps: Vec<Canyon> = Vec::with_capacity(tuning.canyon_count as usize + 1);

    for _ in 0..tuning.canyon_count {
        let x = sampler.sample_until(
            "canyon",
            tuning.max_attempts,
            |s, _| s.uniform(tuning.canyon_x),
            |x| {
                gaps.iter()
                    .all(|c| (x - c.separation_reference()).abs() >= tuning.canyon_separation)
            },
        )?;
        let half_width = sampler.uniform(tuning.canyon_half_width);
        gaps.push(Canyon::gap(x, half_width));
    }

    Ok(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::SampleRange;
    use proptest::prelude::*;

    #[test]
    fn test_spans_is_half_open() {
        let c = Canyon::gap(500.0, 60.0);
        assert!(c.spans(440.0));
        assert!(c.spans(500.0));
        assert!(c.spans(559.9));
        assert!(!c.spans(560.0));
        assert!(!c.spans(439.9));
    }

    #[test]
    fn test_layout_has_blocker_last() {
        let tuning = Tuning::default();
        let mut sampler = Sampler::new(12345);
        let layout = generate_canyons(&mut sampler, &tuning).unwrap();

        assert_eq!(layout.len(), tuning.canyon_count as usize + 1);
        let last = layout.all().last().unwrap();
        assert_eq!(last.kind, CanyonKind::Impassable);
        assert_eq!(last.x, -2000.0);
        assert_eq!(last.half_width, 500.0);
        assert_eq!(layout.crossable().count(), tuning.canyon_count as usize);
        assert!(layout.crossable().all(|c| c.kind == CanyonKind::Gap));
    }

    #[test]
    fn test_from_gaps_retags_blockers() {
        let tuning = Tuning::default();
        let bogus = Canyon {
            x: 0.0,
            half_width: 80.0,
            kind: CanyonKind::Impassable,
        };
        let layout = CanyonLayout::from_gaps(vec![bogus], &tuning);
        assert_eq!(layout.crossable().count(), 1);
        assert_eq!(layout.impassable().map(|c| c.x), Some(-2000.0));
    }

    #[test]
    fn test_impossible_separation_is_reported() {
        let tuning = Tuning {
            canyon_count: 3,
            canyon_x: SampleRange::of(0.0, 10.0),
            max_attempts: 50,
            max_layout_attempts: 2,
            ..Default::default()
        };
        let mut sampler = Sampler::new(1);
        let err = generate_canyons(&mut sampler, &tuning).unwrap_err();
        assert_eq!(
            err,
            GenError::SamplingExhausted {
                what: "canyon layout",
                attempts: 2
            }
        );
    }

    #[test]
    fn test_inverted_range_rejected_before_sampling() {
        let tuning = Tuning {
            canyon_half_width: SampleRange::of(135.0, 40.0),
            ..Default::default()
        };
        let mut sampler = Sampler::new(1);
        assert!(matches!(
            generate_canyons(&mut sampler, &tuning),
            Err(GenError::InvalidRange { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_canyons_respect_separation(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut sampler = Sampler::new(seed);
            let layout = generate_canyons(&mut sampler, &tuning).unwrap();
            let gaps: Vec<&Canyon> = layout.crossable().collect();

            // Each canyon cleared every earlier canyon's reference point when it was placed
            for (i, later) in gaps.iter().enumerate() {
                for earlier in &gaps[..i] {
                    let d = (later.x - earlier.separation_reference()).abs();
                    prop_assert!(d >= tuning.canyon_separation);
                }
            }
            for c in &gaps {
                prop_assert!(tuning.canyon_x.contains(c.x));
                prop_assert!(tuning.canyon_half_width.contains(c.half_width));
            }
            prop_assert_eq!(layout.impassable().map(|c| c.x), Some(tuning.impassable_x));
        }
    }
}
