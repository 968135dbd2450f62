//! Data-driven level generation parameters
//!
//! Defaults reproduce the hand-tuned values the game shipped with. Every
//! `Tuning` handed to a generator has passed `validate`, so the placement
//! routines never see an empty or inverted range.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Half-open sampling interval `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    /// Build a range, rejecting inverted or non-finite bounds
    pub fn new(name: &'static str, min: f32, max: f32) -> GenResult<Self> {
        let range = Self { min, max };
        range.check(name)?;
        Ok(range)
    }

    /// Const constructor for known-good defaults
    pub const fn of(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn check(&self, name: &'static str) -> GenResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(GenError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v < self.max
    }
}

/// Inclusive integer range for entity counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn of(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn check(&self, name: &'static str) -> GenResult<()> {
        if self.min > self.max {
            return Err(GenError::InvalidTuning(format!(
                "{} count range {}..={} is inverted",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// A preset mountain silhouette: base size and the y of its peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountainShape {
    pub size: f32,
    pub peak_y: f32,
}

/// Level generation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Canyons ===
    /// Number of random canyons (the impassable one is extra)
    pub canyon_count: u32,
    pub canyon_x: SampleRange,
    pub canyon_half_width: SampleRange,
    /// Minimum distance from a new canyon center to each existing canyon's right edge
    pub canyon_separation: f32,
    pub impassable_x: f32,
    pub impassable_half_width: f32,
    /// Canyons narrower than this (half width) are jumpable and get no platform
    pub platform_min_half_width: f32,

    // === Collectables ===
    /// Item counts are inclusive. A fractional draw in (5, 10) rounds up to
    /// a whole loop count, so the smallest level has 6.
    pub collectable_count: CountRange,
    pub collectable_x: SampleRange,
    pub collectable_separation: f32,
    /// Height used when floating over a canyon
    pub collectable_elevated_y: f32,
    pub collectable_ground_y: f32,
    pub collectable_size: f32,

    // === Trees ===
    pub tree_count: CountRange,
    pub tree_x: SampleRange,
    /// Range used when a tree has to be moved away from a canyon
    pub tree_resample_x: SampleRange,
    pub tree_canyon_clearance: f32,
    pub tree_scale: SampleRange,

    // === Clouds ===
    pub cloud_count: CountRange,
    pub cloud_x: SampleRange,
    pub cloud_y: SampleRange,
    pub cloud_size: SampleRange,

    // === Mountains ===
    pub mountain_count: CountRange,
    pub mountain_x: SampleRange,
    pub mountain_shapes: Vec<MountainShape>,

    // === Run ===
    pub camp_x: f32,
    /// Initial world scroll offset
    pub start_scroll: f32,
    pub starting_lives: u32,

    // === Sampling limits ===
    /// Draws allowed per placed entity before giving up
    pub max_attempts: u32,
    /// Whole canyon layouts retried before giving up
    pub max_layout_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canyon_count: 5,
            canyon_x: SampleRange::of(-1100.0, 1400.0),
            canyon_half_width: SampleRange::of(40.0, 135.0),
            canyon_separation: 300.0,
            impassable_x: -2000.0,
            impassable_half_width: 500.0,
            platform_min_half_width: 50.0,

            collectable_count: CountRange::of(6, 10),
            collectable_x: SampleRange::of(-1500.0, 1500.0),
            collectable_separation: 50.0,
            collectable_elevated_y: 330.0,
            collectable_ground_y: 390.0,
            collectable_size: 30.0,

            tree_count: CountRange::of(11, 20),
            tree_x: SampleRange::of(-1500.0, 2000.0),
            tree_resample_x: SampleRange::of(-1500.0, 1800.0),
            tree_canyon_clearance: 100.0,
            tree_scale: SampleRange::of(0.25, 1.0),

            cloud_count: CountRange::of(16, 30),
            cloud_x: SampleRange::of(-1500.0, 2000.0),
            cloud_y: SampleRange::of(75.0, 200.0),
            cloud_size: SampleRange::of(75.0, 125.0),

            mountain_count: CountRange::of(11, 15),
            mountain_x: SampleRange::of(-1500.0, 2000.0),
            mountain_shapes: vec![
                MountainShape { size: 200.0, peak_y: 300.0 },
                MountainShape { size: 350.0, peak_y: 200.0 },
                MountainShape { size: 425.0, peak_y: 150.0 },
            ],

            camp_x: 1700.0,
            start_scroll: 1800.0,
            starting_lives: 3,

            max_attempts: 10_000,
            max_layout_attempts: 32,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> GenResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)
            .map_err(|e| GenError::InvalidTuning(format!("bad tuning JSON: {}", e)))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the generators cannot work with
    pub fn validate(&self) -> GenResult<()> {
        self.canyon_x.check("canyon x")?;
        self.canyon_half_width.check("canyon half width")?;
        self.collectable_x.check("collectable x")?;
        self.tree_x.check("tree x")?;
        self.tree_resample_x.check("tree resample x")?;
        self.tree_scale.check("tree scale")?;
        self.cloud_x.check("cloud x")?;
        self.cloud_y.check("cloud y")?;
        self.cloud_size.check("cloud size")?;
        self.mountain_x.check("mountain x")?;

        self.collectable_count.check("collectable")?;
        self.tree_count.check("tree")?;
        self.cloud_count.check("cloud")?;
        self.mountain_count.check("mountain")?;

        if self.canyon_half_width.min <= 0.0 || self.impassable_half_width <= 0.0 {
            return Err(GenError::InvalidTuning(
                "canyon half widths must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("canyon separation", self.canyon_separation),
            ("collectable separation", self.collectable_separation),
            ("tree canyon clearance", self.tree_canyon_clearance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GenError::InvalidTuning(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.collectable_size <= 0.0 {
            return Err(GenError::InvalidTuning(
                "collectable size must be positive".to_string(),
            ));
        }
        if self.mountain_shapes.is_empty() && self.mountain_count.max > 0 {
            return Err(GenError::InvalidTuning(
                "mountains requested but no mountain shapes configured".to_string(),
            ));
        }
        if self.starting_lives == 0 {
            return Err(GenError::InvalidTuning(
                "starting lives must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 || self.max_layout_attempts == 0 {
            return Err(GenError::InvalidTuning(
                "sampling attempt limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = SampleRange::new("cloud y", 200.0, 75.0).unwrap_err();
        assert!(matches!(err, GenError::InvalidRange { name: "cloud y", .. }));

        let tuning = Tuning {
            tree_scale: SampleRange::of(1.0, 0.25),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(GenError::InvalidRange { name: "tree scale", .. })
        ));
    }

    #[test]
    fn test_non_finite_range_rejected() {
        assert!(SampleRange::new("canyon x", f32::NAN, 1.0).is_err());
        assert!(SampleRange::new("canyon x", 0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_zero_lives_rejected() {
        let tuning = Tuning {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(GenError::InvalidTuning(_))));
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "canyon_count": 3, "camp_x": 1200.0 }"#).unwrap();
        assert_eq!(tuning.canyon_count, 3);
        assert_eq!(tuning.camp_x, 1200.0);
        assert_eq!(tuning.collectable_ground_y, 390.0);
    }

    #[test]
    fn test_from_json_rejects_garbage_and_bad_values() {
        assert!(Tuning::from_json("not json").is_err());
        assert!(Tuning::from_json(r#"{ "canyon_x": { "min": 10.0, "max": -10.0 } }"#).is_err());
    }
}
