//! Obstacle-aware placement of collectables, trees, clouds and mountains
//!
//! Only collectables matter for gameplay: their height depends on whether they
//! float over a canyon. Everything else is decoration that shares the same
//! rejection-sampling helper.

use serde::{Deserialize, Serialize};

use super::canyon::CanyonLayout;
use super::sampler::Sampler;
use crate::error::{GenError, GenResult};
use crate::tuning::Tuning;

/// A coffee cup worth one point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectable {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub is_found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub x: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// `x` is the peak, `y` the height of the peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mountain {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Height for a collectable at `x`: elevated over any canyon, else ground level
pub fn collectable_y(x: f32, canyons: &CanyonLayout, tuning: &Tuning) -> f32 {
    if canyons.spanning(x).is_some() {
        tuning.collectable_elevated_y
    } else {
        tuning.collectable_ground_y
    }
}

/// Place collectables at least `collectable_separation` apart
pub fn place_collectables(
    sampler: &mut Sampler,
    canyons: &CanyonLayout,
    tuning: &Tuning,
) -> GenResult<Vec<Collectable>> {
    tuning.collectable_x.check("collectable x")?;
    tuning.collectable_count.check("collectable")?;

    let count = sampler.count(tuning.collectable_count);
    let mut placed: Vec<Collectable> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let x = sampler.sample_until(
            "collectable",
            tuning.max_attempts,
            |s, _| s.uniform(tuning.collectable_x),
            |x| {
                placed
                    .iter()
                    .all(|c| (x - c.x).abs() >= tuning.collectable_separation)
            },
        )?;
        placed.push(Collectable {
            x,
            y: collectable_y(x, canyons, tuning),
            size: tuning.collectable_size,
            is_found: false,
        });
    }

    Ok(placed)
}

/// Place trees away from canyon centers.
///
/// The first draw comes from `tree_x`; any redraw forced by a nearby canyon
/// comes from the narrower `tree_resample_x`, and is checked against every
/// canyon again.
pub fn place_trees(
    sampler: &mut Sampler,
    canyons: &CanyonLayout,
    tuning: &Tuning,
) -> GenResult<Vec<Tree>> {
    tuning.tree_x.check("tree x")?;
    tuning.tree_resample_x.check("tree resample x")?;
    tuning.tree_scale.check("tree scale")?;
    tuning.tree_count.check("tree")?;

    let count = sampler.count(tuning.tree_count);
    let mut trees = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let x = sampler.sample_until(
            "tree",
            tuning.max_attempts,
            |s, attempt| {
                if attempt == 0 {
                    s.uniform(tuning.tree_x)
                } else {
                    s.uniform(tuning.tree_resample_x)
                }
            },
            |x| {
                canyons
                    .all()
                    .iter()
                    .all(|c| (x - c.x).abs() >= tuning.tree_canyon_clearance)
            },
        )?;
        let scale = sampler.uniform(tuning.tree_scale);
        trees.push(Tree { x, scale });
    }

    Ok(trees)
}

pub fn place_clouds(sampler: &mut Sampler, tuning: &Tuning) -> GenResult<Vec<Cloud>> {
    tuning.cloud_x.check("cloud x")?;
    tuning.cloud_y.check("cloud y")?;
    tuning.cloud_size.check("cloud size")?;
    tuning.cloud_count.check("cloud")?;

    let count = sampler.count(tuning.cloud_count);
    Ok((0..count)
        .map(|_| Cloud {
            x: sampler.uniform(tuning.cloud_x),
            y: sampler.uniform(tuning.cloud_y),
            size: sampler.uniform(tuning.cloud_size),
        })
        .collect())
}

/// Mountains pick a preset shape; size and peak height always come as a pair
pub fn place_mountains(sampler: &mut Sampler, tuning: &Tuning) -> GenResult<Vec<Mountain>> {
    tuning.mountain_x.check("mountain x")?;
    tuning.mountain_count.check("mountain")?;

    let count = sampler.count(tuning.mountain_count);
    let mut mountains = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let shape = *sampler.pick(&tuning.mountain_shapes).ok_or_else(|| {
            GenError::InvalidTuning("no mountain shapes configured".to_string())
        })?;
        mountains.push(Mountain {
            x: sampler.uniform(tuning.mountain_x),
            y: shape.peak_y,
            size: shape.size,
        });
    }
    Ok(mountains)
}
