//! One level's worth of generated world
//!
//! A `Level` is built in full before it replaces the previous one, so a tick
//! never observes a half-generated world.

use serde::{Deserialize, Serialize};

use super::canyon::{CanyonLayout, generate_canyons};
use super::collision::Camp;
use super::emitter::Emitter;
use super::platform::{Platform, derive_platforms};
use super::sampler::Sampler;
use super::scenery::{
    Cloud, Collectable, Mountain, Tree, place_clouds, place_collectables, place_mountains,
    place_trees,
};
use crate::consts::FLOOR_Y;
use crate::error::GenResult;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub canyons: CanyonLayout,
    pub platforms: Vec<Platform>,
    pub trees: Vec<Tree>,
    pub collectables: Vec<Collectable>,
    pub clouds: Vec<Cloud>,
    pub mountains: Vec<Mountain>,
    pub camp: Camp,
    /// Campfire effects, animated only once the camp is reached
    #[serde(skip)]
    pub smoke: Option<Emitter>,
    #[serde(skip)]
    pub fire: Option<Emitter>,
}

impl Level {
    /// Generate a complete level.
    ///
    /// `sampler` drives every gameplay-relevant placement; `fx` only seeds the
    /// campfire particles.
    pub fn generate(sampler: &mut Sampler, fx: &mut Sampler, tuning: &Tuning) -> GenResult<Self> {
        tuning.validate()?;

        let clouds = place_clouds(sampler, tuning)?;
        let mountains = place_mountains(sampler, tuning)?;
        let canyons = generate_canyons(sampler, tuning)?;
        let platforms = derive_platforms(&canyons, tuning.platform_min_half_width);
        let trees = place_trees(sampler, &canyons, tuning)?;
        let collectables = place_collectables(sampler, &canyons, tuning)?;

        log::info!(
            "Generated level: {} canyons, {} platforms, {} collectables, {} trees",
            canyons.len(),
            platforms.len(),
            collectables.len(),
            trees.len()
        );

        Ok(Self {
            canyons,
            platforms,
            trees,
            collectables,
            clouds,
            mountains,
            camp: Camp::new(tuning.camp_x),
            smoke: Some(Emitter::campfire_smoke(tuning.camp_x, FLOOR_Y, fx)),
            fire: Some(Emitter::campfire_flames(tuning.camp_x, FLOOR_Y, fx)),
        })
    }

    /// Collectables still waiting to be picked up
    pub fn remaining_collectables(&self) -> usize {
        self.collectables.iter().filter(|c| !c.is_found).count()
    }

    /// Animate the campfire one tick
    pub fn update_campfire(&mut self, fx: &mut Sampler) {
        if let Some(smoke) = self.smoke.as_mut() {
            smoke.update(fx);
        }
        if let Some(fire) = self.fire.as_mut() {
            fire.update(fx);
        }
    }
}
