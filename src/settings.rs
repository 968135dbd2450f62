//! Presentation and audio preferences
//!
//! Nothing here affects the simulation; two runs with different settings and
//! the same seed play out identically.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Audio cues the game can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    Fall,
    Collect,
    /// Looped while the campfire burns
    Campfire,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Campfire smoke and flames
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub jump_gain: f32,
    pub fall_gain: f32,
    pub collect_gain: f32,
    pub campfire_gain: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            jump_gain: 1.0,
            fall_gain: 0.3,
            collect_gain: 0.3,
            campfire_gain: 0.3,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// Parse settings, clamping every volume into 0..=1
    pub fn from_json(json: &str) -> GenResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| GenError::InvalidTuning(format!("settings: {}", e)))?;
        Ok(settings.clamped())
    }

    pub fn clamped(mut self) -> Self {
        for v in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.jump_gain,
            &mut self.fall_gain,
            &mut self.collect_gain,
            &mut self.campfire_gain,
        ] {
            *v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
        self
    }

    pub fn gain(&self, cue: Cue) -> f32 {
        match cue {
            Cue::Jump => self.jump_gain,
            Cue::Fall => self.fall_gain,
            Cue::Collect => self.collect_gain,
            Cue::Campfire => self.campfire_gain,
        }
    }

    /// Final output level for a cue
    pub fn cue_volume(&self, cue: Cue) -> f32 {
        self.master_volume * self.sfx_volume * self.gain(cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gains() {
        let s = Settings::default();
        assert_eq!(s.gain(Cue::Jump), 1.0);
        assert_eq!(s.gain(Cue::Fall), 0.3);
        assert_eq!(s.gain(Cue::Collect), 0.3);
        assert!((s.cue_volume(Cue::Jump) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "particles": false }"#).unwrap();
        assert!(!s.particles);
        assert_eq!(s.master_volume, 0.8);
    }

    #[test]
    fn test_volumes_clamped() {
        let s = Settings::from_json(r#"{ "master_volume": 3.0, "fall_gain": -1.0 }"#).unwrap();
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.fall_gain, 0.0);
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(Settings::from_json("not json").is_err());
    }
}
