//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::{Cue, Settings};
use crate::sim::GameEvent;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    muted: bool,
    /// Running campfire crackle, if any
    campfire: Option<(OscillatorNode, GainNode)>,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            muted: false,
            campfire: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some((_, gain)) = &self.campfire {
            let level = if muted {
                0.0
            } else {
                self.settings.cue_volume(Cue::Campfire) * 0.5
            };
            gain.gain().set_value(level);
        }
    }

    fn volume(&self, cue: Cue) -> f32 {
        if self.muted {
            0.0
        } else {
            self.settings.cue_volume(cue)
        }
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Jumped => self.play(Cue::Jump),
            GameEvent::FellIntoCanyon => self.play(Cue::Fall),
            GameEvent::CollectableFound { .. } => self.play(Cue::Collect),
            GameEvent::CampReached => self.start_campfire(),
            GameEvent::LevelStarted { .. } | GameEvent::GameOver => self.stop_campfire(),
            GameEvent::LifeLost { .. } => {}
        }
    }

    /// Play a one-shot cue
    pub fn play(&self, cue: Cue) {
        let vol = self.volume(cue);
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Jump => self.play_jump(ctx, vol),
            Cue::Fall => self.play_fall(ctx, vol),
            Cue::Collect => self.play_collect(ctx, vol),
            Cue::Campfire => {}
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Jump - springy rise
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(250.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Fall - long descending whistle
    fn play_fall(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(120.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.65).ok();
    }

    /// Collect - two-note mug clink over a short rising sip
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Clink: bright taps a fifth apart, each sagging slightly in pitch
        for (start, freq) in [(0.0, 1320.0), (0.06, 1980.0)] {
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                let t0 = t + start;
                gain.gain().set_value_at_time(0.001, t0).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.45, t0 + 0.005)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t0 + 0.12)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(freq * 0.97, t0 + 0.12)
                    .ok();
                osc.start_with_when(t0).ok();
                osc.stop_with_when(t0 + 0.14).ok();
            }
        }

        // Sip
        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(320.0, t + 0.16)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }

    /// Low crackling drone, looped until `stop_campfire`
    fn start_campfire(&mut self) {
        if self.campfire.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(self.volume(Cue::Campfire) * 0.5, t + 0.5)
            .ok();
        // Irregular pitch steps give the crackle
        for (i, freq) in [55.0, 70.0, 48.0, 62.0, 51.0, 66.0].iter().enumerate() {
            osc.frequency()
                .set_value_at_time(*freq, t + i as f64 * 0.13)
                .ok();
        }
        osc.start().ok();
        log::debug!("Campfire sound started");
        self.campfire = Some((osc, gain));
    }

    fn stop_campfire(&mut self) {
        if let Some((osc, _)) = self.campfire.take() {
            osc.stop().ok();
            log::debug!("Campfire sound stopped");
        }
    }
}
