//! Audio cues using Web Audio API
//!
//! Procedurally generated - no sound files to load. Every failure here is
//! swallowed so a broken audio stack never interrupts the game loop.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::RoundObserver;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Santa caught a present
    Catch,
    /// Present hit the ground - round over
    Miss,
    /// Round started
    RoundStart,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Cue volume from settings (already includes the mute preference)
    volume: f32,
    /// Temporary mute while the window is unfocused
    blurred: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: crate::Settings::default().effective_volume(),
            blurred: false,
        }
    }

    /// Apply volume and mute preferences
    pub fn configure(&mut self, settings: &crate::Settings) {
        self.volume = settings.effective_volume();
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Silence cues while the window is in the background
    pub fn set_blurred(&mut self, blurred: bool) {
        self.blurred = blurred;
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = if self.blurred { 0.0 } else { self.volume };
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Catch => self.play_catch(ctx, vol),
            SoundEffect::Miss => self.play_miss(ctx, vol),
            SoundEffect::RoundStart => self.play_round_start(ctx, vol),
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

    /// Catch - bright two-note sleigh bell
    fn play_catch(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1320.0, 1760.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Miss - sad descending
    fn play_miss(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 330.0, 262.0, 196.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Round start - opening bars of a jingle
    fn play_round_start(&self, ctx: &AudioContext, vol: f32) {
        let notes = [
            659.0, 659.0, 659.0, 0.0, 659.0, 659.0, 659.0, 0.0, 659.0, 784.0, 523.0, 587.0, 659.0,
        ];
        for (i, freq) in notes.iter().enumerate() {
            if *freq <= 0.0 {
                continue;
            }
            let delay = i as f64 * 0.12;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.12, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.11).ok();
            }
        }
    }
}

impl RoundObserver for AudioManager {
    fn on_catch(&mut self, _score: u32) {
        self.play(SoundEffect::Catch);
    }

    fn on_miss(&mut self, _final_score: u32) {
        self.play(SoundEffect::Miss);
    }

    fn on_round_start(&mut self) {
        self.resume();
        self.play(SoundEffect::RoundStart);
    }
}
