//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no external files needed! Every Web Audio
//! call is allowed to fail; failures are dropped and the game carries on.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{LaneCues, ObstacleKind};
use crate::sinks::AudioSink;

/// A looping tone that plays while an obstacle kind is on screen
struct AmbientLoop {
    osc: OscillatorNode,
    gain: GainNode,
}

impl AmbientLoop {
    fn stop(self) {
        self.osc.stop().ok();
        self.gain.disconnect().ok();
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    ambient_volume: f32,
    ground: Option<AmbientLoop>,
    air: Option<AmbientLoop>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            ambient_volume: settings.effective_ambient_volume(),
            ground: None,
            air: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Stop every looping cue
    pub fn silence(&mut self) {
        if let Some(l) = self.ground.take() {
            l.stop();
        }
        if let Some(l) = self.air.take() {
            l.stop();
        }
    }

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

    fn start_loop(&self, kind: ObstacleKind) -> Option<AmbientLoop> {
        if self.ambient_volume <= 0.0 {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        // Ground: low hum; Air: higher whistle that slides upward
        let (freq, osc_type, level) = match kind {
            ObstacleKind::Ground => (110.0, OscillatorType::Triangle, 0.25),
            ObstacleKind::Air => (520.0, OscillatorType::Sine, 0.15),
        };
        let (osc, gain) = self.create_osc(ctx, freq, osc_type)?;
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(self.ambient_volume * level, t + 0.08)
            .ok();
        if kind == ObstacleKind::Air {
            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(freq * 1.2, t + 0.4)
                .ok();
        }
        osc.start().ok()?;
        Some(AmbientLoop { osc, gain })
    }

    fn set_lane(&mut self, kind: ObstacleKind, active: bool) {
        let playing = match kind {
            ObstacleKind::Ground => self.ground.is_some(),
            ObstacleKind::Air => self.air.is_some(),
        };
        if active == playing {
            return;
        }

        let next = if active { self.start_loop(kind) } else { None };
        let slot = match kind {
            ObstacleKind::Ground => &mut self.ground,
            ObstacleKind::Air => &mut self.air,
        };
        if let Some(old) = std::mem::replace(slot, next) {
            old.stop();
        }
    }

    /// Jump - quick rising chirp
    fn play_chirp(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 330.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(330.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Collision - short descending "ouch"
    fn play_ouch(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(520.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(140.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();

        // Low thud underneath
        if let Some((osc, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }
}

impl AudioSink for AudioManager {
    fn set_lane_cues(&mut self, cues: LaneCues) {
        self.set_lane(ObstacleKind::Ground, cues.ground);
        self.set_lane(ObstacleKind::Air, cues.air);
    }

    fn play_collision(&mut self) {
        self.silence();
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        self.play_ouch(ctx, vol);
    }

    fn play_jump(&mut self) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        if let Some(ctx) = &self.ctx {
            self.play_chirp(ctx, vol);
        }
    }
}
