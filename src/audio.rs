//! Audio boundary
//!
//! The simulation only emits [`GameEvent`]s. [`AudioDirector`] turns them
//! into [`SoundCue`]s; on the web, `AudioManager` plays those cues as short
//! procedural tones. Nothing here ever blocks a tick.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Minimum gap between two save sounds (seconds)
pub const SAVE_CUE_COOLDOWN: f32 = 0.12;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Goalie stopped a puck
    Save,
    /// Puck went in
    Goal,
    /// Last life lost
    GameOver,
    /// Background loop on
    MusicStart,
    /// Background loop off
    MusicStop,
}

/// Maps outcome events to cues, throttling rapid-fire saves
#[derive(Debug, Clone, Default)]
pub struct AudioDirector {
    save_cooldown: f32,
}

impl AudioDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues for this frame's events. Call once per frame with the frame dt.
    pub fn update(&mut self, dt: f32, events: &[GameEvent], settings: &Settings) -> Vec<SoundCue> {
        if self.save_cooldown > 0.0 {
            self.save_cooldown = (self.save_cooldown - dt).max(0.0);
        }

        let mut cues = Vec::new();
        for event in events {
            match event {
                GameEvent::Started => {
                    if !settings.muted {
                        cues.push(SoundCue::MusicStart);
                    }
                }
                GameEvent::Save { .. } => {
                    if !settings.muted && self.save_cooldown <= 0.0 {
                        cues.push(SoundCue::Save);
                        self.save_cooldown = SAVE_CUE_COOLDOWN;
                    }
                }
                GameEvent::Miss { .. } => {
                    if !settings.muted {
                        cues.push(SoundCue::Goal);
                    }
                }
                GameEvent::GameOver { .. } => {
                    cues.push(SoundCue::MusicStop);
                    if !settings.muted {
                        cues.push(SoundCue::GameOver);
                    }
                }
            }
        }
        cues
    }

    /// Music follows the mute toggle while a run is in progress
    pub fn mute_changed(&self, muted: bool, playing: bool) -> Option<SoundCue> {
        if muted {
            Some(SoundCue::MusicStop)
        } else if playing {
            Some(SoundCue::MusicStart)
        } else {
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundCue;
    use crate::settings::Settings;

    /// Web Audio player for cues
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<(OscillatorNode, GainNode)>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, music: None }
        }

        /// Play a cue. Failures are swallowed; audio is best effort.
        pub fn play(&mut self, cue: SoundCue, settings: &Settings) {
            let Some(ctx) = self.ctx.clone() else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let sfx = settings.effective_sfx_volume();
            match cue {
                SoundCue::Save => {
                    self.blip(&ctx, 660.0, 990.0, 0.08, sfx * 0.5, OscillatorType::Square)
                }
                SoundCue::Goal => {
                    self.blip(&ctx, 220.0, 110.0, 0.4, sfx * 0.6, OscillatorType::Sawtooth)
                }
                SoundCue::GameOver => {
                    self.blip(&ctx, 330.0, 55.0, 1.2, sfx * 0.6, OscillatorType::Triangle)
                }
                SoundCue::MusicStart => self.start_music(&ctx, settings.effective_music_volume()),
                SoundCue::MusicStop => self.stop_music(),
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

        /// Pitch sweep from `from` to `to` Hz with a decaying envelope
        fn blip(
            &self,
            ctx: &AudioContext,
            from: f32,
            to: f32,
            secs: f64,
            vol: f32,
            kind: OscillatorType,
        ) {
            if vol <= 0.0 {
                return;
            }
            let Some((osc, gain)) = self.create_osc(ctx, from, kind) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + secs).ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(to, t + secs).ok();

            osc.start().ok();
            osc.stop_with_when(t + secs + 0.05).ok();
        }

        /// Low looping drone under gameplay
        fn start_music(&mut self, ctx: &AudioContext, vol: f32) {
            self.stop_music();
            if vol <= 0.0 {
                return;
            }
            let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Sine) else {
                return;
            };
            gain.gain().set_value(vol * 0.15);
            osc.start().ok();
            self.music = Some((osc, gain));
        }

        fn stop_music(&mut self) {
            if let Some((osc, _gain)) = self.music.take() {
                osc.stop().ok();
            }
        }
    }
}
