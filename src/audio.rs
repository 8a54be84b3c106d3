//! Audio system
//!
//! Each cue is a single procedurally generated oscillator blip, so no sound
//! files are shipped. The simulation only sees the [`SoundSink`] trait; the
//! Web Audio backend lives behind `cfg(target_arch = "wasm32")`.

/// Sound cue triggered by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Ball breaks a brick
    Brick,
    /// Ball bounces off the paddle
    Paddle,
    /// Ball bounces off a side or the top wall
    Wall,
    /// Ball falls past the paddle
    Loss,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Parameters for one oscillator blip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    /// Hz
    pub frequency: f32,
    /// Starting gain before master volume
    pub gain: f32,
    /// Seconds until the gain has decayed and the oscillator stops
    pub duration: f64,
}

/// Gain the envelope decays to (exponential ramps cannot reach zero)
pub const DECAY_FLOOR: f32 = 0.001;

impl SoundCue {
    pub fn voice(self) -> Voice {
        match self {
            SoundCue::Brick => Voice {
                waveform: Waveform::Triangle,
                frequency: 880.0,
                gain: 0.5,
                duration: 0.5,
            },
            SoundCue::Paddle => Voice {
                waveform: Waveform::Square,
                frequency: 440.0,
                gain: 0.3,
                duration: 0.3,
            },
            SoundCue::Wall => Voice {
                waveform: Waveform::Sine,
                frequency: 220.0,
                gain: 0.2,
                duration: 0.2,
            },
            SoundCue::Loss => Voice {
                waveform: Waveform::Sawtooth,
                frequency: 110.0,
                gain: 0.5,
                duration: 1.0,
            },
        }
    }
}

/// Fire-and-forget cue output
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that drops every cue (native builds, headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{DECAY_FLOOR, SoundCue, SoundSink, Voice, Waveform};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
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
            Self { ctx, volume: 1.0 }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Set output volume (0.0 - 1.0); 0 silences every cue
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Create an oscillator with gain envelope
        fn create_osc(&self, ctx: &AudioContext, voice: &Voice) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match voice.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_voice(&self, ctx: &AudioContext, voice: Voice) {
            let Some((osc, gain)) = self.create_osc(ctx, &voice) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(voice.frequency, t).ok();
            gain.gain()
                .set_value_at_time((voice.gain * self.volume).max(DECAY_FLOOR), t)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(DECAY_FLOOR, t + voice.duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + voice.duration).ok();
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, cue: SoundCue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Until a user gesture resumes the context, cues are dropped
            if ctx.state() == AudioContextState::Suspended {
                return;
            }

            self.play_voice(ctx, cue.voice());
        }
    }
}
