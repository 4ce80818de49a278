//! Audio collaborator
//!
//! Procedurally generated sound effects - no external files needed! Each
//! effect is a short list of oscillator tones. On the web they are played
//! through the Web Audio API; elsewhere (or when the context cannot be
//! created) the manager runs silent and every call is a no-op.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    PlayerShoot,
    ChargeStart,
    /// Charge shot released (level 1-3)
    ChargeRelease(u8),
    ForceToggle,
    ForceAbsorb,
    Explosion,
    EnemyShoot,
    PowerUp,
    PlayerHit,
    GameOver,
    WaveChange,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator voice: a pitch sweep under a decaying gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f64,
    pub gain: f32,
}

const fn tone(waveform: Waveform, start_hz: f32, end_hz: f32, duration: f64, gain: f32) -> Tone {
    Tone {
        waveform,
        start_hz,
        end_hz,
        duration,
        gain,
    }
}

use Waveform::*;

const PLAYER_SHOOT: &[Tone] = &[tone(Sine, 600.0, 600.0, 0.05, 0.4)];
const CHARGE_START: &[Tone] = &[tone(Sine, 150.0, 150.0, 0.05, 0.3)];
const CHARGE_RELEASE: [&[Tone]; 3] = [
    &[tone(Sine, 400.0, 400.0, 0.15, 0.5)],
    &[tone(Sine, 500.0, 500.0, 0.15, 0.6)],
    &[tone(Sine, 700.0, 700.0, 0.20, 0.7)],
];
const FORCE_TOGGLE: &[Tone] = &[tone(Square, 800.0, 800.0, 0.03, 0.3)];
const FORCE_ABSORB: &[Tone] = &[tone(Sine, 1200.0, 1200.0, 0.05, 0.25)];
// Low rumble plus a short high crack
const EXPLOSION: &[Tone] = &[
    tone(Sawtooth, 100.0, 30.0, 0.3, 0.5),
    tone(Square, 1500.0, 1500.0, 0.1, 0.2),
];
const ENEMY_SHOOT: &[Tone] = &[tone(Sine, 300.0, 300.0, 0.04, 0.2)];
const POWER_UP: &[Tone] = &[tone(Sine, 440.0, 880.0, 0.2, 0.5)];
const PLAYER_HIT: &[Tone] = &[
    tone(Sawtooth, 200.0, 60.0, 0.2, 0.4),
    tone(Triangle, 120.0, 120.0, 0.2, 0.2),
];
const GAME_OVER: &[Tone] = &[tone(Sine, 880.0, 220.0, 0.5, 0.5)];
// Two-tone alert
const WAVE_CHANGE: &[Tone] = &[
    tone(Sine, 500.0, 500.0, 0.15, 0.2),
    tone(Sine, 600.0, 600.0, 0.15, 0.2),
];

impl SoundEffect {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::PlayerShoot => PLAYER_SHOOT,
            SoundEffect::ChargeStart => CHARGE_START,
            SoundEffect::ChargeRelease(level) => {
                CHARGE_RELEASE[(level.clamp(1, 3) - 1) as usize]
            }
            SoundEffect::ForceToggle => FORCE_TOGGLE,
            SoundEffect::ForceAbsorb => FORCE_ABSORB,
            SoundEffect::Explosion => EXPLOSION,
            SoundEffect::EnemyShoot => ENEMY_SHOOT,
            SoundEffect::PowerUp => POWER_UP,
            SoundEffect::PlayerHit => PLAYER_HIT,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::WaveChange => WAVE_CHANGE,
        }
    }
}

/// Audio initialization failures. Never fatal: the manager goes silent.
#[derive(Debug, Error)]
pub enum AudioInitError {
    #[error("audio disabled in settings")]
    Disabled,
    #[error("no audio output on this platform")]
    NoOutput,
    #[error("failed to create audio context: {0}")]
    Context(String),
}

/// Something that can turn a sound effect into noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend used in silent mode
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AudioBackend, AudioInitError, SoundEffect, Tone, Waveform};
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    /// Web Audio oscillators
    pub struct WebAudioBackend {
        ctx: AudioContext,
    }

    impl WebAudioBackend {
        pub fn new() -> Result<Self, AudioInitError> {
            let ctx = AudioContext::new().map_err(|e| AudioInitError::Context(format!("{:?}", e)))?;
            Ok(Self { ctx })
        }

        /// Create an oscillator with gain envelope
        fn create_osc(&self, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, tone: &Tone, vol: f32) {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = self.create_osc(tone.start_hz, osc_type) else {
                return;
            };
            let t = self.ctx.current_time();
            let end = t + tone.duration;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone.end_hz != tone.start_hz {
                osc.frequency().set_value_at_time(tone.start_hz, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_hz, end)
                    .ok();
            }

            osc.start().ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }

    impl AudioBackend for WebAudioBackend {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            // Browsers keep the context suspended until a user gesture
            if self.ctx.state() == AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }
            for tone in effect.tones() {
                self.play_tone(tone, volume);
            }
        }
    }
}

/// Platform default output
fn open_backend() -> Result<Box<dyn AudioBackend>, AudioInitError> {
    #[cfg(target_arch = "wasm32")]
    {
        Ok(Box::new(WebAudioBackend::new()?))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Err(AudioInitError::NoOutput)
    }
}

/// Sound trigger front end used by the frame loop.
///
/// All `play_*` calls are safe whether or not audio is available.
pub struct SoundManager {
    backend: Box<dyn AudioBackend>,
    enabled: bool,
    muted: bool,
    master_volume: f32,
}

impl SoundManager {
    /// Open the platform backend, falling back to silent mode on failure
    pub fn new(settings: &Settings) -> Self {
        let opened = if settings.audio_enabled {
            open_backend()
        } else {
            Err(AudioInitError::Disabled)
        };
        let mut manager = match opened {
            Ok(backend) => Self::with_backend(backend),
            Err(e) => {
                log::warn!("sound system unavailable ({}), running silent", e);
                Self::silent()
            }
        };
        manager.muted = settings.muted;
        manager.set_volume(settings.master_volume);
        manager
    }

    pub fn with_backend(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            enabled: true,
            muted: false,
            master_volume: 0.7,
        }
    }

    pub fn silent() -> Self {
        Self {
            enabled: false,
            ..Self::with_backend(Box::new(NullBackend))
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.master_volume
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("sound {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if !self.enabled || self.muted || self.master_volume <= 0.0 {
            return;
        }
        self.backend.play(effect, self.master_volume);
    }

    pub fn play_player_shoot(&mut self) {
        self.play(SoundEffect::PlayerShoot);
    }

    pub fn play_charge_start(&mut self) {
        self.play(SoundEffect::ChargeStart);
    }

    pub fn play_charge_release(&mut self, level: u8) {
        self.play(SoundEffect::ChargeRelease(level.clamp(1, 3)));
    }

    pub fn play_force_toggle(&mut self) {
        self.play(SoundEffect::ForceToggle);
    }

    pub fn play_force_absorb(&mut self) {
        self.play(SoundEffect::ForceAbsorb);
    }

    pub fn play_explosion(&mut self) {
        self.play(SoundEffect::Explosion);
    }

    pub fn play_enemy_shoot(&mut self) {
        self.play(SoundEffect::EnemyShoot);
    }

    pub fn play_powerup(&mut self) {
        self.play(SoundEffect::PowerUp);
    }

    pub fn play_player_hit(&mut self) {
        self.play(SoundEffect::PlayerHit);
    }

    pub fn play_game_over(&mut self) {
        self.play(SoundEffect::GameOver);
    }

    pub fn play_wave_change(&mut self) {
        self.play(SoundEffect::WaveChange);
    }

    /// Translate one simulation event into its sound cue(s)
    pub fn handle_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PlayerShot => self.play_player_shoot(),
            GameEvent::ChargeStarted => self.play_charge_start(),
            GameEvent::ChargeReleased { level } => self.play_charge_release(level),
            GameEvent::ForceToggled | GameEvent::WeaponToggled => self.play_force_toggle(),
            GameEvent::ForceAbsorbed => self.play_force_absorb(),
            GameEvent::EnemyShot => self.play_enemy_shoot(),
            GameEvent::EnemyDestroyed { .. } => self.play_explosion(),
            GameEvent::BossDefeated { .. } | GameEvent::WaveChanged { .. } => {
                self.play_wave_change()
            }
            GameEvent::BossSpawned { .. } => self.play_wave_change(),
            GameEvent::PowerUpCollected { .. } => self.play_powerup(),
            GameEvent::PlayerHit => self.play_player_hit(),
            GameEvent::GameOver => self.play_game_over(),
            GameEvent::ForceAcquired { .. } | GameEvent::Restarted => {}
        }
    }
}
