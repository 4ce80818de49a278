//! Frame driver
//!
//! Owns the simulation state and its collaborators. Each frame takes one
//! input snapshot, runs one tick, plays the tick's sound cues and draws.

use crate::audio::SoundManager;
use crate::platform::{InputSnapshot, Key};
use crate::renderer::{Surface, draw_state};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Hud, tick};

pub struct Session {
    pub state: GameState,
    pub audio: SoundManager,
    settings: Settings,
    running: bool,
    /// Events produced by the most recent frame
    last_events: Vec<GameEvent>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let audio = SoundManager::new(&settings);
        Self::with_audio(settings, audio)
    }

    /// Build with an explicit sound manager (tests, headless runs)
    pub fn with_audio(settings: Settings, audio: SoundManager) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, settings.starting_lives),
            audio,
            settings,
            running: true,
            last_events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Advance one frame. Returns false once quit was requested.
    pub fn frame(&mut self, input: &InputSnapshot, surface: &mut dyn Surface) -> bool {
        if !self.running {
            return false;
        }
        if input.was_pressed(Key::Quit) {
            log::info!("Quit requested at tick {}", self.state.time_ticks);
            self.running = false;
            return false;
        }
        if input.was_pressed(Key::Mute) {
            self.audio.toggle_mute();
        }

        tick(&mut self.state, input);

        self.last_events = self.state.drain_events();
        for event in &self.last_events {
            self.audio.handle_event(event);
        }
        draw_state(&self.state, surface);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;

    fn session(seed: u64) -> Session {
        let settings = Settings {
            seed: Some(seed),
            ..Settings::default()
        };
        Session::with_audio(settings, SoundManager::silent())
    }

    #[test]
    fn test_frame_ticks_and_draws() {
        let mut s = session(3);
        let mut batch = VertexBatch::new();
        assert!(s.frame(&InputSnapshot::default(), &mut batch));
        assert_eq!(s.state.time_ticks, 1);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_frame_drains_events() {
        let mut s = session(3);
        let mut batch = VertexBatch::new();
        let input = InputSnapshot {
            fire: true,
            ..InputSnapshot::default()
        };
        s.frame(&input, &mut batch);
        assert!(s.state.events.is_empty());
        assert!(s.last_events().contains(&GameEvent::PlayerShot));
        assert!(!s.state.player_bullets.is_empty());
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut s = session(3);
        let mut batch = VertexBatch::new();
        let quit = InputSnapshot {
            quit: true,
            ..InputSnapshot::default()
        };
        assert!(!s.frame(&quit, &mut batch));
        assert!(!s.is_running());
        assert!(!s.frame(&InputSnapshot::default(), &mut batch));
        assert_eq!(s.state.time_ticks, 0);
    }

    #[test]
    fn test_mute_toggles_audio() {
        let mut s = session(3);
        let mut batch = VertexBatch::new();
        let mute = InputSnapshot {
            mute: true,
            ..InputSnapshot::default()
        };
        s.frame(&mute, &mut batch);
        assert!(s.audio.is_muted());
        s.frame(&mute, &mut batch);
        assert!(!s.audio.is_muted());
    }

    #[test]
    fn test_seed_from_settings_is_used() {
        let s = session(99);
        assert_eq!(s.state.seed, 99);
        assert_eq!(s.hud().lives, s.settings().starting_lives);
    }
}
