//! Per-tick input snapshot
//!
//! The frontend samples the keyboard once per frame and hands the simulation
//! an immutable snapshot: which keys are held, plus which toggle keys were
//! pressed since the previous frame.

use serde::{Deserialize, Serialize};

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Normal shot (auto-fire while held)
    Fire,
    /// Charge shot (charges while held, fires on release)
    Charge,
    /// Cycle the centre force FRONT -> BACK -> DETACHED
    ForceToggle,
    /// Switch NORMAL / 3-WAY while the 3-way effect is live
    WeaponToggle,
    Mute,
    Restart,
    Quit,
}

/// Held keys and discrete presses for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub charge: bool,
    /// One-shot presses (cleared by the frontend after each tick)
    pub force_toggle: bool,
    pub weapon_toggle: bool,
    pub mute: bool,
    pub restart: bool,
    pub quit: bool,
}

impl InputSnapshot {
    /// Is a continuous key currently held?
    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
            Key::Charge => self.charge,
            _ => false,
        }
    }

    /// Was a toggle key pressed this tick?
    pub fn was_pressed(&self, key: Key) -> bool {
        match key {
            Key::ForceToggle => self.force_toggle,
            Key::WeaponToggle => self.weapon_toggle,
            Key::Mute => self.mute,
            Key::Restart => self.restart,
            Key::Quit => self.quit,
            _ => false,
        }
    }

    /// Record a key going down. Movement/action keys become held,
    /// toggle keys register a press.
    pub fn set_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Up => self.up = down,
            Key::Down => self.down = down,
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Fire => self.fire = down,
            Key::Charge => self.charge = down,
            Key::ForceToggle => self.force_toggle |= down,
            Key::WeaponToggle => self.weapon_toggle |= down,
            Key::Mute => self.mute |= down,
            Key::Restart => self.restart |= down,
            Key::Quit => self.quit |= down,
        }
    }

    /// Builder-style helper: hold `key`
    pub fn with(mut self, key: Key) -> Self {
        self.set_key(key, true);
        self
    }

    /// Clear one-shot presses after they have been consumed
    pub fn clear_presses(&mut self) {
        self.force_toggle = false;
        self.weapon_toggle = false;
        self.mute = false;
        self.restart = false;
        self.quit = false;
    }
}
