//! Force orbs: up to three satellites that shoot alongside the player and
//! soak up enemy bullets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::geom::{Rect, clamp_to_screen};
use crate::consts::*;

/// Where a force sits relative to the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachState {
    Front,
    Back,
    Detached,
}

impl AttachState {
    /// FRONT -> BACK -> DETACHED -> FRONT
    pub fn next(self) -> Self {
        match self {
            AttachState::Front => AttachState::Back,
            AttachState::Back => AttachState::Detached,
            AttachState::Detached => AttachState::Front,
        }
    }
}

/// Which of the three forces this is. Also the fixed absorption order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceSlot {
    Center,
    Top,
    Bottom,
}

impl ForceSlot {
    pub const ALL: [ForceSlot; 3] = [ForceSlot::Center, ForceSlot::Top, ForceSlot::Bottom];

    fn vertical_offset(self) -> f32 {
        match self {
            ForceSlot::Center => 0.0,
            ForceSlot::Top => -FORCE_SATELLITE_OFFSET,
            ForceSlot::Bottom => FORCE_SATELLITE_OFFSET,
        }
    }
}

/// A single force orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Force {
    pub slot: ForceSlot,
    /// Top-left corner
    pub pos: Vec2,
    pub state: AttachState,
    /// Inactive until acquired from a FORCE pickup
    pub active: bool,
    pub shoot_cooldown: u32,
}

impl Force {
    pub fn new(slot: ForceSlot) -> Self {
        Self {
            slot,
            pos: Vec2::ZERO,
            state: AttachState::Detached,
            active: false,
            shoot_cooldown: 0,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::splat(FORCE_SIZE)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Self::size(),
        }
    }

    /// Activate in the FRONT position next to the ship
    pub fn activate(&mut self, player_pos: Vec2) {
        self.active = true;
        self.state = AttachState::Front;
        self.pos = self.attached_pos(player_pos, AttachState::Front);
    }

    /// Cycle attach state. No effect while inactive.
    pub fn toggle_state(&mut self) {
        if self.active {
            self.state = self.state.next();
        }
    }

    fn attached_pos(&self, player_pos: Vec2, state: AttachState) -> Vec2 {
        let half = FORCE_SIZE / 2.0;
        let y = player_pos.y + PLAYER_HEIGHT / 2.0 - half + self.slot.vertical_offset();
        let x = match state {
            AttachState::Back => player_pos.x - FORCE_ATTACH_DISTANCE - half,
            _ => player_pos.x + PLAYER_WIDTH + FORCE_ATTACH_DISTANCE - half,
        };
        Vec2::new(x, y)
    }

    pub fn update(&mut self, player_pos: Vec2) {
        if !self.active {
            return;
        }
        match self.state {
            AttachState::Front | AttachState::Back => {
                self.pos = self.attached_pos(player_pos, self.state);
            }
            AttachState::Detached => {
                self.pos.x += FORCE_DETACHED_SPEED;
                self.pos = clamp_to_screen(self.pos, Self::size(), Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT));
            }
        }
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Fire from the leading edge, gated by this force's own cooldown
    pub fn shoot(&mut self) -> Option<Bullet> {
        if !self.active || self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = FORCE_SHOT_DELAY;
        let origin = Vec2::new(
            self.pos.x + FORCE_SIZE,
            self.pos.y + FORCE_SIZE / 2.0 - BULLET_HEIGHT / 2.0,
        );
        Some(Bullet::player_shot(origin, 0))
    }
}

/// The three force slots plus acquisition bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceSet {
    pub forces: [Force; 3],
}

impl Default for ForceSet {
    fn default() -> Self {
        Self {
            forces: ForceSlot::ALL.map(Force::new),
        }
    }
}

impl ForceSet {
    pub fn get(&self, slot: ForceSlot) -> &Force {
        &self.forces[slot as usize]
    }

    pub fn active_count(&self) -> usize {
        self.forces.iter().filter(|f| f.active).count()
    }

    /// Apply a FORCE pickup.
    ///
    /// First pickup lights the centre force, second lights top and bottom
    /// together; further pickups do nothing. Returns how many forces were
    /// newly activated.
    pub fn acquire(&mut self, player_pos: Vec2) -> usize {
        match self.active_count() {
            0 => {
                self.forces[ForceSlot::Center as usize].activate(player_pos);
                1
            }
            1 => {
                self.forces[ForceSlot::Top as usize].activate(player_pos);
                self.forces[ForceSlot::Bottom as usize].activate(player_pos);
                2
            }
            _ => 0,
        }
    }

    /// Manual toggle only drives the centre force. Returns true if it moved.
    pub fn toggle_center(&mut self) -> bool {
        let center = &mut self.forces[ForceSlot::Center as usize];
        if !center.active {
            return false;
        }
        center.toggle_state();
        true
    }

    pub fn update(&mut self, player_pos: Vec2) {
        for force in &mut self.forces {
            force.update(player_pos);
        }
    }

    /// Every active force whose cooldown allows it fires one bullet
    pub fn shoot(&mut self) -> Vec<Bullet> {
        self.forces.iter_mut().filter_map(Force::shoot).collect()
    }

    /// First active force (in slot order) overlapping `rect`.
    /// A bullet is absorbed by at most one force.
    pub fn absorber(&self, rect: &Rect) -> Option<ForceSlot> {
        self.forces
            .iter()
            .find(|f| f.active && f.rect().intersects(rect))
            .map(|f| f.slot)
    }
}
