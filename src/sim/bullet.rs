//! Projectiles
//!
//! A bullet is a moving box with damage and a pierce budget. It lives until it
//! leaves the screen (plus margin) or runs out of pierce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;
use crate::{aim_velocity, direction_deg};

/// Who fired the bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A projectile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub owner: BulletOwner,
    pub damage: i32,
    /// Remaining hits before the bullet is spent
    pub pierce_count: i32,
    /// Charge level (0 for normal shots and enemy bullets)
    pub charge_level: u8,
    pub active: bool,
}

impl Bullet {
    /// Normal or charged player shot travelling right
    pub fn player_shot(pos: Vec2, charge_level: u8) -> Self {
        Self::player_shot_angled(pos, charge_level, 0.0)
    }

    /// Player shot rotated `angle_deg` off the horizontal (positive = down)
    pub fn player_shot_angled(pos: Vec2, charge_level: u8, angle_deg: f32) -> Self {
        let level = (charge_level as usize).min(3);
        let scale = CHARGE_SIZE[level];
        Self {
            pos,
            vel: direction_deg(angle_deg) * BULLET_SPEED,
            size: Vec2::new(BULLET_WIDTH * scale, BULLET_HEIGHT * scale),
            owner: BulletOwner::Player,
            damage: CHARGE_DAMAGE[level],
            pierce_count: CHARGE_PIERCE[level],
            charge_level: level as u8,
            active: true,
        }
    }

    /// Enemy bullet with an explicit velocity
    pub fn enemy_shot(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::splat(ENEMY_BULLET_SIZE),
            owner: BulletOwner::Enemy,
            damage: 1,
            pierce_count: 1,
            charge_level: 0,
            active: true,
        }
    }

    /// Enemy bullet travelling left, rotated by `angle_deg` (positive = down)
    pub fn enemy_shot_angled(pos: Vec2, angle_deg: f32) -> Self {
        Self::enemy_shot(pos, direction_deg(180.0 - angle_deg) * ENEMY_BULLET_SPEED)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_player(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    /// Advance one tick; deactivates once outside the screen by more than the margin
    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.pos += self.vel;

        let out_x = self.pos.x > SCREEN_WIDTH + OFFSCREEN_MARGIN || self.pos.x < -OFFSCREEN_MARGIN;
        let out_y = self.pos.y > SCREEN_HEIGHT + OFFSCREEN_MARGIN || self.pos.y < -OFFSCREEN_MARGIN;
        if out_x || out_y {
            self.active = false;
        }
    }

    /// Register a hit. Spends one pierce; the bullet dies when none remain.
    pub fn hit(&mut self) {
        self.pierce_count -= 1;
        if self.pierce_count <= 0 {
            self.active = false;
        }
    }
}

/// Enemy bullet from `source` aimed at `target` at `speed`.
///
/// Source and target are bullet-centre points; the returned bullet is
/// positioned so its centre sits on `source`.
pub fn create_aimed_bullet(source: Vec2, target: Vec2, speed: f32) -> Bullet {
    let vel = aim_velocity(source, target, speed);
    let half = Vec2::splat(ENEMY_BULLET_SIZE / 2.0);
    Bullet::enemy_shot(source - half, vel)
}
