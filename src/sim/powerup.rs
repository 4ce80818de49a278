//! Pickups dropped by destroyed enemies

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Force,
    Speed,
    Power,
    ThreeWay,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Force,
        PowerUpKind::Speed,
        PowerUpKind::Power,
        PowerUpKind::ThreeWay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Force => "FORCE",
            PowerUpKind::Speed => "SPEED",
            PowerUpKind::Power => "POWER",
            PowerUpKind::ThreeWay => "3WAY",
        }
    }
}

/// A pickup drifting left across the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub active: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(POWERUP_SIZE),
        }
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.pos.x -= POWERUP_SPEED;
        if self.pos.x < -POWERUP_SIZE {
            self.active = false;
        }
    }
}

/// Drop table: a fixed chance of a pickup, uniform over the four kinds
pub fn roll_drop(pos: Vec2, rng: &mut impl Rng) -> Option<PowerUp> {
    if !rng.random_bool(POWERUP_DROP_CHANCE) {
        return None;
    }
    PowerUpKind::ALL
        .choose(rng)
        .map(|&kind| PowerUp::new(kind, pos))
}
