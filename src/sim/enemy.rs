//! Enemies
//!
//! Each enemy kind has a fixed movement rule and fire pattern picked at spawn.
//! Kinds never change during an enemy's life.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, create_aimed_bullet};
use super::geom::Rect;
use crate::consts::*;

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Straight,
    Wave,
    Charge,
    Tank,
    Turret,
    Boss1,
    Boss2,
    Boss3,
}

/// Per-kind base stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyParams {
    pub hp: i32,
    pub speed: f32,
    pub score: u64,
    pub size: f32,
    /// Ticks between volleys (0 = never fires)
    pub shoot_interval: u32,
}

impl EnemyKind {
    pub const BOSSES: [EnemyKind; 3] = [EnemyKind::Boss1, EnemyKind::Boss2, EnemyKind::Boss3];

    pub fn params(self) -> EnemyParams {
        let (hp, speed, score, size, shoot_interval) = match self {
            EnemyKind::Straight => (1, 3.0, 100, 25.0, 0),
            EnemyKind::Wave => (2, 2.0, 150, 30.0, 120),
            EnemyKind::Charge => (1, 4.0, 200, 28.0, 0),
            EnemyKind::Tank => (5, 1.0, 300, 40.0, 90),
            EnemyKind::Turret => (3, TERRAIN_SCROLL_SPEED, 250, TURRET_SIZE, TURRET_INTERVAL[0]),
            EnemyKind::Boss1 => (60, 1.0, 5000, 100.0, 60),
            EnemyKind::Boss2 => (90, 1.0, 8000, 110.0, 50),
            EnemyKind::Boss3 => (130, 1.0, 12000, 120.0, 40),
        };
        EnemyParams {
            hp,
            speed,
            score,
            size,
            shoot_interval,
        }
    }

    pub fn is_boss(self) -> bool {
        matches!(self, EnemyKind::Boss1 | EnemyKind::Boss2 | EnemyKind::Boss3)
    }

    /// Enemies that survive ramming the player
    pub fn survives_contact(self) -> bool {
        self.is_boss() || self == EnemyKind::Turret
    }
}

/// Which terrain strip a turret is bolted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurretMount {
    Ceiling,
    Floor,
}

/// Kind-specific movement state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Linear,
    Sine { base_y: f32 },
    Homing { target_y: Option<f32> },
    Mounted { mount: TurretMount },
    Boss { anchor_y: f32, phase: f32, arrived: bool },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: f32,
    pub score: u64,
    pub size: f32,
    pub shoot_interval: u32,
    pub shoot_cooldown: u32,
    pub time_alive: u32,
    pub motion: Motion,
    pub active: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        let p = kind.params();
        let motion = match kind {
            EnemyKind::Straight | EnemyKind::Tank => Motion::Linear,
            EnemyKind::Wave => Motion::Sine { base_y: pos.y },
            EnemyKind::Charge => Motion::Homing { target_y: None },
            EnemyKind::Turret => Motion::Mounted {
                mount: TurretMount::Floor,
            },
            EnemyKind::Boss1 | EnemyKind::Boss2 | EnemyKind::Boss3 => Motion::Boss {
                anchor_y: pos.y,
                phase: 0.0,
                arrived: false,
            },
        };
        Self {
            kind,
            pos,
            hp: p.hp,
            max_hp: p.hp,
            speed: p.speed,
            score: p.score,
            size: p.size,
            shoot_interval: p.shoot_interval,
            shoot_cooldown: p.shoot_interval,
            time_alive: 0,
            motion,
            active: true,
        }
    }

    /// Terrain turret firing every `shoot_interval` ticks
    pub fn turret(pos: Vec2, mount: TurretMount, shoot_interval: u32) -> Self {
        let mut e = Self::new(EnemyKind::Turret, pos);
        e.motion = Motion::Mounted { mount };
        e.shoot_interval = shoot_interval;
        e.shoot_cooldown = shoot_interval;
        e
    }

    /// Boss entering from the right edge, vertically centred
    pub fn boss(kind: EnemyKind) -> Self {
        let size = kind.params().size;
        Self::new(
            kind,
            Vec2::new(SCREEN_WIDTH + OFFSCREEN_MARGIN, (SCREEN_HEIGHT - size) / 2.0),
        )
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(self.size),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }

    /// Advance one tick. `player_center` is passed by value each tick.
    /// Returns any bullets fired.
    pub fn update(&mut self, player_center: Vec2, rng: &mut impl Rng) -> Vec<Bullet> {
        if !self.active {
            return Vec::new();
        }
        self.time_alive += 1;
        self.advance(player_center);

        self.pos.y = self.pos.y.clamp(0.0, SCREEN_HEIGHT - self.size);

        if self.pos.x < -self.size - ENEMY_EXIT_MARGIN {
            self.active = false;
            return Vec::new();
        }

        if self.shoot_interval == 0 || !self.ready_to_fire() {
            return Vec::new();
        }
        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
            return Vec::new();
        }
        self.shoot_cooldown = self.shoot_interval;
        self.shoot(player_center, rng)
    }

    fn ready_to_fire(&self) -> bool {
        match self.motion {
            Motion::Boss { arrived, .. } => arrived,
            _ => true,
        }
    }

    fn advance(&mut self, player_center: Vec2) {
        let speed = self.speed;
        let size = self.size;
        let time = self.time_alive as f32;
        match &mut self.motion {
            Motion::Linear => self.pos.x -= speed,
            Motion::Sine { base_y } => {
                self.pos.x -= speed;
                self.pos.y = *base_y + (time * WAVE_ENEMY_FREQUENCY).sin() * WAVE_ENEMY_AMPLITUDE;
            }
            Motion::Homing { target_y } => {
                let target = *target_y.get_or_insert(player_center.y - size / 2.0);
                self.pos.x -= speed;
                if (self.pos.y - target).abs() > 2.0 {
                    self.pos.y += (target - self.pos.y).signum() * speed * 0.5;
                }
            }
            Motion::Mounted { .. } => self.pos.x -= TERRAIN_SCROLL_SPEED,
            Motion::Boss {
                anchor_y,
                phase,
                arrived,
            } => {
                if !*arrived {
                    self.pos.x -= speed;
                    if self.pos.x <= BOSS_HOLD_X {
                        self.pos.x = BOSS_HOLD_X;
                        *arrived = true;
                    }
                    return;
                }
                *phase += BOSS_PHASE_SPEED;
                let t = *phase;
                let (dx, dy) = match self.kind {
                    // vertical sine sweep
                    EnemyKind::Boss1 => (0.0, t.sin() * BOSS_AMPLITUDE),
                    // figure-8: horizontal at 1x, vertical at 2x
                    EnemyKind::Boss2 => (t.sin() * 80.0, (2.0 * t).sin() * BOSS_AMPLITUDE * 0.6),
                    // circle of radius 100 starting at the hold point
                    _ => ((t.cos() - 1.0) * 100.0, t.sin() * 100.0),
                };
                self.pos.x = BOSS_HOLD_X + dx;
                self.pos.y = *anchor_y + dy;
            }
        }
    }

    fn shoot(&self, player_center: Vec2, rng: &mut impl Rng) -> Vec<Bullet> {
        let muzzle = Vec2::new(self.pos.x, self.pos.y + self.size / 2.0);
        let muzzle_tl = muzzle - Vec2::splat(ENEMY_BULLET_SIZE / 2.0);
        let aimed = || create_aimed_bullet(muzzle, player_center, ENEMY_BULLET_SPEED);
        let spread = |angles: &[f32]| spread_shot(muzzle_tl, angles);

        match self.kind {
            EnemyKind::Wave => {
                if rng.random_bool(WAVE_ENEMY_AIMED_CHANCE) {
                    vec![aimed()]
                } else {
                    spread(&[0.0])
                }
            }
            EnemyKind::Tank => spread(&TANK_SPREAD_DEG[..]),
            EnemyKind::Turret => vec![aimed()],
            EnemyKind::Boss1 => spread(&[-15.0, 0.0, 15.0]),
            EnemyKind::Boss2 => {
                let mut shots = vec![aimed()];
                shots.extend(spread(&[-30.0, 30.0]));
                shots
            }
            EnemyKind::Boss3 => {
                let mut shots = vec![aimed()];
                shots.extend(spread(&[-40.0, -20.0, 20.0, 40.0]));
                shots
            }
            EnemyKind::Straight | EnemyKind::Charge => Vec::new(),
        }
    }

    /// Subtract hp. Returns true if this hit destroyed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        if self.hp <= 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Leftward volley, one bullet per angle (degrees, positive = down)
fn spread_shot(origin: Vec2, angles: &[f32]) -> Vec<Bullet> {
    angles
        .iter()
        .map(|&a| Bullet::enemy_shot_angled(origin, a))
        .collect()
}
