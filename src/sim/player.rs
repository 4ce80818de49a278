//! The player ship: movement, normal/3-way shots, charge shot, invincibility
//! and timed pickup effects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::geom::{Rect, clamp_to_screen};
use crate::consts::*;
use crate::platform::InputSnapshot;

/// Weapon fired by the normal shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    Normal,
    ThreeWay,
}

impl WeaponType {
    pub fn label(&self) -> &'static str {
        match self {
            WeaponType::Normal => "NORMAL",
            WeaponType::ThreeWay => "3-WAY",
        }
    }
}

/// Charge shot state
///
/// `level` is a step function of `time`: it never decreases while the key is
/// held and drops back to 0 on release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeState {
    pub charging: bool,
    pub time: u32,
    pub level: u8,
}

impl ChargeState {
    /// Charge level reached after holding for `time` ticks
    pub fn level_for(time: u32) -> u8 {
        if time >= CHARGE_LEVEL_3_TICKS {
            3
        } else if time >= CHARGE_LEVEL_2_TICKS {
            2
        } else if time >= CHARGE_LEVEL_1_TICKS {
            1
        } else {
            0
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub speed: f32,
    pub lives: u8,
    /// 1..=PLAYER_MAX_POWER
    pub power_level: u8,
    pub weapon: WeaponType,
    pub shoot_cooldown: u32,
    pub charge: ChargeState,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub blink_timer: u32,
    /// Ticks left on the POWER pickup (power resets to 1 at zero)
    pub power_effect_timer: u32,
    /// Ticks left on the 3WAY pickup (weapon reverts to NORMAL at zero)
    pub three_way_timer: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_MAX_LIVES)
    }
}

impl Player {
    pub fn new(lives: u8) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            speed: PLAYER_SPEED,
            lives,
            power_level: 1,
            weapon: WeaponType::Normal,
            shoot_cooldown: 0,
            charge: ChargeState::default(),
            invincible: false,
            invincible_timer: 0,
            blink_timer: 0,
            power_effect_timer: 0,
            three_way_timer: 0,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Self::size(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() * 0.5
    }

    /// Muzzle point (nose of the ship)
    fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + PLAYER_WIDTH, self.pos.y + PLAYER_HEIGHT / 2.0)
    }

    /// Blink while invincible
    pub fn is_visible(&self) -> bool {
        !(self.invincible && self.blink_timer % PLAYER_BLINK_PERIOD < PLAYER_BLINK_PERIOD / 2)
    }

    /// Advance one tick. Returns the charge bullet when the charge key is
    /// released at level 1 or higher.
    pub fn update(&mut self, input: &InputSnapshot) -> Option<Bullet> {
        let mut dir = Vec2::ZERO;
        if input.left {
            dir.x -= 1.0;
        }
        if input.right {
            dir.x += 1.0;
        }
        if input.up {
            dir.y -= 1.0;
        }
        if input.down {
            dir.y += 1.0;
        }
        self.pos += dir * self.speed;
        self.pos = clamp_to_screen(self.pos, Self::size(), Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT));

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        if self.invincible {
            self.invincible_timer = self.invincible_timer.saturating_sub(1);
            self.blink_timer += 1;
            if self.invincible_timer == 0 {
                self.invincible = false;
                self.blink_timer = 0;
            }
        }

        self.tick_effects();

        if input.charge {
            self.charge.charging = true;
            self.charge.time += 1;
            self.charge.level = ChargeState::level_for(self.charge.time);
            None
        } else {
            let released = self.charge.charging && self.charge.level > 0;
            let bullet = released.then(|| self.create_charge_bullet());
            self.charge.reset();
            bullet
        }
    }

    fn tick_effects(&mut self) {
        if self.power_effect_timer > 0 {
            self.power_effect_timer -= 1;
            if self.power_effect_timer == 0 {
                self.power_level = 1;
            }
        }
        if self.three_way_timer > 0 {
            self.three_way_timer -= 1;
            if self.three_way_timer == 0 {
                self.weapon = WeaponType::Normal;
            }
        }
    }

    /// Fire-delay multiplier from the current power level
    pub fn fire_rate_factor(&self) -> f32 {
        let steps = self.power_level.saturating_sub(1).min(3) as i32;
        POWER_FIRE_RATE_STEP.powi(steps)
    }

    /// Ticks between normal shots for the current weapon and power
    pub fn shot_delay(&self) -> u32 {
        let base = match self.weapon {
            WeaponType::Normal => NORMAL_SHOT_DELAY,
            WeaponType::ThreeWay => THREE_WAY_SHOT_DELAY,
        };
        ((base as f32 * self.fire_rate_factor()).round() as u32).max(1)
    }

    /// Normal shot, gated by the weapon cooldown
    pub fn shoot(&mut self) -> Vec<Bullet> {
        if self.shoot_cooldown > 0 {
            return Vec::new();
        }
        self.shoot_cooldown = self.shot_delay();

        let origin = self.muzzle() - Vec2::new(0.0, BULLET_HEIGHT / 2.0);
        match self.weapon {
            WeaponType::Normal => vec![Bullet::player_shot(origin, 0)],
            WeaponType::ThreeWay => [0.0, -THREE_WAY_ANGLE_DEG, THREE_WAY_ANGLE_DEG]
                .into_iter()
                .map(|angle| Bullet::player_shot_angled(origin, 0, angle))
                .collect(),
        }
    }

    fn create_charge_bullet(&self) -> Bullet {
        let level = self.charge.level.min(3);
        let half_height = BULLET_HEIGHT * CHARGE_SIZE[level as usize] / 2.0;
        let origin = self.muzzle() - Vec2::new(0.0, half_height);
        Bullet::player_shot(origin, level)
    }

    /// Lose a life unless invincible. Returns true if damage was taken.
    pub fn take_damage(&mut self) -> bool {
        if self.invincible {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invincible = true;
        self.invincible_timer = PLAYER_INVINCIBILITY_TICKS;
        self.blink_timer = 0;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    pub fn add_speed(&mut self) {
        self.speed = (self.speed + 1.0).min(PLAYER_MAX_SPEED);
    }

    pub fn add_power(&mut self) {
        self.power_level = (self.power_level + 1).min(PLAYER_MAX_POWER);
        self.power_effect_timer = POWER_EFFECT_TICKS;
    }

    pub fn enable_three_way(&mut self) {
        self.weapon = WeaponType::ThreeWay;
        self.three_way_timer = THREE_WAY_EFFECT_TICKS;
    }

    /// Flip NORMAL <-> 3-WAY. Only possible while the 3-way effect is live.
    /// Returns true if the weapon changed.
    pub fn toggle_weapon(&mut self) -> bool {
        if self.three_way_timer == 0 {
            return false;
        }
        self.weapon = match self.weapon {
            WeaponType::Normal => WeaponType::ThreeWay,
            WeaponType::ThreeWay => WeaponType::Normal,
        };
        true
    }

    /// Fraction of the way to full charge (0.0 - 1.0)
    pub fn charge_progress(&self) -> f32 {
        (self.charge.time as f32 / CHARGE_LEVEL_3_TICKS as f32).min(1.0)
    }

    pub fn weapon_status(&self) -> String {
        if self.three_way_timer > 0 {
            let secs = self.three_way_timer as f32 / FPS as f32;
            format!("WEAPON: {} ({:.1}s)", self.weapon.label(), secs)
        } else {
            format!("WEAPON: {}", self.weapon.label())
        }
    }

    /// Power readout, only when powered up
    pub fn power_status(&self) -> Option<String> {
        if self.power_level <= 1 {
            return None;
        }
        let rate = (100.0 * self.fire_rate_factor()) as u32;
        let base = format!("POWER: Lv.{} (Fire Rate: {}%)", self.power_level, rate);
        if self.power_effect_timer > 0 {
            let secs = self.power_effect_timer as f32 / FPS as f32;
            Some(format!("{} ({:.1}s)", base, secs))
        } else {
            Some(base)
        }
    }
}
