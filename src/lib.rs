//! Side Shooter - simulation core of a horizontally scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, terrain, waves, collisions)
//! - `renderer`: Draw surface abstraction and vertex tessellation
//! - `audio`: Sound trigger collaborator with silent fallback
//! - `platform`: Per-tick input snapshots
//! - `settings`: Runtime configuration
//! - `session`: Frame driver tying the simulation to its collaborators

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const FPS: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Bullets die once they leave the screen by more than this
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    // --- Player ---
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    pub const PLAYER_MAX_LIVES: u8 = 3;
    pub const PLAYER_MAX_POWER: u8 = 5;
    /// 2 seconds of invincibility after a hit
    pub const PLAYER_INVINCIBILITY_TICKS: u32 = 2 * FPS;
    pub const PLAYER_BLINK_PERIOD: u32 = 10;
    pub const NORMAL_SHOT_DELAY: u32 = 10;
    /// 3-way shares one cooldown for all three bullets, longer than normal
    pub const THREE_WAY_SHOT_DELAY: u32 = 15;
    pub const THREE_WAY_ANGLE_DEG: f32 = 15.0;
    /// Duration of POWER and 3WAY pickups (10 seconds)
    pub const POWER_EFFECT_TICKS: u32 = 10 * FPS;
    pub const THREE_WAY_EFFECT_TICKS: u32 = 10 * FPS;
    /// Fire delay multiplier per power level above 1 (capped at 3 steps)
    pub const POWER_FIRE_RATE_STEP: f32 = 0.8;

    // --- Charge shot ---
    pub const CHARGE_LEVEL_1_TICKS: u32 = 30;
    pub const CHARGE_LEVEL_2_TICKS: u32 = 60;
    pub const CHARGE_LEVEL_3_TICKS: u32 = 90;
    pub const CHARGE_SIZE: [f32; 4] = [1.0, 1.5, 2.5, 4.0];
    pub const CHARGE_DAMAGE: [i32; 4] = [1, 2, 4, 8];
    pub const CHARGE_PIERCE: [i32; 4] = [1, 1, 2, 5];

    // --- Bullets ---
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_DAMAGE: i32 = 1;
    pub const ENEMY_BULLET_SIZE: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;

    // --- Force ---
    pub const FORCE_SIZE: f32 = 30.0;
    pub const FORCE_ATTACH_DISTANCE: f32 = 20.0;
    pub const FORCE_DETACHED_SPEED: f32 = 2.0;
    pub const FORCE_SHOT_DELAY: u32 = 10;
    /// Vertical offset of the top/bottom satellites from the centre force
    pub const FORCE_SATELLITE_OFFSET: f32 = 40.0;

    // --- Enemies ---
    pub const WAVE_ENEMY_AMPLITUDE: f32 = 50.0;
    pub const WAVE_ENEMY_FREQUENCY: f32 = 0.05;
    pub const WAVE_ENEMY_AIMED_CHANCE: f64 = 0.5;
    pub const TANK_SPREAD_DEG: [f32; 3] = [-20.0, 0.0, 20.0];
    pub const TURRET_SIZE: f32 = 30.0;
    pub const TURRET_INTERVAL: [u32; 3] = [150, 120, 90];
    pub const BOSS_HOLD_X: f32 = SCREEN_WIDTH - 240.0;
    pub const BOSS_AMPLITUDE: f32 = 150.0;
    pub const BOSS_PHASE_SPEED: f32 = 0.02;
    pub const ENEMY_EXIT_MARGIN: f32 = 50.0;

    // --- Powerups ---
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_SPEED: f32 = 1.5;
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;

    // --- Explosions ---
    pub const EXPLOSION_TICKS: u32 = 30;
    pub const EXPLOSION_PARTICLES: usize = 20;

    // --- Terrain ---
    pub const TERRAIN_SCROLL_SPEED: f32 = 2.0;
    pub const TERRAIN_SEGMENT_WIDTH: f32 = 100.0;
    pub const TERRAIN_SPAWN_INTERVAL: u32 = 50;
    pub const TERRAIN_DAMAGE_COOLDOWN: u32 = FPS;
    pub const PATTERN_DURATION: [u32; 3] = [10 * FPS, 8 * FPS, 6 * FPS];
    /// Narrow-middle keeps at least this much open corridor
    pub const MIN_CORRIDOR: f32 = 150.0;
    /// A strip must be deeper than this to host a turret
    pub const TURRET_MIN_DEPTH: f32 = 80.0;
    pub const TURRET_CHANCE: [f64; 3] = [0.15, 0.25, 0.35];

    // --- Waves ---
    pub const WAVE_1_END: u64 = 60 * FPS as u64;
    pub const WAVE_2_END: u64 = 120 * FPS as u64;
    pub const WAVE_3_END: u64 = 180 * FPS as u64;
    pub const WAVE_ENEMY_COUNT: [u32; 3] = [10, 8, 10];
    pub const ENEMY_SPAWN_INTERVAL: u32 = 60;
    pub const ENEMY_SPAWN_JITTER: i32 = 20;
    pub const WAVE_3_CHARGE_CHANCE: f64 = 0.6;
    pub const WAVE_4_MAX_BOSSES: u32 = 2;
    pub const WAVE_4_BOSS_COOLDOWN: u64 = 10 * FPS as u64;
    pub const WAVE_4_BOSS_CHANCE_START: f32 = 0.001;
    pub const WAVE_4_BOSS_CHANCE_MAX: f32 = 0.01;
    pub const WAVE_4_BOSS_RAMP_TICKS: u64 = 120 * FPS as u64;

    // --- Background ---
    pub const STAR_COUNT: usize = 100;
}

/// Unit vector for an angle in degrees measured from +x, with +y pointing down
#[inline]
pub fn direction_deg(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Direction from `from` to `to` scaled to `speed`.
///
/// When `from == to` there is no direction to aim along. Rather than the
/// zero vector a unit distance would give, the shot takes a fixed default
/// direction: straight left, toward the player side of the screen.
#[inline]
pub fn aim_velocity(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist == 0.0 {
        return Vec2::NEG_X * speed;
    }
    delta / dist * speed
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Side Shooter core loaded");
    }
}
