//! Game state and core simulation types
//!
//! Everything one run needs lives in [`GameState`], including the seeded
//! RNG, so two states built from the same seed and fed the same inputs stay
//! identical.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::effects::{Explosion, Starfield};
use super::enemy::{Enemy, EnemyKind};
use super::force::ForceSet;
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::terrain::TerrainManager;
use super::wave::WaveManager;

/// Side effects of a tick, drained by the frame driver for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerShot,
    ChargeStarted,
    ChargeReleased { level: u8 },
    ForceToggled,
    ForceAbsorbed,
    ForceAcquired { active: usize },
    WeaponToggled,
    EnemyShot,
    EnemyDestroyed { kind: EnemyKind, score: u64 },
    BossSpawned { kind: EnemyKind },
    BossDefeated { kind: EnemyKind },
    PowerUpCollected { kind: PowerUpKind },
    PlayerHit,
    WaveChanged { wave: u8 },
    GameOver,
    Restarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Lives granted on (re)start
    pub starting_lives: u8,
    /// Simulation tick counter (frozen once the game is over)
    pub time_ticks: u64,
    /// Never decreases during a run
    pub score: u64,
    pub game_over: bool,
    pub player: Player,
    pub forces: ForceSet,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    /// Visual only
    pub explosions: Vec<Explosion>,
    pub stars: Starfield,
    pub terrain: TerrainManager,
    pub waves: WaveManager,
    pub terrain_damage_cooldown: u32,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, starting_lives: u8) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = Starfield::new(&mut rng);
        Self {
            seed,
            rng,
            starting_lives,
            time_ticks: 0,
            score: 0,
            game_over: false,
            player: Player::new(starting_lives),
            forces: ForceSet::default(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            stars,
            terrain: TerrainManager::new(),
            waves: WaveManager::new(),
            terrain_damage_cooldown: 0,
            events: Vec::new(),
        }
    }

    /// Fresh run with the next seed, keeping the configured lives
    pub fn restarted(&self) -> Self {
        Self::new(self.seed.wrapping_add(1), self.starting_lives)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only HUD values
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.player.lives,
            wave_label: self.waves.wave_label(),
            charging: self.player.charge.charging,
            charge_level: self.player.charge.level,
            charge_progress: self.player.charge_progress(),
            active_forces: self.forces.active_count(),
            weapon_status: self.player.weapon_status(),
            power_status: self.player.power_status(),
            game_over: self.game_over,
        }
    }
}

/// Values the display layer shows but never writes back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub wave_label: String,
    pub charging: bool,
    pub charge_level: u8,
    pub charge_progress: f32,
    pub active_forces: usize,
    pub weapon_status: String,
    pub power_status: Option<String>,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42, PLAYER_MAX_LIVES);
        assert_eq!(state.player.lives, PLAYER_MAX_LIVES);
        assert_eq!(state.stars.stars.len(), STAR_COUNT);
        assert_eq!(state.forces.active_count(), 0);
        assert!(!state.game_over);
    }

    #[test]
    fn test_restart_uses_next_seed() {
        let mut state = GameState::new(7, 5);
        state.score = 999;
        state.player.lives = 0;
        let fresh = state.restarted();
        assert_eq!(fresh.seed, 8);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.player.lives, 5);
    }

    #[test]
    fn test_hud_readout() {
        let mut state = GameState::new(1, 3);
        state.score = 1500;
        let hud = state.hud();
        assert_eq!(hud.score, 1500);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.wave_label, "WAVE 1");
        assert_eq!(hud.weapon_status, "WEAPON: NORMAL");
        assert!(hud.power_status.is_none());

        state.emit(GameEvent::PlayerShot);
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerShot]);
        assert!(state.events.is_empty());
    }
}
