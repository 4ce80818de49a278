//! Wave scheduling.
//!
//! Waves 1-3 each release a fixed number of one enemy mix, then a single
//! boss that holds the wave until it dies. Killing it fast-forwards the
//! clock to the next wave. Wave 4 runs forever: a weighted enemy mix plus
//! bosses that appear with a probability ramping up over time.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use crate::consts::*;

const WAVE_4_MIX: [(EnemyKind, f32); 4] = [
    (EnemyKind::Straight, 0.3),
    (EnemyKind::Wave, 0.2),
    (EnemyKind::Charge, 0.3),
    (EnemyKind::Tank, 0.2),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveManager {
    /// Ticks since the run started (may jump forward on a boss kill)
    pub game_time: u64,
    pub wave: u8,
    pub spawned_this_wave: u32,
    pub boss_spawned: bool,
    pub boss_active: bool,
    /// Concurrent bosses alive in wave 4
    pub active_bosses: u32,
    spawn_timer: u32,
    next_spawn_interval: u32,
    wave4_start: u64,
    last_boss_spawn: Option<u64>,
}

impl Default for WaveManager {
    fn default() -> Self {
        Self {
            game_time: 0,
            wave: 1,
            spawned_this_wave: 0,
            boss_spawned: false,
            boss_active: false,
            active_bosses: 0,
            spawn_timer: 0,
            next_spawn_interval: ENEMY_SPAWN_INTERVAL,
            wave4_start: WAVE_3_END,
            last_boss_spawn: None,
        }
    }
}

/// Wave index for a point on the clock
pub fn wave_for_time(t: u64) -> u8 {
    match t {
        t if t < WAVE_1_END => 1,
        t if t < WAVE_2_END => 2,
        t if t < WAVE_3_END => 3,
        _ => 4,
    }
}

fn wave_end(wave: u8) -> u64 {
    match wave {
        1 => WAVE_1_END,
        2 => WAVE_2_END,
        _ => WAVE_3_END,
    }
}

fn wave_boss(wave: u8) -> EnemyKind {
    match wave {
        1 => EnemyKind::Boss1,
        2 => EnemyKind::Boss2,
        _ => EnemyKind::Boss3,
    }
}

/// Per-tick wave-4 boss chance, `t` ticks after wave 4 began
pub fn boss_spawn_probability(t: u64) -> f32 {
    let f = ramp_fraction(t);
    WAVE_4_BOSS_CHANCE_START + f * (WAVE_4_BOSS_CHANCE_MAX - WAVE_4_BOSS_CHANCE_START)
}

/// BOSS_1 / BOSS_2 / BOSS_3 selection weights `t` ticks into wave 4
pub fn boss_weights(t: u64) -> [f32; 3] {
    let f = ramp_fraction(t);
    [(0.5 - 0.4 * f).max(0.1), 0.3 + 0.1 * f, 0.2 + 0.6 * f]
}

fn ramp_fraction(t: u64) -> f32 {
    (t as f32 / WAVE_4_BOSS_RAMP_TICKS as f32).min(1.0)
}

impl WaveManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Returns true when the wave changed this tick.
    pub fn update(&mut self, rng: &mut impl Rng) -> bool {
        self.game_time += 1;
        self.spawn_timer += 1;

        let wave = wave_for_time(self.game_time);
        if wave == self.wave {
            return false;
        }
        self.wave = wave;
        self.spawned_this_wave = 0;
        self.boss_spawned = false;
        self.boss_active = false;
        self.spawn_timer = 0;
        self.next_spawn_interval = roll_interval(rng);
        if wave == 4 {
            self.wave4_start = self.game_time;
        }
        log::info!("wave {} begins at tick {}", wave, self.game_time);
        true
    }

    fn spawn_due(&mut self, rng: &mut impl Rng) -> bool {
        if self.spawn_timer < self.next_spawn_interval {
            return false;
        }
        self.spawn_timer = 0;
        self.next_spawn_interval = roll_interval(rng);
        true
    }

    /// Regular spawn (or the wave boss in waves 1-3).
    ///
    /// Regular enemies enter just past the right edge at `spawn_y`. The
    /// wave boss appears on the first call after the wave's quota is used
    /// up, without waiting for the spawn timer.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng, spawn_y: f32) -> Option<Enemy> {
        let pos = Vec2::new(SCREEN_WIDTH + OFFSCREEN_MARGIN, spawn_y);

        if self.wave >= 4 {
            if !self.spawn_due(rng) {
                return None;
            }
            let kind = match WeightedIndex::new(WAVE_4_MIX.iter().map(|(_, w)| *w)) {
                Ok(dist) => WAVE_4_MIX[dist.sample(rng)].0,
                Err(_) => EnemyKind::Straight,
            };
            return Some(Enemy::new(kind, pos));
        }

        let quota = WAVE_ENEMY_COUNT[self.wave as usize - 1];
        if self.spawned_this_wave >= quota {
            if self.boss_spawned {
                return None;
            }
            self.boss_spawned = true;
            self.boss_active = true;
            let kind = wave_boss(self.wave);
            log::info!("wave {} boss {:?} incoming", self.wave, kind);
            return Some(Enemy::boss(kind));
        }

        if !self.spawn_due(rng) {
            return None;
        }
        let kind = match self.wave {
            1 => EnemyKind::Straight,
            2 => EnemyKind::Wave,
            _ => {
                if rng.random_bool(WAVE_3_CHARGE_CHANCE) {
                    EnemyKind::Charge
                } else {
                    EnemyKind::Straight
                }
            }
        };
        self.spawned_this_wave += 1;
        Some(Enemy::new(kind, pos))
    }

    /// Wave-4 boss roll, gated by the concurrent cap and the spawn cooldown
    pub fn spawn_boss(&mut self, rng: &mut impl Rng) -> Option<Enemy> {
        if self.wave < 4 || self.active_bosses >= WAVE_4_MAX_BOSSES {
            return None;
        }
        let cooling = self
            .last_boss_spawn
            .is_some_and(|last| self.game_time - last < WAVE_4_BOSS_COOLDOWN);
        if cooling {
            return None;
        }

        let t = self.game_time - self.wave4_start;
        if rng.random::<f32>() >= boss_spawn_probability(t) {
            return None;
        }
        let kind = match WeightedIndex::new(boss_weights(t)) {
            Ok(dist) => EnemyKind::BOSSES[dist.sample(rng)],
            Err(_) => EnemyKind::Boss1,
        };
        self.active_bosses += 1;
        self.last_boss_spawn = Some(self.game_time);
        log::info!(
            "boss {:?} spawned at tick {} ({} active)",
            kind,
            self.game_time,
            self.active_bosses
        );
        Some(Enemy::boss(kind))
    }

    /// Bosses already alive when wave 4 starts count toward its cap
    pub fn carry_over_bosses(&mut self, live: u32) {
        self.active_bosses = live;
        if live > 0 {
            log::info!("{} boss(es) carried into wave 4", live);
        }
    }

    /// Bookkeeping for a boss kill.
    ///
    /// In waves 1-3 only the boss holding the current wave counts: its kill
    /// jumps the clock to the end of the wave so the next update starts the
    /// following one. A leftover boss from an earlier wave changes nothing.
    pub fn on_boss_defeated(&mut self, kind: EnemyKind) {
        if self.wave >= 4 {
            self.active_bosses = self.active_bosses.saturating_sub(1);
            log::info!("boss {:?} defeated, {} still active", kind, self.active_bosses);
            return;
        }
        if !self.boss_active || kind != wave_boss(self.wave) {
            return;
        }
        self.boss_active = false;
        self.game_time = self.game_time.max(wave_end(self.wave) - 1);
        log::info!("wave {} boss defeated", self.wave);
    }

    pub fn wave_label(&self) -> String {
        format!("WAVE {}", self.wave)
    }
}

fn roll_interval(rng: &mut impl Rng) -> u32 {
    let jitter = rng.random_range(-ENEMY_SPAWN_JITTER..=ENEMY_SPAWN_JITTER);
    (ENEMY_SPAWN_INTERVAL as i32 + jitter).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn run_until_spawn(wm: &mut WaveManager, rng: &mut Pcg32) -> Enemy {
        for _ in 0..1000 {
            wm.update(rng);
            if let Some(e) = wm.spawn_enemy(rng, 300.0) {
                return e;
            }
        }
        panic!("nothing spawned");
    }

    #[test]
    fn test_wave_for_time() {
        assert_eq!(wave_for_time(0), 1);
        assert_eq!(wave_for_time(WAVE_1_END - 1), 1);
        assert_eq!(wave_for_time(WAVE_1_END), 2);
        assert_eq!(wave_for_time(WAVE_2_END), 3);
        assert_eq!(wave_for_time(WAVE_3_END + 100_000), 4);
    }

    #[test]
    fn test_wave_one_quota_then_boss() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wm = WaveManager::new();
        for _ in 0..WAVE_ENEMY_COUNT[0] {
            let e = run_until_spawn(&mut wm, &mut rng);
            assert_eq!(e.kind, EnemyKind::Straight);
        }
        let boss = wm.spawn_enemy(&mut rng, 300.0).unwrap();
        assert_eq!(boss.kind, EnemyKind::Boss1);
        assert!(wm.boss_active);

        // Held until the boss dies
        for _ in 0..500 {
            wm.update(&mut rng);
            assert!(wm.spawn_enemy(&mut rng, 300.0).is_none());
        }
        assert_eq!(wm.wave, 1);

        wm.on_boss_defeated(EnemyKind::Boss1);
        assert!(wm.update(&mut rng));
        assert_eq!(wm.wave, 2);
        assert_eq!(wm.spawned_this_wave, 0);
        assert!(!wm.boss_spawned);
        let e = run_until_spawn(&mut wm, &mut rng);
        assert_eq!(e.kind, EnemyKind::Wave);
    }

    #[test]
    fn test_wave_three_mix() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut wm = WaveManager::new();
        wm.game_time = WAVE_2_END;
        wm.update(&mut rng);
        assert_eq!(wm.wave, 3);
        for _ in 0..WAVE_ENEMY_COUNT[2] {
            let e = run_until_spawn(&mut wm, &mut rng);
            assert!(matches!(e.kind, EnemyKind::Charge | EnemyKind::Straight));
        }
        assert_eq!(wm.spawn_enemy(&mut rng, 300.0).unwrap().kind, EnemyKind::Boss3);
    }

    #[test]
    fn test_stray_boss_kill_after_timeout_is_ignored() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut wm = WaveManager::new();
        wm.game_time = WAVE_1_END;
        wm.update(&mut rng);
        let before = wm.game_time;
        wm.on_boss_defeated(EnemyKind::Boss1);
        assert_eq!(wm.game_time, before);
    }

    #[test]
    fn test_wave_four_boss_gating() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut wm = WaveManager::new();
        wm.game_time = WAVE_3_END - 1;
        assert!(wm.update(&mut rng));
        assert_eq!(wm.wave, 4);

        let mut spawned = 0;
        for _ in 0..200_000 {
            wm.update(&mut rng);
            if wm.spawn_boss(&mut rng).is_some() {
                spawned += 1;
            }
            assert!(wm.active_bosses <= WAVE_4_MAX_BOSSES);
        }
        assert_eq!(spawned, WAVE_4_MAX_BOSSES);

        wm.on_boss_defeated(EnemyKind::Boss2);
        assert_eq!(wm.active_bosses, WAVE_4_MAX_BOSSES - 1);
    }

    #[test]
    fn test_leftover_boss_kill_keeps_wave() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut wm = WaveManager::new();
        wm.game_time = WAVE_1_END - 1;
        assert!(wm.update(&mut rng));
        assert_eq!(wm.wave, 2);
        for _ in 0..WAVE_ENEMY_COUNT[1] {
            run_until_spawn(&mut wm, &mut rng);
        }
        let boss = wm.spawn_enemy(&mut rng, 300.0).unwrap();
        assert_eq!(boss.kind, EnemyKind::Boss2);

        // A wave-1 boss that outlived its wave dies now
        let before = wm.game_time;
        wm.on_boss_defeated(EnemyKind::Boss1);
        assert!(wm.boss_active);
        assert_eq!(wm.game_time, before);
        assert!(!wm.update(&mut rng));
        assert_eq!(wm.wave, 2);
        assert!(wm.spawn_enemy(&mut rng, 300.0).is_none());

        wm.on_boss_defeated(EnemyKind::Boss2);
        assert!(!wm.boss_active);
        assert!(wm.update(&mut rng));
        assert_eq!(wm.wave, 3);
    }

    #[test]
    fn test_carried_over_boss_counts_toward_cap() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut wm = WaveManager::new();
        wm.game_time = WAVE_3_END - 1;
        assert!(wm.update(&mut rng));
        wm.carry_over_bosses(1);

        let mut spawned = 0;
        for _ in 0..200_000 {
            wm.update(&mut rng);
            if wm.spawn_boss(&mut rng).is_some() {
                spawned += 1;
            }
            assert!(wm.active_bosses <= WAVE_4_MAX_BOSSES);
        }
        assert_eq!(spawned, WAVE_4_MAX_BOSSES - 1);

        // The leftover dies and frees exactly its own slot
        wm.on_boss_defeated(EnemyKind::Boss3);
        assert_eq!(wm.active_bosses, WAVE_4_MAX_BOSSES - 1);
    }

    #[test]
    fn test_wave_four_boss_cooldown() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut wm = WaveManager::new();
        wm.game_time = WAVE_3_END;
        wm.update(&mut rng);
        let mut times = Vec::new();
        while times.len() < 2 {
            wm.update(&mut rng);
            if wm.spawn_boss(&mut rng).is_some() {
                times.push(wm.game_time);
            }
        }
        assert!(times[1] - times[0] >= WAVE_4_BOSS_COOLDOWN);
    }

    #[test]
    fn test_wave_four_never_runs_dry() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut wm = WaveManager::new();
        wm.game_time = WAVE_3_END;
        wm.update(&mut rng);
        for _ in 0..50 {
            let e = run_until_spawn(&mut wm, &mut rng);
            assert!(!e.is_boss());
        }
    }

    #[test]
    fn test_boss_weights_shift_to_boss3() {
        let early = boss_weights(0);
        let late = boss_weights(WAVE_4_BOSS_RAMP_TICKS * 2);
        assert!(early[0] > early[2]);
        assert!(late[2] > late[0]);
        assert!((late[0] - 0.1).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_boss_probability_ramps_linearly(t in 0u64..(WAVE_4_BOSS_RAMP_TICKS * 3)) {
            let p = boss_spawn_probability(t);
            if t <= WAVE_4_BOSS_RAMP_TICKS {
                let expected = WAVE_4_BOSS_CHANCE_START
                    + (t as f32 / WAVE_4_BOSS_RAMP_TICKS as f32)
                        * (WAVE_4_BOSS_CHANCE_MAX - WAVE_4_BOSS_CHANCE_START);
                prop_assert!((p - expected).abs() < 1e-6);
            } else {
                prop_assert!((p - WAVE_4_BOSS_CHANCE_MAX).abs() < 1e-6);
            }
        }
    }
}
