//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::resolve_collisions;
use super::state::{GameEvent, GameState};
use crate::platform::InputSnapshot;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &InputSnapshot) {
    // Game over freezes everything except restart
    if state.game_over {
        if input.restart {
            let mut fresh = state.restarted();
            log::info!("restart with seed {}", fresh.seed);
            fresh.emit(GameEvent::Restarted);
            *state = fresh;
        }
        return;
    }

    state.time_ticks += 1;

    handle_toggles(state, input);
    update_player(state, input);

    for bullet in state
        .player_bullets
        .iter_mut()
        .chain(state.enemy_bullets.iter_mut())
    {
        bullet.update();
    }

    spawn_enemies(state);
    update_enemies(state);

    let turrets = state.terrain.update(&mut state.rng);
    state.enemies.extend(turrets);
    state.terrain_damage_cooldown = state.terrain_damage_cooldown.saturating_sub(1);

    for powerup in &mut state.powerups {
        powerup.update();
    }
    for explosion in &mut state.explosions {
        explosion.update();
    }

    state.stars.update(&mut state.rng);

    resolve_collisions(state);

    if state.player.is_dead() {
        state.game_over = true;
        state.emit(GameEvent::GameOver);
        log::info!(
            "game over at tick {} with score {}",
            state.time_ticks,
            state.score
        );
    }

    prune(state);
}

fn handle_toggles(state: &mut GameState, input: &InputSnapshot) {
    if input.force_toggle && state.forces.toggle_center() {
        state.emit(GameEvent::ForceToggled);
    }
    if input.weapon_toggle && state.player.toggle_weapon() {
        state.emit(GameEvent::WeaponToggled);
    }
}

/// Move the ship, then fire: charge release first, then the held normal
/// shot. Active forces fire alongside either.
fn update_player(state: &mut GameState, input: &InputSnapshot) {
    let was_charging = state.player.charge.charging;

    if let Some(charge_shot) = state.player.update(input) {
        state.emit(GameEvent::ChargeReleased {
            level: charge_shot.charge_level,
        });
        state.player_bullets.push(charge_shot);
        let force_shots = state.forces.shoot();
        state.player_bullets.extend(force_shots);
    }
    if state.player.charge.charging && !was_charging {
        state.emit(GameEvent::ChargeStarted);
    }

    if input.fire {
        let shots = state.player.shoot();
        if !shots.is_empty() {
            state.emit(GameEvent::PlayerShot);
            state.player_bullets.extend(shots);
        }
        let force_shots = state.forces.shoot();
        state.player_bullets.extend(force_shots);
    }

    state.forces.update(state.player.pos);
}

fn spawn_enemies(state: &mut GameState) {
    if state.waves.update(&mut state.rng) {
        let wave = state.waves.wave;
        state.terrain.set_wave(wave);
        if wave == 4 {
            let live = state
                .enemies
                .iter()
                .filter(|e| e.active && e.is_boss())
                .count();
            state.waves.carry_over_bosses(live as u32);
        }
        state.emit(GameEvent::WaveChanged { wave });
    }

    let spawn_y = state.terrain.safe_spawn_y(&mut state.rng);
    let spawned = [
        state.waves.spawn_enemy(&mut state.rng, spawn_y),
        state.waves.spawn_boss(&mut state.rng),
    ];
    for enemy in spawned.into_iter().flatten() {
        if enemy.is_boss() {
            state.emit(GameEvent::BossSpawned { kind: enemy.kind });
        }
        state.enemies.push(enemy);
    }
}

fn update_enemies(state: &mut GameState) {
    let target = state.player.center();
    let mut fired = false;
    for enemy in &mut state.enemies {
        let shots = enemy.update(target, &mut state.rng);
        fired |= !shots.is_empty();
        state.enemy_bullets.extend(shots);
    }
    if fired {
        state.emit(GameEvent::EnemyShot);
    }
}

/// Drop everything flagged inactive this tick
fn prune(state: &mut GameState) {
    state.player_bullets.retain(|b| b.active);
    state.enemy_bullets.retain(|b| b.active);
    state.enemies.retain(|e| e.active);
    state.powerups.retain(|p| p.active);
    state.explosions.retain(|e| e.active);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::bullet::Bullet;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use glam::Vec2;

    fn held(f: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
        let mut input = InputSnapshot::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, PLAYER_MAX_LIVES);
        let mut b = GameState::new(99999, PLAYER_MAX_LIVES);

        for i in 0..3000u32 {
            let input = held(|k| {
                k.fire = i % 3 != 0;
                k.up = (i / 90) % 2 == 0;
                k.down = (i / 90) % 2 == 1;
                k.charge = (i / 200) % 4 == 3;
            });
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.kind, eb.kind);
            assert_eq!(ea.pos, eb.pos);
        }
        assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn test_straight_enemy_dies_after_hp_hits() {
        let mut state = GameState::new(5, PLAYER_MAX_LIVES);
        let mut enemy = Enemy::new(EnemyKind::Straight, Vec2::new(400.0, 200.0));
        enemy.hp = 3;
        state.enemies.push(enemy);

        for shot in 0..3 {
            let target = state.enemies[0].pos;
            let pos = target + Vec2::new(-5.0, 5.0);
            state.player_bullets.push(Bullet::player_shot(pos, 0));
            tick(&mut state, &InputSnapshot::default());
            if shot < 2 {
                assert!(state.enemies[0].active);
                assert_eq!(state.score, 0);
            }
        }

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 100);
        for _ in 0..10 {
            tick(&mut state, &InputSnapshot::default());
        }
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut state = GameState::new(21, 2);
        state.player.lives = 1;
        let at = state.player.pos;
        state.enemy_bullets.push(Bullet::enemy_shot(at, Vec2::ZERO));

        tick(&mut state, &InputSnapshot::default());
        assert!(state.game_over);
        assert!(state.events.contains(&GameEvent::GameOver));

        let frozen = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &held(|k| k.fire = true));
        }
        assert_eq!(state.time_ticks, frozen);

        tick(&mut state, &held(|k| k.restart = true));
        assert!(!state.game_over);
        assert_eq!(state.seed, 22);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(3, PLAYER_MAX_LIVES);
        tick(&mut state, &held(|k| k.restart = true));
        assert_eq!(state.seed, 3);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_charge_release_fires_once() {
        let mut state = GameState::new(8, PLAYER_MAX_LIVES);
        for _ in 0..CHARGE_LEVEL_2_TICKS {
            tick(&mut state, &held(|k| k.charge = true));
        }
        let started = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::ChargeStarted)
            .count();
        assert_eq!(started, 1);

        tick(&mut state, &InputSnapshot::default());
        let charged: Vec<_> = state
            .player_bullets
            .iter()
            .filter(|b| b.charge_level > 0)
            .collect();
        assert_eq!(charged.len(), 1);
        assert_eq!(charged[0].charge_level, 2);
        assert!(
            state
                .events
                .contains(&GameEvent::ChargeReleased { level: 2 })
        );

        tick(&mut state, &InputSnapshot::default());
        let charged = state
            .player_bullets
            .iter()
            .filter(|b| b.charge_level > 0)
            .count();
        assert_eq!(charged, 1);
    }

    #[test]
    fn test_forces_fire_with_player() {
        let mut state = GameState::new(8, PLAYER_MAX_LIVES);
        state.forces.acquire(state.player.pos);
        tick(&mut state, &held(|k| k.fire = true));
        assert_eq!(state.player_bullets.len(), 2);

        tick(&mut state, &held(|k| k.force_toggle = true));
        assert!(state.events.contains(&GameEvent::ForceToggled));
    }

    #[test]
    fn test_wave_change_reaches_terrain() {
        let mut state = GameState::new(4, PLAYER_MAX_LIVES);
        state.waves.game_time = WAVE_1_END - 1;
        tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.waves.wave, 2);
        assert_eq!(state.terrain.wave(), 2);
        assert!(state.events.contains(&GameEvent::WaveChanged { wave: 2 }));
    }

    #[test]
    fn test_wave_four_counts_leftover_boss() {
        let mut state = GameState::new(4, PLAYER_MAX_LIVES);
        state.enemies.push(Enemy::boss(EnemyKind::Boss3));
        state.waves.game_time = WAVE_3_END - 1;
        tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.waves.wave, 4);

        let live = state.enemies.iter().filter(|e| e.is_boss()).count() as u32;
        assert!(state.waves.active_bosses >= 1);
        assert_eq!(state.waves.active_bosses, live);
    }
}
