//! Collision resolution
//!
//! Runs once per tick after everything has moved. Phases run in a fixed
//! order: player shots vs enemies, enemy shots vs forces then the player,
//! enemy bodies vs the player, pickups, terrain. Lists are walked by index
//! and only flagged inactive here; pruning happens at the end of the tick.

use glam::Vec2;

use super::effects::Explosion;
use super::enemy::EnemyKind;
use super::powerup::{PowerUpKind, roll_drop};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Explosion size when the player is hit by a bullet or an enemy
const PLAYER_HIT_BLAST: f32 = 30.0;
/// Smaller blast for scraping terrain
const TERRAIN_HIT_BLAST: f32 = 20.0;

/// An enemy destroyed by player fire this tick
struct Kill {
    kind: EnemyKind,
    score: u64,
    pos: Vec2,
    size: f32,
}

pub fn resolve_collisions(state: &mut GameState) {
    player_bullets_vs_enemies(state);
    enemy_bullets_vs_player(state);
    enemies_vs_player(state);
    collect_powerups(state);
    terrain_vs_player(state);
}

fn player_bullets_vs_enemies(state: &mut GameState) {
    let mut kills = Vec::new();

    for bullet in state.player_bullets.iter_mut() {
        for enemy in state.enemies.iter_mut() {
            if !bullet.active {
                break;
            }
            if !enemy.active || !bullet.rect().intersects(&enemy.rect()) {
                continue;
            }
            bullet.hit();
            if enemy.take_damage(bullet.damage) {
                kills.push(Kill {
                    kind: enemy.kind,
                    score: enemy.score,
                    pos: enemy.pos,
                    size: enemy.size,
                });
            }
        }
    }

    for kill in kills {
        state.score += kill.score;
        let center = kill.pos + Vec2::splat(kill.size / 2.0);
        let blast = Explosion::new(center, kill.size, &mut state.rng);
        state.explosions.push(blast);
        state.emit(GameEvent::EnemyDestroyed {
            kind: kill.kind,
            score: kill.score,
        });

        if kill.kind.is_boss() {
            state.waves.on_boss_defeated(kill.kind);
            state.emit(GameEvent::BossDefeated { kind: kill.kind });
        }

        let drop_at = Vec2::new(kill.pos.x, kill.pos.y + kill.size / 2.0);
        if let Some(powerup) = roll_drop(drop_at, &mut state.rng) {
            state.powerups.push(powerup);
        }
    }
}

fn enemy_bullets_vs_player(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut absorbed = 0;
    let mut hit = false;

    for bullet in state.enemy_bullets.iter_mut().filter(|b| b.active) {
        let rect = bullet.rect();
        if state.forces.absorber(&rect).is_some() {
            bullet.active = false;
            absorbed += 1;
            continue;
        }
        if rect.intersects(&player_rect) {
            bullet.active = false;
            hit |= state.player.take_damage();
        }
    }

    for _ in 0..absorbed {
        state.emit(GameEvent::ForceAbsorbed);
    }
    if hit {
        player_damaged(state, PLAYER_HIT_BLAST);
    }
}

fn enemies_vs_player(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut rammed = Vec::new();
    let mut hit = false;

    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        if !enemy.rect().intersects(&player_rect) {
            continue;
        }
        hit |= state.player.take_damage();
        if !enemy.kind.survives_contact() {
            enemy.active = false;
            rammed.push((enemy.kind, enemy.center(), enemy.size));
        }
    }

    if hit {
        player_damaged(state, PLAYER_HIT_BLAST);
    }
    // Rammed enemies give no score
    for (kind, center, size) in rammed {
        let blast = Explosion::new(center, size, &mut state.rng);
        state.explosions.push(blast);
        state.emit(GameEvent::EnemyDestroyed { kind, score: 0 });
    }
}

fn collect_powerups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut collected = Vec::new();

    for powerup in state.powerups.iter_mut().filter(|p| p.active) {
        if powerup.rect().intersects(&player_rect) {
            powerup.active = false;
            collected.push(powerup.kind);
        }
    }

    for kind in collected {
        state.emit(GameEvent::PowerUpCollected { kind });
        match kind {
            PowerUpKind::Force => {
                let added = state.forces.acquire(state.player.pos);
                if added > 0 {
                    let active = state.forces.active_count();
                    log::info!("force acquired, {} active", active);
                    state.emit(GameEvent::ForceAcquired { active });
                }
            }
            PowerUpKind::Speed => state.player.add_speed(),
            PowerUpKind::Power => state.player.add_power(),
            PowerUpKind::ThreeWay => state.player.enable_three_way(),
        }
    }
}

fn terrain_vs_player(state: &mut GameState) {
    if state.terrain_damage_cooldown > 0 {
        return;
    }
    if state.terrain.check_collision(&state.player.rect()) && state.player.take_damage() {
        state.terrain_damage_cooldown = TERRAIN_DAMAGE_COOLDOWN;
        player_damaged(state, TERRAIN_HIT_BLAST);
    }
}

fn player_damaged(state: &mut GameState, blast_size: f32) {
    let center = state.player.center();
    let blast = Explosion::new(center, blast_size, &mut state.rng);
    state.explosions.push(blast);
    state.emit(GameEvent::PlayerHit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::Bullet;
    use crate::sim::enemy::Enemy;
    use crate::sim::powerup::PowerUp;

    fn quiet_state() -> GameState {
        GameState::new(11, PLAYER_MAX_LIVES)
    }

    #[test]
    fn test_player_bullet_kills_enemy_once() {
        let mut state = quiet_state();
        let enemy = Enemy::new(EnemyKind::Straight, Vec2::new(400.0, 300.0));
        state.enemies.push(enemy);
        state
            .player_bullets
            .push(Bullet::player_shot(Vec2::new(405.0, 305.0), 0));
        state
            .player_bullets
            .push(Bullet::player_shot(Vec2::new(405.0, 310.0), 0));

        resolve_collisions(&mut state);
        assert!(!state.enemies[0].active);
        assert_eq!(state.score, 100);
        // Second bullet found the enemy already dead
        assert!(state.player_bullets[1].active);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_charge_bullet_pierces() {
        let mut state = quiet_state();
        state
            .enemies
            .push(Enemy::new(EnemyKind::Straight, Vec2::new(400.0, 300.0)));
        state
            .enemies
            .push(Enemy::new(EnemyKind::Straight, Vec2::new(410.0, 300.0)));
        state
            .player_bullets
            .push(Bullet::player_shot(Vec2::new(405.0, 305.0), 3));

        resolve_collisions(&mut state);
        assert!(state.enemies.iter().all(|e| !e.active));
        assert_eq!(state.score, 200);
        assert!(state.player_bullets[0].active);
        assert_eq!(state.player_bullets[0].pierce_count, CHARGE_PIERCE[3] - 2);
    }

    #[test]
    fn test_boss_kill_notifies_waves() {
        let mut state = quiet_state();
        let mut boss = Enemy::boss(EnemyKind::Boss1);
        boss.pos = Vec2::new(500.0, 200.0);
        boss.hp = 1;
        state.enemies.push(boss);
        state.waves.boss_active = true;
        state
            .player_bullets
            .push(Bullet::player_shot(Vec2::new(520.0, 250.0), 0));

        resolve_collisions(&mut state);
        assert!(!state.waves.boss_active);
        assert_eq!(state.waves.game_time, WAVE_1_END - 1);
        let defeated = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossDefeated { .. }))
            .count();
        assert_eq!(defeated, 1);
    }

    #[test]
    fn test_leftover_boss_kill_does_not_release_wave() {
        let mut state = quiet_state();
        state.waves.game_time = WAVE_1_END;
        state.waves.wave = 2;
        state.waves.boss_spawned = true;
        state.waves.boss_active = true;
        let mut stale = Enemy::boss(EnemyKind::Boss1);
        stale.pos = Vec2::new(500.0, 200.0);
        stale.hp = 1;
        state.enemies.push(stale);
        state
            .player_bullets
            .push(Bullet::player_shot(Vec2::new(520.0, 250.0), 0));

        resolve_collisions(&mut state);
        assert!(!state.enemies[0].active);
        assert!(state.waves.boss_active);
        assert_eq!(state.waves.game_time, WAVE_1_END);
        assert!(
            state
                .events
                .contains(&GameEvent::BossDefeated { kind: EnemyKind::Boss1 })
        );
    }

    #[test]
    fn test_force_absorbs_before_player() {
        let mut state = quiet_state();
        state.forces.acquire(state.player.pos);
        state.forces.acquire(state.player.pos);
        let centre = state.forces.forces[0].pos;
        // Top force sits on the centre one: overlap with both
        state.forces.forces[1].pos = centre;
        state
            .enemy_bullets
            .push(Bullet::enemy_shot(centre + Vec2::splat(5.0), Vec2::ZERO));

        resolve_collisions(&mut state);
        assert!(!state.enemy_bullets[0].active);
        let absorbs = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::ForceAbsorbed)
            .count();
        assert_eq!(absorbs, 1);
        assert_eq!(state.player.lives, PLAYER_MAX_LIVES);
    }

    #[test]
    fn test_enemy_bullet_hits_player_once_while_invincible() {
        let mut state = quiet_state();
        let p = state.player.pos;
        state.enemy_bullets.push(Bullet::enemy_shot(p, Vec2::ZERO));
        state.enemy_bullets.push(Bullet::enemy_shot(p, Vec2::ZERO));

        resolve_collisions(&mut state);
        assert_eq!(state.player.lives, PLAYER_MAX_LIVES - 1);
        assert!(state.enemy_bullets.iter().all(|b| !b.active));
        assert!(state.player.invincible);
    }

    #[test]
    fn test_ramming_destroys_grunt_but_not_boss() {
        let mut state = quiet_state();
        let p = state.player.pos;
        state.enemies.push(Enemy::new(EnemyKind::Straight, p));
        let mut boss = Enemy::boss(EnemyKind::Boss2);
        boss.pos = p - Vec2::splat(10.0);
        state.enemies.push(boss);

        resolve_collisions(&mut state);
        assert!(!state.enemies[0].active);
        assert!(state.enemies[1].active);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lives, PLAYER_MAX_LIVES - 1);
    }

    #[test]
    fn test_pickups_apply() {
        let mut state = quiet_state();
        let p = state.player.pos;
        state.powerups.push(PowerUp::new(PowerUpKind::Force, p));
        state.powerups.push(PowerUp::new(PowerUpKind::ThreeWay, p));
        state.powerups.push(PowerUp::new(PowerUpKind::Power, p));
        state.powerups.push(PowerUp::new(PowerUpKind::Speed, p));

        resolve_collisions(&mut state);
        assert_eq!(state.forces.active_count(), 1);
        assert_eq!(state.player.weapon, crate::sim::player::WeaponType::ThreeWay);
        assert_eq!(state.player.power_level, 2);
        assert_eq!(state.player.speed, PLAYER_SPEED + 1.0);
        assert!(state.powerups.iter().all(|p| !p.active));
    }

    #[test]
    fn test_terrain_damage_cooldown() {
        let mut state = quiet_state();
        state
            .terrain
            .segments
            .push(crate::sim::terrain::TerrainSegment::new(50.0, SCREEN_HEIGHT, 0.0));

        resolve_collisions(&mut state);
        assert_eq!(state.player.lives, PLAYER_MAX_LIVES - 1);
        assert_eq!(state.terrain_damage_cooldown, TERRAIN_DAMAGE_COOLDOWN);

        // Still touching, but cooling down
        state.player.invincible = false;
        resolve_collisions(&mut state);
        assert_eq!(state.player.lives, PLAYER_MAX_LIVES - 1);
    }
}
