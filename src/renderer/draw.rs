//! [`Draw`] impls for every simulation entity

use glam::Vec2;

use super::vertex::{Color, colors, lighten, with_alpha};
use super::{Draw, Surface};
use crate::consts::*;
use crate::direction_deg;
use crate::sim::bullet::{Bullet, BulletOwner};
use crate::sim::effects::{Explosion, SparkColor, Starfield};
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::force::{AttachState, Force, ForceSet};
use crate::sim::geom::Rect;
use crate::sim::player::Player;
use crate::sim::powerup::{PowerUp, PowerUpKind};
use crate::sim::state::GameState;
use crate::sim::terrain::{TerrainManager, TerrainSegment};

const CHARGE_GAUGE: Rect = Rect {
    pos: Vec2::new(10.0, SCREEN_HEIGHT - 20.0),
    size: Vec2::new(100.0, 10.0),
};

fn spark_color(c: SparkColor) -> Color {
    match c {
        SparkColor::Red => colors::RED,
        SparkColor::Orange => colors::ORANGE,
        SparkColor::Yellow => colors::YELLOW,
        SparkColor::White => colors::WHITE,
    }
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Straight => colors::ENEMY_STRAIGHT,
        EnemyKind::Wave => colors::ENEMY_WAVE,
        EnemyKind::Charge => colors::ENEMY_CHARGE,
        EnemyKind::Tank => colors::ENEMY_TANK,
        EnemyKind::Turret => colors::ENEMY_TURRET,
        EnemyKind::Boss1 => colors::BOSS_1,
        EnemyKind::Boss2 => colors::BOSS_2,
        EnemyKind::Boss3 => colors::BOSS_3,
    }
}

fn powerup_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Force => colors::POWERUP_FORCE,
        PowerUpKind::Speed => colors::POWERUP_SPEED,
        PowerUpKind::Power => colors::POWERUP_POWER,
        PowerUpKind::ThreeWay => colors::POWERUP_THREE_WAY,
    }
}

/// Regular polygon around `center`, first vertex at `start_deg`
fn regular_polygon(center: Vec2, radius: f32, sides: u32, start_deg: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| center + direction_deg(start_deg + 360.0 * i as f32 / sides as f32) * radius)
        .collect()
}

impl Draw for Starfield {
    fn draw(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            // Faster stars are nearer, so larger and brighter
            let brightness = (star.speed / 2.0).clamp(0.3, 1.0);
            let size = if star.speed > 1.5 { 2.0 } else { 1.0 };
            surface.fill_rect(
                Rect::new(star.pos.x, star.pos.y, size, size),
                with_alpha(colors::WHITE, brightness),
            );
        }
    }
}

impl Draw for TerrainSegment {
    fn draw(&self, surface: &mut dyn Surface) {
        for (rect, edge_y) in [
            (self.top_rect(), self.top_height),
            (self.bottom_rect(), SCREEN_HEIGHT - self.bottom_height),
        ] {
            if rect.size.y <= 0.0 {
                continue;
            }
            surface.fill_rect(rect, colors::TERRAIN);
            surface.line(
                Vec2::new(self.x, edge_y),
                Vec2::new(self.x + self.width, edge_y),
                2.0,
                colors::TERRAIN_EDGE,
            );
        }
    }
}

impl Draw for TerrainManager {
    fn draw(&self, surface: &mut dyn Surface) {
        for segment in &self.segments {
            segment.draw(surface);
        }
    }
}

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_visible() {
            return;
        }
        let r = self.rect();
        let nose = Vec2::new(r.right(), r.center().y);
        let hull = [Vec2::new(r.left(), r.top()), nose, Vec2::new(r.left(), r.bottom())];
        surface.fill_polygon(&hull, colors::PLAYER);
        surface.fill_circle(Vec2::new(r.left() + PLAYER_WIDTH * 0.35, r.center().y), 4.0, colors::CYAN);

        if self.charge.charging {
            let glow = lighten(colors::CHARGE_BULLET, self.charge_progress() * 0.5);
            let radius = 6.0 + 10.0 * self.charge_progress();
            surface.stroke_circle(nose, radius, 2.0, glow);
        }
        if self.power_effect_timer > 0 {
            surface.stroke_rect(r, 1.0, with_alpha(colors::RED, 0.6));
        }
    }
}

impl Draw for Force {
    fn draw(&self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }
        let c = self.rect().center();
        let r = FORCE_SIZE / 2.0;
        surface.fill_circle(c, r, colors::ORANGE);
        surface.fill_circle(c, r * 0.66, colors::YELLOW);
        surface.fill_circle(c, r * 0.33, colors::WHITE);
        if self.state == AttachState::Detached {
            surface.stroke_circle(c, r + 3.0, 1.5, with_alpha(colors::ORANGE, 0.5));
        }
    }
}

impl Draw for ForceSet {
    fn draw(&self, surface: &mut dyn Surface) {
        for force in &self.forces {
            force.draw(surface);
        }
    }
}

impl Draw for Enemy {
    fn draw(&self, surface: &mut dyn Surface) {
        let r = self.rect();
        let c = r.center();
        let half = self.size / 2.0;
        let color = enemy_color(self.kind);

        match self.kind {
            EnemyKind::Straight => surface.fill_rect(r, color),
            EnemyKind::Wave => {
                let diamond = regular_polygon(c, half, 4, 0.0);
                surface.fill_polygon(&diamond, color);
            }
            EnemyKind::Charge => {
                let arrow = [
                    Vec2::new(r.left(), c.y),
                    Vec2::new(r.right(), r.top()),
                    Vec2::new(r.right(), r.bottom()),
                ];
                surface.fill_polygon(&arrow, color);
            }
            EnemyKind::Tank => {
                surface.fill_rect(r, color);
                surface.line(c, Vec2::new(r.left() - 8.0, c.y), 4.0, colors::DARK_GRAY);
            }
            EnemyKind::Turret => {
                surface.fill_circle(c, half, color);
                surface.stroke_circle(c, half, 2.0, colors::LIGHT_GRAY);
            }
            EnemyKind::Boss1 | EnemyKind::Boss2 | EnemyKind::Boss3 => {
                surface.fill_rect(r, color);
                surface.stroke_rect(r, 3.0, lighten(color, 0.4));
                surface.fill_circle(c, half * 0.3, colors::YELLOW);
            }
        }

        if self.is_boss() && self.max_hp > 0 {
            let frac = (self.hp.max(0) as f32 / self.max_hp as f32).min(1.0);
            let bar = Rect::new(r.left(), r.top() - 10.0, r.size.x, 5.0);
            surface.fill_rect(bar, colors::DARK_GRAY);
            surface.fill_rect(Rect { size: Vec2::new(bar.size.x * frac, bar.size.y), ..bar }, colors::HP_BAR);
        }
    }
}

impl Draw for Bullet {
    fn draw(&self, surface: &mut dyn Surface) {
        let r = self.rect();
        match self.owner {
            BulletOwner::Enemy => surface.fill_circle(r.center(), r.size.x / 2.0, colors::ENEMY_BULLET),
            BulletOwner::Player if self.charge_level > 0 => {
                let glow = r.size.y / 2.0 + 2.0 * self.charge_level as f32;
                surface.fill_circle(r.center(), glow, with_alpha(colors::CHARGE_BULLET, 0.35));
                surface.fill_rect(r, colors::CHARGE_BULLET);
            }
            BulletOwner::Player => surface.fill_rect(r, colors::PLAYER_BULLET),
        }
    }
}

impl Draw for PowerUp {
    fn draw(&self, surface: &mut dyn Surface) {
        let c = self.rect().center();
        let hex = regular_polygon(c, POWERUP_SIZE / 2.0, 6, 30.0);
        surface.fill_polygon(&hex, powerup_color(self.kind));
        surface.stroke_polygon(&hex, 1.5, colors::WHITE);
    }
}

impl Draw for Explosion {
    fn draw(&self, surface: &mut dyn Surface) {
        let alpha = self.alpha();
        for p in &self.particles {
            surface.fill_rect(
                Rect::new(p.pos.x, p.pos.y, p.size, p.size),
                with_alpha(spark_color(p.color), alpha),
            );
        }
        surface.stroke_circle(self.center, self.size, 2.0, with_alpha(colors::ORANGE, alpha));
    }
}

fn draw_charge_gauge(player: &Player, surface: &mut dyn Surface) {
    if !player.charge.charging {
        return;
    }
    let progress = player.charge_progress();
    let fill = match player.charge.level {
        0 => colors::LIGHT_GRAY,
        1 => colors::CYAN,
        2 => colors::YELLOW,
        _ => colors::RED,
    };
    surface.fill_rect(CHARGE_GAUGE, colors::DARK_GRAY);
    surface.fill_rect(
        Rect {
            size: Vec2::new(CHARGE_GAUGE.size.x * progress, CHARGE_GAUGE.size.y),
            ..CHARGE_GAUGE
        },
        fill,
    );
    surface.stroke_rect(CHARGE_GAUGE, 1.0, colors::WHITE);
}

/// Draw a whole frame, back to front
pub fn draw_state(state: &GameState, surface: &mut dyn Surface) {
    state.stars.draw(surface);
    state.terrain.draw(surface);
    state.player.draw(surface);
    state.forces.draw(surface);
    for enemy in &state.enemies {
        enemy.draw(surface);
    }
    for bullet in state.player_bullets.iter().chain(&state.enemy_bullets) {
        bullet.draw(surface);
    }
    for powerup in &state.powerups {
        powerup.draw(surface);
    }
    for explosion in &state.explosions {
        explosion.draw(surface);
    }
    draw_charge_gauge(&state.player, surface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;

    /// Counts calls instead of tessellating
    #[derive(Default)]
    struct CallLog {
        rects: usize,
        circles: usize,
        polygons: usize,
        colors: Vec<Color>,
    }

    impl Surface for CallLog {
        fn fill_rect(&mut self, _: Rect, color: Color) {
            self.rects += 1;
            self.colors.push(color);
        }
        fn stroke_rect(&mut self, _: Rect, _: f32, _: Color) {}
        fn fill_circle(&mut self, _: Vec2, _: f32, color: Color) {
            self.circles += 1;
            self.colors.push(color);
        }
        fn stroke_circle(&mut self, _: Vec2, _: f32, _: f32, _: Color) {}
        fn fill_polygon(&mut self, _: &[Vec2], color: Color) {
            self.polygons += 1;
            self.colors.push(color);
        }
        fn stroke_polygon(&mut self, _: &[Vec2], _: f32, _: Color) {}
        fn line(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {}
    }

    #[test]
    fn test_inactive_force_draws_nothing() {
        let mut log = CallLog::default();
        ForceSet::default().draw(&mut log);
        assert_eq!(log.circles, 0);
    }

    #[test]
    fn test_enemy_shapes_by_kind() {
        let mut log = CallLog::default();
        Enemy::new(EnemyKind::Straight, Vec2::new(100.0, 100.0)).draw(&mut log);
        assert_eq!(log.rects, 1);

        let mut log = CallLog::default();
        Enemy::new(EnemyKind::Wave, Vec2::new(100.0, 100.0)).draw(&mut log);
        assert_eq!(log.polygons, 1);
        assert_eq!(log.colors[0], colors::ENEMY_WAVE);
    }

    #[test]
    fn test_boss_has_health_bar() {
        let mut boss = Enemy::new(EnemyKind::Boss1, Vec2::new(500.0, 200.0));
        boss.hp = boss.max_hp / 2;
        let mut log = CallLog::default();
        boss.draw(&mut log);
        assert!(log.colors.contains(&colors::HP_BAR));
    }

    #[test]
    fn test_powerup_is_hexagon() {
        let hex = regular_polygon(Vec2::ZERO, 10.0, 6, 30.0);
        assert_eq!(hex.len(), 6);
        for p in &hex {
            assert!((p.length() - 10.0).abs() < 1e-4);
        }
        let mut log = CallLog::default();
        PowerUp::new(PowerUpKind::Speed, Vec2::ZERO).draw(&mut log);
        assert_eq!(log.colors, vec![colors::POWERUP_SPEED]);
    }

    #[test]
    fn test_fresh_state_produces_geometry() {
        let state = GameState::new(7, PLAYER_MAX_LIVES);
        let mut batch = VertexBatch::new();
        draw_state(&state, &mut batch);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_charge_gauge_only_while_charging() {
        let mut state = GameState::new(7, PLAYER_MAX_LIVES);
        let mut idle = CallLog::default();
        draw_charge_gauge(&state.player, &mut idle);
        assert_eq!(idle.rects, 0);

        state.player.charge.charging = true;
        state.player.charge.time = CHARGE_LEVEL_3_TICKS;
        state.player.charge.level = 3;
        let mut charging = CallLog::default();
        draw_charge_gauge(&state.player, &mut charging);
        assert_eq!(charging.rects, 2);
        assert!(charging.colors.contains(&colors::RED));
    }
}
