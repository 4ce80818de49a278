//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA, 0.0 - 1.0
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Brighten toward white by `amount` (0-1)
pub fn lighten(color: Color, amount: f32) -> Color {
    let f = |c: f32| (c + (1.0 - c) * amount).min(1.0);
    [f(color[0]), f(color[1]), f(color[2]), color[3]]
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
    pub const ORANGE: Color = [1.0, 0.65, 0.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const CYAN: Color = [0.0, 1.0, 1.0, 1.0];
    pub const DARK_GRAY: Color = [0.25, 0.25, 0.25, 1.0];
    pub const LIGHT_GRAY: Color = [0.7, 0.7, 0.7, 1.0];

    pub const PLAYER: Color = [0.0, 0.4, 1.0, 1.0];
    pub const PLAYER_BULLET: Color = [0.4, 1.0, 1.0, 1.0];
    pub const CHARGE_BULLET: Color = [1.0, 0.9, 0.3, 1.0];
    pub const ENEMY_BULLET: Color = [1.0, 0.3, 0.3, 1.0];

    pub const ENEMY_STRAIGHT: Color = [1.0, 0.2, 0.2, 1.0];
    pub const ENEMY_WAVE: Color = [0.8, 0.2, 1.0, 1.0];
    pub const ENEMY_CHARGE: Color = [1.0, 0.5, 0.0, 1.0];
    pub const ENEMY_TANK: Color = [0.4, 0.6, 0.2, 1.0];
    pub const ENEMY_TURRET: Color = [0.6, 0.6, 0.7, 1.0];
    pub const BOSS_1: Color = [0.7, 0.1, 0.1, 1.0];
    pub const BOSS_2: Color = [0.5, 0.1, 0.6, 1.0];
    pub const BOSS_3: Color = [0.1, 0.2, 0.6, 1.0];
    pub const HP_BAR: Color = [0.2, 0.9, 0.2, 1.0];

    pub const POWERUP_FORCE: Color = ORANGE;
    pub const POWERUP_SPEED: Color = [0.2, 1.0, 0.2, 1.0];
    pub const POWERUP_POWER: Color = RED;
    pub const POWERUP_THREE_WAY: Color = CYAN;

    pub const TERRAIN: Color = [0.3, 0.25, 0.2, 1.0];
    pub const TERRAIN_EDGE: Color = [0.55, 0.45, 0.35, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let v = [Vertex::new(1.0, 2.0, colors::WHITE)];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), 24);
    }

    #[test]
    fn test_lighten() {
        assert_eq!(lighten(colors::BACKGROUND, 1.0), colors::WHITE);
        assert_eq!(lighten(colors::RED, 0.0), colors::RED);
    }
}
