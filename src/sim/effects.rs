//! Purely visual effects: explosions and the scrolling starfield.
//! Nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Palette index for particles (resolved to RGBA by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SparkColor {
    Red,
    Orange,
    Yellow,
    White,
}

const SPARK_COLORS: [SparkColor; 4] = [
    SparkColor::Red,
    SparkColor::Orange,
    SparkColor::Yellow,
    SparkColor::White,
];

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: SparkColor,
}

/// A burst of particles plus a fading flash ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Vec2,
    /// Flash ring size at full strength
    pub size: f32,
    pub timer: u32,
    pub particles: Vec<Particle>,
    pub active: bool,
}

impl Explosion {
    pub fn new(center: Vec2, size: f32, rng: &mut impl Rng) -> Self {
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|i| {
                let angle = (360.0 / EXPLOSION_PARTICLES as f32 * i as f32).to_radians();
                let speed = rng.random_range(2.0..5.0);
                Particle {
                    pos: center,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    size: rng.random_range(3..=8) as f32,
                    color: *SPARK_COLORS.choose(rng).unwrap_or(&SparkColor::White),
                }
            })
            .collect();
        Self {
            center,
            size,
            timer: EXPLOSION_TICKS,
            particles,
            active: true,
        }
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.active = false;
            return;
        }
        for p in &mut self.particles {
            p.pos += p.vel;
            p.size = (p.size - 0.3).max(1.0);
        }
    }

    /// Remaining strength of the flash ring (1.0 -> 0.0)
    pub fn alpha(&self) -> f32 {
        self.timer as f32 / EXPLOSION_TICKS as f32
    }
}

/// A background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
}

/// Parallax starfield scrolling left and wrapping at the edge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..SCREEN_WIDTH),
                    rng.random_range(0.0..SCREEN_HEIGHT),
                ),
                speed: rng.random_range(0.5..2.0),
            })
            .collect();
        Self { stars }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.pos.x -= star.speed;
            if star.pos.x < 0.0 {
                star.pos.x = SCREEN_WIDTH;
                star.pos.y = rng.random_range(0.0..SCREEN_HEIGHT);
            }
        }
    }
}
