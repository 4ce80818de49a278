//! Procedural scrolling terrain.
//!
//! A new segment appears at the right edge every [`TERRAIN_SPAWN_INTERVAL`]
//! ticks; its ceiling/floor heights come from the active pattern, which is
//! re-rolled on a wave-dependent timer. From wave 2 on, fresh segments may
//! carry a turret.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, TurretMount};
use super::geom::Rect;
use crate::consts::*;

/// One column of ceiling + floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainSegment {
    pub x: f32,
    pub top_height: f32,
    pub bottom_height: f32,
    pub width: f32,
    pub active: bool,
}

impl TerrainSegment {
    pub fn new(x: f32, top_height: f32, bottom_height: f32) -> Self {
        Self {
            x,
            top_height,
            bottom_height,
            width: TERRAIN_SEGMENT_WIDTH,
            active: true,
        }
    }

    pub fn update(&mut self) {
        self.x -= TERRAIN_SCROLL_SPEED;
        if self.x + self.width < 0.0 {
            self.active = false;
        }
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x,
            SCREEN_HEIGHT - self.bottom_height,
            self.width,
            self.bottom_height,
        )
    }

    pub fn collides_with(&self, rect: &Rect) -> bool {
        self.top_rect().intersects(rect) || self.bottom_rect().intersects(rect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainPattern {
    Open,
    NarrowTop,
    NarrowBottom,
    NarrowMiddle,
    Wavy,
}

impl TerrainPattern {
    pub const ALL: [TerrainPattern; 5] = [
        TerrainPattern::Open,
        TerrainPattern::NarrowTop,
        TerrainPattern::NarrowBottom,
        TerrainPattern::NarrowMiddle,
        TerrainPattern::Wavy,
    ];

    /// Selection weights per wave, indexed like [`Self::ALL`]
    fn weights(wave: u8) -> [f32; 5] {
        match wave {
            0 | 1 => [1.0, 0.0, 0.0, 0.0, 0.0],
            2 => [0.3, 0.35, 0.35, 0.0, 0.0],
            3 => [0.0, 0.25, 0.25, 0.0, 0.5],
            _ => [1.0; 5],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainManager {
    pub segments: Vec<TerrainSegment>,
    pub pattern: TerrainPattern,
    spawn_timer: u32,
    pattern_timer: u32,
    /// `None` means the pattern never changes (wave 1)
    pattern_duration: Option<u32>,
    wave: u8,
}

impl Default for TerrainManager {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            pattern: TerrainPattern::Open,
            spawn_timer: 0,
            pattern_timer: 0,
            pattern_duration: None,
            wave: 1,
        }
    }
}

impl TerrainManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wave(&self) -> u8 {
        self.wave
    }

    /// Switch difficulty tier. Pattern timing tightens with each wave.
    pub fn set_wave(&mut self, wave: u8) {
        self.wave = wave;
        self.pattern_duration = match wave {
            0 | 1 => None,
            2 => Some(PATTERN_DURATION[0]),
            3 => Some(PATTERN_DURATION[1]),
            _ => Some(PATTERN_DURATION[2]),
        };
        log::debug!(
            "terrain wave {} pattern duration {:?}",
            wave,
            self.pattern_duration
        );
    }

    /// Scroll, prune, spawn and maybe switch pattern.
    /// Returns any turrets placed on a freshly spawned segment.
    pub fn update(&mut self, rng: &mut impl Rng) -> Vec<Enemy> {
        for segment in &mut self.segments {
            segment.update();
        }
        self.segments.retain(|s| s.active);

        let mut turrets = Vec::new();
        self.spawn_timer += 1;
        if self.spawn_timer >= TERRAIN_SPAWN_INTERVAL {
            self.spawn_timer = 0;
            turrets.extend(self.spawn_segment(rng));
        }

        if let Some(duration) = self.pattern_duration {
            self.pattern_timer += 1;
            if self.pattern_timer >= duration {
                self.pattern_timer = 0;
                self.next_pattern(rng);
            }
        }
        turrets
    }

    /// Append a segment at the right edge using the current pattern
    pub fn spawn_segment(&mut self, rng: &mut impl Rng) -> Option<Enemy> {
        let pattern = if self.wave <= 1 {
            TerrainPattern::Open
        } else {
            self.pattern
        };
        let (top, bottom) = self.heights_for(pattern, rng);
        let segment = TerrainSegment::new(SCREEN_WIDTH, top, bottom);

        let turret = if self.wave >= 2 {
            let chance = TURRET_CHANCE[(self.wave as usize - 2).min(2)];
            if rng.random_bool(chance) {
                self.place_turret(&segment, rng)
            } else {
                None
            }
        } else {
            None
        };

        self.segments.push(segment);
        turret
    }

    /// Re-roll the active pattern from the current wave's weights
    pub fn next_pattern(&mut self, rng: &mut impl Rng) {
        let weights = TerrainPattern::weights(self.wave);
        self.pattern = match WeightedIndex::new(weights) {
            Ok(dist) => TerrainPattern::ALL[dist.sample(rng)],
            Err(_) => TerrainPattern::Open,
        };
        log::debug!("terrain pattern -> {:?}", self.pattern);
    }

    fn heights_for(&self, pattern: TerrainPattern, rng: &mut impl Rng) -> (f32, f32) {
        match pattern {
            TerrainPattern::Open => pattern_open(rng),
            TerrainPattern::NarrowTop => pattern_narrow_top(rng),
            TerrainPattern::NarrowBottom => {
                let (top, bottom) = pattern_narrow_top(rng);
                (bottom, top)
            }
            TerrainPattern::NarrowMiddle => pattern_narrow_middle(rng),
            TerrainPattern::Wavy => pattern_wavy(self.segments.last(), rng),
        }
    }

    /// True if `rect` overlaps either strip of any segment
    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.segments
            .iter()
            .filter(|s| s.active)
            .any(|s| s.collides_with(rect))
    }

    /// A y inside the corridor of the newest segment, keeping 50px off
    /// each strip. Falls back to the middle band of the screen.
    pub fn safe_spawn_y(&self, rng: &mut impl Rng) -> f32 {
        if let Some(last) = self.segments.last() {
            let top_limit = (last.top_height + 50.0) as i32;
            let bottom_limit = (SCREEN_HEIGHT - last.bottom_height - 50.0) as i32;
            if top_limit < bottom_limit {
                return rng.random_range(top_limit..=bottom_limit) as f32;
            }
        }
        rng.random_range(100..=(SCREEN_HEIGHT as i32 - 100)) as f32
    }

    /// Mount a turret on whichever strip is deep enough; coin flip if both are
    fn place_turret(&self, segment: &TerrainSegment, rng: &mut impl Rng) -> Option<Enemy> {
        let ceiling_ok = segment.top_height > TURRET_MIN_DEPTH;
        let floor_ok = segment.bottom_height > TURRET_MIN_DEPTH;
        let mount = match (ceiling_ok, floor_ok) {
            (false, false) => return None,
            (true, true) => {
                if rng.random_bool(0.5) {
                    TurretMount::Ceiling
                } else {
                    TurretMount::Floor
                }
            }
            (true, false) => TurretMount::Ceiling,
            (false, true) => TurretMount::Floor,
        };

        let x = segment.x + segment.width / 2.0;
        let y = match mount {
            TurretMount::Ceiling => segment.top_height - TURRET_SIZE,
            TurretMount::Floor => SCREEN_HEIGHT - segment.bottom_height,
        };
        let interval = TURRET_INTERVAL[(self.wave as usize).saturating_sub(2).min(2)];
        log::debug!("turret on {:?} at ({}, {})", mount, x, y);
        Some(Enemy::turret(Vec2::new(x, y), mount, interval))
    }
}

fn pattern_open(rng: &mut impl Rng) -> (f32, f32) {
    (
        rng.random_range(0..=50) as f32,
        rng.random_range(0..=50) as f32,
    )
}

fn pattern_narrow_top(rng: &mut impl Rng) -> (f32, f32) {
    (
        rng.random_range(100..=200) as f32,
        rng.random_range(0..=50) as f32,
    )
}

/// Both strips thick, but always leaving a [`MIN_CORRIDOR`] gap
fn pattern_narrow_middle(rng: &mut impl Rng) -> (f32, f32) {
    let mut top = rng.random_range(120..=180) as f32;
    let mut bottom = rng.random_range(120..=180) as f32;
    let limit = SCREEN_HEIGHT - MIN_CORRIDOR;
    if top + bottom > limit {
        top = top.min(MIN_CORRIDOR);
        bottom = limit - top;
    }
    (top, bottom)
}

/// Random walk from the previous segment, ±20 per step within 0..=200
fn pattern_wavy(prev: Option<&TerrainSegment>, rng: &mut impl Rng) -> (f32, f32) {
    match prev {
        Some(prev) => {
            let top = prev.top_height + rng.random_range(-20..=20) as f32;
            let bottom = prev.bottom_height + rng.random_range(-20..=20) as f32;
            (top.clamp(0.0, 200.0), bottom.clamp(0.0, 200.0))
        }
        None => (
            rng.random_range(50..=100) as f32,
            rng.random_range(50..=100) as f32,
        ),
    }
}
