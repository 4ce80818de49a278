//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Seeded RNG only, owned by [`GameState`]
//! - Entity lists iterated in insertion order, pruned at the end of a tick
//! - No rendering, audio or platform dependencies beyond the input snapshot

pub mod bullet;
pub mod collision;
pub mod effects;
pub mod enemy;
pub mod force;
pub mod geom;
pub mod player;
pub mod powerup;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod wave;

pub use bullet::{Bullet, BulletOwner, create_aimed_bullet};
pub use collision::resolve_collisions;
pub use effects::{Explosion, Starfield};
pub use enemy::{Enemy, EnemyKind, TurretMount};
pub use force::{AttachState, Force, ForceSet, ForceSlot};
pub use geom::Rect;
pub use player::{Player, WeaponType};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GameState, Hud};
pub use terrain::{TerrainManager, TerrainPattern, TerrainSegment};
pub use tick::tick;
pub use wave::WaveManager;
