//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick, with wall-clock time only draining explicit countdowns
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod achievements;
pub mod collision;
pub mod effects;
pub mod motion;
pub mod patterns;
pub mod pickups;
pub mod player;
pub mod rect;
pub mod spawn;
pub mod stage;
pub mod state;
pub mod tick;

pub use achievements::Achievement;
pub use effects::Effect;
pub use rect::{Bounded, Rect};
pub use stage::{STAGE_COUNT, STAGE_TABLE, StageConfig};
pub use state::{
    Boss, BulletPattern, Enemy, EnemyBullet, EnemyKind, GameEvent, GamePhase, GameState, Hud,
    ItemKind, Obstacle, ObstacleKind, Particle, Pickup, Player, PlayerBullet, PowerUp,
    PowerUpKind, PowerUpTimers, SpecialItem, Tally,
};
pub use tick::{TickInput, tick};
