//! Bounce Barrage - A five-stage arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, patterns, collisions, stages)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `pilot`: Scripted input source for headless runs

pub mod pilot;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Wall-clock length of one simulation tick (ms)
    pub const FRAME_MS: f32 = 16.0;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_BASE_SHOOT_COOLDOWN: u32 = 10;
    /// Distance from the bottom edge to the player's spawn row
    pub const PLAYER_SPAWN_OFFSET: f32 = 50.0;
    pub const STARTING_LIVES: u8 = 3;
    /// Invulnerability after taking a hit or starting a stage (ticks)
    pub const PLAYER_HIT_INVULNERABILITY: u32 = 120;

    /// Player bullet defaults
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    /// Multi-shot side angle (radians off vertical)
    pub const MULTI_SHOT_ANGLE: f32 = 0.3;
    pub const MAX_BOUNCES_CAP: u32 = 3;

    /// Ambient gravity added to player bullet vy each tick
    pub const GRAVITY: f32 = 0.1;
    /// Enemy bullets feel this fraction of GRAVITY
    pub const ENEMY_GRAVITY_SCALE: f32 = 0.5;
    /// Homing steer acceleration per tick
    pub const HOMING_STRENGTH: f32 = 0.05;
    /// Homing speed cap relative to spawn speed
    pub const HOMING_MAX_SPEED_FACTOR: f32 = 1.5;
    /// Enemy bullets are culled this far past any edge
    pub const CULL_MARGIN: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPAWN_Y: f32 = -30.0;
    pub const ENEMY_SPEED_JITTER: f32 = 0.5;
    pub const SPIRAL_ANGLE_STEP: f32 = 0.1;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 80.0;
    pub const BOSS_Y: f32 = 50.0;
    pub const BOSS_BASE_HEALTH: u32 = 10;
    pub const BOSS_HEALTH_PER_STAGE: u32 = 5;
    pub const BOSS_SWAY_AMPLITUDE: f32 = 100.0;
    pub const BOSS_SWAY_STEP: f32 = 0.02;
    pub const BOSS_HIT_INVULNERABILITY: u32 = 10;
    pub const BOSS_SPIRAL_STEP: f32 = 0.2;
    pub const BOSS_PHASE_SPEEDUP: f32 = 1.5;

    /// Scoring
    pub const ENEMY_SCORE_PER_STAGE: u64 = 100;
    pub const BOSS_SCORE_PER_STAGE: u64 = 1000;
    pub const COMBO_BONUS_STEP: u32 = 5;
    pub const COMBO_BONUS: u64 = 50;

    /// Explosive bullet splash radius
    pub const EXPLOSION_RADIUS: f32 = 60.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPAWN_CHANCE: f32 = 0.01;
    pub const OBSTACLE_MIN_SIZE: f32 = 30.0;
    pub const OBSTACLE_SIZE_JITTER: f32 = 20.0;
    pub const OBSTACLE_LIFE: u32 = 1800;
    pub const OBSTACLE_PLAYER_PUSH: f32 = 5.0;
    pub const OBSTACLE_BULLET_PUSH: f32 = 3.0;

    /// Pickups
    pub const POWER_UP_DROP_CHANCE: f32 = 0.15;
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_LIFE: u32 = 600;
    pub const ITEM_SIZE: f32 = 30.0;
    pub const ITEM_LIFE: u32 = 900;
    pub const WARP_SPAWN_CHANCE: f32 = 0.001;
    pub const WARP_LIFE: u32 = 300;

    /// Stage-advance delays (ms)
    pub const STAGE_CLEAR_DELAY_MS: f32 = 2000.0;
    pub const BOSS_CLEAR_DELAY_MS: f32 = 3000.0;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 512;
}

/// Unit vector from `from` toward `to`, or `None` when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let len = delta.length();
    if len > 0.0 { Some(delta / len) } else { None }
}

/// Velocity for a heading measured from the +x axis
#[inline]
pub fn velocity_at(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Clamp `v` to at most `max_speed` length, preserving direction
#[inline]
pub fn clamp_speed(v: Vec2, max_speed: f32) -> Vec2 {
    let speed = v.length();
    if speed > max_speed {
        v / speed * max_speed
    } else {
        v
    }
}
