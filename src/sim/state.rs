//! Game state and core simulation types
//!
//! Everything the renderer and HUD read lives here. The simulation mutates a
//! single `GameState` in place once per tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievements::Achievement;
use super::rect::{Bounded, Rect};
use super::stage::StageConfig;
use crate::Settings;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Regular waves, kill quota not yet met
    Playing,
    /// Quota met on a boss stage, boss on the field
    BossFight,
    /// Stage cleared, waiting out the advance delay
    StageComplete { remaining_ms: f32 },
    /// Lives exhausted
    GameOver,
    /// Stage 5 cleared
    AllClear,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        !matches!(self, GamePhase::GameOver | GamePhase::AllClear)
    }
}

/// Enemy variants, each with its own firing pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Circular,
    Spiral,
    Homing,
}

/// Pattern tag carried by enemy bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletPattern {
    Basic,
    Circular,
    Spiral,
    Homing,
    Boss,
}

/// Timed or stacking player upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    MaxBounces,
    Piercing,
    Explosive,
    SpeedUp,
    MultiShot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::RapidFire,
        PowerUpKind::MaxBounces,
        PowerUpKind::Piercing,
        PowerUpKind::Explosive,
        PowerUpKind::SpeedUp,
        PowerUpKind::MultiShot,
    ];

    /// Effect duration in ticks (MaxBounces is permanent and ignores this)
    pub fn duration(&self) -> u32 {
        match self {
            PowerUpKind::RapidFire => 300,
            PowerUpKind::MaxBounces => 600,
            PowerUpKind::Piercing => 450,
            PowerUpKind::Explosive => 400,
            PowerUpKind::SpeedUp => 500,
            PowerUpKind::MultiShot => 350,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "Rapid Fire",
            PowerUpKind::MaxBounces => "Extra Bounce",
            PowerUpKind::Piercing => "Piercing Shot",
            PowerUpKind::Explosive => "Explosive Shot",
            PowerUpKind::SpeedUp => "Speed Up",
            PowerUpKind::MultiShot => "Multi Shot",
        }
    }
}

/// One-shot special items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Shield,
    SlowMotion,
    ClearBomb,
    /// Only spawned ambiently, never dropped by the boss
    Warp,
}

impl ItemKind {
    /// Items a defeated boss can drop
    pub const DROPS: [ItemKind; 3] = [ItemKind::Shield, ItemKind::SlowMotion, ItemKind::ClearBomb];

    /// Effect duration in ticks
    pub fn duration(&self) -> u32 {
        match self {
            ItemKind::Shield => 180,
            ItemKind::SlowMotion => 240,
            ItemKind::ClearBomb | ItemKind::Warp => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Shield => "Shield",
            ItemKind::SlowMotion => "Slow Motion",
            ItemKind::ClearBomb => "Clear Bomb",
            ItemKind::Warp => "Warp",
        }
    }
}

/// Remaining ticks for each timed upgrade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub rapid_fire: u32,
    /// Persistent bounce allowance for new bullets (1..=3)
    pub max_bounces: u32,
    pub piercing: u32,
    pub explosive: u32,
    pub speed_up: u32,
    pub multi_shot: u32,
}

impl Default for PowerUpTimers {
    fn default() -> Self {
        Self {
            rapid_fire: 0,
            max_bounces: 1,
            piercing: 0,
            explosive: 0,
            speed_up: 0,
            multi_shot: 0,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub base_speed: f32,
    /// Speed for the current tick (speed-up applied)
    pub speed: f32,
    pub base_shoot_cooldown: u32,
    /// Cooldown applied after the next shot (rapid fire applied)
    pub effective_shoot_cooldown: u32,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub invulnerable: u32,
    pub power_ups: PowerUpTimers,
}

impl Player {
    pub fn new(arena: Vec2) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            base_speed: PLAYER_BASE_SPEED,
            speed: PLAYER_BASE_SPEED,
            base_shoot_cooldown: PLAYER_BASE_SHOOT_COOLDOWN,
            effective_shoot_cooldown: PLAYER_BASE_SHOOT_COOLDOWN,
            shoot_cooldown: 0,
            invulnerable: 0,
            power_ups: PowerUpTimers::default(),
        };
        player.recenter(arena);
        player
    }

    /// Move back to the spawn point (bottom centre)
    pub fn recenter(&mut self, arena: Vec2) {
        self.pos = Vec2::new(
            (arena.x - self.size.x) / 2.0,
            arena.y - PLAYER_SPAWN_OFFSET,
        );
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub bounces: u32,
    pub max_bounces: u32,
    pub piercing: bool,
    pub explosive: bool,
}

/// An enemy or boss projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Nominal (spawn) speed
    pub speed: f32,
    pub pattern: BulletPattern,
}

impl EnemyBullet {
    /// Bullet with its corner at `origin`, nominal speed taken from `vel`
    pub fn new(origin: Vec2, vel: Vec2, size: f32, pattern: BulletPattern) -> Self {
        Self {
            pos: origin,
            vel,
            size: Vec2::splat(size),
            speed: vel.length(),
            pattern,
        }
    }
}

/// A regular enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub kind: EnemyKind,
    /// Spiral emitter angle (radians)
    pub angle: f32,
    pub shoot_cooldown: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind, speed: f32, health: u32) -> Self {
        Self {
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            speed,
            health,
            max_health: health,
            kind,
            angle: 0.0,
            shoot_cooldown: 0,
        }
    }
}

/// The stage boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Sway speed multiplier, raised on each phase change
    pub speed: f32,
    /// Horizontal sway accumulator
    pub move_phase: f32,
    /// Spiral emitter angle for phase 3
    pub angle: f32,
    pub shoot_cooldown: u32,
    pub invulnerable: u32,
    /// 1..=3, never decreases
    pub phase: u8,
}

impl Boss {
    pub fn new(stage: u8, arena: Vec2) -> Self {
        let health = BOSS_BASE_HEALTH + BOSS_HEALTH_PER_STAGE * stage as u32;
        Self {
            pos: Vec2::new(arena.x / 2.0 - BOSS_SIZE / 2.0, BOSS_Y),
            size: Vec2::splat(BOSS_SIZE),
            health,
            max_health: health,
            speed: 1.0,
            move_phase: 0.0,
            angle: 0.0,
            shoot_cooldown: 0,
            invulnerable: 0,
            phase: 1,
        }
    }

    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / self.max_health.max(1) as f32
    }
}

/// A collectible drifting across the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup<K> {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Ticks until it vanishes
    pub life: u32,
    pub kind: K,
}

pub type PowerUp = Pickup<PowerUpKind>;
pub type SpecialItem = Pickup<ItemKind>;

/// Obstacle behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Static,
    Moving { vel: Vec2 },
}

/// A temporary block that repels the player and deflects bullets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    pub life: u32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    /// 0xRRGGBB
    pub color: u32,
}

macro_rules! impl_bounded {
    ($($ty:ty),* $(,)?) => {
        $(impl Bounded for $ty {
            fn rect(&self) -> Rect {
                Rect::new(self.pos, self.size)
            }
        })*
    };
}

impl_bounded!(Player, PlayerBullet, EnemyBullet, Enemy, Boss, Obstacle);

impl<K> Bounded for Pickup<K> {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Notifications for the UI layer, collected during a single tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    EnemyKilled { score: u64, combo: u32 },
    PlayerHit { lives: u8 },
    ShieldBroken,
    PowerUpCollected(PowerUpKind),
    ItemCollected(ItemKind),
    BossSpawned { stage: u8, health: u32 },
    BossPhaseChanged { phase: u8 },
    BossDefeated { stage: u8 },
    StageCleared { stage: u8 },
    StageStarted { stage: u8 },
    AchievementUnlocked {
        achievement: Achievement,
        name: &'static str,
        description: &'static str,
    },
    GameOver { score: u64 },
    AllClear { score: u64 },
}

/// Monotonic counters feeding the achievement latches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tally {
    pub total_kills: u32,
    pub explosive_kills: u32,
    pub power_ups_collected: u32,
    pub speed_ups_collected: u32,
    pub bosses_defeated: u32,
    pub stages_cleared: u32,
    /// Stages cleared without losing a life
    pub flawless_stages: u32,
    /// Lives lost since the current stage started
    pub hits_this_stage: u32,
}

/// Plain values for the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub stage: u8,
    pub kills: u32,
    pub quota: u32,
    pub combo: u32,
    /// Whole seconds of shield left (0 when none)
    pub shield_secs: u32,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Live generator; serialized with the state so a restored run keeps its stream
    pub rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Current stage (1..=5)
    pub stage: u8,
    pub lives: u8,
    pub score: u64,
    /// Kills toward the current stage quota
    pub kills: u32,
    pub combo: u32,
    pub max_combo: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub player_bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub power_ups: Vec<PowerUp>,
    pub items: Vec<SpecialItem>,
    pub obstacles: Vec<Obstacle>,
    /// Shield ticks remaining
    pub shield: u32,
    pub slow_motion: bool,
    /// Wall-clock slow motion left (ms)
    pub slow_motion_ms: f32,
    /// Unlocked achievements in unlock order
    pub achievements: Vec<Achievement>,
    pub tally: Tally,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let rng_state = RngState::new(seed);
        let arena = settings.arena();
        Self {
            seed,
            rng: rng_state.to_rng(),
            rng_state,
            phase: GamePhase::Playing,
            stage: 1,
            lives: settings.starting_lives,
            score: 0,
            kills: 0,
            combo: 0,
            max_combo: 0,
            time_ticks: 0,
            player: Player::new(arena),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            power_ups: Vec::new(),
            items: Vec::new(),
            obstacles: Vec::new(),
            shield: 0,
            slow_motion: false,
            slow_motion_ms: 0.0,
            achievements: Vec::new(),
            tally: Tally::default(),
            particles: Vec::new(),
            events: Vec::new(),
            settings,
        }
    }

    /// Replace the whole state with a fresh run, keeping the settings
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        let settings = self.settings.clone();
        *self = Self::with_settings(seed, settings);
        log::info!("Game restarted with seed: {}", seed);
    }

    pub fn arena(&self) -> Vec2 {
        self.settings.arena()
    }

    pub fn stage_config(&self) -> &StageConfig {
        self.settings.stage(self.stage)
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn stage_complete(&self) -> bool {
        matches!(self.phase, GamePhase::StageComplete { .. })
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            stage: self.stage,
            kills: self.kills,
            quota: self.stage_config().enemies_to_kill,
            combo: self.combo,
            shield_secs: self.shield.div_ceil(60),
        }
    }
}
