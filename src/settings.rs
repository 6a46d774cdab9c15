//! Simulation settings and tuning
//!
//! Loaded from an optional JSON file; every field falls back to the stock
//! value so partial files only override what they name.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::stage::{STAGE_COUNT, STAGE_TABLE, StageConfig};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Parse a preset name, case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => MAX_PARTICLES,
        }
    }
}

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings from {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed settings JSON: {err}"),
            Self::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, sparks, etc.)
    pub particles: bool,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub starting_lives: u8,

    // === Ambient spawns (probability per tick) ===
    pub obstacle_spawn_chance: f32,
    pub warp_spawn_chance: f32,
    /// Chance a killed enemy drops a power-up
    pub power_up_drop_chance: f32,

    // === Stages ===
    pub stages: [StageConfig; STAGE_COUNT],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            starting_lives: STARTING_LIVES,

            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            warp_spawn_chance: WARP_SPAWN_CHANCE,
            power_up_drop_chance: POWER_UP_DROP_CHANCE,

            stages: STAGE_TABLE,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |reason: String| Err(SettingsError::Invalid(reason));

        if !(self.arena_width >= BOSS_SIZE && self.arena_height >= BOSS_SIZE) {
            return invalid(format!(
                "arena must be at least {BOSS_SIZE}x{BOSS_SIZE}, got {}x{}",
                self.arena_width, self.arena_height
            ));
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives must be at least 1".into());
        }
        for (name, p) in [
            ("obstacle_spawn_chance", self.obstacle_spawn_chance),
            ("warp_spawn_chance", self.warp_spawn_chance),
            ("power_up_drop_chance", self.power_up_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be within [0, 1], got {p}"));
            }
        }
        for (i, stage) in self.stages.iter().enumerate() {
            let n = i + 1;
            if stage.enemies_to_kill == 0 {
                return invalid(format!("stage {n}: enemies_to_kill must be at least 1"));
            }
            if !(0.0..=1.0).contains(&stage.enemy_spawn_rate) {
                return invalid(format!("stage {n}: enemy_spawn_rate must be within [0, 1]"));
            }
            if !(stage.enemy_shoot_rate > 0.0) {
                return invalid(format!("stage {n}: enemy_shoot_rate must be positive"));
            }
            if stage.enemy_health == 0 {
                return invalid(format!("stage {n}: enemy_health must be at least 1"));
            }
        }
        Ok(())
    }

    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Config row for a 1-based stage index (clamped to the table)
    pub fn stage(&self, stage: u8) -> &StageConfig {
        let idx = (stage.max(1) as usize - 1).min(STAGE_COUNT - 1);
        &self.stages[idx]
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }
}
