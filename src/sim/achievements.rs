//! One-shot achievement latches

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// Every unlockable achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    FirstKill,
    Combo10,
    Combo50,
    BossKiller,
    HighScore,
    PerfectStage,
    Collector,
    SpeedDemon,
    ExplosionMaster,
}

impl Achievement {
    pub const ALL: [Achievement; 9] = [
        Achievement::FirstKill,
        Achievement::Combo10,
        Achievement::Combo50,
        Achievement::BossKiller,
        Achievement::HighScore,
        Achievement::PerfectStage,
        Achievement::Collector,
        Achievement::SpeedDemon,
        Achievement::ExplosionMaster,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstKill => "First Blood",
            Achievement::Combo10 => "Combo Master",
            Achievement::Combo50 => "Combo King",
            Achievement::BossKiller => "Boss Hunter",
            Achievement::HighScore => "High Roller",
            Achievement::PerfectStage => "Perfectionist",
            Achievement::Collector => "Collector",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::ExplosionMaster => "Explosion Master",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstKill => "Defeated your first enemy",
            Achievement::Combo10 => "Reached a 10 kill combo",
            Achievement::Combo50 => "Reached a 50 kill combo",
            Achievement::BossKiller => "Defeated a boss",
            Achievement::HighScore => "Scored 5000 points",
            Achievement::PerfectStage => "Cleared a stage without losing a life",
            Achievement::Collector => "Collected 10 power-ups",
            Achievement::SpeedDemon => "Collected 5 speed-ups",
            Achievement::ExplosionMaster => "Destroyed 10 enemies with explosive shots",
        }
    }

    /// Whether the state currently satisfies this achievement
    fn earned(&self, state: &GameState) -> bool {
        let tally = &state.tally;
        match self {
            Achievement::FirstKill => tally.total_kills >= 1,
            Achievement::Combo10 => state.combo >= 10,
            Achievement::Combo50 => state.combo >= 50,
            Achievement::BossKiller => {
                state.boss.is_none() && state.stage_complete() && tally.bosses_defeated > 0
            }
            Achievement::HighScore => state.score >= 5000,
            Achievement::PerfectStage => tally.flawless_stages > 0,
            Achievement::Collector => tally.power_ups_collected >= 10,
            Achievement::SpeedDemon => tally.speed_ups_collected >= 5,
            Achievement::ExplosionMaster => tally.explosive_kills >= 10,
        }
    }
}

/// Unlock anything newly earned. Each achievement fires at most once per run.
pub fn check(state: &mut GameState) {
    for achievement in Achievement::ALL {
        if state.achievements.contains(&achievement) || !achievement.earned(state) {
            continue;
        }
        log::info!("Achievement unlocked: {}", achievement.name());
        state.achievements.push(achievement);
        state.events.push(GameEvent::AchievementUnlocked {
            achievement,
            name: achievement.name(),
            description: achievement.description(),
        });
    }
}
