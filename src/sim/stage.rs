//! Stage progression and boss lifecycle
//!
//! `Playing` → quota met → `StageComplete` (or `BossFight` on boss stages,
//! then `StageComplete` once the boss falls) → next stage or `AllClear`.
//! The advance delay and slow motion are wall-clock countdowns drained at the
//! top of every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{self, Effect};
use super::spawn;
use super::state::{Boss, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Number of stages in a run
pub const STAGE_COUNT: usize = 5;

/// Per-stage tuning row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Kills needed to clear (or summon the boss)
    pub enemies_to_kill: u32,
    /// Enemy spawn probability per tick
    pub enemy_spawn_rate: f32,
    pub enemy_speed: f32,
    pub enemy_health: u32,
    /// Fire-rate multiplier; also gates the denser pattern variants
    pub enemy_shoot_rate: f32,
    pub has_boss: bool,
}

const fn row(
    enemies_to_kill: u32,
    enemy_spawn_rate: f32,
    enemy_speed: f32,
    enemy_health: u32,
    enemy_shoot_rate: f32,
    has_boss: bool,
) -> StageConfig {
    StageConfig {
        enemies_to_kill,
        enemy_spawn_rate,
        enemy_speed,
        enemy_health,
        enemy_shoot_rate,
        has_boss,
    }
}

/// Stock stage table
pub const STAGE_TABLE: [StageConfig; STAGE_COUNT] = [
    row(5, 0.02, 1.5, 1, 0.8, false),
    row(8, 0.03, 2.0, 1, 0.9, false),
    row(12, 0.04, 2.5, 2, 1.0, true),
    row(15, 0.05, 3.0, 2, 1.1, true),
    row(20, 0.06, 3.5, 3, 1.2, true),
];

/// Run after every kill: clears the stage or summons the boss
pub fn check_stage_complete(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let config = *state.stage_config();
    if state.kills < config.enemies_to_kill {
        return;
    }

    if config.has_boss {
        if state.boss.is_none() {
            spawn_boss(state);
        }
    } else {
        complete_stage(state, STAGE_CLEAR_DELAY_MS);
    }
}

/// Put the stage boss on the field
pub fn spawn_boss(state: &mut GameState) {
    let boss = Boss::new(state.stage, state.arena());
    log::info!("Stage {} boss spawned with {} hp", state.stage, boss.health);
    state.events.push(GameEvent::BossSpawned {
        stage: state.stage,
        health: boss.health,
    });
    state.boss = Some(boss);
    state.phase = GamePhase::BossFight;
}

/// Enter `StageComplete` and start the advance countdown
pub fn complete_stage(state: &mut GameState, delay_ms: f32) {
    log::info!("Stage {} complete (score {})", state.stage, state.score);
    state.phase = GamePhase::StageComplete {
        remaining_ms: delay_ms,
    };
    state.tally.stages_cleared += 1;
    if state.tally.hits_this_stage == 0 {
        state.tally.flawless_stages += 1;
    }
    state.events.push(GameEvent::StageCleared { stage: state.stage });
}

/// Sway the boss and run down its timers
pub fn update_boss(state: &mut GameState) {
    let arena = state.arena();
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    boss.move_phase += BOSS_SWAY_STEP * boss.speed;
    boss.pos.x = arena.x / 2.0 - boss.size.x / 2.0 + boss.move_phase.sin() * BOSS_SWAY_AMPLITUDE;

    boss.invulnerable = boss.invulnerable.saturating_sub(1);
}

/// Raise the boss phase to match its health ratio. Returns the new phase when
/// it changed.
pub fn update_boss_phase(boss: &mut Boss) -> Option<u8> {
    let before = boss.phase;
    loop {
        let ratio = boss.health_ratio();
        let next = match boss.phase {
            1 if ratio <= 0.5 => 2,
            2 if ratio <= 0.2 => 3,
            _ => break,
        };
        boss.phase = next;
        boss.speed *= BOSS_PHASE_SPEEDUP;
    }
    (boss.phase != before).then_some(boss.phase)
}

/// Score and clean up after the boss falls. `center` is captured before the
/// boss is removed.
pub fn on_boss_defeated(state: &mut GameState, center: Vec2) {
    state.combo += 1;
    state.max_combo = state.max_combo.max(state.combo);
    state.score += BOSS_SCORE_PER_STAGE * state.stage as u64;
    state.tally.bosses_defeated += 1;

    effects::spawn(state, Effect::Explosion, center);
    spawn::drop_special_item(state, center);

    log::info!("Stage {} boss defeated", state.stage);
    state.events.push(GameEvent::BossDefeated { stage: state.stage });
    complete_stage(state, BOSS_CLEAR_DELAY_MS);
}

/// Drain the wall-clock countdowns by one frame
pub fn update_timers(state: &mut GameState, dt_ms: f32) {
    if state.slow_motion {
        state.slow_motion_ms -= dt_ms;
        if state.slow_motion_ms <= 0.0 {
            state.slow_motion = false;
            state.slow_motion_ms = 0.0;
            log::debug!("Slow motion ended");
        }
    }

    if let GamePhase::StageComplete { remaining_ms } = &mut state.phase {
        *remaining_ms -= dt_ms;
        if *remaining_ms <= 0.0 {
            advance_stage(state);
        }
    }
}

/// Move to the next stage, or finish the run after the last one
pub fn advance_stage(state: &mut GameState) {
    if (state.stage as usize) < STAGE_COUNT {
        state.stage += 1;
        state.kills = 0;
        state.phase = GamePhase::Playing;
        state.enemies.clear();
        state.player_bullets.clear();
        state.enemy_bullets.clear();
        state.particles.clear();

        let arena = state.arena();
        state.player.recenter(arena);
        state.player.invulnerable = PLAYER_HIT_INVULNERABILITY;
        state.tally.hits_this_stage = 0;

        log::info!("Stage {} start", state.stage);
        state.events.push(GameEvent::StageStarted { stage: state.stage });
    } else {
        state.phase = GamePhase::AllClear;
        log::info!("All stages clear! Final score: {}", state.score);
        state.events.push(GameEvent::AllClear { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert!(STAGE_TABLE.iter().take(2).all(|s| !s.has_boss));
        assert!(STAGE_TABLE.iter().skip(2).all(|s| s.has_boss));
        assert_eq!(STAGE_TABLE[2].enemies_to_kill, 12);
    }

    #[test]
    fn test_quota_on_plain_stage_completes() {
        let mut state = GameState::new(1);
        state.kills = 5;
        check_stage_complete(&mut state);
        assert!(state.stage_complete());
        assert!(state.boss.is_none());
    }

    #[test]
    fn test_quota_on_boss_stage_spawns_once() {
        let mut state = GameState::new(1);
        state.stage = 3;
        state.kills = 12;
        check_stage_complete(&mut state);
        assert_eq!(state.phase, GamePhase::BossFight);
        assert_eq!(state.boss.as_ref().map(|b| b.health), Some(25));

        // Further kills during the fight never stack a second boss
        state.boss.as_mut().unwrap().health = 3;
        state.kills = 13;
        check_stage_complete(&mut state);
        assert_eq!(state.boss.as_ref().map(|b| b.health), Some(3));
    }

    #[test]
    fn test_boss_phases_are_monotonic() {
        let mut boss = Boss::new(1, Vec2::new(800.0, 600.0));
        assert_eq!(boss.max_health, 15);

        boss.health = 8;
        assert_eq!(update_boss_phase(&mut boss), None);
        boss.health = 7;
        assert_eq!(update_boss_phase(&mut boss), Some(2));
        assert!((boss.speed - 1.5).abs() < 1e-6);
        boss.health = 3;
        assert_eq!(update_boss_phase(&mut boss), Some(3));
        assert!((boss.speed - 2.25).abs() < 1e-6);
        boss.health = 15;
        assert_eq!(update_boss_phase(&mut boss), None);
        assert_eq!(boss.phase, 3);
    }

    #[test]
    fn test_big_drop_passes_through_every_phase() {
        let mut boss = Boss::new(1, Vec2::new(800.0, 600.0));
        boss.health = 1;
        assert_eq!(update_boss_phase(&mut boss), Some(3));
        assert!((boss.speed - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_slow_motion_expires_on_wall_clock() {
        let mut state = GameState::new(1);
        state.slow_motion = true;
        state.slow_motion_ms = 40.0;
        update_timers(&mut state, 16.0);
        update_timers(&mut state, 16.0);
        assert!(state.slow_motion);
        update_timers(&mut state, 16.0);
        assert!(!state.slow_motion);
    }

    #[test]
    fn test_final_stage_ends_run() {
        let mut state = GameState::new(1);
        state.stage = 5;
        state.phase = GamePhase::StageComplete { remaining_ms: 10.0 };
        update_timers(&mut state, 16.0);
        assert_eq!(state.phase, GamePhase::AllClear);
        assert!(!state.is_running());
        assert!(matches!(state.events.last(), Some(GameEvent::AllClear { .. })));
    }
}
