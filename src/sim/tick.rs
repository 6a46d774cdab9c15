//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::state::GameState;
use super::{achievements, collision, effects, motion, patterns, player, spawn, stage};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire (held)
    pub fire: bool,
    /// Start a new run; only honoured once the current one has ended
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
///
/// `dt_ms` is the wall-clock length of the frame and only drains the
/// stage-advance and slow-motion countdowns. Everything else moves in
/// whole ticks.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.events.clear();

    if !state.is_running() {
        if input.restart {
            state.restart();
        }
        return;
    }

    state.time_ticks += 1;

    stage::update_timers(state, dt_ms);
    if !state.is_running() {
        return;
    }

    player::update_player(state, input);
    motion::update_player_bullets(state);
    motion::update_enemy_bullets(state);

    spawn::spawn_enemy(state);
    motion::update_enemies(state);
    patterns::fire_enemy_patterns(state);

    stage::update_boss(state);
    patterns::fire_boss_pattern(state);

    motion::update_pickups(state);
    motion::update_obstacles(state);
    spawn::spawn_obstacle(state);
    spawn::spawn_warp_point(state);

    motion::apply_gravity(state);
    effects::update_particles(state);

    collision::resolve(state);
    achievements::check(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::GamePhase;

    #[test]
    fn test_tick_advances_time() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.time_ticks, 1);
        assert!(state.is_running());
    }

    #[test]
    fn test_stopped_state_waits_for_restart() {
        let mut state = GameState::new(12345);
        state.phase = GamePhase::GameOver;
        state.score = 900;

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.score, 900);

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = GameState::new(12345);
        state.score = 900;
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.score, 900);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                fire: true,
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                up: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..3000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, FRAME_MS);
            tick(&mut state2, input, FRAME_MS);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.enemy_bullets.len(), state2.enemy_bullets.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.phase, state2.phase);
    }
}
