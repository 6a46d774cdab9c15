//! Scripted input for headless and demo runs
//!
//! The pilot reads the public state and produces the same `TickInput` a
//! player would, so a piloted run is exactly as deterministic as the seed.

use glam::Vec2;

use crate::consts::PLAYER_SPAWN_OFFSET;
use crate::sim::{Bounded, GameState, TickInput};

/// Keeps firing, dodges incoming fire, and otherwise chases pickups or lines
/// up under the nearest enemy
#[derive(Debug, Clone)]
pub struct DemoPilot {
    /// Horizontal half-width of the danger lane above the ship
    pub lane: f32,
    /// How far above the ship incoming bullets are considered
    pub lookahead: f32,
    /// Dead zone for horizontal tracking
    pub slack: f32,
}

impl Default for DemoPilot {
    fn default() -> Self {
        Self {
            lane: 30.0,
            lookahead: 140.0,
            slack: 4.0,
        }
    }
}

impl DemoPilot {
    pub fn next_input(&self, state: &GameState) -> TickInput {
        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };
        if !state.is_running() {
            return input;
        }

        let me = state.player.center();
        let arena = state.arena();

        // Closest bullet falling into our lane
        let threat = state
            .enemy_bullets
            .iter()
            .map(|b| b.center())
            .filter(|c| (c.x - me.x).abs() < self.lane && c.y < me.y && me.y - c.y < self.lookahead)
            .min_by(|a, b| {
                (me.y - a.y)
                    .partial_cmp(&(me.y - b.y))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(bullet) = threat {
            let go_left = if me.x < self.lane * 2.0 {
                false
            } else if me.x > arena.x - self.lane * 2.0 {
                true
            } else {
                bullet.x >= me.x
            };
            input.left = go_left;
            input.right = !go_left;
            return input;
        }

        let target_x = state
            .power_ups
            .iter()
            .map(|p| p.center())
            .chain(state.items.iter().map(|i| i.center()))
            .chain(state.enemies.iter().map(|e| e.center()))
            .chain(state.boss.iter().map(|b| b.center()))
            .min_by(|a, b| {
                a.distance_squared(me)
                    .partial_cmp(&b.distance_squared(me))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|t| t.x);

        if let Some(x) = target_x {
            input.left = x < me.x - self.slack;
            input.right = x > me.x + self.slack;
        }

        // Drift back to the home row
        let home = Vec2::new(me.x, arena.y - PLAYER_SPAWN_OFFSET + state.player.size.y / 2.0);
        input.down = me.y < home.y - self.slack;
        input.up = me.y > home.y + self.slack;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BulletPattern, Enemy, EnemyBullet, EnemyKind};

    #[test]
    fn test_always_fires() {
        let pilot = DemoPilot::default();
        let state = GameState::new(1);
        assert!(pilot.next_input(&state).fire);
    }

    #[test]
    fn test_dodges_bullet_in_lane() {
        let pilot = DemoPilot::default();
        let mut state = GameState::new(1);
        let me = state.player.center();
        state.enemy_bullets.push(EnemyBullet::new(
            me + Vec2::new(5.0, -60.0),
            Vec2::new(0.0, 2.0),
            4.0,
            BulletPattern::Basic,
        ));
        let input = pilot.next_input(&state);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_lines_up_under_enemy() {
        let pilot = DemoPilot::default();
        let mut state = GameState::new(1);
        state
            .enemies
            .push(Enemy::new(Vec2::new(100.0, 100.0), EnemyKind::Basic, 1.0, 1));
        let input = pilot.next_input(&state);
        assert!(input.left);
        assert!(!input.up && !input.down);
    }
}
