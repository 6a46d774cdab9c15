//! Player movement and shooting

use glam::Vec2;

use super::pickups;
use super::rect::{Bounded, Rect};
use super::state::{GameState, PlayerBullet};
use super::tick::TickInput;
use crate::consts::*;

/// Movement, firing and per-tick player timers
pub fn update_player(state: &mut GameState, input: &TickInput) {
    pickups::tick_power_ups(&mut state.player);

    let step = if state.slow_motion {
        state.player.speed * 0.5
    } else {
        state.player.speed
    };
    let mut dir = Vec2::ZERO;
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    let moved = Rect::new(state.player.pos + dir * step, state.player.size);
    state.player.pos = moved.clamped_pos(state.arena());

    if input.fire && state.player.shoot_cooldown == 0 {
        fire(state);
        state.player.shoot_cooldown = state.player.effective_shoot_cooldown;
    }

    let player = &mut state.player;
    player.shoot_cooldown = player.shoot_cooldown.saturating_sub(1);
    player.invulnerable = player.invulnerable.saturating_sub(1);
    state.shield = state.shield.saturating_sub(1);
}

/// Spawn the main shot plus the multi-shot pair when active
pub fn fire(state: &mut GameState) {
    let player = &state.player;
    let timers = &player.power_ups;
    let origin = Vec2::new(player.center().x - PLAYER_BULLET_WIDTH / 2.0, player.pos.y);
    let shot = |vel: Vec2| PlayerBullet {
        pos: origin,
        vel,
        size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
        bounces: 0,
        max_bounces: timers.max_bounces,
        piercing: timers.piercing > 0,
        explosive: timers.explosive > 0,
    };

    let mut volley = vec![shot(Vec2::new(0.0, -PLAYER_BULLET_SPEED))];
    if timers.multi_shot > 0 {
        for angle in [-MULTI_SHOT_ANGLE, MULTI_SHOT_ANGLE] {
            volley.push(shot(Vec2::new(angle.sin(), -angle.cos()) * PLAYER_BULLET_SPEED));
        }
    }
    state.player_bullets.extend(volley);
}
