//! Power-up timers and special item effects

use glam::Vec2;
use rand::Rng;

use super::effects::{self, Effect};
use super::rect::Bounded;
use super::state::{GameState, ItemKind, Player, PowerUpKind};
use crate::consts::*;

/// Count down the timed upgrades and derive this tick's speed and cooldown
pub fn tick_power_ups(player: &mut Player) {
    let timers = &mut player.power_ups;

    player.speed = if timers.speed_up > 0 {
        player.base_speed * 1.5
    } else {
        player.base_speed
    };
    player.effective_shoot_cooldown = if timers.rapid_fire > 0 {
        player.base_shoot_cooldown.saturating_sub(5).max(1)
    } else {
        player.base_shoot_cooldown
    };

    for timer in [
        &mut timers.rapid_fire,
        &mut timers.speed_up,
        &mut timers.piercing,
        &mut timers.explosive,
        &mut timers.multi_shot,
    ] {
        *timer = timer.saturating_sub(1);
    }
}

pub fn apply_power_up(player: &mut Player, kind: PowerUpKind) {
    let timers = &mut player.power_ups;
    let duration = kind.duration();
    match kind {
        PowerUpKind::RapidFire => timers.rapid_fire = duration,
        PowerUpKind::MaxBounces => {
            timers.max_bounces = (timers.max_bounces + 1).min(MAX_BOUNCES_CAP);
        }
        PowerUpKind::Piercing => timers.piercing = duration,
        PowerUpKind::Explosive => timers.explosive = duration,
        PowerUpKind::SpeedUp => timers.speed_up = duration,
        PowerUpKind::MultiShot => timers.multi_shot = duration,
    }
}

/// Apply a collected special item
pub fn apply_item(state: &mut GameState, kind: ItemKind) {
    match kind {
        ItemKind::Shield => state.shield = kind.duration(),
        ItemKind::SlowMotion => {
            state.slow_motion = true;
            state.slow_motion_ms = kind.duration() as f32 * FRAME_MS;
        }
        ItemKind::ClearBomb => {
            state.enemy_bullets.clear();
            effects::spawn_clear_bomb(state);
        }
        ItemKind::Warp => warp_player(state),
    }
}

/// Teleport the player to a random spot inside the arena
pub fn warp_player(state: &mut GameState) {
    let room = (state.arena() - state.player.size).max(Vec2::ZERO);
    state.player.pos = Vec2::new(
        state.rng.random::<f32>() * room.x,
        state.rng.random::<f32>() * room.y,
    );
    let center = state.player.center();
    effects::spawn(state, Effect::Warp, center);
}
