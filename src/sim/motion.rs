//! Entity integration: wall bounce, homing, gravity and culling
//!
//! All velocities are in units per tick.

use glam::Vec2;

use super::rect::Bounded;
use super::state::{
    BulletPattern, EnemyBullet, EnemyKind, GameState, ObstacleKind, Pickup, PlayerBullet,
};
use crate::consts::*;
use crate::{clamp_speed, direction_to};

/// Advance a player bullet one tick. Returns `false` once it should be
/// removed (an edge contact with no bounces left).
pub fn step_player_bullet(bullet: &mut PlayerBullet, arena: Vec2) -> bool {
    bullet.pos += bullet.vel;
    let max = (arena - bullet.size).max(Vec2::ZERO);

    if bullet.pos.x <= 0.0 || bullet.pos.x >= max.x {
        if bullet.bounces >= bullet.max_bounces {
            return false;
        }
        bullet.vel.x = -bullet.vel.x;
        bullet.bounces += 1;
        bullet.pos.x = bullet.pos.x.clamp(0.0, max.x);
    }

    if bullet.pos.y <= 0.0 || bullet.pos.y >= max.y {
        if bullet.bounces >= bullet.max_bounces {
            return false;
        }
        bullet.vel.y = -bullet.vel.y;
        bullet.bounces += 1;
        bullet.pos.y = bullet.pos.y.clamp(0.0, max.y);
    }

    true
}

pub fn update_player_bullets(state: &mut GameState) {
    let arena = state.arena();
    state
        .player_bullets
        .retain_mut(|bullet| step_player_bullet(bullet, arena));
}

/// Nudge a homing bullet toward `target`, capped at 1.5x its nominal speed
pub fn steer_homing(bullet: &mut EnemyBullet, target: Vec2) {
    if let Some(dir) = direction_to(bullet.center(), target) {
        bullet.vel += dir * HOMING_STRENGTH;
        bullet.vel = clamp_speed(bullet.vel, bullet.speed * HOMING_MAX_SPEED_FACTOR);
    }
}

/// True while the bullet is within `CULL_MARGIN` of the arena
pub fn in_cull_bounds(pos: Vec2, arena: Vec2) -> bool {
    pos.x >= -CULL_MARGIN
        && pos.x <= arena.x + CULL_MARGIN
        && pos.y >= -CULL_MARGIN
        && pos.y <= arena.y + CULL_MARGIN
}

pub fn update_enemy_bullets(state: &mut GameState) {
    let arena = state.arena();
    let target = state.player.center();
    state.enemy_bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel;
        if bullet.pattern == BulletPattern::Homing {
            steer_homing(bullet, target);
        }
        in_cull_bounds(bullet.pos, arena)
    });
}

/// March enemies down the screen and drop those that left it
pub fn update_enemies(state: &mut GameState) {
    let floor = state.arena().y;
    for enemy in state.enemies.iter_mut() {
        enemy.pos.y += enemy.speed;
        if enemy.kind == EnemyKind::Spiral {
            enemy.angle += SPIRAL_ANGLE_STEP;
        }
    }
    state.enemies.retain(|e| e.pos.y <= floor);
}

fn step_pickups<K>(pickups: &mut Vec<Pickup<K>>, floor: f32) {
    pickups.retain_mut(|pickup| {
        pickup.pos += pickup.vel;
        pickup.life = pickup.life.saturating_sub(1);
        pickup.life > 0 && pickup.pos.y <= floor
    });
}

/// Drift power-ups and items, expiring them by age or when they fall out
pub fn update_pickups(state: &mut GameState) {
    let floor = state.arena().y;
    step_pickups(&mut state.power_ups, floor);
    step_pickups(&mut state.items, floor);
}

/// Move drifting obstacles (reflecting at the walls) and age all of them
pub fn update_obstacles(state: &mut GameState) {
    let arena = state.arena();
    for obstacle in state.obstacles.iter_mut() {
        if let ObstacleKind::Moving { vel } = &mut obstacle.kind {
            obstacle.pos += *vel;
            let max = (arena - obstacle.size).max(Vec2::ZERO);
            if obstacle.pos.x <= 0.0 {
                vel.x = vel.x.abs();
            } else if obstacle.pos.x >= max.x {
                vel.x = -vel.x.abs();
            }
            if obstacle.pos.y <= 0.0 {
                vel.y = vel.y.abs();
            } else if obstacle.pos.y >= max.y {
                vel.y = -vel.y.abs();
            }
            obstacle.pos = obstacle.pos.clamp(Vec2::ZERO, max);
        }
        obstacle.life = obstacle.life.saturating_sub(1);
    }
    state.obstacles.retain(|o| o.life > 0);
}

/// Weak downward pull on every bullet. Homing bullets are re-capped so the
/// pull never pushes them past their speed limit.
pub fn apply_gravity(state: &mut GameState) {
    for bullet in state.player_bullets.iter_mut() {
        bullet.vel.y += GRAVITY;
    }
    for bullet in state.enemy_bullets.iter_mut() {
        bullet.vel.y += GRAVITY * ENEMY_GRAVITY_SCALE;
        if bullet.pattern == BulletPattern::Homing {
            bullet.vel = clamp_speed(bullet.vel, bullet.speed * HOMING_MAX_SPEED_FACTOR);
        }
    }
}
