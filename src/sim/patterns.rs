//! Enemy and boss bullet patterns
//!
//! Every generator emits from the bottom-centre of its shooter. Denser
//! variants switch on once the stage's `enemy_shoot_rate` passes a threshold.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::rect::Bounded;
use super::state::{Boss, BulletPattern, EnemyBullet, EnemyKind, GameState};
use crate::consts::*;
use crate::{direction_to, velocity_at};

/// Circular patterns double up into two rings above this rate
const DOUBLE_RING_RATE: f32 = 1.0;
/// Spirals gain a counter-rotating ring above this rate
const REVERSE_SPIRAL_RATE: f32 = 1.2;
/// Homing shots gain a three-bullet fan above this rate
const HOMING_FAN_RATE: f32 = 1.1;
/// Total width of the homing fan
const HOMING_FAN_SPREAD: f32 = PI / 6.0;

/// Bottom-centre muzzle of a shooter
fn muzzle<B: Bounded>(shooter: &B) -> Vec2 {
    let rect = shooter.rect();
    Vec2::new(rect.center().x, rect.bottom())
}

/// `count` bullets evenly spaced around the full circle, starting at `offset`
fn ring(
    out: &mut Vec<EnemyBullet>,
    origin: Vec2,
    count: u32,
    offset: f32,
    speed: f32,
    size: f32,
    pattern: BulletPattern,
) {
    for i in 0..count {
        let angle = offset + i as f32 / count as f32 * TAU;
        out.push(EnemyBullet::new(origin, velocity_at(angle, speed), size, pattern));
    }
}

pub fn basic(out: &mut Vec<EnemyBullet>, origin: Vec2, rate: f32) {
    let speed = 2.0 + rate;
    out.push(EnemyBullet {
        size: Vec2::new(3.0, 8.0),
        ..EnemyBullet::new(origin, Vec2::new(0.0, speed), 3.0, BulletPattern::Basic)
    });
}

pub fn circular(out: &mut Vec<EnemyBullet>, origin: Vec2, rate: f32) {
    let count = 8 + (rate * 2.0).floor() as u32;
    let speed = 1.5 + rate * 0.5;
    if rate > DOUBLE_RING_RATE {
        ring(out, origin, count, 0.0, speed * 0.8, 3.0, BulletPattern::Circular);
        ring(out, origin, count, 0.0, speed * 1.2, 4.0, BulletPattern::Circular);
    } else {
        ring(out, origin, count, 0.0, speed, 4.0, BulletPattern::Circular);
    }
}

/// `angle` is the shooter's rotating emitter angle
pub fn spiral(out: &mut Vec<EnemyBullet>, origin: Vec2, angle: f32, rate: f32) {
    let count = 3 + rate.floor() as u32;
    let speed = 1.2 + rate * 0.3;
    ring(out, origin, count, angle, speed, 3.0, BulletPattern::Spiral);
    if rate > REVERSE_SPIRAL_RATE {
        ring(out, origin, count, -angle, speed * 0.8, 2.0, BulletPattern::Spiral);
    }
}

/// Aimed at `target`. Nothing is fired when the target sits on the muzzle.
pub fn homing(out: &mut Vec<EnemyBullet>, origin: Vec2, target: Vec2, rate: f32) {
    let Some(dir) = direction_to(origin, target) else {
        return;
    };
    let speed = 1.8 + rate * 0.4;
    out.push(EnemyBullet::new(origin, dir * speed, 4.0, BulletPattern::Homing));

    if rate > HOMING_FAN_RATE {
        let aim = dir.y.atan2(dir.x);
        for i in 0..3 {
            let angle = aim + (i as f32 - 1.0) * HOMING_FAN_SPREAD / 2.0;
            out.push(EnemyBullet::new(
                origin,
                velocity_at(angle, speed * 0.8),
                3.0,
                BulletPattern::Homing,
            ));
        }
    }
}

/// Fire every on-screen enemy whose cooldown has run out
pub fn fire_enemy_patterns(state: &mut GameState) {
    let rate = state.stage_config().enemy_shoot_rate;
    let target = state.player.center();

    for enemy in state.enemies.iter_mut() {
        if enemy.shoot_cooldown == 0 && enemy.pos.y > 0.0 {
            let origin = muzzle(&*enemy);
            let out = &mut state.enemy_bullets;
            match enemy.kind {
                EnemyKind::Basic => basic(out, origin, rate),
                EnemyKind::Circular => circular(out, origin, rate),
                EnemyKind::Spiral => spiral(out, origin, enemy.angle, rate),
                EnemyKind::Homing => homing(out, origin, target, rate),
            }
            let roll = state.rng.random::<f32>();
            enemy.shoot_cooldown = ((60.0 + roll * 60.0) / rate).floor() as u32;
        }
        enemy.shoot_cooldown = enemy.shoot_cooldown.saturating_sub(1);
    }
}

fn boss_volley(boss: &mut Boss, out: &mut Vec<EnemyBullet>) {
    let origin = muzzle(&*boss);
    match boss.phase {
        1 => {
            for i in 0..3 {
                let angle = (i as f32 - 1.0) * 0.3;
                let vel = Vec2::new(angle.sin(), angle.cos()) * 3.0;
                out.push(EnemyBullet::new(origin, vel, 6.0, BulletPattern::Boss));
            }
        }
        2 => ring(out, origin, 12, 0.0, 2.5, 5.0, BulletPattern::Boss),
        _ => {
            boss.angle += BOSS_SPIRAL_STEP;
            ring(out, origin, 4, boss.angle, 2.0, 4.0, BulletPattern::Boss);
        }
    }
}

/// Fire the boss volley for its current phase when its cooldown allows
pub fn fire_boss_pattern(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    if boss.shoot_cooldown == 0 {
        boss_volley(boss, &mut state.enemy_bullets);
        boss.shoot_cooldown = 30 + (state.rng.random::<f32>() * 30.0).floor() as u32;
    }
    boss.shoot_cooldown = boss.shoot_cooldown.saturating_sub(1);
}
