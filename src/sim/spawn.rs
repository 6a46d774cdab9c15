//! Probabilistic spawning of enemies, obstacles and pickups

use glam::Vec2;
use rand::Rng;

use super::state::{
    Enemy, EnemyKind, GameState, ItemKind, Obstacle, ObstacleKind, Pickup, PowerUpKind,
};
use crate::consts::*;

/// Cumulative enemy-kind weights per stage
pub fn enemy_weights(stage: u8) -> &'static [(EnemyKind, f32)] {
    use EnemyKind::*;
    match stage {
        1 => &[(Basic, 1.0)],
        2 => &[(Basic, 0.7), (Circular, 0.3)],
        3 => &[(Basic, 0.4), (Circular, 0.4), (Spiral, 0.2)],
        4 => &[(Basic, 0.2), (Circular, 0.3), (Spiral, 0.3), (Homing, 0.2)],
        _ => &[(Basic, 0.1), (Circular, 0.25), (Spiral, 0.35), (Homing, 0.3)],
    }
}

/// Map a uniform roll in `[0, 1)` onto the stage's weighted table
pub fn pick_enemy_kind(stage: u8, roll: f32) -> EnemyKind {
    let weights = enemy_weights(stage);
    let mut acc = 0.0;
    for &(kind, weight) in weights {
        acc += weight;
        if roll < acc {
            return kind;
        }
    }
    // Rounding can leave the last bucket a hair short of 1.0
    weights.last().map(|&(kind, _)| kind).unwrap_or(EnemyKind::Basic)
}

/// Roll for a new enemy this tick
pub fn spawn_enemy(state: &mut GameState) {
    if state.stage_complete() {
        return;
    }
    let config = *state.stage_config();
    if state.rng.random::<f32>() >= config.enemy_spawn_rate {
        return;
    }

    let kind = pick_enemy_kind(state.stage, state.rng.random());
    let x = state.rng.random::<f32>() * (state.arena().x - ENEMY_SIZE);
    let speed = config.enemy_speed + state.rng.random::<f32>() * ENEMY_SPEED_JITTER;
    state.enemies.push(Enemy::new(
        Vec2::new(x, ENEMY_SPAWN_Y),
        kind,
        speed,
        config.enemy_health,
    ));
}

/// Roll for a new obstacle this tick
pub fn spawn_obstacle(state: &mut GameState) {
    if state.rng.random::<f32>() >= state.settings.obstacle_spawn_chance {
        return;
    }

    let arena = state.arena();
    let moving = state.rng.random_bool(0.5);
    let pos = Vec2::new(
        state.rng.random::<f32>() * (arena.x - 40.0),
        state.rng.random::<f32>() * (arena.y - 40.0),
    );
    let size = Vec2::new(
        OBSTACLE_MIN_SIZE + state.rng.random::<f32>() * OBSTACLE_SIZE_JITTER,
        OBSTACLE_MIN_SIZE + state.rng.random::<f32>() * OBSTACLE_SIZE_JITTER,
    );
    let kind = if moving {
        ObstacleKind::Moving {
            vel: Vec2::new(
                (state.rng.random::<f32>() - 0.5) * 2.0,
                (state.rng.random::<f32>() - 0.5) * 2.0,
            ),
        }
    } else {
        ObstacleKind::Static
    };

    state.obstacles.push(Obstacle {
        pos,
        size,
        kind,
        life: OBSTACLE_LIFE,
    });
}

/// Roll for an ambient warp point this tick
pub fn spawn_warp_point(state: &mut GameState) {
    if state.rng.random::<f32>() >= state.settings.warp_spawn_chance {
        return;
    }

    let arena = state.arena();
    let pos = Vec2::new(
        state.rng.random::<f32>() * (arena.x - ITEM_SIZE),
        state.rng.random::<f32>() * (arena.y - ITEM_SIZE),
    );
    state.items.push(Pickup {
        pos,
        vel: Vec2::ZERO,
        size: Vec2::splat(ITEM_SIZE),
        life: WARP_LIFE,
        kind: ItemKind::Warp,
    });
}

/// Maybe drop a random power-up where an enemy died
pub fn roll_power_up_drop(state: &mut GameState, at: Vec2) {
    if state.rng.random::<f32>() >= state.settings.power_up_drop_chance {
        return;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let vel = Vec2::new((state.rng.random::<f32>() - 0.5) * 2.0, 1.0);
    state.power_ups.push(Pickup {
        pos: at - Vec2::splat(POWER_UP_SIZE / 2.0),
        vel,
        size: Vec2::splat(POWER_UP_SIZE),
        life: POWER_UP_LIFE,
        kind,
    });
}

/// Guaranteed special item from a defeated boss
pub fn drop_special_item(state: &mut GameState, at: Vec2) {
    let kind = ItemKind::DROPS[state.rng.random_range(0..ItemKind::DROPS.len())];
    let vel = Vec2::new(state.rng.random::<f32>() - 0.5, 0.5);
    state.items.push(Pickup {
        pos: at - Vec2::splat(ITEM_SIZE / 2.0),
        vel,
        size: Vec2::splat(ITEM_SIZE),
        life: ITEM_LIFE,
        kind,
    });
}
