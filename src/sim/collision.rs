//! Collision detection and response
//!
//! All checks are strict AABB overlap. Passes run in a fixed order each tick:
//! player bullets against enemies, then the boss, enemy bullets against the
//! player, pickups, and finally obstacles. Lists are walked back to front so
//! removals never disturb the indices still to visit.

use glam::Vec2;

use super::effects::{self, Effect};
use super::pickups;
use super::rect::{Bounded, Rect};
use super::spawn;
use super::stage;
use super::state::{GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::*;

/// Run every collision pass for this tick
pub fn resolve(state: &mut GameState) {
    player_bullets_vs_enemies(state);
    player_bullets_vs_boss(state);
    enemy_bullets_vs_player(state);
    if !state.is_running() {
        return;
    }
    pickups_vs_player(state);
    obstacles(state);
}

/// Score one enemy kill at `at`
fn on_enemy_killed(state: &mut GameState, at: Vec2, by_explosive: bool) {
    state.kills += 1;
    state.combo += 1;
    state.max_combo = state.max_combo.max(state.combo);
    state.tally.total_kills += 1;
    if by_explosive {
        state.tally.explosive_kills += 1;
    }

    let bonus = (state.combo / COMBO_BONUS_STEP) as u64 * COMBO_BONUS;
    let score = ENEMY_SCORE_PER_STAGE * state.stage as u64 + bonus;
    state.score += score;
    state.events.push(GameEvent::EnemyKilled {
        score,
        combo: state.combo,
    });

    effects::spawn(state, Effect::Explosion, at);
    spawn::roll_power_up_drop(state, at);
    stage::check_stage_complete(state);
}

/// Each bullet strikes at most one enemy per tick. Ties go to the most
/// recently spawned enemy.
fn player_bullets_vs_enemies(state: &mut GameState) {
    for bi in (0..state.player_bullets.len()).rev() {
        let bullet = state.player_bullets[bi].clone();
        let Some(hit) = state.enemies.iter().rposition(|e| e.overlaps(&bullet)) else {
            continue;
        };

        let impact = state.enemies[hit].center();
        let mut struck = vec![hit];
        if bullet.explosive {
            struck.extend(
                state
                    .enemies
                    .iter()
                    .enumerate()
                    .filter(|&(i, e)| i != hit && e.center().distance(impact) < EXPLOSION_RADIUS)
                    .map(|(i, _)| i),
            );
            effects::spawn(state, Effect::Explosion, impact);
        }

        // Damage everything first, then score primary-then-ascending
        let mut dead = Vec::new();
        for &i in &struck {
            let enemy = &mut state.enemies[i];
            enemy.health = enemy.health.saturating_sub(1);
            let center = enemy.center();
            if enemy.health == 0 {
                dead.push((i, center));
            } else {
                effects::spawn(state, Effect::Damage, center);
            }
        }
        for &(_, center) in &dead {
            on_enemy_killed(state, center, bullet.explosive);
        }

        let mut doomed: Vec<usize> = dead.iter().map(|&(i, _)| i).collect();
        doomed.sort_unstable_by(|a, b| b.cmp(a));
        for i in doomed {
            state.enemies.remove(i);
        }

        if !bullet.piercing {
            state.player_bullets.remove(bi);
        }
    }
}

/// At most one boss hit per tick; bullets pass through while it flickers
fn player_bullets_vs_boss(state: &mut GameState) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    if boss.invulnerable > 0 {
        return;
    }
    let Some(bi) = state.player_bullets.iter().rposition(|b| b.overlaps(boss)) else {
        return;
    };
    let bullet = if state.player_bullets[bi].piercing {
        state.player_bullets[bi].clone()
    } else {
        state.player_bullets.remove(bi)
    };

    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.health = boss.health.saturating_sub(1);
    boss.invulnerable = BOSS_HIT_INVULNERABILITY;
    let center = boss.center();
    if let Some(phase) = stage::update_boss_phase(boss) {
        log::debug!("Boss entered phase {}", phase);
        state.events.push(GameEvent::BossPhaseChanged { phase });
    }

    if bullet.explosive {
        effects::spawn(state, Effect::Explosion, center);
    }

    if state.boss.take_if(|b| b.health == 0).is_some() {
        stage::on_boss_defeated(state, center);
    } else {
        effects::spawn(state, Effect::Damage, center);
    }
}

/// The first overlapping enemy bullet is spent against the shield or a life
fn enemy_bullets_vs_player(state: &mut GameState) {
    if state.player.invulnerable > 0 {
        return;
    }
    let player = state.player.rect();
    let Some(bi) = state.enemy_bullets.iter().rposition(|b| b.overlaps(&player)) else {
        return;
    };
    state.enemy_bullets.remove(bi);

    let center = player.center();
    if state.shield > 0 {
        state.shield = 0;
        log::debug!("Shield absorbed a hit");
        effects::spawn(state, Effect::ShieldBreak, center);
        state.events.push(GameEvent::ShieldBroken);
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.combo = 0;
    state.player.invulnerable = PLAYER_HIT_INVULNERABILITY;
    state.tally.hits_this_stage += 1;
    effects::spawn(state, Effect::Explosion, center);
    state.events.push(GameEvent::PlayerHit { lives: state.lives });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over! Final score: {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

fn pickups_vs_player(state: &mut GameState) {
    let player = state.player.rect();

    for i in (0..state.power_ups.len()).rev() {
        if !state.power_ups[i].overlaps(&player) {
            continue;
        }
        let power_up = state.power_ups.remove(i);
        pickups::apply_power_up(&mut state.player, power_up.kind);
        state.tally.power_ups_collected += 1;
        if power_up.kind == PowerUpKind::SpeedUp {
            state.tally.speed_ups_collected += 1;
        }
        log::debug!("Collected power-up: {}", power_up.kind.as_str());
        effects::spawn(state, Effect::PowerUp, power_up.center());
        state.events.push(GameEvent::PowerUpCollected(power_up.kind));
    }

    for i in (0..state.items.len()).rev() {
        if !state.items[i].overlaps(&player) {
            continue;
        }
        let item = state.items.remove(i);
        pickups::apply_item(state, item.kind);
        log::debug!("Collected item: {}", item.kind.as_str());
        effects::spawn(state, Effect::Item, item.center());
        state.events.push(GameEvent::ItemCollected(item.kind));
    }
}

/// Bounce a bullet off an obstacle: flip the dominant axis of the
/// centre-to-centre offset and nudge it outward.
pub fn deflect(bullet: Rect, pos: &mut Vec2, vel: &mut Vec2, obstacle: Rect) {
    let delta = bullet.center() - obstacle.center();
    if delta.x.abs() > delta.y.abs() {
        vel.x = -vel.x;
    } else {
        vel.y = -vel.y;
    }
    *pos += delta.normalize_or_zero() * OBSTACLE_BULLET_PUSH;
}

fn obstacles(state: &mut GameState) {
    let arena = state.arena();

    for obstacle in state.obstacles.iter().rev() {
        let block = obstacle.rect();

        let player = &mut state.player;
        if player.overlaps(&block) {
            let away = (player.center() - block.center()).normalize_or_zero();
            player.pos = Rect::new(player.pos + away * OBSTACLE_PLAYER_PUSH, player.size)
                .clamped_pos(arena);
        }

        for bullet in state.player_bullets.iter_mut() {
            let rect = bullet.rect();
            if rect.overlaps(&block) {
                deflect(rect, &mut bullet.pos, &mut bullet.vel, block);
            }
        }
        for bullet in state.enemy_bullets.iter_mut() {
            let rect = bullet.rect();
            if rect.overlaps(&block) {
                deflect(rect, &mut bullet.pos, &mut bullet.vel, block);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::state::{
        BulletPattern, Enemy, EnemyBullet, EnemyKind, Obstacle, ObstacleKind, PlayerBullet,
    };

    fn quiet_state() -> GameState {
        let settings = Settings {
            power_up_drop_chance: 0.0,
            ..Settings::default()
        };
        GameState::with_settings(7, settings)
    }

    fn bullet_at(pos: Vec2) -> PlayerBullet {
        PlayerBullet {
            pos,
            vel: Vec2::new(0.0, -8.0),
            size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            bounces: 0,
            max_bounces: 1,
            piercing: false,
            explosive: false,
        }
    }

    fn enemy_at(x: f32, y: f32, health: u32) -> Enemy {
        Enemy::new(Vec2::new(x, y), EnemyKind::Basic, 0.0, health)
    }

    fn shot_at_player(state: &GameState) -> EnemyBullet {
        EnemyBullet::new(state.player.center(), Vec2::ZERO, 4.0, BulletPattern::Basic)
    }

    #[test]
    fn test_kill_scores_and_consumes_bullet() {
        let mut state = quiet_state();
        state.enemies.push(enemy_at(100.0, 100.0, 1));
        state.player_bullets.push(bullet_at(Vec2::new(110.0, 110.0)));
        resolve(&mut state);

        assert!(state.enemies.is_empty());
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.kills, 1);
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_combo_bonus() {
        let mut state = quiet_state();
        state.stage = 2;
        state.combo = 4;
        state.enemies.push(enemy_at(100.0, 100.0, 1));
        state.player_bullets.push(bullet_at(Vec2::new(110.0, 110.0)));
        resolve(&mut state);
        // 100 * 2 + floor(5 / 5) * 50
        assert_eq!(state.score, 250);
    }

    #[test]
    fn test_piercing_bullet_survives() {
        let mut state = quiet_state();
        state.enemies.push(enemy_at(100.0, 100.0, 2));
        let mut bullet = bullet_at(Vec2::new(110.0, 110.0));
        bullet.piercing = true;
        state.player_bullets.push(bullet);
        resolve(&mut state);
        assert_eq!(state.player_bullets.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
    }

    #[test]
    fn test_newest_enemy_takes_the_hit() {
        let mut state = quiet_state();
        state.enemies.push(enemy_at(100.0, 100.0, 2));
        state.enemies.push(enemy_at(105.0, 100.0, 2));
        state.player_bullets.push(bullet_at(Vec2::new(110.0, 110.0)));
        resolve(&mut state);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.enemies[1].health, 1);
    }

    #[test]
    fn test_explosive_splash() {
        let mut state = quiet_state();
        state.enemies.push(enemy_at(100.0, 100.0, 1));
        state.enemies.push(enemy_at(140.0, 100.0, 1));
        state.enemies.push(enemy_at(400.0, 100.0, 1));
        let mut bullet = bullet_at(Vec2::new(145.0, 110.0));
        bullet.explosive = true;
        state.player_bullets.push(bullet);
        resolve(&mut state);

        // Primary at 140 plus the neighbour 40 away; the far one is untouched
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.x, 400.0);
        assert_eq!(state.kills, 2);
        assert_eq!(state.combo, 2);
        assert_eq!(state.tally.explosive_kills, 2);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_explosive_splash_radius_is_exclusive() {
        let mut state = quiet_state();
        state.enemies.push(enemy_at(100.0, 100.0, 1));
        state.enemies.push(enemy_at(160.0, 100.0, 1));
        let mut bullet = bullet_at(Vec2::new(170.0, 110.0));
        bullet.explosive = true;
        state.player_bullets.push(bullet);
        resolve(&mut state);

        // Centres exactly EXPLOSION_RADIUS apart: the neighbour is spared
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.x, 100.0);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.kills, 1);
    }

    #[test]
    fn test_unshielded_hit_resets_combo() {
        let mut state = quiet_state();
        state.combo = 7;
        state.enemy_bullets.push(shot_at_player(&state));
        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.combo, 0);
        assert_eq!(state.player.invulnerable, PLAYER_HIT_INVULNERABILITY);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_shielded_hit_keeps_combo() {
        let mut state = quiet_state();
        state.combo = 7;
        state.shield = 100;
        state.enemy_bullets.push(shot_at_player(&state));
        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.combo, 7);
        assert_eq!(state.shield, 0);
        assert!(state.events.contains(&GameEvent::ShieldBroken));
    }

    #[test]
    fn test_invulnerable_player_ignores_hits() {
        let mut state = quiet_state();
        state.player.invulnerable = 5;
        state.enemy_bullets.push(shot_at_player(&state));
        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_last_life_ends_the_run() {
        let mut state = quiet_state();
        state.lives = 1;
        state.enemy_bullets.push(shot_at_player(&state));
        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_boss_hit_grants_invulnerability() {
        let mut state = quiet_state();
        stage::spawn_boss(&mut state);
        let center = state.boss.as_ref().map(|b| b.center()).unwrap();
        state.player_bullets.push(bullet_at(center));
        state.player_bullets.push(bullet_at(center));
        resolve(&mut state);

        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.health, boss.max_health - 1);
        assert_eq!(boss.invulnerable, BOSS_HIT_INVULNERABILITY);
        // Second bullet passes through untouched
        assert_eq!(state.player_bullets.len(), 1);
    }

    #[test]
    fn test_pickup_collection() {
        let mut state = quiet_state();
        let at = state.player.center();
        state.power_ups.push(crate::sim::state::Pickup {
            pos: at,
            vel: Vec2::ZERO,
            size: Vec2::splat(POWER_UP_SIZE),
            life: POWER_UP_LIFE,
            kind: PowerUpKind::SpeedUp,
        });
        resolve(&mut state);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.power_ups.speed_up, 500);
        assert_eq!(state.tally.speed_ups_collected, 1);
    }

    #[test]
    fn test_obstacle_pushes_player_and_deflects_bullets() {
        let mut state = quiet_state();
        let player_pos = state.player.pos;
        state.obstacles.push(Obstacle {
            pos: player_pos + Vec2::new(-30.0, 0.0),
            size: Vec2::splat(40.0),
            kind: ObstacleKind::Static,
            life: OBSTACLE_LIFE,
        });
        resolve(&mut state);
        assert!(state.player.pos.x > player_pos.x);

        state.player_bullets.push(bullet_at(Vec2::new(100.0, 95.0)));
        state.obstacles.push(Obstacle {
            pos: Vec2::new(90.0, 60.0),
            size: Vec2::splat(40.0),
            kind: ObstacleKind::Static,
            life: OBSTACLE_LIFE,
        });
        resolve(&mut state);
        let bullet = &state.player_bullets[0];
        assert_eq!(bullet.vel, Vec2::new(0.0, 8.0));
        assert!(bullet.pos.y > 95.0);
    }

    #[test]
    fn test_obstacle_deflects_enemy_bullets() {
        let mut state = quiet_state();
        state.enemy_bullets.push(EnemyBullet::new(
            Vec2::new(100.0, 95.0),
            Vec2::new(0.0, -3.0),
            4.0,
            BulletPattern::Basic,
        ));
        state.obstacles.push(Obstacle {
            pos: Vec2::new(90.0, 60.0),
            size: Vec2::splat(40.0),
            kind: ObstacleKind::Static,
            life: OBSTACLE_LIFE,
        });
        resolve(&mut state);

        let bullet = &state.enemy_bullets[0];
        assert_eq!(bullet.vel, Vec2::new(0.0, 3.0));
        assert!(bullet.pos.y > 95.0);
        assert!(bullet.pos.x < 100.0);
    }
}
