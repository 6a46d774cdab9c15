//! Property tests for motion bounds, homing limits and determinism

use bounce_barrage::consts::*;
use bounce_barrage::pilot::DemoPilot;
use bounce_barrage::sim::motion::{self, steer_homing, step_player_bullet};
use bounce_barrage::sim::{BulletPattern, EnemyBullet, GameState, PlayerBullet, tick};
use glam::Vec2;
use proptest::prelude::*;

const ARENA: Vec2 = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);

fn arb_vel(max: f32) -> impl Strategy<Value = Vec2> {
    (-max..max, -max..max).prop_map(|(x, y)| Vec2::new(x, y))
}

fn arb_pos() -> impl Strategy<Value = Vec2> {
    (0.0f32..ARENA_WIDTH - PLAYER_BULLET_WIDTH, 0.0f32..ARENA_HEIGHT - PLAYER_BULLET_HEIGHT)
        .prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn player_bullets_stay_in_bounds(
        pos in arb_pos(),
        vel in arb_vel(12.0),
        max_bounces in 1u32..=MAX_BOUNCES_CAP,
    ) {
        let mut bullet = PlayerBullet {
            pos,
            vel,
            size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            bounces: 0,
            max_bounces,
            piercing: false,
            explosive: false,
        };
        let max = ARENA - bullet.size;
        for _ in 0..500 {
            if !step_player_bullet(&mut bullet, ARENA) {
                break;
            }
            prop_assert!(bullet.pos.cmpge(Vec2::ZERO).all());
            prop_assert!(bullet.pos.cmple(max).all());
            prop_assert!(bullet.bounces <= bullet.max_bounces);
        }
    }

    #[test]
    fn homing_never_exceeds_its_cap(
        start in arb_pos(),
        vel in arb_vel(3.0),
        target in arb_pos(),
    ) {
        prop_assume!(vel.length() > 0.1);
        let mut bullet = EnemyBullet::new(start, vel, 4.0, BulletPattern::Homing);
        let cap = bullet.speed * HOMING_MAX_SPEED_FACTOR + 1e-3;
        for _ in 0..300 {
            bullet.pos += bullet.vel;
            steer_homing(&mut bullet, target);
            prop_assert!(bullet.vel.length() <= cap);
        }
    }

    #[test]
    fn enemy_bullets_are_culled_outside_the_margin(
        bullets in prop::collection::vec((arb_pos(), arb_vel(6.0)), 1..40),
        steps in 1usize..200,
    ) {
        let mut state = GameState::new(1);
        state.enemy_bullets = bullets
            .into_iter()
            .map(|(pos, vel)| EnemyBullet::new(pos, vel, 4.0, BulletPattern::Circular))
            .collect();
        for _ in 0..steps {
            motion::update_enemy_bullets(&mut state);
            for bullet in &state.enemy_bullets {
                prop_assert!(motion::in_cull_bounds(bullet.pos, ARENA));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn same_seed_same_run(seed in any::<u64>()) {
        let pilot = DemoPilot::default();
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        for _ in 0..900 {
            let input = pilot.next_input(&a);
            prop_assert_eq!(input, pilot.next_input(&b));
            tick(&mut a, &input, FRAME_MS);
            tick(&mut b, &input, FRAME_MS);
        }
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.stage, b.stage);
        prop_assert_eq!(a.lives, b.lives);
        prop_assert_eq!(a.player.pos, b.player.pos);
        prop_assert_eq!(a.enemies.len(), b.enemies.len());
        prop_assert_eq!(a.enemy_bullets.len(), b.enemy_bullets.len());
        prop_assert_eq!(a.phase, b.phase);
    }
}
