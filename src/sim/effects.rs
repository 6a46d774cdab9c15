//! Cosmetic particle bursts
//!
//! Particles never affect gameplay; they only consume RNG draws so runs stay
//! reproducible regardless of the configured particle cap.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};

/// Burst flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Damage,
    Explosion,
    PowerUp,
    Item,
    ShieldBreak,
    Warp,
}

struct Burst {
    count: usize,
    life: u32,
    /// Velocity spread per axis
    spread: f32,
    /// `None` picks a warm random colour per particle
    color: Option<u32>,
}

impl Effect {
    fn burst(&self) -> Burst {
        let (count, life, spread, color) = match self {
            Effect::Damage => (5, 15, 4.0, Some(0xFFAA00)),
            Effect::Explosion => (10, 30, 8.0, None),
            Effect::PowerUp => (8, 20, 6.0, Some(0x00FF00)),
            Effect::Item => (10, 25, 8.0, Some(0x0088FF)),
            Effect::ShieldBreak => (12, 30, 10.0, Some(0x00FFFF)),
            Effect::Warp => (20, 30, 15.0, Some(0xFF00FF)),
        };
        Burst {
            count,
            life,
            spread,
            color,
        }
    }
}

/// Warm flame tones between red-orange and yellow
fn flame_color(t: f32) -> u32 {
    let g = (0x44 as f32 + t * (0xDD - 0x44) as f32) as u32;
    0xFF0000 | (g << 8) | 0x33
}

fn push(state: &mut GameState, particle: Particle) {
    if state.particles.len() < state.settings.max_particles() {
        state.particles.push(particle);
    }
}

/// Emit a burst centred on `at`
pub fn spawn(state: &mut GameState, effect: Effect, at: Vec2) {
    let burst = effect.burst();
    for _ in 0..burst.count {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * burst.spread,
            (state.rng.random::<f32>() - 0.5) * burst.spread,
        );
        let color = burst
            .color
            .unwrap_or_else(|| flame_color(state.rng.random::<f32>()));
        push(
            state,
            Particle {
                pos: at,
                vel,
                life: burst.life,
                max_life: burst.life,
                color,
            },
        );
    }
}

/// Screen-wide flash for the clear bomb
pub fn spawn_clear_bomb(state: &mut GameState) {
    let arena = state.arena();
    for _ in 0..50 {
        let pos = Vec2::new(
            state.rng.random::<f32>() * arena.x,
            state.rng.random::<f32>() * arena.y,
        );
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 12.0,
            (state.rng.random::<f32>() - 0.5) * 12.0,
        );
        push(
            state,
            Particle {
                pos,
                vel,
                life: 40,
                max_life: 40,
                color: 0xFF4444,
            },
        );
    }
}

/// Drift particles and drop the dead ones
pub fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QualityPreset, Settings};

    #[test]
    fn test_burst_sizes() {
        let mut state = GameState::new(5);
        spawn(&mut state, Effect::Explosion, Vec2::new(10.0, 10.0));
        assert_eq!(state.particles.len(), 10);
        assert!(state.particles.iter().all(|p| p.pos == Vec2::new(10.0, 10.0)));
        spawn(&mut state, Effect::Damage, Vec2::ZERO);
        assert_eq!(state.particles.len(), 15);
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::with_settings(5, Settings::from_preset(QualityPreset::Low));
        spawn_clear_bomb(&mut state);
        spawn_clear_bomb(&mut state);
        assert_eq!(state.particles.len(), 64);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = GameState::new(5);
        spawn(&mut state, Effect::Damage, Vec2::ZERO);
        for _ in 0..14 {
            update_particles(&mut state);
        }
        assert_eq!(state.particles.len(), 5);
        update_particles(&mut state);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_flame_color_range() {
        assert_eq!(flame_color(0.0), 0xFF4433);
        assert_eq!(flame_color(1.0), 0xFFDD33);
    }
}
