//! Falling snow: slow vertical fall with a sine-wave sideways wobble.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

use super::pool::{Recycled, RecyclingPool};
use crate::config::SnowConfig;
use crate::shared::Mood;

/// Height of the band above the top edge where recycled flakes re-enter.
pub const SPAWN_BAND: f32 = 20.0;

/// Horizontal slack before a drifting flake counts as gone.
const SIDE_MARGIN: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snowflake {
    /// Centre of the wobble; the drawn x is `origin_x + sin(phase) * amplitude`.
    pub origin_x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    /// Units per second; y grows downward.
    pub velocity: Vec2,
    pub wobble_phase: f32,
    /// Radians per second.
    pub wobble_speed: f32,
    pub wobble_amplitude: f32,
}

impl Snowflake {
    pub fn position(&self) -> Vec2 {
        Vec2::new(
            self.origin_x + self.wobble_phase.sin() * self.wobble_amplitude,
            self.y,
        )
    }
}

fn sample(rng: &mut StdRng, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

impl Recycled for Snowflake {
    type Params = SnowConfig;

    fn spawn(rng: &mut StdRng, params: &SnowConfig, bounds: Vec2, scatter: bool) -> Self {
        let y = if scatter {
            sample(rng, (0.0, bounds.y))
        } else {
            sample(rng, (-SPAWN_BAND, 0.0))
        };
        Snowflake {
            origin_x: sample(rng, (0.0, bounds.x)),
            y,
            size: sample(rng, params.size_range),
            opacity: sample(rng, params.opacity_range),
            velocity: Vec2::new(rng.gen_range(-3.0..3.0), sample(rng, params.speed_range)),
            wobble_phase: rng.gen_range(0.0..TAU),
            wobble_speed: sample(rng, params.wobble_speed_range),
            wobble_amplitude: sample(rng, params.wobble_amplitude_range),
        }
    }

    fn advance(&mut self, dt: f32) {
        self.origin_x += self.velocity.x * dt;
        self.y += self.velocity.y * dt;
        self.wobble_phase = (self.wobble_phase + self.wobble_speed * dt) % TAU;
    }

    fn is_out_of_bounds(&self, bounds: Vec2) -> bool {
        let x = self.position().x;
        self.y > bounds.y + self.size || x < -SIDE_MARGIN || x > bounds.x + SIDE_MARGIN
    }
}

pub type SnowPool = RecyclingPool<Snowflake>;

/// Pool size for a mood: `floor(base × snow_intensity)`.
pub fn snow_count(base_count: usize, mood: Mood) -> usize {
    (base_count as f32 * mood.snow_intensity()).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::pool::PoolState;

    fn pool() -> SnowPool {
        SnowPool::new(SnowConfig::default(), Some(42))
    }

    #[test]
    fn count_follows_mood_intensity() {
        for mood in Mood::ALL {
            let expected = (25.0 * mood.snow_intensity()).floor() as usize;
            let mut p = pool();
            p.seed(snow_count(25, mood), 390.0, 844.0);
            assert_eq!(p.len(), expected, "{mood:?}");
        }
    }

    #[test]
    fn stormy_cold_start_seeds_thirty_seven() {
        let mut p = pool();
        p.seed(snow_count(25, Mood::Stormy), 390.0, 844.0);
        assert_eq!(p.len(), 37);
        assert_eq!(p.state(), PoolState::Seeded);
    }

    #[test]
    fn seeded_flakes_use_documented_ranges() {
        let mut p = pool();
        p.seed(200, 390.0, 844.0);
        for f in p.particles() {
            assert!((1.5..=4.5).contains(&f.size));
            assert!((12.0..=35.0).contains(&f.velocity.y));
            assert!((0.2..=0.6).contains(&f.opacity));
            assert!((0.0..=844.0).contains(&f.y));
        }
    }

    #[test]
    fn fallen_flake_is_recycled_to_the_spawn_band() {
        let mut p = pool();
        p.seed(1, 390.0, 844.0);
        let mut guard = 0;
        while p.recycled_total() == 0 {
            p.tick(0.5);
            guard += 1;
            assert!(guard < 1000, "flake never left the screen");
        }
        let f = p.particles()[0];
        assert!(f.y >= -SPAWN_BAND && f.y < 0.0, "respawned at y={}", f.y);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn pool_never_loses_particles() {
        let mut p = pool();
        p.seed(30, 200.0, 300.0);
        for _ in 0..2_000 {
            p.tick(0.1);
            assert_eq!(p.len(), 30);
            assert!(p.particles().iter().all(|f| f.y <= 300.0 + f.size));
        }
    }

    #[test]
    fn tick_moves_by_velocity_times_dt() {
        let mut p = pool();
        p.seed(5, 390.0, 844.0);
        let before: Vec<Snowflake> = p.particles().to_vec();
        p.tick(0.1);
        for (a, b) in before.iter().zip(p.particles()) {
            if b.y > a.y {
                assert!((b.y - (a.y + a.velocity.y * 0.1)).abs() < 1e-3);
                assert!((b.origin_x - (a.origin_x + a.velocity.x * 0.1)).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn stopped_pool_is_frozen_but_kept() {
        let mut p = pool();
        p.seed(10, 390.0, 844.0);
        p.tick(0.1);
        p.stop();
        p.stop();
        let frozen: Vec<Snowflake> = p.particles().to_vec();
        p.tick(1.0);
        assert_eq!(p.particles(), frozen.as_slice());
        assert_eq!(p.state(), PoolState::Stopped);
        p.resume();
        assert_eq!(p.state(), PoolState::Running);
    }

    #[test]
    fn stop_before_seed_is_harmless() {
        let mut p = pool();
        p.stop();
        p.tick(1.0);
        assert_eq!(p.state(), PoolState::Empty);
    }

    #[test]
    fn reseed_replaces_the_whole_pool() {
        let mut p = pool();
        p.seed(snow_count(25, Mood::Cold), 390.0, 844.0);
        p.tick(0.2);
        p.seed(snow_count(25, Mood::Golden), 390.0, 844.0);
        assert_eq!(p.len(), 5);
        assert_eq!(p.state(), PoolState::Seeded);
    }
}
