//! Storm wind streaks: fast horizontal dashes that wrap back to the left.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

use super::pool::{Recycled, RecyclingPool};
use crate::config::WindConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindStreak {
    /// Leading (right-hand) end of the streak.
    pub head: Vec2,
    pub length: f32,
    pub speed: f32,
    pub opacity: f32,
    /// Slight downward slant, units of y per unit of x.
    pub slant: f32,
}

impl WindStreak {
    pub fn tail(&self) -> Vec2 {
        self.head - Vec2::new(self.length, self.length * self.slant)
    }
}

fn sample(rng: &mut StdRng, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

impl Recycled for WindStreak {
    type Params = WindConfig;

    fn spawn(rng: &mut StdRng, params: &WindConfig, bounds: Vec2, scatter: bool) -> Self {
        let length = sample(rng, params.length_range);
        let x = if scatter {
            sample(rng, (0.0, bounds.x))
        } else {
            -sample(rng, (0.0, bounds.x * 0.25))
        };
        WindStreak {
            head: Vec2::new(x, sample(rng, (0.0, bounds.y))),
            length,
            speed: sample(rng, params.speed_range),
            opacity: sample(rng, params.opacity_range),
            slant: rng.gen_range(0.05..0.2),
        }
    }

    fn advance(&mut self, dt: f32) {
        self.head.x += self.speed * dt;
        self.head.y += self.speed * self.slant * dt;
    }

    fn is_out_of_bounds(&self, bounds: Vec2) -> bool {
        let tail = self.tail();
        tail.x > bounds.x || tail.y > bounds.y
    }
}

pub type WindPool = RecyclingPool<WindStreak>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaks_wrap_instead_of_disappearing() {
        let mut pool = WindPool::new(WindConfig::default(), Some(9));
        pool.seed(14, 390.0, 844.0);
        for _ in 0..300 {
            pool.tick(1.0 / 30.0);
        }
        assert_eq!(pool.len(), 14);
        assert!(pool.recycled_total() > 0);
        for s in pool.particles() {
            assert!(s.tail().x <= 390.0);
        }
    }
}
