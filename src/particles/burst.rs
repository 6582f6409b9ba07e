//! One-shot reward bursts: confetti, sparkles and leaping fish.
//!
//! Unlike the recycling pools, a burst spawns every particle at once with a
//! staggered start delay, flies each toward a random target offset while
//! fading, and empties itself once every particle has faded to zero.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

use crate::anim::ease_out_cubic;
use crate::config::BurstConfig;
use crate::shared::BurstKind;

/// Downward pull on confetti after launch, units per second squared.
const CONFETTI_GRAVITY: f32 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstParticle {
    pub kind: BurstKind,
    pub origin: Vec2,
    pub target_offset: Vec2,
    /// Seconds after the burst fires before this particle appears.
    pub delay: f32,
    pub lifetime: f32,
    pub elapsed: f32,
    pub size: f32,
    pub rotation: f32,
    /// Radians per second.
    pub spin: f32,
    /// Index into the renderer's colour cycle.
    pub color_index: u8,
}

impl BurstParticle {
    /// 0 before launch, 1 once fully faded.
    pub fn progress(&self) -> f32 {
        ((self.elapsed - self.delay) / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn has_launched(&self) -> bool {
        self.elapsed >= self.delay
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.lifetime
    }

    /// Decays to exactly 0 at the end of the lifetime. Invisible before launch.
    pub fn opacity(&self) -> f32 {
        if !self.has_launched() {
            return 0.0;
        }
        let p = self.progress();
        match self.kind {
            // Sparkles pop in, then fade.
            BurstKind::Sparkle => (1.0 - p) * (p * 6.0).min(1.0),
            BurstKind::Confetti | BurstKind::FishReward => 1.0 - p * p,
        }
    }

    pub fn position(&self) -> Vec2 {
        let p = self.progress();
        let t = (self.elapsed - self.delay).max(0.0);
        match self.kind {
            BurstKind::Confetti => {
                let fall = 0.5 * CONFETTI_GRAVITY * t * t * 0.35;
                self.origin + self.target_offset * ease_out_cubic(p) + Vec2::new(0.0, fall)
            }
            BurstKind::Sparkle => self.origin + self.target_offset * ease_out_cubic(p),
            // Fish leap in an arc: out along x, up then back down along y.
            BurstKind::FishReward => {
                let arc = (p * PI).sin();
                self.origin
                    + Vec2::new(self.target_offset.x * p, self.target_offset.y * arc)
            }
        }
    }

    /// Scale multiplier; sparkles shrink as they fade.
    pub fn scale(&self) -> f32 {
        match self.kind {
            BurstKind::Sparkle => 1.0 - self.progress() * 0.6,
            BurstKind::Confetti | BurstKind::FishReward => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BurstSystem {
    particles: Vec<BurstParticle>,
    rng: StdRng,
}

impl BurstSystem {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            particles: Vec::new(),
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
        }
    }

    /// Spawn `count` particles of `kind` at `origin`. Bursts stack: firing
    /// while another is in flight adds to the pool.
    pub fn fire(&mut self, kind: BurstKind, origin: Vec2, count: usize, config: &BurstConfig) {
        let rng = &mut self.rng;
        let stagger = config.max_stagger.max(0.0);
        for i in 0..count {
            let angle = match kind {
                // Fish fan out evenly left and right.
                BurstKind::FishReward => {
                    let side = if i % 2 == 0 { -1.0 } else { 1.0 };
                    side * rng.gen_range(0.2..1.2)
                }
                BurstKind::Confetti | BurstKind::Sparkle => rng.gen_range(0.0..TAU),
            };
            let (target_offset, size) = match kind {
                BurstKind::Confetti => {
                    let dist = rng.gen_range(60.0..160.0);
                    (Vec2::new(angle.cos(), angle.sin() - 0.6) * dist, rng.gen_range(4.0..8.0))
                }
                BurstKind::Sparkle => {
                    let dist = rng.gen_range(20.0..70.0);
                    (Vec2::new(angle.cos(), angle.sin()) * dist, rng.gen_range(6.0..12.0))
                }
                BurstKind::FishReward => (
                    Vec2::new(angle * 90.0, -rng.gen_range(80.0..150.0)),
                    rng.gen_range(16.0..24.0),
                ),
            };
            let delay = if stagger > 0.0 {
                rng.gen_range(0.0..=stagger)
            } else {
                0.0
            };
            self.particles.push(BurstParticle {
                kind,
                origin,
                target_offset,
                delay,
                lifetime: config.lifetime.max(0.01),
                elapsed: 0.0,
                size,
                rotation: rng.gen_range(0.0..TAU),
                spin: rng.gen_range(-8.0..8.0),
                color_index: rng.gen_range(0..6),
            });
        }
    }

    /// Advance every particle; drop the pool once all have faded.
    pub fn tick(&mut self, dt: f32) {
        if self.particles.is_empty() || dt <= 0.0 {
            return;
        }
        for p in &mut self.particles {
            p.elapsed += dt;
            if p.has_launched() {
                p.rotation = (p.rotation + p.spin * dt) % TAU;
            }
        }
        if self.particles.iter().all(BurstParticle::is_finished) {
            self.particles.clear();
        }
    }

    /// Drop everything immediately.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }
}
