//! Fixed-size recycling particle pool.
//!
//! State machine: `Empty → Seeded → Running → (reseed) → Seeded … → Stopped`.
//! A particle is never removed once seeded: when it leaves the visible
//! bounds it is reset to a fresh spawn point in place, so ticking never
//! allocates.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolState {
    Empty,
    Seeded,
    Running,
    Stopped,
}

/// A particle kind that lives in a [`RecyclingPool`].
pub trait Recycled: Sized + Clone + std::fmt::Debug {
    /// Spawn ranges shared by every particle of the pool.
    type Params: Clone + std::fmt::Debug;

    /// Create a particle. `scatter` spreads it over the whole visible area
    /// (initial seed); otherwise it starts in the entry band just outside
    /// the bounds (recycling).
    fn spawn(rng: &mut StdRng, params: &Self::Params, bounds: Vec2, scatter: bool) -> Self;

    /// Integrate one step.
    fn advance(&mut self, dt: f32);

    fn is_out_of_bounds(&self, bounds: Vec2) -> bool;
}

#[derive(Debug, Clone)]
pub struct RecyclingPool<P: Recycled> {
    particles: Vec<P>,
    state: PoolState,
    bounds: Vec2,
    params: P::Params,
    rng: StdRng,
    recycled_total: u64,
}

impl<P: Recycled> RecyclingPool<P> {
    pub fn new(params: P::Params, seed: Option<u64>) -> Self {
        Self {
            particles: Vec::new(),
            state: PoolState::Empty,
            bounds: Vec2::ZERO,
            params,
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
            recycled_total: 0,
        }
    }

    /// Fill the pool with exactly `count` fresh particles, replacing any
    /// previous contents. The allocation is reused.
    pub fn seed(&mut self, count: usize, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let p = P::spawn(&mut self.rng, &self.params, self.bounds, true);
            self.particles.push(p);
        }
        self.state = if count == 0 {
            PoolState::Empty
        } else {
            PoolState::Seeded
        };
    }

    /// Advance every particle and recycle the ones that left the bounds.
    /// No-op unless seeded or running.
    pub fn tick(&mut self, dt: f32) {
        match self.state {
            PoolState::Seeded | PoolState::Running => {}
            PoolState::Empty | PoolState::Stopped => return,
        }
        self.state = PoolState::Running;
        if dt <= 0.0 {
            return;
        }
        for p in &mut self.particles {
            p.advance(dt);
            if p.is_out_of_bounds(self.bounds) {
                *p = P::spawn(&mut self.rng, &self.params, self.bounds, false);
                self.recycled_total += 1;
            }
        }
    }

    /// Halt ticking. The pool is kept for a quick restart. Idempotent, and a
    /// no-op on a pool that was never seeded.
    pub fn stop(&mut self) {
        if matches!(self.state, PoolState::Seeded | PoolState::Running) {
            self.state = PoolState::Stopped;
        }
    }

    /// Resume a stopped pool without reseeding.
    pub fn resume(&mut self) {
        if self.state == PoolState::Stopped && !self.particles.is_empty() {
            self.state = PoolState::Running;
        }
    }

    pub fn state(&self) -> PoolState {
        self.state
    }

    pub fn is_ticking(&self) -> bool {
        matches!(self.state, PoolState::Seeded | PoolState::Running)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[P] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn params(&self) -> &P::Params {
        &self.params
    }

    /// Total recycles since creation; useful for diagnostics.
    pub fn recycled_total(&self) -> u64 {
        self.recycled_total
    }
}
