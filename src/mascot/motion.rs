//! Building blocks of mascot motion: one-shot moves, looping oscillators and
//! the blink cycle.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::anim::{ease_in_out, ease_out_back, ease_out_cubic, lerp, Tween};
use crate::config::BlinkConfig;
use crate::shared::OneShotKind;

/// Eye Y-scale at the bottom of a blink.
pub const BLINK_SQUASH: f32 = 0.15;

const MAX_TRANSITIONS_PER_TICK: usize = 64;

// ═══════════════════════════════════════════════════════════════════════
// ONE-SHOTS
// ═══════════════════════════════════════════════════════════════════════

pub fn one_shot_duration(kind: OneShotKind) -> f32 {
    match kind {
        OneShotKind::Bounce => 0.45,
        OneShotKind::DoubleBounce => 0.8,
        OneShotKind::Wiggle => 0.5,
        OneShotKind::Nod => 0.35,
        OneShotKind::AnticipationDip => 0.2,
        OneShotKind::StretchExit => 0.35,
        OneShotKind::PopIn => 0.3,
        OneShotKind::SquashLand => 0.18,
        OneShotKind::Settle => 0.3,
    }
}

/// Offsets a one-shot layers on top of the looping pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneShotSample {
    pub offset: Vec2,
    pub scale: Vec2,
    pub rotation_deg: f32,
    pub head_nod_deg: f32,
    pub opacity: f32,
}

impl OneShotSample {
    pub const NEUTRAL: OneShotSample = OneShotSample {
        offset: Vec2::ZERO,
        scale: Vec2::ONE,
        rotation_deg: 0.0,
        head_nod_deg: 0.0,
        opacity: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneShot {
    pub kind: OneShotKind,
    tween: Tween,
}

impl OneShot {
    pub fn new(kind: OneShotKind) -> Self {
        Self {
            kind,
            tween: Tween::new(0.0, 1.0, one_shot_duration(kind)),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.tween.tick(dt);
    }

    pub fn finished(&self) -> bool {
        self.tween.finished()
    }

    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }

    pub fn sample(&self) -> OneShotSample {
        sample_one_shot(self.kind, self.progress())
    }
}

/// Pose offsets for `kind` at progress `t` (0..1). Every move except the
/// exit returns to neutral at `t = 1`.
pub fn sample_one_shot(kind: OneShotKind, t: f32) -> OneShotSample {
    let t = t.clamp(0.0, 1.0);
    let mut s = OneShotSample::NEUTRAL;
    match kind {
        OneShotKind::Bounce => {
            s.offset.y = -14.0 * (PI * t).sin();
        }
        OneShotKind::DoubleBounce => {
            // Second hop is lower.
            let (phase, height) = if t < 0.5 { (t * 2.0, 16.0) } else { ((t - 0.5) * 2.0, 9.0) };
            s.offset.y = -height * (PI * phase).sin();
        }
        OneShotKind::Wiggle => {
            s.rotation_deg = 7.0 * (4.0 * TAU * t).sin() * (1.0 - t);
        }
        OneShotKind::Nod => {
            s.head_nod_deg = 9.0 * (PI * t).sin();
        }
        OneShotKind::AnticipationDip => {
            let k = (PI * t).sin();
            s.offset.y = 6.0 * k;
            s.scale = Vec2::new(1.0 + 0.08 * k, 1.0 - 0.10 * k);
        }
        OneShotKind::StretchExit => {
            let k = ease_in_out(t);
            s.offset.y = -90.0 * k;
            s.scale = Vec2::new(lerp(1.0, 0.3, k), lerp(1.0, 1.4, (t * 2.0).min(1.0)) * (1.0 - 0.7 * k));
            s.opacity = 1.0 - k;
        }
        OneShotKind::PopIn => {
            let k = ease_out_back(t);
            s.scale = Vec2::splat(k.max(0.0));
            s.opacity = (t * 3.0).min(1.0);
        }
        OneShotKind::SquashLand => {
            let k = (PI * t).sin();
            s.scale = Vec2::new(1.0 + 0.15 * k, 1.0 - 0.15 * k);
        }
        OneShotKind::Settle => {
            let k = (3.0 * TAU * t).sin() * (1.0 - ease_out_cubic(t));
            s.scale = Vec2::new(1.0 - 0.04 * k, 1.0 + 0.04 * k);
        }
    }
    s
}

// ═══════════════════════════════════════════════════════════════════════
// LOOPS
// ═══════════════════════════════════════════════════════════════════════

/// A repeating clock with a fixed period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub period: f32,
    elapsed: f32,
}

impl Oscillator {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(1e-3),
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt) % self.period;
    }

    /// Position in the cycle, 0..1.
    pub fn phase(&self) -> f32 {
        self.elapsed / self.period
    }

    /// Sine of the cycle, -1..1.
    pub fn sin(&self) -> f32 {
        (self.phase() * TAU).sin()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlinkPhase {
    Waiting(f32),
    Closing(f32),
    Holding(f32),
    Opening(f32),
    /// Pause between the two halves of a double blink.
    Gap(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlinkLoop {
    config: BlinkConfig,
    phase: BlinkPhase,
    /// Whether the blink in progress chains a second one.
    chain: bool,
    blinks: u32,
    doubles: u32,
}

impl BlinkLoop {
    pub fn new(config: BlinkConfig, rng: &mut StdRng) -> Self {
        let first = Self::sample_interval(&config, rng);
        Self {
            config,
            phase: BlinkPhase::Waiting(first),
            chain: false,
            blinks: 0,
            doubles: 0,
        }
    }

    /// Seconds until the next blink: uniform in `base ± jitter`.
    pub fn sample_interval(config: &BlinkConfig, rng: &mut StdRng) -> f32 {
        let jitter = config.jitter.abs();
        if jitter <= 0.0 {
            return config.base_interval.max(0.0);
        }
        let lo = (config.base_interval - jitter).max(0.0);
        let hi = config.base_interval + jitter;
        rng.gen_range(lo..=hi)
    }

    pub fn tick(&mut self, mut dt: f32, rng: &mut StdRng) {
        // Leftover time carries across phase boundaries, so one large step
        // can run a whole blink. The cap guards against all-zero timings.
        let mut transitions = 0;
        while dt > 0.0 && transitions < MAX_TRANSITIONS_PER_TICK {
            let remaining = self.remaining();
            if dt < remaining {
                self.set_remaining(remaining - dt);
                return;
            }
            dt -= remaining.max(0.0);
            self.advance_phase(rng);
            transitions += 1;
        }
    }

    fn remaining(&self) -> f32 {
        match self.phase {
            BlinkPhase::Waiting(r)
            | BlinkPhase::Closing(r)
            | BlinkPhase::Holding(r)
            | BlinkPhase::Opening(r)
            | BlinkPhase::Gap(r) => r,
        }
    }

    fn set_remaining(&mut self, value: f32) {
        match &mut self.phase {
            BlinkPhase::Waiting(r)
            | BlinkPhase::Closing(r)
            | BlinkPhase::Holding(r)
            | BlinkPhase::Opening(r)
            | BlinkPhase::Gap(r) => *r = value,
        }
    }

    fn advance_phase(&mut self, rng: &mut StdRng) {
        let c = &self.config;
        self.phase = match self.phase {
            BlinkPhase::Waiting(_) => {
                self.chain = rng.gen_bool(c.double_blink_chance.clamp(0.0, 1.0) as f64);
                if self.chain {
                    self.doubles += 1;
                }
                BlinkPhase::Closing(c.close)
            }
            BlinkPhase::Closing(_) => BlinkPhase::Holding(c.hold),
            BlinkPhase::Holding(_) => BlinkPhase::Opening(c.open),
            BlinkPhase::Opening(_) => {
                self.blinks += 1;
                if self.chain {
                    self.chain = false;
                    BlinkPhase::Gap(c.double_blink_gap)
                } else {
                    BlinkPhase::Waiting(Self::sample_interval(c, rng))
                }
            }
            BlinkPhase::Gap(_) => BlinkPhase::Closing(c.close),
        };
    }

    /// Eye Y-scale: 1 open, [`BLINK_SQUASH`] shut.
    pub fn openness(&self) -> f32 {
        let c = &self.config;
        match self.phase {
            BlinkPhase::Waiting(_) | BlinkPhase::Gap(_) => 1.0,
            BlinkPhase::Closing(r) => lerp(BLINK_SQUASH, 1.0, ratio(r, c.close)),
            BlinkPhase::Holding(_) => BLINK_SQUASH,
            BlinkPhase::Opening(r) => lerp(1.0, BLINK_SQUASH, ratio(r, c.open)),
        }
    }

    /// Blinks completed so far (a double blink counts twice).
    pub fn blinks(&self) -> u32 {
        self.blinks
    }

    /// Double blinks started so far.
    pub fn doubles(&self) -> u32 {
        self.doubles
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, BlinkPhase::Waiting(_))
    }
}

fn ratio(remaining: f32, total: f32) -> f32 {
    if total <= 0.0 {
        0.0
    } else {
        (remaining / total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::OneShotKind;
    use rand::SeedableRng;

    #[test]
    fn blink_intervals_stay_within_jitter() {
        let cfg = BlinkConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5_000 {
            let i = BlinkLoop::sample_interval(&cfg, &mut rng);
            assert!(i >= cfg.base_interval - cfg.jitter && i <= cfg.base_interval + cfg.jitter);
        }
    }

    #[test]
    fn blink_closes_holds_and_reopens() {
        let cfg = BlinkConfig {
            jitter: 0.0,
            double_blink_chance: 0.0,
            ..BlinkConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut blink = BlinkLoop::new(cfg.clone(), &mut rng);
        assert_eq!(blink.openness(), 1.0);
        blink.tick(cfg.base_interval + cfg.close + cfg.hold * 0.5, &mut rng);
        assert!((blink.openness() - BLINK_SQUASH).abs() < 1e-5);
        blink.tick(cfg.hold * 0.5 + cfg.open + 0.01, &mut rng);
        assert_eq!(blink.openness(), 1.0);
        assert_eq!(blink.blinks(), 1);
        assert!(blink.is_waiting());
    }

    #[test]
    fn double_blinks_happen_occasionally() {
        let cfg = BlinkConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut blink = BlinkLoop::new(cfg, &mut rng);
        for _ in 0..(600.0 / 0.02) as usize {
            blink.tick(0.02, &mut rng);
        }
        assert!(blink.blinks() > 100);
        assert!(blink.doubles() > 0);
        assert!(blink.doubles() < blink.blinks() / 2);
    }

    #[test]
    fn certain_double_blink_chains_a_second_close() {
        let cfg = BlinkConfig {
            jitter: 0.0,
            double_blink_chance: 1.0,
            ..BlinkConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut blink = BlinkLoop::new(cfg.clone(), &mut rng);
        let one_blink = cfg.close + cfg.hold + cfg.open;
        blink.tick(cfg.base_interval + one_blink + cfg.double_blink_gap * 0.5, &mut rng);
        assert_eq!(blink.blinks(), 1);
        assert!(!blink.is_waiting());
        blink.tick(cfg.double_blink_gap * 0.5 + one_blink + 0.01, &mut rng);
        assert_eq!(blink.blinks(), 2);
        assert!(blink.is_waiting());
    }

    #[test]
    fn one_shots_return_to_neutral() {
        for kind in [
            OneShotKind::Bounce,
            OneShotKind::DoubleBounce,
            OneShotKind::Wiggle,
            OneShotKind::Nod,
            OneShotKind::AnticipationDip,
            OneShotKind::PopIn,
            OneShotKind::SquashLand,
            OneShotKind::Settle,
        ] {
            let s = sample_one_shot(kind, 1.0);
            assert!(s.offset.length() < 1e-3, "{kind:?}");
            assert!((s.scale - Vec2::ONE).length() < 1e-3, "{kind:?}");
            assert!(s.rotation_deg.abs() < 1e-3 && s.head_nod_deg.abs() < 1e-3, "{kind:?}");
        }
    }

    #[test]
    fn stretch_exit_ends_invisible() {
        assert_eq!(sample_one_shot(OneShotKind::StretchExit, 1.0).opacity, 0.0);
        assert_eq!(sample_one_shot(OneShotKind::PopIn, 0.0).scale, Vec2::ZERO);
    }

    #[test]
    fn one_shot_finishes_after_its_duration() {
        let mut shot = OneShot::new(OneShotKind::Bounce);
        shot.tick(0.2);
        assert!(!shot.finished());
        shot.tick(0.3);
        assert!(shot.finished());
    }
}
