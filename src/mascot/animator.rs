//! The mascot's animation state machine.
//!
//! The expression is the only externally driven state. Changing it drops any
//! in-flight one-shot back to neutral, swaps the loop set and plays the new
//! expression's entry move. Under reduce motion nothing is allocated: no
//! loops, no one-shots, and the pose is the expression's rest pose.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::expression::{expression_params, Breathing, ExpressionParams, Pose, WingMotion};
use super::motion::{BlinkLoop, OneShot, Oscillator};
use crate::config::BlinkConfig;
use crate::shared::{OneShotKind, PenguinExpression};

const SWAY_PERIOD: f32 = 3.0;
const SWAY_AMPLITUDE: f32 = 2.0;
const SWAY_ROTATION_DEG: f32 = 0.8;
/// Scarf tail counter-sway, P units.
const SCARF_SWAY: f32 = 0.012;
const BREATH_PERIOD: f32 = 2.6;
const SLOW_BREATH_PERIOD: f32 = 4.2;
const BREATH_DEPTH: f32 = 0.015;
const FLAP_PERIOD: f32 = 0.25;
const WAVE_PERIOD: f32 = 0.6;
const TYPE_PERIOD: f32 = 0.16;
const TALK_PERIOD: f32 = 0.18;
const OVERLAY_DRIFT_PERIOD: f32 = 2.0;

/// Every repeating animation currently allocated.
#[derive(Debug, Clone, Default)]
struct Loops {
    blink: Option<BlinkLoop>,
    sway: Option<Oscillator>,
    breathing: Option<Oscillator>,
    wings: Option<(WingMotion, Oscillator)>,
    talk: Option<Oscillator>,
    overlay: Option<Oscillator>,
}

impl Loops {
    fn count(&self) -> usize {
        [
            self.blink.is_some(),
            self.sway.is_some(),
            self.breathing.is_some(),
            self.wings.is_some(),
            self.talk.is_some(),
            self.overlay.is_some(),
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}

#[derive(Debug, Clone)]
pub struct MascotAnimator {
    expression: PenguinExpression,
    params: ExpressionParams,
    reduce_motion: bool,
    running: bool,
    visible: bool,
    loops: Loops,
    one_shot: Option<OneShot>,
    blink_config: BlinkConfig,
    rng: StdRng,
}

impl MascotAnimator {
    pub fn new(blink_config: BlinkConfig, reduce_motion: bool, seed: Option<u64>) -> Self {
        Self {
            expression: PenguinExpression::Idle,
            params: expression_params(PenguinExpression::Idle),
            reduce_motion,
            running: false,
            visible: true,
            loops: Loops::default(),
            one_shot: None,
            blink_config,
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
        }
    }

    /// Begin animating `expression`.
    pub fn start(&mut self, expression: PenguinExpression) {
        self.running = true;
        self.enter(expression);
    }

    /// Switch expression. The current one-shot is dropped to neutral first.
    pub fn set_expression(&mut self, expression: PenguinExpression) {
        if !self.running {
            self.expression = expression;
            self.params = expression_params(expression);
            return;
        }
        self.enter(expression);
    }

    fn enter(&mut self, expression: PenguinExpression) {
        self.one_shot = None;
        self.expression = expression;
        self.params = expression_params(expression);
        self.loops = Loops::default();
        if self.reduce_motion {
            return;
        }
        let wanted = self.params.loops;
        if wanted.blink {
            self.loops.blink = Some(BlinkLoop::new(self.blink_config.clone(), &mut self.rng));
        }
        if wanted.sway {
            self.loops.sway = Some(Oscillator::new(SWAY_PERIOD));
        }
        self.loops.breathing = wanted.breathing.map(|b| {
            Oscillator::new(match b {
                Breathing::Normal => BREATH_PERIOD,
                Breathing::Slow => SLOW_BREATH_PERIOD,
            })
        });
        self.loops.wings = wanted.wings.map(|m| {
            let period = match m {
                WingMotion::Flap => FLAP_PERIOD,
                WingMotion::Wave => WAVE_PERIOD,
                WingMotion::Type => TYPE_PERIOD,
            };
            (m, Oscillator::new(period))
        });
        if wanted.talk {
            self.loops.talk = Some(Oscillator::new(TALK_PERIOD));
        }
        if wanted.overlay_drift {
            self.loops.overlay = Some(Oscillator::new(OVERLAY_DRIFT_PERIOD));
        }
        if let Some(entry) = self.params.entry {
            self.one_shot = Some(OneShot::new(entry));
        }
    }

    /// Play a one-shot over the current loops, replacing any in flight.
    ///
    /// Under reduce motion only the visibility outcome of exits and
    /// entrances is applied.
    pub fn play_one_shot(&mut self, kind: OneShotKind) {
        match kind {
            OneShotKind::PopIn => self.visible = true,
            OneShotKind::StretchExit if self.reduce_motion => self.visible = false,
            _ => {}
        }
        if self.reduce_motion || !self.running {
            return;
        }
        self.one_shot = Some(OneShot::new(kind));
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.running || dt <= 0.0 {
            return;
        }
        let l = &mut self.loops;
        if let Some(blink) = l.blink.as_mut() {
            blink.tick(dt, &mut self.rng);
        }
        for osc in [l.sway.as_mut(), l.breathing.as_mut(), l.talk.as_mut(), l.overlay.as_mut()]
            .into_iter()
            .flatten()
        {
            osc.tick(dt);
        }
        if let Some((_, osc)) = l.wings.as_mut() {
            osc.tick(dt);
        }
        if let Some(shot) = self.one_shot.as_mut() {
            shot.tick(dt);
            if shot.finished() {
                if shot.kind == OneShotKind::StretchExit {
                    self.visible = false;
                }
                self.one_shot = None;
            }
        }
    }

    /// Stop every loop and one-shot. Idempotent and safe before `start`.
    pub fn stop(&mut self) {
        self.running = false;
        self.loops = Loops::default();
        self.one_shot = None;
    }

    /// Number of live timers: loops plus an in-flight one-shot.
    pub fn active_timers(&self) -> usize {
        self.loops.count() + usize::from(self.one_shot.is_some())
    }

    pub fn expression(&self) -> PenguinExpression {
        self.expression
    }

    pub fn params(&self) -> &ExpressionParams {
        &self.params
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }

    pub fn current_one_shot(&self) -> Option<OneShotKind> {
        self.one_shot.map(|s| s.kind)
    }

    /// Current frame's pose: rest pose plus loops plus one-shot.
    pub fn pose(&self) -> Pose {
        let mut pose = Pose::rest(self.expression);
        if !self.visible {
            pose.opacity = 0.0;
        }
        let l = &self.loops;
        if let Some(blink) = &l.blink {
            pose.eye_openness = blink.openness();
        }
        if let Some(sway) = &l.sway {
            let s = sway.sin();
            pose.offset.x += s * SWAY_AMPLITUDE;
            pose.rotation_deg += s * SWAY_ROTATION_DEG;
            pose.scarf_sway = -s * SCARF_SWAY;
        }
        if let Some(breath) = &l.breathing {
            let b = breath.sin();
            pose.scale *= Vec2::new(1.0 - b * BREATH_DEPTH * 0.5, 1.0 + b * BREATH_DEPTH);
        }
        if let Some((motion, osc)) = &l.wings {
            let s = osc.sin();
            match motion {
                WingMotion::Flap => {
                    let beat = s.abs() * 35.0;
                    pose.left_wing_deg += beat;
                    pose.right_wing_deg += beat;
                }
                WingMotion::Wave => pose.right_wing_deg += s * 20.0,
                WingMotion::Type => {
                    pose.left_wing_deg += s * 5.0;
                    pose.right_wing_deg -= s * 5.0;
                }
            }
        }
        if let Some(talk) = &l.talk {
            pose.beak_open = 0.5 + 0.5 * talk.sin().abs();
        }
        if let Some(drift) = &l.overlay {
            pose.overlay_phase = drift.phase();
        }
        if let Some(shot) = &self.one_shot {
            let s = shot.sample();
            pose.offset += s.offset;
            pose.scale *= s.scale;
            pose.rotation_deg += s.rotation_deg;
            pose.head_tilt_deg += s.head_nod_deg;
            pose.opacity *= s.opacity;
        }
        pose
    }
}
