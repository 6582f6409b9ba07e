//! Expression → per-part parameter bundle.
//!
//! `expression_params` is a total match over [`PenguinExpression`]; adding an
//! expression without an entry is a compile error.

use bevy::math::Vec2;

use crate::shapes::mascot::EyeShape;
use crate::shared::{OneShotKind, PenguinExpression};

/// Resting wing angle, degrees outward from hanging straight down.
pub const REST_WING_DEG: f32 = 15.0;

/// Extra art drawn around the mascot for some expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Zzz,
    Sparkles,
    ThoughtBubble,
    QuestionMark,
    Laptop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breathing {
    Normal,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WingMotion {
    /// Both wings beat quickly.
    Flap,
    /// Right wing raised and waving.
    Wave,
    /// Small fast pecks, as if typing.
    Type,
}

/// Which repeating animations an expression runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopSet {
    pub blink: bool,
    pub sway: bool,
    pub breathing: Option<Breathing>,
    pub wings: Option<WingMotion>,
    /// Beak flaps open and shut.
    pub talk: bool,
    /// Overlay glyphs drift upward on a loop.
    pub overlay_drift: bool,
}

impl LoopSet {
    pub fn count(&self) -> usize {
        [
            self.blink,
            self.sway,
            self.breathing.is_some(),
            self.wings.is_some(),
            self.talk,
            self.overlay_drift,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionParams {
    /// Degrees, positive tilts clockwise.
    pub head_tilt_deg: f32,
    pub eyes: EyeShape,
    pub left_wing_deg: f32,
    pub right_wing_deg: f32,
    /// 0 closed, 1 fully open.
    pub beak_open: f32,
    pub blush: bool,
    pub overlay: Option<Overlay>,
    pub loops: LoopSet,
    /// One-shot played when the expression is entered.
    pub entry: Option<OneShotKind>,
}

const IDLE_LOOPS: LoopSet = LoopSet {
    blink: true,
    sway: true,
    breathing: Some(Breathing::Normal),
    wings: None,
    talk: false,
    overlay_drift: false,
};

pub fn expression_params(expression: PenguinExpression) -> ExpressionParams {
    let base = ExpressionParams {
        head_tilt_deg: 0.0,
        eyes: EyeShape::Open,
        left_wing_deg: REST_WING_DEG,
        right_wing_deg: REST_WING_DEG,
        beak_open: 0.0,
        blush: true,
        overlay: None,
        loops: IDLE_LOOPS,
        entry: None,
    };
    match expression {
        PenguinExpression::Idle => base,
        PenguinExpression::Happy => ExpressionParams {
            eyes: EyeShape::Happy,
            beak_open: 0.3,
            loops: LoopSet { blink: false, ..IDLE_LOOPS },
            entry: Some(OneShotKind::Bounce),
            ..base
        },
        PenguinExpression::Thinking => ExpressionParams {
            head_tilt_deg: -6.0,
            eyes: EyeShape::Squint,
            right_wing_deg: 40.0,
            overlay: Some(Overlay::ThoughtBubble),
            loops: LoopSet { sway: false, overlay_drift: true, ..IDLE_LOOPS },
            ..base
        },
        PenguinExpression::Sleeping => ExpressionParams {
            head_tilt_deg: 10.0,
            eyes: EyeShape::Closed,
            left_wing_deg: 8.0,
            right_wing_deg: 8.0,
            blush: false,
            overlay: Some(Overlay::Zzz),
            loops: LoopSet {
                blink: false,
                sway: false,
                breathing: Some(Breathing::Slow),
                overlay_drift: true,
                ..IDLE_LOOPS
            },
            ..base
        },
        PenguinExpression::Celebrating => ExpressionParams {
            eyes: EyeShape::Happy,
            left_wing_deg: 70.0,
            right_wing_deg: 70.0,
            beak_open: 0.8,
            overlay: Some(Overlay::Sparkles),
            loops: LoopSet {
                blink: false,
                wings: Some(WingMotion::Flap),
                overlay_drift: true,
                ..IDLE_LOOPS
            },
            entry: Some(OneShotKind::DoubleBounce),
            ..base
        },
        PenguinExpression::Listening => ExpressionParams {
            head_tilt_deg: 8.0,
            eyes: EyeShape::Wide,
            loops: LoopSet { sway: false, ..IDLE_LOOPS },
            entry: Some(OneShotKind::Nod),
            ..base
        },
        PenguinExpression::Talking => ExpressionParams {
            beak_open: 0.5,
            loops: LoopSet { talk: true, ..IDLE_LOOPS },
            ..base
        },
        PenguinExpression::Waving => ExpressionParams {
            eyes: EyeShape::Happy,
            right_wing_deg: 110.0,
            loops: LoopSet {
                blink: false,
                wings: Some(WingMotion::Wave),
                ..IDLE_LOOPS
            },
            ..base
        },
        PenguinExpression::Nudging => ExpressionParams {
            head_tilt_deg: -4.0,
            eyes: EyeShape::Wide,
            right_wing_deg: 55.0,
            beak_open: 0.2,
            entry: Some(OneShotKind::Wiggle),
            ..base
        },
        PenguinExpression::Confused => ExpressionParams {
            head_tilt_deg: -12.0,
            eyes: EyeShape::Squint,
            blush: false,
            overlay: Some(Overlay::QuestionMark),
            loops: LoopSet { sway: false, overlay_drift: true, ..IDLE_LOOPS },
            ..base
        },
        PenguinExpression::Typing => ExpressionParams {
            head_tilt_deg: 4.0,
            left_wing_deg: 35.0,
            right_wing_deg: 35.0,
            overlay: Some(Overlay::Laptop),
            loops: LoopSet {
                sway: false,
                wings: Some(WingMotion::Type),
                ..IDLE_LOOPS
            },
            ..base
        },
        PenguinExpression::ThumbsUp => ExpressionParams {
            eyes: EyeShape::Happy,
            right_wing_deg: 95.0,
            beak_open: 0.3,
            overlay: Some(Overlay::Sparkles),
            loops: LoopSet { blink: false, ..IDLE_LOOPS },
            entry: Some(OneShotKind::Bounce),
            ..base
        },
    }
}

/// Transform of the whole character plus per-part values for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Artboard units; y down.
    pub offset: Vec2,
    pub rotation_deg: f32,
    pub scale: Vec2,
    pub opacity: f32,
    pub head_tilt_deg: f32,
    pub eye_shape: EyeShape,
    /// Blink squash on the eye's Y scale.
    pub eye_openness: f32,
    pub left_wing_deg: f32,
    pub right_wing_deg: f32,
    pub beak_open: f32,
    /// Scarf tail counter-sway, P units.
    pub scarf_sway: f32,
    pub blush: bool,
    pub overlay: Option<Overlay>,
    /// 0..1 loop position of the overlay drift.
    pub overlay_phase: f32,
}

impl Pose {
    /// The static pose for an expression: no loops, no one-shot.
    pub fn rest(expression: PenguinExpression) -> Self {
        let p = expression_params(expression);
        Self {
            offset: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: Vec2::ONE,
            opacity: 1.0,
            head_tilt_deg: p.head_tilt_deg,
            eye_shape: p.eyes,
            eye_openness: 1.0,
            left_wing_deg: p.left_wing_deg,
            right_wing_deg: p.right_wing_deg,
            beak_open: p.beak_open,
            scarf_sway: 0.0,
            blush: p.blush,
            overlay: p.overlay,
            overlay_phase: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_expression_maps_to_a_bundle() {
        for e in PenguinExpression::ALL {
            let p = expression_params(e);
            assert!(p.beak_open >= 0.0 && p.beak_open <= 1.0, "{e:?}");
            assert!(p.left_wing_deg >= 0.0 && p.right_wing_deg <= 180.0, "{e:?}");
        }
    }

    #[test]
    fn idle_blinks_sways_and_breathes() {
        let loops = expression_params(PenguinExpression::Idle).loops;
        assert!(loops.blink && loops.sway);
        assert_eq!(loops.breathing, Some(Breathing::Normal));
        assert_eq!(loops.count(), 3);
    }

    #[test]
    fn sleeping_breathes_slowly_with_zzz() {
        let p = expression_params(PenguinExpression::Sleeping);
        assert_eq!(p.loops.breathing, Some(Breathing::Slow));
        assert_eq!(p.overlay, Some(Overlay::Zzz));
        assert!(!p.loops.blink);
        assert_eq!(p.eyes, EyeShape::Closed);
    }

    #[test]
    fn celebrating_double_bounces_and_flaps() {
        let p = expression_params(PenguinExpression::Celebrating);
        assert_eq!(p.entry, Some(OneShotKind::DoubleBounce));
        assert_eq!(p.loops.wings, Some(WingMotion::Flap));
        assert_eq!(p.overlay, Some(Overlay::Sparkles));
    }

    #[test]
    fn rest_pose_is_neutral_transform() {
        for e in PenguinExpression::ALL {
            let pose = Pose::rest(e);
            assert_eq!(pose.offset, Vec2::ZERO);
            assert_eq!(pose.scale, Vec2::ONE);
            assert_eq!(pose.eye_openness, 1.0);
        }
    }
}
