//! Poses the part outlines into scene space for one frame.

use bevy::prelude::*;

use super::expression::{Overlay, Pose};
use crate::palette::{
    with_opacity, ACCENT_BLUE, BELLY_WHITE, BLUSH_PINK, EYE_BLACK, EYE_WHITE, FLAME_ORANGE,
    PLUMAGE_DARK, PLUMAGE_HIGHLIGHT,
};
use crate::shapes::mascot::{self as parts, Side, ART_W};
use crate::shapes::Outline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Foot,
    Body,
    Belly,
    Wing,
    Scarf,
    Head,
    Face,
    EyeWhite,
    Pupil,
    Shine,
    Lid,
    Beak,
    Blush,
    Overlay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigPart {
    pub part: Part,
    /// Scene space, y down.
    pub outline: Outline,
    pub color: Color,
}

/// Unit-space box the overlay glyph drifts through.
const OVERLAY_BOX: Rect = Rect {
    min: Vec2::new(0.70, 0.02),
    max: Vec2::new(0.88, 0.18),
};
const OVERLAY_RISE: f32 = 0.08;

/// Every visible part, back to front. An invisible mascot yields nothing.
pub fn rig(pose: &Pose, rect: Rect) -> Vec<RigPart> {
    if pose.opacity <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Vec::new();
    }
    let mut unit: Vec<(Part, Outline, Color)> = Vec::with_capacity(20);
    for side in [Side::Left, Side::Right] {
        unit.push((Part::Foot, parts::foot(side), FLAME_ORANGE));
    }
    unit.push((Part::Body, parts::body(), PLUMAGE_DARK));
    unit.push((Part::Belly, parts::belly(), BELLY_WHITE));
    unit.push((Part::Wing, parts::wing(Side::Left, pose.left_wing_deg), PLUMAGE_HIGHLIGHT));
    unit.push((Part::Wing, parts::wing(Side::Right, pose.right_wing_deg), PLUMAGE_HIGHLIGHT));
    unit.push((Part::Scarf, parts::scarf(pose.scarf_sway), ACCENT_BLUE));

    // Head group tilts as one around the head centre.
    let mut head: Vec<(Part, Outline, Color)> = vec![
        (Part::Head, parts::head(), PLUMAGE_DARK),
        (Part::Face, parts::face_patch(), BELLY_WHITE),
    ];
    for side in [Side::Left, Side::Right] {
        let eye = parts::eye(side, pose.eye_shape, pose.eye_openness);
        head.push((Part::EyeWhite, eye.white, EYE_WHITE));
        head.push((Part::Pupil, eye.pupil, EYE_BLACK));
        head.push((Part::Shine, eye.shines, EYE_WHITE));
        head.push((Part::Lid, eye.strokes, EYE_BLACK));
    }
    head.push((Part::Beak, parts::beak(pose.beak_open), FLAME_ORANGE));
    if pose.blush {
        for side in [Side::Left, Side::Right] {
            head.push((Part::Blush, parts::blush(side), with_opacity(BLUSH_PINK, 0.5)));
        }
    }
    let pivot = parts::head_pivot();
    let tilt = pose.head_tilt_deg.to_radians();
    unit.extend(
        head.into_iter()
            .map(|(part, outline, color)| (part, outline.rotated(pivot, tilt), color)),
    );

    if let Some(overlay) = pose.overlay {
        let rise = Vec2::new(0.0, -OVERLAY_RISE * pose.overlay_phase);
        let slot = Rect {
            min: OVERLAY_BOX.min + rise,
            max: OVERLAY_BOX.max + rise,
        };
        unit.push((Part::Overlay, overlay_glyph(overlay).fit(slot), overlay_color(overlay)));
    }

    // Whole-body transform: squash and rotate around the feet, then nudge.
    let anchor = parts::art(0.0, 0.5);
    let spin = pose.rotation_deg.to_radians();
    let nudge = pose.offset / ART_W * rect.width();
    unit.into_iter()
        .filter(|(_, outline, _)| !outline.is_empty())
        .map(|(part, outline, color)| {
            let posed = outline
                .transformed(|p| anchor + (p - anchor) * pose.scale)
                .rotated(anchor, spin)
                .fit(rect)
                .transformed(|p| p + nudge);
            RigPart {
                part,
                outline: posed,
                color: with_opacity(color, pose.opacity),
            }
        })
        .collect()
}

pub fn overlay_glyph(overlay: Overlay) -> Outline {
    match overlay {
        Overlay::Zzz => parts::zzz_glyph(),
        Overlay::Sparkles => parts::sparkle(),
        Overlay::ThoughtBubble => parts::thought_bubble(),
        Overlay::QuestionMark => parts::question_mark(),
        Overlay::Laptop => parts::laptop(),
    }
}

fn overlay_color(overlay: Overlay) -> Color {
    match overlay {
        Overlay::Sparkles => Color::srgb(1.0, 0.85, 0.3),
        Overlay::Laptop => Color::srgb(0.6, 0.62, 0.66),
        Overlay::Zzz | Overlay::ThoughtBubble | Overlay::QuestionMark => EYE_WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PenguinExpression;

    fn rect() -> Rect {
        Rect::new(100.0, 300.0, 264.0, 488.6)
    }

    #[test]
    fn parts_follow_the_standard_stack() {
        let rigged = rig(&Pose::rest(PenguinExpression::Happy), rect());
        let order: Vec<Part> = rigged.iter().map(|p| p.part).collect();
        let pos = |part: Part| order.iter().position(|p| *p == part).unwrap();
        assert!(pos(Part::Foot) < pos(Part::Body));
        assert!(pos(Part::Body) < pos(Part::Belly));
        assert!(pos(Part::Wing) < pos(Part::Scarf));
        assert!(pos(Part::Scarf) < pos(Part::Head));
        assert!(pos(Part::Beak) < pos(Part::Blush));
    }

    #[test]
    fn hidden_mascot_draws_nothing() {
        let mut pose = Pose::rest(PenguinExpression::Idle);
        pose.opacity = 0.0;
        assert!(rig(&pose, rect()).is_empty());
    }

    #[test]
    fn rest_pose_stays_inside_its_box() {
        let r = rect();
        for part in rig(&Pose::rest(PenguinExpression::Idle), r) {
            let b = part.outline.bounds().unwrap();
            assert!(b.min.x >= r.min.x - 1.0 && b.max.x <= r.max.x + 1.0, "{:?}", part.part);
            assert!(b.min.y >= r.min.y - 1.0 && b.max.y <= r.max.y + 1.0, "{:?}", part.part);
        }
    }

    #[test]
    fn offset_moves_every_part() {
        let still = rig(&Pose::rest(PenguinExpression::Idle), rect());
        let mut pose = Pose::rest(PenguinExpression::Idle);
        pose.offset = Vec2::new(ART_W, 0.0);
        let moved = rig(&pose, rect());
        let dx = moved[0].outline.bounds().unwrap().min.x - still[0].outline.bounds().unwrap().min.x;
        assert!((dx - rect().width()).abs() < 1e-3);
    }

    #[test]
    fn sleeping_adds_the_overlay() {
        let rigged = rig(&Pose::rest(PenguinExpression::Sleeping), rect());
        assert!(rigged.iter().any(|p| p.part == Part::Overlay));
        assert!(rigged.iter().all(|p| p.part != Part::Pupil));
    }
}
