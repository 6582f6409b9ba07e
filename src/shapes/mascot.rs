//! Penguin body parts.
//!
//! Proportions are expressed relative to the penguin's size `P` around the
//! body centre, then mapped into the 400 × 460 artboard's unit box. The
//! default part stack, back to front, is feet → body → belly → wings →
//! scarf → head → face patch → eyes → beak → blush.

use bevy::math::Vec2;

use super::{circle, polygon, polyline, Outline};

pub const ART_W: f32 = 400.0;
pub const ART_H: f32 = 460.0;
const CENTER_X: f32 = 200.0;
const CENTER_Y: f32 = 240.0;
const P_SIZE: f32 = 340.0;

/// Width over height of the artboard, for callers sizing the mascot box.
pub const ASPECT: f32 = ART_W / ART_H;

/// Head centre in P units, used as the head-tilt pivot.
pub const HEAD_CENTER: (f32, f32) = (0.0, -0.22);

/// Map a P-relative offset into the unit box.
pub fn art(x: f32, y: f32) -> Vec2 {
    Vec2::new((CENTER_X + x * P_SIZE) / ART_W, (CENTER_Y + y * P_SIZE) / ART_H)
}

fn art_ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Outline {
    // Ellipse in P space, then mapped; the map is affine so the bezier
    // approximation survives it.
    super::ellipse(Vec2::new(cx, cy), rx, ry).transformed(|p| art(p.x, p.y))
}

/// Unit-box position of the head pivot.
pub fn head_pivot() -> Vec2 {
    art(HEAD_CENTER.0, HEAD_CENTER.1)
}

/// Egg-shaped body, wider at the bottom.
pub fn body() -> Outline {
    let (w, h, cy) = (0.44, 0.48, 0.08);
    let top = cy - h * 0.85;
    let mut o = Outline::empty();
    o.move_to(art(0.0, top))
        .cubic_to(
            art(w * 0.6, top),
            art(w * 1.1, cy - h * 0.15),
            art(w * 0.95, cy + h * 0.5),
        )
        .cubic_to(
            art(w * 0.85, cy + h * 0.85),
            art(w * 0.4, cy + h),
            art(0.0, cy + h * 0.95),
        )
        .cubic_to(
            art(-w * 0.4, cy + h),
            art(-w * 0.85, cy + h * 0.85),
            art(-w * 0.95, cy + h * 0.5),
        )
        .cubic_to(
            art(-w * 1.1, cy - h * 0.15),
            art(-w * 0.6, top),
            art(0.0, top),
        )
        .close();
    o
}

pub fn belly() -> Outline {
    art_ellipse(0.0, 0.14, 0.30, 0.38)
}

/// Round head, slightly wider than tall.
pub fn head() -> Outline {
    let r = 0.28;
    art_ellipse(HEAD_CENTER.0, HEAD_CENTER.1, r * 1.08, r)
}

pub fn face_patch() -> Outline {
    art_ellipse(0.0, HEAD_CENTER.1 + 0.04, 0.20, 0.17)
}

/// How an eye is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyeShape {
    Open,
    Wide,
    /// Upturned arcs, "^ ^".
    Happy,
    /// Flat closed lids.
    Closed,
    /// Heavy half-closed lids.
    Sleepy,
    /// Narrowed, slightly raised lower lid.
    Squint,
}

/// Which eye: left is `-1`, right is `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Parts of one drawn eye: the filled discs and the shine highlights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EyeOutline {
    pub white: Outline,
    pub pupil: Outline,
    pub shines: Outline,
    /// Lid or arc strokes for the closed variants.
    pub strokes: Outline,
}

/// One eye. `openness` (0..1) squashes the open variants vertically for
/// blinks; closed variants ignore it.
pub fn eye(side: Side, shape: EyeShape, openness: f32) -> EyeOutline {
    let s = side.sign();
    let ex = s * 0.095;
    let ey = HEAD_CENTER.1 + 0.01;
    let base_r = 0.042 * if matches!(side, Side::Right) { 1.05 } else { 1.0 };
    let open = openness.clamp(0.0, 1.0);

    let arc = |lift: f32| {
        let mut o = Outline::empty();
        o.move_to(art(ex - base_r, ey))
            .quad_to(art(ex, ey + lift), art(ex + base_r, ey));
        o
    };

    match shape {
        EyeShape::Happy => EyeOutline {
            strokes: arc(-base_r * 1.4),
            ..Default::default()
        },
        EyeShape::Closed => EyeOutline {
            strokes: arc(base_r * 0.6),
            ..Default::default()
        },
        EyeShape::Open | EyeShape::Wide | EyeShape::Sleepy | EyeShape::Squint => {
            let r = match shape {
                EyeShape::Wide => base_r * 1.25,
                _ => base_r,
            };
            let squash = match shape {
                EyeShape::Sleepy => 0.45,
                EyeShape::Squint => 0.6,
                _ => 1.0,
            } * open.max(0.05);
            let mut out = EyeOutline {
                white: art_ellipse(ex, ey, r * 1.15, r * 1.15 * squash),
                pupil: art_ellipse(ex, ey, r, r * squash),
                ..Default::default()
            };
            // Shines vanish once the lid is mostly down.
            if squash > 0.4 {
                let mut shines = art_ellipse(
                    ex + r * 0.28,
                    ey - r * 0.30 * squash,
                    r * 0.38,
                    r * 0.38 * squash,
                );
                shines.append(art_ellipse(
                    ex - r * 0.22,
                    ey + r * 0.28 * squash,
                    r * 0.18,
                    r * 0.18 * squash,
                ));
                out.shines = shines;
            }
            if matches!(shape, EyeShape::Sleepy) {
                out.strokes = polyline(&[
                    art(ex - r * 1.2, ey - r * squash),
                    art(ex + r * 1.2, ey - r * squash),
                ]);
            }
            out
        }
    }
}

/// Small downward-pointing rounded-triangle beak. `open` (0..1) drops the
/// lower point for talking.
pub fn beak(open: f32) -> Outline {
    let cy = HEAD_CENTER.1 + 0.095;
    let (w, h) = (0.042, 0.035 * (1.0 + open.clamp(0.0, 1.0) * 0.6));
    let mut o = Outline::empty();
    o.move_to(art(0.0, cy + h))
        .cubic_to(
            art(-w * 0.3, cy + h * 0.3),
            art(-w, cy - h * 0.2),
            art(-w * 0.8, cy - h * 0.5),
        )
        .cubic_to(
            art(-w * 0.4, cy - h * 0.9),
            art(w * 0.4, cy - h * 0.9),
            art(w * 0.8, cy - h * 0.5),
        )
        .cubic_to(
            art(w, cy - h * 0.2),
            art(w * 0.3, cy + h * 0.3),
            art(0.0, cy + h),
        )
        .close();
    o
}

/// Stubby flipper rotated `angle_deg` outward from hanging straight down.
/// The resting pose is 15°.
pub fn wing(side: Side, angle_deg: f32) -> Outline {
    let s = side.sign();
    let (h, w) = (0.22, 0.10);
    let origin = Vec2::new(s * 0.37, 0.02 - h * 0.4);
    let rad = (s * angle_deg).to_radians();
    let (sin, cos) = rad.sin_cos();
    let rot = |x: f32, y: f32| {
        let p = Vec2::new(x * cos - y * sin, x * sin + y * cos) + origin;
        art(p.x, p.y)
    };
    let mut o = Outline::empty();
    o.move_to(rot(0.0, -h * 0.5))
        .cubic_to(rot(s * w * 0.8, -h * 0.3), rot(s * w * 1.2, h * 0.1), rot(s * w * 0.6, h * 0.5))
        .cubic_to(rot(s * w * 0.2, h * 0.65), rot(-s * w * 0.2, h * 0.2), rot(0.0, -h * 0.5))
        .close();
    o
}

/// Wing root in the unit box, the rotation pivot for flaps.
pub fn wing_pivot(side: Side) -> Vec2 {
    art(side.sign() * 0.37, 0.02 - 0.22 * 0.4)
}

/// Scarf wrap with a trailing tail. `tail_sway` shifts the tail tip
/// sideways (P units) for counter-sway.
pub fn scarf(tail_sway: f32) -> Outline {
    let (y, h, w) = (-0.065, 0.035, 0.30);
    let t = tail_sway;
    let mut o = Outline::empty();
    o.move_to(art(-w, y - h))
        .cubic_to(art(-w * 0.5, y - h * 1.8), art(w * 0.5, y - h * 1.8), art(w, y - h))
        .cubic_to(art(w * 1.05, y + h * 0.5), art(w * 0.5, y + h * 2.5), art(w * 0.3, y + h * 2.0))
        .cubic_to(
            art(w * 0.65 + t * 0.5, y + h * 4.0),
            art(w * 0.85 + t, y + h * 5.5),
            art(w * 0.55 + t, y + h * 6.5),
        )
        .cubic_to(
            art(w * 0.35 + t, y + h * 5.0),
            art(w * 0.45 + t * 0.5, y + h * 3.5),
            art(w * 0.15, y + h * 2.0),
        )
        .cubic_to(art(-w * 0.3, y + h * 2.8), art(-w * 0.8, y + h * 1.5), art(-w, y - h))
        .close();
    o
}

pub fn foot(side: Side) -> Outline {
    art_ellipse(side.sign() * 0.08, 0.50, 0.065, 0.025)
}

pub fn blush(side: Side) -> Outline {
    art_ellipse(side.sign() * 0.145, HEAD_CENTER.1 + 0.04, 0.035, 0.035)
}

/// Four-point sparkle star centred in the unit box.
pub fn sparkle() -> Outline {
    let c = Vec2::splat(0.5);
    let mut o = Outline::empty();
    o.move_to(Vec2::new(0.5, 0.0))
        .quad_to(c, Vec2::new(1.0, 0.5))
        .quad_to(c, Vec2::new(0.5, 1.0))
        .quad_to(c, Vec2::new(0.0, 0.5))
        .quad_to(c, Vec2::new(0.5, 0.0))
        .close();
    o
}

/// "Z" glyph for sleeping.
pub fn zzz_glyph() -> Outline {
    polyline(&[
        Vec2::new(0.1, 0.1),
        Vec2::new(0.9, 0.1),
        Vec2::new(0.1, 0.9),
        Vec2::new(0.9, 0.9),
    ])
}

/// Thought bubble with two trailing dots.
pub fn thought_bubble() -> Outline {
    let mut o = super::ellipse(Vec2::new(0.6, 0.35), 0.38, 0.3);
    o.append(circle(Vec2::new(0.22, 0.78), 0.07));
    o.append(circle(Vec2::new(0.1, 0.93), 0.045));
    o
}

/// Question mark used by the confused pose.
pub fn question_mark() -> Outline {
    let mut o = Outline::empty();
    o.move_to(Vec2::new(0.25, 0.3))
        .cubic_to(Vec2::new(0.25, 0.0), Vec2::new(0.8, 0.0), Vec2::new(0.75, 0.3))
        .cubic_to(Vec2::new(0.7, 0.5), Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.7));
    o.append(circle(Vec2::new(0.5, 0.9), 0.06));
    o
}

/// Tiny laptop held while typing.
pub fn laptop() -> Outline {
    let mut o = polygon(&[
        Vec2::new(0.15, 0.0),
        Vec2::new(0.85, 0.0),
        Vec2::new(0.85, 0.6),
        Vec2::new(0.15, 0.6),
    ]);
    o.append(polygon(&[
        Vec2::new(0.0, 0.65),
        Vec2::new(1.0, 0.65),
        Vec2::new(0.9, 0.8),
        Vec2::new(0.1, 0.8),
    ]));
    o
}
