//! Gizmo drawing helpers. Everything upstream works in scene space (origin
//! top-left, y down); conversion to world space happens only here.

use bevy::math::Isometry2d;
use bevy::prelude::*;

use crate::environment::{Layer, Primitive};
use crate::palette::{
    sample_gradient, with_opacity, ACCENT_BLUE, AURORA_GREEN, AURORA_VIOLET, BLUSH_PINK,
    FISH_SILVER, WINDOW_LIT,
};
use crate::particles::BurstParticle;
use crate::shapes::{ellipse, mascot as parts, rect, Outline, DEFAULT_CURVE_STEPS};
use crate::shared::BurstKind;

/// Gradient band height, scene units.
const GRADIENT_BAND: f32 = 4.0;

const CONFETTI_COLORS: [Color; 5] = [ACCENT_BLUE, BLUSH_PINK, WINDOW_LIT, AURORA_GREEN, AURORA_VIOLET];

/// Scene point → world point for a camera centred on the scene.
pub fn to_world(p: Vec2, scene: Vec2) -> Vec2 {
    Vec2::new(p.x - scene.x * 0.5, scene.y * 0.5 - p.y)
}

pub fn outline(gizmos: &mut Gizmos, shape: &Outline, color: Color, scene: Vec2) {
    for line in shape.flatten(DEFAULT_CURVE_STEPS) {
        gizmos.linestrip_2d(line.into_iter().map(|p| to_world(p, scene)), color);
    }
}

pub fn layer(gizmos: &mut Gizmos, layer: &Layer, scene: Vec2) {
    if !layer.visible || layer.opacity <= 0.0 {
        return;
    }
    let alpha = layer.opacity;
    for primitive in &layer.primitives {
        match primitive {
            Primitive::Gradient { rect: area, stops } => {
                let bands = (area.height() / GRADIENT_BAND).ceil().max(1.0) as usize;
                for i in 0..=bands {
                    let t = i as f32 / bands as f32;
                    let y = area.min.y + area.height() * t;
                    gizmos.line_2d(
                        to_world(Vec2::new(area.min.x, y), scene),
                        to_world(Vec2::new(area.max.x, y), scene),
                        with_opacity(sample_gradient(stops, t), alpha),
                    );
                }
            }
            Primitive::Path { outline: shape, color } => {
                outline(gizmos, shape, with_opacity(*color, alpha), scene);
            }
            Primitive::Dot { center, radius, color } => {
                gizmos.circle_2d(
                    Isometry2d::from_translation(to_world(*center, scene)),
                    *radius,
                    with_opacity(*color, alpha),
                );
            }
            Primitive::Segment { from, to, color } => {
                gizmos.line_2d(
                    to_world(*from, scene),
                    to_world(*to, scene),
                    with_opacity(*color, alpha),
                );
            }
            Primitive::Wash { rect: area, color } => {
                gizmos.rect_2d(
                    Isometry2d::from_translation(to_world(area.center(), scene)),
                    area.size(),
                    with_opacity(*color, alpha),
                );
            }
        }
    }
}

/// Shape for one burst particle in scene space.
pub fn burst_shape(p: &BurstParticle) -> Outline {
    let center = p.position();
    let half = p.size * p.scale() * 0.5;
    match p.kind {
        BurstKind::Confetti => rect(center - Vec2::new(half, half * 0.5), center + Vec2::new(half, half * 0.5))
            .rotated(center, p.rotation),
        BurstKind::Sparkle => parts::sparkle().fit(Rect::from_center_half_size(center, Vec2::splat(half))),
        BurstKind::FishReward => {
            let mut fish = ellipse(center, half, half * 0.45);
            fish.append(crate::shapes::polygon(&[
                center + Vec2::new(half * 0.9, 0.0),
                center + Vec2::new(half * 1.5, -half * 0.4),
                center + Vec2::new(half * 1.5, half * 0.4),
            ]));
            fish.rotated(center, p.rotation)
        }
    }
}

pub fn burst_color(p: &BurstParticle) -> Color {
    let base = match p.kind {
        BurstKind::Confetti => CONFETTI_COLORS[p.color_index as usize % CONFETTI_COLORS.len()],
        BurstKind::Sparkle => WINDOW_LIT,
        BurstKind::FishReward => FISH_SILVER,
    };
    with_opacity(base, p.opacity())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_corners_map_to_world_corners() {
        let scene = Vec2::new(390.0, 844.0);
        assert_eq!(to_world(Vec2::ZERO, scene), Vec2::new(-195.0, 422.0));
        assert_eq!(to_world(scene, scene), Vec2::new(195.0, -422.0));
        assert_eq!(to_world(scene * 0.5, scene), Vec2::ZERO);
    }
}
