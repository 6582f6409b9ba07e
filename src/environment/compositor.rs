//! Layer compositor: scene inputs in, ordered layer stack out.
//!
//! Immediate mode. The stack is rebuilt from the current inputs every frame;
//! nothing is diffed or retained between calls. Layer order never changes,
//! only visibility and opacity.

use bevy::prelude::*;
use std::collections::HashSet;

use super::decorations::{platform_rect, stage_decorations, DecorationContext};
use super::layers::{Layer, LayerKind, LayerStack, Primitive};
use crate::palette::*;
use crate::particles::{SnowPool, WindPool};
use crate::shapes::{sky, terrain, Outline};
use crate::shared::{Mood, StageTier, TimeOfDay};

const STAR_SEED: u64 = 0x57a2;
const STAR_COUNT: usize = 60;
const AURORA_SAMPLES: usize = 48;
const CLOUD_DRIFT_SPEED: f32 = 6.0;
const SNOW_COLOR: Color = Color::WHITE;
const WIND_COLOR: Color = Color::srgb(0.85, 0.90, 1.0);

/// Everything the compositor reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub time: TimeOfDay,
    pub mood: Mood,
    pub stage: StageTier,
    pub unlocked_props: &'a HashSet<String>,
    pub size: Vec2,
    pub reduce_motion: bool,
    /// Seconds of scene animation; frozen under reduce motion.
    pub clock: f32,
    /// Current lightning flash opacity.
    pub lightning: f32,
}

pub fn compose(frame: &FrameInputs, snow: &SnowPool, wind: &WindPool) -> LayerStack {
    let palette = time_palette(frame.time);
    let profile = mood_profile(frame.mood);
    let scene = Rect::from_corners(Vec2::ZERO, frame.size);
    let w = frame.size.x;
    let h = frame.size.y;
    let flags = palette.flags;

    LayerStack::build(|kind| match kind {
        LayerKind::Sky => Layer::shown(
            kind,
            1.0,
            vec![Primitive::Gradient {
                rect: scene,
                stops: palette.sky_stops,
            }],
        ),
        LayerKind::Stars if flags.show_stars => Layer::shown(kind, 1.0, stars(frame)),
        LayerKind::Moon if flags.show_moon => {
            let r = w * 0.06;
            let c = Vec2::new(w * 0.78, h * 0.12);
            Layer::shown(
                kind,
                1.0,
                vec![Primitive::Path {
                    outline: sky::moon(0.72).fit(Rect::from_center_half_size(c, Vec2::splat(r))),
                    color: Color::srgb(0.98, 0.96, 0.86),
                }],
            )
        }
        LayerKind::SunGlow if flags.show_sun_glow => {
            let c = Vec2::new(w * 0.5, h * 0.46);
            let half = Vec2::splat(w * 0.55);
            let rings = sky::sun_glow(5)
                .into_iter()
                .map(|(outline, opacity)| Primitive::Path {
                    outline: outline.fit(Rect::from_center_half_size(c, half)),
                    color: with_opacity(palette.sun_glow, opacity),
                })
                .collect();
            Layer::shown(kind, 1.0, rings)
        }
        LayerKind::Aurora if flags.show_aurora && profile.aurora_opacity > 0.0 => {
            let band = Rect::new(0.0, h * 0.05, w, h * 0.30);
            let phase = frame.clock * 0.6;
            let prims = vec![
                Primitive::Path {
                    outline: sky::aurora_band(phase, 0.35, 0.25, AURORA_SAMPLES).fit(band),
                    color: AURORA_GREEN,
                },
                Primitive::Path {
                    outline: sky::aurora_band(phase + 1.7, 0.25, 0.18, AURORA_SAMPLES).fit(band),
                    color: AURORA_VIOLET,
                },
            ];
            Layer::shown(kind, profile.aurora_opacity, prims)
        }
        LayerKind::FarMountains => mountains(
            kind,
            terrain::FAR_RANGE,
            Rect::new(0.0, h * 0.30, w, h * 0.58),
            palette.mountain_tints[0],
            None,
            profile.brightness_factor,
        ),
        LayerKind::MidMountains => mountains(
            kind,
            terrain::MID_RANGE,
            Rect::new(0.0, h * 0.36, w, h * 0.64),
            palette.mountain_tints[1],
            Some(palette.snow_cap_tint),
            profile.brightness_factor,
        ),
        LayerKind::CloudWisps if flags.show_clouds => {
            Layer::shown(kind, 0.8 * profile.brightness_factor.min(1.0), clouds(frame))
        }
        LayerKind::NearMountains => mountains(
            kind,
            terrain::NEAR_RANGE,
            Rect::new(0.0, h * 0.50, w, h * 0.74),
            palette.mountain_tints[2],
            Some(palette.snow_cap_tint),
            profile.brightness_factor,
        ),
        LayerKind::IcePlatform => {
            let p = platform_rect(frame.size);
            let ground = Rect::new(0.0, h * 0.74, w, h);
            Layer::shown(
                kind,
                1.0,
                vec![
                    Primitive::Wash {
                        rect: ground,
                        color: brighten(palette.ice.shadow, profile.brightness_factor),
                    },
                    Primitive::Path {
                        outline: terrain::ice_platform(0.22).fit(p),
                        color: brighten(palette.ice.face, profile.brightness_factor),
                    },
                    Primitive::Path {
                        outline: terrain::snow_drift(&[0.5, 0.6, 0.5, 0.6]).fit(Rect::new(
                            p.min.x + p.width() * 0.04,
                            p.min.y,
                            p.max.x - p.width() * 0.04,
                            p.min.y + p.height() * 0.16,
                        )),
                        color: palette.ice.top,
                    },
                ],
            )
        }
        LayerKind::StageDecorations => Layer::shown(
            kind,
            1.0,
            stage_decorations(&DecorationContext {
                stage: frame.stage,
                time: frame.time,
                unlocked_props: frame.unlocked_props,
                platform: platform_rect(frame.size),
                clock: frame.clock,
            }),
        ),
        LayerKind::Snow if !frame.reduce_motion && !snow.is_empty() => {
            let dots = snow
                .particles()
                .iter()
                .map(|f| Primitive::Dot {
                    center: f.position(),
                    radius: f.size * 0.5,
                    color: with_opacity(SNOW_COLOR, f.opacity),
                })
                .collect();
            Layer::shown(kind, 1.0, dots)
        }
        LayerKind::StormOverlay if frame.mood == Mood::Stormy => {
            let mut prims = vec![Primitive::Wash {
                rect: scene,
                color: STORM_TINT,
            }];
            if !frame.reduce_motion {
                prims.extend(wind.particles().iter().map(|s| Primitive::Segment {
                    from: s.tail(),
                    to: s.head,
                    color: with_opacity(WIND_COLOR, s.opacity),
                }));
            }
            if frame.lightning > 0.0 {
                prims.push(Primitive::Wash {
                    rect: scene,
                    color: with_opacity(Color::WHITE, frame.lightning * 0.6),
                });
            }
            Layer::shown(kind, 1.0, prims)
        }
        _ => Layer::hidden(kind),
    })
}

fn mountains(
    kind: LayerKind,
    peaks: &[terrain::Peak],
    bounds: Rect,
    tint: Color,
    caps: Option<Color>,
    brightness: f32,
) -> Layer {
    let mut prims = vec![Primitive::Path {
        outline: terrain::mountain_range(peaks).fit(bounds),
        color: brighten(tint, brightness),
    }];
    if let Some(cap) = caps {
        prims.push(Primitive::Path {
            outline: terrain::snow_caps(peaks, 0.28).fit(bounds),
            color: cap,
        });
    }
    Layer::shown(kind, brightness, prims)
}

fn stars(frame: &FrameInputs) -> Vec<Primitive> {
    let w = frame.size.x;
    let h = frame.size.y;
    sky::star_field(STAR_COUNT, STAR_SEED, 0.45)
        .into_iter()
        .map(|s| {
            let twinkle = if frame.reduce_motion { 1.0 } else { s.twinkle(frame.clock) };
            Primitive::Dot {
                center: Vec2::new(s.position.x * w, s.position.y * h),
                radius: s.radius * w,
                color: with_opacity(Color::WHITE, twinkle),
            }
        })
        .collect()
}

fn clouds(frame: &FrameInputs) -> Vec<Primitive> {
    let w = frame.size.x;
    let h = frame.size.y;
    let drift = frame.clock * CLOUD_DRIFT_SPEED;
    [(0.15, 0.20, 0.34, 4), (0.62, 0.26, 0.28, 3), (0.90, 0.16, 0.22, 3)]
        .into_iter()
        .map(|(x, y, width, puffs): (f32, f32, f32, usize)| {
            let span = w * (1.0 + width);
            let left = (x * w + drift).rem_euclid(span) - w * width;
            let cloud: Outline = sky::cloud_wisp(puffs);
            Primitive::Path {
                outline: cloud.fit(Rect::new(left, h * y, left + w * width, h * (y + 0.04))),
                color: with_opacity(Color::WHITE, 0.7),
            }
        })
        .collect()
}
