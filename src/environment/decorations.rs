//! Stage-tier decoration layouts and unlockable props.
//!
//! Every tier owns a fixed layout; nothing here is computed from the level
//! number. Only two details look at the time of day: lodge windows glow at
//! dusk and night, and chimney or campfire smoke is hidden in full daylight.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use super::layers::Primitive;
use crate::palette::*;
use crate::shapes::{props, terrain};
use crate::shared::{StageTier, TimeOfDay};

/// Fixed seed so the icicle fringe is the same every frame.
const ICICLE_SEED: u64 = 0x1c1c1e;

const SNOW: Color = Color::srgb(0.96, 0.98, 1.0);
const SNOW_SHADE: Color = Color::srgb(0.80, 0.87, 0.95);
const ICE_EDGE: Color = Color::srgb(0.70, 0.86, 0.96);
const SMOKE: Color = Color::srgba(0.85, 0.87, 0.92, 0.55);
const FLAG_RED: Color = Color::srgb(0.90, 0.25, 0.25);
const LODGE_WALL: Color = Color::srgb(0.55, 0.36, 0.22);
const LODGE_ROOF: Color = Color::srgb(0.35, 0.22, 0.16);

/// Props a host can unlock, drawn on top of the tier layout.
pub const KNOWN_PROPS: [&str; 5] = ["fish_bucket", "snowflake_charm", "summit_flag", "beanie_post", "spare_rod"];

/// Platform the mascot stands on, in scene coordinates.
pub fn platform_rect(size: Vec2) -> Rect {
    Rect::new(size.x * 0.06, size.y * 0.68, size.x * 0.94, size.y * 0.88)
}

/// The walkable surface line of the platform.
pub fn platform_surface_y(platform: Rect) -> f32 {
    platform.min.y + platform.height() * 0.16
}

pub fn windows_lit(time: TimeOfDay) -> bool {
    matches!(time, TimeOfDay::Dusk | TimeOfDay::Night)
}

pub fn smoke_visible(time: TimeOfDay) -> bool {
    !matches!(time, TimeOfDay::Day)
}

/// Place a decoration standing on the platform surface. `cx` is a fraction
/// of the platform width; `w` and `h` are fractions of the platform width.
fn standing(platform: Rect, cx: f32, w: f32, h: f32) -> Rect {
    let pw = platform.width();
    let bottom = platform_surface_y(platform);
    let center_x = platform.min.x + pw * cx;
    Rect::new(
        center_x - pw * w * 0.5,
        bottom - pw * h,
        center_x + pw * w * 0.5,
        bottom,
    )
}

fn path(outline: crate::shapes::Outline, bounds: Rect, color: Color) -> Primitive {
    Primitive::Path {
        outline: outline.fit(bounds),
        color,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecorationContext<'a> {
    pub stage: StageTier,
    pub time: TimeOfDay,
    pub unlocked_props: &'a HashSet<String>,
    pub platform: Rect,
    /// Running animation clock; frozen at 0 under reduce motion.
    pub clock: f32,
}

pub fn stage_decorations(ctx: &DecorationContext) -> Vec<Primitive> {
    let p = ctx.platform;
    let mut out = Vec::new();
    match ctx.stage {
        StageTier::BareIce => {
            out.push(path(terrain::snow_drift(&[0.4, 0.7, 0.3]), standing(p, 0.18, 0.26, 0.06), SNOW));
            out.push(path(terrain::snow_drift(&[0.3, 0.5, 0.6, 0.2]), standing(p, 0.80, 0.30, 0.05), SNOW));
            let mut rng = StdRng::seed_from_u64(ICICLE_SEED);
            let fringe = Rect::new(
                p.min.x + p.width() * 0.15,
                platform_surface_y(p) + p.height() * 0.2,
                p.max.x - p.width() * 0.15,
                p.max.y - p.height() * 0.15,
            );
            out.push(path(terrain::icicles(9, 0.8, &mut rng), fringe, ICE_EDGE));
        }
        StageTier::SnowNest => {
            out.push(path(props::snow_wall(5), standing(p, 0.16, 0.22, 0.10), SNOW_SHADE));
            out.push(path(props::snow_wall(5), standing(p, 0.84, 0.22, 0.10), SNOW_SHADE));
            out.push(path(terrain::snow_drift(&[0.5, 0.8, 0.5]), standing(p, 0.5, 0.5, 0.04), SNOW));
        }
        StageTier::FishingPier => {
            out.push(path(props::dock(6), standing(p, 0.82, 0.34, 0.12), WOOD_BROWN));
            out.push(path(props::fishing_rod(), standing(p, 0.90, 0.16, 0.22), WOOD_BROWN));
            out.push(path(props::fish(0.25), standing(p, 0.70, 0.08, 0.04), FISH_SILVER));
        }
        StageTier::CozyCamp => {
            out.push(path(props::igloo(0.28), standing(p, 0.20, 0.30, 0.18), SNOW));
            out.push(path(props::igloo_blocks(4), standing(p, 0.20, 0.30, 0.18), SNOW_SHADE));
            out.push(path(props::campfire_logs(), standing(p, 0.80, 0.12, 0.05), WOOD_BROWN));
            out.push(path(props::flame(ctx.clock * 7.0), standing(p, 0.80, 0.08, 0.09), FLAME_ORANGE));
            if smoke_visible(ctx.time) {
                let mut smoke = standing(p, 0.80, 0.10, 0.30);
                smoke.max.y -= p.width() * 0.08;
                smoke.min.y -= p.width() * 0.08;
                out.push(path(props::smoke_puffs(4, (ctx.clock * 0.25).fract()), smoke, SMOKE));
            }
        }
        StageTier::SummitLodge => {
            let lodge = standing(p, 0.24, 0.36, 0.30);
            out.push(path(props::lodge(), lodge, LODGE_WALL));
            let window = if windows_lit(ctx.time) { WINDOW_LIT } else { WINDOW_DARK };
            out.push(path(props::lodge_windows(), lodge, window));
            if smoke_visible(ctx.time) {
                // Above the chimney, which sits at x 0.70..0.80 of the lodge box.
                let cx = lodge.min.x + lodge.width() * 0.75;
                let top = lodge.min.y + lodge.height() * 0.08;
                let w = lodge.width() * 0.2;
                let smoke = Rect::new(cx - w * 0.5, top - w * 1.6, cx + w * 0.5, top);
                out.push(path(props::smoke_puffs(4, (ctx.clock * 0.2).fract()), smoke, SMOKE));
            }
            out.push(path(props::summit_flag(ctx.clock * 3.0), standing(p, 0.86, 0.14, 0.26), FLAG_RED));
            out.push(path(props::campfire_logs(), standing(p, 0.64, 0.10, 0.04), WOOD_BROWN));
            out.push(path(props::flame(ctx.clock * 7.0), standing(p, 0.64, 0.07, 0.08), FLAME_ORANGE));
        }
    }
    out.extend(unlocked_props(ctx));
    out
}

/// Draw every recognised unlocked prop, in a stable order.
fn unlocked_props(ctx: &DecorationContext) -> Vec<Primitive> {
    let p = ctx.platform;
    KNOWN_PROPS
        .iter()
        .filter(|id| ctx.unlocked_props.contains(**id))
        .filter_map(|id| prop_primitive(id, p, ctx.clock))
        .collect()
}

/// Primitive for one unlockable prop, or `None` for an unknown id.
pub fn prop_primitive(id: &str, platform: Rect, clock: f32) -> Option<Primitive> {
    let prim = match id {
        "fish_bucket" => path(props::fish(0.3), standing(platform, 0.36, 0.07, 0.035), FISH_SILVER),
        "snowflake_charm" => path(props::snowflake(6, 0.12), standing(platform, 0.62, 0.06, 0.06), ICE_EDGE),
        "summit_flag" => path(props::summit_flag(clock * 3.0), standing(platform, 0.06, 0.10, 0.18), FLAG_RED),
        "beanie_post" => path(props::beanie(), standing(platform, 0.94, 0.07, 0.06), ACCENT_BLUE),
        "spare_rod" => path(props::fishing_rod(), standing(platform, 0.42, 0.10, 0.14), WOOD_BROWN),
        _ => return None,
    };
    Some(prim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(stage: StageTier, time: TimeOfDay, props: &'a HashSet<String>) -> DecorationContext<'a> {
        DecorationContext {
            stage,
            time,
            unlocked_props: props,
            platform: platform_rect(Vec2::new(390.0, 844.0)),
            clock: 0.0,
        }
    }

    fn colors(prims: &[Primitive]) -> Vec<Color> {
        prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Path { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn every_tier_has_a_layout() {
        let none = HashSet::new();
        for stage in StageTier::ALL {
            assert!(!stage_decorations(&ctx(stage, TimeOfDay::Day, &none)).is_empty(), "{stage:?}");
        }
    }

    #[test]
    fn layout_ignores_mood_and_time_apart_from_windows_and_smoke() {
        let none = HashSet::new();
        let day = stage_decorations(&ctx(StageTier::FishingPier, TimeOfDay::Day, &none));
        let night = stage_decorations(&ctx(StageTier::FishingPier, TimeOfDay::Night, &none));
        assert_eq!(day, night);
    }

    #[test]
    fn lodge_windows_glow_only_after_dark() {
        let none = HashSet::new();
        for time in TimeOfDay::ALL {
            let lit = colors(&stage_decorations(&ctx(StageTier::SummitLodge, time, &none)))
                .contains(&WINDOW_LIT);
            assert_eq!(lit, windows_lit(time), "{time:?}");
        }
    }

    #[test]
    fn campfire_smoke_hidden_in_daylight() {
        let none = HashSet::new();
        let day = stage_decorations(&ctx(StageTier::CozyCamp, TimeOfDay::Day, &none));
        let dusk = stage_decorations(&ctx(StageTier::CozyCamp, TimeOfDay::Dusk, &none));
        assert_eq!(dusk.len(), day.len() + 1);
    }

    #[test]
    fn unknown_props_are_skipped() {
        let props: HashSet<String> = ["fish_bucket", "no_such_prop"].iter().map(|s| s.to_string()).collect();
        let none = HashSet::new();
        let base = stage_decorations(&ctx(StageTier::BareIce, TimeOfDay::Day, &none)).len();
        let with = stage_decorations(&ctx(StageTier::BareIce, TimeOfDay::Day, &props)).len();
        assert_eq!(with, base + 1);
        assert!(prop_primitive("no_such_prop", Rect::new(0.0, 0.0, 1.0, 1.0), 0.0).is_none());
    }

    #[test]
    fn decorations_stand_on_the_platform() {
        let p = platform_rect(Vec2::new(390.0, 844.0));
        let r = standing(p, 0.5, 0.2, 0.1);
        assert!((r.max.y - platform_surface_y(p)).abs() < 1e-4);
        assert!((r.center().x - p.center().x).abs() < 1e-3);
    }
}
