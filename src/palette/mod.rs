//! Palette and mood resolution.
//!
//! Two total lookup tables: time of day → colours and celestial flags, and
//! mood → brightness / aurora / snow multipliers. Every enum value has an
//! exhaustive `match` arm, so adding a variant without a table entry fails
//! to compile. There is no interpolation between buckets; crossing a
//! boundary is a hard cut.

use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// TIME OF DAY
// ═══════════════════════════════════════════════════════════════════════

/// One stop of the vertical sky gradient (0 = top, 1 = horizon).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyStop {
    pub offset: f32,
    pub color: Color,
}

const fn stop(offset: f32, r: f32, g: f32, b: f32) -> SkyStop {
    SkyStop {
        offset,
        color: Color::srgb(r, g, b),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IceTints {
    pub top: Color,
    pub face: Color,
    pub shadow: Color,
}

/// Which sky features are on for a time of day. The compositor reads these
/// instead of comparing times itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelestialFlags {
    pub show_stars: bool,
    pub show_moon: bool,
    pub show_sun_glow: bool,
    pub show_aurora: bool,
    pub show_clouds: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePalette {
    pub sky_stops: [SkyStop; 3],
    /// Far, mid, near.
    pub mountain_tints: [Color; 3],
    pub snow_cap_tint: Color,
    pub ice: IceTints,
    pub sun_glow: Color,
    pub flags: CelestialFlags,
}

pub fn time_palette(time: TimeOfDay) -> TimePalette {
    match time {
        TimeOfDay::Dawn => TimePalette {
            sky_stops: [
                stop(0.0, 0.42, 0.47, 0.72),
                stop(0.55, 0.93, 0.66, 0.62),
                stop(1.0, 1.0, 0.84, 0.66),
            ],
            mountain_tints: [
                Color::srgb(0.62, 0.60, 0.76),
                Color::srgb(0.50, 0.50, 0.68),
                Color::srgb(0.38, 0.40, 0.58),
            ],
            snow_cap_tint: Color::srgb(1.0, 0.92, 0.88),
            ice: IceTints {
                top: Color::srgb(0.96, 0.93, 0.95),
                face: Color::srgb(0.74, 0.80, 0.92),
                shadow: Color::srgb(0.55, 0.60, 0.78),
            },
            sun_glow: Color::srgb(1.0, 0.78, 0.55),
            flags: CelestialFlags {
                show_stars: false,
                show_moon: false,
                show_sun_glow: true,
                show_aurora: false,
                show_clouds: true,
            },
        },
        TimeOfDay::Day => TimePalette {
            sky_stops: [
                stop(0.0, 0.36, 0.62, 0.92),
                stop(0.6, 0.62, 0.80, 0.97),
                stop(1.0, 0.86, 0.93, 1.0),
            ],
            mountain_tints: [
                Color::srgb(0.72, 0.80, 0.90),
                Color::srgb(0.56, 0.66, 0.80),
                Color::srgb(0.42, 0.52, 0.68),
            ],
            snow_cap_tint: Color::srgb(1.0, 1.0, 1.0),
            ice: IceTints {
                top: Color::srgb(0.97, 0.99, 1.0),
                face: Color::srgb(0.70, 0.86, 0.96),
                shadow: Color::srgb(0.48, 0.68, 0.86),
            },
            sun_glow: Color::srgb(1.0, 0.96, 0.82),
            flags: CelestialFlags {
                show_stars: false,
                show_moon: false,
                show_sun_glow: false,
                show_aurora: false,
                show_clouds: true,
            },
        },
        TimeOfDay::Dusk => TimePalette {
            sky_stops: [
                stop(0.0, 0.20, 0.18, 0.42),
                stop(0.5, 0.62, 0.36, 0.52),
                stop(1.0, 0.98, 0.56, 0.40),
            ],
            mountain_tints: [
                Color::srgb(0.44, 0.34, 0.52),
                Color::srgb(0.34, 0.26, 0.44),
                Color::srgb(0.24, 0.19, 0.34),
            ],
            snow_cap_tint: Color::srgb(0.98, 0.80, 0.78),
            ice: IceTints {
                top: Color::srgb(0.90, 0.82, 0.88),
                face: Color::srgb(0.60, 0.56, 0.76),
                shadow: Color::srgb(0.40, 0.36, 0.58),
            },
            sun_glow: Color::srgb(1.0, 0.55, 0.35),
            flags: CelestialFlags {
                show_stars: true,
                show_moon: false,
                show_sun_glow: true,
                show_aurora: false,
                show_clouds: false,
            },
        },
        TimeOfDay::Night => TimePalette {
            sky_stops: [
                stop(0.0, 0.02, 0.03, 0.10),
                stop(0.6, 0.05, 0.08, 0.20),
                stop(1.0, 0.10, 0.14, 0.30),
            ],
            mountain_tints: [
                Color::srgb(0.14, 0.17, 0.30),
                Color::srgb(0.10, 0.12, 0.24),
                Color::srgb(0.06, 0.08, 0.17),
            ],
            snow_cap_tint: Color::srgb(0.72, 0.78, 0.92),
            ice: IceTints {
                top: Color::srgb(0.64, 0.70, 0.86),
                face: Color::srgb(0.30, 0.38, 0.58),
                shadow: Color::srgb(0.18, 0.22, 0.40),
            },
            sun_glow: Color::srgb(0.0, 0.0, 0.0),
            flags: CelestialFlags {
                show_stars: true,
                show_moon: true,
                show_sun_glow: false,
                show_aurora: true,
                show_clouds: false,
            },
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MOOD
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodProfile {
    /// Multiplies layer opacity/lightness, 0..=2.
    pub brightness_factor: f32,
    /// Aurora gate and intensity, 0..=1.
    pub aurora_opacity: f32,
    /// Multiplies snow spawn counts, 0..=2.
    pub snow_intensity: f32,
}

pub fn mood_profile(mood: Mood) -> MoodProfile {
    match mood {
        Mood::Cold => MoodProfile {
            brightness_factor: 0.85,
            aurora_opacity: 0.0,
            snow_intensity: 1.0,
        },
        Mood::Warming => MoodProfile {
            brightness_factor: 0.95,
            aurora_opacity: 0.2,
            snow_intensity: 0.7,
        },
        Mood::Productive => MoodProfile {
            brightness_factor: 1.05,
            aurora_opacity: 0.45,
            snow_intensity: 0.4,
        },
        Mood::Golden => MoodProfile {
            brightness_factor: 1.2,
            aurora_opacity: 0.8,
            snow_intensity: 0.2,
        },
        Mood::Stormy => MoodProfile {
            brightness_factor: 0.6,
            aurora_opacity: 0.0,
            snow_intensity: 1.5,
        },
    }
}

impl Mood {
    pub fn profile(self) -> MoodProfile {
        mood_profile(self)
    }

    pub fn brightness_factor(self) -> f32 {
        mood_profile(self).brightness_factor
    }

    pub fn aurora_opacity(self) -> f32 {
        mood_profile(self).aurora_opacity
    }

    pub fn snow_intensity(self) -> f32 {
        mood_profile(self).snow_intensity
    }
}

impl TimeOfDay {
    pub fn palette(self) -> TimePalette {
        time_palette(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COLOUR HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Multiply a colour's alpha, clamped to 0..1.
pub fn with_opacity(color: Color, factor: f32) -> Color {
    let c = color.to_srgba();
    Color::srgba(c.red, c.green, c.blue, (c.alpha * factor).clamp(0.0, 1.0))
}

/// Scale lightness by `factor` (RGB multiply, clamped).
pub fn brighten(color: Color, factor: f32) -> Color {
    let c = color.to_srgba();
    Color::srgba(
        (c.red * factor).clamp(0.0, 1.0),
        (c.green * factor).clamp(0.0, 1.0),
        (c.blue * factor).clamp(0.0, 1.0),
        c.alpha,
    )
}

/// Sample a gradient at `t` (0..1). Used only for drawing bands of a single
/// gradient, never to blend between time buckets.
pub fn sample_gradient(stops: &[SkyStop], t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let Some(first) = stops.first() else {
        return Color::BLACK;
    };
    if t <= first.offset {
        return first.color;
    }
    let last = stops[stops.len() - 1];
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let range = (b.offset - a.offset).max(1e-4);
            let frac = (t - a.offset) / range;
            let (ca, cb) = (a.color.to_srgba(), b.color.to_srgba());
            return Color::srgba(
                ca.red + (cb.red - ca.red) * frac,
                ca.green + (cb.green - ca.green) * frac,
                ca.blue + (cb.blue - ca.blue) * frac,
                ca.alpha + (cb.alpha - ca.alpha) * frac,
            );
        }
    }
    last.color
}

// Fixed mascot and prop colours.
pub const PLUMAGE_DARK: Color = Color::srgb(0.102, 0.102, 0.180);
pub const PLUMAGE_HIGHLIGHT: Color = Color::srgb(0.165, 0.165, 0.259);
pub const BELLY_WHITE: Color = Color::srgb(0.961, 0.961, 0.969);
pub const ACCENT_BLUE: Color = Color::srgb(0.0, 0.478, 1.0);
pub const ACCENT_BLUE_LIGHT: Color = Color::srgb(0.2, 0.6, 1.0);
pub const EYE_BLACK: Color = Color::srgb(0.039, 0.039, 0.055);
pub const EYE_WHITE: Color = Color::WHITE;
pub const BLUSH_PINK: Color = Color::srgb(1.0, 0.42, 0.54);
pub const FLAME_ORANGE: Color = Color::srgb(1.0, 0.55, 0.15);
pub const WOOD_BROWN: Color = Color::srgb(0.45, 0.30, 0.18);
pub const WINDOW_LIT: Color = Color::srgb(1.0, 0.85, 0.45);
pub const WINDOW_DARK: Color = Color::srgb(0.25, 0.30, 0.40);
pub const AURORA_GREEN: Color = Color::srgb(0.35, 1.0, 0.65);
pub const AURORA_VIOLET: Color = Color::srgb(0.62, 0.45, 1.0);
pub const STORM_TINT: Color = Color::srgba(0.08, 0.10, 0.16, 0.35);
pub const FISH_SILVER: Color = Color::srgb(0.72, 0.80, 0.88);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_time_of_day_resolves_a_full_palette() {
        for time in TimeOfDay::ALL {
            let p = time_palette(time);
            assert_eq!(p.sky_stops.len(), 3);
            assert_eq!(p.sky_stops[0].offset, 0.0);
            assert_eq!(p.sky_stops[2].offset, 1.0);
            assert!(p.sky_stops.windows(2).all(|w| w[0].offset < w[1].offset));
            assert_eq!(p.mountain_tints.len(), 3);
        }
    }

    #[test]
    fn every_mood_stays_in_documented_ranges() {
        for mood in Mood::ALL {
            let p = mood_profile(mood);
            assert!((0.0..=2.0).contains(&p.brightness_factor), "{mood:?}");
            assert!((0.0..=1.0).contains(&p.aurora_opacity), "{mood:?}");
            assert!((0.0..=2.0).contains(&p.snow_intensity), "{mood:?}");
        }
    }

    #[test]
    fn celestial_flags_follow_the_clock() {
        assert!(time_palette(TimeOfDay::Night).flags.show_moon);
        assert!(time_palette(TimeOfDay::Night).flags.show_stars);
        assert!(time_palette(TimeOfDay::Dusk).flags.show_stars);
        assert!(!time_palette(TimeOfDay::Dusk).flags.show_moon);
        assert!(time_palette(TimeOfDay::Dawn).flags.show_sun_glow);
        assert!(!time_palette(TimeOfDay::Day).flags.show_stars);
        assert!(time_palette(TimeOfDay::Day).flags.show_clouds);
    }

    #[test]
    fn stormy_snows_hardest() {
        let stormy = Mood::Stormy.snow_intensity();
        assert!(Mood::ALL.iter().all(|m| m.snow_intensity() <= stormy));
        assert_eq!(stormy, 1.5);
    }

    #[test]
    fn opacity_helper_clamps() {
        let c = with_opacity(Color::srgba(1.0, 1.0, 1.0, 0.8), 2.0);
        assert_eq!(c.to_srgba().alpha, 1.0);
        let c = brighten(Color::srgb(0.8, 0.5, 0.1), 2.0);
        assert_eq!(c.to_srgba().red, 1.0);
    }

    #[test]
    fn gradient_sampling_hits_its_stops() {
        let stops = time_palette(TimeOfDay::Day).sky_stops;
        assert_eq!(sample_gradient(&stops, 0.0), stops[0].color);
        assert_eq!(sample_gradient(&stops, 1.0), stops[2].color);
    }
}
