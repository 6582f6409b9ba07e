//! Sky elements: aurora ribbons, star fields, moon, sun glow, cloud wisps.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use super::{circle, ellipse, Outline, KAPPA};

/// Composite sine used for the aurora edge. Three harmonics drifting at
/// different speeds so the ribbon never visibly repeats.
pub fn aurora_wave(x: f32, phase: f32) -> f32 {
    (x * TAU * 1.0 + phase).sin() * 0.5
        + (x * TAU * 2.3 - phase * 1.7).sin() * 0.3
        + (x * TAU * 4.1 + phase * 0.6).sin() * 0.2
}

/// Closed aurora ribbon: top edge follows the wave, bottom edge follows it
/// with a thickness that breathes along x. `samples < 2` is degenerate.
pub fn aurora_band(phase: f32, amplitude: f32, thickness: f32, samples: usize) -> Outline {
    if samples < 2 {
        return Outline::empty();
    }
    let amp = amplitude.clamp(0.0, 0.5);
    let thick = thickness.clamp(0.01, 1.0);
    let mid = 0.5;
    let mut top = Vec::with_capacity(samples);
    let mut bottom = Vec::with_capacity(samples);
    for i in 0..samples {
        let x = i as f32 / (samples - 1) as f32;
        let y = mid + aurora_wave(x, phase) * amp - thick * 0.5;
        let local = thick * (0.6 + 0.4 * (x * TAU * 1.5 + phase * 0.8).sin().abs());
        top.push(Vec2::new(x, y.clamp(0.0, 1.0)));
        bottom.push(Vec2::new(x, (y + local).clamp(0.0, 1.0)));
    }
    let mut o = Outline::empty();
    o.move_to(top[0]);
    for &p in &top[1..] {
        o.line_to(p);
    }
    for &p in bottom.iter().rev() {
        o.line_to(p);
    }
    o.close();
    o
}

/// One star in a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    /// Offset into the twinkle cycle, radians.
    pub twinkle_phase: f32,
}

impl Star {
    /// Opacity multiplier at `time` seconds.
    pub fn twinkle(&self, time: f32) -> f32 {
        0.55 + 0.45 * (time * 1.7 + self.twinkle_phase).sin()
    }
}

/// Deterministic star field in the upper `max_y` band of the sky.
pub fn star_field(count: usize, seed: u64, max_y: f32) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_y = max_y.clamp(0.05, 1.0);
    (0..count)
        .map(|_| Star {
            position: Vec2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..max_y)),
            radius: rng.gen_range(0.002..0.006),
            twinkle_phase: rng.gen_range(0.0..TAU),
        })
        .collect()
}

/// Crescent moon: outer disc with an inner bite. `fullness` 0 is a thin
/// sliver, 1 a full disc.
pub fn moon(fullness: f32) -> Outline {
    let f = fullness.clamp(0.0, 1.0);
    if f >= 0.999 {
        return circle(Vec2::splat(0.5), 0.5);
    }
    let bite = 0.5 * (1.0 - f);
    let mut o = Outline::empty();
    // Outer right arc, top to bottom.
    o.move_to(Vec2::new(0.5, 0.0))
        .cubic_to(
            Vec2::new(0.5 + 0.5 * KAPPA, 0.0),
            Vec2::new(1.0, 0.5 - 0.5 * KAPPA),
            Vec2::new(1.0, 0.5),
        )
        .cubic_to(
            Vec2::new(1.0, 0.5 + 0.5 * KAPPA),
            Vec2::new(0.5 + 0.5 * KAPPA, 1.0),
            Vec2::new(0.5, 1.0),
        )
        // Outer left arc back up.
        .cubic_to(
            Vec2::new(0.5 - 0.5 * KAPPA, 1.0),
            Vec2::new(0.0, 0.5 + 0.5 * KAPPA),
            Vec2::new(0.0, 0.5),
        );
    // Inner terminator curve from the left edge back to the top; the bite
    // pushes the terminator right.
    let inner_x = 0.5 * f + bite * 0.2;
    o.cubic_to(
        Vec2::new(inner_x, 0.5 - 0.5 * KAPPA),
        Vec2::new(0.5 - 0.5 * KAPPA + bite, 0.0),
        Vec2::new(0.5, 0.0),
    )
    .close();
    o
}

/// Concentric glow rings for a low sun; inner rings are drawn last.
pub fn sun_glow(rings: usize) -> Vec<(Outline, f32)> {
    (0..rings)
        .map(|i| {
            let t = 1.0 - i as f32 / rings.max(1) as f32;
            let opacity = 0.08 + 0.25 * (1.0 - t);
            (circle(Vec2::splat(0.5), 0.5 * t), opacity)
        })
        .collect()
}

/// Flattened cloud wisp built from overlapping ellipses.
pub fn cloud_wisp(puffs: usize) -> Outline {
    if puffs < 2 {
        return Outline::empty();
    }
    let mut o = Outline::empty();
    let step = 1.0 / puffs as f32;
    for i in 0..puffs {
        let cx = (i as f32 + 0.5) * step;
        let lift = 1.0 - ((cx - 0.5).abs() * 2.0);
        let ry = 0.22 + lift * 0.2;
        o.append(ellipse(Vec2::new(cx, 0.62 - lift * 0.12), step * 0.75, ry));
    }
    o
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aurora_needs_two_samples() {
        assert!(aurora_band(0.0, 0.2, 0.3, 1).is_empty());
        let band = aurora_band(1.3, 0.2, 0.3, 32);
        let b = band.bounds().unwrap();
        assert!(b.min.y >= 0.0 && b.max.y <= 1.0);
        assert_eq!(band.subpath_count(), 1);
    }

    #[test]
    fn aurora_shape_moves_with_phase() {
        assert_ne!(aurora_band(0.0, 0.2, 0.3, 16), aurora_band(1.0, 0.2, 0.3, 16));
    }

    #[test]
    fn star_field_is_deterministic_and_bounded() {
        let a = star_field(40, 7, 0.5);
        assert_eq!(a, star_field(40, 7, 0.5));
        assert!(a.iter().all(|s| s.position.y < 0.5));
        for s in &a {
            let t = s.twinkle(2.0);
            assert!((0.1..=1.0).contains(&t));
        }
    }

    #[test]
    fn full_moon_is_a_circle() {
        assert_eq!(moon(1.0).subpath_count(), 1);
        assert!(!moon(0.3).is_empty());
    }

    #[test]
    fn sun_glow_rings_shrink() {
        let rings = sun_glow(3);
        let r0 = rings[0].0.bounds().unwrap().width();
        let r2 = rings[2].0.bounds().unwrap().width();
        assert!(r0 > r2);
    }
}
