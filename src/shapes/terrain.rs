//! Mountains, ice cliffs, drifts and icicles.
//!
//! All coordinates are unit-space fractions of the layer's bounding box with
//! the ground line at `y = 1`.

use bevy::math::Vec2;
use rand::Rng;

use super::{polygon, Outline};

/// One summit of a mountain range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Horizontal position, 0..1.
    pub x: f32,
    /// Height above the ground line, 0..1.
    pub height: f32,
}

impl Peak {
    pub const fn new(x: f32, height: f32) -> Self {
        Self { x, height }
    }

    fn summit(self) -> Vec2 {
        Vec2::new(self.x, 1.0 - self.height)
    }
}

/// Far ridge: many low, soft peaks.
pub const FAR_RANGE: &[Peak] = &[
    Peak::new(0.05, 0.55),
    Peak::new(0.22, 0.72),
    Peak::new(0.38, 0.60),
    Peak::new(0.55, 0.82),
    Peak::new(0.71, 0.64),
    Peak::new(0.88, 0.76),
];

/// Mid ridge: fewer, taller summits that carry snow caps.
pub const MID_RANGE: &[Peak] = &[
    Peak::new(0.10, 0.62),
    Peak::new(0.34, 0.88),
    Peak::new(0.62, 0.70),
    Peak::new(0.86, 0.92),
];

/// Near ridge: two broad shoulders framing the platform.
pub const NEAR_RANGE: &[Peak] = &[
    Peak::new(0.08, 0.80),
    Peak::new(0.30, 0.45),
    Peak::new(0.74, 0.50),
    Peak::new(0.95, 0.85),
];

/// Closed silhouette of a mountain range resting on the ground line.
///
/// Fewer than two peaks is degenerate and yields an empty outline.
pub fn mountain_range(peaks: &[Peak]) -> Outline {
    if peaks.len() < 2 {
        return Outline::empty();
    }
    let mut sorted: Vec<Peak> = peaks.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];

    let mut o = Outline::empty();
    o.move_to(Vec2::new(0.0, 1.0));
    o.line_to(Vec2::new(0.0, 1.0 - first.height * 0.4));
    let mut prev = Vec2::new(0.0, 1.0 - first.height * 0.4);

    for (i, peak) in sorted.iter().enumerate() {
        let summit = peak.summit();
        // Concave approach: control point sags below the straight ridge.
        let ctrl = (prev + summit) * 0.5 + Vec2::new(0.0, 0.04);
        o.quad_to(ctrl, summit);
        prev = summit;

        if let Some(next) = sorted.get(i + 1) {
            let valley_h = peak.height.min(next.height) * 0.45;
            let valley = Vec2::new((peak.x + next.x) * 0.5, 1.0 - valley_h);
            let ctrl = (prev + valley) * 0.5 + Vec2::new(0.0, 0.03);
            o.quad_to(ctrl, valley);
            prev = valley;
        }
    }

    let tail = Vec2::new(1.0, 1.0 - last.height * 0.4);
    o.quad_to((prev + tail) * 0.5 + Vec2::new(0.0, 0.04), tail);
    o.line_to(Vec2::new(1.0, 1.0));
    o.close();
    o
}

/// Jagged snow caps sitting on each summit. `depth` is how far down the
/// slope the cap reaches, as a fraction of the peak's height.
pub fn snow_caps(peaks: &[Peak], depth: f32) -> Outline {
    if peaks.len() < 2 || depth <= 0.0 {
        return Outline::empty();
    }
    let mut o = Outline::empty();
    let spacing = 1.0 / peaks.len() as f32;
    for peak in peaks {
        let summit = peak.summit();
        let drop = peak.height * depth.min(1.0);
        let half_w = spacing * 0.22 * (drop / peak.height.max(0.01)).sqrt();
        let right = summit + Vec2::new(half_w, drop);
        let left = summit + Vec2::new(-half_w, drop);
        // Three-tooth ragged lower edge.
        let teeth = [
            right,
            summit + Vec2::new(half_w * 0.45, drop * 0.7),
            summit + Vec2::new(0.0, drop * 0.95),
            summit + Vec2::new(-half_w * 0.45, drop * 0.65),
            left,
        ];
        let mut pts = vec![summit];
        pts.extend(teeth);
        o.append(polygon(&pts));
    }
    o
}

/// Ice cliff face with a randomized jagged top edge.
pub fn ice_cliff(segments: usize, jaggedness: f32, rng: &mut impl Rng) -> Outline {
    if segments < 2 {
        return Outline::empty();
    }
    let jag = jaggedness.clamp(0.0, 1.0);
    let mut pts = vec![Vec2::new(0.0, 1.0)];
    for i in 0..=segments {
        let x = i as f32 / segments as f32;
        let y = 0.15 + rng.gen_range(0.0..=1.0) * 0.35 * jag;
        pts.push(Vec2::new(x, y));
    }
    pts.push(Vec2::new(1.0, 1.0));
    polygon(&pts)
}

/// Rolling snow drift along the ground; each entry is a bump height (0..1).
pub fn snow_drift(bumps: &[f32]) -> Outline {
    if bumps.len() < 2 {
        return Outline::empty();
    }
    let step = 1.0 / bumps.len() as f32;
    let mut o = Outline::empty();
    o.move_to(Vec2::new(0.0, 1.0));
    o.line_to(Vec2::new(0.0, 1.0 - bumps[0].clamp(0.0, 1.0) * 0.5));
    for (i, h) in bumps.iter().enumerate() {
        let h = h.clamp(0.0, 1.0);
        let ctrl = Vec2::new((i as f32 + 0.5) * step, 1.0 - h);
        let next_h = bumps.get(i + 1).copied().unwrap_or(0.0).clamp(0.0, 1.0);
        let to = Vec2::new((i + 1) as f32 * step, 1.0 - (h.min(next_h) * 0.5));
        o.quad_to(ctrl, to);
    }
    o.line_to(Vec2::new(1.0, 1.0));
    o.close();
    o
}

/// Icicles hanging from the top edge. Lengths are drawn from `rng` so a
/// seeded source gives identical output.
pub fn icicles(count: usize, max_length: f32, rng: &mut impl Rng) -> Outline {
    if count == 0 || max_length <= 0.0 {
        return Outline::empty();
    }
    let slot = 1.0 / count as f32;
    let mut o = Outline::empty();
    for i in 0..count {
        let cx = (i as f32 + 0.5) * slot;
        let half_w = slot * rng.gen_range(0.18..0.38);
        let len = max_length.min(1.0) * rng.gen_range(0.35..=1.0);
        o.append(polygon(&[
            Vec2::new(cx - half_w, 0.0),
            Vec2::new(cx + half_w, 0.0),
            Vec2::new(cx + half_w * 0.1, len),
        ]));
    }
    o
}

/// Floating ice platform the mascot stands on: flat snowy top, faceted
/// underside.
pub fn ice_platform(top_thickness: f32) -> Outline {
    let t = top_thickness.clamp(0.05, 0.9);
    let mut o = Outline::empty();
    o.move_to(Vec2::new(0.0, t))
        .cubic_to(
            Vec2::new(0.15, 0.0),
            Vec2::new(0.85, 0.0),
            Vec2::new(1.0, t),
        )
        .line_to(Vec2::new(0.88, 0.75))
        .line_to(Vec2::new(0.62, 1.0))
        .line_to(Vec2::new(0.35, 0.92))
        .line_to(Vec2::new(0.12, 0.78))
        .close();
    o
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn single_peak_range_is_empty() {
        assert!(mountain_range(&[Peak::new(0.5, 0.8)]).is_empty());
        assert!(mountain_range(&[]).is_empty());
        assert!(snow_caps(&[Peak::new(0.5, 0.8)], 0.3).is_empty());
    }

    #[test]
    fn mountain_range_stays_inside_unit_box() {
        for range in [FAR_RANGE, MID_RANGE, NEAR_RANGE] {
            let b = mountain_range(range).bounds().unwrap();
            assert!(b.min.x >= 0.0 && b.max.x <= 1.0);
            assert!(b.min.y >= 0.0 && b.max.y <= 1.0);
        }
    }

    #[test]
    fn tallest_peak_reaches_its_height() {
        let b = mountain_range(MID_RANGE).bounds().unwrap();
        assert!((b.min.y - (1.0 - 0.92)).abs() < 1e-5);
    }

    #[test]
    fn unsorted_peaks_draw_the_same_range() {
        let mut reversed = MID_RANGE.to_vec();
        reversed.reverse();
        assert_eq!(mountain_range(&reversed), mountain_range(MID_RANGE));
    }

    #[test]
    fn one_cap_per_peak() {
        assert_eq!(snow_caps(MID_RANGE, 0.25).subpath_count(), MID_RANGE.len());
    }

    #[test]
    fn seeded_icicles_are_deterministic() {
        let a = icicles(7, 0.6, &mut StdRng::seed_from_u64(11));
        let b = icicles(7, 0.6, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
        assert_eq!(a.subpath_count(), 7);
        let bounds = a.bounds().unwrap();
        assert!(bounds.max.y <= 0.6 + 1e-5);
    }

    #[test]
    fn cliff_needs_two_segments() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(ice_cliff(1, 0.5, &mut rng).is_empty());
        assert!(!ice_cliff(6, 0.5, &mut rng).is_empty());
    }

    #[test]
    fn drift_with_one_bump_is_empty() {
        assert!(snow_drift(&[0.4]).is_empty());
        assert!(!snow_drift(&[0.4, 0.2, 0.5]).is_empty());
    }
}
