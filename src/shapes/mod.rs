//! Procedural shape library.
//!
//! Every generator is a pure function from parameters to an [`Outline`]
//! expressed in unit space: `(0, 0)` is the top-left of the bounding box and
//! `(1, 1)` its bottom-right, y pointing down. Outlines are scaled into a
//! concrete [`Rect`] only at draw time with [`Outline::fit`], which keeps
//! every generator resolution-independent.
//!
//! Generators never fault on bad input. Anything they cannot draw (fewer
//! than two peaks, zero-width boxes, negative counts) comes back as
//! [`Outline::empty`].

use bevy::math::{Rect, Vec2};

pub mod mascot;
pub mod props;
pub mod sky;
pub mod terrain;

/// Bezier approximation constant for a quarter circle.
pub const KAPPA: f32 = 0.552_284_8;

/// Points per curved segment when flattening for line drawing.
pub const DEFAULT_CURVE_STEPS: usize = 12;

// ═══════════════════════════════════════════════════════════════════════
// PATH DATA
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Close,
}

impl PathSegment {
    fn map(self, f: impl Fn(Vec2) -> Vec2) -> Self {
        match self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(f(p)),
            PathSegment::LineTo(p) => PathSegment::LineTo(f(p)),
            PathSegment::QuadTo { ctrl, to } => PathSegment::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
            PathSegment::CubicTo { c1, c2, to } => PathSegment::CubicTo {
                c1: f(c1),
                c2: f(c2),
                to: f(to),
            },
            PathSegment::Close => PathSegment::Close,
        }
    }
}

/// A sequence of subpaths built from line and bezier segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub segments: Vec<PathSegment>,
}

impl Outline {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, ctrl: Vec2, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
        self
    }

    pub fn cubic_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::CubicTo { c1, c2, to });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Append every subpath of `other`.
    pub fn append(&mut self, other: Outline) -> &mut Self {
        self.segments.extend(other.segments);
        self
    }

    /// Number of subpaths (one per `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count()
    }

    /// Map every point through `f`.
    pub fn transformed(&self, f: impl Fn(Vec2) -> Vec2) -> Outline {
        Outline {
            segments: self.segments.iter().map(|s| s.map(&f)).collect(),
        }
    }

    /// Scale a unit-space outline into `bounds`.
    pub fn fit(&self, bounds: Rect) -> Outline {
        let size = bounds.size();
        let origin = bounds.min;
        self.transformed(|p| origin + p * size)
    }

    /// Rotate around `pivot` by `radians` (positive is clockwise in y-down
    /// space).
    pub fn rotated(&self, pivot: Vec2, radians: f32) -> Outline {
        let (sin, cos) = radians.sin_cos();
        self.transformed(|p| {
            let d = p - pivot;
            pivot + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
        })
    }

    /// Every anchor and control point, in order.
    pub fn points(&self) -> Vec<Vec2> {
        let mut pts = Vec::new();
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => pts.push(p),
                PathSegment::QuadTo { ctrl, to } => pts.extend([ctrl, to]),
                PathSegment::CubicTo { c1, c2, to } => pts.extend([c1, c2, to]),
                PathSegment::Close => {}
            }
        }
        pts
    }

    /// Axis-aligned bounds of all anchor and control points.
    pub fn bounds(&self) -> Option<Rect> {
        let pts = self.points();
        let first = *pts.first()?;
        let mut rect = Rect::from_corners(first, first);
        for p in pts {
            rect = rect.union_point(p);
        }
        Some(rect)
    }

    /// Flatten into polylines, one per subpath. Closed subpaths repeat their
    /// first point at the end.
    pub fn flatten(&self, curve_steps: usize) -> Vec<Vec<Vec2>> {
        let steps = curve_steps.max(1);
        let mut lines: Vec<Vec<Vec2>> = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        let mut cursor = Vec2::ZERO;
        let mut start = Vec2::ZERO;

        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) => {
                    if current.len() > 1 {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                    cursor = p;
                    start = p;
                }
                PathSegment::LineTo(p) => {
                    current.push(p);
                    cursor = p;
                }
                PathSegment::QuadTo { ctrl, to } => {
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        current.push(quad_point(cursor, ctrl, to, t));
                    }
                    cursor = to;
                }
                PathSegment::CubicTo { c1, c2, to } => {
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        current.push(cubic_point(cursor, c1, c2, to, t));
                    }
                    cursor = to;
                }
                PathSegment::Close => {
                    if cursor != start {
                        current.push(start);
                    }
                    cursor = start;
                }
            }
        }
        if current.len() > 1 {
            lines.push(current);
        }
        lines
    }
}

pub fn quad_point(p0: Vec2, c: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t)
}

pub fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

// ═══════════════════════════════════════════════════════════════════════
// PRIMITIVES
// ═══════════════════════════════════════════════════════════════════════

/// Closed ellipse from four cubic quarter arcs.
pub fn ellipse(center: Vec2, rx: f32, ry: f32) -> Outline {
    if rx <= 0.0 || ry <= 0.0 {
        return Outline::empty();
    }
    let (cx, cy) = (center.x, center.y);
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let mut o = Outline::empty();
    o.move_to(Vec2::new(cx, cy - ry))
        .cubic_to(
            Vec2::new(cx + kx, cy - ry),
            Vec2::new(cx + rx, cy - ky),
            Vec2::new(cx + rx, cy),
        )
        .cubic_to(
            Vec2::new(cx + rx, cy + ky),
            Vec2::new(cx + kx, cy + ry),
            Vec2::new(cx, cy + ry),
        )
        .cubic_to(
            Vec2::new(cx - kx, cy + ry),
            Vec2::new(cx - rx, cy + ky),
            Vec2::new(cx - rx, cy),
        )
        .cubic_to(
            Vec2::new(cx - rx, cy - ky),
            Vec2::new(cx - kx, cy - ry),
            Vec2::new(cx, cy - ry),
        )
        .close();
    o
}

pub fn circle(center: Vec2, r: f32) -> Outline {
    ellipse(center, r, r)
}

/// Closed polygon through `points`. Fewer than three points is degenerate.
pub fn polygon(points: &[Vec2]) -> Outline {
    if points.len() < 3 {
        return Outline::empty();
    }
    let mut o = Outline::empty();
    o.move_to(points[0]);
    for &p in &points[1..] {
        o.line_to(p);
    }
    o.close();
    o
}

/// Open polyline through `points`.
pub fn polyline(points: &[Vec2]) -> Outline {
    if points.len() < 2 {
        return Outline::empty();
    }
    let mut o = Outline::empty();
    o.move_to(points[0]);
    for &p in &points[1..] {
        o.line_to(p);
    }
    o
}

pub fn rect(min: Vec2, max: Vec2) -> Outline {
    polygon(&[
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_scales_unit_space_into_bounds() {
        let unit = rect(Vec2::ZERO, Vec2::ONE);
        let fitted = unit.fit(Rect::new(10.0, 20.0, 110.0, 70.0));
        let b = fitted.bounds().unwrap();
        assert_eq!(b.min, Vec2::new(10.0, 20.0));
        assert_eq!(b.max, Vec2::new(110.0, 70.0));
    }

    #[test]
    fn fitting_twice_the_box_doubles_every_point() {
        let shape = ellipse(Vec2::new(0.5, 0.5), 0.3, 0.2);
        let small = shape.fit(Rect::new(0.0, 0.0, 100.0, 100.0));
        let large = shape.fit(Rect::new(0.0, 0.0, 200.0, 200.0));
        for (a, b) in small.points().iter().zip(large.points()) {
            assert!((*a * 2.0 - b).length() < 1e-3);
        }
    }

    #[test]
    fn degenerate_primitives_are_empty() {
        assert!(ellipse(Vec2::ZERO, 0.0, 1.0).is_empty());
        assert!(polygon(&[Vec2::ZERO, Vec2::ONE]).is_empty());
        assert!(polyline(&[Vec2::ZERO]).is_empty());
        assert!(Outline::empty().flatten(8).is_empty());
        assert!(Outline::empty().bounds().is_none());
    }

    #[test]
    fn flatten_closes_subpaths_and_splits_on_move() {
        let mut o = rect(Vec2::ZERO, Vec2::ONE);
        o.append(polyline(&[Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0)]));
        let lines = o.flatten(4);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].first(), lines[0].last());
        assert_eq!(lines[1].len(), 2);
    }

    #[test]
    fn ellipse_flattens_onto_its_radius() {
        let lines = circle(Vec2::ZERO, 1.0).flatten(16);
        for p in &lines[0] {
            assert!((p.length() - 1.0).abs() < 0.01, "point {p:?} off circle");
        }
    }
}
