//! Stage decorations and reward props: igloo, campfire, dock, lodge, fish,
//! beanie, snowflakes.

use bevy::math::Vec2;
use std::f32::consts::{PI, TAU};

use super::{circle, ellipse, polygon, polyline, rect, Outline, KAPPA};

/// Igloo dome with an arched entrance. `entrance` is the entrance width as a
/// fraction of the dome width.
pub fn igloo(entrance: f32) -> Outline {
    let e = entrance.clamp(0.0, 0.8);
    let mut o = Outline::empty();
    // Half-ellipse dome resting on y = 1.
    o.move_to(Vec2::new(0.0, 1.0))
        .cubic_to(
            Vec2::new(0.0, 1.0 - KAPPA),
            Vec2::new(0.5 - 0.5 * KAPPA, 0.0),
            Vec2::new(0.5, 0.0),
        )
        .cubic_to(
            Vec2::new(0.5 + 0.5 * KAPPA, 0.0),
            Vec2::new(1.0, 1.0 - KAPPA),
            Vec2::new(1.0, 1.0),
        )
        .close();
    if e > 0.0 {
        let half = e * 0.5;
        let top = 1.0 - e * 1.1;
        o.move_to(Vec2::new(0.5 - half, 1.0))
            .line_to(Vec2::new(0.5 - half, 1.0 - e * 0.5))
            .quad_to(Vec2::new(0.5, top - e * 0.3), Vec2::new(0.5 + half, 1.0 - e * 0.5))
            .line_to(Vec2::new(0.5 + half, 1.0));
    }
    o
}

/// Ice-block seams across the igloo dome, one open line per course.
pub fn igloo_blocks(courses: usize) -> Outline {
    if courses < 2 {
        return Outline::empty();
    }
    let mut o = Outline::empty();
    for i in 1..courses {
        let y = i as f32 / courses as f32;
        // Dome half-width at this height on a unit half-ellipse.
        let half = 0.5 * (1.0 - (1.0 - y).powi(2)).max(0.0).sqrt();
        o.append(polyline(&[Vec2::new(0.5 - half, y), Vec2::new(0.5 + half, y)]));
    }
    o
}

/// Teardrop flame. `flicker` in radians shifts the tip sideways so the same
/// generator animates when fed a running phase.
pub fn flame(flicker: f32) -> Outline {
    let sway = flicker.sin() * 0.12;
    let tip = Vec2::new(0.5 + sway, 0.0);
    let mut o = Outline::empty();
    o.move_to(tip)
        .cubic_to(
            Vec2::new(0.62 + sway * 0.5, 0.35),
            Vec2::new(0.95, 0.55),
            Vec2::new(0.82, 0.85),
        )
        .cubic_to(
            Vec2::new(0.72, 1.02),
            Vec2::new(0.28, 1.02),
            Vec2::new(0.18, 0.85),
        )
        .cubic_to(
            Vec2::new(0.05, 0.55),
            Vec2::new(0.38 + sway * 0.5, 0.35),
            tip,
        )
        .close();
    o
}

/// Two crossed logs under a campfire.
pub fn campfire_logs() -> Outline {
    let mut o = polygon(&[
        Vec2::new(0.05, 0.70),
        Vec2::new(0.12, 0.60),
        Vec2::new(0.95, 0.90),
        Vec2::new(0.88, 1.00),
    ]);
    o.append(polygon(&[
        Vec2::new(0.95, 0.70),
        Vec2::new(0.88, 0.60),
        Vec2::new(0.05, 0.90),
        Vec2::new(0.12, 1.00),
    ]));
    o
}

/// Rising smoke puffs; `phase` (0..1 loop) lifts and grows them.
pub fn smoke_puffs(count: usize, phase: f32) -> Outline {
    let mut o = Outline::empty();
    for i in 0..count {
        let t = (phase + i as f32 / count.max(1) as f32).fract();
        let y = 1.0 - t * 0.9;
        let x = 0.5 + (t * TAU).sin() * 0.12;
        o.append(circle(Vec2::new(x, y), 0.06 + t * 0.1));
    }
    o
}

/// Six-armed (or `arms`-armed) snowflake with side branches. Open strokes.
pub fn snowflake(arms: usize, branch: f32) -> Outline {
    if arms < 2 {
        return Outline::empty();
    }
    let center = Vec2::splat(0.5);
    let b = branch.clamp(0.0, 0.5);
    let mut o = Outline::empty();
    for i in 0..arms {
        let angle = i as f32 / arms as f32 * TAU - PI / 2.0;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let tip = center + dir * 0.5;
        o.append(polyline(&[center, tip]));
        if b > 0.0 {
            let root = center + dir * 0.3;
            for side in [-1.0_f32, 1.0] {
                let a = angle + side * PI / 4.0;
                o.append(polyline(&[root, root + Vec2::new(a.cos(), a.sin()) * b]));
            }
        }
    }
    o
}

/// Side-on fish: oval body plus forked tail. `tail_spread` widens the fork.
pub fn fish(tail_spread: f32) -> Outline {
    let spread = tail_spread.clamp(0.05, 0.5);
    let mut o = ellipse(Vec2::new(0.42, 0.5), 0.38, 0.22);
    o.append(polygon(&[
        Vec2::new(0.74, 0.5),
        Vec2::new(1.0, 0.5 - spread),
        Vec2::new(0.92, 0.5),
        Vec2::new(1.0, 0.5 + spread),
    ]));
    // Eye.
    o.append(circle(Vec2::new(0.18, 0.45), 0.035));
    o
}

/// Knitted beanie: dome, folded band and pom-pom.
pub fn beanie() -> Outline {
    let mut o = Outline::empty();
    o.move_to(Vec2::new(0.08, 0.72))
        .cubic_to(
            Vec2::new(0.08, 0.30),
            Vec2::new(0.30, 0.20),
            Vec2::new(0.5, 0.20),
        )
        .cubic_to(
            Vec2::new(0.70, 0.20),
            Vec2::new(0.92, 0.30),
            Vec2::new(0.92, 0.72),
        )
        .close();
    o.append(rect(Vec2::new(0.04, 0.70), Vec2::new(0.96, 0.92)));
    o.append(circle(Vec2::new(0.5, 0.12), 0.1));
    o
}

/// Wooden dock: deck planks over the water plus posts.
pub fn dock(planks: usize) -> Outline {
    if planks == 0 {
        return Outline::empty();
    }
    let mut o = Outline::empty();
    let w = 1.0 / planks as f32;
    for i in 0..planks {
        let x0 = i as f32 * w;
        o.append(rect(Vec2::new(x0 + w * 0.05, 0.30), Vec2::new(x0 + w * 0.95, 0.50)));
    }
    for x in [0.08, 0.5, 0.92] {
        o.append(rect(Vec2::new(x - 0.025, 0.50), Vec2::new(x + 0.025, 1.0)));
    }
    o
}

/// Fishing rod leaning off the dock, with its line.
pub fn fishing_rod() -> Outline {
    let mut o = polyline(&[Vec2::new(0.1, 1.0), Vec2::new(0.9, 0.0)]);
    o.append(polyline(&[
        Vec2::new(0.9, 0.0),
        Vec2::new(0.95, 0.5),
        Vec2::new(0.93, 0.9),
    ]));
    o
}

/// Semicircular snow wall of `blocks` stacked blocks around a nest.
pub fn snow_wall(blocks: usize) -> Outline {
    if blocks < 2 {
        return Outline::empty();
    }
    let mut o = Outline::empty();
    let w = 1.0 / blocks as f32;
    for i in 0..blocks {
        let x0 = i as f32 * w;
        let cx = x0 + w * 0.5;
        // Blocks rise toward the middle.
        let rise = 1.0 - ((cx - 0.5).abs() * 2.0);
        let top = 0.55 - rise * 0.35;
        o.append(rect(Vec2::new(x0 + w * 0.04, top), Vec2::new(x0 + w * 0.96, 1.0)));
    }
    o
}

/// Lodge building: walls, pitched roof, door and chimney.
pub fn lodge() -> Outline {
    let mut o = rect(Vec2::new(0.1, 0.45), Vec2::new(0.9, 1.0));
    o.append(polygon(&[
        Vec2::new(0.0, 0.48),
        Vec2::new(0.5, 0.05),
        Vec2::new(1.0, 0.48),
    ]));
    o.append(rect(Vec2::new(0.43, 0.68), Vec2::new(0.57, 1.0)));
    o.append(rect(Vec2::new(0.70, 0.08), Vec2::new(0.80, 0.30)));
    o
}

/// Window panes for the lodge, in the same unit space as [`lodge`].
pub fn lodge_windows() -> Outline {
    let mut o = rect(Vec2::new(0.18, 0.56), Vec2::new(0.34, 0.72));
    o.append(rect(Vec2::new(0.66, 0.56), Vec2::new(0.82, 0.72)));
    o
}

/// Small flag on a pole, for the summit.
pub fn summit_flag(wave: f32) -> Outline {
    let w = wave.sin() * 0.08;
    let mut o = polyline(&[Vec2::new(0.1, 1.0), Vec2::new(0.1, 0.0)]);
    o.move_to(Vec2::new(0.1, 0.0))
        .quad_to(Vec2::new(0.5, 0.05 + w), Vec2::new(0.9, 0.18))
        .quad_to(Vec2::new(0.5, 0.30 - w), Vec2::new(0.1, 0.36))
        .close();
    o
}
