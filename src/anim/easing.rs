//! Easing curves and a minimal tween used by the mascot and the compositor.

/// Linearly interpolate between two floats.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Overshoots past 1.0 before settling; used for pop-ins.
pub fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    let t = t.clamp(0.0, 1.0);
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

/// A single scalar animating from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn value(&self, ease: fn(f32) -> f32) -> f32 {
        lerp(self.from, self.to, ease(self.progress()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_their_endpoints() {
        for ease in [ease_in_out, ease_out_cubic, ease_out_back] {
            assert!(ease(0.0).abs() < 1e-5);
            assert!((ease(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn ease_out_back_overshoots() {
        assert!(ease_out_back(0.7) > 1.0);
    }

    #[test]
    fn zero_length_tween_is_already_done() {
        let tween = Tween::new(0.0, 5.0, 0.0);
        assert!(tween.finished());
        assert_eq!(tween.value(ease_in_out), 5.0);
    }
}
