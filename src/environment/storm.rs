//! Lightning for the storm overlay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seconds for a flash to decay from full to nothing.
pub const FLASH_DECAY: f32 = 0.3;
/// Gap between flashes, seconds.
pub const FLASH_INTERVAL: (f32, f32) = (8.0, 15.0);

#[derive(Debug, Clone)]
pub struct Lightning {
    until_next: f32,
    flash: f32,
    rng: StdRng,
}

impl Lightning {
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let until_next = rng.gen_range(FLASH_INTERVAL.0..=FLASH_INTERVAL.1);
        Self {
            until_next,
            flash: 0.0,
            rng,
        }
    }

    /// Current flash opacity, 0..1.
    pub fn flash(&self) -> f32 {
        self.flash
    }

    pub fn until_next(&self) -> f32 {
        self.until_next
    }

    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.flash = (self.flash - dt / FLASH_DECAY).max(0.0);
        self.until_next -= dt;
        if self.until_next <= 0.0 {
            self.flash = 1.0;
            self.until_next = self.rng.gen_range(FLASH_INTERVAL.0..=FLASH_INTERVAL.1);
        }
    }

    /// Clear any flash in progress; the countdown keeps its place.
    pub fn quiet(&mut self) {
        self.flash = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashes_land_inside_the_interval() {
        let mut l = Lightning::new(Some(5));
        let mut since_last = 0.0;
        let mut flashes = 0;
        let dt = 0.05;
        for _ in 0..(120.0 / dt) as usize {
            let before = l.flash();
            l.tick(dt);
            since_last += dt;
            if l.flash() > before {
                if flashes > 0 {
                    assert!(since_last >= FLASH_INTERVAL.0 - dt && since_last <= FLASH_INTERVAL.1 + dt);
                }
                flashes += 1;
                since_last = 0.0;
            }
        }
        assert!(flashes >= 7);
    }

    #[test]
    fn flash_decays_within_a_third_of_a_second() {
        let mut l = Lightning::new(Some(1));
        let wait = l.until_next();
        l.tick(wait + 0.001);
        assert_eq!(l.flash(), 1.0);
        l.tick(0.15);
        assert!((l.flash() - 0.5).abs() < 1e-3);
        l.tick(0.2);
        assert_eq!(l.flash(), 0.0);
    }
}
