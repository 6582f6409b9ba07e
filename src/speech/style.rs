//! Per-style presentation: default dismiss time and the bubble tail.

use bevy::prelude::*;

use crate::config::SpeechConfig;
use crate::shapes::{circle, polygon, Outline};
use crate::shared::SpeechStyle;

/// Auto-dismiss used when a message doesn't specify one. Thoughts linger
/// until dismissed.
pub fn default_auto_dismiss(style: SpeechStyle, config: &SpeechConfig) -> Option<f32> {
    match style {
        SpeechStyle::Speech => Some(config.default_auto_dismiss),
        SpeechStyle::Thought => None,
        SpeechStyle::Whisper => Some(config.default_auto_dismiss * 0.75),
        SpeechStyle::Exclaim => Some(config.default_auto_dismiss * 0.5),
    }
}

/// Tail from the bubble's bottom edge at `base` down to `tip` (y down).
pub fn tail_outline(style: SpeechStyle, base: Vec2, tip: Vec2) -> Outline {
    let span = (tip - base).length();
    if span <= f32::EPSILON {
        return Outline::empty();
    }
    match style {
        SpeechStyle::Speech => polygon(&[
            base + Vec2::new(-span * 0.35, 0.0),
            base + Vec2::new(span * 0.35, 0.0),
            tip,
        ]),
        // Three shrinking puffs.
        SpeechStyle::Thought => {
            let mut tail = Outline::empty();
            for (t, r) in [(0.2, 0.22), (0.55, 0.15), (0.9, 0.09)] {
                tail.append(circle(base.lerp(tip, t), span * r));
            }
            tail
        }
        SpeechStyle::Whisper => polygon(&[
            base + Vec2::new(-span * 0.15, 0.0),
            base + Vec2::new(span * 0.15, 0.0),
            tip,
        ]),
        SpeechStyle::Exclaim => {
            let mid = base.lerp(tip, 0.5);
            polygon(&[
                base + Vec2::new(-span * 0.4, 0.0),
                base + Vec2::new(span * 0.4, 0.0),
                mid + Vec2::new(span * 0.05, 0.0),
                tip,
                mid + Vec2::new(-span * 0.25, 0.0),
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thought_has_no_default_timer() {
        let config = SpeechConfig::default();
        assert_eq!(default_auto_dismiss(SpeechStyle::Thought, &config), None);
        assert_eq!(
            default_auto_dismiss(SpeechStyle::Speech, &config),
            Some(config.default_auto_dismiss)
        );
        assert!(default_auto_dismiss(SpeechStyle::Exclaim, &config) < default_auto_dismiss(SpeechStyle::Speech, &config));
    }

    #[test]
    fn tails_differ_by_style() {
        let (base, tip) = (Vec2::new(100.0, 50.0), Vec2::new(110.0, 80.0));
        assert_eq!(tail_outline(SpeechStyle::Thought, base, tip).subpath_count(), 3);
        assert_eq!(tail_outline(SpeechStyle::Speech, base, tip).subpath_count(), 1);
        assert!(tail_outline(SpeechStyle::Exclaim, base, tip).bounds().is_some());
    }

    #[test]
    fn zero_length_tail_is_empty() {
        let p = Vec2::new(3.0, 3.0);
        for style in [SpeechStyle::Speech, SpeechStyle::Thought, SpeechStyle::Whisper, SpeechStyle::Exclaim] {
            assert!(tail_outline(style, p, p).is_empty());
        }
    }
}
