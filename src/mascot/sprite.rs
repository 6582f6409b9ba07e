//! Frame-based sprite clips for the mascot.
//!
//! Each expression maps to a clip; several expressions share one. The
//! reverse lookup gives the canonical expression of a clip, which the
//! placeholder path uses when the clip's frames are missing.

use bevy::math::UVec2;

use crate::shapes::{mascot as parts, Outline};
use crate::shared::PenguinExpression;

/// Pixel size of one frame; sheets are single-row strips.
pub const FRAME_SIZE: UVec2 = UVec2::new(128, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteClip {
    Idle,
    Happy,
    Think,
    Sleep,
    Celebrate,
    Talk,
    Wave,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAnimation {
    pub clip: SpriteClip,
    /// Frame sheet under the asset root.
    pub sheet: &'static str,
    pub frame_count: usize,
    pub fps: f32,
    pub looping: bool,
}

impl SpriteAnimation {
    pub fn from_expression(expression: PenguinExpression) -> Self {
        Self::for_clip(clip_for(expression))
    }

    pub fn for_clip(clip: SpriteClip) -> Self {
        let (sheet, frame_count, fps, looping) = match clip {
            SpriteClip::Idle => ("sprites/nudgy_idle.png", 8, 8.0, true),
            SpriteClip::Happy => ("sprites/nudgy_happy.png", 6, 10.0, false),
            SpriteClip::Think => ("sprites/nudgy_think.png", 8, 6.0, true),
            SpriteClip::Sleep => ("sprites/nudgy_sleep.png", 6, 4.0, true),
            SpriteClip::Celebrate => ("sprites/nudgy_celebrate.png", 10, 12.0, false),
            SpriteClip::Talk => ("sprites/nudgy_talk.png", 4, 10.0, true),
            SpriteClip::Wave => ("sprites/nudgy_wave.png", 8, 10.0, false),
            SpriteClip::Type => ("sprites/nudgy_type.png", 4, 12.0, true),
        };
        Self {
            clip,
            sheet,
            frame_count,
            fps,
            looping,
        }
    }

    /// Canonical expression for this clip.
    pub fn expression_class(&self) -> PenguinExpression {
        match self.clip {
            SpriteClip::Idle => PenguinExpression::Idle,
            SpriteClip::Happy => PenguinExpression::Happy,
            SpriteClip::Think => PenguinExpression::Thinking,
            SpriteClip::Sleep => PenguinExpression::Sleeping,
            SpriteClip::Celebrate => PenguinExpression::Celebrating,
            SpriteClip::Talk => PenguinExpression::Talking,
            SpriteClip::Wave => PenguinExpression::Waving,
            SpriteClip::Type => PenguinExpression::Typing,
        }
    }

    pub fn duration(&self) -> f32 {
        self.frame_count as f32 / self.fps.max(1e-3)
    }
}

pub fn clip_for(expression: PenguinExpression) -> SpriteClip {
    match expression {
        PenguinExpression::Idle | PenguinExpression::Listening => SpriteClip::Idle,
        PenguinExpression::Happy | PenguinExpression::ThumbsUp => SpriteClip::Happy,
        PenguinExpression::Thinking | PenguinExpression::Confused => SpriteClip::Think,
        PenguinExpression::Sleeping => SpriteClip::Sleep,
        PenguinExpression::Celebrating => SpriteClip::Celebrate,
        PenguinExpression::Talking => SpriteClip::Talk,
        PenguinExpression::Waving | PenguinExpression::Nudging => SpriteClip::Wave,
        PenguinExpression::Typing => SpriteClip::Type,
    }
}

/// Glyph drawn in place of missing frames, unit space.
pub fn placeholder_glyph(clip: SpriteClip) -> Outline {
    match clip {
        SpriteClip::Sleep => parts::zzz_glyph(),
        SpriteClip::Celebrate | SpriteClip::Happy => parts::sparkle(),
        SpriteClip::Think => parts::thought_bubble(),
        SpriteClip::Type => parts::laptop(),
        SpriteClip::Idle | SpriteClip::Talk | SpriteClip::Wave => {
            let mut o = parts::head();
            o.append(parts::body());
            o
        }
    }
}

/// How the playing clip reaches the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteVisual {
    /// Frame sheet path under the asset root.
    Sheet(&'static str),
    /// Frames are missing: the clip's glyph, unit space.
    Placeholder(Outline),
}

impl SpriteVisual {
    pub fn resolve(animation: &SpriteAnimation, sheet_exists: impl Fn(&str) -> bool) -> Self {
        if sheet_exists(animation.sheet) {
            Self::Sheet(animation.sheet)
        } else {
            Self::Placeholder(placeholder_glyph(animation.clip))
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Plays one clip frame by frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpritePlayer {
    animation: SpriteAnimation,
    elapsed: f32,
    completed: bool,
}

impl SpritePlayer {
    pub fn new(animation: SpriteAnimation) -> Self {
        Self {
            animation,
            elapsed: 0.0,
            completed: false,
        }
    }

    /// Switch clip; restarting only if it actually changed.
    pub fn play(&mut self, animation: SpriteAnimation) {
        if self.animation.clip != animation.clip {
            *self = Self::new(animation);
        }
    }

    /// Advance; returns `true` exactly once, when a non-looping clip
    /// reaches its last frame.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.completed || dt <= 0.0 {
            return false;
        }
        self.elapsed += dt;
        let duration = self.animation.duration();
        if self.animation.looping {
            self.elapsed %= duration;
            return false;
        }
        if self.elapsed >= duration {
            self.elapsed = duration;
            self.completed = true;
            return true;
        }
        false
    }

    pub fn frame(&self) -> usize {
        let last = self.animation.frame_count.saturating_sub(1);
        ((self.elapsed * self.animation.fps) as usize).min(last)
    }

    pub fn animation(&self) -> &SpriteAnimation {
        &self.animation
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_expression_has_a_clip_and_round_trips() {
        for e in PenguinExpression::ALL {
            let anim = SpriteAnimation::from_expression(e);
            assert!(anim.frame_count > 0);
            let class = anim.expression_class();
            let again = SpriteAnimation::from_expression(class);
            assert_eq!(again, anim, "{e:?}");
            assert_eq!(again.expression_class(), class);
        }
    }

    #[test]
    fn placeholders_are_never_empty() {
        for e in PenguinExpression::ALL {
            assert!(!placeholder_glyph(clip_for(e)).is_empty());
        }
    }

    #[test]
    fn missing_sheet_falls_back_to_the_clip_glyph() {
        let sleep = SpriteAnimation::for_clip(SpriteClip::Sleep);
        assert_eq!(
            SpriteVisual::resolve(&sleep, |_| false),
            SpriteVisual::Placeholder(parts::zzz_glyph())
        );
        assert_eq!(
            SpriteVisual::resolve(&sleep, |path| path == sleep.sheet),
            SpriteVisual::Sheet("sprites/nudgy_sleep.png")
        );
    }

    #[test]
    fn non_looping_clip_completes_once() {
        let mut p = SpritePlayer::new(SpriteAnimation::for_clip(SpriteClip::Happy));
        let mut fired = 0;
        for _ in 0..40 {
            if p.tick(0.05) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(p.frame(), 5);
    }

    #[test]
    fn looping_clip_never_completes() {
        let mut p = SpritePlayer::new(SpriteAnimation::for_clip(SpriteClip::Idle));
        for _ in 0..100 {
            assert!(!p.tick(0.1));
        }
        assert!(p.frame() < 8);
    }

    #[test]
    fn replaying_the_same_clip_keeps_position() {
        let mut p = SpritePlayer::new(SpriteAnimation::for_clip(SpriteClip::Idle));
        p.tick(0.3);
        let frame = p.frame();
        p.play(SpriteAnimation::from_expression(PenguinExpression::Listening));
        assert_eq!(p.frame(), frame);
    }
}
