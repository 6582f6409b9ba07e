//! Message bubble state: one visible message, a FIFO of queued dialogue and
//! at most one auto-dismiss timer.

use bevy::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

use crate::shared::SpeechStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub style: SpeechStyle,
    /// `None` keeps the message up until dismissed.
    pub auto_dismiss: Option<f32>,
}

impl Message {
    pub fn new(text: impl Into<String>, style: SpeechStyle) -> Self {
        Self {
            text: text.into(),
            style,
            auto_dismiss: None,
        }
    }

    pub fn dismiss_after(mut self, secs: f32) -> Self {
        self.auto_dismiss = Some(secs);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpeechBubble {
    current: Option<Message>,
    queue: VecDeque<Message>,
    timer: Option<Timer>,
}

impl SpeechBubble {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is showing. The queue is left alone.
    pub fn say(&mut self, message: Message) {
        self.show(message);
    }

    /// Show now if the bubble is empty, otherwise wait for a dismissal.
    pub fn queue_dialogue(&mut self, message: Message) {
        if self.current.is_none() {
            self.show(message);
        } else {
            self.queue.push_back(message);
        }
    }

    /// Drop the current message and show the next queued one, if any.
    pub fn dismiss(&mut self) {
        self.timer = None;
        self.current = None;
        if let Some(next) = self.queue.pop_front() {
            self.show(next);
        }
    }

    /// Empty the bubble and the queue. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.timer = None;
        self.current = None;
        self.queue.clear();
    }

    /// Returns `true` if the auto-dismiss timer fired this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        timer.tick(Duration::from_secs_f32(dt.max(0.0)));
        if timer.finished() {
            self.dismiss();
            return true;
        }
        false
    }

    fn show(&mut self, message: Message) {
        self.timer = message
            .auto_dismiss
            .filter(|secs| *secs > 0.0)
            .map(|secs| Timer::from_seconds(secs, TimerMode::Once));
        self.current = Some(message);
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Seconds until auto-dismiss, if a timer is running.
    pub fn time_remaining(&self) -> Option<f32> {
        self.timer.as_ref().map(|t| t.remaining_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bubble: &SpeechBubble) -> Option<&str> {
        bubble.current().map(|m| m.text.as_str())
    }

    #[test]
    fn queued_dialogue_waits_for_dismissal() {
        let mut bubble = SpeechBubble::new();
        bubble.say(Message::new("A", SpeechStyle::Speech));
        bubble.queue_dialogue(Message::new("B", SpeechStyle::Speech));
        assert_eq!(text(&bubble), Some("A"));
        assert_eq!(bubble.queued(), 1);

        bubble.dismiss();
        assert_eq!(text(&bubble), Some("B"));
        bubble.dismiss();
        assert_eq!(text(&bubble), None);
        // Dismissing an empty bubble is harmless.
        bubble.dismiss();
        assert_eq!(text(&bubble), None);
    }

    #[test]
    fn queue_on_empty_bubble_shows_immediately() {
        let mut bubble = SpeechBubble::new();
        bubble.queue_dialogue(Message::new("hi", SpeechStyle::Thought));
        assert_eq!(text(&bubble), Some("hi"));
        assert_eq!(bubble.queued(), 0);
    }

    #[test]
    fn say_restarts_the_single_timer() {
        let mut bubble = SpeechBubble::new();
        bubble.say(Message::new("first", SpeechStyle::Speech).dismiss_after(1.0));
        assert!(!bubble.tick(0.8));
        bubble.say(Message::new("second", SpeechStyle::Speech).dismiss_after(1.0));
        // The first timer would have fired here.
        assert!(!bubble.tick(0.5));
        assert_eq!(text(&bubble), Some("second"));
        assert!(bubble.tick(0.6));
        assert_eq!(text(&bubble), None);
        assert!(!bubble.has_timer());
    }

    #[test]
    fn auto_dismiss_advances_the_queue() {
        let mut bubble = SpeechBubble::new();
        bubble.say(Message::new("A", SpeechStyle::Speech).dismiss_after(0.5));
        bubble.queue_dialogue(Message::new("B", SpeechStyle::Speech));
        assert!(bubble.tick(0.6));
        assert_eq!(text(&bubble), Some("B"));
        assert!(!bubble.has_timer());
    }

    #[test]
    fn message_without_timer_stays_up() {
        let mut bubble = SpeechBubble::new();
        bubble.say(Message::new("stay", SpeechStyle::Whisper));
        for _ in 0..100 {
            assert!(!bubble.tick(1.0));
        }
        assert_eq!(text(&bubble), Some("stay"));
    }

    #[test]
    fn manual_dismiss_cancels_the_timer() {
        let mut bubble = SpeechBubble::new();
        bubble.say(Message::new("A", SpeechStyle::Speech).dismiss_after(1.0));
        bubble.dismiss();
        assert!(!bubble.has_timer());
        assert!(!bubble.tick(2.0));
    }

    #[test]
    fn clear_drops_everything() {
        let mut bubble = SpeechBubble::new();
        bubble.say(Message::new("A", SpeechStyle::Speech).dismiss_after(1.0));
        bubble.queue_dialogue(Message::new("B", SpeechStyle::Speech));
        bubble.clear();
        bubble.clear();
        assert!(bubble.current().is_none());
        assert_eq!(bubble.queued(), 0);
        assert!(!bubble.has_timer());
    }
}
