//! Character-by-character text reveal.

use crate::config::TypewriterConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    chars: Vec<char>,
    revealed: usize,
    /// Seconds until the next character appears.
    wait: f32,
    config: TypewriterConfig,
}

impl Typewriter {
    pub fn new(text: &str, config: &TypewriterConfig) -> Self {
        let mut t = Self {
            chars: text.chars().collect(),
            revealed: 0,
            wait: 0.0,
            config: config.clone(),
        };
        t.wait = t.char_interval();
        t
    }

    /// A typewriter that starts fully revealed.
    pub fn revealed(text: &str, config: &TypewriterConfig) -> Self {
        let mut t = Self::new(text, config);
        t.reveal_all();
        t
    }

    fn char_interval(&self) -> f32 {
        1.0 / self.config.chars_per_second.max(1.0)
    }

    /// Advance; returns `true` on the tick that reveals the last character.
    pub fn tick(&mut self, mut dt: f32) -> bool {
        if self.is_complete() {
            return false;
        }
        while dt > 0.0 && !self.is_complete() {
            if dt < self.wait {
                self.wait -= dt;
                return false;
            }
            dt -= self.wait;
            let c = self.chars[self.revealed];
            self.revealed += 1;
            self.wait = self.char_interval();
            if matches!(c, '.' | '!' | '?' | ',') {
                self.wait += self.config.punctuation_pause;
            }
        }
        self.is_complete()
    }

    /// Show the whole line now. Returns `true` if anything was hidden.
    pub fn reveal_all(&mut self) -> bool {
        let changed = !self.is_complete();
        self.revealed = self.chars.len();
        changed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.chars.len()
    }

    pub fn visible_text(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }

    pub fn full_text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TypewriterConfig {
        TypewriterConfig {
            chars_per_second: 10.0,
            punctuation_pause: 0.5,
        }
    }

    #[test]
    fn reveals_at_the_configured_rate() {
        let mut t = Typewriter::new("abcd", &cfg());
        assert_eq!(t.visible_text(), "");
        t.tick(0.25);
        assert_eq!(t.visible_text(), "ab");
        assert!(t.tick(0.2));
        assert_eq!(t.visible_text(), "abcd");
    }

    #[test]
    fn punctuation_holds_the_next_character() {
        let mut t = Typewriter::new("a.b", &cfg());
        t.tick(0.25);
        assert_eq!(t.visible_text(), "a.");
        t.tick(0.3);
        assert_eq!(t.visible_text(), "a.");
        t.tick(0.3);
        assert_eq!(t.visible_text(), "a.b");
    }

    #[test]
    fn reveal_all_completes_without_a_tick() {
        let mut t = Typewriter::new("hello", &cfg());
        assert!(t.reveal_all());
        assert!(t.is_complete());
        assert!(!t.reveal_all());
        assert!(!t.tick(1.0));
    }

    #[test]
    fn empty_text_is_complete_immediately() {
        let t = Typewriter::new("", &cfg());
        assert!(t.is_complete());
        assert_eq!(Typewriter::revealed("hi", &cfg()).visible_text(), "hi");
    }
}
