//! Intro scene data: per-scene lines, titles, mascot expression and effects.

use crate::shared::{BurstKind, PenguinExpression};

#[derive(Debug, Clone, PartialEq)]
pub struct IntroLine {
    pub text: String,
    /// Expression switched to when this line starts.
    pub expression: Option<PenguinExpression>,
}

impl IntroLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expression: None,
        }
    }

    pub fn with_expression(mut self, expression: PenguinExpression) -> Self {
        self.expression = Some(expression);
        self
    }
}

/// One-shot effect played after a scene's entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEffect {
    Burst(BurstKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntroScene {
    /// Transient title card shown during the entrance.
    pub title: Option<String>,
    /// Expression the mascot enters with.
    pub expression: PenguinExpression,
    pub lines: Vec<IntroLine>,
    pub effects: Vec<SceneEffect>,
}

/// Ordered intro scenes. Never holds a scene without lines.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroScript {
    scenes: Vec<IntroScene>,
    pub cta_label: String,
}

impl IntroScript {
    /// Scenes without lines are dropped.
    pub fn new(scenes: Vec<IntroScene>, cta_label: impl Into<String>) -> Self {
        Self {
            scenes: scenes.into_iter().filter(|s| !s.lines.is_empty()).collect(),
            cta_label: cta_label.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scene(&self, index: usize) -> Option<&IntroScene> {
        self.scenes.get(index)
    }

    pub fn line(&self, scene: usize, line: usize) -> Option<&IntroLine> {
        self.scenes.get(scene)?.lines.get(line)
    }

    pub fn last_index(&self) -> usize {
        self.scenes.len().saturating_sub(1)
    }
}

impl Default for IntroScript {
    fn default() -> Self {
        use PenguinExpression as E;
        Self::new(
            vec![
                IntroScene {
                    title: None,
                    expression: E::Waving,
                    lines: vec![
                        IntroLine::new("Oh! Hi there!"),
                        IntroLine::new("I'm Nudgy. I live on this little ice floe.")
                            .with_expression(E::Happy),
                    ],
                    effects: vec![],
                },
                IntroScene {
                    title: Some("Gentle nudges".into()),
                    expression: E::Thinking,
                    lines: vec![
                        IntroLine::new("I keep an eye on the things you want to get done."),
                        IntroLine::new("When something slips, I'll give you a little nudge.")
                            .with_expression(E::Nudging),
                    ],
                    effects: vec![],
                },
                IntroScene {
                    title: Some("Fish for progress".into()),
                    expression: E::Celebrating,
                    lines: vec![
                        IntroLine::new("Every task you finish earns us fish!"),
                        IntroLine::new("I really, really like fish.").with_expression(E::Happy),
                    ],
                    effects: vec![SceneEffect::Burst(BurstKind::FishReward)],
                },
                IntroScene {
                    title: Some("A home that grows".into()),
                    expression: E::Happy,
                    lines: vec![
                        IntroLine::new("As you level up, our habitat grows too."),
                        IntroLine::new("Snow nests, a fishing pier, maybe even a lodge someday."),
                    ],
                    effects: vec![SceneEffect::Burst(BurstKind::Sparkle)],
                },
                IntroScene {
                    title: Some("Ready?".into()),
                    expression: E::ThumbsUp,
                    lines: vec![IntroLine::new("Let's get started together!")],
                    effects: vec![SceneEffect::Burst(BurstKind::Confetti)],
                },
            ],
            "Let's go",
        )
    }
}
