//! Shared components, resources, events, and states for the Nudgy scene.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly: the environment, the
//! mascot, the intro sequencer and the speech bubble only talk to each other
//! through the events and resources declared below.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ═══════════════════════════════════════════════════════════════════════
// APP STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum AppState {
    #[default]
    Loading,
    Intro,
    Habitat,
}

// ═══════════════════════════════════════════════════════════════════════
// TIME OF DAY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Dawn,
        TimeOfDay::Day,
        TimeOfDay::Dusk,
        TimeOfDay::Night,
    ];

    /// Bucket a wall-clock hour (0-23). Hours outside 0-23 wrap.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            6..=9 => TimeOfDay::Dawn,
            10..=16 => TimeOfDay::Day,
            17..=19 => TimeOfDay::Dusk,
            _ => TimeOfDay::Night,
        }
    }

    /// Resolve from the local wall clock.
    pub fn now() -> Self {
        use chrono::Timelike;
        Self::from_hour(chrono::Local::now().hour())
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Day => "day",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Night => "night",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MOOD
// ═══════════════════════════════════════════════════════════════════════

/// Productivity-derived scene mood. The numeric attributes live in the
/// palette module's lookup table (`palette::mood_profile`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mood {
    #[default]
    Cold,
    Warming,
    Productive,
    Golden,
    Stormy,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Cold,
        Mood::Warming,
        Mood::Productive,
        Mood::Golden,
        Mood::Stormy,
    ];

    /// Derive a mood from today's productivity signal.
    ///
    /// Overdue work outweighs progress: three or more overdue tasks always
    /// reads as a storm.
    pub fn from_progress(completed_today: u32, overdue: u32) -> Self {
        if overdue >= 3 {
            return Mood::Stormy;
        }
        match completed_today {
            0 => Mood::Cold,
            1..=2 => Mood::Warming,
            3..=5 => Mood::Productive,
            _ => Mood::Golden,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STAGE TIER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum StageTier {
    #[default]
    BareIce,
    SnowNest,
    FishingPier,
    CozyCamp,
    SummitLodge,
}

impl StageTier {
    pub const ALL: [StageTier; 5] = [
        StageTier::BareIce,
        StageTier::SnowNest,
        StageTier::FishingPier,
        StageTier::CozyCamp,
        StageTier::SummitLodge,
    ];

    /// Breakpoints: 1–3, 4–6, 7–9, 10–14, 15+. Levels below 1 clamp to the
    /// lowest tier.
    pub fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=3 => StageTier::BareIce,
            4..=6 => StageTier::SnowNest,
            7..=9 => StageTier::FishingPier,
            10..=14 => StageTier::CozyCamp,
            _ => StageTier::SummitLodge,
        }
    }

    /// Inclusive level range covered by this tier. The top tier is open-ended.
    pub fn level_range(self) -> (i32, Option<i32>) {
        match self {
            StageTier::BareIce => (1, Some(3)),
            StageTier::SnowNest => (4, Some(6)),
            StageTier::FishingPier => (7, Some(9)),
            StageTier::CozyCamp => (10, Some(14)),
            StageTier::SummitLodge => (15, None),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            StageTier::BareIce => Some(StageTier::SnowNest),
            StageTier::SnowNest => Some(StageTier::FishingPier),
            StageTier::FishingPier => Some(StageTier::CozyCamp),
            StageTier::CozyCamp => Some(StageTier::SummitLodge),
            StageTier::SummitLodge => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StageTier::BareIce => "Bare Ice",
            StageTier::SnowNest => "Snow Nest",
            StageTier::FishingPier => "Fishing Pier",
            StageTier::CozyCamp => "Cozy Camp",
            StageTier::SummitLodge => "Summit Lodge",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MASCOT EXPRESSIONS & ACCESSORIES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PenguinExpression {
    #[default]
    Idle,
    Happy,
    Thinking,
    Sleeping,
    Celebrating,
    Listening,
    Talking,
    Waving,
    Nudging,
    Confused,
    Typing,
    ThumbsUp,
}

impl PenguinExpression {
    pub const ALL: [PenguinExpression; 12] = [
        PenguinExpression::Idle,
        PenguinExpression::Happy,
        PenguinExpression::Thinking,
        PenguinExpression::Sleeping,
        PenguinExpression::Celebrating,
        PenguinExpression::Listening,
        PenguinExpression::Talking,
        PenguinExpression::Waving,
        PenguinExpression::Nudging,
        PenguinExpression::Confused,
        PenguinExpression::Typing,
        PenguinExpression::ThumbsUp,
    ];
}

/// Where an accessory attaches on the mascot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessorySlot {
    Head,
    Face,
    Neck,
    Body,
    Held,
    Furniture,
}

impl AccessorySlot {
    /// Draw priority inside the in-front-of-body group (lower draws first).
    /// Furniture never reaches this group; it sorts behind the body.
    pub fn front_priority(self) -> u8 {
        match self {
            AccessorySlot::Furniture => 0,
            AccessorySlot::Body => 1,
            AccessorySlot::Neck => 2,
            AccessorySlot::Held => 3,
            AccessorySlot::Head => 4,
            AccessorySlot::Face => 5,
        }
    }

    pub fn is_behind_body(self) -> bool {
        matches!(self, AccessorySlot::Furniture)
    }
}

/// Static catalog entry for a wearable or placeable accessory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryItem {
    pub id: String,
    /// Image path under the asset root.
    pub asset: String,
    pub slot: AccessorySlot,
    /// Offset from the mascot centre in units of mascot size (y down).
    pub offset: (f32, f32),
    /// Scale relative to mascot size.
    pub scale: f32,
}

/// One-shot body moves the mascot can play on top of its expression loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OneShotKind {
    Bounce,
    DoubleBounce,
    Wiggle,
    Nod,
    AnticipationDip,
    StretchExit,
    PopIn,
    SquashLand,
    Settle,
}

/// Instructions the intro sequencer (or the host) sends to the mascot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MascotCue {
    SetExpression(PenguinExpression),
    PlayOneShot(OneShotKind),
    /// Show or hide the character (after an exit / before an entrance).
    SetVisible(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BurstKind {
    Confetti,
    Sparkle,
    FishReward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpeechStyle {
    #[default]
    Speech,
    Thought,
    Whisper,
    Exclaim,
}

// ═══════════════════════════════════════════════════════════════════════
// SCENE INPUTS: the injected context every domain reads
// ═══════════════════════════════════════════════════════════════════════

/// External state flowing one way into the scene. Constructed once by the
/// application root; domains read it, only the host writes it.
#[derive(Resource, Debug, Clone)]
pub struct SceneInputs {
    /// Fixed time of day for deterministic rendering; `None` follows the clock.
    pub time_override: Option<TimeOfDay>,
    pub mood: Mood,
    pub level: i32,
    /// Explicit tier; `None` derives it from `level`.
    pub stage_override: Option<StageTier>,
    pub unlocked_props: HashSet<String>,
    pub equipped_accessories: HashSet<String>,
    pub width: f32,
    pub height: f32,
    pub reduce_motion: bool,
}

impl Default for SceneInputs {
    fn default() -> Self {
        Self {
            time_override: None,
            mood: Mood::Cold,
            level: 1,
            stage_override: None,
            unlocked_props: HashSet::new(),
            equipped_accessories: HashSet::new(),
            width: SCENE_WIDTH,
            height: SCENE_HEIGHT,
            reduce_motion: false,
        }
    }
}

impl SceneInputs {
    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_override.unwrap_or_else(TimeOfDay::now)
    }

    pub fn stage(&self) -> StageTier {
        self.stage_override
            .unwrap_or_else(|| StageTier::from_level(self.level))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct SetExpressionEvent {
    pub expression: PenguinExpression,
}

#[derive(Event, Debug, Clone)]
pub struct MascotCueEvent {
    pub cue: MascotCue,
}

#[derive(Event, Debug, Clone)]
pub struct BurstRequestEvent {
    pub kind: BurstKind,
    /// Scene-space origin (y down, 0..width × 0..height).
    pub origin: Vec2,
    /// `None` uses the configured size for the kind.
    pub count: Option<usize>,
}

/// A line for the speech bubble.
///
/// `auto_dismiss_secs: None` takes the style's default timer (none for
/// thoughts). Pass `Some(0.0)` to keep the line up until it is dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechLine {
    pub text: String,
    pub style: SpeechStyle,
    pub auto_dismiss_secs: Option<f32>,
}

impl SpeechLine {
    pub fn new(text: impl Into<String>, style: SpeechStyle) -> Self {
        Self {
            text: text.into(),
            style,
            auto_dismiss_secs: None,
        }
    }

    pub fn dismiss_after(mut self, secs: f32) -> Self {
        self.auto_dismiss_secs = Some(secs);
        self
    }
}

/// Speech bubble commands, applied in the order they were sent.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// Replace whatever is showing.
    Say(SpeechLine),
    /// Show after everything already queued.
    Queue(SpeechLine),
    Dismiss,
}

#[derive(Event, Debug, Clone)]
pub struct IntroTapEvent;

#[derive(Event, Debug, Clone)]
pub struct IntroSkipEvent;

/// The user accepted the intro's call-to-action.
#[derive(Event, Debug, Clone)]
pub struct IntroConfirmEvent;

/// Sent once the user confirms the final call-to-action.
#[derive(Event, Debug, Clone)]
pub struct IntroFinishedEvent;

/// A typewriter line finished revealing (naturally or via tap).
#[derive(Event, Debug, Clone)]
pub struct TypingCompleteEvent {
    pub scene_index: usize,
    pub line_index: usize,
}

/// A non-looping sprite clip reached its last frame.
#[derive(Event, Debug, Clone)]
pub struct SpriteAnimationCompleteEvent {
    pub entity: Entity,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCENE_WIDTH: f32 = 390.0;
pub const SCENE_HEIGHT: f32 = 844.0;

/// Mascot draw size relative to scene width.
pub const MASCOT_SIZE_FRACTION: f32 = 0.42;

/// Height fraction where the mascot's feet meet the platform surface.
pub const MASCOT_BASELINE_FRACTION: f32 = 0.712;

// Z layers above the environment stack (the stack itself uses 0..=20).
pub const Z_MASCOT: f32 = 40.0;
pub const Z_SPEECH: f32 = 60.0;
pub const Z_TITLE_CARD: f32 = 80.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_buckets_switch_at_their_edges() {
        let edges = [
            (5, TimeOfDay::Night),
            (6, TimeOfDay::Dawn),
            (9, TimeOfDay::Dawn),
            (10, TimeOfDay::Day),
            (16, TimeOfDay::Day),
            (17, TimeOfDay::Dusk),
            (19, TimeOfDay::Dusk),
            (20, TimeOfDay::Night),
            (0, TimeOfDay::Night),
            (23, TimeOfDay::Night),
        ];
        for (hour, expected) in edges {
            assert_eq!(TimeOfDay::from_hour(hour), expected, "hour {hour}");
        }
        assert_eq!(TimeOfDay::from_hour(30), TimeOfDay::Dawn);
    }

    #[test]
    fn override_wins_over_the_clock() {
        let inputs = SceneInputs {
            time_override: Some(TimeOfDay::Dusk),
            ..Default::default()
        };
        assert_eq!(inputs.time_of_day(), TimeOfDay::Dusk);
    }

    #[test]
    fn stage_never_drops_as_level_rises() {
        let mut previous = StageTier::from_level(1);
        for level in 2..=40 {
            let tier = StageTier::from_level(level);
            assert!(tier >= previous, "level {level}");
            previous = tier;
        }
        assert_eq!(previous, StageTier::SummitLodge);
    }

    #[test]
    fn non_positive_levels_clamp_to_bare_ice() {
        for level in [0, -1, -250, i32::MIN] {
            assert_eq!(StageTier::from_level(level), StageTier::BareIce);
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(StageTier::from_level(3), StageTier::BareIce);
        assert_eq!(StageTier::from_level(4), StageTier::SnowNest);
        assert_eq!(StageTier::from_level(9), StageTier::FishingPier);
        assert_eq!(StageTier::from_level(10), StageTier::CozyCamp);
        assert_eq!(StageTier::from_level(14), StageTier::CozyCamp);
        assert_eq!(StageTier::from_level(15), StageTier::SummitLodge);
    }

    #[test]
    fn level_ranges_agree_with_from_level() {
        for tier in StageTier::ALL {
            let (low, high) = tier.level_range();
            assert_eq!(StageTier::from_level(low), tier);
            match high {
                Some(high) => {
                    assert_eq!(StageTier::from_level(high), tier);
                    assert_eq!(StageTier::from_level(high + 1), tier.next().unwrap_or(tier));
                }
                None => assert_eq!(tier.next(), None),
            }
        }
    }

    #[test]
    fn progress_picks_a_mood() {
        assert_eq!(Mood::from_progress(0, 0), Mood::Cold);
        assert_eq!(Mood::from_progress(2, 0), Mood::Warming);
        assert_eq!(Mood::from_progress(3, 2), Mood::Productive);
        assert_eq!(Mood::from_progress(6, 0), Mood::Golden);
        assert_eq!(Mood::from_progress(10, 3), Mood::Stormy);
    }
}
