//! Intro state machine: scene × line × dialogue-complete, with tap, skip
//! and a call-to-action at the end.
//!
//! Every choreography step is a cancellable [`Sequence`] on the central
//! [`Scheduler`]. A new transition always cancels the one in flight first,
//! and fired steps are checked against the live token before they touch
//! state, so a superseded exit can never play over the next entrance.

use crate::anim::{CancelToken, Scheduler, Sequence};
use crate::config::TypewriterConfig;
use crate::shared::{BurstKind, MascotCue, OneShotKind, PenguinExpression};

use super::script::{IntroScript, SceneEffect};
use super::typewriter::Typewriter;

/// Title card timing: fade in, hold, fade out.
pub const TITLE_FADE_IN: f32 = 0.3;
pub const TITLE_HOLD: f32 = 1.2;
pub const TITLE_FADE_OUT: f32 = 0.4;

/// Cues emitted by the sequencer. The plugin forwards the mascot and burst
/// cues as events; the rest are handled internally and reported for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum IntroCue {
    Mascot(MascotCue),
    Burst(BurstKind),
    ShowTitle(String),
    /// The current scene's entrance is done; dialogue may start.
    Ready,
    TypingComplete { scene_index: usize, line_index: usize },
    RevealCta,
}

/// What a tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Mid-transition, finished, or the call-to-action is showing.
    Ignored,
    /// The typing line was revealed in full.
    RevealedLine,
    AdvancedLine,
    AdvancedScene,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleCard {
    pub text: String,
    elapsed: f32,
}

impl TitleCard {
    fn new(text: String) -> Self {
        Self { text, elapsed: 0.0 }
    }

    pub fn opacity(&self) -> f32 {
        let t = self.elapsed;
        if t < TITLE_FADE_IN {
            t / TITLE_FADE_IN
        } else if t < TITLE_FADE_IN + TITLE_HOLD {
            1.0
        } else {
            (1.0 - (t - TITLE_FADE_IN - TITLE_HOLD) / TITLE_FADE_OUT).max(0.0)
        }
    }

    fn expired(&self) -> bool {
        self.elapsed >= TITLE_FADE_IN + TITLE_HOLD + TITLE_FADE_OUT
    }
}

#[derive(Debug)]
pub struct IntroSequencer {
    script: IntroScript,
    typewriter_config: TypewriterConfig,
    reduce_motion: bool,
    scene: usize,
    line: usize,
    dialogue_complete: bool,
    /// Entrance finished; taps are accepted.
    ready: bool,
    cta_visible: bool,
    finished: bool,
    typewriter: Option<Typewriter>,
    title: Option<TitleCard>,
    scheduler: Scheduler<IntroCue>,
    active: Option<CancelToken>,
    /// Cues raised outside a tick, returned by the next one.
    pending: Vec<IntroCue>,
    /// Reduce-motion stand-in for the active sequence: its steps, untimed.
    staged: Vec<IntroCue>,
}

impl IntroSequencer {
    pub fn new(script: IntroScript, typewriter_config: TypewriterConfig, reduce_motion: bool) -> Self {
        Self {
            script,
            typewriter_config,
            reduce_motion,
            scene: 0,
            line: 0,
            dialogue_complete: false,
            ready: false,
            cta_visible: false,
            finished: false,
            typewriter: None,
            title: None,
            scheduler: Scheduler::new(),
            active: None,
            pending: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Play the first scene's entrance.
    pub fn start(&mut self) {
        if self.script.is_empty() {
            self.cta_visible = true;
            self.pending.push(IntroCue::RevealCta);
            return;
        }
        let mut seq = Sequence::new().then(0.0, IntroCue::Mascot(MascotCue::SetVisible(false)));
        seq.extend(self.entrance(0));
        self.extend_with_extras(&mut seq, 0);
        self.dispatch(seq);
    }

    pub fn tap(&mut self) -> TapOutcome {
        if self.finished || !self.ready || self.cta_visible {
            return TapOutcome::Ignored;
        }
        if !self.dialogue_complete {
            if let Some(tw) = self.typewriter.as_mut() {
                tw.reveal_all();
            }
            self.complete_line();
            return TapOutcome::RevealedLine;
        }
        let line_count = self.script.scene(self.scene).map_or(0, |s| s.lines.len());
        if self.line + 1 < line_count {
            self.line += 1;
            self.begin_line();
            let mut ack = Sequence::new();
            if let Some(expression) = self.current_line_expression() {
                ack.push(0.0, IntroCue::Mascot(MascotCue::SetExpression(expression)));
            }
            ack.push(0.0, IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::Nod)));
            self.dispatch(ack);
            return TapOutcome::AdvancedLine;
        }
        if self.scene >= self.script.last_index() {
            return TapOutcome::Ignored;
        }
        self.advance_scene();
        TapOutcome::AdvancedScene
    }

    /// Jump straight to the final scene, replaying only its entrance.
    /// Returns `false` when there is nothing to skip.
    pub fn skip(&mut self) -> bool {
        if self.finished || self.script.is_empty() {
            return false;
        }
        let last = self.script.last_index();
        let in_flight = self.active.is_some_and(|t| self.scheduler.is_live(t)) || !self.staged.is_empty();
        if self.scene == last && (self.ready || in_flight) {
            return false;
        }
        self.cancel_active();
        self.scene = last;
        self.reset_dialogue();
        self.title = None;
        let mut seq = Sequence::new().then(0.0, IntroCue::Mascot(MascotCue::SetVisible(false)));
        seq.extend(self.entrance(last));
        seq.push(0.1, IntroCue::Ready);
        self.dispatch(seq);
        true
    }

    /// Accept the call-to-action. Returns `true` once, when the intro ends.
    pub fn confirm(&mut self) -> bool {
        if !self.cta_visible || self.finished {
            return false;
        }
        self.finished = true;
        self.cancel_active();
        self.scheduler.cancel_all();
        self.typewriter = None;
        self.title = None;
        true
    }

    /// Advance timers and return every cue that fired, in order.
    pub fn tick(&mut self, dt: f32) -> Vec<IntroCue> {
        let mut fired: Vec<IntroCue> = std::mem::take(&mut self.pending);
        fired.append(&mut self.staged);
        if self.finished {
            return fired;
        }
        for (token, cue) in self.scheduler.tick_tagged(dt) {
            if Some(token) != self.active {
                continue;
            }
            fired.push(cue);
        }
        if self.active.is_some_and(|t| !self.scheduler.is_live(t)) {
            self.active = None;
        }

        let mut index = 0;
        while index < fired.len() {
            match fired[index].clone() {
                IntroCue::Ready => self.on_ready(),
                IntroCue::ShowTitle(text) => {
                    if !self.reduce_motion {
                        self.title = Some(TitleCard::new(text));
                    }
                }
                _ => {}
            }
            // `on_ready` can raise cues of its own.
            fired.append(&mut self.pending);
            index += 1;
        }

        if let Some(card) = self.title.as_mut() {
            card.elapsed += dt.max(0.0);
            if card.expired() {
                self.title = None;
            }
        }
        if self.ready && !self.dialogue_complete {
            let done = self.typewriter.as_mut().is_some_and(|tw| tw.tick(dt));
            if done {
                self.complete_line();
                fired.append(&mut self.pending);
            }
        }
        fired
    }

    // ── transitions ──────────────────────────────────────────────────────

    fn advance_scene(&mut self) {
        self.cancel_active();
        let next = (self.scene + 1).min(self.script.last_index());
        self.scene = next;
        self.reset_dialogue();
        let mut seq = Sequence::new()
            .then(0.0, IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::AnticipationDip)))
            .then(0.2, IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::StretchExit)))
            .then(0.35, IntroCue::Mascot(MascotCue::SetVisible(false)));
        seq.extend(self.entrance(next));
        self.extend_with_extras(&mut seq, next);
        self.dispatch(seq);
    }

    /// Pop-in → squash-land → settle.
    fn entrance(&self, scene: usize) -> Sequence<IntroCue> {
        let mut seq = Sequence::new();
        if let Some(s) = self.script.scene(scene) {
            seq.push(0.15, IntroCue::Mascot(MascotCue::SetExpression(s.expression)));
        }
        seq.then(0.0, IntroCue::Mascot(MascotCue::SetVisible(true)))
            .then(0.0, IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::PopIn)))
            .then(0.3, IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::SquashLand)))
            .then(0.18, IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::Settle)))
    }

    /// Title card and scene effects after the entrance, then ready.
    fn extend_with_extras(&self, seq: &mut Sequence<IntroCue>, scene: usize) {
        if let Some(s) = self.script.scene(scene) {
            if let Some(title) = &s.title {
                seq.push(0.0, IntroCue::ShowTitle(title.clone()));
            }
            for effect in &s.effects {
                match effect {
                    SceneEffect::Burst(kind) => seq.push(0.1, IntroCue::Burst(*kind)),
                }
            }
        }
        seq.push(0.2, IntroCue::Ready);
    }

    fn dispatch(&mut self, seq: Sequence<IntroCue>) {
        self.cancel_active();
        if self.reduce_motion {
            // No timers: every step lands on the next tick, in order.
            self.staged = seq.steps().map(|s| s.action.clone()).collect();
            return;
        }
        self.active = Some(self.scheduler.schedule(seq));
    }

    fn cancel_active(&mut self) {
        self.staged.clear();
        if let Some(token) = self.active.take() {
            self.scheduler.cancel(token);
        }
    }

    fn reset_dialogue(&mut self) {
        self.line = 0;
        self.dialogue_complete = false;
        self.ready = false;
        self.cta_visible = false;
        self.typewriter = None;
    }

    fn on_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.line = 0;
        self.begin_line();
        if let Some(expression) = self.current_line_expression() {
            self.pending
                .push(IntroCue::Mascot(MascotCue::SetExpression(expression)));
        }
    }

    fn begin_line(&mut self) {
        self.dialogue_complete = false;
        let text = self
            .script
            .line(self.scene, self.line)
            .map(|l| l.text.clone())
            .unwrap_or_default();
        let tw = if self.reduce_motion {
            Typewriter::revealed(&text, &self.typewriter_config)
        } else {
            Typewriter::new(&text, &self.typewriter_config)
        };
        let instant = tw.is_complete();
        self.typewriter = Some(tw);
        if instant {
            self.complete_line();
        }
    }

    fn complete_line(&mut self) {
        if self.dialogue_complete {
            return;
        }
        self.dialogue_complete = true;
        self.pending.push(IntroCue::TypingComplete {
            scene_index: self.scene,
            line_index: self.line,
        });
        let line_count = self.script.scene(self.scene).map_or(0, |s| s.lines.len());
        if self.scene == self.script.last_index() && self.line + 1 >= line_count {
            self.cta_visible = true;
            self.pending.push(IntroCue::RevealCta);
        }
    }

    fn current_line_expression(&self) -> Option<PenguinExpression> {
        self.script.line(self.scene, self.line)?.expression
    }

    // ── queries ──────────────────────────────────────────────────────────

    pub fn scene_index(&self) -> usize {
        self.scene
    }

    pub fn line_index(&self) -> usize {
        self.line
    }

    pub fn scene_count(&self) -> usize {
        self.script.len()
    }

    pub fn is_dialogue_complete(&self) -> bool {
        self.dialogue_complete
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn cta_visible(&self) -> bool {
        self.cta_visible
    }

    pub fn cta_label(&self) -> &str {
        &self.script.cta_label
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn visible_text(&self) -> String {
        self.typewriter
            .as_ref()
            .map(Typewriter::visible_text)
            .unwrap_or_default()
    }

    pub fn title_card(&self) -> Option<&TitleCard> {
        self.title.as_ref()
    }

    /// Live choreography sequences (0 or 1).
    pub fn in_flight(&self) -> usize {
        self.scheduler.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::script::{IntroLine, IntroScene};
    use crate::shared::PenguinExpression;

    fn script() -> IntroScript {
        let scene = |lines: usize, effect: Option<BurstKind>| IntroScene {
            title: Some("Title".into()),
            expression: PenguinExpression::Happy,
            lines: (0..lines).map(|i| IntroLine::new(format!("line {i}"))).collect(),
            effects: effect.map(SceneEffect::Burst).into_iter().collect(),
        };
        IntroScript::new(
            vec![
                scene(2, None),
                scene(1, Some(BurstKind::FishReward)),
                scene(2, Some(BurstKind::Confetti)),
            ],
            "Go",
        )
    }

    fn sequencer() -> IntroSequencer {
        let mut s = IntroSequencer::new(script(), TypewriterConfig::default(), false);
        s.start();
        s
    }

    /// Tick until the scene is ready, collecting cues.
    fn settle(s: &mut IntroSequencer) -> Vec<IntroCue> {
        let mut cues = Vec::new();
        for _ in 0..200 {
            cues.extend(s.tick(0.05));
            if s.is_ready() && s.in_flight() == 0 {
                break;
            }
        }
        cues
    }

    fn finish_line(s: &mut IntroSequencer) {
        assert_eq!(s.tap(), TapOutcome::RevealedLine);
    }

    #[test]
    fn taps_before_the_entrance_finishes_are_ignored() {
        let mut s = sequencer();
        assert_eq!(s.tap(), TapOutcome::Ignored);
        settle(&mut s);
        assert!(s.is_ready());
    }

    #[test]
    fn tap_while_typing_reveals_without_moving() {
        let mut s = sequencer();
        settle(&mut s);
        assert!(!s.is_dialogue_complete());
        finish_line(&mut s);
        assert!(s.is_dialogue_complete());
        assert_eq!((s.scene_index(), s.line_index()), (0, 0));
        assert_eq!(s.visible_text(), "line 0");
        let cues = s.tick(0.0);
        assert!(cues.contains(&IntroCue::TypingComplete { scene_index: 0, line_index: 0 }));
    }

    #[test]
    fn tap_after_a_line_advances_and_nods() {
        let mut s = sequencer();
        settle(&mut s);
        finish_line(&mut s);
        assert_eq!(s.tap(), TapOutcome::AdvancedLine);
        assert_eq!(s.line_index(), 1);
        assert!(!s.is_dialogue_complete());
        let cues = s.tick(0.0);
        assert!(cues.contains(&IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::Nod))));
    }

    #[test]
    fn last_line_moves_to_the_next_scene_exactly_once() {
        let mut s = sequencer();
        settle(&mut s);
        finish_line(&mut s);
        s.tap();
        finish_line(&mut s);
        assert_eq!(s.tap(), TapOutcome::AdvancedScene);
        assert_eq!((s.scene_index(), s.line_index()), (1, 0));
        assert!(!s.is_dialogue_complete());
        // Mid-transition taps cannot advance again.
        assert_eq!(s.tap(), TapOutcome::Ignored);
        let cues = settle(&mut s);
        assert_eq!(s.scene_index(), 1);
        let exit = cues
            .iter()
            .position(|c| *c == IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::StretchExit)));
        let entrance = cues
            .iter()
            .position(|c| *c == IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::PopIn)));
        assert!(exit.unwrap() < entrance.unwrap());
        assert!(cues.contains(&IntroCue::Burst(BurstKind::FishReward)));
        assert!(s.title_card().is_some());
    }

    #[test]
    fn final_scene_reveals_cta_and_stops_advancing() {
        let mut s = sequencer();
        settle(&mut s);
        assert!(s.skip());
        settle(&mut s);
        finish_line(&mut s);
        assert!(!s.cta_visible());
        s.tap();
        finish_line(&mut s);
        assert!(s.cta_visible());
        assert_eq!(s.tap(), TapOutcome::Ignored);
        assert_eq!(s.scene_index(), 2);
        assert!(s.confirm());
        assert!(!s.confirm());
        assert!(s.is_finished());
    }

    #[test]
    fn skip_jumps_to_the_end_with_only_the_final_entrance() {
        let mut s = sequencer();
        assert!(s.skip());
        assert_eq!(s.scene_index(), 2);
        assert_eq!(s.line_index(), 0);
        let cues = settle(&mut s);
        assert!(s.is_ready());
        assert!(cues.iter().all(|c| !matches!(c, IntroCue::Burst(_) | IntroCue::ShowTitle(_))));
        assert!(!cues.contains(&IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::StretchExit))));
        assert!(cues.contains(&IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::PopIn))));
        assert!(!s.skip());
    }

    #[test]
    fn skip_cancels_an_exit_in_flight() {
        let mut s = sequencer();
        settle(&mut s);
        finish_line(&mut s);
        s.tap();
        finish_line(&mut s);
        s.tap();
        s.tick(0.05);
        assert!(s.skip());
        assert_eq!(s.in_flight(), 1);
        let cues = settle(&mut s);
        assert!(!cues.contains(&IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::StretchExit))));
        assert!(!cues.contains(&IntroCue::Burst(BurstKind::FishReward)));
    }

    #[test]
    fn typewriter_completes_on_its_own() {
        let mut s = sequencer();
        settle(&mut s);
        let mut cues = Vec::new();
        for _ in 0..100 {
            cues.extend(s.tick(0.05));
        }
        assert!(s.is_dialogue_complete());
        assert!(cues.contains(&IntroCue::TypingComplete { scene_index: 0, line_index: 0 }));
    }

    #[test]
    fn reduce_motion_schedules_nothing() {
        let mut s = IntroSequencer::new(script(), TypewriterConfig::default(), true);
        s.start();
        assert_eq!(s.in_flight(), 0);
        s.tick(0.0);
        assert!(s.is_ready());
        assert!(s.is_dialogue_complete());
        assert_eq!(s.tap(), TapOutcome::AdvancedLine);
        s.tick(0.0);
        assert_eq!(s.tap(), TapOutcome::AdvancedScene);
        assert_eq!(s.in_flight(), 0);
        s.tick(0.0);
        assert!(s.is_ready());
        assert!(s.title_card().is_none());
    }

    #[test]
    fn reduce_motion_skip_drops_the_superseded_transition() {
        let mut s = IntroSequencer::new(script(), TypewriterConfig::default(), true);
        s.start();
        s.tick(0.0);
        assert_eq!(s.tap(), TapOutcome::AdvancedLine);
        s.tick(0.0);
        assert_eq!(s.tap(), TapOutcome::AdvancedScene);
        assert!(s.skip());
        let cues = s.tick(0.0);
        assert_eq!(s.scene_index(), 2);
        assert!(s.is_ready());
        assert!(!cues.contains(&IntroCue::Burst(BurstKind::FishReward)));
        assert!(!cues.contains(&IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::StretchExit))));
        assert!(cues.iter().all(|c| !matches!(c, IntroCue::ShowTitle(_))));
        let pops = cues
            .iter()
            .filter(|c| **c == IntroCue::Mascot(MascotCue::PlayOneShot(OneShotKind::PopIn)))
            .count();
        assert_eq!(pops, 1);
    }
}
