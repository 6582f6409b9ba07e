//! Central animation clock.
//!
//! Every delayed step in the scene (choreography, title cards, one-shot
//! effects) is registered here as a [`Sequence`] of `(action, delay)` steps.
//! A single [`Scheduler::tick`] per frame advances all of them, fires the
//! actions whose delay has elapsed, and hands them back to the caller in
//! issue order. Cancelling a sequence drops its remaining steps; a stale
//! [`CancelToken`] can never fire again.

use std::collections::VecDeque;

pub mod easing;

pub use easing::{ease_in_out, ease_out_back, ease_out_cubic, lerp, Tween};

/// Absorbs float drift when frame deltas sum to a step delay.
const TIME_TOLERANCE: f32 = 1e-5;

// ═══════════════════════════════════════════════════════════════════════
// SEQUENCE
// ═══════════════════════════════════════════════════════════════════════

/// One step: wait `delay` seconds, then fire `action`.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<A> {
    pub action: A,
    pub delay: f32,
}

/// Ordered list of steps consumed one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<A> {
    steps: VecDeque<Step<A>>,
    /// Time spent waiting on the front step.
    step_timer: f32,
}

impl<A> Default for Sequence<A> {
    fn default() -> Self {
        Self {
            steps: VecDeque::new(),
            step_timer: 0.0,
        }
    }
}

impl<A> Sequence<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step that fires `delay` seconds after the previous one.
    pub fn then(mut self, delay: f32, action: A) -> Self {
        self.push(delay, action);
        self
    }

    pub fn push(&mut self, delay: f32, action: A) {
        self.steps.push_back(Step {
            action,
            delay: delay.max(0.0),
        });
    }

    pub fn extend(&mut self, other: Sequence<A>) {
        self.steps.extend(other.steps);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step<A>> {
        self.steps.iter()
    }

    /// Advance by `dt`, pushing fired actions into `out`. Leftover time
    /// carries into the next step so large frames stay in order.
    fn advance(&mut self, dt: f32, out: &mut Vec<A>) {
        self.step_timer += dt;
        while let Some(front) = self.steps.front() {
            if self.step_timer + TIME_TOLERANCE < front.delay {
                break;
            }
            self.step_timer -= front.delay;
            if let Some(step) = self.steps.pop_front() {
                out.push(step.action);
            }
        }
        if self.steps.is_empty() {
            self.step_timer = 0.0;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SCHEDULER
// ═══════════════════════════════════════════════════════════════════════

/// Handle to a scheduled sequence. Generation-checked: a token is only
/// ever live once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u64);

#[derive(Debug)]
struct Track<A> {
    token: CancelToken,
    sequence: Sequence<A>,
}

/// Owns every in-flight sequence for one component.
#[derive(Debug)]
pub struct Scheduler<A> {
    tracks: Vec<Track<A>>,
    next_id: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence. Empty sequences are accepted but never live.
    pub fn schedule(&mut self, sequence: Sequence<A>) -> CancelToken {
        let token = CancelToken(self.next_id);
        self.next_id += 1;
        if !sequence.is_empty() {
            self.tracks.push(Track { token, sequence });
        }
        token
    }

    /// Drop the remaining steps of `token`. Safe for tokens that already
    /// finished or were never live.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.token != token);
        before != self.tracks.len()
    }

    pub fn cancel_all(&mut self) {
        self.tracks.clear();
    }

    pub fn is_live(&self, token: CancelToken) -> bool {
        self.tracks.iter().any(|t| t.token == token)
    }

    /// Number of sequences with steps still pending.
    pub fn active_count(&self) -> usize {
        self.tracks.len()
    }

    /// Advance every track by `dt`. Actions come back grouped by track in
    /// scheduling order, each track's actions in step order.
    pub fn tick(&mut self, dt: f32) -> Vec<A> {
        let mut fired = Vec::new();
        if dt < 0.0 {
            return fired;
        }
        for track in &mut self.tracks {
            track.sequence.advance(dt, &mut fired);
        }
        self.tracks.retain(|t| !t.sequence.is_empty());
        fired
    }

    /// Same as [`tick`](Self::tick) but tags each action with its token.
    pub fn tick_tagged(&mut self, dt: f32) -> Vec<(CancelToken, A)> {
        let mut fired = Vec::new();
        if dt < 0.0 {
            return fired;
        }
        for track in &mut self.tracks {
            let token = track.token;
            let mut out = Vec::new();
            track.sequence.advance(dt, &mut out);
            fired.extend(out.into_iter().map(|a| (token, a)));
        }
        self.tracks.retain(|t| !t.sequence.is_empty());
        fired
    }
}
