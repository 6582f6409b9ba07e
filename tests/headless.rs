//! Headless integration tests for the Nudgy scene.
//!
//! These drive the real plugin set on `MinimalPlugins` with a fixed frame
//! step and no window, and check that the domains are wired together:
//! config loading, the intro flow, weather reseeding, speech and bursts.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use nudgy_scene::choreography::IntroFlow;
use nudgy_scene::config::SceneConfig;
use nudgy_scene::environment::{LayerKind, SceneLayers};
use nudgy_scene::mascot::{Mascot, MascotFrames, SpriteClip};
use nudgy_scene::particles::{RewardBursts, SnowField, WindField};
use nudgy_scene::shared::*;
use nudgy_scene::speech::Speech;
use nudgy_scene::ScenePlugins;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

const FRAME: Duration = Duration::from_millis(50);

fn night_inputs() -> SceneInputs {
    SceneInputs {
        time_override: Some(TimeOfDay::Night),
        ..default()
    }
}

/// Builds the headless app and runs it through Loading into Intro.
fn boot(inputs: SceneInputs) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.insert_resource(inputs);
    app.add_plugins(ScenePlugins);

    // First update enters Loading and loads config; second applies NextState.
    app.update();
    app.update();
    app
}

fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

fn run_until(app: &mut App, max_frames: usize, done: impl Fn(&App) -> bool) -> bool {
    for _ in 0..max_frames {
        if done(app) {
            return true;
        }
        app.update();
    }
    done(app)
}

fn mascot(app: &mut App) -> Mascot {
    let world = app.world_mut();
    let mut query = world.query::<&Mascot>();
    query.single(world).clone()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_boot_reaches_intro_with_everything_spawned() {
    let mut app = boot(night_inputs());

    assert_eq!(state(&app), AppState::Intro);
    assert!(app.world().get_resource::<SceneConfig>().is_some());
    assert!(app.world().get_resource::<IntroFlow>().is_some());

    let m = mascot(&mut app);
    assert!(m.animator.is_running());

    app.update();
    let layers = &app.world().resource::<SceneLayers>().0;
    assert_eq!(layers.kinds(), LayerKind::ORDER.to_vec());
    assert!(layers.is_visible(LayerKind::Sky));
    assert!(layers.is_visible(LayerKind::Stars));
    assert!(!app.world().resource::<SnowField>().is_empty());

    // Smoke: a few seconds of frames without panic.
    for _ in 0..60 {
        app.update();
    }
    assert_eq!(state(&app), AppState::Intro);
}

// ─────────────────────────────────────────────────────────────────────────────
// Intro flow
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_skip_then_confirm_enters_habitat() {
    let mut app = boot(night_inputs());
    let last = app.world().resource::<IntroFlow>().scene_count() - 1;

    app.world_mut().send_event(IntroSkipEvent);
    app.update();
    assert_eq!(app.world().resource::<IntroFlow>().scene_index(), last);

    assert!(run_until(&mut app, 100, |app| {
        app.world().resource::<IntroFlow>().is_ready()
    }));

    // Tapping either reveals the line or finds it already done.
    for _ in 0..5 {
        if app.world().resource::<IntroFlow>().cta_visible() {
            break;
        }
        app.world_mut().send_event(IntroTapEvent);
        app.update();
    }
    assert!(app.world().resource::<IntroFlow>().cta_visible());

    app.world_mut().send_event(IntroConfirmEvent);
    assert!(run_until(&mut app, 5, |app| state(app) == AppState::Habitat));
    assert!(app.world().get_resource::<IntroFlow>().is_none());

    assert!(run_until(&mut app, 3, |app| {
        app.world().resource::<Speech>().current().is_some()
    }));
}

#[test]
fn test_intro_taps_are_ignored_during_the_entrance() {
    let mut app = boot(night_inputs());
    app.world_mut().send_event(IntroTapEvent);
    app.update();
    let flow = app.world().resource::<IntroFlow>();
    assert_eq!((flow.scene_index(), flow.line_index()), (0, 0));
}

#[test]
fn test_intro_cues_drive_the_mascot() {
    let mut app = boot(night_inputs());
    assert!(run_until(&mut app, 100, |app| {
        app.world().resource::<IntroFlow>().is_ready()
    }));
    app.update();
    // The first scene enters waving.
    assert_eq!(mascot(&mut app).animator.expression(), PenguinExpression::Waving);
    assert!(mascot(&mut app).animator.is_visible());
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mood_change_reseeds_weather() {
    let mut app = boot(night_inputs());
    app.update();
    assert!(app.world().resource::<WindField>().is_empty());
    assert!(!app
        .world()
        .resource::<SceneLayers>()
        .0
        .is_visible(LayerKind::StormOverlay));

    app.world_mut().resource_mut::<SceneInputs>().mood = Mood::Stormy;
    app.update();

    assert!(!app.world().resource::<WindField>().is_empty());
    assert!(app
        .world()
        .resource::<SceneLayers>()
        .0
        .is_visible(LayerKind::StormOverlay));
}

#[test]
fn test_reduce_motion_starts_no_timers() {
    let mut app = boot(SceneInputs {
        reduce_motion: true,
        ..night_inputs()
    });
    for _ in 0..10 {
        app.update();
    }
    let m = mascot(&mut app);
    assert!(m.animator.reduce_motion());
    assert_eq!(m.animator.active_timers(), 0);
    assert!(app.world().resource::<SnowField>().is_empty());
    assert!(!app
        .world()
        .resource::<SceneLayers>()
        .0
        .is_visible(LayerKind::Snow));

    app.world_mut().send_event(BurstRequestEvent {
        kind: BurstKind::Confetti,
        origin: Vec2::new(195.0, 400.0),
        count: None,
    });
    app.update();
    assert!(app.world().resource::<RewardBursts>().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Speech and bursts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_queued_dialogue_follows_dismissal() {
    let mut app = boot(night_inputs());
    app.world_mut()
        .send_event(SpeechEvent::Say(SpeechLine::new("A", SpeechStyle::Thought)));
    app.world_mut()
        .send_event(SpeechEvent::Queue(SpeechLine::new("B", SpeechStyle::Thought)));
    app.update();
    assert_eq!(bubble_text(&app).as_deref(), Some("A"));

    app.world_mut().send_event(SpeechEvent::Dismiss);
    app.update();
    assert_eq!(bubble_text(&app).as_deref(), Some("B"));

    app.world_mut().send_event(SpeechEvent::Dismiss);
    app.update();
    assert_eq!(bubble_text(&app), None);
}

fn bubble_text(app: &App) -> Option<String> {
    app.world()
        .resource::<Speech>()
        .current()
        .map(|m| m.text.clone())
}

#[test]
fn test_speech_commands_apply_in_send_order() {
    let mut app = boot(night_inputs());
    app.world_mut().send_event(SpeechEvent::Dismiss);
    app.world_mut()
        .send_event(SpeechEvent::Say(SpeechLine::new("A", SpeechStyle::Speech).dismiss_after(10.0)));
    app.update();
    assert_eq!(bubble_text(&app).as_deref(), Some("A"));

    // Queue onto an empty bubble shows at once; the later say replaces it.
    app.world_mut().send_event(SpeechEvent::Dismiss);
    app.world_mut()
        .send_event(SpeechEvent::Queue(SpeechLine::new("B", SpeechStyle::Thought)));
    app.world_mut()
        .send_event(SpeechEvent::Say(SpeechLine::new("C", SpeechStyle::Thought)));
    app.update();
    assert_eq!(bubble_text(&app).as_deref(), Some("C"));
    assert_eq!(app.world().resource::<Speech>().queued(), 0);
}

#[test]
fn test_zero_auto_dismiss_keeps_the_line_up() {
    let mut app = boot(night_inputs());
    app.world_mut()
        .send_event(SpeechEvent::Say(SpeechLine::new("stay", SpeechStyle::Speech).dismiss_after(0.0)));
    app.update();
    assert!(!app.world().resource::<Speech>().has_timer());
    for _ in 0..200 {
        app.update();
    }
    assert_eq!(bubble_text(&app).as_deref(), Some("stay"));
}

#[test]
fn test_speech_auto_dismisses() {
    let mut app = boot(night_inputs());
    app.world_mut()
        .send_event(SpeechEvent::Say(SpeechLine::new("brief", SpeechStyle::Speech).dismiss_after(0.2)));
    app.update();
    assert!(app.world().resource::<Speech>().current().is_some());
    assert!(run_until(&mut app, 20, |app| {
        app.world().resource::<Speech>().current().is_none()
    }));
}

#[test]
fn test_burst_request_spawns_particles_that_expire() {
    let mut app = boot(night_inputs());
    app.world_mut().send_event(BurstRequestEvent {
        kind: BurstKind::FishReward,
        origin: Vec2::new(195.0, 420.0),
        count: Some(6),
    });
    app.update();
    assert_eq!(app.world().resource::<RewardBursts>().len(), 6);
    assert!(run_until(&mut app, 200, |app| {
        app.world().resource::<RewardBursts>().is_empty()
    }));
}

#[test]
fn test_expression_event_switches_sprite_clip() {
    let mut app = boot(night_inputs());
    // Let the intro entrance finish so its cues don't race the event.
    assert!(run_until(&mut app, 100, |app| {
        app.world().resource::<IntroFlow>().is_ready()
    }));
    app.update();
    app.world_mut().send_event(SetExpressionEvent {
        expression: PenguinExpression::Sleeping,
    });
    app.update();
    let m = mascot(&mut app);
    assert_eq!(m.animator.expression(), PenguinExpression::Sleeping);
    assert_eq!(
        m.sprite.animation().expression_class(),
        PenguinExpression::Sleeping
    );

    // No frame sheets ship with the crate, so the clip falls back to its glyph.
    let world = app.world_mut();
    let frames = world.query::<&MascotFrames>().single(world).clone();
    assert_eq!(frames.clip, SpriteClip::Sleep);
    assert!(frames.visual.is_placeholder());
}
