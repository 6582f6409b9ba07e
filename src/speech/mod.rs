//! Contextual speech bubble over the mascot.

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::shared::*;

pub mod bubble;
pub mod style;

pub use bubble::{Message, SpeechBubble};
pub use style::{default_auto_dismiss, tail_outline};

pub struct SpeechPlugin;

impl Plugin for SpeechPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Speech>()
            .add_event::<SpeechEvent>()
            .add_systems(
                Update,
                (handle_speech_events, tick_speech)
                    .chain()
                    .run_if(in_state(AppState::Intro).or(in_state(AppState::Habitat))),
            )
            .add_systems(OnExit(AppState::Habitat), clear_speech);
    }
}

#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct Speech(pub SpeechBubble);

fn message(line: &SpeechLine, config: Option<&SceneConfig>) -> Message {
    let auto_dismiss = line.auto_dismiss_secs.or_else(|| {
        let fallback = crate::config::SpeechConfig::default();
        let speech = config.map(|c| &c.speech).unwrap_or(&fallback);
        default_auto_dismiss(line.style, speech)
    });
    Message {
        text: line.text.clone(),
        style: line.style,
        auto_dismiss,
    }
}

pub fn handle_speech_events(
    mut events: EventReader<SpeechEvent>,
    config: Option<Res<SceneConfig>>,
    mut speech: ResMut<Speech>,
) {
    let config = config.as_deref();
    for ev in events.read() {
        match ev {
            SpeechEvent::Say(line) => {
                debug!("[Speech] Say ({:?}): {}", line.style, line.text);
                speech.say(message(line, config));
            }
            SpeechEvent::Queue(line) => speech.queue_dialogue(message(line, config)),
            SpeechEvent::Dismiss => speech.dismiss(),
        }
    }
}

pub fn tick_speech(time: Res<Time>, mut speech: ResMut<Speech>) {
    if !speech.has_timer() {
        return;
    }
    if speech.tick(time.delta_secs()) {
        debug!("[Speech] Auto-dismissed; {} queued", speech.queued());
    }
}

pub fn clear_speech(mut speech: ResMut<Speech>) {
    speech.clear();
}
