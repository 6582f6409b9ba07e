//! Intro flow: scripted scenes, typewriter dialogue, tap-to-advance, skip
//! and the closing call-to-action.
//!
//! The [`IntroSequencer`] does all the bookkeeping; this plugin owns it for
//! the lifetime of `AppState::Intro`, feeds it input events and turns its
//! cues into mascot, burst and typing events.

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::shared::*;

pub mod script;
pub mod sequencer;
pub mod typewriter;

pub use script::{IntroLine, IntroScene, IntroScript, SceneEffect};
pub use sequencer::{IntroCue, IntroSequencer, TapOutcome, TitleCard};
pub use typewriter::Typewriter;

/// Where reward bursts open, as a fraction of the scene size (y down).
const BURST_ORIGIN: (f32, f32) = (0.5, 0.5);

const WELCOME_LINE: &str = "Welcome home! Let's see what today brings.";

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<IntroTapEvent>()
            .add_event::<IntroSkipEvent>()
            .add_event::<IntroConfirmEvent>()
            .add_event::<IntroFinishedEvent>()
            .add_event::<TypingCompleteEvent>()
            .add_event::<MascotCueEvent>()
            .add_event::<BurstRequestEvent>()
            .add_event::<SpeechEvent>()
            .add_systems(OnEnter(AppState::Intro), begin_intro)
            .add_systems(
                Update,
                (handle_intro_input, advance_intro)
                    .chain()
                    .run_if(in_state(AppState::Intro)),
            )
            .add_systems(OnExit(AppState::Intro), end_intro);
    }
}

/// The running intro. Only present while in `AppState::Intro`.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct IntroFlow(pub IntroSequencer);

/// Host-supplied script. Falls back to the built-in script when absent.
#[derive(Resource, Debug, Clone, Default, Deref)]
pub struct IntroScriptResource(pub IntroScript);

pub fn begin_intro(
    mut commands: Commands,
    config: Option<Res<SceneConfig>>,
    inputs: Res<SceneInputs>,
    script: Option<Res<IntroScriptResource>>,
) {
    let typewriter = config
        .as_ref()
        .map(|c| c.typewriter.clone())
        .unwrap_or_default();
    let script = script.map(|s| s.0.clone()).unwrap_or_default();
    info!(
        "[Intro] Starting intro: {} scenes (reduce motion: {})",
        script.len(),
        inputs.reduce_motion
    );
    let mut sequencer = IntroSequencer::new(script, typewriter, inputs.reduce_motion);
    sequencer.start();
    commands.insert_resource(IntroFlow(sequencer));
}

pub fn handle_intro_input(
    mut taps: EventReader<IntroTapEvent>,
    mut skips: EventReader<IntroSkipEvent>,
    mut confirms: EventReader<IntroConfirmEvent>,
    mut flow: ResMut<IntroFlow>,
    mut finished: EventWriter<IntroFinishedEvent>,
    mut say: EventWriter<SpeechEvent>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for _ in skips.read() {
        if flow.skip() {
            info!("[Intro] Skipped to scene {}", flow.scene_index());
        }
    }
    for _ in taps.read() {
        match flow.tap() {
            TapOutcome::AdvancedScene => {
                info!("[Intro] Scene {} of {}", flow.scene_index() + 1, flow.scene_count());
            }
            TapOutcome::Ignored => {}
            outcome => debug!("[Intro] Tap: {:?}", outcome),
        }
    }
    for _ in confirms.read() {
        if flow.confirm() {
            info!("[Intro] Finished; entering habitat");
            finished.send(IntroFinishedEvent);
            say.send(SpeechEvent::Say(SpeechLine::new(WELCOME_LINE, SpeechStyle::Speech)));
            next_state.set(AppState::Habitat);
        }
    }
}

pub fn advance_intro(
    time: Res<Time>,
    inputs: Res<SceneInputs>,
    mut flow: ResMut<IntroFlow>,
    mut mascot_cues: EventWriter<MascotCueEvent>,
    mut bursts: EventWriter<BurstRequestEvent>,
    mut typing: EventWriter<TypingCompleteEvent>,
) {
    for cue in flow.tick(time.delta_secs()) {
        match cue {
            IntroCue::Mascot(cue) => {
                mascot_cues.send(MascotCueEvent { cue });
            }
            IntroCue::Burst(kind) => {
                bursts.send(BurstRequestEvent {
                    kind,
                    origin: Vec2::new(inputs.width * BURST_ORIGIN.0, inputs.height * BURST_ORIGIN.1),
                    count: None,
                });
            }
            IntroCue::TypingComplete {
                scene_index,
                line_index,
            } => {
                typing.send(TypingCompleteEvent {
                    scene_index,
                    line_index,
                });
            }
            IntroCue::ShowTitle(title) => debug!("[Intro] Title card: {}", title),
            IntroCue::Ready => debug!("[Intro] Scene {} ready", flow.scene_index()),
            IntroCue::RevealCta => info!("[Intro] Call to action: {}", flow.cta_label()),
        }
    }
}

pub fn end_intro(mut commands: Commands) {
    commands.remove_resource::<IntroFlow>();
    debug!("[Intro] Sequencer dropped");
}
