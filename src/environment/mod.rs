//! Antarctic environment: palette-driven layer stack, weather pools,
//! lightning and the per-tier platform decorations.

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::particles::{snow_count, SnowField, WindField};
use crate::shared::*;

pub mod compositor;
pub mod decorations;
pub mod layers;
pub mod storm;

pub use compositor::{compose, FrameInputs};
pub use layers::{Layer, LayerKind, LayerStack, Primitive};
pub use storm::Lightning;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneClock>()
            .init_resource::<PreviousMood>()
            .init_resource::<StormLightning>()
            .init_resource::<SceneLayers>()
            .add_systems(OnEnter(AppState::Intro), seed_weather)
            .add_systems(OnEnter(AppState::Habitat), seed_weather)
            .add_systems(OnExit(AppState::Intro), stop_weather)
            .add_systems(OnExit(AppState::Habitat), stop_weather)
            .add_systems(
                Update,
                (
                    advance_scene_clock,
                    reseed_on_mood_change,
                    tick_lightning,
                    compose_scene_layers,
                )
                    .chain()
                    .run_if(in_state(AppState::Intro).or(in_state(AppState::Habitat))),
            );
    }
}

// ─── Resources ──────────────────────────────────────────────────────────────

/// Seconds of environment animation (aurora phase, flame flicker, drift).
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SceneClock {
    pub elapsed: f32,
}

/// Mood the weather pools were last seeded for.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PreviousMood {
    pub mood: Option<Mood>,
}

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct StormLightning(pub Lightning);

impl Default for StormLightning {
    fn default() -> Self {
        Self(Lightning::new(None))
    }
}

/// The most recently composed stack, read by the renderer.
#[derive(Resource, Debug, Default, Clone)]
pub struct SceneLayers(pub LayerStack);

// ─── Weather lifecycle ──────────────────────────────────────────────────────

/// Fill the snow pool for the current mood, and the wind pool when stormy.
/// Reduce motion leaves both pools empty.
pub fn seed_pools(
    inputs: &SceneInputs,
    config: &SceneConfig,
    snow: &mut SnowField,
    wind: &mut WindField,
) {
    if inputs.reduce_motion {
        snow.stop();
        wind.stop();
        return;
    }
    let count = snow_count(config.snow.base_count, inputs.mood);
    snow.seed(count, inputs.width, inputs.height);
    if inputs.mood == Mood::Stormy {
        wind.seed(config.wind.base_count, inputs.width, inputs.height);
    } else {
        wind.seed(0, inputs.width, inputs.height);
    }
}

pub fn seed_weather(
    inputs: Res<SceneInputs>,
    config: Option<Res<SceneConfig>>,
    mut snow: ResMut<SnowField>,
    mut wind: ResMut<WindField>,
    mut previous: ResMut<PreviousMood>,
    mut clock: ResMut<SceneClock>,
) {
    let fallback = SceneConfig::default();
    let config = config.as_deref().unwrap_or(&fallback);
    seed_pools(&inputs, config, &mut snow, &mut wind);
    previous.mood = Some(inputs.mood);
    clock.elapsed = 0.0;
    info!(
        "[Scene] Appeared: {:?} mood, {} snowflakes, {} stage",
        inputs.mood,
        snow.len(),
        inputs.stage().display_name()
    );
}

pub fn stop_weather(
    mut snow: ResMut<SnowField>,
    mut wind: ResMut<WindField>,
    mut lightning: ResMut<StormLightning>,
) {
    snow.stop();
    wind.stop();
    lightning.quiet();
    debug!("[Scene] Disappeared; weather stopped");
}

/// Mood changes restart the pools outright; counts never interpolate.
pub fn reseed_on_mood_change(
    inputs: Res<SceneInputs>,
    config: Option<Res<SceneConfig>>,
    mut snow: ResMut<SnowField>,
    mut wind: ResMut<WindField>,
    mut previous: ResMut<PreviousMood>,
) {
    if previous.mood == Some(inputs.mood) {
        return;
    }
    let fallback = SceneConfig::default();
    let config = config.as_deref().unwrap_or(&fallback);
    seed_pools(&inputs, config, &mut snow, &mut wind);
    info!(
        "[Scene] Mood {:?} -> {:?}; reseeded {} snowflakes",
        previous.mood,
        inputs.mood,
        snow.len()
    );
    previous.mood = Some(inputs.mood);
}

pub fn advance_scene_clock(time: Res<Time>, inputs: Res<SceneInputs>, mut clock: ResMut<SceneClock>) {
    if inputs.reduce_motion {
        return;
    }
    clock.elapsed += time.delta_secs();
}

pub fn tick_lightning(
    time: Res<Time>,
    inputs: Res<SceneInputs>,
    mut lightning: ResMut<StormLightning>,
) {
    if inputs.mood != Mood::Stormy || inputs.reduce_motion {
        lightning.quiet();
        return;
    }
    lightning.tick(time.delta_secs());
}

pub fn compose_scene_layers(
    inputs: Res<SceneInputs>,
    clock: Res<SceneClock>,
    lightning: Res<StormLightning>,
    snow: Res<SnowField>,
    wind: Res<WindField>,
    mut layers: ResMut<SceneLayers>,
) {
    let frame = FrameInputs {
        time: inputs.time_of_day(),
        mood: inputs.mood,
        stage: inputs.stage(),
        unlocked_props: &inputs.unlocked_props,
        size: Vec2::new(inputs.width, inputs.height),
        reduce_motion: inputs.reduce_motion,
        clock: clock.elapsed,
        lightning: lightning.flash(),
    };
    layers.0 = compose(&frame, &snow.0, &wind.0);
}
