//! Nudgy scene library crate: every domain plugin plus the pure cores they
//! wrap, exposed so `tests/` can drive them without a window or GPU.
//!
//! The binary (`main.rs`) adds the windowed [`render::SceneRenderPlugin`] on
//! top of [`ScenePlugins`].

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

pub mod anim;
pub mod choreography;
pub mod config;
pub mod environment;
pub mod mascot;
pub mod palette;
pub mod particles;
pub mod render;
pub mod shapes;
pub mod shared;
pub mod speech;

/// Every headless domain plugin, in dependency order.
pub struct ScenePlugins;

impl PluginGroup for ScenePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(ScenePlugin)
            .add(config::ConfigPlugin)
            .add(particles::ParticlePlugin)
            .add(environment::EnvironmentPlugin)
            .add(mascot::MascotPlugin)
            .add(choreography::IntroPlugin)
            .add(speech::SpeechPlugin)
    }
}

/// App state and the injected scene context.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<shared::AppState>()
            .init_resource::<shared::SceneInputs>();
    }
}
