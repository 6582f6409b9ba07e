use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use nudgy_scene::render::SceneRenderPlugin;
use nudgy_scene::shared::*;
use nudgy_scene::ScenePlugins;

fn main() {
    let inputs = SceneInputs {
        // Demo signal: four tasks done today, none overdue.
        mood: Mood::from_progress(4, 0),
        level: 8,
        unlocked_props: ["fish_bucket", "summit_flag"].iter().map(|s| s.to_string()).collect(),
        equipped_accessories: ["red_scarf", "beanie", "ice_chair"].iter().map(|s| s.to_string()).collect(),
        ..default()
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Nudgy".into(),
                resolution: WindowResolution::new(inputs.width, inputs.height),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.04, 0.05, 0.10)))
        // Scene context; `init_resource` in ScenePlugin keeps this one.
        .insert_resource(inputs)
        .add_plugins(ScenePlugins)
        .add_plugins(SceneRenderPlugin)
        .run();
}
