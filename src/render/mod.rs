//! Windowed presentation: camera, gizmo outlines for the layer stack, the
//! mascot and bursts, text for dialogue, and input mapping. Only the binary
//! installs this plugin; everything it draws is computed elsewhere.

use bevy::prelude::*;
use bevy::text::TextBounds;
use std::collections::HashMap;

use crate::choreography::IntroFlow;
use crate::environment::SceneLayers;
use crate::mascot::sprite::FRAME_SIZE;
use crate::mascot::{
    mascot_rect, rig, AccessoryVisual, Mascot, MascotAccessories, MascotFrames, PlacedAccessory,
    SpriteVisual,
};
use crate::particles::RewardBursts;
use crate::speech::{tail_outline, Speech};
use crate::shared::*;

pub mod draw;

const TEXT_COLOR: Color = Color::srgb(0.96, 0.97, 1.0);
const BUBBLE_COLOR: Color = Color::srgb(0.96, 0.97, 1.0);
const BUBBLE_HEIGHT: f32 = 70.0;
const BUBBLE_GAP: f32 = 18.0;

pub struct SceneRenderPlugin;

impl Plugin for SceneRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, spawn_text_nodes))
            .add_systems(
                Update,
                (
                    map_intro_input.run_if(in_state(AppState::Intro)),
                    map_habitat_input.run_if(in_state(AppState::Habitat)),
                    map_debug_keys,
                ),
            )
            .add_systems(
                Update,
                (
                    // Gizmos paint in system order.
                    (
                        draw_environment,
                        draw_accessories_behind,
                        draw_mascot,
                        draw_accessories_front,
                        draw_bursts,
                        draw_speech_bubble,
                    )
                        .chain(),
                    update_intro_text,
                    update_speech_text,
                    sync_accessory_sprites,
                    sync_mascot_sheet,
                )
                    .run_if(in_state(AppState::Intro).or(in_state(AppState::Habitat))),
            );
    }
}

// ─── Markers ────────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct DialogueText;

#[derive(Component)]
pub struct TitleText;

#[derive(Component)]
pub struct CtaText;

#[derive(Component)]
pub struct SpeechText;

#[derive(Component)]
pub struct AccessorySprite;

#[derive(Component)]
pub struct MascotSheetSprite;

// ─── Setup ──────────────────────────────────────────────────────────────────

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn text_node(size: f32, width: f32) -> impl Bundle {
    (
        Text2d::new(""),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(TEXT_COLOR),
        TextLayout::new_with_justify(JustifyText::Center),
        TextBounds::new_horizontal(width),
        Visibility::Hidden,
    )
}

fn spawn_text_nodes(mut commands: Commands, inputs: Res<SceneInputs>) {
    let scene = Vec2::new(inputs.width, inputs.height);
    let width = inputs.width * 0.85;
    let at = |x: f32, y: f32, z: f32| {
        Transform::from_translation(draw::to_world(Vec2::new(x, y), scene).extend(z))
    };
    commands.spawn((
        text_node(18.0, width),
        at(inputs.width * 0.5, inputs.height * 0.84, Z_SPEECH),
        DialogueText,
    ));
    commands.spawn((
        text_node(28.0, width),
        at(inputs.width * 0.5, inputs.height * 0.18, Z_TITLE_CARD),
        TitleText,
    ));
    commands.spawn((
        text_node(22.0, width),
        at(inputs.width * 0.5, inputs.height * 0.93, Z_TITLE_CARD),
        CtaText,
    ));
    commands.spawn((
        text_node(16.0, width * 0.8),
        Transform::default(),
        SpeechText,
    ));
}

// ─── Input ──────────────────────────────────────────────────────────────────

fn map_intro_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    flow: Option<Res<IntroFlow>>,
    mut taps: EventWriter<IntroTapEvent>,
    mut skips: EventWriter<IntroSkipEvent>,
    mut confirms: EventWriter<IntroConfirmEvent>,
) {
    let cta = flow.is_some_and(|f| f.cta_visible());
    let pressed = mouse.just_pressed(MouseButton::Left) || keys.just_pressed(KeyCode::Space);
    if keys.just_pressed(KeyCode::Enter) || (cta && pressed) {
        confirms.send(IntroConfirmEvent);
    } else if pressed {
        taps.send(IntroTapEvent);
    }
    if keys.just_pressed(KeyCode::Escape) || keys.just_pressed(KeyCode::KeyS) {
        skips.send(IntroSkipEvent);
    }
}

fn map_habitat_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut speech: EventWriter<SpeechEvent>,
) {
    if mouse.just_pressed(MouseButton::Left) || keys.just_pressed(KeyCode::Space) {
        speech.send(SpeechEvent::Dismiss);
    }
}

/// Number keys pick a mood, T cycles the time of day, +/- change level.
fn map_debug_keys(keys: Res<ButtonInput<KeyCode>>, mut inputs: ResMut<SceneInputs>) {
    let moods = [
        (KeyCode::Digit1, Mood::Cold),
        (KeyCode::Digit2, Mood::Warming),
        (KeyCode::Digit3, Mood::Productive),
        (KeyCode::Digit4, Mood::Golden),
        (KeyCode::Digit5, Mood::Stormy),
    ];
    for (key, mood) in moods {
        if keys.just_pressed(key) && inputs.mood != mood {
            info!("[Scene] Mood -> {:?}", mood);
            inputs.mood = mood;
        }
    }
    if keys.just_pressed(KeyCode::KeyT) {
        let next = match inputs.time_of_day() {
            TimeOfDay::Dawn => TimeOfDay::Day,
            TimeOfDay::Day => TimeOfDay::Dusk,
            TimeOfDay::Dusk => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Dawn,
        };
        info!("[Scene] Time of day -> {}", next.label());
        inputs.time_override = Some(next);
    }
    if keys.just_pressed(KeyCode::Equal) {
        inputs.level += 1;
        info!("[Scene] Level {} ({})", inputs.level, inputs.stage().display_name());
    }
    if keys.just_pressed(KeyCode::Minus) && inputs.level > 1 {
        inputs.level -= 1;
        info!("[Scene] Level {} ({})", inputs.level, inputs.stage().display_name());
    }
}

// ─── Drawing ────────────────────────────────────────────────────────────────

fn scene_size(inputs: &SceneInputs) -> Vec2 {
    Vec2::new(inputs.width, inputs.height)
}

fn draw_environment(mut gizmos: Gizmos, inputs: Res<SceneInputs>, layers: Res<SceneLayers>) {
    let scene = scene_size(&inputs);
    for layer in layers.0.layers() {
        draw::layer(&mut gizmos, layer, scene);
    }
}

fn draw_placeholders(gizmos: &mut Gizmos, group: &[PlacedAccessory], scene: Vec2) {
    for placed in group {
        if let AccessoryVisual::Placeholder(shape) = &placed.visual {
            draw::outline(gizmos, &shape.fit(placed.rect), TEXT_COLOR, scene);
        }
    }
}

fn draw_accessories_behind(
    mut gizmos: Gizmos,
    inputs: Res<SceneInputs>,
    mascots: Query<&MascotAccessories>,
) {
    for accessories in &mascots {
        draw_placeholders(&mut gizmos, &accessories.0.behind, scene_size(&inputs));
    }
}

fn draw_accessories_front(
    mut gizmos: Gizmos,
    inputs: Res<SceneInputs>,
    mascots: Query<&MascotAccessories>,
) {
    for accessories in &mascots {
        draw_placeholders(&mut gizmos, &accessories.0.front, scene_size(&inputs));
    }
}

/// Procedural rig, plus the clip glyph while its frames are missing. A
/// loaded frame sheet replaces both.
fn draw_mascot(
    mut gizmos: Gizmos,
    inputs: Res<SceneInputs>,
    mascots: Query<(&Mascot, &MascotFrames)>,
) {
    let scene = scene_size(&inputs);
    let rect = mascot_rect(inputs.width, inputs.height);
    for (mascot, frames) in &mascots {
        let glyph = match &frames.visual {
            SpriteVisual::Sheet(_) => continue,
            SpriteVisual::Placeholder(glyph) => glyph,
        };
        let pose = mascot.animator.pose();
        for part in rig(&pose, rect) {
            draw::outline(&mut gizmos, &part.outline, part.color, scene);
        }
        if pose.opacity <= 0.0 {
            continue;
        }
        let size = rect.width() * 0.28;
        let corner = Vec2::new(rect.max.x - size * 0.5, rect.min.y);
        let glyph_rect = Rect::from_corners(corner, corner + Vec2::splat(size));
        draw::outline(
            &mut gizmos,
            &glyph.fit(glyph_rect),
            TEXT_COLOR.with_alpha(0.6 * pose.opacity),
            scene,
        );
    }
}

fn draw_bursts(mut gizmos: Gizmos, inputs: Res<SceneInputs>, bursts: Res<RewardBursts>) {
    let scene = scene_size(&inputs);
    for particle in bursts.particles().iter().filter(|p| p.has_launched()) {
        draw::outline(&mut gizmos, &draw::burst_shape(particle), draw::burst_color(particle), scene);
    }
}

/// Bubble box above the mascot's head.
fn bubble_rect(inputs: &SceneInputs) -> Rect {
    let mascot = mascot_rect(inputs.width, inputs.height);
    let bottom = mascot.min.y - BUBBLE_GAP;
    let half_w = inputs.width * 0.36;
    Rect::new(
        inputs.width * 0.5 - half_w,
        bottom - BUBBLE_HEIGHT,
        inputs.width * 0.5 + half_w,
        bottom,
    )
}

fn draw_speech_bubble(mut gizmos: Gizmos, inputs: Res<SceneInputs>, speech: Res<Speech>) {
    let Some(message) = speech.current() else {
        return;
    };
    let scene = scene_size(&inputs);
    let bubble = bubble_rect(&inputs);
    draw::outline(
        &mut gizmos,
        &crate::shapes::rect(bubble.min, bubble.max),
        BUBBLE_COLOR,
        scene,
    );
    let base = Vec2::new(bubble.center().x - bubble.width() * 0.1, bubble.max.y);
    let tip = Vec2::new(bubble.center().x, bubble.max.y + BUBBLE_GAP * 0.9);
    draw::outline(&mut gizmos, &tail_outline(message.style, base, tip), BUBBLE_COLOR, scene);
}

// ─── Text ───────────────────────────────────────────────────────────────────

#[allow(clippy::type_complexity)]
fn update_intro_text(
    flow: Option<Res<IntroFlow>>,
    mut dialogue: Query<
        (&mut Text2d, &mut Visibility),
        (With<DialogueText>, Without<TitleText>, Without<CtaText>),
    >,
    mut title: Query<
        (&mut Text2d, &mut Visibility, &mut TextColor),
        (With<TitleText>, Without<DialogueText>, Without<CtaText>),
    >,
    mut cta: Query<
        (&mut Text2d, &mut Visibility),
        (With<CtaText>, Without<DialogueText>, Without<TitleText>),
    >,
) {
    let flow = flow.as_deref();
    if let Ok((mut text, mut vis)) = dialogue.get_single_mut() {
        match flow.filter(|f| f.is_ready()) {
            Some(f) => {
                text.0 = f.visible_text();
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }
    if let Ok((mut text, mut vis, mut color)) = title.get_single_mut() {
        match flow.and_then(|f| f.title_card()) {
            Some(card) => {
                text.0.clone_from(&card.text);
                color.0 = TEXT_COLOR.with_alpha(card.opacity());
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }
    if let Ok((mut text, mut vis)) = cta.get_single_mut() {
        match flow.filter(|f| f.cta_visible()) {
            Some(f) => {
                text.0 = format!("[ {} ]", f.cta_label());
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }
}

fn update_speech_text(
    inputs: Res<SceneInputs>,
    speech: Res<Speech>,
    mut nodes: Query<(&mut Text2d, &mut Visibility, &mut Transform, &mut TextColor), With<SpeechText>>,
) {
    if !speech.is_changed() && !inputs.is_changed() {
        return;
    }
    let Ok((mut text, mut vis, mut transform, mut color)) = nodes.get_single_mut() else {
        return;
    };
    let Some(message) = speech.current() else {
        *vis = Visibility::Hidden;
        return;
    };
    text.0.clone_from(&message.text);
    color.0 = match message.style {
        SpeechStyle::Whisper => TEXT_COLOR.with_alpha(0.7),
        SpeechStyle::Speech | SpeechStyle::Thought | SpeechStyle::Exclaim => TEXT_COLOR,
    };
    let center = bubble_rect(&inputs).center();
    transform.translation = draw::to_world(center, scene_size(&inputs)).extend(Z_SPEECH);
    *vis = Visibility::Visible;
}

/// Rebuild accessory image sprites when the resolved layout changes.
fn sync_accessory_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    inputs: Res<SceneInputs>,
    mascots: Query<&MascotAccessories, Changed<MascotAccessories>>,
    existing: Query<Entity, With<AccessorySprite>>,
) {
    let Some(accessories) = mascots.iter().next() else {
        return;
    };
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    let scene = scene_size(&inputs);
    let layers = [(&accessories.0.behind, Z_MASCOT - 1.0), (&accessories.0.front, Z_MASCOT + 1.0)];
    for (group, z) in layers {
        for (i, placed) in group.iter().enumerate() {
            let AccessoryVisual::Sprite(path) = &placed.visual else {
                continue;
            };
            let mut sprite = Sprite::from_image(asset_server.load(path.clone()));
            sprite.custom_size = Some(placed.rect.size());
            commands.spawn((
                sprite,
                Transform::from_translation(
                    draw::to_world(placed.rect.center(), scene).extend(z + i as f32 * 0.01),
                ),
                AccessorySprite,
            ));
        }
    }
}

/// Keep one atlas sprite in step with the mascot's clip while its sheet
/// exists.
#[allow(clippy::too_many_arguments)]
fn sync_mascot_sheet(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut by_frame_count: Local<HashMap<usize, Handle<TextureAtlasLayout>>>,
    inputs: Res<SceneInputs>,
    mascots: Query<(&Mascot, Ref<MascotFrames>)>,
    mut sheets: Query<(Entity, &mut Sprite), With<MascotSheetSprite>>,
) {
    let Some((mascot, frames)) = mascots.iter().next() else {
        return;
    };
    let animation = mascot.sprite.animation();
    let opacity = mascot.animator.pose().opacity;

    if frames.is_changed() || inputs.is_changed() {
        for (entity, _) in &sheets {
            commands.entity(entity).despawn();
        }
        let SpriteVisual::Sheet(path) = &frames.visual else {
            return;
        };
        let layout = by_frame_count
            .entry(animation.frame_count)
            .or_insert_with(|| {
                layouts.add(TextureAtlasLayout::from_grid(
                    FRAME_SIZE,
                    animation.frame_count as u32,
                    1,
                    None,
                    None,
                ))
            })
            .clone();
        let rect = mascot_rect(inputs.width, inputs.height);
        let mut sprite = Sprite::from_atlas_image(
            asset_server.load(*path),
            TextureAtlas {
                layout,
                index: mascot.sprite.frame(),
            },
        );
        sprite.custom_size = Some(rect.size());
        sprite.color = Color::WHITE.with_alpha(opacity);
        commands.spawn((
            sprite,
            Transform::from_translation(
                draw::to_world(rect.center(), scene_size(&inputs)).extend(Z_MASCOT),
            ),
            MascotSheetSprite,
        ));
        return;
    }

    for (_, mut sprite) in &mut sheets {
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = mascot.sprite.frame();
        }
        sprite.color = Color::WHITE.with_alpha(opacity);
    }
}
