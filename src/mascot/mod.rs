//! The penguin mascot: expression state machine, motion loops, sprite
//! clips and the accessory overlay.

use bevy::prelude::*;
use std::path::Path;

use crate::config::SceneConfig;
use crate::shapes::mascot::{art, ASPECT};
use crate::shared::*;

pub mod accessories;
pub mod animator;
pub mod expression;
pub mod motion;
pub mod rig;
pub mod sprite;

pub use accessories::{AccessoryCatalog, AccessoryLayout, AccessoryVisual, PlacedAccessory};
pub use animator::MascotAnimator;
pub use expression::{expression_params, ExpressionParams, Overlay, Pose};
pub use rig::{rig, Part, RigPart};
pub use sprite::{SpriteAnimation, SpriteClip, SpritePlayer, SpriteVisual};

/// Root directory accessory images and frame sheets are looked up in.
const ASSET_ROOT: &str = "assets";

fn asset_exists(path: &str) -> bool {
    Path::new(ASSET_ROOT).join(path).exists()
}

pub struct MascotPlugin;

impl Plugin for MascotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AccessoryCatalog>()
            .add_event::<SetExpressionEvent>()
            .add_event::<MascotCueEvent>()
            .add_event::<SpriteAnimationCompleteEvent>()
            .add_systems(OnExit(AppState::Loading), spawn_mascot)
            .add_systems(
                Update,
                (
                    apply_expression_events,
                    apply_mascot_cues,
                    tick_mascot,
                    resolve_sprite_frames,
                    refresh_accessories,
                )
                    .chain()
                    .run_if(in_state(AppState::Intro).or(in_state(AppState::Habitat))),
            )
            .add_systems(OnExit(AppState::Habitat), stop_mascot);
    }
}

// ─── Components ─────────────────────────────────────────────────────────────

#[derive(Component, Debug, Clone)]
pub struct Mascot {
    pub animator: MascotAnimator,
    pub sprite: SpritePlayer,
}

/// What the current sprite clip draws with; re-resolved when the clip changes.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MascotFrames {
    pub clip: SpriteClip,
    pub visual: SpriteVisual,
}

impl MascotFrames {
    fn resolve(animation: &SpriteAnimation) -> Self {
        let visual = SpriteVisual::resolve(animation, asset_exists);
        if visual.is_placeholder() {
            debug!("[Mascot] No frames for {:?}; drawing its glyph", animation.clip);
        }
        Self {
            clip: animation.clip,
            visual,
        }
    }
}

/// Resolved accessory placement for the mascot entity.
#[derive(Component, Debug, Clone, Default)]
pub struct MascotAccessories(pub AccessoryLayout);

/// Scene-space box the mascot artboard is fitted into: centred horizontally,
/// feet on the platform surface.
pub fn mascot_rect(width: f32, height: f32) -> Rect {
    let w = width * MASCOT_SIZE_FRACTION;
    let h = w / ASPECT;
    let feet = art(0.0, 0.525).y;
    let top = height * MASCOT_BASELINE_FRACTION - feet * h;
    Rect::new((width - w) * 0.5, top, (width + w) * 0.5, top + h)
}

// ─── Systems ────────────────────────────────────────────────────────────────

pub fn spawn_mascot(
    mut commands: Commands,
    config: Option<Res<SceneConfig>>,
    inputs: Res<SceneInputs>,
    existing: Query<(), With<Mascot>>,
) {
    if !existing.is_empty() {
        return;
    }
    let fallback = SceneConfig::default();
    let config = config.as_deref().unwrap_or(&fallback);

    let mut animator = MascotAnimator::new(
        config.blink.clone(),
        inputs.reduce_motion,
        config.seed.map(|s| s.wrapping_add(3)),
    );
    animator.start(PenguinExpression::Idle);
    let catalog = AccessoryCatalog::new(config.accessories.iter().cloned());
    info!(
        "[Mascot] Spawned (reduce motion: {}, {} accessories in catalog)",
        inputs.reduce_motion,
        catalog.len()
    );
    commands.insert_resource(catalog);
    let idle = SpriteAnimation::from_expression(PenguinExpression::Idle);
    commands.spawn((
        Mascot {
            animator,
            sprite: SpritePlayer::new(idle),
        },
        MascotFrames::resolve(&idle),
        MascotAccessories::default(),
    ));
}

pub fn apply_expression_events(
    mut events: EventReader<SetExpressionEvent>,
    mut mascots: Query<&mut Mascot>,
) {
    for ev in events.read() {
        for mut mascot in &mut mascots {
            set_expression(&mut mascot, ev.expression);
        }
    }
}

fn set_expression(mascot: &mut Mascot, expression: PenguinExpression) {
    if mascot.animator.expression() == expression {
        return;
    }
    debug!("[Mascot] {:?} -> {:?}", mascot.animator.expression(), expression);
    mascot.animator.set_expression(expression);
    mascot.sprite.play(SpriteAnimation::from_expression(expression));
}

pub fn apply_mascot_cues(mut events: EventReader<MascotCueEvent>, mut mascots: Query<&mut Mascot>) {
    for ev in events.read() {
        for mut mascot in &mut mascots {
            match ev.cue {
                MascotCue::SetExpression(expression) => set_expression(&mut mascot, expression),
                MascotCue::PlayOneShot(kind) => mascot.animator.play_one_shot(kind),
                MascotCue::SetVisible(visible) => mascot.animator.set_visible(visible),
            }
        }
    }
}

pub fn tick_mascot(
    time: Res<Time>,
    mut mascots: Query<(Entity, &mut Mascot)>,
    mut completed: EventWriter<SpriteAnimationCompleteEvent>,
) {
    let dt = time.delta_secs();
    for (entity, mut mascot) in &mut mascots {
        mascot.animator.tick(dt);
        if mascot.sprite.tick(dt) {
            completed.send(SpriteAnimationCompleteEvent { entity });
        }
    }
}

pub fn resolve_sprite_frames(mut mascots: Query<(&Mascot, &mut MascotFrames)>) {
    for (mascot, mut frames) in &mut mascots {
        let animation = mascot.sprite.animation();
        if frames.clip != animation.clip {
            *frames = MascotFrames::resolve(animation);
        }
    }
}

pub fn refresh_accessories(
    inputs: Res<SceneInputs>,
    catalog: Res<AccessoryCatalog>,
    mut mascots: Query<&mut MascotAccessories, With<Mascot>>,
) {
    if !inputs.is_changed() && !catalog.is_changed() {
        return;
    }
    let rect = mascot_rect(inputs.width, inputs.height);
    let layout = catalog.layout(&inputs.equipped_accessories, rect, asset_exists);
    for mut accessories in &mut mascots {
        accessories.0 = layout.clone();
    }
}

pub fn stop_mascot(mut mascots: Query<&mut Mascot>) {
    for mut mascot in &mut mascots {
        mascot.animator.stop();
    }
    debug!("[Mascot] Stopped all loops");
}
