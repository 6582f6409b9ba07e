//! Particle systems: recycling snow and wind pools plus one-shot reward bursts.
//!
//! The pools themselves are plain structs; this plugin only owns them as
//! resources, ticks them once per frame and turns burst requests into
//! particles. Seeding and stopping the weather pools is the environment's
//! job, since that is where mood changes and scene lifecycle are observed.

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::shared::*;

pub mod burst;
pub mod pool;
pub mod snow;
pub mod wind;

pub use burst::{BurstParticle, BurstSystem};
pub use pool::{PoolState, Recycled, RecyclingPool};
pub use snow::{snow_count, SnowPool, Snowflake};
pub use wind::{WindPool, WindStreak};

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct ParticlePlugin;

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SnowField>()
            .init_resource::<WindField>()
            .init_resource::<RewardBursts>()
            .add_event::<BurstRequestEvent>()
            .add_systems(OnExit(AppState::Loading), configure_particle_fields)
            .add_systems(
                Update,
                (spawn_requested_bursts, tick_particle_fields).chain(),
            );
    }
}

// ─── Resources ──────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct SnowField(pub SnowPool);

impl Default for SnowField {
    fn default() -> Self {
        Self(SnowPool::new(Default::default(), None))
    }
}

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct WindField(pub WindPool);

impl Default for WindField {
    fn default() -> Self {
        Self(WindPool::new(Default::default(), None))
    }
}

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct RewardBursts(pub BurstSystem);

impl Default for RewardBursts {
    fn default() -> Self {
        Self(BurstSystem::new(None))
    }
}

// ─── Systems ────────────────────────────────────────────────────────────────

/// Rebuild the pools from the loaded config. Each pool gets its own stream
/// derived from the configured seed so a fixed seed reproduces every layout.
pub fn configure_particle_fields(
    config: Option<Res<SceneConfig>>,
    mut snow: ResMut<SnowField>,
    mut wind: ResMut<WindField>,
    mut bursts: ResMut<RewardBursts>,
) {
    let Some(config) = config else {
        warn!("[Particles] No scene config loaded; keeping default spawn ranges");
        return;
    };
    let seed = config.seed;
    snow.0 = SnowPool::new(config.snow.clone(), seed);
    wind.0 = WindPool::new(config.wind.clone(), seed.map(|s| s.wrapping_add(1)));
    bursts.0 = BurstSystem::new(seed.map(|s| s.wrapping_add(2)));
    debug!(
        "[Particles] Configured pools (snow base {}, wind base {}, seed {:?})",
        config.snow.base_count, config.wind.base_count, seed
    );
}

pub fn spawn_requested_bursts(
    mut events: EventReader<BurstRequestEvent>,
    config: Option<Res<SceneConfig>>,
    inputs: Option<Res<SceneInputs>>,
    mut bursts: ResMut<RewardBursts>,
) {
    let defaults = crate::config::BurstConfig::default();
    let burst_config = config.as_ref().map(|c| &c.bursts).unwrap_or(&defaults);
    let reduce_motion = inputs.as_ref().is_some_and(|i| i.reduce_motion);

    for ev in events.read() {
        if reduce_motion {
            debug!("[Particles] Ignoring {:?} burst under reduce motion", ev.kind);
            continue;
        }
        let count = ev.count.unwrap_or_else(|| burst_config.count_for(ev.kind));
        bursts.fire(ev.kind, ev.origin, count, burst_config);
        debug!("[Particles] {:?} burst of {} at {:?}", ev.kind, count, ev.origin);
    }
}

pub fn tick_particle_fields(
    time: Res<Time>,
    mut snow: ResMut<SnowField>,
    mut wind: ResMut<WindField>,
    mut bursts: ResMut<RewardBursts>,
) {
    let dt = time.delta_secs();
    snow.tick(dt);
    wind.tick(dt);
    bursts.tick(dt);
}
