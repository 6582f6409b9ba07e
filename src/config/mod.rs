//! Scene configuration: tuning constants and the accessory catalog.
//!
//! Loaded once in `OnEnter(AppState::Loading)` from RON. The embedded
//! `assets/config/scene.ron` is the default; setting `NUDGY_SCENE_CONFIG`
//! points the loader at a file on disk instead. A config that fails to read,
//! parse or validate is logged and replaced by `SceneConfig::default()`; the
//! scene never refuses to start over tuning data.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::shared::*;

pub const CONFIG_ENV_VAR: &str = "NUDGY_SCENE_CONFIG";

const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/scene.ron");

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid range for {field}: {min} > {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must lie in [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f32 },
    #[error("duplicate accessory id '{0}'")]
    DuplicateAccessory(String),
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIG TYPES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowConfig {
    pub base_count: usize,
    pub size_range: (f32, f32),
    /// Vertical speed, units per second.
    pub speed_range: (f32, f32),
    pub opacity_range: (f32, f32),
    pub wobble_amplitude_range: (f32, f32),
    /// Wobble angular speed, radians per second.
    pub wobble_speed_range: (f32, f32),
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            base_count: 25,
            size_range: (1.5, 4.5),
            speed_range: (12.0, 35.0),
            opacity_range: (0.2, 0.6),
            wobble_amplitude_range: (4.0, 14.0),
            wobble_speed_range: (0.5, 2.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub base_count: usize,
    pub speed_range: (f32, f32),
    pub length_range: (f32, f32),
    pub opacity_range: (f32, f32),
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            base_count: 14,
            speed_range: (220.0, 420.0),
            length_range: (30.0, 90.0),
            opacity_range: (0.15, 0.4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    pub base_interval: f32,
    /// Interval varies uniformly within ±jitter.
    pub jitter: f32,
    pub close: f32,
    pub hold: f32,
    pub open: f32,
    pub double_blink_chance: f32,
    pub double_blink_gap: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            base_interval: 3.5,
            jitter: 1.0,
            close: 0.07,
            hold: 0.04,
            open: 0.1,
            double_blink_chance: 0.15,
            double_blink_gap: 0.12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub chars_per_second: f32,
    /// Extra pause after `.`, `!`, `?` and `,`.
    pub punctuation_pause: f32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            chars_per_second: 40.0,
            punctuation_pause: 0.12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub default_auto_dismiss: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_auto_dismiss: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub confetti_count: usize,
    pub sparkle_count: usize,
    pub fish_count: usize,
    /// Latest per-particle start delay.
    pub max_stagger: f32,
    /// Seconds from a particle's start to fully faded.
    pub lifetime: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            confetti_count: 36,
            sparkle_count: 12,
            fish_count: 8,
            max_stagger: 0.25,
            lifetime: 1.2,
        }
    }
}

impl BurstConfig {
    pub fn count_for(&self, kind: BurstKind) -> usize {
        match kind {
            BurstKind::Confetti => self.confetti_count,
            BurstKind::Sparkle => self.sparkle_count,
            BurstKind::FishReward => self.fish_count,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed RNG seed for reproducible particle layouts.
    pub seed: Option<u64>,
    pub snow: SnowConfig,
    pub wind: WindConfig,
    pub blink: BlinkConfig,
    pub typewriter: TypewriterConfig,
    pub speech: SpeechConfig,
    pub bursts: BurstConfig,
    pub accessories: Vec<AccessoryItem>,
}

// ═══════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════

impl SceneConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// The config baked into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_ron_str(EMBEDDED_CONFIG)
    }

    /// Env-var path if set, else the embedded file, else defaults.
    pub fn load_or_default() -> Self {
        let loaded = match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                info!("[Config] Loading scene config from {}", path);
                Self::from_path(Path::new(&path))
            }
            Err(_) => Self::embedded(),
        };
        match loaded {
            Ok(config) => config,
            Err(err) => {
                warn!("[Config] {}; falling back to built-in defaults", err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges: [(&'static str, (f32, f32)); 8] = [
            ("snow.size_range", self.snow.size_range),
            ("snow.speed_range", self.snow.speed_range),
            ("snow.opacity_range", self.snow.opacity_range),
            ("snow.wobble_amplitude_range", self.snow.wobble_amplitude_range),
            ("snow.wobble_speed_range", self.snow.wobble_speed_range),
            ("wind.speed_range", self.wind.speed_range),
            ("wind.length_range", self.wind.length_range),
            ("wind.opacity_range", self.wind.opacity_range),
        ];
        for (field, (min, max)) in ranges {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(ConfigError::InvalidRange { field, min, max });
            }
        }

        let positives = [
            ("blink.base_interval", self.blink.base_interval),
            ("typewriter.chars_per_second", self.typewriter.chars_per_second),
            ("bursts.lifetime", self.bursts.lifetime),
        ];
        for (field, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negatives = [
            ("blink.close", self.blink.close),
            ("blink.hold", self.blink.hold),
            ("blink.open", self.blink.open),
            ("blink.double_blink_gap", self.blink.double_blink_gap),
            ("typewriter.punctuation_pause", self.typewriter.punctuation_pause),
        ];
        for (field, value) in non_negatives {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        let chance = self.blink.double_blink_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::NotAProbability {
                field: "blink.double_blink_chance",
                value: chance,
            });
        }
        if self.blink.jitter < 0.0 || self.blink.jitter >= self.blink.base_interval {
            return Err(ConfigError::InvalidRange {
                field: "blink.jitter",
                min: self.blink.jitter,
                max: self.blink.base_interval,
            });
        }

        let mut seen = HashSet::new();
        for item in &self.accessories {
            if !seen.insert(item.id.as_str()) {
                return Err(ConfigError::DuplicateAccessory(item.id.clone()));
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Loading), load_scene_config);
    }
}

/// Insert the config (unless the host already supplied one) and move on
/// to the intro.
fn load_scene_config(
    mut commands: Commands,
    existing: Option<Res<SceneConfig>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if existing.is_none() {
        let config = SceneConfig::load_or_default();
        info!(
            "[Config] Scene config ready: {} accessories, snow base {}",
            config.accessories.len(),
            config.snow.base_count
        );
        commands.insert_resource(config);
    }
    next_state.set(AppState::Intro);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses_and_validates() {
        let config = SceneConfig::embedded().expect("embedded config must parse");
        assert_eq!(config.snow.base_count, 25);
        assert_eq!(config.accessories.len(), 12);
        assert!(config
            .accessories
            .iter()
            .any(|a| a.slot == AccessorySlot::Furniture));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = SceneConfig::from_ron_str("(snow: (base_count: 40))").unwrap();
        assert_eq!(config.snow.base_count, 40);
        assert_eq!(config.snow.size_range, (1.5, 4.5));
        assert_eq!(config.blink, BlinkConfig::default());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = SceneConfig::from_ron_str("(snow: (speed_range: (40.0, 10.0)))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                field: "snow.speed_range",
                ..
            }
        ));
    }

    #[test]
    fn nan_range_is_rejected() {
        let mut config = SceneConfig::default();
        config.wind.speed_range = (f32::NAN, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                field: "wind.speed_range",
                ..
            })
        ));
    }

    #[test]
    fn negative_timings_are_rejected() {
        let err = SceneConfig::from_ron_str("(typewriter: (punctuation_pause: -0.1))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Negative {
                field: "typewriter.punctuation_pause",
                ..
            }
        ));
        let err = SceneConfig::from_ron_str("(blink: (double_blink_gap: -1.0))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Negative {
                field: "blink.double_blink_gap",
                ..
            }
        ));
    }

    #[test]
    fn double_blink_chance_must_be_a_probability() {
        for chance in [-0.1, 1.5, f32::NAN] {
            let mut config = SceneConfig::default();
            config.blink.double_blink_chance = chance;
            assert!(
                matches!(config.validate(), Err(ConfigError::NotAProbability { .. })),
                "{chance}"
            );
        }
        let mut config = SceneConfig::default();
        config.blink.double_blink_chance = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn duplicate_accessory_ids_are_rejected() {
        let src = r#"(accessories: [
            (id: "hat", asset: "a.png", slot: Head, offset: (0.0, 0.0), scale: 1.0),
            (id: "hat", asset: "b.png", slot: Face, offset: (0.0, 0.0), scale: 1.0),
        ])"#;
        assert!(matches!(
            SceneConfig::from_ron_str(src),
            Err(ConfigError::DuplicateAccessory(id)) if id == "hat"
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            SceneConfig::from_ron_str("not ron at all {"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SceneConfig::from_path(Path::new("/nonexistent/scene.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
