//! Game settings and tuning
//!
//! Native builds read a JSON file, wasm builds use LocalStorage. Missing
//! fields take their defaults, unreadable files fall back to defaults entirely.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Difficulty, SimParams};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    pub play_area_width: f32,
    pub play_area_height: f32,

    // === Marker ===
    /// Units per reference tick while a direction is held
    pub marker_max_speed: f32,
    /// Velocity multiplier per tick with no direction held
    pub marker_friction: f32,
    /// Fraction of the remaining distance the marker color moves per tick
    pub color_transition_speed: f32,

    // === Pickups ===
    pub slow_motion_ticks: u32,
    pub slow_motion_factor: f32,
    /// Ticks between powerups (`null` = never)
    pub powerup_period: Option<u32>,
    /// Ticks between debuffs (`null` = never)
    pub debuff_period: Option<u32>,

    // === Session ===
    /// Difficulty used by quick start
    pub default_difficulty: Difficulty,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_area_width: PLAY_AREA_WIDTH,
            play_area_height: PLAY_AREA_HEIGHT,

            marker_max_speed: MARKER_MAX_SPEED,
            marker_friction: MARKER_FRICTION,
            color_transition_speed: COLOR_TRANSITION_SPEED,

            slow_motion_ticks: SLOW_MOTION_DURATION_TICKS,
            slow_motion_factor: SLOW_MOTION_FACTOR,
            powerup_period: Some(POWERUP_SPAWN_PERIOD),
            debuff_period: Some(DEBUFF_SPAWN_PERIOD),

            default_difficulty: Difficulty::Easy,
            seed: None,
        }
    }
}

impl Settings {
    /// Targets only, no powerups or debuffs
    pub fn classic() -> Self {
        Self {
            powerup_period: None,
            debuff_period: None,
            ..Self::default()
        }
    }

    /// Simulation tuning derived from these settings
    ///
    /// Out-of-range values are pulled back into something playable.
    pub fn sim_params(&self) -> SimParams {
        let min_width = MARKER_RADIUS * 2.0 + PICKUP_SIZE;
        SimParams {
            half_width: self.play_area_width.max(min_width) / 2.0,
            half_height: self.play_area_height.max(MARKER_BOTTOM_OFFSET * 4.0) / 2.0,
            marker_max_speed: self.marker_max_speed.max(0.0),
            marker_friction: self.marker_friction.clamp(0.0, 1.0),
            contact_distance: COLLISION_DISTANCE,
            color_transition_speed: self.color_transition_speed.clamp(0.0, 1.0),
            slow_motion_ticks: self.slow_motion_ticks,
            slow_motion_factor: self.slow_motion_factor.clamp(0.0, 1.0),
            powerup_period: self.powerup_period.filter(|p| *p > 0),
            debuff_period: self.debuff_period.filter(|p| *p > 0),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, using defaults if it is missing or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) {
        match self.to_json() {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(err) => log::warn!("Failed to save settings: {}", err),
            },
            Err(err) => log::warn!("Failed to serialize settings: {}", err),
        }
    }

    /// Make `difficulty` the one used by quick start; true if it changed
    pub fn remember_difficulty(&mut self, difficulty: Difficulty) -> bool {
        let changed = self.default_difficulty != difficulty;
        self.default_difficulty = difficulty;
        changed
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "hue_drop_settings";

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Load settings from LocalStorage, using defaults if absent or invalid
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::local_storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|json| Self::from_json(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(err)) => {
                log::warn!("Invalid stored settings: {}; using defaults", err);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::local_storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match self.to_json() {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(_) => log::warn!("Failed to write settings to LocalStorage"),
            },
            Err(err) => log::warn!("Failed to serialize settings: {}", err),
        }
    }
}
