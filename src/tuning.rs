//! Game balance values
//!
//! Every number that shapes play lives here so it can be overridden from
//! LocalStorage without a rebuild. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};

/// Inclusive integer range used for random platform placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: i32,
    pub max: i32,
}

impl SpawnRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Tunable gameplay constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Horizontal speed while a direction key is held
    pub move_speed: f32,
    /// Upward speed applied on every landing
    pub bounce_speed: f32,
    /// Upward speed at session start
    pub launch_speed: f32,

    // === Player ===
    /// Starting sprite position (center)
    pub player_start: (f32, f32),
    /// Collision body size
    pub player_body: (f32, f32),

    // === Platforms ===
    /// Platform collision body size
    pub platform_size: (f32, f32),
    /// Vertical gap between initial platforms
    pub platform_spacing: f32,
    /// Horizontal range for initial platforms
    pub spawn_x: SpawnRange,
    /// Horizontal range for recycled (and re-rolled) platforms
    pub recycle_x: SpawnRange,
    /// Platforms farther than this below the player are recycled
    pub recycle_distance: f32,
    /// Recycled platforms go this far above the topmost one
    pub recycle_gap: f32,

    // === Game over ===
    /// Allowed fall distance below the highest point reached
    pub game_over_margin: f32,

    // === Screen wrap ===
    /// Moving left past this x...
    pub wrap_left_edge: f32,
    /// ...reappears here
    pub wrap_left_to: f32,
    /// Moving right past this x...
    pub wrap_right_edge: f32,
    /// ...reappears here
    pub wrap_right_to: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 300.0,
            move_speed: 300.0,
            bounce_speed: 400.0,
            launch_speed: 400.0,

            player_start: (325.0, -100.0),
            player_body: (64.0, 90.0),

            platform_size: (64.0, 16.0),
            platform_spacing: 100.0,
            spawn_x: SpawnRange::new(50, 350),
            recycle_x: SpawnRange::new(0, 640),
            recycle_distance: 700.0,
            recycle_gap: 200.0,

            game_over_margin: 700.0,

            wrap_left_edge: 15.0,
            wrap_left_to: 615.0,
            wrap_right_edge: 615.0,
            wrap_right_to: 25.0,
        }
    }
}

impl Tuning {
    /// Storage key for overrides
    pub const STORAGE_KEY: &'static str = "sky_hopper_tuning";

    /// Parse overrides from JSON (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load overrides from storage, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring malformed tuning overrides: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read tuning overrides: {}", e),
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Persist overrides
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Tuning saved");
        Ok(())
    }

    /// Repair values that would break the simulation
    fn sanitized(mut self) -> Self {
        if self.spawn_x.min > self.spawn_x.max {
            std::mem::swap(&mut self.spawn_x.min, &mut self.spawn_x.max);
        }
        if self.recycle_x.min > self.recycle_x.max {
            std::mem::swap(&mut self.recycle_x.min, &mut self.recycle_x.max);
        }
        self
    }
}
