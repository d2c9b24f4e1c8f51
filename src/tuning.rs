//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A JSON override may supply any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced when loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning override is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be positive")]
    NonPositive { field: &'static str },
    #[error("tuning interval `{field}` must be non-zero")]
    ZeroInterval { field: &'static str },
}

/// Game balance knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub starting_lives: i32,

    pub player_size: f32,
    pub player_speed: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_left_offset: f32,
    pub bullet_right_offset: f32,
    /// Auto-fire cadence (ms); only read by the platform timer
    pub fire_interval_ms: i32,

    pub tier1_size: f32,
    pub tier1_spawn_interval: u64,
    pub tier1_speed_divisor: f32,

    pub tier2_size: f32,
    pub tier2_spawn_interval: u64,
    pub tier2_speed_divisor: f32,
    pub tier2_health: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            bullet_left_offset: BULLET_LEFT_OFFSET,
            bullet_right_offset: BULLET_RIGHT_OFFSET,
            fire_interval_ms: FIRE_INTERVAL_MS,

            tier1_size: TIER1_SIZE,
            tier1_spawn_interval: TIER1_SPAWN_INTERVAL,
            tier1_speed_divisor: TIER1_SPEED_DIVISOR,

            tier2_size: TIER2_SIZE,
            tier2_spawn_interval: TIER2_SPAWN_INTERVAL,
            tier2_speed_divisor: TIER2_SPEED_DIVISOR,
            tier2_health: TIER2_HEALTH,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("starting_lives", self.starting_lives as f32),
            ("player_size", self.player_size),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("fire_interval_ms", self.fire_interval_ms as f32),
            ("tier1_size", self.tier1_size),
            ("tier1_speed_divisor", self.tier1_speed_divisor),
            ("tier2_size", self.tier2_size),
            ("tier2_speed_divisor", self.tier2_speed_divisor),
            ("tier2_health", self.tier2_health as f32),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(TuningError::NonPositive { field: *field });
        }

        if self.tier1_spawn_interval == 0 {
            return Err(TuningError::ZeroInterval {
                field: "tier1_spawn_interval",
            });
        }
        if self.tier2_spawn_interval == 0 {
            return Err(TuningError::ZeroInterval {
                field: "tier2_spawn_interval",
            });
        }
        Ok(())
    }

    /// LocalStorage key for developer overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_blaster_tuning";

    /// Load an override from LocalStorage (WASM only), falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
