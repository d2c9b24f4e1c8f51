//! Sky Blaster - a vertical auto-fire arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, collisions, spawning, lives)
//! - `render`: Presentation adapter over an abstract drawing surface
//! - `session`: Running/GameOver state machine driving the frame loop
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameOutcome, Phase, Session};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lives at the start of every run
    pub const STARTING_LIVES: i32 = 3;

    /// Player sprite size (square)
    pub const PLAYER_SIZE: f32 = 80.0;
    /// Nominal player speed. Position is set absolutely from input, so this
    /// is carried for completeness only.
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Spawn position relative to the playfield: (W/2 - 50, H - 150)
    pub const PLAYER_START_OFFSET_X: f32 = 50.0;
    pub const PLAYER_START_OFFSET_Y: f32 = 150.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 10.0;
    /// Left muzzle offset from the player's left edge
    pub const BULLET_LEFT_OFFSET: f32 = 10.0;
    /// Right muzzle offset from the player's right edge
    pub const BULLET_RIGHT_OFFSET: f32 = 15.0;
    /// Auto-fire cadence in milliseconds
    pub const FIRE_INTERVAL_MS: i32 = 300;

    /// Tier-1 enemies: one hit, spawn every 100 frames
    pub const TIER1_SIZE: f32 = 50.0;
    pub const TIER1_SPAWN_INTERVAL: u64 = 100;
    pub const TIER1_SPEED_DIVISOR: f32 = 20.0;

    /// Tier-2 enemies: two hits, spawn every 300 frames
    pub const TIER2_SIZE: f32 = 70.0;
    pub const TIER2_SPAWN_INTERVAL: u64 = 300;
    pub const TIER2_SPEED_DIVISOR: f32 = 25.0;
    pub const TIER2_HEALTH: i32 = 2;
}
