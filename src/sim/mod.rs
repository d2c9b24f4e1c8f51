//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One step per animation frame, speeds in pixels per frame
//! - Seeded RNG only (spawn positions)
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::{Playfield, Rect, clamp_span, overlaps};
pub use spawn::{maybe_spawn_tier1, maybe_spawn_tier2};
pub use state::{Bullet, Enemy, GameState, HeavyEnemy, Player};
pub use tick::{StepOutcome, tick};
