//! Game state and entity records
//!
//! Entities are plain data. All mutation happens in [`super::tick`] or
//! through the methods on [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::{Playfield, Rect, clamp_span};
use crate::tuning::Tuning;

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Not integrated: position is set absolutely from input
    pub speed: f32,
}

impl Player {
    /// Spawn at (W/2 - 50, H - 150), clamped into the playfield
    pub fn spawn(playfield: Playfield, tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            size: Vec2::splat(tuning.player_size),
            speed: tuning.player_speed,
        };
        player.set_position(
            playfield.width / 2.0 - crate::consts::PLAYER_START_OFFSET_X,
            playfield.height - crate::consts::PLAYER_START_OFFSET_Y,
            playfield,
        );
        player
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Set the top-left corner, keeping the whole ship inside the playfield
    pub fn set_position(&mut self, x: f32, y: f32, playfield: Playfield) {
        self.pos = Vec2::new(
            clamp_span(x, self.size.x, playfield.width),
            clamp_span(y, self.size.y, playfield.height),
        );
    }
}

/// A player projectile travelling straight up
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Tier-1 enemy: destroyed by a single hit
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Fixed at spawn time
    pub speed: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Tier-2 enemy: larger, slower scaling, takes several hits
#[derive(Debug, Clone, PartialEq)]
pub struct HeavyEnemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Fixed at spawn time
    pub speed: f32,
    pub health: i32,
}

impl HeavyEnemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Complete session state: entities, score, lives and the spawn clock
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) playfield: Playfield,
    pub(crate) tuning: Tuning,
    pub(crate) player: Player,
    /// Live bullets in firing order
    pub(crate) bullets: Vec<Bullet>,
    /// Tier-1 enemies in spawn order
    pub(crate) enemies: Vec<Enemy>,
    /// Tier-2 enemies in spawn order
    pub(crate) heavies: Vec<HeavyEnemy>,
    pub(crate) score: u32,
    /// Allowed to dip below zero within a frame before the terminal check
    pub(crate) lives: i32,
    pub(crate) game_over: bool,
    /// Frame counter gating enemy spawns
    pub(crate) spawn_timer: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh run; `seed` drives enemy spawn positions
    pub fn new(playfield: Playfield, tuning: Tuning, seed: u64) -> Self {
        Self {
            playfield,
            tuning,
            player: Player::spawn(playfield, &tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            heavies: Vec::new(),
            score: 0,
            lives: tuning.starting_lives,
            game_over: false,
            spawn_timer: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Return to the start-of-run state. The RNG stream continues so
    /// consecutive runs do not replay the same spawn pattern.
    pub fn reset(&mut self) {
        self.player = Player::spawn(self.playfield, &self.tuning);
        self.bullets.clear();
        self.enemies.clear();
        self.heavies.clear();
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.game_over = false;
        self.spawn_timer = 0;
    }

    /// Center the player on a pointer position, clamped to the playfield
    pub fn move_player_to(&mut self, x: f32, y: f32) {
        let half = self.player.size / 2.0;
        self.player.set_position(x - half.x, y - half.y, self.playfield);
    }

    /// Append a left/right bullet pair at the player's muzzles.
    ///
    /// No-op once the run is over.
    pub fn fire_volley(&mut self) {
        if self.game_over {
            return;
        }
        let t = &self.tuning;
        let size = Vec2::new(t.bullet_width, t.bullet_height);
        let player = &self.player;
        let left = Vec2::new(player.pos.x + t.bullet_left_offset, player.pos.y);
        let right = Vec2::new(
            player.pos.x + player.size.x - t.bullet_right_offset,
            player.pos.y,
        );
        for pos in [left, right] {
            self.bullets.push(Bullet {
                pos,
                size,
                speed: t.bullet_speed,
            });
        }
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn heavies(&self) -> &[HeavyEnemy] {
        &self.heavies
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn spawn_timer(&self) -> u64 {
        self.spawn_timer
    }
}
