//! Session controller
//!
//! Two-phase state machine (Running / GameOver) that owns the game state,
//! runs one simulation step per frame, picks the view to draw, and routes
//! restart clicks. Platform glue feeds it frames, timer ticks and input.

use crate::render::{Surface, draw_game_over, draw_play, restart_button};
use crate::settings::Settings;
use crate::sim::{GameState, Playfield, Rect, tick};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Whether the caller should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Halt,
}

pub struct Session {
    state: GameState,
    phase: Phase,
    /// Armed on entering GameOver, taken by the first click that lands on it
    restart_target: Option<Rect>,
    /// Completed runs, for logging
    runs: u32,
}

impl Session {
    pub fn new(playfield: Playfield, tuning: Tuning, seed: u64) -> Self {
        log::info!(
            "New session {}x{} (seed {})",
            playfield.width,
            playfield.height,
            seed
        );
        Self {
            state: GameState::new(playfield, tuning, seed),
            phase: Phase::Running,
            restart_target: None,
            runs: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn restart_target(&self) -> Option<Rect> {
        self.restart_target
    }

    /// Run one animation frame: step, then draw.
    pub fn frame<S: Surface>(
        &mut self,
        surface: &mut S,
        settings: &Settings,
        fps: Option<u32>,
    ) -> FrameOutcome {
        if self.phase == Phase::GameOver {
            self.draw_over(surface, settings);
            return FrameOutcome::Halt;
        }

        let outcome = tick(&mut self.state);
        if outcome.breaches > 0 {
            log::debug!(
                "{} breach(es), lives now {}",
                outcome.breaches,
                self.state.lives()
            );
        }

        let failed = draw_play(surface, &self.state, settings, fps);
        if failed > 0 {
            log::debug!("{} draw call(s) failed this frame", failed);
        }

        if self.state.is_over() {
            self.enter_game_over();
            self.draw_over(surface, settings);
            return FrameOutcome::Halt;
        }
        FrameOutcome::Continue
    }

    /// Auto-fire timer tick
    pub fn fire_tick(&mut self) {
        self.state.fire_volley();
    }

    /// Pointer or touch moved to `(x, y)` in playfield coordinates
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.state.move_player_to(x, y);
    }

    /// Route a click. Returns true if it restarted the game, in which case
    /// the caller must resume scheduling frames.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        match self.restart_target {
            Some(target) if target.contains_point(x, y) => {
                self.restart_target = None;
                self.restart();
                true
            }
            _ => false,
        }
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.runs += 1;
        self.restart_target = Some(restart_button(self.state.playfield()));
        log::info!(
            "Game over: run {} ended with score {}",
            self.runs,
            self.state.score()
        );
    }

    fn restart(&mut self) {
        self.state.reset();
        self.phase = Phase::Running;
        log::info!("Restarting (run {})", self.runs + 1);
    }

    fn draw_over<S: Surface>(&self, surface: &mut S, settings: &Settings) {
        let failed = draw_game_over(surface, self.state.playfield(), settings);
        if failed > 0 {
            log::debug!("{} draw call(s) failed on game-over screen", failed);
        }
    }
}
