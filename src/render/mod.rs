//! Presentation adapter
//!
//! Stateless read-and-draw functions that turn a [`GameState`] into calls on
//! an abstract [`Surface`]. A failed draw call is counted and skipped; it
//! never reaches back into the simulation.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{GameState, Playfield, Rect};

/// Opaque image handles the surface knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Player,
    /// Tier-1 enemy
    Enemy,
    /// Tier-2 enemy
    HeavyEnemy,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [
        Sprite::Background,
        Sprite::Player,
        Sprite::Enemy,
        Sprite::HeavyEnemy,
    ];

    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Background => "images/background.jpg",
            Sprite::Player => "images/player.png",
            Sprite::Enemy => "images/enemy.png",
            Sprite::HeavyEnemy => "images/enemy1.png",
        }
    }
}

/// Straight RGBA color, alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string, e.g. `rgba(0, 0, 0, 0.7)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Font spec for text draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub px: u32,
    pub family: &'static str,
}

impl Font {
    pub const HUD: Font = Font::arial(20);
    pub const TITLE: Font = Font::arial(40);

    pub const fn arial(px: u32) -> Self {
        Self { px, family: "Arial" }
    }

    /// CSS font shorthand, e.g. `20px Arial`
    pub fn to_css(&self) -> String {
        format!("{}px {}", self.px, self.family)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing failures reported by a surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("sprite {0:?} is not loaded")]
    SpriteUnavailable(Sprite),
    #[error("drawing backend error: {0}")]
    Backend(String),
}

/// Drawing capability consumed by the presentation adapter
pub trait Surface {
    fn clear(&mut self) -> Result<(), SurfaceError>;
    fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> Result<(), SurfaceError>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError>;
    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: Font,
        color: Color,
        align: TextAlign,
    ) -> Result<(), SurfaceError>;
}

/// Surface that discards everything (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn draw_image(&mut self, _sprite: Sprite, _rect: Rect) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn fill_text(
        &mut self,
        _text: &str,
        _x: f32,
        _y: f32,
        _font: Font,
        _color: Color,
        _align: TextAlign,
    ) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Restart button size
const BUTTON_WIDTH: f32 = 150.0;
const BUTTON_HEIGHT: f32 = 50.0;

/// HUD text anchor: 100px in from the right edge
const HUD_RIGHT_INSET: f32 = 100.0;

/// Hit rectangle of the restart button on the game-over screen
pub fn restart_button(playfield: Playfield) -> Rect {
    Rect::new(
        playfield.width / 2.0 - BUTTON_WIDTH / 2.0,
        playfield.height / 2.0,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// Forwards to a surface, counting failed calls instead of bailing out
struct Painter<'a, S: Surface> {
    surface: &'a mut S,
    failed: usize,
}

impl<'a, S: Surface> Painter<'a, S> {
    fn new(surface: &'a mut S) -> Self {
        Self { surface, failed: 0 }
    }

    fn check(&mut self, result: Result<(), SurfaceError>) {
        if let Err(e) = result {
            log::trace!("draw failed: {}", e);
            self.failed += 1;
        }
    }

    fn clear(&mut self) {
        let r = self.surface.clear();
        self.check(r);
    }

    fn image(&mut self, sprite: Sprite, rect: Rect) {
        let r = self.surface.draw_image(sprite, rect);
        self.check(r);
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let r = self.surface.fill_rect(rect, color);
        self.check(r);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, align: TextAlign) {
        let r = self.surface.fill_text(text, x, y, font, Color::WHITE, align);
        self.check(r);
    }
}

/// Draw the in-play view. Returns the number of draw calls that failed.
pub fn draw_play<S: Surface>(
    surface: &mut S,
    state: &GameState,
    settings: &Settings,
    fps: Option<u32>,
) -> usize {
    let playfield = state.playfield();
    let mut p = Painter::new(surface);

    p.clear();
    p.image(Sprite::Background, playfield.rect());
    p.image(Sprite::Player, state.player().rect());

    for bullet in state.bullets() {
        p.fill(bullet.rect(), Color::RED);
    }
    for enemy in state.enemies() {
        p.image(Sprite::Enemy, enemy.rect());
    }
    for heavy in state.heavies() {
        p.image(Sprite::HeavyEnemy, heavy.rect());
    }

    if settings.show_hud {
        let x = playfield.width - HUD_RIGHT_INSET;
        p.text(&format!("Score: {}", state.score()), x, 30.0, Font::HUD, TextAlign::Left);
        p.text(&format!("Lives: {}", state.lives()), x, 60.0, Font::HUD, TextAlign::Left);
    }

    if let (true, Some(fps)) = (settings.show_fps, fps) {
        p.text(&format!("FPS: {}", fps), 10.0, 30.0, Font::HUD, TextAlign::Left);
    }

    p.failed
}

/// Draw the game-over overlay on top of the last frame.
/// Returns the number of draw calls that failed.
pub fn draw_game_over<S: Surface>(surface: &mut S, playfield: Playfield, settings: &Settings) -> usize {
    let mut p = Painter::new(surface);
    let cx = playfield.width / 2.0;
    let cy = playfield.height / 2.0;

    let overlay = Color::rgba(0, 0, 0, settings.overlay_opacity.clamp(0.0, 1.0));
    p.fill(playfield.rect(), overlay);
    p.text("Game Over", cx, cy - 50.0, Font::TITLE, TextAlign::Center);

    p.fill(restart_button(playfield), Color::RED);
    p.text("Restart", cx, cy + 30.0, Font::HUD, TextAlign::Center);

    p.failed
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One recorded surface call
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Clear,
        Image(Sprite, Rect),
        Fill(Rect, Color),
        Text(String, f32, f32, Font, TextAlign),
    }

    /// Records calls; optionally fails every one of them
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<DrawOp>,
        pub fail_all: bool,
    }

    impl RecordingSurface {
        pub fn failing() -> Self {
            Self {
                ops: Vec::new(),
                fail_all: true,
            }
        }

        fn record(&mut self, op: DrawOp) -> Result<(), SurfaceError> {
            self.ops.push(op);
            if self.fail_all {
                Err(SurfaceError::Backend("broken surface".into()))
            } else {
                Ok(())
            }
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text(s, ..) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) -> Result<(), SurfaceError> {
            self.record(DrawOp::Clear)
        }

        fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> Result<(), SurfaceError> {
            self.record(DrawOp::Image(sprite, rect))
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
            self.record(DrawOp::Fill(rect, color))
        }

        fn fill_text(
            &mut self,
            text: &str,
            x: f32,
            y: f32,
            font: Font,
            _color: Color,
            align: TextAlign,
        ) -> Result<(), SurfaceError> {
            self.record(DrawOp::Text(text.to_string(), x, y, font, align))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{DrawOp, RecordingSurface};
    use super::*;
    use crate::sim::{Playfield, tick};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Playfield::new(800.0, 600.0), Tuning::default(), 3)
    }

    #[test]
    fn test_restart_button_rect() {
        let button = restart_button(Playfield::new(800.0, 600.0));
        assert_eq!(button, Rect::new(325.0, 300.0, 150.0, 50.0));
    }

    #[test]
    fn test_play_view_draw_order() {
        let mut state = state();
        state.fire_volley();
        tick(&mut state); // spawns one enemy of each tier

        let mut surface = RecordingSurface::default();
        let failed = draw_play(&mut surface, &state, &Settings::default(), None);
        assert_eq!(failed, 0);

        let ops = &surface.ops;
        assert_eq!(ops[0], DrawOp::Clear);
        assert_eq!(
            ops[1],
            DrawOp::Image(Sprite::Background, Rect::new(0.0, 0.0, 800.0, 600.0))
        );
        assert!(matches!(ops[2], DrawOp::Image(Sprite::Player, _)));
        assert!(matches!(&ops[3], DrawOp::Fill(_, c) if *c == Color::RED));
        assert!(matches!(&ops[4], DrawOp::Fill(_, c) if *c == Color::RED));
        assert!(matches!(ops[5], DrawOp::Image(Sprite::Enemy, _)));
        assert!(matches!(ops[6], DrawOp::Image(Sprite::HeavyEnemy, _)));
        assert_eq!(
            ops[7],
            DrawOp::Text("Score: 0".into(), 700.0, 30.0, Font::HUD, TextAlign::Left)
        );
        assert_eq!(
            ops[8],
            DrawOp::Text("Lives: 3".into(), 700.0, 60.0, Font::HUD, TextAlign::Left)
        );
        assert_eq!(ops.len(), 9);
    }

    #[test]
    fn test_hud_and_fps_toggles() {
        let state = state();
        let settings = Settings {
            show_hud: false,
            show_fps: true,
            ..Settings::default()
        };
        let mut surface = RecordingSurface::default();
        draw_play(&mut surface, &state, &settings, Some(60));
        assert_eq!(surface.texts(), vec!["FPS: 60"]);

        // No measurement yet: nothing to show
        let mut surface = RecordingSurface::default();
        draw_play(&mut surface, &state, &settings, None);
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn test_game_over_overlay() {
        let mut surface = RecordingSurface::default();
        let failed = draw_game_over(&mut surface, Playfield::new(800.0, 600.0), &Settings::default());
        assert_eq!(failed, 0);

        assert_eq!(
            surface.ops[0],
            DrawOp::Fill(
                Rect::new(0.0, 0.0, 800.0, 600.0),
                Color::rgba(0, 0, 0, 0.7)
            )
        );
        assert_eq!(
            surface.ops[1],
            DrawOp::Text("Game Over".into(), 400.0, 250.0, Font::TITLE, TextAlign::Center)
        );
        assert_eq!(
            surface.ops[2],
            DrawOp::Fill(Rect::new(325.0, 300.0, 150.0, 50.0), Color::RED)
        );
        assert_eq!(
            surface.ops[3],
            DrawOp::Text("Restart".into(), 400.0, 330.0, Font::HUD, TextAlign::Center)
        );
    }

    #[test]
    fn test_failing_surface_keeps_drawing() {
        let mut state = state();
        state.fire_volley();
        let mut surface = RecordingSurface::failing();
        let failed = draw_play(&mut surface, &state, &Settings::default(), None);
        // clear + bg + player + 2 bullets + 2 HUD lines, all attempted
        assert_eq!(failed, 7);
        assert_eq!(surface.ops.len(), 7);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgba(0, 0, 0, 0.7).to_css(), "rgba(0, 0, 0, 0.7)");
        assert_eq!(Color::RED.to_css(), "rgba(255, 0, 0, 1)");
        assert_eq!(Font::HUD.to_css(), "20px Arial");
    }
}
