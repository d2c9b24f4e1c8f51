//! Canvas 2D backend for [`Surface`]

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{Color, Font, Sprite, Surface, SurfaceError, TextAlign};
use crate::sim::Rect;

/// Image elements for every sprite
pub struct SpriteSheet {
    images: HashMap<Sprite, HtmlImageElement>,
}

impl SpriteSheet {
    /// Create an `<img>` per sprite and start fetching it
    pub fn request() -> Result<Self, JsValue> {
        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            let img = HtmlImageElement::new()?;
            img.set_src(sprite.path());
            images.insert(sprite, img);
        }
        Ok(Self { images })
    }

    /// Wait for every image to decode. Failures are logged, not fatal:
    /// the surface reports those sprites as unavailable.
    pub async fn decode_all(&self) {
        for (sprite, img) in &self.images {
            if let Err(e) = JsFuture::from(img.decode()).await {
                log::warn!("Failed to load {}: {:?}", sprite.path(), e);
            }
        }
    }

    fn ready(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images
            .get(&sprite)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

/// `Surface` backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, sprites: SpriteSheet, width: f64, height: f64) -> Self {
        Self {
            ctx,
            sprites,
            width,
            height,
        }
    }
}

fn backend(e: JsValue) -> SurfaceError {
    SurfaceError::Backend(format!("{:?}", e))
}

impl Surface for CanvasSurface {
    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        Ok(())
    }

    fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> Result<(), SurfaceError> {
        let img = self
            .sprites
            .ready(sprite)
            .ok_or(SurfaceError::SpriteUnavailable(sprite))?;
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.x as f64,
                rect.y as f64,
                rect.w as f64,
                rect.h as f64,
            )
            .map_err(backend)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: Font,
        color: Color,
        align: TextAlign,
    ) -> Result<(), SurfaceError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&font.to_css());
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.fill_text(text, x as f64, y as f64).map_err(backend)
    }
}
