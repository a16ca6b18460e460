//! Canvas2D surface
//!
//! Draws onto a 320x240 backing store. CSS scales the element up; image
//! smoothing is switched off every frame so sprites stay crisp.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::colors::to_css;
use super::{Color, ImageKey, Surface, TextStyle};
use crate::assets::{AssetCache, AssetError};
use crate::consts::{INTERNAL_HEIGHT, INTERNAL_WIDTH};
use crate::sim::Rect;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: AssetCache<ImageKey, HtmlImageElement>,
    /// Images the browser is still decoding
    loading: Vec<(ImageKey, HtmlImageElement)>,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(INTERNAL_WIDTH as u32);
        canvas.set_height(INTERNAL_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_image_smoothing_enabled(false);

        Ok(Self {
            ctx,
            images: AssetCache::new(),
            loading: Vec::new(),
        })
    }

    /// Start loading every sprite. Returns immediately.
    pub fn load_images(&mut self) {
        for key in ImageKey::ALL {
            if !self.images.request(key) {
                continue;
            }
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(key.path());
                    self.loading.push((key, img));
                }
                Err(_) => self.images.resolve(
                    key,
                    Err(AssetError::Unavailable {
                        path: key.path().to_string(),
                    }),
                ),
            }
        }
    }

    /// Call before rendering each frame
    pub fn begin_frame(&mut self) {
        self.ctx.set_image_smoothing_enabled(false);
        self.poll_images();
    }

    /// Move finished images into the cache
    fn poll_images(&mut self) {
        let images = &mut self.images;
        self.loading.retain(|(key, img)| {
            if !img.complete() {
                return true;
            }
            // A complete image with no size failed to load or decode
            let result = if img.natural_width() > 0 {
                Ok(img.clone())
            } else {
                Err(AssetError::Decode {
                    path: key.path().to_string(),
                    reason: "image did not decode".to_string(),
                })
            };
            images.resolve(*key, result);
            false
        });
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&to_css(color));
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_stroke_style_str(&to_css(color));
        self.ctx.set_line_width(1.0);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, color: Color) {
        self.ctx.set_fill_style_str(&to_css(color));
        self.ctx.set_font(&style.font());
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_text_baseline(style.baseline.as_str());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn measure_text(&self, text: &str, size_px: f32) -> f32 {
        self.ctx.set_font(&TextStyle::new(size_px).font());
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            // Monospace estimate
            Err(_) => text.chars().count() as f32 * size_px * 0.5,
        }
    }

    fn image_ready(&self, key: ImageKey) -> bool {
        self.images.is_ready(key)
    }

    fn draw_image(&mut self, key: ImageKey, rect: Rect) {
        if let Some(img) = self.images.get(key) {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.x as f64,
                rect.y as f64,
                rect.w as f64,
                rect.h as f64,
            );
        }
    }
}
