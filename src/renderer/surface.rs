//! Abstract drawing surface
//!
//! Scenes only ever talk to this trait. Sprites are referenced by key and may
//! not be decoded yet; callers check `image_ready` and draw a procedural
//! fallback instead of waiting.

use serde::{Deserialize, Serialize};

use super::Color;
use crate::sim::Rect;

/// Sprite assets known to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKey {
    /// The player's heart
    Soul,
    /// Projectile variant A
    Enemy6,
    /// Projectile variant B
    Enemy7,
}

impl ImageKey {
    pub const ALL: [ImageKey; 3] = [ImageKey::Soul, ImageKey::Enemy6, ImageKey::Enemy7];

    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            ImageKey::Soul => "assets/images/soul.png",
            ImageKey::Enemy6 => "assets/images/enemy_6.png",
            ImageKey::Enemy7 => "assets/images/enemy_7.png",
        }
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    #[default]
    Top,
    Middle,
    Alphabetic,
}

impl Baseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Baseline::Top => "top",
            Baseline::Middle => "middle",
            Baseline::Alphabetic => "alphabetic",
        }
    }
}

/// Font size and anchoring for a `fill_text` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub align: Align,
    pub baseline: Baseline,
}

impl TextStyle {
    pub fn new(size_px: f32) -> Self {
        Self {
            size_px,
            align: Align::Left,
            baseline: Baseline::Top,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// CSS font shorthand
    pub fn font(&self) -> String {
        format!("{}px Pixel, monospace", self.size_px)
    }
}

/// A 2D drawing target sized to the internal resolution
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, color: Color);

    /// Width of `text` in logical pixels at the given font size
    fn measure_text(&self, text: &str, size_px: f32) -> f32;

    /// Whether the sprite is decoded and can be blitted
    fn image_ready(&self, key: ImageKey) -> bool;

    /// Blit a sprite scaled into `rect`. Does nothing if the image is not ready.
    fn draw_image(&mut self, key: ImageKey, rect: Rect);
}
