//! Headless surface that records draw calls
//!
//! Used by the native binary and by tests to inspect what a frame drew.

use std::collections::HashSet;

use super::{Color, ImageKey, Surface, TextStyle};
use crate::sim::Rect;

/// Width of one glyph relative to the font size (monospace approximation)
const GLYPH_ASPECT: f32 = 0.5;

/// A single recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color },
    Text { text: String, x: f32, y: f32, style: TextStyle, color: Color },
    Image { key: ImageKey, rect: Rect },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    ready: HashSet<ImageKey>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface where every sprite is already decoded
    pub fn with_all_images() -> Self {
        let mut surface = Self::new();
        for key in ImageKey::ALL {
            surface.mark_ready(key);
        }
        surface
    }

    pub fn mark_ready(&mut self, key: ImageKey) {
        self.ready.insert(key);
    }

    /// Drop recorded commands (call between frames)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn images(&self) -> Vec<ImageKey> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { key, .. } => Some(*key),
                _ => None,
            })
            .collect()
    }

    /// The most recent fill, if any (fade overlays are drawn last)
    pub fn last_fill(&self) -> Option<(Rect, Color)> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
            color,
        });
    }

    fn measure_text(&self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * size_px * GLYPH_ASPECT
    }

    fn image_ready(&self, key: ImageKey) -> bool {
        self.ready.contains(&key)
    }

    fn draw_image(&mut self, key: ImageKey, rect: Rect) {
        if self.image_ready(key) {
            self.commands.push(DrawCommand::Image { key, rect });
        }
    }
}
