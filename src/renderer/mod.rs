//! Rendering module
//!
//! The game draws flat rectangles, text and sprites onto a fixed 320x240
//! logical surface. The host scales it up with nearest-neighbour filtering.

pub mod colors;
pub mod recording;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use colors::Color;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{Align, Baseline, ImageKey, Surface, TextStyle};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
