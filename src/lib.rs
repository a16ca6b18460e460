//! Soul Dodge - a tiny bullet-dodging battle encounter
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (dialogue, projectiles, combat, entities)
//! - `scene`: Scene state machine with cross-fade transitions
//! - `renderer`: Abstract 2D drawing surface (Canvas2D on the web)
//! - `platform`: Input and UI panel abstraction
//! - `audio`: Fire-and-forget audio sink with procedural fallbacks
//! - `tuning`: Data-driven battle balance

pub mod assets;
pub mod audio;
pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, Services};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed internal resolution (logical pixels)
    pub const INTERNAL_WIDTH: f32 = 320.0;
    pub const INTERNAL_HEIGHT: f32 = 240.0;

    /// Largest frame delta the driver will feed the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;

    /// Duration of each half of a cross-fade (seconds)
    pub const TRANSITION_DURATION: f32 = 0.25;

    /// Height of the HUD strip reserved at the bottom of the screen
    pub const UI_STRIP_HEIGHT: f32 = 56.0;
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics; if `min > max` the result is `max`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
