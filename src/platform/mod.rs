//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key to action mapping, press edges)
//! - UI panels and menu buttons (DOM on the web)

pub mod input;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Action, Input, InputState};
pub use ui::{HeadlessUi, Panel, UiButton, UiHost};

#[cfg(target_arch = "wasm32")]
pub use web::DomUi;
