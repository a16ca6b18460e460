//! Keyboard input mapped to game actions
//!
//! The host feeds raw key names in as events arrive; the game only sees
//! actions. Press edges live for exactly one frame.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// The fixed action set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
}

/// Read-only view of the current frame's input
pub trait Input {
    fn is_held(&self, action: Action) -> bool;

    /// True only on the frame the action went from released to held
    fn was_pressed(&self, action: Action) -> bool;
}

/// Held/pressed bookkeeping with a key map
#[derive(Debug, Clone)]
pub struct InputState {
    key_map: HashMap<String, Action>,
    held: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        let key_map = [
            ("w", Action::Up),
            ("a", Action::Left),
            ("s", Action::Down),
            ("d", Action::Right),
            ("ArrowUp", Action::Up),
            ("ArrowLeft", Action::Left),
            ("ArrowDown", Action::Down),
            ("ArrowRight", Action::Right),
            ("Enter", Action::Confirm),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_string(), action))
        .collect();

        Self {
            key_map,
            held: HashSet::new(),
            pressed: HashSet::new(),
        }
    }

    /// Bind an extra key (replaces any existing binding for it)
    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        self.key_map.insert(key.into(), action);
    }

    /// Action bound to a key, if any
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.key_map.get(key).copied()
    }

    /// Handle a key-down event. Returns the action if the key is bound so the
    /// host can suppress the browser default.
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        let action = self.action_for(key)?;
        self.press(action);
        Some(action)
    }

    /// Handle a key-up event
    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        let action = self.action_for(key)?;
        self.release(action);
        Some(action)
    }

    /// Hold an action; records a press edge only if it was not already held
    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Drop this frame's press edges (call once after each update)
    pub fn next_frame(&mut self) {
        self.pressed.clear();
    }

    /// Release everything (e.g. on window blur)
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

impl Input for InputState {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_lasts_one_frame() {
        let mut input = InputState::new();
        assert_eq!(input.key_down("Enter"), Some(Action::Confirm));
        assert!(input.was_pressed(Action::Confirm));
        assert!(input.is_held(Action::Confirm));

        input.next_frame();
        assert!(!input.was_pressed(Action::Confirm));
        assert!(input.is_held(Action::Confirm));
    }

    #[test]
    fn test_key_repeat_is_not_a_new_press() {
        let mut input = InputState::new();
        input.key_down("Enter");
        input.next_frame();
        // Auto-repeat keydown while held
        input.key_down("Enter");
        assert!(!input.was_pressed(Action::Confirm));

        input.key_up("Enter");
        input.key_down("Enter");
        assert!(input.was_pressed(Action::Confirm));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputState::new();
        assert_eq!(input.key_down("q"), None);
        input.bind("q", Action::Left);
        assert_eq!(input.key_down("q"), Some(Action::Left));
        assert!(input.is_held(Action::Left));
    }

    #[test]
    fn test_arrow_and_wasd_share_actions() {
        let mut input = InputState::new();
        input.key_down("ArrowUp");
        input.key_down("w");
        input.key_up("w");
        assert!(!input.is_held(Action::Up));
    }
}
