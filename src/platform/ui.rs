//! UI panels and menu buttons
//!
//! On the web these are DOM elements layered over the canvas; scenes only
//! toggle their visibility and read button clicks.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

/// Overlay panels a scene can show or hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// The container holding all menus
    Root,
    TitleMenu,
    SettingsMenu,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Root, Panel::TitleMenu, Panel::SettingsMenu];

    /// DOM element id
    pub fn element_id(&self) -> &'static str {
        match self {
            Panel::Root => "ui",
            Panel::TitleMenu => "titleMenu",
            Panel::SettingsMenu => "settingsMenu",
        }
    }
}

/// Menu buttons that produce click events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiButton {
    Play,
    Settings,
}

impl UiButton {
    pub const ALL: [UiButton; 2] = [UiButton::Play, UiButton::Settings];

    pub fn element_id(&self) -> &'static str {
        match self {
            UiButton::Play => "playBtn",
            UiButton::Settings => "settingsBtn",
        }
    }
}

pub trait UiHost {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);

    /// Button clicks since the last call
    fn take_clicks(&mut self) -> Vec<UiButton>;

    fn hide_all(&mut self) {
        for panel in Panel::ALL {
            self.set_panel_visible(panel, false);
        }
    }
}

#[derive(Debug, Default)]
struct HeadlessUiState {
    visible: HashSet<Panel>,
    clicks: VecDeque<UiButton>,
}

/// In-memory UI for native runs and tests.
///
/// Clones share state, so a test can keep a handle after boxing one into the game.
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    state: Rc<RefCell<HeadlessUiState>>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.state.borrow().visible.contains(&panel)
    }

    /// Queue a button click as if the user pressed it
    pub fn click(&self, button: UiButton) {
        self.state.borrow_mut().clicks.push_back(button);
    }
}

impl UiHost for HeadlessUi {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        let mut state = self.state.borrow_mut();
        if visible {
            state.visible.insert(panel);
        } else {
            state.visible.remove(&panel);
        }
    }

    fn take_clicks(&mut self) -> Vec<UiButton> {
        self.state.borrow_mut().clicks.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_handle_sees_changes() {
        let handle = HeadlessUi::new();
        let mut boxed: Box<dyn UiHost> = Box::new(handle.clone());
        boxed.set_panel_visible(Panel::TitleMenu, true);
        assert!(handle.is_visible(Panel::TitleMenu));

        boxed.hide_all();
        assert!(!handle.is_visible(Panel::TitleMenu));
    }

    #[test]
    fn test_clicks_drain() {
        let handle = HeadlessUi::new();
        let mut ui = handle.clone();
        handle.click(UiButton::Play);
        assert_eq!(ui.take_clicks(), vec![UiButton::Play]);
        assert!(ui.take_clicks().is_empty());
    }
}
