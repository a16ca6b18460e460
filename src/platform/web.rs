//! DOM-backed UI panels
//!
//! Panels are shown and hidden with the `hidden` CSS class. Button clicks are
//! queued by event listeners and drained by the active scene each frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, MouseEvent};

use super::ui::{Panel, UiButton, UiHost};

const HIDDEN_CLASS: &str = "hidden";

pub struct DomUi {
    document: Document,
    clicks: Rc<RefCell<VecDeque<UiButton>>>,
}

impl DomUi {
    /// Wire click listeners onto every menu button found in `document`
    pub fn new(document: &Document) -> Self {
        let clicks = Rc::new(RefCell::new(VecDeque::new()));

        for button in UiButton::ALL {
            let Some(el) = document.get_element_by_id(button.element_id()) else {
                log::warn!("Missing UI button #{}", button.element_id());
                continue;
            };
            let queue = clicks.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                queue.borrow_mut().push_back(button);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Self {
            document: document.clone(),
            clicks,
        }
    }
}

impl UiHost for DomUi {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        let Some(el) = self.document.get_element_by_id(panel.element_id()) else {
            return;
        };
        let classes = el.class_list();
        let _ = if visible {
            classes.remove_1(HIDDEN_CLASS)
        } else {
            classes.add_1(HIDDEN_CLASS)
        };
    }

    fn take_clicks(&mut self) -> Vec<UiButton> {
        self.clicks.borrow_mut().drain(..).collect()
    }
}
