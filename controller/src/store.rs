//! Displayed-state store with change detection.
//!
//! Each update reports whether the displayed state changed; the controller
//! signals a redraw only when it did.

use locpopup_types::{Category, PopupState};

#[derive(Debug, Default)]
pub struct PopupStore {
    state: PopupState,
}

impl PopupStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &PopupState {
        &self.state
    }

    /// Display `category`/`text`. Returns whether anything changed.
    pub fn show(&mut self, category: &Category, text: &str) -> bool {
        if !self.state.differs_from(category, text) {
            return false;
        }
        self.state = PopupState::shown(category.clone(), text);
        true
    }

    /// Hide the popup. Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        self.state.hide()
    }
}
