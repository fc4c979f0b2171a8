//! Mapping displayed state to what a renderer draws.

use locpopup_types::{Category, PopupState};

use crate::config::{Palette, Rgba};

/// Colored category label drawn left of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub background: Rgba,
}

impl Badge {
    /// Badge for `category`, or `None` for categories other than error and
    /// warning.
    #[must_use]
    pub fn for_category(category: &Category, palette: &Palette) -> Option<Self> {
        let label = category.label()?;
        let background = if category.is_error() {
            palette.error
        } else {
            palette.warning
        };
        Some(Self { label, background })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub badge: Option<Badge>,
    pub text: String,
    pub foreground: Rgba,
    pub background: Rgba,
}

impl PopupView {
    /// What to draw for `state`; `None` while the popup is hidden.
    #[must_use]
    pub fn from_state(state: &PopupState, palette: &Palette) -> Option<Self> {
        if !state.is_visible() {
            return None;
        }
        Some(Self {
            badge: Badge::for_category(state.category(), palette),
            text: state.text().to_string(),
            foreground: palette.foreground,
            background: palette.background,
        })
    }

    /// Plain single-line rendering, e.g. `[Error] unused variable`.
    #[must_use]
    pub fn to_line(&self) -> String {
        match &self.badge {
            Some(badge) => format!("[{}] {}", badge.label, self.text),
            None => self.text.clone(),
        }
    }
}
