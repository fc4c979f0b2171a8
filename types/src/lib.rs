//! Core domain types for locpopup.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! The host adapter decodes into these types; the popup controller reduces them
//! into a single [`PopupState`] per pass.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Category
// ============================================================================

/// Diagnostic category as reported by the editor's location list `type` field.
///
/// The host uses single-letter codes (`"E"`, `"W"`, ...). Anything other than
/// error or warning is kept verbatim so change detection still compares the
/// raw code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Error,
    Warning,
    Other(String),
}

impl Default for Category {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Category {
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "E" => Self::Error,
            "W" => Self::Warning,
            other => Self::Other(other.to_string()),
        }
    }

    /// The host code this category was decoded from.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Error => "E",
            Self::Warning => "W",
            Self::Other(code) => code,
        }
    }

    /// Badge label shown by the rendering layer, if this category has one.
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Error => Some("Error"),
            Self::Warning => Some("Warning"),
            Self::Other(_) => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning)
    }
}

impl From<String> for Category {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.code().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Location entries and cursor
// ============================================================================

/// A single diagnostic record from the editor's location list.
///
/// Fields are private; entries are built once at the decode boundary and
/// read through accessors afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    /// 1-indexed line number.
    line: i64,
    /// 1-indexed column.
    column: i64,
    category: Category,
    text: String,
}

impl LocationEntry {
    #[must_use]
    pub fn new(line: i64, column: i64, category: Category, text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            category,
            text: text.into(),
        }
    }

    /// 1-indexed line number.
    #[must_use]
    pub fn line(&self) -> i64 {
        self.line
    }

    /// 1-indexed column.
    #[must_use]
    pub fn column(&self) -> i64 {
        self.column
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Cursor position of the current window.
///
/// `line` is 1-indexed, `column` 0-indexed, as the host reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: i64,
    pub column: i64,
}

impl CursorPosition {
    #[must_use]
    pub const fn new(line: i64, column: i64) -> Self {
        Self { line, column }
    }
}

// ============================================================================
// Derived per-pass values
// ============================================================================

/// Error/warning totals over a whole location list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateCounts {
    pub errors: usize,
    pub warnings: usize,
}

impl AggregateCounts {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors == 0 && self.warnings == 0
    }

    /// Compact status indicator like `"E:3 W:5"`.
    #[must_use]
    pub fn status_string(&self) -> String {
        format!("E:{} W:{}", self.errors, self.warnings)
    }
}

/// What the popup currently displays.
///
/// Created hidden. `category` and `text` only mean something while `visible`
/// is set; hiding leaves them in place, and two hidden states compare equal
/// whatever they last displayed.
#[derive(Debug, Clone, Default)]
pub struct PopupState {
    visible: bool,
    category: Category,
    text: String,
}

impl PartialEq for PopupState {
    fn eq(&self, other: &Self) -> bool {
        self.visible == other.visible
            && (!self.visible || (self.category == other.category && self.text == other.text))
    }
}

impl Eq for PopupState {}

impl PopupState {
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shown(category: Category, text: impl Into<String>) -> Self {
        Self {
            visible: true,
            category,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether showing `category`/`text` would differ from what is displayed.
    #[must_use]
    pub fn differs_from(&self, category: &Category, text: &str) -> bool {
        !self.visible || self.category != *category || self.text != text
    }

    /// Clear visibility, keeping the last content. Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

// ============================================================================
// Host events
// ============================================================================

/// Editor events that trigger a controller pass. Serialized by autocommand
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostEvent {
    CursorMoved,
    CursorHold,
    InsertEnter,
    InsertLeave,
}

impl HostEvent {
    /// Every event the controller must be subscribed to. Missing one leaves
    /// stale popups on screen.
    pub const ALL: [HostEvent; 4] = [
        HostEvent::CursorMoved,
        HostEvent::CursorHold,
        HostEvent::InsertEnter,
        HostEvent::InsertLeave,
    ];

    /// The editor's autocommand name for this event.
    #[must_use]
    pub const fn autocmd_name(self) -> &'static str {
        match self {
            Self::CursorMoved => "CursorMoved",
            Self::CursorHold => "CursorHold",
            Self::InsertEnter => "InsertEnter",
            Self::InsertLeave => "InsertLeave",
        }
    }

    #[must_use]
    pub fn from_autocmd_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.autocmd_name() == name)
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.autocmd_name())
    }
}
