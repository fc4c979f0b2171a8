//! Nearest diagnostic on the cursor line.
//!
//! Candidates on the cursor line are ordered by column, highest first (stable,
//! so equal columns keep list order). The first one whose column is at or
//! left of the cursor wins, with one column of slack because the cursor
//! column is 0-indexed and location columns are 1-indexed. When none is,
//! every candidate lies right of the cursor and the last one in that order
//! (smallest column) is taken.

use locpopup_types::{CursorPosition, LocationEntry};

/// Pick the entry to display for `cursor`, or `None` when its line is clean.
#[must_use]
pub fn select_nearest(entries: &[LocationEntry], cursor: CursorPosition) -> Option<&LocationEntry> {
    let mut on_line: Vec<&LocationEntry> = entries
        .iter()
        .filter(|entry| entry.line() == cursor.line)
        .collect();

    if on_line.len() > 1 {
        on_line.sort_by(|a, b| b.column().cmp(&a.column()));
    }

    let fallback = on_line.last().copied()?;
    Some(
        on_line
            .into_iter()
            .find(|entry| cursor.column >= entry.column().saturating_sub(1))
            .unwrap_or(fallback),
    )
}
