//! Location-list record decoding.
//!
//! The host returns each location as a loose key/value record
//! (`{"lnum": 3, "col": 4, "type": "E", "text": "...", "bufnr": 1, ...}`).
//! Records are decoded here, once, into typed [`LocationEntry`] values.
//! A record missing `lnum`, `col` or `type`, or carrying the wrong value type
//! for any of them, is dropped and counted rather than failing the whole list.

use serde::Deserialize;
use serde_json::Value;

use locpopup_types::{Category, LocationEntry};

#[derive(Debug, Deserialize)]
struct RawLocation {
    lnum: Option<i64>,
    col: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    text: Option<String>,
}

impl RawLocation {
    fn into_entry(self) -> Option<LocationEntry> {
        Some(LocationEntry::new(
            self.lnum?,
            self.col?,
            Category::from_code(&self.kind?),
            self.text.unwrap_or_default(),
        ))
    }
}

/// Decoded location list for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationList {
    entries: Vec<LocationEntry>,
    /// Records dropped because a required field was missing or mistyped.
    malformed: usize,
}

impl LocationList {
    #[must_use]
    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    #[must_use]
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Decode raw host records, skipping malformed ones.
#[must_use]
pub fn decode_location_list(records: Vec<Value>) -> LocationList {
    let mut entries = Vec::with_capacity(records.len());
    let mut malformed = 0;

    for (index, record) in records.into_iter().enumerate() {
        let decoded = serde_json::from_value::<RawLocation>(record)
            .ok()
            .and_then(RawLocation::into_entry);
        match decoded {
            Some(entry) => entries.push(entry),
            None => {
                tracing::trace!(index, "Skipping malformed location record");
                malformed += 1;
            }
        }
    }

    LocationList { entries, malformed }
}
