//! The read-only host queries behind one controller pass.
//!
//! [`QueryClient::query`] performs the reads in a fixed order (buffer kind,
//! mode, cursor, location list) and stops at the first failure or guard.
//! Nothing here writes to the host.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use locpopup_types::CursorPosition;

use crate::error::HostError;
use crate::records::{LocationList, decode_location_list};

/// Buffer kind of terminal buffers. Diagnostics are never shown there.
pub const TERMINAL_BUFFER_KIND: &str = "terminal";

/// Mode string of normal mode. Every other mode suppresses the popup.
pub const NORMAL_MODE: &str = "n";

/// Read access to the editor host.
///
/// Implementations block until the host answers. There is no timeout; a slow
/// host stalls the pass that is waiting on it.
pub trait EditorHost: Send + Sync {
    /// Kind label of the current buffer (`buftype`), e.g. `""` or `"terminal"`.
    fn buffer_kind(&self) -> Result<String, HostError>;

    /// Current mode string, e.g. `"n"` or `"i"`.
    fn mode(&self) -> Result<String, HostError>;

    /// Cursor of the current window.
    fn cursor_position(&self) -> Result<CursorPosition, HostError>;

    /// Raw location-list records of the current window.
    fn location_list(&self) -> Result<Vec<Value>, HostError>;
}

impl<H: EditorHost + ?Sized> EditorHost for Arc<H> {
    fn buffer_kind(&self) -> Result<String, HostError> {
        (**self).buffer_kind()
    }

    fn mode(&self) -> Result<String, HostError> {
        (**self).mode()
    }

    fn cursor_position(&self) -> Result<CursorPosition, HostError> {
        (**self).cursor_position()
    }

    fn location_list(&self) -> Result<Vec<Value>, HostError> {
        (**self).location_list()
    }
}

/// One of the four reads a pass performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    BufferKind,
    Mode,
    Cursor,
    LocationList,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BufferKind => "buffer kind",
            Self::Mode => "mode",
            Self::Cursor => "cursor",
            Self::LocationList => "location list",
        })
    }
}

/// Intentional no-display conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TerminalBuffer,
    NonNormalMode(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TerminalBuffer => f.write_str("terminal buffer"),
            Self::NonNormalMode(mode) => write!(f, "mode {mode:?} is not normal"),
        }
    }
}

/// Why a pass produced no host snapshot. Either way the popup is hidden.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PassError {
    #[error("{query} query failed: {source}")]
    Host {
        query: Query,
        #[source]
        source: HostError,
    },
    #[error("skipped: {0}")]
    Skipped(SkipReason),
}

impl PassError {
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Everything a pass needs from the host, already typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSnapshot {
    pub cursor: CursorPosition,
    pub locations: LocationList,
}

/// Runs the guarded host reads for a pass.
pub struct QueryClient<H> {
    host: H,
}

impl<H: EditorHost> QueryClient<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Read buffer kind, mode, cursor and location list, in that order.
    ///
    /// Guards are checked as soon as their read returns, so a terminal buffer
    /// never reaches the mode query.
    pub fn query(&self) -> Result<HostSnapshot, PassError> {
        let kind = self
            .host
            .buffer_kind()
            .map_err(|source| host_failure(Query::BufferKind, source))?;
        if kind == TERMINAL_BUFFER_KIND {
            return Err(PassError::Skipped(SkipReason::TerminalBuffer));
        }

        let mode = self
            .host
            .mode()
            .map_err(|source| host_failure(Query::Mode, source))?;
        if mode != NORMAL_MODE {
            return Err(PassError::Skipped(SkipReason::NonNormalMode(mode)));
        }

        let cursor = self
            .host
            .cursor_position()
            .map_err(|source| host_failure(Query::Cursor, source))?;

        let records = self
            .host
            .location_list()
            .map_err(|source| host_failure(Query::LocationList, source))?;
        let locations = decode_location_list(records);
        if locations.malformed() > 0 {
            tracing::debug!(
                malformed = locations.malformed(),
                kept = locations.len(),
                "Dropped malformed location records"
            );
        }

        Ok(HostSnapshot { cursor, locations })
    }
}

fn host_failure(query: Query, source: HostError) -> PassError {
    tracing::warn!(%query, error = %source, "Host query failed");
    PassError::Host { query, source }
}
