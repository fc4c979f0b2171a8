//! Host query failures.

/// A read against the editor host failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host answered the call with an error.
    #[error("{method} failed: {message}")]
    Rpc { method: String, message: String },
    /// The host answered, but not with the shape the call promises.
    #[error("{method} returned unexpected response: expected {expected}")]
    UnexpectedShape {
        method: &'static str,
        expected: &'static str,
    },
    /// The channel to the host is gone.
    #[error("host connection closed")]
    Disconnected,
}

impl HostError {
    pub fn rpc(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rpc {
            method: method.into(),
            message: message.into(),
        }
    }
}
