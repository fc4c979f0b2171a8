//! Event subscription: register for the trigger events, recognize the
//! resulting notifications.
//!
//! Each trigger event gets its own autocommand so the notification can name
//! the event that fired it:
//!
//! ```text
//! augroup LocPopup
//!   autocmd!
//!   autocmd CursorMoved * call rpcnotify(0, "LocPopup", "update", "CursorMoved")
//!   ...
//! augroup END
//! ```
//!
//! Clearing the group first makes installing twice harmless.

use serde_json::{Value, json};

use locpopup_types::HostEvent;

use crate::error::HostError;
use crate::nvim::{COMMAND, NvimHost, RpcCall, SUBSCRIBE};

/// First notification argument asking for a pass.
pub const UPDATE_ACTION: &str = "update";

/// Editor commands that route every trigger event to `notification`.
#[must_use]
pub fn autocmd_commands(notification: &str) -> Vec<String> {
    let mut commands = Vec::with_capacity(HostEvent::ALL.len() + 3);
    commands.push(format!("augroup {notification}"));
    commands.push("autocmd!".to_string());
    for event in HostEvent::ALL {
        commands.push(format!(
            "autocmd {event} * call rpcnotify(0, \"{notification}\", \"{UPDATE_ACTION}\", \"{event}\")"
        ));
    }
    commands.push("augroup END".to_string());
    commands
}

/// Something that can deliver trigger events as notifications.
pub trait EventSource {
    /// One-time registration of the trigger events under `notification`.
    fn subscribe(&self, notification: &str) -> Result<(), HostError>;
}

impl<C: RpcCall> EventSource for NvimHost<C> {
    fn subscribe(&self, notification: &str) -> Result<(), HostError> {
        self.rpc().call(SUBSCRIBE, vec![json!(notification)])?;
        for command in autocmd_commands(notification) {
            self.rpc().call(COMMAND, vec![json!(command)])?;
        }
        tracing::info!(notification, "Subscribed to trigger events");
        Ok(())
    }
}

/// A recognized request for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateNotification {
    /// The event that fired, when the host named a known one.
    pub event: Option<HostEvent>,
}

/// Recognize an inbound notification addressed to `expected`.
///
/// Returns `None` for other methods, missing or non-`"update"` actions.
#[must_use]
pub fn parse_notification(
    expected: &str,
    method: &str,
    args: &[Value],
) -> Option<UpdateNotification> {
    if method != expected {
        return None;
    }
    let Some(action) = args.first().and_then(Value::as_str) else {
        tracing::trace!(method, "Ignoring notification without an action");
        return None;
    };
    if action != UPDATE_ACTION {
        tracing::trace!(method, action, "Ignoring unknown notification action");
        return None;
    }
    let event = args
        .get(1)
        .and_then(Value::as_str)
        .and_then(HostEvent::from_autocmd_name);
    Some(UpdateNotification { event })
}
