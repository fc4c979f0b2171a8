//! [`EditorHost`] over the Neovim API.
//!
//! The RPC transport is not part of this crate: anything that can send a
//! request and block for its response implements [`RpcCall`]. Responses are
//! plain JSON values; buffer and window handles are passed back to the host
//! untouched.

use std::sync::Arc;

use serde_json::{Value, json};

use locpopup_types::CursorPosition;

use crate::error::HostError;
use crate::query::EditorHost;

pub(crate) const GET_CURRENT_BUF: &str = "nvim_get_current_buf";
pub(crate) const BUF_GET_OPTION: &str = "nvim_buf_get_option";
pub(crate) const GET_CURRENT_WIN: &str = "nvim_get_current_win";
pub(crate) const WIN_GET_CURSOR: &str = "nvim_win_get_cursor";
pub(crate) const CALL_FUNCTION: &str = "nvim_call_function";
pub(crate) const COMMAND: &str = "nvim_command";
pub(crate) const SUBSCRIBE: &str = "nvim_subscribe";

/// Blocking request/response call into the editor.
pub trait RpcCall: Send + Sync {
    fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, HostError>;
}

impl<C: RpcCall + ?Sized> RpcCall for Arc<C> {
    fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, HostError> {
        (**self).call(method, args)
    }
}

/// Neovim-backed host.
pub struct NvimHost<C> {
    rpc: C,
}

impl<C: RpcCall> NvimHost<C> {
    pub fn new(rpc: C) -> Self {
        Self { rpc }
    }

    pub(crate) fn rpc(&self) -> &C {
        &self.rpc
    }

    fn call_function(&self, name: &str, args: Value) -> Result<Value, HostError> {
        self.rpc.call(CALL_FUNCTION, vec![json!(name), args])
    }
}

fn expect_string(method: &'static str, value: Value) -> Result<String, HostError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(HostError::UnexpectedShape {
            method,
            expected: "string",
        }),
    }
}

fn expect_cursor(value: &Value) -> Result<CursorPosition, HostError> {
    let shape_error = HostError::UnexpectedShape {
        method: WIN_GET_CURSOR,
        expected: "[line, column]",
    };
    match value.as_array().map(Vec::as_slice) {
        Some([line, column]) => match (line.as_i64(), column.as_i64()) {
            (Some(line), Some(column)) => Ok(CursorPosition::new(line, column)),
            _ => Err(shape_error),
        },
        _ => Err(shape_error),
    }
}

impl<C: RpcCall> EditorHost for NvimHost<C> {
    fn buffer_kind(&self) -> Result<String, HostError> {
        let buffer = self.rpc.call(GET_CURRENT_BUF, Vec::new())?;
        let kind = self
            .rpc
            .call(BUF_GET_OPTION, vec![buffer, json!("buftype")])?;
        expect_string(BUF_GET_OPTION, kind)
    }

    fn mode(&self) -> Result<String, HostError> {
        let mode = self.call_function("mode", json!([""]))?;
        expect_string(CALL_FUNCTION, mode)
    }

    fn cursor_position(&self) -> Result<CursorPosition, HostError> {
        let window = self.rpc.call(GET_CURRENT_WIN, Vec::new())?;
        let cursor = self.rpc.call(WIN_GET_CURSOR, vec![window])?;
        expect_cursor(&cursor)
    }

    fn location_list(&self) -> Result<Vec<Value>, HostError> {
        // Window number 0 is the current window.
        match self.call_function("getloclist", json!([0]))? {
            Value::Array(records) => Ok(records),
            _ => Err(HostError::UnexpectedShape {
                method: CALL_FUNCTION,
                expected: "array of location records",
            }),
        }
    }
}
