//! Response definitions
//!
//! The outcome of one command as handed back to its caller.

use super::codes::{CodeKind, ReplyCode};

/// Terminal code and accumulated body of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Code of the terminal line
    pub code: ReplyCode,

    /// Concatenated data payloads, in arrival order
    pub body: String,
}

impl Response {
    pub fn new(code: ReplyCode, body: String) -> Self {
        Self { code, body }
    }

    /// Whether the daemon answered with an error code
    pub fn is_error(&self) -> bool {
        self.code.kind() == CodeKind::Error
    }
}
