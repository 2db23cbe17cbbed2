//! Error types for birdctl
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::protocol::ReplyCode;

/// Result type alias using BirdError
pub type Result<T> = std::result::Result<T, BirdError>;

/// Unified error type for birdctl operations
///
/// Errors are `Clone` so the same failure can be handed to a command
/// callback, an `error` listener and a `close` listener.
#[derive(Debug, Clone, Error)]
pub enum BirdError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[source] Arc<std::io::Error>),

    // -------------------------------------------------------------------------
    // Socket Resource Errors
    // -------------------------------------------------------------------------
    #[error("Bird socket does not exist at \"{}\"", .0.display())]
    SocketMissing(PathBuf),

    #[error("Bird socket at \"{}\" is not a socket", .0.display())]
    NotASocket(PathBuf),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// Error reply from the daemon; `message` is the fixed table text
    #[error("{code} {message}")]
    Protocol {
        code: ReplyCode,
        message: &'static str,
    },

    #[error("Protocol desync: {0}")]
    Desync(String),

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Session is not open")]
    NotOpen,

    #[error("Session is already open")]
    AlreadyOpen,

    #[error("\"{0}\" is an invalid state")]
    InvalidState(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Timed out waiting for the daemon")]
    Timeout,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for BirdError {
    fn from(err: std::io::Error) -> Self {
        BirdError::Io(Arc::new(err))
    }
}

impl BirdError {
    /// Build the error for a daemon error reply
    ///
    /// Returns `None` if `code` is not in the error table.
    pub fn protocol(code: ReplyCode) -> Option<Self> {
        crate::protocol::codes::error_message(code).map(|message| BirdError::Protocol {
            code,
            message,
        })
    }

    /// Code carried by a daemon error reply
    pub fn reply_code(&self) -> Option<ReplyCode> {
        match self {
            BirdError::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }
}
