//! # birdctl
//!
//! Client for the BIRD routing daemon's control socket with:
//! - Line framing tolerant of any chunking of the byte stream
//! - Reply classification against the daemon's fixed code tables
//! - Automatic `restrict` handshake after the welcome banner
//! - Strictly ordered command queue, one command on the wire at a time
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Caller Code                              │
//! │        command(text, callback)   on(event, listener)         │
//! └─────────────────────┬───────────────────────▲───────────────┘
//!                       │                       │
//! ┌─────────────────────▼───────────────────────┴───────────────┐
//! │                       Session                                │
//! │         (State Machine + Command Queue + Notifier)           │
//! └──────────┬──────────────────────────────────▲───────────────┘
//!            │ command + "\n"                   │ Reply
//!            │                         ┌────────┴────────┐
//!            │                         │   Classifier    │
//!            │                         └────────▲────────┘
//!            │                                  │ lines
//!            │                         ┌────────┴────────┐
//!            │                         │   Line Framer   │
//!            │                         └────────▲────────┘
//!            ▼                                  │ bytes
//! ┌─────────────────────────────────────────────┴───────────────┐
//! │                Transport (Unix socket)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BirdError, Result};
pub use config::{Config, DesyncPolicy};
pub use protocol::{ReplyCode, Response};
pub use session::{ConnectionState, Event, EventKind, Notifiable, PollStatus, Session};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of birdctl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
