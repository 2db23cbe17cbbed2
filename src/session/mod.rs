//! Session Module
//!
//! Ties the protocol engine to a transport and to caller code.
//!
//! ## Responsibilities
//! - Track connection state (`closed` -> `open` -> `restrict` -> `ready` <-> `waiting`)
//! - Queue caller commands and keep exactly one on the wire at a time
//! - Route classified reply lines to the in-flight command
//! - Emit lifecycle notifications (open, ready, error, close)
//!
//! ## Command Lifecycle
//! ```text
//!   command() ──► queue ──► in-flight ──► terminal reply ──► callback
//!                  ▲  (state Ready, or Restrict     │
//!                  │   for the handshake only)      │
//!                  └───────── next dispatch ◄───────┘
//! ```

mod client;
mod events;
mod queue;
mod state;

pub use client::{PollStatus, Session};
pub use events::{Event, EventKind, ListenerId, Notifiable, Notifier, SharedListener};
pub use queue::{Callback, CommandQueue, PendingCommand};
pub use state::{ConnectionState, StateMachine};
