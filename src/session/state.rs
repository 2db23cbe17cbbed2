//! Connection state machine
//!
//! Owns the session's [`ConnectionState`]; every transition goes through here.

use std::fmt;
use std::str::FromStr;

use crate::error::{BirdError, Result};
use crate::protocol::RESTRICT_COMMAND;

/// Logical state of a control session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No transport (initial and terminal)
    #[default]
    Closed,

    /// Connected, welcome banner not seen yet
    Open,

    /// Welcome seen, `restrict` handshake pending
    Restrict,

    /// Idle, next command may go out
    Ready,

    /// A command is in flight
    Waiting,
}

impl ConnectionState {
    /// Every state, in lifecycle order
    pub const ALL: [ConnectionState; 5] = [
        ConnectionState::Closed,
        ConnectionState::Open,
        ConnectionState::Restrict,
        ConnectionState::Ready,
        ConnectionState::Waiting,
    ];

    /// Lowercase external name
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::Closed => "closed",
            ConnectionState::Open => "open",
            ConnectionState::Restrict => "restrict",
            ConnectionState::Ready => "ready",
            ConnectionState::Waiting => "waiting",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConnectionState {
    type Err = BirdError;

    /// Case-insensitive name lookup
    fn from_str(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.name() == lower)
            .ok_or_else(|| BirdError::InvalidState(name.to_string()))
    }
}

/// Drives [`ConnectionState`] transitions
#[derive(Debug, Default)]
pub struct StateMachine {
    state: ConnectionState,
}

impl StateMachine {
    /// Start in `Closed`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ConnectionState {
        self.state
    }

    /// Closed -> Open
    pub fn connected(&mut self) {
        self.transition(ConnectionState::Open);
    }

    /// Open -> Restrict
    ///
    /// Returns `false` (state untouched) if a welcome is not expected now.
    pub fn welcomed(&mut self) -> bool {
        if self.state != ConnectionState::Open {
            return false;
        }
        self.transition(ConnectionState::Restrict);
        true
    }

    /// Whether a queue head with text `command` may be dispatched
    pub fn can_dispatch(&self, command: &str) -> bool {
        match self.state {
            ConnectionState::Ready => true,
            ConnectionState::Restrict => command == RESTRICT_COMMAND,
            _ => false,
        }
    }

    /// Ready | Restrict -> Waiting
    pub fn dispatched(&mut self) {
        self.transition(ConnectionState::Waiting);
    }

    /// Waiting -> Ready
    ///
    /// Returns `false` (state untouched) if nothing was in flight.
    pub fn completed(&mut self) -> bool {
        if self.state != ConnectionState::Waiting {
            return false;
        }
        self.transition(ConnectionState::Ready);
        true
    }

    /// Any -> Closed
    pub fn closed(&mut self) {
        self.transition(ConnectionState::Closed);
    }

    /// Set the state by external name
    ///
    /// Unknown names are rejected and leave the state unchanged.
    pub fn force(&mut self, name: &str) -> Result<ConnectionState> {
        let state = name.parse::<ConnectionState>()?;
        self.transition(state);
        Ok(state)
    }

    fn transition(&mut self, to: ConnectionState) {
        if self.state != to {
            tracing::debug!("State {} -> {}", self.state, to);
        }
        self.state = to;
    }
}
