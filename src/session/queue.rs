//! Command queue
//!
//! Pending commands in arrival order plus the single in-flight slot.

use std::collections::VecDeque;
use std::fmt;

use crate::error::BirdError;
use crate::protocol::{ReplyCode, Response};
use super::state::StateMachine;
use super::Session;

/// Completion callback: `(session, error-or-none, response)`
pub type Callback = Box<dyn FnOnce(&mut Session, Option<BirdError>, Response)>;

/// A command waiting for, or receiving, its reply
pub struct PendingCommand {
    /// Command text, without line terminator
    command: String,

    callback: Callback,

    /// Data payloads received so far
    body: String,
}

impl PendingCommand {
    pub fn new(command: impl Into<String>, callback: Callback) -> Self {
        Self {
            command: command.into(),
            callback,
            body: String::new(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Append one classified data payload
    pub fn append(&mut self, payload: &str) {
        self.body.push_str(payload);
    }

    /// Fire the callback, consuming the command
    pub fn complete(self, session: &mut Session, error: Option<BirdError>, code: ReplyCode) {
        let response = Response::new(code, self.body);
        (self.callback)(session, error, response);
    }
}

impl fmt::Debug for PendingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCommand")
            .field("command", &self.command)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// FIFO of pending commands with at most one in flight
///
/// The in-flight command is never also in `pending`.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<PendingCommand>,
    in_flight: Option<PendingCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a caller command at the tail
    pub fn push_back(&mut self, command: PendingCommand) {
        self.pending.push_back(command);
    }

    /// Enqueue ahead of everything else (handshake commands)
    pub fn push_front(&mut self, command: PendingCommand) {
        self.pending.push_front(command);
    }

    /// Next command to dispatch
    pub fn front(&self) -> Option<&PendingCommand> {
        self.pending.front()
    }

    /// Move the head into the in-flight slot if `state` allows it
    ///
    /// Marks the state machine as waiting and returns the dispatched
    /// command; the caller writes it to the transport.
    pub fn start_next(&mut self, state: &mut StateMachine) -> Option<&PendingCommand> {
        if self.in_flight.is_some() {
            return None;
        }
        if !state.can_dispatch(self.pending.front()?.command()) {
            return None;
        }

        let command = self.pending.pop_front()?;
        state.dispatched();
        self.in_flight = Some(command);
        self.in_flight.as_ref()
    }

    pub fn in_flight(&self) -> Option<&PendingCommand> {
        self.in_flight.as_ref()
    }

    pub fn in_flight_mut(&mut self) -> Option<&mut PendingCommand> {
        self.in_flight.as_mut()
    }

    /// Release the in-flight slot
    pub fn take_in_flight(&mut self) -> Option<PendingCommand> {
        self.in_flight.take()
    }

    /// Number of commands not yet dispatched
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every command without calling back
    ///
    /// Returns how many were dropped, in-flight included.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len() + usize::from(self.in_flight.is_some());
        self.pending.clear();
        self.in_flight = None;
        dropped
    }
}
