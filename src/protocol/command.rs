//! Command encoding
//!
//! Commands go out as plain text, one per line.

use crate::error::{BirdError, Result};

/// Handshake command sent after the welcome banner
pub const RESTRICT_COMMAND: &str = "restrict";

/// Reject text that cannot be sent as a single command line
///
/// An embedded line break would put two commands on the wire for one
/// callback and every later reply would land on the wrong caller.
pub fn validate_command(command: &str) -> Result<()> {
    if command.contains(['\r', '\n']) {
        return Err(BirdError::InvalidCommand(format!(
            "{:?} contains a line break",
            command
        )));
    }
    Ok(())
}

/// Encode a command to bytes
///
/// Format: command text + `\n`
pub fn encode_command(command: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(command.len() + 1);
    message.extend_from_slice(command.as_bytes());
    message.push(b'\n');
    message
}
