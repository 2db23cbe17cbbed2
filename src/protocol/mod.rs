//! Protocol Module
//!
//! Defines the BIRD control-socket wire protocol.
//!
//! ## Request Format
//! One command per line, terminated by `\n`:
//! ```text
//! show protocols all\n
//! ```
//!
//! ## Reply Format
//! ```text
//! ┌──────────┬─────┬───────────────────────────────┐
//! │ Code (4) │ Sep │            Text               │
//! └──────────┴─────┴───────────────────────────────┘
//! ```
//! - Sep `-`: more lines follow under this code
//! - Sep ` `: last line carrying this code
//! - A line starting with a space continues the previous code's data
//! - A line starting with `+` wraps onto the next line
//!
//! ### Code Ranges
//! - 0xxx: success (terminal), 0001 is the welcome banner
//! - 1xxx: table / data headers
//! - 8xxx, 9xxx: errors (terminal)

pub mod codes;
mod command;
mod framer;
mod reply;
mod response;

pub use codes::{CodeKind, ReplyCode, WELCOME};
pub use command::{encode_command, validate_command, RESTRICT_COMMAND};
pub use framer::{LineFramer, Lines};
pub use reply::{classify, DataKind, Reply};
pub use response::Response;
