//! Reply classifier
//!
//! Decides what role a single framed line plays in the reply stream.

use super::codes::{CodeKind, ReplyCode, WELCOME};

/// Where a data line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Digit-prefixed line, `None` when the prefix is not four digits
    Header(Option<ReplyCode>),

    /// Space-prefixed continuation
    Plain,

    /// `+`-prefixed line that continues on the next line
    Wrap,
}

/// A classified reply line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Daemon banner, sent once after connect
    Welcome,

    /// Terminal success
    Success(ReplyCode),

    /// Terminal error
    Error(ReplyCode),

    /// Part of a multi-line body
    ///
    /// `payload` is ready to append: header and plain lines already end
    /// in `\n`, wrap lines do not.
    Data { kind: DataKind, payload: String },

    /// Line matching none of the rules
    Unparsable(String),
}

impl Reply {
    /// Whether this line ends the in-flight command
    pub fn is_terminal(&self) -> bool {
        matches!(self, Reply::Success(_) | Reply::Error(_))
    }
}

/// Classify one line (terminator already stripped)
pub fn classify(line: &str) -> Reply {
    if let Some(code) = ReplyCode::parse(line) {
        if code == WELCOME {
            return Reply::Welcome;
        }
        match code.kind() {
            CodeKind::Success => return Reply::Success(code),
            CodeKind::Error => return Reply::Error(code),
            CodeKind::Table | CodeKind::Unknown => {}
        }
    }

    match line.chars().next() {
        Some(c) if c.is_ascii_digit() => Reply::Data {
            kind: DataKind::Header(ReplyCode::parse(line)),
            payload: with_newline(skip_chars(line, 5)),
        },
        Some(' ') => Reply::Data {
            kind: DataKind::Plain,
            payload: with_newline(skip_chars(line, 1)),
        },
        Some('+') => Reply::Data {
            kind: DataKind::Wrap,
            payload: skip_chars(line, 1).to_string(),
        },
        _ => Reply::Unparsable(line.to_string()),
    }
}

fn skip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

fn with_newline(text: &str) -> String {
    let mut payload = String::with_capacity(text.len() + 1);
    payload.push_str(text);
    payload.push('\n');
    payload
}
