//! Reply codes
//!
//! Fixed code tables defined by the BIRD daemon.

use std::fmt;

/// Code of the welcome banner sent right after connect
pub const WELCOME: ReplyCode = ReplyCode(*b"0001");

/// Terminal success codes
const SUCCESS: &[(&str, &str)] = &[
    ("0000", "OK"),
    ("0001", "Welcome"),
    ("0002", "Reading configuration"),
    ("0003", "Reconfigured"),
    ("0004", "Reconfiguration in progress"),
    ("0005", "Reconfiguration already in progress, queueing"),
    ("0006", "Reconfiguration ignored, shutting down"),
    ("0007", "Shutdown ordered"),
    ("0008", "Already disabled"),
    ("0009", "Disabled"),
    ("0010", "Already enabled"),
    ("0011", "Enabled"),
    ("0012", "Restarted"),
    ("0013", "Status report"),
    ("0014", "Route count"),
    ("0015", "Reloading"),
    ("0016", "Access restricted"),
];

/// Terminal error codes
const ERROR: &[(&str, &str)] = &[
    ("8000", "Reply too long"),
    ("8001", "Route not found"),
    ("8002", "Configuration file error"),
    ("8003", "No protocols match"),
    ("8004", "Stopped due to reconfiguration"),
    ("8005", "Protocol is down => cannot dump"),
    ("8006", "Reload failed"),
    ("8007", "Access denied"),
    ("9000", "Command too long"),
    ("9001", "Parse error"),
    ("9002", "Invalid symbol type"),
];

/// Table / header codes introducing data lines
const TABLES: &[(&str, &str)] = &[
    ("1000", "BIRD version"),
    ("1001", "Interface list"),
    ("1002", "Protocol list"),
    ("1003", "Interface address"),
    ("1004", "Interface flags"),
    ("1005", "Interface summary"),
    ("1006", "Protocol details"),
    ("1007", "Route list"),
    ("1008", "Route details"),
    ("1009", "Static route list"),
    ("1010", "Symbol list"),
    ("1011", "Uptime"),
    ("1012", "Route extended attribute list"),
    ("1013", "Show ospf neighbors"),
    ("1014", "Show ospf"),
    ("1015", "Show ospf interface"),
    ("1016", "Show ospf state/topology"),
    ("1017", "Show ospf lsadb"),
    ("1018", "Show memory"),
];

/// Class of a reply code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Success,
    Error,
    Table,
    Unknown,
}

/// A four digit reply code
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyCode([u8; 4]);

impl ReplyCode {
    /// Parse the first four characters of a line
    ///
    /// Returns `None` unless they are four ASCII digits.
    pub fn parse(line: &str) -> Option<Self> {
        let bytes = line.as_bytes();
        if bytes.len() < 4 || !bytes[..4].iter().all(u8::is_ascii_digit) {
            return None;
        }
        Some(Self([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn as_str(&self) -> &str {
        // Only ever built from ASCII digits
        std::str::from_utf8(&self.0).unwrap_or("????")
    }

    /// Look the code up in the fixed tables
    pub fn kind(&self) -> CodeKind {
        let code = self.as_str();
        if lookup(SUCCESS, code).is_some() {
            CodeKind::Success
        } else if lookup(ERROR, code).is_some() {
            CodeKind::Error
        } else if lookup(TABLES, code).is_some() {
            CodeKind::Table
        } else {
            CodeKind::Unknown
        }
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReplyCode({})", self.as_str())
    }
}

impl PartialEq<&str> for ReplyCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for ReplyCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, text)| *text)
}

/// Fixed text of an error code
pub fn error_message(code: ReplyCode) -> Option<&'static str> {
    lookup(ERROR, code.as_str())
}

/// Fixed text of a success code
pub fn success_message(code: ReplyCode) -> Option<&'static str> {
    lookup(SUCCESS, code.as_str())
}

/// Human readable description of any known code
pub fn describe(code: ReplyCode) -> Option<&'static str> {
    let code = code.as_str();
    lookup(SUCCESS, code)
        .or_else(|| lookup(ERROR, code))
        .or_else(|| lookup(TABLES, code))
}
