//! Reply Classifier Tests
//!
//! Tests for line classification, the code tables and command encoding.

use birdctl::protocol::{
    classify, codes, encode_command, validate_command, CodeKind, DataKind, Reply, ReplyCode,
};
use birdctl::BirdError;

fn code(text: &str) -> ReplyCode {
    ReplyCode::parse(text).unwrap()
}

// =============================================================================
// Terminal Lines
// =============================================================================

#[test]
fn test_welcome() {
    assert_eq!(classify("0001 BIRD v1.6.3 ready."), Reply::Welcome);
}

#[test]
fn test_success_codes() {
    assert_eq!(classify("0013 Daemon is up"), Reply::Success(code("0013")));
    assert_eq!(classify("0000 OK"), Reply::Success(code("0000")));
    assert_eq!(classify("0016 Access restricted"), Reply::Success(code("0016")));
    assert!(classify("0003 Reconfigured").is_terminal());
}

#[test]
fn test_error_codes() {
    assert_eq!(classify("8001 Route not found"), Reply::Error(code("8001")));
    assert_eq!(classify("9001 syntax error, unexpected END"), Reply::Error(code("9001")));
    assert!(classify("8007 Access denied").is_terminal());
}

#[test]
fn test_error_text_comes_from_table() {
    let error = BirdError::protocol(code("9001")).unwrap();
    assert_eq!(error.to_string(), "9001 Parse error");
    assert_eq!(error.reply_code(), Some(code("9001")));

    let error = BirdError::protocol(code("8001")).unwrap();
    assert_eq!(error.to_string(), "8001 Route not found");
}

#[test]
fn test_protocol_error_only_for_error_codes() {
    assert!(BirdError::protocol(code("0013")).is_none());
    assert!(BirdError::protocol(code("1000")).is_none());
}

// =============================================================================
// Data Lines
// =============================================================================

#[test]
fn test_table_code_is_header_data() {
    let reply = classify("1000-BIRD v1.6.3");
    assert_eq!(
        reply,
        Reply::Data {
            kind: DataKind::Header(Some(code("1000"))),
            payload: "BIRD v1.6.3\n".to_string(),
        }
    );
    assert!(!reply.is_terminal());
}

#[test]
fn test_unknown_numeric_code_is_header_data() {
    assert_eq!(
        classify("2002 something new"),
        Reply::Data {
            kind: DataKind::Header(Some(code("2002"))),
            payload: "something new\n".to_string(),
        }
    );
}

#[test]
fn test_short_numeric_line_is_header_data() {
    assert_eq!(
        classify("12"),
        Reply::Data {
            kind: DataKind::Header(None),
            payload: "\n".to_string(),
        }
    );
}

#[test]
fn test_space_prefixed_is_plain_data() {
    assert_eq!(
        classify("  Preference: 100"),
        Reply::Data {
            kind: DataKind::Plain,
            payload: " Preference: 100\n".to_string(),
        }
    );
}

#[test]
fn test_plus_prefixed_is_wrap_without_newline() {
    assert_eq!(
        classify("+very long line that"),
        Reply::Data {
            kind: DataKind::Wrap,
            payload: "very long line that".to_string(),
        }
    );
}

#[test]
fn test_wrap_then_plain_joins_without_separator() {
    let mut body = String::new();
    for line in ["+first half", " second half"] {
        match classify(line) {
            Reply::Data { payload, .. } => body.push_str(&payload),
            other => panic!("Expected data line, got {:?}", other),
        }
    }
    assert_eq!(body, "first halfsecond half\n");
}

#[test]
fn test_multibyte_payload_is_kept_whole() {
    assert_eq!(
        classify("1010-Größe"),
        Reply::Data {
            kind: DataKind::Header(Some(code("1010"))),
            payload: "Größe\n".to_string(),
        }
    );
}

// =============================================================================
// Unparsable Lines
// =============================================================================

#[test]
fn test_unparsable_lines() {
    assert_eq!(classify("hello"), Reply::Unparsable("hello".to_string()));
    assert_eq!(classify(""), Reply::Unparsable(String::new()));
    assert_eq!(classify("-1000"), Reply::Unparsable("-1000".to_string()));
    assert!(!classify("hello").is_terminal());
}

// =============================================================================
// Code Tables
// =============================================================================

#[test]
fn test_reply_code_parse() {
    assert_eq!(code("0013 Daemon is up").as_str(), "0013");
    assert!(ReplyCode::parse("001").is_none());
    assert!(ReplyCode::parse("00a1 x").is_none());
    assert!(ReplyCode::parse(" 0013").is_none());
    assert_eq!(code("8001"), "8001");
}

#[test]
fn test_code_kinds() {
    assert_eq!(code("0001").kind(), CodeKind::Success);
    assert_eq!(code("0016").kind(), CodeKind::Success);
    assert_eq!(code("8000").kind(), CodeKind::Error);
    assert_eq!(code("9002").kind(), CodeKind::Error);
    assert_eq!(code("1018").kind(), CodeKind::Table);
    assert_eq!(code("1019").kind(), CodeKind::Unknown);
}

#[test]
fn test_describe() {
    assert_eq!(codes::describe(code("0013")), Some("Status report"));
    assert_eq!(codes::describe(code("8003")), Some("No protocols match"));
    assert_eq!(codes::describe(code("1007")), Some("Route list"));
    assert_eq!(codes::describe(code("4242")), None);
    assert_eq!(codes::success_message(code("0007")), Some("Shutdown ordered"));
    assert_eq!(codes::error_message(code("0007")), None);
}

#[test]
fn test_reply_code_display() {
    assert_eq!(code("0013").to_string(), "0013");
    assert_eq!(format!("{:?}", code("0013")), "ReplyCode(0013)");
}

// =============================================================================
// Command Encoding
// =============================================================================

#[test]
fn test_encode_command_appends_newline() {
    assert_eq!(encode_command("show status"), b"show status\n".to_vec());
    assert_eq!(encode_command(""), b"\n".to_vec());
}

#[test]
fn test_validate_command_rejects_line_breaks() {
    assert!(validate_command("show route for 192.0.2.0/24 all").is_ok());
    assert!(matches!(
        validate_command("show status\nshow protocols"),
        Err(BirdError::InvalidCommand(_))
    ));
    assert!(validate_command("restrict\r").is_err());
}
