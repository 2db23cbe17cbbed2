//! Line Framer Tests
//!
//! These tests verify:
//! - All four terminator forms
//! - Partial lines stay buffered across chunks
//! - Output does not depend on where chunks are split

use birdctl::protocol::{classify, LineFramer, Reply};

// =============================================================================
// Helper Functions
// =============================================================================

fn frame_all(chunks: &[&[u8]]) -> Vec<String> {
    let mut framer = LineFramer::new();
    let mut lines = Vec::new();
    for chunk in chunks {
        lines.extend(framer.feed(chunk));
    }
    lines
}

const SHOW_STATUS_REPLY: &[u8] = b"0001 BIRD 1.6.3 ready.\r\n\
0016 Access restricted\n\
1000-BIRD 1.6.3\n\
1011-Router ID is 192.0.2.1\n\r \
Current server time is 2026-10-19 10:00:00\r\
+wrapped \n \
tail\n\
0013 Daemon is up and running\n";

// =============================================================================
// Terminator Tests
// =============================================================================

#[test]
fn test_lf_terminated_lines() {
    let lines = frame_all(&[b"0000 OK\n1000-BIRD\n"]);
    assert_eq!(lines, vec!["0000 OK", "1000-BIRD"]);
}

#[test]
fn test_each_terminator_form() {
    let lines = frame_all(&[b"a\r\nb\n\rc\rd\ne"]);
    assert_eq!(lines, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_double_terminator_yields_empty_line() {
    let lines = frame_all(&[b"a\n\nb\r\n\r\nc\n"]);
    assert_eq!(lines, vec!["a", "", "b", "", "c"]);
}

#[test]
fn test_cr_cr_lf_is_two_lines() {
    let lines = frame_all(&[b"a\r\r\nb\n"]);
    assert_eq!(lines, vec!["a", "", "b"]);
}

// =============================================================================
// Buffering Tests
// =============================================================================

#[test]
fn test_partial_line_is_retained() {
    let mut framer = LineFramer::new();

    let first: Vec<String> = framer.feed(b"0013 Daemon").collect();
    assert!(first.is_empty());
    assert_eq!(framer.pending(), b"0013 Daemon");

    let second: Vec<String> = framer.feed(b" is up\n1000-").collect();
    assert_eq!(second, vec!["0013 Daemon is up"]);
    assert_eq!(framer.pending(), b"1000-");
}

#[test]
fn test_split_crlf_does_not_emit_empty_line() {
    let lines = frame_all(&[b"0000 OK\r", b"\n0013 Up\n"]);
    assert_eq!(lines, vec!["0000 OK", "0013 Up"]);
}

#[test]
fn test_split_lfcr_does_not_emit_empty_line() {
    let lines = frame_all(&[b"0000 OK\n", b"\r", b"0013 Up\n"]);
    assert_eq!(lines, vec!["0000 OK", "0013 Up"]);
}

#[test]
fn test_line_emitted_before_companion_byte_arrives() {
    let mut framer = LineFramer::new();
    let lines: Vec<String> = framer.feed(b"0013 Up\r").collect();
    assert_eq!(lines, vec!["0013 Up"]);
    assert!(framer.is_empty());
}

#[test]
fn test_feed_is_lazy() {
    let mut framer = LineFramer::new();
    let first = framer.feed(b"one\ntwo\nthree\n").next();
    assert_eq!(first.as_deref(), Some("one"));

    assert_eq!(framer.next_line().as_deref(), Some("two"));
    assert_eq!(framer.next_line().as_deref(), Some("three"));
    assert_eq!(framer.next_line(), None);
}

#[test]
fn test_no_complete_line_left_at_rest() {
    let mut framer = LineFramer::new();
    let _: Vec<String> = framer.feed(b"a\nb\r\nc").collect();
    assert_eq!(framer.pending(), b"c");
    assert_eq!(framer.len(), 1);
}

#[test]
fn test_clear_drops_partial_line() {
    let mut framer = LineFramer::new();
    let _: Vec<String> = framer.feed(b"0013 half").collect();
    framer.clear();
    assert!(framer.is_empty());

    let lines: Vec<String> = framer.feed(b"0000 OK\n").collect();
    assert_eq!(lines, vec!["0000 OK"]);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let lines = frame_all(&[b" caf\xff\n"]);
    assert_eq!(lines, vec![" caf\u{fffd}"]);
}

#[test]
fn test_long_line_is_not_truncated() {
    let mut data = vec![b' '; 100_000];
    data.push(b'\n');
    let lines = frame_all(&[&data]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].len(), 100_000);
}

// =============================================================================
// Chunk Boundary Independence
// =============================================================================

#[test]
fn test_every_two_way_split_gives_same_lines() {
    let expected = frame_all(&[SHOW_STATUS_REPLY]);
    assert_eq!(expected.len(), 8);

    for split in 0..=SHOW_STATUS_REPLY.len() {
        let (head, tail) = SHOW_STATUS_REPLY.split_at(split);
        assert_eq!(frame_all(&[head, tail]), expected, "split at {}", split);
    }
}

#[test]
fn test_byte_by_byte_gives_same_classification() {
    let expected: Vec<Reply> = frame_all(&[SHOW_STATUS_REPLY])
        .iter()
        .map(|line| classify(line))
        .collect();

    let chunks: Vec<&[u8]> = SHOW_STATUS_REPLY.chunks(1).collect();
    let actual: Vec<Reply> = frame_all(&chunks).iter().map(|line| classify(line)).collect();

    assert_eq!(actual, expected);
}

#[test]
fn test_three_way_splits_give_same_lines() {
    let expected = frame_all(&[SHOW_STATUS_REPLY]);
    let len = SHOW_STATUS_REPLY.len();

    for first in (0..len).step_by(3) {
        for second in (first..=len).step_by(5) {
            let chunks = [
                &SHOW_STATUS_REPLY[..first],
                &SHOW_STATUS_REPLY[first..second],
                &SHOW_STATUS_REPLY[second..],
            ];
            assert_eq!(frame_all(&chunks), expected, "splits at {} and {}", first, second);
        }
    }
}
