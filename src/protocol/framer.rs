//! Line framer
//!
//! Turns raw socket chunks into protocol lines.
//!
//! Accepted terminators are `\r\n`, `\n\r`, `\r` and `\n`. A line is handed out
//! as soon as its first terminator byte arrives. When that byte is the last one
//! buffered, the framer remembers the byte that would make it a two-byte
//! terminator and drops it if it turns out to be the next byte received, so
//! splitting a `\r\n` across two reads never yields an extra empty line.

use bytes::{Buf, BytesMut};

/// Accumulates inbound bytes and yields complete lines
#[derive(Debug, Default)]
pub struct LineFramer {
    /// Bytes of the current, not yet terminated, line
    buffer: BytesMut,

    /// Second half of a two-byte terminator still expected
    companion: Option<u8>,
}

impl LineFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and iterate over the lines it completes
    ///
    /// The iterator is lazy: lines not pulled stay buffered and are
    /// returned by the next call to [`LineFramer::next_line`].
    pub fn feed(&mut self, chunk: &[u8]) -> Lines<'_> {
        self.extend(chunk);
        Lines { framer: self }
    }

    /// Append a chunk without extracting anything
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Remove and return the earliest complete line, terminator excluded
    pub fn next_line(&mut self) -> Option<String> {
        if let Some(expected) = self.companion {
            let first = *self.buffer.first()?;
            if first == expected {
                self.buffer.advance(1);
            }
            self.companion = None;
        }

        let end = self.buffer.iter().position(|&b| b == b'\r' || b == b'\n')?;
        let line = self.buffer.split_to(end);
        let terminator = self.buffer[0];
        self.buffer.advance(1);

        let pair = if terminator == b'\r' { b'\n' } else { b'\r' };
        match self.buffer.first() {
            Some(&next) if next == pair => self.buffer.advance(1),
            Some(_) => {}
            None => self.companion = Some(pair),
        }

        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Bytes of the trailing partial line
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop everything buffered
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.companion = None;
    }
}

/// Lines completed by one [`LineFramer::feed`] call
#[derive(Debug)]
pub struct Lines<'a> {
    framer: &'a mut LineFramer,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.framer.next_line()
    }
}
