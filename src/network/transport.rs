//! Transport traits
//!
//! The session only ever talks to these; tests plug in scripted versions.

use crate::config::Config;
use crate::error::Result;

/// Bidirectional byte stream to the daemon
pub trait Transport {
    /// Read the next chunk into `buf`
    ///
    /// Returns `Ok(0)` once the peer has closed the stream. A configured
    /// read timeout surfaces as `WouldBlock` or `TimedOut`.
    fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;

    /// Write and flush all of `data`
    fn write_all(&mut self, data: &[u8]) -> std::io::Result<()>;

    /// Tear the stream down
    fn shutdown(&mut self) -> std::io::Result<()>;
}

/// Opens transports
pub trait Connector {
    /// Connect to the endpoint named by `config`
    ///
    /// Any pre-connect validation of the endpoint happens here.
    fn connect(&mut self, config: &Config) -> Result<Box<dyn Transport>>;
}
