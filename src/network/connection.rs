//! Unix socket connection
//!
//! Connects to the daemon's control socket by filesystem path.

use std::fs;
use std::io::{BufWriter, Read, Write};
use std::net::Shutdown;
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::error::{BirdError, Result};
use super::{Connector, Transport};

/// Opens [`UnixTransport`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixConnector;

impl UnixConnector {
    pub fn new() -> Self {
        Self
    }

    /// Make sure `path` exists and is a Unix socket
    pub fn check_socket(path: &Path) -> Result<()> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BirdError::SocketMissing(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.file_type().is_socket() {
            return Err(BirdError::NotASocket(path.to_path_buf()));
        }

        Ok(())
    }
}

impl Connector for UnixConnector {
    fn connect(&mut self, config: &Config) -> Result<Box<dyn Transport>> {
        config.validate()?;
        Self::check_socket(&config.socket_path)?;

        let stream = UnixStream::connect(&config.socket_path)?;
        let mut transport = UnixTransport::new(stream)?;
        transport.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;

        tracing::debug!("Connected to {}", config.socket_path.display());
        Ok(Box::new(transport))
    }
}

/// Connected control socket
pub struct UnixTransport {
    /// Read half
    reader: UnixStream,

    /// Write half (buffered, flushed per command)
    writer: BufWriter<UnixStream>,
}

impl UnixTransport {
    /// Wrap a connected stream
    pub fn new(stream: UnixStream) -> Result<Self> {
        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: read_stream,
            writer: BufWriter::new(stream),
        })
    }

    /// Configure socket timeouts (0 = none)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_timeout = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        let write_timeout = (write_ms > 0).then(|| Duration::from_millis(write_ms));

        self.reader.set_read_timeout(read_timeout)?;
        self.writer.get_ref().set_write_timeout(write_timeout)?;
        Ok(())
    }
}

impl Transport for UnixTransport {
    fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }

    fn write_all(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(data)?;
        self.writer.flush()
    }

    fn shutdown(&mut self) -> std::io::Result<()> {
        match self.reader.shutdown(Shutdown::Both) {
            // Peer already gone
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}
