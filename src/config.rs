//! Configuration for birdctl
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{BirdError, Result};

/// Default location of the BIRD control socket
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/bird.ctl";

/// Main configuration for a control session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Filesystem path of the daemon's control socket
    pub socket_path: PathBuf,

    /// Socket read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    /// Bytes requested from the socket per read
    pub read_chunk_size: usize,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// What to do when a reply cannot be attributed to a command
    pub desync_policy: DesyncPolicy,
}

/// Reaction to a reply line that does not belong to any in-flight command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesyncPolicy {
    /// Emit `error`, then close the session
    #[default]
    Fatal,

    /// Log the line and keep going
    Warn,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            read_chunk_size: 4096,
            desync_policy: DesyncPolicy::Fatal,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the values a session cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(BirdError::Config("socket path is empty".to_string()));
        }
        if self.read_chunk_size == 0 {
            return Err(BirdError::Config(
                "read chunk size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the control socket path
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.socket_path = path.into();
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the read chunk size (in bytes)
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.config.read_chunk_size = size;
        self
    }

    /// Set the desync policy
    pub fn desync_policy(mut self, policy: DesyncPolicy) -> Self {
        self.config.desync_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
