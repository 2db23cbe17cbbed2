//! Network Module
//!
//! Transport seam between the protocol session and the daemon socket.
//!
//! ## Architecture
//! - `Connector` opens a connection for a `Config`
//! - `Transport` moves raw bytes: blocking reads, whole writes, shutdown
//! - `UnixConnector` / `UnixTransport` speak to a filesystem-path socket

mod transport;
mod connection;

pub use transport::{Connector, Transport};
pub use connection::{UnixConnector, UnixTransport};
