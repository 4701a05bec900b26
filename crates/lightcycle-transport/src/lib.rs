//! Transport abstraction layer for lightcycle.
//!
//! Provides the [`Connection`] trait that the client loop talks to, and
//! [`TcpConnection`], the line-oriented TCP implementation used against a
//! real game server.
//!
//! The transport only moves bytes. It knows that the wire is made of
//! newline-terminated lines (so it never hands out half a line), but it
//! doesn't know what a message is; that's the protocol crate's job.

#![allow(async_fn_in_trait)]

mod error;
mod tcp;

pub use error::TransportError;
pub use tcp::TcpConnection;

use std::fmt;

/// Opaque identifier for a connection.
///
/// Used to tell log lines of concurrently running clients apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A single client connection to a game server.
///
/// A connection is owned by exactly one client loop, so every method
/// takes `&mut self`; there is no internal locking.
pub trait Connection {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes already-framed data to the server.
    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Waits for the next chunk of data from the server.
    ///
    /// The chunk always ends on a line boundary and may contain any
    /// number of lines. Returns `Ok(None)` when the server closed the
    /// connection cleanly.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the connection. Calling it more than once is a no-op.
    async fn close(&mut self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
