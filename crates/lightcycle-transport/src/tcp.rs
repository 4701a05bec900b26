//! Line-oriented TCP transport using `tokio::net::TcpStream`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::{Connection, ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Size of a single socket read.
const READ_CHUNK: usize = 4096;

/// A TCP connection to a game server.
///
/// Reads are buffered so that [`recv`](Connection::recv) only ever returns
/// complete lines. Whatever follows the last `\n` of a read stays in the
/// buffer until the rest of that line arrives.
pub struct TcpConnection {
    id: ConnectionId,
    /// `None` once the connection has been closed.
    stream: Option<TcpStream>,
    buf: Vec<u8>,
}

impl TcpConnection {
    /// Opens a TCP connection to `host:port`.
    pub async fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
        let stream = TcpStream::connect((host, port)).await.map_err(|source| {
            TransportError::ConnectFailed {
                addr: format!("{host}:{port}"),
                source,
            }
        })?;
        let conn = Self::from_stream(stream);
        tracing::debug!(id = %conn.id, host, port, peer = ?conn.peer_addr(), "connected");
        Ok(conn)
    }

    /// Wraps an already established stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        Self {
            id,
            stream: Some(stream),
            buf: Vec::with_capacity(READ_CHUNK),
        }
    }

    /// Returns the address of the server, if still connected.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.as_ref().and_then(|s| s.peer_addr().ok())
    }

    /// Returns `true` until [`close`](Connection::close) has been called.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Removes every complete line from the front of the buffer.
    fn take_lines(&mut self) -> Option<Vec<u8>> {
        let end = self.buf.iter().rposition(|&b| b == b'\n')?;
        let rest = self.buf.split_off(end + 1);
        Some(std::mem::replace(&mut self.buf, rest))
    }

    fn stream(&mut self) -> Result<&mut TcpStream, TransportError> {
        self.stream.as_mut().ok_or_else(|| {
            TransportError::ConnectionClosed(format!("{} already closed", self.id))
        })
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let stream = self.stream()?;
        stream.write_all(data).await.map_err(TransportError::SendFailed)?;
        stream.flush().await.map_err(TransportError::SendFailed)
    }

    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(lines) = self.take_lines() {
                return Ok(Some(lines));
            }

            let n = self
                .stream()?
                .read(&mut chunk)
                .await
                .map_err(TransportError::ReceiveFailed)?;

            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                // Peer hung up in the middle of a line; hand over the tail.
                tracing::debug!(
                    id = %self.id,
                    bytes = self.buf.len(),
                    "connection closed with unterminated line"
                );
                return Ok(Some(std::mem::take(&mut self.buf)));
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        self.buf.clear();
        tracing::debug!(id = %self.id, "closing connection");
        stream.shutdown().await.map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
