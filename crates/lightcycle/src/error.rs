//! Unified error type for lightcycle.

use lightcycle_game::GameError;
use lightcycle_protocol::ProtocolError;
use lightcycle_transport::TransportError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// Every variant ends the client loop. Unknown message types are not
/// errors and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum LightcycleError {
    /// Connecting, reading, or writing failed, or the server hung up.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server sent a line we couldn't parse or decode.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A message didn't fit the game state (unknown player, no grid yet).
    #[error(transparent)]
    Game(#[from] GameError),

    /// The client was misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server sent `error|<description>`.
    #[error("server error: {0}")]
    Server(String),
}
