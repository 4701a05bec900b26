//! Error types for the game state layer.

use lightcycle_protocol::PlayerId;

/// Errors that can occur while applying server events to the game state.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The server referred to a player it never introduced with `player`.
    #[error("player {0} was never introduced")]
    MissingPlayer(PlayerId),

    /// A grid operation arrived before the `game` message sized the grid.
    #[error("game has not started yet")]
    NotStarted,
}
