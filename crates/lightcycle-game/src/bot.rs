//! The `Bot` trait, the seam where strategies plug in.
//!
//! The client loop owns the connection and the state; a bot only ever sees
//! the state read-only and answers with an [`Action`]. Swapping strategies
//! never touches transport, codec, or dispatch code.

use lightcycle_protocol::Direction;
use tracing::info;

use crate::{GameState, Player};

/// What a bot wants the client to send in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send `move|<dir>`.
    Move(Direction),
    /// Send `chat|<text>`.
    Chat(String),
    /// Send nothing.
    Idle,
}

/// A strategy for playing the game.
///
/// Only [`on_tick`](Bot::on_tick) is required. The other hooks default to
/// logging the event and doing nothing.
pub trait Bot {
    /// Called once per `tick`. Should normally return [`Action::Move`];
    /// the server expects one move per tick.
    fn on_tick(&mut self, state: &GameState) -> Action;

    /// Called when a player dies, after its trail has been cleared and
    /// before it is dropped from the registry.
    fn on_die(&mut self, _state: &GameState, player: &Player) -> Action {
        info!(id = %player.id(), name = player.name(), "player died");
        Action::Idle
    }

    /// Called for every chat line.
    fn on_message(
        &mut self,
        _state: &GameState,
        sender: &Player,
        text: &str,
    ) -> Action {
        info!(from = sender.name(), text, "chat");
        Action::Idle
    }

    /// Called when we won the match.
    fn on_win(&mut self, wins: u32, losses: u32) {
        info!(wins, losses, "you win!");
    }

    /// Called when we lost the match.
    fn on_lose(&mut self, wins: u32, losses: u32) {
        info!(wins, losses, "you lose!");
    }
}
