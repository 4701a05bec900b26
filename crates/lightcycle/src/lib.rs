//! # lightcycle
//!
//! Client framework for line-protocol Tron game servers.
//!
//! The client connects over TCP, keeps a model of the match up to date
//! from server messages, and asks a [`Bot`](lightcycle_game::Bot) for a
//! move every tick. Game developers implement `Bot`; the framework handles
//! transport, framing, and state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lightcycle::prelude::*;
//!
//! # async fn demo() -> Result<(), LightcycleError> {
//! let config = ClientConfig::new("snail", "hunter2");
//! let mut client = Client::connect(&config, Snail::new()).await?;
//! match client.play().await? {
//!     Outcome::Win { wins, .. } => println!("won ({wins} total)"),
//!     Outcome::Lose { losses, .. } => println!("lost ({losses} total)"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::{Client, ClientBuilder, Outcome};
pub use config::{ClientConfig, ConfigError, DEFAULT_HOST, DEFAULT_PORT, parse_port};
pub use error::LightcycleError;

/// Re-exports of commonly used types.
pub mod prelude {
    pub use crate::{Client, ClientBuilder, ClientConfig, LightcycleError, Outcome};
    pub use lightcycle_game::{Action, Bot, GameState, Grid, Player, Position};
    pub use lightcycle_protocol::{ClientMessage, Direction, Message, PlayerId, ServerMessage};
    pub use lightcycle_strategy::Snail;
    pub use lightcycle_transport::{Connection, TcpConnection, TransportError};
}
