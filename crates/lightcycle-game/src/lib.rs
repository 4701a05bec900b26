//! Game state model for lightcycle.
//!
//! Holds everything the client knows about a running match and the trait
//! bots implement to play it.
//!
//! # Key types
//!
//! - [`GameState`]: grid, player registry, and our own identity
//! - [`Grid`] / [`Position`]: the toroidal occupancy grid
//! - [`Player`] / [`Placement`]: a player, placed or not yet
//! - [`Bot`] / [`Action`]: the strategy seam

mod bot;
mod error;
mod grid;
mod player;
mod state;

pub use bot::{Action, Bot};
pub use error::GameError;
pub use grid::{Grid, Position};
pub use player::{Placement, Player};
pub use state::GameState;
