//! Move selection for lightcycle.
//!
//! - [`calc_area`]: depth-bounded flood fill estimating free space
//! - [`Opportunities`]: per-move scores built on top of it
//! - [`Snail`]: the reference [`Bot`](lightcycle_game::Bot) that plays
//!   the best-scoring move every tick

mod flood;
mod snail;

pub use flood::{AREA_DEPTH, FLOOD_ORDER, Visited, calc_area};
pub use snail::{
    GAP_CLOSING_FACTOR, MOMENTUM_FACTOR, OPPONENT_NEAR_FACTOR, Opportunities, Snail, opportunity,
};
