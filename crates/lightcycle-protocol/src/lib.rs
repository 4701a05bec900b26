//! Wire protocol for lightcycle.
//!
//! This crate defines the language the client and the game server speak:
//!
//! - **Messages** ([`Message`], [`split`]): one `|`-delimited line per
//!   message, type tag first.
//! - **Typed messages** ([`ServerMessage`], [`ClientMessage`],
//!   [`Direction`], [`PlayerId`]): what the client loop actually works with.
//! - **Codec** ([`Codec`] trait, [`LineCodec`]): how messages become
//!   framed bytes and back.
//! - **Errors** ([`ProtocolError`]): what can go wrong on the way.
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Codec (Message) → ServerMessage → client loop
//! ```

mod codec;
mod error;
mod message;
mod types;

pub use codec::{Codec, LineCodec};
pub use error::ProtocolError;
pub use message::{FIELD_SEPARATOR, Message, split};
pub use types::{ClientMessage, Direction, PlayerId, ServerMessage};
