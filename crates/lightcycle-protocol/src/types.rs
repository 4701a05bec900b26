//! Typed protocol messages.
//!
//! [`Message`] is what the codec produces: a tag and a bag of strings.
//! The client loop wants something it can `match` on, with numbers already
//! parsed, so every server line is decoded exactly once into a
//! [`ServerMessage`]. Anything malformed is rejected right there.

use std::fmt;
use std::str::FromStr;

use crate::{Message, ProtocolError};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A server-assigned player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four moves a player can make.
///
/// `y` grows downwards, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order moves are evaluated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset `(dx, dy)` of a step in this direction.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The wire name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ProtocolError::InvalidDirection(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// A decoded message from the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `game|<width>|<height>`: a match starts on a `width × height` torus.
    Game { width: u32, height: u32 },

    /// `player|<id>|<name>`: introduces a player.
    Player { id: PlayerId, name: String },

    /// `pos|<id>|<x>|<y>`: a player's head is now at `(x, y)`.
    /// Coordinates are raw; callers normalize them onto the grid.
    Pos { id: PlayerId, x: i64, y: i64 },

    /// `die|<id>`: a player crashed and its trail is gone.
    Die { id: PlayerId },

    /// `message|<id>|<text>`: a chat line from a player.
    Chat { id: PlayerId, text: String },

    /// `tick`: the server wants our move now.
    Tick,

    /// `win|<wins>|<losses>`
    Win { wins: u32, losses: u32 },

    /// `lose|<wins>|<losses>`
    Lose { wins: u32, losses: u32 },

    /// `error|<description>`
    Error { description: String },

    /// Any type tag we don't know. Kept whole so it can be logged.
    Unknown(Message),
}

impl ServerMessage {
    /// Decodes an untyped message, parsing every numeric field.
    ///
    /// Unknown type tags decode to [`ServerMessage::Unknown`].
    ///
    /// # Errors
    /// A [`ProtocolError`] if a field is missing or isn't a valid integer.
    pub fn decode(msg: &Message) -> Result<Self, ProtocolError> {
        let decoded = match msg.kind() {
            "game" => {
                let width = int(msg, 0, "game", "width")?;
                let height = int(msg, 1, "game", "height")?;
                if width == 0 || height == 0 {
                    return Err(ProtocolError::InvalidMessage(format!(
                        "game dimensions must be positive, got {width}x{height}"
                    )));
                }
                Self::Game { width, height }
            }
            "player" => Self::Player {
                id: PlayerId(int(msg, 0, "player", "id")?),
                name: text(msg, 1, "player", "name")?,
            },
            "pos" => Self::Pos {
                id: PlayerId(int(msg, 0, "pos", "id")?),
                x: int(msg, 1, "pos", "x")?,
                y: int(msg, 2, "pos", "y")?,
            },
            "die" => Self::Die {
                id: PlayerId(int(msg, 0, "die", "id")?),
            },
            "message" => Self::Chat {
                id: PlayerId(int(msg, 0, "message", "id")?),
                text: text(msg, 1, "message", "text")?,
            },
            "tick" => Self::Tick,
            "win" => Self::Win {
                wins: int(msg, 0, "win", "wins")?,
                losses: int(msg, 1, "win", "losses")?,
            },
            "lose" => Self::Lose {
                wins: int(msg, 0, "lose", "wins")?,
                losses: int(msg, 1, "lose", "losses")?,
            },
            "error" => Self::Error {
                description: text(msg, 0, "error", "description")?,
            },
            _ => Self::Unknown(msg.clone()),
        };
        Ok(decoded)
    }
}

/// Reads field `idx` as a decimal integer.
fn int<T: FromStr>(
    msg: &Message,
    idx: usize,
    kind: &'static str,
    field: &'static str,
) -> Result<T, ProtocolError> {
    let raw = msg
        .field(idx)
        .ok_or(ProtocolError::MissingField { kind, field })?;
    raw.parse().map_err(|_| ProtocolError::InvalidInteger {
        kind,
        field,
        value: raw.to_string(),
    })
}

/// Reads everything from field `idx` on as free text.
///
/// Text is the last field of every message that has one, so a stray `|`
/// inside it is folded back in rather than dropped.
fn text(
    msg: &Message,
    idx: usize,
    kind: &'static str,
    field: &'static str,
) -> Result<String, ProtocolError> {
    match msg.fields().get(idx..) {
        Some(rest) if !rest.is_empty() => Ok(rest.join("|")),
        _ => Err(ProtocolError::MissingField { kind, field }),
    }
}

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// A message the client sends to the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `join|<name>|<password>`
    Join { name: String, password: String },

    /// `move|<direction>`
    Move(Direction),

    /// `chat|<message>`
    Chat(String),
}

impl From<&ClientMessage> for Message {
    fn from(msg: &ClientMessage) -> Self {
        match msg {
            ClientMessage::Join { name, password } => Message::new("join")
                .with_field(name.as_str())
                .with_field(password.as_str()),
            ClientMessage::Move(dir) => Message::new("move").with_field(dir.as_str()),
            ClientMessage::Chat(text) => Message::new("chat").with_field(text.as_str()),
        }
    }
}
