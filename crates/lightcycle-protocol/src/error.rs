//! Error types for the protocol layer.
//!
//! Everything in here means the same thing to the client loop: the server
//! sent something we can't make sense of, and carrying on would mean
//! guessing. All variants are fatal.

/// Errors that can occur while parsing or decoding messages.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A line with no content at all.
    #[error("empty line")]
    EmptyLine,

    /// A line whose type token is empty, e.g. `|1|2`.
    #[error("missing message type in line {0:?}")]
    MissingType(String),

    /// The received bytes are not valid UTF-8.
    #[error("invalid utf-8 in batch: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A message has fewer fields than its type requires.
    #[error("`{kind}` message is missing field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A field that must be a decimal integer isn't one.
    #[error("`{kind}` field `{field}` is not an integer: {value:?}")]
    InvalidInteger {
        kind: &'static str,
        field: &'static str,
        value: String,
    },

    /// A direction other than up/down/left/right.
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    /// The message parses but violates protocol rules.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
