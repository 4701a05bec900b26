//! Codec trait and the newline-framed implementation.
//!
//! A codec sits between the transport (bytes) and the client loop
//! (messages). Encoding adds the frame terminator, decoding splits a
//! batch of frames back into messages.

use crate::message::{self, Message};
use crate::ProtocolError;

/// Converts messages to framed bytes and back.
pub trait Codec: Send + Sync + 'static {
    /// Serializes one message, including its frame terminator.
    fn encode(&self, msg: &Message) -> Vec<u8>;

    /// Deserializes every message contained in a batch of bytes.
    ///
    /// # Errors
    /// Returns a [`ProtocolError`] if the batch isn't UTF-8 or any line in
    /// it is malformed. Nothing from a bad batch is returned.
    fn decode(&self, data: &[u8]) -> Result<Vec<Message>, ProtocolError>;
}

/// The `|`-delimited, `\n`-terminated text codec the game server speaks.
///
/// ```rust
/// use lightcycle_protocol::{Codec, LineCodec, Message};
///
/// let codec = LineCodec;
/// let bytes = codec.encode(&Message::new("move").with_field("up"));
/// assert_eq!(bytes, b"move|up\n");
///
/// let msgs = codec.decode(b"tick\ndie|2\n").unwrap();
/// assert_eq!(msgs[1].kind(), "die");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCodec;

impl Codec for LineCodec {
    fn encode(&self, msg: &Message) -> Vec<u8> {
        let mut line = msg.format().into_bytes();
        line.push(b'\n');
        line
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<Message>, ProtocolError> {
        let text = std::str::from_utf8(data)?;
        message::split(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_appends_newline() {
        let bytes = LineCodec.encode(&Message::new("tick"));
        assert_eq!(bytes, b"tick\n");
    }

    #[test]
    fn test_decode_multiple() {
        let msgs = LineCodec.decode(b"player|1|me\npos|1|0|0\n").unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].kind(), "player");
        assert_eq!(msgs[1].fields(), ["1", "0", "0"]);
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = LineCodec.decode(&[b't', 0xff, b'\n']).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidUtf8(_)));
    }
}
