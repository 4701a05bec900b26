//! The untyped wire message and the line format.
//!
//! On the wire a message is one line: a type tag followed by zero or more
//! fields, all separated by `|`:
//!
//! ```text
//! pos|3|17|4
//! ^^^ ^^^^^^^ fields
//! type
//! ```
//!
//! Fields stay strings here. Turning them into numbers is done once, in
//! [`ServerMessage`](crate::ServerMessage) decoding.

use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// Field separator inside a line.
pub const FIELD_SEPARATOR: char = '|';

/// A single protocol message: a type tag plus ordered string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: String,
    fields: Vec<String>,
}

impl Message {
    /// Creates a message with no fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a message from a type tag and a list of fields.
    pub fn from_parts(kind: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            fields,
        }
    }

    /// Appends a field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// The type tag (`game`, `pos`, `tick`, ...).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// All fields, in wire order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The field at `idx`, if present.
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// Parses a single line (without its terminator).
    ///
    /// A trailing `\r` is ignored so CRLF servers work too.
    ///
    /// # Errors
    /// [`ProtocolError::EmptyLine`] for an empty line and
    /// [`ProtocolError::MissingType`] when the type token is empty.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }

        let mut tokens = line.split(FIELD_SEPARATOR);
        let kind = tokens.next().unwrap_or_default();
        if kind.is_empty() {
            return Err(ProtocolError::MissingType(line.to_string()));
        }

        Ok(Self {
            kind: kind.to_string(),
            fields: tokens.map(str::to_string).collect(),
        })
    }

    /// Formats the message as a single line, without a terminator.
    ///
    /// This is the inverse of [`parse`](Self::parse) for any message whose
    /// fields don't contain `|` or a newline.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)?;
        for field in &self.fields {
            write!(f, "{FIELD_SEPARATOR}{field}")?;
        }
        Ok(())
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Splits a raw batch into messages.
///
/// Empty segments (blank lines, the tail after the final `\n`) are
/// skipped, so one batch can yield zero, one, or many messages.
pub fn split(batch: &str) -> Result<Vec<Message>, ProtocolError> {
    batch
        .split('\n')
        .filter(|line| !line.trim_end_matches('\r').is_empty())
        .map(Message::parse)
        .collect()
}
