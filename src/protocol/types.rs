//! RESP2 value types
//!
//! Defines the decoded request frame, the typed replies, and framing errors

use bytes::Bytes;
use std::fmt;
use thiserror::Error;

/// A decoded client request: command name followed by its operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    args: Vec<Bytes>,
}

impl Frame {
    /// Build a frame from its arguments
    pub fn new(args: Vec<Bytes>) -> Self {
        Frame { args }
    }

    /// Build a frame from string-like parts (tests and clients)
    pub fn from_parts<I, T>(parts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Frame::new(parts.into_iter().map(Into::into).collect())
    }

    /// The command name, None for an empty frame
    pub fn name(&self) -> Option<&Bytes> {
        self.args.first()
    }

    /// The operands after the command name
    pub fn args(&self) -> &[Bytes] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Number of elements including the command name
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if the frame carries no command at all
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(
                f,
                "Frame({} + {} args)",
                String::from_utf8_lossy(name),
                self.args().len()
            ),
            None => write!(f, "Frame(empty)"),
        }
    }
}

/// RESP2 reply types
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    /// Simple strings: +OK\r\n
    SimpleString(String),

    /// Errors: -ERR message\r\n
    Error(String),

    /// Integers: :1000\r\n
    Integer(i64),

    /// Bulk strings: $6\r\nfoobar\r\n
    BulkString(Bytes),

    /// Null bulk string: $-1\r\n
    Null,

    /// Arrays: *2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n
    Array(Vec<RespValue>),
}

impl RespValue {
    /// Create a simple string
    pub fn simple_string(s: impl Into<String>) -> Self {
        RespValue::SimpleString(s.into())
    }

    /// The `+OK` status
    pub fn ok() -> Self {
        RespValue::simple_string("OK")
    }

    /// Create an error
    pub fn error(s: impl Into<String>) -> Self {
        RespValue::Error(s.into())
    }

    /// Create an integer
    pub fn integer(i: i64) -> Self {
        RespValue::Integer(i)
    }

    /// Encode a boolean as :1 / :0
    pub fn boolean(b: bool) -> Self {
        RespValue::Integer(i64::from(b))
    }

    /// Create a bulk string from bytes
    pub fn bulk_string(b: impl Into<Bytes>) -> Self {
        RespValue::BulkString(b.into())
    }

    /// Create a null value
    pub fn null() -> Self {
        RespValue::Null
    }

    /// Create an array
    pub fn array(v: Vec<RespValue>) -> Self {
        RespValue::Array(v)
    }

    /// Create an array of bulk strings
    pub fn bulk_array(items: impl IntoIterator<Item = Bytes>) -> Self {
        RespValue::Array(items.into_iter().map(RespValue::BulkString).collect())
    }

    /// Check if this is an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, RespValue::Error(_))
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::SimpleString(s) => write!(f, "SimpleString({})", s),
            RespValue::Error(e) => write!(f, "Error({})", e),
            RespValue::Integer(i) => write!(f, "Integer({})", i),
            RespValue::BulkString(b) => write!(f, "BulkString({} bytes)", b.len()),
            RespValue::Null => write!(f, "Null"),
            RespValue::Array(arr) => write!(f, "Array({} elements)", arr.len()),
        }
    }
}

/// Framing errors while decoding a request
///
/// Any of these ends the connection it occurred on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A line did not start with the expected type marker
    #[error("expected '{expected}', got '{found}'")]
    UnexpectedMarker { expected: char, found: char },

    /// A length line was not a decimal integer
    #[error("invalid {0} length")]
    InvalidLength(&'static str),

    /// A length line announced a negative size
    #[error("negative {0} length")]
    NegativeLength(&'static str),

    /// A bulk body was not followed by CRLF
    #[error("missing CRLF after bulk string")]
    MissingCrlf,

    /// The pending frame grew past the configured limit
    #[error("frame exceeds {0} bytes")]
    TooLarge(usize),
}
