//! RESP2 protocol implementation
//!
//! This module handles decoding of client requests and encoding of replies
//! for the Redis Serialization Protocol (RESP2).
//! It is completely independent from other modules (loose coupling).

mod types;
mod resp;

pub use types::{Frame, FrameError, RespValue};
pub use resp::{encode_frame, RespEncoder, RespParser};
