//! Error types for memkv

use crate::protocol::FrameError;
use std::time::Duration;
use thiserror::Error;

/// Main error type for memkv
#[derive(Error, Debug)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Frame(#[from] FrameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("connection reset by peer")]
    ConnectionReset,

    #[error("connection idle for more than {0:?}")]
    IdleTimeout(Duration),
}

impl Error {
    /// True when the peer simply went away, which is not worth reporting
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Error::ConnectionReset)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
