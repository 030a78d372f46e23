//! memkv - An in-memory key-value store speaking a subset of RESP2
//!
//! memkv is designed with strong cohesion and loose coupling principles:
//! - Each module has a single, well-defined responsibility
//! - Modules communicate through clear, minimal interfaces
//! - No circular dependencies between modules (the server depends on the
//!   store only through the `KeyValueStore` trait)

pub mod config;
pub mod error;
pub mod protocol;
pub mod store;
pub mod commands;
pub mod dispatch;
pub mod server;

/// Re-export commonly used types
pub use config::{Config, ServerConfig};
pub use error::{Error, Result};
pub use store::{KeyValueStore, MemoryStore, ScanOptions, ScanPage};
pub use protocol::{Frame, FrameError, RespValue};
pub use commands::{Command, CommandContext};
pub use dispatch::Dispatcher;
pub use server::Server;
