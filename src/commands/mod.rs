//! Command execution module
//!
//! Provides a unified interface for all commands through the Command trait.
//! Each command group is implemented in a separate file for high cohesion.

mod context;
mod registry;

// Command implementations
mod admin;
mod key;
mod search;
mod string;

pub use context::CommandContext;
pub use registry::CommandRegistry;

use crate::protocol::RespValue;
use bytes::Bytes;

/// Command execution trait
///
/// All commands implement this trait with a single execute method.
/// This provides loose coupling between command implementations and the dispatcher.
pub trait Command: Send + Sync {
    /// Execute the command with the given context and arguments
    ///
    /// Arguments:
    /// - ctx: the command context (gives access to the store)
    /// - args: command arguments (excluding the command name itself)
    ///
    /// Returns:
    /// - RespValue representing the response to send to the client
    fn execute(&self, ctx: &CommandContext, args: &[Bytes]) -> RespValue;

    /// Get the command name (for lookup and error messages)
    fn name(&self) -> &'static str;

    /// Get the minimum number of arguments required
    fn min_args(&self) -> usize {
        0
    }

    /// Get the maximum number of arguments (None = unlimited)
    fn max_args(&self) -> Option<usize> {
        None
    }
}

/// Error reply for a command called with the wrong number of arguments
pub(crate) fn wrong_arity(name: &str) -> RespValue {
    RespValue::error(format!(
        "ERR wrong number of arguments for '{}' command",
        name.to_lowercase()
    ))
}

/// Generic syntax error reply
pub(crate) fn syntax_error() -> RespValue {
    RespValue::error("ERR syntax error")
}

/// Parse a non-negative decimal argument
pub(crate) fn parse_usize(arg: &[u8]) -> Option<usize> {
    std::str::from_utf8(arg).ok()?.parse::<usize>().ok()
}
