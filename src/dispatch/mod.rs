//! Command dispatcher
//!
//! Routes incoming frames to the appropriate handler.
//! This module provides loose coupling between the server and command implementations.

use crate::commands::{wrong_arity, CommandContext, CommandRegistry};
use crate::protocol::{Frame, RespValue};
use crate::store::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Command dispatcher
///
/// Receives decoded frames, validates them, and routes to appropriate handlers.
/// Dispatching only needs `&self`: the store does its own locking, so one
/// dispatcher is shared by every connection.
pub struct Dispatcher {
    /// Command registry
    registry: CommandRegistry,

    /// Command execution context
    context: CommandContext,
}

impl Dispatcher {
    /// Create a dispatcher over the given store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Dispatcher {
            registry: CommandRegistry::new(),
            context: CommandContext::new(store),
        }
    }

    /// Create a dispatcher over a fresh memory store
    pub fn in_memory() -> Self {
        Dispatcher {
            registry: CommandRegistry::new(),
            context: CommandContext::in_memory(),
        }
    }

    /// Dispatch a command
    ///
    /// Looks up the command by its (case-insensitive) name, checks the
    /// argument count, then runs the handler. Every failure at this level is
    /// an error reply; the connection stays usable.
    pub fn dispatch(&self, frame: &Frame) -> RespValue {
        let Some(name) = frame.name() else {
            return RespValue::error("ERR empty command");
        };
        let cmd_name = String::from_utf8_lossy(name);

        debug!("Dispatching command: {}", cmd_name);

        // Look up the command
        let command = match self.registry.get(&cmd_name) {
            Some(cmd) => cmd,
            None => {
                warn!("Unknown command: {}", cmd_name);
                return RespValue::error(format!("ERR unknown command '{}'", cmd_name));
            }
        };

        // Extract arguments (everything after the command name)
        let cmd_args = frame.args();

        // Validate argument count
        if cmd_args.len() < command.min_args() {
            return wrong_arity(command.name());
        }

        if let Some(max) = command.max_args() {
            if cmd_args.len() > max {
                return wrong_arity(command.name());
            }
        }

        // Execute the command
        command.execute(&self.context, cmd_args)
    }

    /// Get reference to the context (for testing/inspection)
    pub fn context(&self) -> &CommandContext {
        &self.context
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::in_memory()
    }
}
