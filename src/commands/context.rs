//! Command execution context

use crate::store::{KeyValueStore, MemoryStore};
use std::sync::Arc;

/// Context provided to commands during execution
///
/// Commands only see the store through the `KeyValueStore` trait, so any
/// implementation can be substituted.
#[derive(Clone)]
pub struct CommandContext {
    /// The shared store
    pub store: Arc<dyn KeyValueStore>,
}

impl CommandContext {
    /// Create a context over an existing store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        CommandContext { store }
    }

    /// Create a context over a fresh, empty memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::in_memory()
    }
}
