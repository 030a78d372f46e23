//! Command registry
//!
//! Centralized registry for all available commands.
//! This allows loose coupling between command implementations and the dispatcher.

use super::{admin, key, search, string, Command};
use std::collections::HashMap;

/// Registry of all available commands
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new command registry and register all commands
    pub fn new() -> Self {
        let mut registry = CommandRegistry {
            commands: HashMap::new(),
        };

        // Connection commands
        registry.register(Box::new(admin::PingCommand));

        // String commands
        registry.register(Box::new(string::GetCommand));
        registry.register(Box::new(string::SetCommand));

        // Key commands
        registry.register(Box::new(key::DelCommand));
        registry.register(Box::new(key::ExistsCommand));

        // Search commands
        registry.register(Box::new(search::KeysCommand));
        registry.register(Box::new(search::ScanCommand));

        registry
    }

    /// Register a command
    fn register(&mut self, command: Box<dyn Command>) {
        let name = command.name().to_uppercase();
        self.commands.insert(name, command);
    }

    /// Get a command by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(&name.to_uppercase()).map(|cmd| cmd.as_ref())
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if no command is registered
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = CommandRegistry::new();

        assert_eq!(registry.get("get").map(|c| c.name()), Some("GET"));
        assert_eq!(registry.get("Scan").map(|c| c.name()), Some("SCAN"));
        assert!(registry.get("NOPE").is_none());
    }

    #[test]
    fn test_all_commands_registered() {
        let registry = CommandRegistry::new();

        for name in ["PING", "GET", "SET", "DEL", "EXISTS", "KEYS", "SCAN"] {
            assert!(registry.get(name).is_some(), "{} missing", name);
        }
        assert_eq!(registry.len(), 7);
        assert!(!registry.is_empty());
    }
}
