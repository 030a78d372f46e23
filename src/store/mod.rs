//! In-memory storage module
//!
//! Provides the key-value map shared by every connection, and the narrow
//! capability interface the rest of the server talks to.
//! This module is independent of protocol and command handling (loose coupling).

mod memory;
mod pattern;

pub use memory::MemoryStore;
pub use pattern::matches as matches_pattern;

use bytes::Bytes;

/// The only value type held by the store
pub const STRING_TYPE: &str = "string";

/// Capability interface between the server and a store implementation
///
/// Every operation is atomic with respect to the others. Implementations
/// must never block on anything but their own short critical sections.
pub trait KeyValueStore: Send + Sync {
    /// Insert or overwrite a key
    fn set(&self, key: Bytes, value: Bytes);

    /// Get the value of a key, None if absent
    fn get(&self, key: &[u8]) -> Option<Bytes>;

    /// Delete a key, returns true if the key existed
    fn del(&self, key: &[u8]) -> bool;

    /// Check whether a key is present
    fn exists(&self, key: &[u8]) -> bool;

    /// Snapshot of every key, in no particular order
    fn keys(&self) -> Vec<Bytes>;

    /// Walk one page of keys starting at `cursor`
    fn scan(&self, cursor: usize, options: &ScanOptions) -> ScanPage;
}

/// Filters and page size for a SCAN call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Glob pattern, empty matches every key
    pub pattern: Bytes,

    /// Maximum number of matches per page (0 = no cap)
    pub count: usize,

    /// Value type filter, empty matches every key
    pub key_type: String,
}

impl ScanOptions {
    /// Options that match every key with no page cap
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the glob pattern
    pub fn with_pattern(mut self, pattern: impl Into<Bytes>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set the page cap
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the type filter
    pub fn with_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = key_type.into();
        self
    }

    /// Whether the type filter admits string values
    pub fn admits_strings(&self) -> bool {
        self.key_type.is_empty() || self.key_type.eq_ignore_ascii_case(STRING_TYPE)
    }

    /// Whether a key passes the pattern filter
    pub fn matches(&self, key: &[u8]) -> bool {
        self.pattern.is_empty() || matches_pattern(&self.pattern, key)
    }
}

/// One page of a SCAN enumeration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor to resume from, 0 once the enumeration is complete
    pub cursor: usize,

    /// Matching keys found on this page
    pub keys: Vec<Bytes>,
}

impl ScanPage {
    /// The terminal page: cursor 0, no keys
    pub fn done() -> Self {
        Self::default()
    }

    /// Whether this page ends the enumeration
    pub fn is_done(&self) -> bool {
        self.cursor == 0
    }
}
