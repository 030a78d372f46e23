//! Configuration for memkv
//!
//! Resolved in layers: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags (applied by the binary).

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default listening port for the protocol family
pub const DEFAULT_PORT: u16 = 6379;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on
    pub bind: String,

    /// TCP port to listen on
    pub port: u16,

    /// Initial read buffer size per connection (bytes)
    pub read_buffer_size: usize,

    /// Close connections idle for this long (0 = never)
    pub idle_timeout_secs: u64,

    /// Reject requests whose pending bytes exceed this size (0 = unlimited)
    pub max_frame_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            read_buffer_size: 4096,
            idle_timeout_secs: 0,
            max_frame_size: 0,
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Idle timeout, None when disabled
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    /// Frame size limit, None when disabled
    pub fn frame_limit(&self) -> Option<usize> {
        (self.max_frame_size > 0).then_some(self.max_frame_size)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from environment variables or use defaults
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides
    ///
    /// Recognized: REDIS_PORT, MEMKV_BIND, MEMKV_IDLE_TIMEOUT_SECS,
    /// MEMKV_MAX_FRAME_SIZE. Unparsable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = lookup("REDIS_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }

        if let Some(bind) = lookup("MEMKV_BIND") {
            self.server.bind = bind;
        }

        if let Some(secs) = lookup("MEMKV_IDLE_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.server.idle_timeout_secs = secs;
        }

        if let Some(size) = lookup("MEMKV_MAX_FRAME_SIZE").and_then(|v| v.parse().ok()) {
            self.server.max_frame_size = size;
        }

        self
    }
}
