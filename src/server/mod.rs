//! Server module
//!
//! Handles TCP connections and manages the accept loop.
//! This module is responsible for accepting connections and delegating
//! command processing to the dispatcher.

mod connection;

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::store::KeyValueStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub use connection::Connection;

/// A bound RESP server
///
/// One dispatcher, and through it one store, is shared by every connection.
pub struct Server {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    config: ServerConfig,
}

impl Server {
    /// Bind the listening socket
    ///
    /// Failing to bind is fatal to the caller; there is nothing to retry.
    pub async fn bind(config: ServerConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let listener = TcpListener::bind(config.listen_addr()).await?;
        info!("memkv RESP server listening on {}", listener.local_addr()?);

        Ok(Server {
            listener,
            dispatcher: Arc::new(Dispatcher::new(store)),
            config,
        })
    }

    /// The address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` is cancelled
    ///
    /// Each connection runs in its own task. An accept failure ends the loop
    /// with an error.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        loop {
            // Accept incoming connections
            let (socket, addr) = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Listener shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => accepted?,
            };
            info!("New RESP connection from {}", addr);

            let dispatcher = Arc::clone(&self.dispatcher);
            let config = self.config.clone();
            let shutdown = shutdown.clone();

            // Spawn a new task to handle this connection
            tokio::spawn(async move {
                let mut connection = Connection::new(socket, &config);

                tokio::select! {
                    result = connection.handle(&dispatcher) => match result {
                        Err(e) if e.is_disconnect() => debug!("{} disconnected: {}", addr, e),
                        Err(e) => error!("Connection error from {}: {}", addr, e),
                        Ok(()) => {}
                    },
                    _ = shutdown.cancelled() => {
                        debug!("Dropping connection {} on shutdown", addr);
                    }
                }

                info!("Connection closed: {}", addr);
            });
        }
    }
}
