use clap::Parser;
use memkv::{server::Server, Config, KeyValueStore, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// memkv server
#[derive(Parser, Debug)]
#[command(name = "memkv")]
#[command(about = "In-memory key-value store speaking a subset of RESP2")]
#[command(version)]
struct Args {
    /// TCP port to listen on (overrides REDIS_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind (overrides MEMKV_BIND)
    #[arg(short, long)]
    bind: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("memkv starting...");

    // Defaults, then file, then environment, then flags
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(path)?.with_env_overrides()
        }
        None => Config::from_env(),
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    info!("Configuration: {:?}", config);

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let server = match Server::bind(config.server.clone(), store).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to bind {}: {}", config.server.listen_addr(), e);
            std::process::exit(1);
        }
    };
    info!("Use 'redis-cli -p {}' to connect", config.server.port);

    // Ctrl-C stops the accept loop and open connections
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C, shutting down");
                signal_token.cancel();
            }
            Err(e) => error!("Unable to listen for Ctrl-C: {}", e),
        }
    });

    if let Err(e) = server.run(shutdown).await {
        error!("RESP server error: {}", e);
        return Err(e.into());
    }

    info!("memkv stopped");
    Ok(())
}
