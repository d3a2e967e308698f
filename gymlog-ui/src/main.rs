//! gymlog-ui - Workout logging dashboard service
//!
//! Serves the record form, bulk import/export, chart data and the SSE event
//! mirror over HTTP. Storage backend (SQLite or flat file), credentials and
//! the outbound channel are configured in `gymlog.toml` under the root
//! folder.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gymlog_common::auth;
use gymlog_common::config::{self, Config, ConfigOverrides, StorageBackend};
use gymlog_common::db;
use gymlog_common::events::EventBus;
use gymlog_common::publish::ChannelPublisher;
use gymlog_common::store::{FileStore, RecordStore, SqliteStore};
use gymlog_ui::{build_router, AppState};
use tokio::signal;
use tracing::info;

/// Command-line arguments for gymlog-ui
#[derive(Parser, Debug)]
#[command(name = "gymlog-ui")]
#[command(about = "Workout logging dashboard service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "GYMLOG_PORT")]
    port: Option<u16>,

    /// Root folder holding config, database and log files
    #[arg(short, long, env = "GYMLOG_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// SQLite database path (overrides config file)
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Resolve configuration before tracing init so the configured log level
    // can seed the filter; RUST_LOG still wins when set.
    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder).context("Failed to create root folder")?;

    let cfg = Config::load(
        root_folder,
        ConfigOverrides {
            port: args.port,
            database_path: args.database,
        },
    )
    .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level)),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting gymlog dashboard (gymlog-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    info!("Root folder: {}", cfg.root_folder.display());
    match &cfg.config_file {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: built-in defaults (no gymlog.toml found)"),
    }

    let store = match cfg.storage {
        StorageBackend::Sqlite => {
            let pool = db::init_database(&cfg.database_path)
                .await
                .context("Failed to initialize database")?;
            info!("✓ Connected to database: {}", cfg.database_path.display());
            RecordStore::Sqlite(SqliteStore::new(pool))
        }
        StorageBackend::File => {
            info!("✓ Using flat-file store in {}", cfg.root_folder.display());
            RecordStore::File(FileStore::new(&cfg.root_folder))
        }
    };

    let credentials = match &cfg.credentials_file {
        Some(path) => {
            let credentials =
                auth::load_credentials(path).context("Failed to load credentials file")?;
            info!("✓ Loaded credentials for {} user(s)", credentials.users.len());
            Some(Arc::new(credentials))
        }
        None => {
            info!("No credentials file configured - single-user mode, authentication disabled");
            None
        }
    };

    let publisher = match &cfg.channel_url {
        Some(url) => {
            // A configured channel that cannot be set up ends the session here
            let publisher = ChannelPublisher::new(url, &cfg.channel_name)
                .context("Failed to initialize channel publisher")?;
            info!(
                "✓ Publishing new sets to channel '{}' at {}",
                cfg.channel_name, url
            );
            publisher
        }
        None => {
            info!("No channel configured - publishing disabled");
            ChannelPublisher::disabled()
        }
    };

    let state = AppState::new(store, EventBus::new(256), publisher, credentials);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("gymlog-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
