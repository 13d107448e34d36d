mod app;
mod config;
mod context;
#[cfg_attr(feature = "dynamodb", allow(dead_code))]
mod demo_data;
mod engine;
mod handlers;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use listenfd::ListenFd;
use moviedb_auth::{AuthConfig, AuthState};
use moviedb_core::storage::CatalogRepository;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, config::Config, state::AppState};

/// moviedb - Movie catalog API
#[derive(Parser, Debug)]
#[command(name = "moviedb")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "moviedb=debug,moviedb_auth=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let repository = init_repository(&config).await?;

    let auth = AuthState::new(AuthConfig::from_env())
        .await
        .context("failed to initialize session authorizer")?;

    let state = AppState::new(repository, auth, &config);
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Creates the process-wide repository handle.
#[cfg(feature = "inmemory")]
async fn init_repository(_config: &Config) -> Result<Arc<dyn CatalogRepository>> {
    let repository = storage::InMemoryRepository::with_items(demo_data::demo_catalog())
        .context("failed to load demo catalog")?;
    tracing::info!(
        items = repository.len().await,
        "Using in-memory store with demo catalog"
    );
    Ok(Arc::new(repository))
}

/// Creates the process-wide repository handle.
#[cfg(feature = "dynamodb")]
async fn init_repository(config: &Config) -> Result<Arc<dyn CatalogRepository>> {
    let repository = storage::DynamoDbRepository::connect(&config.table_name).await;
    tracing::info!(table = %repository.table_name(), "Using DynamoDB store");
    Ok(Arc::new(repository))
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
