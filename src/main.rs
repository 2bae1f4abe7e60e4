//! tracksdb: HTTP service for track metadata.
//!
//! Reads database settings from the environment (and `.env`), opens the
//! connection pool once, and serves the REST API until Ctrl-C or SIGTERM.

use anyhow::{bail, Context};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tracksdb::cli::Cli;
use tracksdb::config::ServiceConfig;
use tracksdb::db;
use tracksdb::rest::{run_server, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse_args();
    let config = cli.apply(ServiceConfig::from_env());
    if let Some(msg) = config.validate() {
        bail!("Invalid configuration: {}", msg);
    }

    let pool = db::connect(&config)
        .await
        .context("Could not open connection to the database")?;
    db::ensure_schema(&pool).await?;

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Could not listen on {}", config.listen_addr))?;

    let result = run_server(listener, AppState::new(pool.clone())).await;

    info!("Closing database pool");
    pool.close().await;

    result.context("HTTP server failed")
}

/// Installs the global tracing subscriber, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
