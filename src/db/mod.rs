//! Database access for tracksdb.
//!
//! The service talks to its database through sqlx's `Any` driver so the same
//! statements run against MySQL in production and SQLite locally and in tests.
//!
//! # Tables
//!
//! * `Tracks` - one row per [`Track`](crate::types::Track), keyed by its string id.

pub mod tracks;

use std::time::Duration;

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::{Any, AnyPool, Connection, Transaction};
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::error::{Result, TracksError};

/// How long a request waits for a free pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// DDL for the `Tracks` table, portable across MySQL and SQLite.
const CREATE_TRACKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS Tracks (
    id VARCHAR(64) NOT NULL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    artist VARCHAR(255) NOT NULL,
    length BIGINT NOT NULL,
    bpm BIGINT NOT NULL
)";

/// Opens the process-wide connection pool and verifies it with a ping.
///
/// # Errors
///
/// Returns a CONNECTION_ERROR if the database cannot be reached.
pub async fn connect(config: &ServiceConfig) -> Result<AnyPool> {
    install_default_drivers();

    let url = config.database_url();
    info!(
        url = %config.redacted_database_url(),
        max_connections = config.max_connections,
        "Connecting to database"
    );

    let pool = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&url)
        .await
        .map_err(TracksError::connection)?;

    ping(&pool).await?;
    Ok(pool)
}

/// Checks that a pooled connection is alive.
pub async fn ping(pool: &AnyPool) -> Result<()> {
    let mut conn = pool.acquire().await.map_err(TracksError::connection)?;
    conn.ping().await.map_err(TracksError::connection)?;
    debug!("Database ping ok");
    Ok(())
}

/// Creates the `Tracks` table when it does not exist yet.
pub async fn ensure_schema(pool: &AnyPool) -> Result<()> {
    sqlx::query(CREATE_TRACKS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| TracksError::persistence("Could not create Tracks table", e))?;
    Ok(())
}

/// Starts a transaction on a pooled connection.
pub async fn begin(pool: &AnyPool) -> Result<Transaction<'static, Any>> {
    pool.begin()
        .await
        .map_err(|e| TracksError::transaction("start", e))
}

/// Opens a single-connection in-memory SQLite pool with the schema in place.
///
/// The connection is never recycled, since dropping it would drop the database.
#[cfg(test)]
pub(crate) async fn memory_pool() -> AnyPool {
    install_default_drivers();
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    ensure_schema(&pool).await.expect("schema");
    pool
}
