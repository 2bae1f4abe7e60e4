//! tracksdb: HTTP service for song metadata stored in a relational table.
//!
//! Each request opens one database transaction, runs a single operation on a
//! [`Track`] and commits or rolls back.
//!
//! # Modules
//!
//! - [`types`]: Core data types (Track) and id generation
//! - [`db`]: Connection pool setup and track persistence operations
//! - [`rest`]: axum router and handlers
//! - [`config`]: Runtime configuration (ServiceConfig)
//! - [`cli`]: Command-line overrides
//! - [`error`]: Error types and codes (TracksError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use tracksdb::{db, Track};
//!
//! let pool = db::connect(&config).await?;
//! let mut tx = db::begin(&pool).await?;
//!
//! let mut track = Track::new("Song A", "X", 120, 128);
//! track.create(&mut tx).await?;
//! tx.commit().await?;
//!
//! println!("created {}", track.id); // e.g. "track-1a2b"
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use config::ServiceConfig;
pub use error::{ErrorCode, Result, TracksError};
pub use types::{next_id, Track};
