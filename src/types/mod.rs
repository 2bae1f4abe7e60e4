//! Core types for tracksdb.
//!
//! - [`Track`]: the song-metadata entity
//! - [`next_id`]: random `"<prefix>-<hex>"` identifiers

mod ids;
mod track;

pub use ids::{format_id, next_id, next_id_with};
pub use track::{Track, TRACK_ID_PREFIX};
