//! Track type representing one row of the `Tracks` table.
//!
//! A Track is song metadata. Its id is assigned by [`Track::create`] and never
//! changes afterwards.
//!
//! [`Track::create`]: crate::types::Track::create

use serde::{Deserialize, Serialize};

/// Prefix used for every generated track id.
pub const TRACK_ID_PREFIX: &str = "track";

/// Song metadata stored in the `Tracks` table.
///
/// Decoding is lenient in the same way for every field: anything missing from
/// a request body falls back to its zero value, so a create request can omit
/// `id` entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Track {
    /// Primary key, `"track-<hex>"`. Empty until the track is created.
    pub id: String,

    /// Track title.
    pub name: String,

    /// Performing artist.
    pub artist: String,

    /// Duration in seconds.
    pub length: i64,

    /// Beats per minute.
    pub bpm: i64,
}

impl Track {
    /// Creates a track that has not been persisted yet.
    pub fn new(name: impl Into<String>, artist: impl Into<String>, length: i64, bpm: i64) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            artist: artist.into(),
            length,
            bpm,
        }
    }

    /// Creates an empty track carrying only an id, as used for lookups and deletes.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns true once the track has been assigned an id.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}
