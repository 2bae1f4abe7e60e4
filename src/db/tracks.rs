//! Persistence operations for [`Track`].
//!
//! Every operation runs on a transaction owned by the caller; nothing here
//! commits or rolls back.
//!
//! `update` and `delete` treat a missing row differently: `update` succeeds
//! without touching anything, `delete` fails with NOT_DELETED. Callers rely on
//! both behaviors.

use sqlx::{Any, Transaction};
use tracing::debug;

use crate::error::{Result, TracksError};
use crate::types::{next_id, Track, TRACK_ID_PREFIX};

const INSERT_TRACK: &str =
    "INSERT INTO Tracks (id, name, artist, length, bpm) VALUES (?, ?, ?, ?, ?)";
const UPDATE_TRACK: &str =
    "UPDATE Tracks SET name = ?, artist = ?, length = ?, bpm = ? WHERE id = ?";
const DELETE_TRACK: &str = "DELETE FROM Tracks WHERE id = ?";
const SELECT_TRACK: &str = "SELECT id, name, artist, length, bpm FROM Tracks WHERE id = ?";
const SELECT_ALL_TRACKS: &str =
    "SELECT id, name, artist, length, bpm FROM Tracks ORDER BY id DESC";

impl Track {
    /// Inserts the track under a freshly generated id and stores that id in `self`.
    ///
    /// `self.id` is left untouched if anything fails.
    pub async fn create(&mut self, tx: &mut Transaction<'_, Any>) -> Result<()> {
        let id = next_id(TRACK_ID_PREFIX)?;

        sqlx::query(INSERT_TRACK)
            .bind(&id)
            .bind(&self.name)
            .bind(&self.artist)
            .bind(self.length)
            .bind(self.bpm)
            .execute(&mut **tx)
            .await
            .map_err(|e| TracksError::persistence("Could not persist track", e))?;

        debug!(track_id = %id, "Track created");
        self.id = id;
        Ok(())
    }

    /// Loads the row with the given id into `self`, overwriting every field.
    pub async fn find(&mut self, tx: &mut Transaction<'_, Any>, id: &str) -> Result<()> {
        let row = sqlx::query_as::<_, Track>(SELECT_TRACK)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| TracksError::persistence("Could not read row from DB", e))?;

        match row {
            Some(track) => {
                *self = track;
                Ok(())
            }
            None => Err(TracksError::not_found(id)),
        }
    }

    /// Returns every track, ordered by id descending.
    ///
    /// Ids are compared as strings, so `track-f0` comes before `track-20`.
    pub async fn find_all(tx: &mut Transaction<'_, Any>) -> Result<Vec<Track>> {
        sqlx::query_as::<_, Track>(SELECT_ALL_TRACKS)
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| TracksError::persistence("Could not find tracks", e))
    }

    /// Overwrites every field except the id on the row matching `self.id`.
    ///
    /// Succeeds even when no row has that id.
    pub async fn update(&self, tx: &mut Transaction<'_, Any>) -> Result<()> {
        let result = sqlx::query(UPDATE_TRACK)
            .bind(&self.name)
            .bind(&self.artist)
            .bind(self.length)
            .bind(self.bpm)
            .bind(&self.id)
            .execute(&mut **tx)
            .await
            .map_err(|e| TracksError::persistence("Could not persist track", e))?;

        debug!(
            track_id = %self.id,
            rows_affected = result.rows_affected(),
            "Track updated"
        );
        Ok(())
    }

    /// Deletes the row matching `self.id`.
    ///
    /// Fails with NOT_DELETED when no row has that id.
    pub async fn delete(&self, tx: &mut Transaction<'_, Any>) -> Result<()> {
        let result = sqlx::query(DELETE_TRACK)
            .bind(&self.id)
            .execute(&mut **tx)
            .await
            .map_err(|e| TracksError::persistence("Could not delete track", e))?;

        if result.rows_affected() == 0 {
            return Err(TracksError::not_deleted(&self.id));
        }

        debug!(track_id = %self.id, "Track deleted");
        Ok(())
    }
}
