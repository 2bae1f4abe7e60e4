//! HTTP handlers.
//!
//! Each handler runs one transaction: committed when the track operation
//! succeeds, rolled back on any failure. DELETE commits the delete and then
//! looks the id up again in a second transaction.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use sqlx::{Any, AnyPool, Transaction};
use tracing::{debug, info, warn};

use crate::db;
use crate::error::{ErrorCode, Result, TracksError};
use crate::types::Track;

use super::server::AppState;
use super::types::{ApiError, ApiResult, DB_CONNECTION_ISSUE};

/// Redirects `/` to the track listing.
pub async fn home() -> Redirect {
    Redirect::temporary("/tracks")
}

/// Lists every track.
pub async fn list_tracks(State(state): State<AppState>) -> ApiResult<Json<Vec<Track>>> {
    let mut tx = db::begin(&state.pool)
        .await
        .map_err(ApiError::with_context(DB_CONNECTION_ISSUE))?;

    let result = Track::find_all(&mut tx).await;
    let tracks = finish(tx, result)
        .await
        .map_err(ApiError::with_context("Could not find tracks"))?;

    debug!(count = tracks.len(), "Listed tracks");
    Ok(Json(tracks))
}

/// Creates a track from the JSON body and returns it with its new id.
pub async fn create_track(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Track>> {
    let mut track =
        decode_track(&body).map_err(ApiError::with_context("Could not read track details"))?;

    let mut tx = db::begin(&state.pool)
        .await
        .map_err(ApiError::with_context(DB_CONNECTION_ISSUE))?;

    let result = track.create(&mut tx).await;
    finish(tx, result)
        .await
        .map_err(ApiError::with_context("Could not create track"))?;

    info!(track_id = %track.id, "Track created");
    Ok(Json(track))
}

/// Fetches one track.
pub async fn find_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Track>> {
    let mut tx = db::begin(&state.pool)
        .await
        .map_err(ApiError::with_context(DB_CONNECTION_ISSUE))?;

    let mut track = Track::default();
    let result = track.find(&mut tx, &id).await;
    finish(tx, result)
        .await
        .map_err(ApiError::with_context("Could not find track"))?;

    Ok(Json(track))
}

/// Overwrites a track with the JSON body.
///
/// The body carries the full record. Its `id` is the one updated; the path id
/// is only used when the body has none.
pub async fn update_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Track>> {
    let mut track = decode_track(&body).map_err(ApiError::with_context("Invalid request"))?;
    if !track.is_persisted() {
        track.id = id;
    }

    let mut tx = db::begin(&state.pool)
        .await
        .map_err(ApiError::with_context(DB_CONNECTION_ISSUE))?;

    let result = track.update(&mut tx).await;
    finish(tx, result)
        .await
        .map_err(ApiError::with_context("Could not update track"))?;

    info!(track_id = %track.id, "Track updated");
    Ok(Json(track))
}

/// Deletes a track and verifies it can no longer be found.
pub async fn delete_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut tx = db::begin(&state.pool)
        .await
        .map_err(ApiError::with_context(DB_CONNECTION_ISSUE))?;

    let result = Track::with_id(id.clone()).delete(&mut tx).await;
    finish(tx, result)
        .await
        .map_err(ApiError::with_context("Could not delete track"))?;

    confirm_deleted(&state.pool, &id).await?;
    info!(track_id = %id, "Track deleted");
    Ok(StatusCode::OK)
}

/// Looks `id` up in a fresh transaction and succeeds only if it is gone.
async fn confirm_deleted(pool: &AnyPool, id: &str) -> ApiResult<()> {
    let mut tx = db::begin(pool)
        .await
        .map_err(ApiError::with_context(DB_CONNECTION_ISSUE))?;

    let mut track = Track::default();
    let lookup = track.find(&mut tx, id).await;

    match finish(tx, lookup).await {
        Err(err) if err.is(ErrorCode::NotFound) => Ok(()),
        Err(err) => Err(ApiError::new("Could not delete track", err)),
        Ok(()) => Err(ApiError::new(
            "Track was not deleted",
            TracksError::not_deleted(&track.id),
        )),
    }
}

/// Decodes a request body into a track.
fn decode_track(body: &[u8]) -> Result<Track> {
    serde_json::from_slice(body).map_err(TracksError::decode)
}

/// Commits `tx` if `result` is Ok, rolls it back otherwise.
///
/// A failed rollback is logged; the operation's own error is what gets returned.
async fn finish<T>(tx: Transaction<'static, Any>, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| TracksError::transaction("commit", e))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Could not roll back transaction");
            }
            Err(err)
        }
    }
}
