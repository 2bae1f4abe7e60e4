//! Error responses for the REST layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::TracksError;

/// Label for failures to reach the database or start a transaction.
pub const DB_CONNECTION_ISSUE: &str = "Issue with database connection";

/// Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A failed request: the error plus a short label naming what was attempted.
///
/// Every failure is answered with 400 and a plain-text body
/// `"<context>: <error>"`.
#[derive(Debug)]
pub struct ApiError {
    /// What the handler was trying to do, e.g. "Could not find track".
    pub context: &'static str,
    /// The underlying failure.
    pub error: TracksError,
}

impl ApiError {
    /// Wraps an error with a context label.
    pub fn new(context: &'static str, error: TracksError) -> Self {
        Self { context, error }
    }

    /// Returns a closure wrapping errors with `context`, for use with `map_err`.
    pub fn with_context(context: &'static str) -> impl FnOnce(TracksError) -> Self {
        move |error| Self::new(context, error)
    }

    /// Returns the response body text.
    pub fn body(&self) -> String {
        format!("{}: {}", self.context, self.error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(code = %self.error.code, context = self.context, error = %self.error, "Request failed");
        (StatusCode::BAD_REQUEST, self.body()).into_response()
    }
}
