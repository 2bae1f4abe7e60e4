//! Error types for tracksdb.
//!
//! Every failure the service can report is tagged with an [`ErrorCode`]; the
//! REST layer turns them into 400 responses with a short context label.

use std::fmt;

/// Error codes for every failure the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Could not open or ping the database.
    Connection,

    /// Could not begin, commit or roll back a transaction.
    Transaction,

    /// The request body is not a valid track.
    Decode,

    /// A statement failed to prepare or execute.
    Persistence,

    /// No row matches the requested id.
    NotFound,

    /// A delete affected zero rows.
    NotDeleted,

    /// The secure random source could not supply bytes for an id.
    RandomSource,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Connection => "CONNECTION_ERROR",
            ErrorCode::Transaction => "TRANSACTION_ERROR",
            ErrorCode::Decode => "DECODE_ERROR",
            ErrorCode::Persistence => "PERSISTENCE_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::NotDeleted => "NOT_DELETED",
            ErrorCode::RandomSource => "RANDOM_SOURCE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for tracksdb operations.
#[derive(Debug)]
pub struct TracksError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TracksError {
    /// Creates a new TracksError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new TracksError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a CONNECTION_ERROR.
    pub fn connection(source: sqlx::Error) -> Self {
        Self::with_source(
            ErrorCode::Connection,
            "Could not open connection to the database",
            source,
        )
    }

    /// Creates a TRANSACTION_ERROR for the given step ("start", "commit", ...).
    pub fn transaction(step: &str, source: sqlx::Error) -> Self {
        Self::with_source(
            ErrorCode::Transaction,
            format!("Could not {} transaction", step),
            source,
        )
    }

    /// Creates a DECODE_ERROR.
    pub fn decode(source: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::Decode, "Could not read track details", source)
    }

    /// Creates a PERSISTENCE_ERROR.
    pub fn persistence(message: impl Into<String>, source: sqlx::Error) -> Self {
        Self::with_source(ErrorCode::Persistence, message, source)
    }

    /// Creates a NOT_FOUND error.
    pub fn not_found(id: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("No track with id {}", id))
    }

    /// Creates a NOT_DELETED error.
    pub fn not_deleted(id: &str) -> Self {
        Self::new(
            ErrorCode::NotDeleted,
            format!("0 rows affected deleting track {}", id),
        )
    }

    /// Creates a RANDOM_SOURCE_ERROR.
    pub fn random_source(source: rand::Error) -> Self {
        Self::with_source(
            ErrorCode::RandomSource,
            "Could not generate a new ID",
            source,
        )
    }

    /// Returns true if this error has the given code.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

impl fmt::Display for TracksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for TracksError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using TracksError.
pub type Result<T> = std::result::Result<T, TracksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::Connection.as_str(), "CONNECTION_ERROR");
        assert_eq!(ErrorCode::Transaction.as_str(), "TRANSACTION_ERROR");
        assert_eq!(ErrorCode::Decode.as_str(), "DECODE_ERROR");
        assert_eq!(ErrorCode::Persistence.as_str(), "PERSISTENCE_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::NotDeleted.as_str(), "NOT_DELETED");
        assert_eq!(ErrorCode::RandomSource.as_str(), "RANDOM_SOURCE_ERROR");
    }

    #[test]
    fn not_deleted_display() {
        let err = TracksError::not_deleted("track-1a2b");
        assert!(err.to_string().contains("NOT_DELETED"));
        assert!(err.to_string().contains("track-1a2b"));
        assert!(err.is(ErrorCode::NotDeleted));
    }

    #[test]
    fn display_includes_source() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = TracksError::decode(source);
        let text = err.to_string();
        assert!(text.starts_with("[DECODE_ERROR] Could not read track details: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
