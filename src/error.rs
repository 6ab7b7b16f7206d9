//! Unified error types for redsheet.
//!
//! Deck loading is the only operation that can fail in a user-visible way;
//! everything else (unroutable fragments, missing optional fields) is
//! normalized into a valid view state rather than surfaced as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for redsheet operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeckError {
    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors during deck parsing
    #[error("Failed to parse deck: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Deck invariant violations
    #[error("Invalid deck: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in topic {topic}")]
    MissingField { field: String, topic: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for redsheet operations
pub type Result<T> = std::result::Result<T, DeckError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DeckError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a validation error for a duplicate topic id
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::Validation(format!("duplicate topic id: {}", id.into()))
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeckError::duplicate_id("t-01");
        let display = err.to_string();
        assert!(
            display.contains("duplicate") && display.contains("t-01"),
            "Error message should name the duplicate id: {}",
            display
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DeckError::io("/path/to/topics.json", io_err);

        assert!(err.to_string().contains("/path/to/topics.json"));
    }

    #[test]
    fn test_json_error_conversion() {
        let bad: std::result::Result<Vec<i32>, _> = serde_json::from_str("not json");
        let err: DeckError = bad.unwrap_err().into();
        assert!(matches!(err, DeckError::Parse { .. }));
    }
}
