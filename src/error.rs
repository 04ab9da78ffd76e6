//! Error types for the fieldman library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fieldman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fieldman library
///
/// Invalid field *values* never surface here: they are always corrected to
/// the declared default (or clamped) and reported as a warning through the
/// diagnostic sink. This enum covers malformed invocations and I/O only.
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete file '{path}': {source}")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to parse value '{value}' for field {field}: expected {expected}")]
    Parse {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Record '{0}' contains a line break and cannot be written as a single line")]
    EmbeddedLineBreak(String),

    // -------------------------------------------------------------------------
    // Invocation Errors
    // -------------------------------------------------------------------------
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Kind mismatch for {name}: expected {expected}, got {actual}")]
    KindMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid limits [{low}, {high}]: bounds must be finite with low <= high")]
    InvalidLimits { low: f64, high: f64 },

    #[error("Invalid field descriptor for {name}: {reason}")]
    InvalidDescriptor { name: String, reason: String },
}

impl Error {
    /// Check if this is a malformed-invocation error (API misuse, never a
    /// bad field value)
    #[must_use]
    pub fn is_malformed_invocation(&self) -> bool {
        matches!(
            self,
            Error::FieldNotFound(_)
                | Error::KindMismatch { .. }
                | Error::InvalidLimits { .. }
                | Error::InvalidDescriptor { .. }
        )
    }

    /// Check if this is a persistence I/O error
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. } | Error::FileWrite { .. } | Error::FileDelete { .. }
        )
    }
}
