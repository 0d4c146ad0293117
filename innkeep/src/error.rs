//! Error types for the innkeep library.
//!
//! This module provides the error hierarchy for all engine operations,
//! using `thiserror` for ergonomic error handling. Every variant belongs to
//! one [`ErrorCategory`], which is what presentation layers use to decide
//! between a field-specific message, a "no longer available" notice, or a
//! generic failure.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A date range was malformed, empty or inverted.
    #[error("invalid stay {start}..{end}: {reason}")]
    InvalidStay {
        /// The start date as supplied.
        start: String,
        /// The end date as supplied.
        end: String,
        /// The reason the range is invalid.
        reason: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A write would violate the no-double-booking invariant.
    #[error("conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path could not be used.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// Stored data violates an integrity rule.
    #[error("data integrity violation: {details}")]
    Integrity {
        /// Details about the violation.
        details: String,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed input, inverted date range or unknown id.
    Validation,
    /// The requested interval is already taken.
    Conflict,
    /// Connection, query, lock or integrity failure.
    Storage,
    /// Invalid configuration.
    Configuration,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Conflict => write!(f, "conflict"),
            Self::Storage => write!(f, "storage"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<crate::stay::InvalidStayError> for Error {
    fn from(err: crate::stay::InvalidStayError) -> Self {
        Self::InvalidStay {
            start: err.start,
            end: err.end,
            reason: err.reason,
        }
    }
}

impl Error {
    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Error, ErrorCategory};
    ///
    /// let err = Error::Conflict { details: "room 1 is taken".into() };
    /// assert_eq!(err.category(), ErrorCategory::Conflict);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::InvalidStay { .. } | Self::NotFound { .. } => {
                ErrorCategory::Validation
            }
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Database(_)
            | Self::Io(_)
            | Self::InvalidPath { .. }
            | Self::LockTimeout { .. }
            | Self::UnsupportedSchemaVersion { .. }
            | Self::Integrity { .. } => ErrorCategory::Storage,
        }
    }

    /// Check if error indicates the interval is no longer available.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if error indicates a missing record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
