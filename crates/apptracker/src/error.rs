//! Error types for apptracker.
//!
//! This module defines all error types used throughout the apptracker crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for apptracker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// Failed to read the data file.
    #[error("failed to read data file {path}: {source}")]
    StoreRead {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the data file.
    #[error("failed to write data file {path}: {source}")]
    StoreWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but its contents could not be parsed.
    #[error("data file {path} is corrupt: {source}")]
    StoreCorrupt {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Errors ===
    /// A cost value was not a number.
    #[error("Cost must be a number (got '{input}')")]
    InvalidCost {
        /// The text that failed to parse.
        input: String,
    },

    /// A date value was not in `YYYY-MM-DD` form.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The text that failed to parse.
        input: String,
    },

    /// A recommender entry could not be parsed.
    #[error("invalid recommender '{input}': {message}")]
    InvalidRecommender {
        /// The recommender text as given.
        input: String,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for apptracker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid cost error.
    #[must_use]
    pub fn invalid_cost(input: impl Into<String>) -> Self {
        Self::InvalidCost {
            input: input.into(),
        }
    }

    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Create an invalid recommender error.
    #[must_use]
    pub fn invalid_recommender(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecommender {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from user input rather than the environment.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCost { .. } | Self::InvalidDate { .. } | Self::InvalidRecommender { .. }
        )
    }

    /// Check if this error means the data file could not be parsed.
    #[must_use]
    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, Self::StoreCorrupt { .. })
    }
}
