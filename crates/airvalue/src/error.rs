//! Error types for airvalue.
//!
//! This module defines all error types used throughout the airvalue crate,
//! providing detailed context for debugging and user-friendly error messages.

use thiserror::Error;

/// The main error type for airvalue operations.
#[derive(Error, Debug)]
pub enum Error {
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

    // === Lookup Errors ===
    /// The HTTP request to the station directory failed.
    #[error("station directory request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The station directory answered, but not with a usable result.
    #[error("station directory rejected the search for '{keyword}': {message}")]
    UpstreamRejected {
        /// The keyword that was searched.
        keyword: String,
        /// Description of the rejection.
        message: String,
    },

    /// No directory token has been configured.
    #[error("no station directory token configured (set lookup.token or AIRVALUE_LOOKUP__TOKEN)")]
    MissingToken,

    // === Assessment Errors ===
    /// No usable area was selected when the assessment was submitted.
    #[error("Please select a valid area before proceeding.")]
    MissingArea,

    /// The household profile cannot produce an estimate.
    #[error("invalid input data: {reason}")]
    InvalidInput {
        /// Why the input was rejected.
        reason: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for airvalue operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an upstream rejection error.
    #[must_use]
    pub fn upstream_rejected(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamRejected {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Check if this error means the area was missing at submission.
    #[must_use]
    pub fn is_missing_area(&self) -> bool {
        matches!(self, Self::MissingArea)
    }

    /// Check if this error came from talking to the station directory.
    ///
    /// These are the failures a lookup swallows and reports as "no data".
    #[must_use]
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::UpstreamRejected { .. } | Self::MissingToken | Self::Json(_)
        )
    }
}
