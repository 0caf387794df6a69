//! Error types for searchsnap operations.
//!
//! The pipeline is batch-oriented: no error here is meant to abort a run.
//! Callers either skip the failing keyword and continue, or degrade to an
//! empty snippet, matching the priority of batch throughput over
//! single-keyword completeness.

use thiserror::Error;

/// The main error type for searchsnap operations.
#[derive(Debug, Error)]
pub enum SnapError {
    /// An HTTP request failed (network, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search API returned a non-success status.
    #[error("Search API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Body or reason phrase accompanying the status.
        message: String,
    },

    /// YAML serialization or deserialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error while persisting or loading records.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration was invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required credential was absent from the key file.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// A response arrived but carried no usable content.
    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

impl SnapError {
    /// Creates an API error from a status code and message.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates a missing credential error.
    #[must_use]
    pub fn missing_credential(name: impl Into<String>) -> Self {
        Self::MissingCredential(name.into())
    }

    /// Creates an empty response error.
    #[must_use]
    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::EmptyResponse(message.into())
    }
}
