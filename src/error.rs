//! Error types for the Life Harness client
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Life Harness client operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session management, API calls, and
/// interview input validation.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// API errors carrying the HTTP status and the server's detail message
    #[error("API error ({status}): {detail}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Server-provided detail message, or a generic fallback
        detail: String,
    },

    /// Authentication errors (missing or rejected credentials)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Answer validation errors (blocked before any request is sent)
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl HarnessError {
    /// Build an [`HarnessError::Api`] from a status code and an optional
    /// server detail, falling back to a generic message when the server
    /// body carried none.
    pub fn api(status: u16, detail: Option<String>) -> Self {
        Self::Api {
            status,
            detail: detail.unwrap_or_else(|| "request failed".to_string()),
        }
    }
}

/// Result type alias for Life Harness client operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
