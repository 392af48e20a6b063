//! Error handling for skillscout.
//!
//! [`ScoutError`] covers the two failure classes the discovery controller
//! distinguishes: validation failures (malformed intent, caught before any
//! I/O) and service failures (transport, server, or malformed response).
//! Superseded responses are not errors; the coordinator drops them silently.

use std::io;

use thiserror::Error;

/// Main error type for skillscout operations.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ScoutError {
    /// Whether this error came from the remote service rather than local
    /// input validation. Service errors surface as transient notices on the
    /// view model; validation errors indicate a caller bug.
    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self, Self::Service(_) | Self::Http(_) | Self::Decode(_))
    }
}

/// Result type alias using ScoutError.
pub type Result<T> = std::result::Result<T, ScoutError>;
