//! Error types for Vitrine operations.
//!
//! This module defines the main error type [`VitrineError`], which covers
//! CMS fetching, body decoding, configuration and the conversions relay.
//!
//! Mapping never produces an error: insufficient CMS data is signalled with
//! `None` from the mapper functions, and not-found is a
//! [`Resolution`](crate::Resolution) outcome rather than an error.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{VitrineError, Result};
//!
//! fn require_slug(slug: &str) -> Result<&str> {
//!     if slug.is_empty() {
//!         return Err(VitrineError::InvalidUrl("empty slug".to_string()));
//!     }
//!     Ok(slug)
//! }
//! # assert!(require_slug("").is_err());
//! ```

use thiserror::Error;

/// Main error type for CMS access and content resolution.
#[derive(Error, Debug)]
pub enum VitrineError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport-level problems.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when a CMS request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The CMS answered with a non-success status.
    #[error("CMS request failed with status {status}: {message}")]
    Fetch { status: u16, message: String },

    /// The response body was not the JSON shape we expected.
    #[error("Failed to parse CMS response: {0}")]
    Parse(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The static fallback table could not be loaded.
    #[error("Fallback table error: {0}")]
    Fallback(String),

    /// The conversions API rejected a forwarded event batch.
    ///
    /// `body` carries the upstream response verbatim so callers can relay it.
    #[error("Conversions API responded with status {status}")]
    Conversions { status: u16, body: String },
}

impl From<serde_json::Error> for VitrineError {
    fn from(err: serde_json::Error) -> Self {
        VitrineError::Parse(err.to_string())
    }
}

impl VitrineError {
    /// HTTP status code to surface for this error when it reaches an HTTP edge.
    pub fn status_code(&self) -> u16 {
        match self {
            VitrineError::Fetch { status, .. } | VitrineError::Conversions { status, .. } => *status,
            VitrineError::Timeout { .. } => 504,
            VitrineError::Http(_) | VitrineError::Parse(_) => 502,
            VitrineError::InvalidUrl(_) => 400,
            VitrineError::Config(_) | VitrineError::Fallback(_) => 500,
        }
    }
}

/// Result type alias for VitrineError.
pub type Result<T> = std::result::Result<T, VitrineError>;
