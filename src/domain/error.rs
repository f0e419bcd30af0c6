//! Error types for reposearch.
//!
//! This module defines the crate-wide error type [`SearchError`], the
//! [`Result`] alias used throughout, and [`FetchError`], the failure value a
//! [`crate::source::SearchSource`] reports for a single fetch. All errors are
//! implemented with `thiserror`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for reposearch operations.
///
/// Failures of individual fetches are not represented here; they are carried
/// as [`FetchError`] values and folded into result envelopes so they never
/// interrupt a running session.
///
/// # Examples
///
/// ```
/// use reposearch::SearchError;
///
/// fn parse_page_size(raw: &str) -> Result<u32, SearchError> {
///     raw.parse()
///         .map_err(|_| SearchError::InvalidEvent(format!("not a page size: {raw}")))
/// }
///
/// assert!(parse_page_size("ten").is_err());
/// ```
#[derive(Debug, Error)]
pub enum SearchError {
    /// A raw UI event could not be normalized.
    ///
    /// Raised by the event source adapter for unknown controls, payloads that
    /// do not belong to the control, or unparsable select values.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The result source could not be constructed.
    #[error("Source error: {0}")]
    Source(String),

    /// The session this handle fed has ended.
    #[error("Session closed")]
    SessionClosed,

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for reposearch operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// A failed suggestion or result fetch.
///
/// Holds only the human-readable message that ends up in the alert and in
/// [`crate::domain::ResultEnvelope::message`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FetchError {
    /// Message suitable for showing to the user.
    pub message: String,
}

impl FetchError {
    /// Creates a fetch error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}
