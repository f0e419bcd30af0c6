//! Repository rows and the uniform result envelope.

use crate::domain::error::FetchError;
use serde::{Deserialize, Serialize};

/// One row of a search result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Full repository name, e.g. `ReactiveX/rxjs`.
    pub name: String,
    /// Star count.
    pub stars: u64,
    /// Fork count.
    pub forks: u64,
}

impl Repository {
    /// Creates a repository row.
    pub fn new(name: impl Into<String>, stars: u64, forks: u64) -> Self {
        Self {
            name: name.into(),
            stars,
            forks,
        }
    }
}

/// Success/failure wrapper produced for every search execution.
///
/// Failures are folded into an envelope with `success == false`, the
/// extracted message, and no rows, so consumers never handle raw errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Whether the fetch succeeded.
    pub success: bool,
    /// Failure message; `None` on success.
    pub message: Option<String>,
    /// Result rows in source order; empty on failure.
    pub data: Vec<Repository>,
}

impl ResultEnvelope {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn success(data: Vec<Repository>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Wraps a failure.
    #[must_use]
    pub fn failure(error: FetchError) -> Self {
        Self {
            success: false,
            message: Some(error.message),
            data: Vec::new(),
        }
    }

    /// Normalizes a raw fetch outcome.
    ///
    /// ```
    /// use reposearch::domain::{FetchError, ResultEnvelope};
    ///
    /// let envelope = ResultEnvelope::from_outcome(Err(FetchError::new("API rate limit exceeded")));
    /// assert!(!envelope.success);
    /// assert_eq!(envelope.message.as_deref(), Some("API rate limit exceeded"));
    /// assert!(envelope.data.is_empty());
    /// ```
    #[must_use]
    pub fn from_outcome(outcome: Result<Vec<Repository>, FetchError>) -> Self {
        outcome.map_or_else(Self::failure, Self::success)
    }
}
