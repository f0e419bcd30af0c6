//! Suggestion pipeline.
//!
//! Keystrokes flow through `debounce → distinct → min length → fetch`. The
//! distinct stage compares against the last *debounced* value, so retyping
//! the keyword that was already looked up does not fetch again. Every fetch
//! gets a fresh token; a response is rendered only if its token is still the
//! newest, so a slow answer for an old keyword can never overwrite a newer
//! list. Failed fetches are dropped and the previous list stays on screen.

use crate::domain::FetchError;
use crate::pipeline::stages::{Debounce, Distinct, Filter, LatestWins, MinLength, RequestToken};
use crate::source::FetchRequest;
use std::time::Duration;

/// Turns keystrokes into debounced, deduplicated suggestion fetches.
#[derive(Debug, Clone)]
pub struct SuggestionPipeline {
    debounce: Debounce<String>,
    distinct: Distinct<String>,
    length: MinLength,
    tokens: LatestWins,
}

impl SuggestionPipeline {
    /// Creates a pipeline with the given quiet period and minimum length.
    #[must_use]
    pub const fn new(quiet_period: Duration, min_len: usize) -> Self {
        Self {
            debounce: Debounce::new(quiet_period),
            distinct: Distinct::new(),
            length: MinLength::new(min_len),
            tokens: LatestWins::new(),
        }
    }

    /// Quiet period a keystroke must survive.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.debounce.window()
    }

    /// Records a keystroke and returns the debounce generation to schedule.
    pub fn keystroke(&mut self, keyword: String) -> u64 {
        self.debounce.push(keyword)
    }

    /// Handles an expired debounce timer.
    ///
    /// Returns a fetch request when `generation` is the latest keystroke and
    /// its value passes the distinct and length stages.
    pub fn settle(&mut self, generation: u64) -> Option<FetchRequest> {
        let keyword = self.debounce.settle(generation)?;

        if !self.distinct.admit(&keyword) {
            tracing::trace!(keyword = %keyword, "keyword unchanged since last lookup");
            return None;
        }
        if !self.length.admit(keyword.as_str()) {
            tracing::trace!(keyword = %keyword, "keyword too short for suggestions");
            return None;
        }

        let token = self.tokens.issue();
        tracing::debug!(keyword = %keyword, %token, "requesting suggestions");
        Some(FetchRequest::suggestions(token, keyword))
    }

    /// Handles a finished suggestion fetch.
    ///
    /// Returns the list to render, or `None` for stale or failed responses.
    pub fn accept(&self, token: RequestToken, outcome: &Result<Vec<String>, FetchError>) -> Option<Vec<String>> {
        if !self.tokens.is_current(token) {
            tracing::debug!(%token, "discarding superseded suggestions");
            return None;
        }

        match outcome {
            Ok(suggestions) => Some(suggestions.clone()),
            Err(e) => {
                tracing::debug!(%token, error = %e, "suggestion fetch failed, keeping previous list");
                None
            }
        }
    }
}
