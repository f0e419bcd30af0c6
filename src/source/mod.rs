//! Result sources.
//!
//! A [`SearchSource`] answers the two fetches the core issues: suggestions
//! for a settled keyword and one page of results for a query intent. The core
//! treats sources as external collaborators; it only sees their outcomes,
//! posted back as events by the session runtime.
//!
//! # Modules
//!
//! - [`requests`]: Fetch requests emitted by the state machine
//! - [`github`]: GitHub repository search over HTTP

pub mod github;
pub mod requests;

pub use github::GithubSource;
pub use requests::FetchRequest;

use crate::domain::{FetchError, QueryIntent, Repository};
use async_trait::async_trait;
use std::sync::Arc;

/// Backend answering suggestion and result fetches.
///
/// Implementations report failures as [`FetchError`] values carrying a
/// human-readable message; they never panic on transport errors.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Suggestions for `keyword`. Callers only pass keywords that survived
    /// length gating.
    async fn fetch_suggestions(&self, keyword: &str) -> Result<Vec<String>, FetchError>;

    /// One page of results for `intent`.
    async fn fetch_results(&self, intent: &QueryIntent) -> Result<Vec<Repository>, FetchError>;
}

/// Source shared between the session and its fetch tasks.
pub type SharedSource = Arc<dyn SearchSource>;
