//! GitHub repository search source.
//!
//! Both fetches use `GET /search/repositories`. Results map `full_name`,
//! `stargazers_count` and `forks_count` into [`Repository`] rows; suggestions
//! take the repository names of a small result page and rank them by fuzzy
//! match against the keyword.
//!
//! Failure messages come from the `message` field GitHub puts in error bodies
//! (e.g. `"API rate limit exceeded for ..."`), falling back to the HTTP status
//! text and then to the transport error.

use crate::domain::{FetchError, QueryIntent, Repository, Result, SearchError};
use crate::source::SearchSource;
use crate::Config;
use async_trait::async_trait;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use std::cmp::Reverse;

/// Repository search page as returned by GitHub.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<GithubRepository>,
}

/// The subset of a GitHub repository object the UI shows.
#[derive(Debug, Deserialize)]
struct GithubRepository {
    full_name: String,
    stargazers_count: u64,
    forks_count: u64,
}

/// Error body GitHub returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`SearchSource`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubSource {
    client: reqwest::Client,
    api_base: String,
    api_token: Option<String>,
    suggestion_limit: usize,
}

impl GithubSource {
    /// Creates a source from the API settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Source`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("reposearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Source(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            suggestion_limit: config.suggestion_limit,
        })
    }

    async fn search(&self, params: &[(&str, String)]) -> std::result::Result<SearchResponse, FetchError> {
        let mut request = self
            .client
            .get(format!("{}/search/repositories", self.api_base))
            .header(ACCEPT, "application/vnd.github+json")
            .query(params);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = extract_error(status, &body);
            tracing::debug!(status = status.as_u16(), message = %error.message, "search request rejected");
            return Err(error);
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}

#[async_trait]
impl SearchSource for GithubSource {
    async fn fetch_suggestions(&self, keyword: &str) -> std::result::Result<Vec<String>, FetchError> {
        let params = [
            ("q", keyword.to_string()),
            ("per_page", self.suggestion_limit.to_string()),
        ];
        let response = self.search(&params).await?;
        let names = response.items.into_iter().map(|item| item.full_name).collect();
        Ok(rank_suggestions(keyword, names, self.suggestion_limit))
    }

    async fn fetch_results(&self, intent: &QueryIntent) -> std::result::Result<Vec<Repository>, FetchError> {
        let params = [
            ("q", intent.keyword.clone()),
            ("sort", intent.sort.field.as_str().to_string()),
            ("order", intent.sort.direction.as_str().to_string()),
            ("page", intent.page.get().to_string()),
            ("per_page", intent.per_page.get().to_string()),
        ];
        let response = self.search(&params).await?;
        Ok(response
            .items
            .into_iter()
            .map(|item| Repository::new(item.full_name, item.stargazers_count, item.forks_count))
            .collect())
    }
}

/// Builds the user-facing message for a rejected request.
fn extract_error(status: StatusCode, body: &str) -> FetchError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .or_else(|| status.canonical_reason().map(ToString::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    FetchError::new(message)
}

/// Orders names by fuzzy score against `keyword`, best first.
///
/// Names that do not match at all keep their source order after the matches.
/// Duplicates are dropped and the list is cut to `limit`.
fn rank_suggestions(keyword: &str, names: Vec<String>, limit: usize) -> Vec<String> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(Option<i64>, String)> = Vec::with_capacity(names.len());
    for name in names {
        if scored.iter().any(|(_, seen)| *seen == name) {
            continue;
        }
        scored.push((matcher.fuzzy_match(&name, keyword), name));
    }

    scored.sort_by_key(|(score, _)| Reverse(score.unwrap_or(i64::MIN)));
    scored.into_iter().take(limit).map(|(_, name)| name).collect()
}
