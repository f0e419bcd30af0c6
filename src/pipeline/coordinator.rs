//! Query coordinator.
//!
//! Combines the keyword captured at the last search trigger with the latest
//! sort, page and page size into a [`QueryIntent`] and decides when a new
//! search has to run.
//!
//! # Rules
//!
//! - The keyword is read only at the instant of a search trigger. Typing
//!   afterwards does not change the running search session.
//! - An empty keyword at trigger time is rejected; the previously captured
//!   keyword, if any, stays in force.
//! - Nothing is queried before the first accepted trigger. Sort, page and
//!   page-size emissions before that only shape the first intent.
//! - After that, every emission of any axis re-evaluates the intent.
//! - An intent identical to the one in flight is never re-issued. A store
//!   emission that reproduces the last issued intent is ignored; an explicit
//!   trigger re-runs it.
//! - Each issued intent takes a new request token, superseding the previous
//!   one. Only the outcome for the newest token becomes an envelope.

use crate::domain::{FetchError, QueryIntent, Repository, ResultEnvelope};
use crate::pipeline::stages::{Filter, Gate, LatestWins, RequestToken};
use crate::source::FetchRequest;
use crate::store::{Stores, Watcher};

/// Rejects an empty captured keyword.
fn is_present(keyword: &str) -> bool {
    !keyword.is_empty()
}

/// Decides which query intents are executed.
#[derive(Debug, Clone)]
pub struct QueryCoordinator {
    captured: Option<String>,
    keyword_gate: Gate<fn(&str) -> bool>,
    sort_seen: Watcher,
    page_seen: Watcher,
    per_page_seen: Watcher,
    tokens: LatestWins,
    in_flight: Option<(RequestToken, QueryIntent)>,
    last_issued: Option<QueryIntent>,
}

impl QueryCoordinator {
    /// Creates a coordinator observing `stores`.
    #[must_use]
    pub fn new(stores: &Stores) -> Self {
        Self {
            captured: None,
            keyword_gate: Gate::new(is_present),
            sort_seen: stores.sort.watch(),
            page_seen: stores.page.watch(),
            per_page_seen: stores.per_page.watch(),
            tokens: LatestWins::new(),
            in_flight: None,
            last_issued: None,
        }
    }

    /// Keyword captured at the last accepted trigger.
    #[must_use]
    pub fn captured(&self) -> Option<&str> {
        self.captured.as_deref()
    }

    /// Intent whose outcome is awaited, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<&QueryIntent> {
        self.in_flight.as_ref().map(|(_, intent)| intent)
    }

    /// Handles a search trigger, capturing the keyword as it is right now.
    pub fn trigger(&mut self, stores: &Stores) -> Option<FetchRequest> {
        let keyword = stores.keyword.get();
        if !self.keyword_gate.admit(keyword.as_str()) {
            tracing::debug!("ignoring search trigger with empty keyword");
            self.poll_axes(stores);
            return None;
        }

        tracing::debug!(keyword = %keyword, "search keyword captured");
        self.captured = Some(keyword.clone());
        self.issue(stores, true)
    }

    /// Re-evaluates the intent after a sort, page or page-size emission.
    pub fn reconcile(&mut self, stores: &Stores) -> Option<FetchRequest> {
        self.issue(stores, false)
    }

    /// Handles a finished search.
    ///
    /// Returns the envelope to deliver, or `None` if `token` was superseded.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: &Result<Vec<Repository>, FetchError>,
    ) -> Option<ResultEnvelope> {
        match &self.in_flight {
            Some((awaited, _)) if *awaited == token && self.tokens.is_current(token) => {}
            _ => {
                tracing::debug!(%token, "discarding superseded search result");
                return None;
            }
        }

        self.in_flight = None;
        Some(ResultEnvelope::from_outcome(outcome.clone()))
    }

    fn issue(&mut self, stores: &Stores, explicit: bool) -> Option<FetchRequest> {
        let axes_changed = self.poll_axes(stores);
        let keyword = self.captured.clone()?;
        if !explicit && !axes_changed {
            return None;
        }

        let intent = QueryIntent {
            keyword,
            sort: stores.sort.get(),
            page: stores.page.get(),
            per_page: *stores.per_page.get(),
        };

        if self.in_flight() == Some(&intent) {
            tracing::debug!("identical search already in flight");
            return None;
        }
        if !explicit && self.last_issued.as_ref() == Some(&intent) {
            tracing::debug!("search intent unchanged");
            return None;
        }

        let token = self.tokens.issue();
        tracing::debug!(
            %token,
            keyword = %intent.keyword,
            sort = %intent.sort.field,
            order = %intent.sort.direction,
            page = intent.page.get(),
            per_page = intent.per_page.get(),
            "issuing search"
        );
        self.in_flight = Some((token, intent.clone()));
        self.last_issued = Some(intent.clone());
        Some(FetchRequest::results(token, intent))
    }

    /// Consumes pending emissions of all three axes.
    fn poll_axes(&mut self, stores: &Stores) -> bool {
        let sort = self.sort_seen.changed(stores.sort.cell()).is_some();
        let page = self.page_seen.changed(stores.page.cell()).is_some();
        let per_page = self.per_page_seen.changed(&stores.per_page).is_some();
        sort || page || per_page
    }
}
