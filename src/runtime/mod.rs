//! Async session runtime.
//!
//! A [`Session`] owns the [`AppState`] and executes the actions the state
//! machine returns. Timers and fetches run as spawned tokio tasks that post
//! their outcome back over an internal channel, so the state machine itself
//! never awaits anything.
//!
//! ```text
//! EventSender ──RawEvent──▶ Session::run ──Action──▶ RenderSink
//!                              ▲    │
//!                              │    ├─ ScheduleTimer ─▶ sleep task ─┐
//!                              │    └─ Fetch ─────────▶ fetch task ─┤
//!                              └───────────── Event ◀────────────────┘
//! ```
//!
//! A new fetch aborts the running fetch of the same kind and a new timer
//! aborts the pending one. Aborting is an optimization only: stale outcomes
//! that still arrive are discarded by their request token. A fetch that
//! panics still posts an outcome, as a failure, so the search it belonged to
//! is settled and the loading indicator cleared.
//!
//! Search envelopes go through a [`ResultDispatcher`]. The session registers
//! the render listener (rows, hide loading) and the alert listener (failure
//! message) at construction; [`Session::results`] lets callers subscribe too.

pub mod sink;

pub use sink::RenderSink;

use crate::app::{handle_event, start, Action, AppState, Event, RawEvent};
use crate::domain::{FetchError, Result, SearchError};
use crate::pipeline::ResultDispatcher;
use crate::source::{FetchRequest, SharedSource};
use crate::Config;
use futures_util::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Failure message posted for a fetch whose task panicked.
const FETCH_PANICKED: &str = "search task failed";

/// Handle for feeding raw UI events into a running session.
///
/// Cloneable; the session ends once every handle is dropped.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<RawEvent>,
}

impl EventSender {
    /// Queues `event` for the session. Never blocks and never drops events.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::SessionClosed`] if the session has stopped.
    pub fn send(&self, event: RawEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| SearchError::SessionClosed)
    }
}

/// One interactive search session.
pub struct Session {
    state: AppState,
    source: SharedSource,
    sink: Arc<dyn RenderSink>,
    results: Arc<ResultDispatcher>,
    raw_rx: mpsc::UnboundedReceiver<RawEvent>,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
    timer: Option<JoinHandle<()>>,
    suggestion_fetch: Option<JoinHandle<()>>,
    search_fetch: Option<JoinHandle<()>>,
}

impl Session {
    /// Creates a session and the handle that feeds it.
    #[must_use]
    pub fn new(config: &Config, source: SharedSource, sink: Arc<dyn RenderSink>) -> (Self, EventSender) {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let results = Arc::new(ResultDispatcher::new());
        let render = Arc::clone(&sink);
        results.on(move |envelope| {
            render.render_result_rows(&envelope.data);
            render.hide_loading();
        });
        let alert = Arc::clone(&sink);
        results.on_failure(move |message| alert.alert(message));

        let session = Self {
            state: AppState::new(config),
            source,
            sink,
            results,
            raw_rx,
            completions_tx,
            completions_rx,
            timer: None,
            suggestion_fetch: None,
            search_fetch: None,
        };
        (session, EventSender { tx: raw_tx })
    }

    /// Dispatcher every search envelope is published on.
    #[must_use]
    pub fn results(&self) -> Arc<ResultDispatcher> {
        Arc::clone(&self.results)
    }

    /// Runs until every [`EventSender`] is dropped.
    ///
    /// Renders the initial page number and sort indicator first. Invalid raw
    /// events are logged and skipped. Tasks still running at the end are
    /// aborted.
    pub async fn run(mut self) {
        tracing::info!("search session started");
        let initial = start(&mut self.state);
        self.execute_all(initial);

        loop {
            tokio::select! {
                biased;

                Some(event) = self.completions_rx.recv() => self.process(&event),

                raw = self.raw_rx.recv() => match raw {
                    Some(raw) => match Event::try_from(raw) {
                        Ok(event) => self.process(&event),
                        Err(e) => tracing::warn!(error = %e, "discarding invalid UI event"),
                    },
                    None => break,
                },
            }
        }

        self.shutdown();
        tracing::info!("search session ended");
    }

    fn process(&mut self, event: &Event) {
        let actions = handle_event(&mut self.state, event);
        self.execute_all(actions);
    }

    fn execute_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.execute(action);
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::ShowLoading => self.sink.show_loading(),
            Action::RenderSuggestions(suggestions) => self.sink.render_suggestions(&suggestions),
            Action::RenderPageNumber(page) => self.sink.render_page_number(page),
            Action::ClearSortIndicators => self.sink.clear_sort_indicators(),
            Action::RenderSortIndicator { field, direction } => self.sink.render_sort_indicator(field, direction),
            Action::ScheduleTimer { timer, after } => self.schedule(Event::TimerFired(timer), after),
            Action::Fetch(request) => self.spawn_fetch(request),
            Action::Deliver(envelope) => self.results.emit(&envelope),
        }
    }

    fn schedule(&mut self, event: Event, after: Duration) {
        let tx = self.completions_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(event).is_err() {
                tracing::trace!("session ended before timer fired");
            }
        });

        if let Some(previous) = self.timer.replace(handle) {
            previous.abort();
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let token = request.token();
        let span = match &request {
            FetchRequest::Suggestions { keyword, .. } => {
                tracing::debug_span!("fetch_suggestions", %token, keyword = %keyword)
            }
            FetchRequest::Results { intent, .. } => tracing::debug_span!(
                "fetch_results",
                %token,
                keyword = %intent.keyword,
                page = intent.page.get()
            ),
        };
        if let Some(context) = request.trace_context() {
            context.adopt(&span);
        }

        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        let is_search = matches!(request, FetchRequest::Results { .. });

        let task = async move {
            let event = match request {
                FetchRequest::Suggestions { token, keyword, .. } => Event::SuggestionsLoaded {
                    token,
                    result: guarded(source.fetch_suggestions(&keyword)).await,
                },
                FetchRequest::Results { token, intent, .. } => Event::QueryCompleted {
                    token,
                    result: guarded(source.fetch_results(&intent)).await,
                },
            };
            if tx.send(event).is_err() {
                tracing::trace!("session ended before fetch completed");
            }
        };
        let handle = tokio::spawn(task.instrument(span));

        let slot = if is_search {
            &mut self.search_fetch
        } else {
            &mut self.suggestion_fetch
        };
        if let Some(previous) = slot.replace(handle) {
            if !previous.is_finished() {
                tracing::debug!(%token, "superseding running fetch");
                previous.abort();
            }
        }
    }

    fn shutdown(&mut self) {
        for handle in [
            self.timer.take(),
            self.suggestion_fetch.take(),
            self.search_fetch.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
    }
}

/// Awaits a source fetch, turning a panic into a failed outcome.
async fn guarded<T>(
    fetch: impl Future<Output = std::result::Result<T, FetchError>>,
) -> std::result::Result<T, FetchError> {
    match AssertUnwindSafe(fetch).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!("source fetch panicked");
            Err(FetchError::new(FETCH_PANICKED))
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}
