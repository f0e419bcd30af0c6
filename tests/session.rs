//! End-to-end session tests on a paused tokio clock.
//!
//! A scripted in-memory source stands in for GitHub and records every fetch;
//! a recording sink captures every render call in order. Sleeping in a test
//! advances the paused clock, so debounce windows and fetch latencies play
//! out deterministically.

use async_trait::async_trait;
use parking_lot::Mutex;
use reposearch::domain::{FetchError, QueryIntent, Repository, ResultEnvelope, SortDirection, SortField};
use reposearch::pipeline::ResultDispatcher;
use reposearch::source::SharedSource;
use reposearch::{Config, EventSender, RawEvent, RenderSink, SearchSource, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

// ============================================================================
// Test doubles
// ============================================================================

const DEFAULT_LATENCY: Duration = Duration::from_millis(50);

#[derive(Default)]
struct ScriptedSource {
    suggestion_calls: Mutex<Vec<String>>,
    result_calls: Mutex<Vec<QueryIntent>>,
    latency: HashMap<String, Duration>,
    failure: Option<String>,
    panics_left: Mutex<usize>,
}

impl ScriptedSource {
    fn with_latency(mut self, keyword: &str, latency: Duration) -> Self {
        self.latency.insert(keyword.to_string(), latency);
        self
    }

    fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn panicking_once() -> Self {
        Self {
            panics_left: Mutex::new(1),
            ..Self::default()
        }
    }

    fn should_panic(&self) -> bool {
        let mut left = self.panics_left.lock();
        let panic_now = *left > 0;
        *left = left.saturating_sub(1);
        panic_now
    }

    async fn wait(&self, keyword: &str) {
        let latency = self.latency.get(keyword).copied().unwrap_or(DEFAULT_LATENCY);
        tokio::time::sleep(latency).await;
    }

    fn suggestion_calls(&self) -> Vec<String> {
        self.suggestion_calls.lock().clone()
    }

    fn result_calls(&self) -> Vec<QueryIntent> {
        self.result_calls.lock().clone()
    }
}

#[async_trait]
impl SearchSource for ScriptedSource {
    async fn fetch_suggestions(&self, keyword: &str) -> Result<Vec<String>, FetchError> {
        self.suggestion_calls.lock().push(keyword.to_string());
        self.wait(keyword).await;
        match &self.failure {
            Some(message) => Err(FetchError::new(message.clone())),
            None => Ok(vec![format!("{keyword}/{keyword}"), format!("{keyword}-community/{keyword}-extras")]),
        }
    }

    async fn fetch_results(&self, intent: &QueryIntent) -> Result<Vec<Repository>, FetchError> {
        self.result_calls.lock().push(intent.clone());
        self.wait(&intent.keyword).await;
        if self.should_panic() {
            panic!("source crashed mid-request");
        }
        match &self.failure {
            Some(message) => Err(FetchError::new(message.clone())),
            None => Ok(vec![Repository::new(format!("{}/repo", intent.keyword), 100, 10)]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Suggestions(Vec<String>),
    Rows(Vec<String>),
    ShowLoading,
    HideLoading,
    Page(u32),
    ClearSort,
    Sort(SortField, SortDirection),
    Alert(String),
}

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<Call>>,
}

impl RecordingSink {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn pages(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Page(page) => Some(page),
                _ => None,
            })
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Rows(rows) => Some(rows),
                _ => None,
            })
            .collect()
    }

    fn without_suggestions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Suggestions(_)))
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn render_suggestions(&self, suggestions: &[String]) {
        self.calls.lock().push(Call::Suggestions(suggestions.to_vec()));
    }

    fn render_result_rows(&self, rows: &[Repository]) {
        let names = rows.iter().map(|row| row.name.clone()).collect();
        self.calls.lock().push(Call::Rows(names));
    }

    fn show_loading(&self) {
        self.calls.lock().push(Call::ShowLoading);
    }

    fn hide_loading(&self) {
        self.calls.lock().push(Call::HideLoading);
    }

    fn render_page_number(&self, page: u32) {
        self.calls.lock().push(Call::Page(page));
    }

    fn clear_sort_indicators(&self) {
        self.calls.lock().push(Call::ClearSort);
    }

    fn render_sort_indicator(&self, field: SortField, direction: SortDirection) {
        self.calls.lock().push(Call::Sort(field, direction));
    }

    fn alert(&self, message: &str) {
        self.calls.lock().push(Call::Alert(message.to_string()));
    }
}

struct Harness {
    events: EventSender,
    source: Arc<ScriptedSource>,
    sink: Arc<RecordingSink>,
    results: Arc<ResultDispatcher>,
    session: JoinHandle<()>,
}

impl Harness {
    fn start(source: ScriptedSource) -> Self {
        let source = Arc::new(source);
        let sink = Arc::new(RecordingSink::default());
        let shared: SharedSource = source.clone();

        let (session, events) = Session::new(&Config::default(), shared, sink.clone());
        let results = session.results();
        let session = tokio::spawn(session.run());

        Self {
            events,
            source,
            sink,
            results,
            session,
        }
    }

    fn input(&self, text: &str) {
        self.events.send(RawEvent::input("keyword", text)).unwrap();
    }

    fn click(&self, control: &str) {
        self.events.send(RawEvent::click(control)).unwrap();
    }

    fn change(&self, control: &str, value: &str) {
        self.events.send(RawEvent::change(control, value)).unwrap();
    }

    fn search(&self, keyword: &str) {
        self.input(keyword);
        self.click("search");
    }
}

async fn pause(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Long enough for every debounce window and fetch to finish.
async fn settle() {
    pause(5_000).await;
}

// ============================================================================
// Suggestion pipeline
// ============================================================================

#[tokio::test(start_paused = true)]
async fn fast_typing_fetches_only_the_last_keyword() {
    let harness = Harness::start(ScriptedSource::default());

    for text in ["r", "rx", "rxj", "rxjs"] {
        harness.input(text);
        pause(100).await;
    }
    settle().await;

    assert_eq!(harness.source.suggestion_calls(), vec!["rxjs".to_string()]);
    assert!(harness.sink.calls().contains(&Call::Suggestions(vec![
        "rxjs/rxjs".to_string(),
        "rxjs-community/rxjs-extras".to_string(),
    ])));
}

#[tokio::test(start_paused = true)]
async fn short_keywords_never_fetch_suggestions() {
    let harness = Harness::start(ScriptedSource::default());

    for text in ["a", "ab", ""] {
        harness.input(text);
        settle().await;
    }

    assert!(harness.source.suggestion_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn repeated_settled_keyword_is_fetched_once() {
    let harness = Harness::start(ScriptedSource::default());

    harness.input("rxjs");
    settle().await;
    harness.input("rxjs!");
    pause(100).await;
    harness.input("rxjs");
    settle().await;
    harness.input("rxjs-spy");
    settle().await;

    assert_eq!(
        harness.source.suggestion_calls(),
        vec!["rxjs".to_string(), "rxjs-spy".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn repeat_within_quiet_period_then_longer_keyword() {
    let harness = Harness::start(ScriptedSource::default());

    harness.input("abc");
    pause(100).await;
    harness.input("abc");
    pause(100).await;
    harness.input("abcd");
    settle().await;

    assert_eq!(harness.source.suggestion_calls(), vec!["abcd".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn failed_suggestions_keep_previous_list() {
    let harness = Harness::start(ScriptedSource::failing("boom"));

    harness.input("rxjs");
    settle().await;

    assert_eq!(harness.source.suggestion_calls().len(), 1);
    assert!(!harness.sink.calls().iter().any(|call| matches!(call, Call::Suggestions(_))));
}

// ============================================================================
// Query coordination
// ============================================================================

#[tokio::test(start_paused = true)]
async fn nothing_is_queried_before_the_first_trigger() {
    let harness = Harness::start(ScriptedSource::default());

    harness.click("sort-forks");
    harness.click("next-page");
    harness.change("per-page", "50");
    harness.input("rxjs");
    settle().await;

    assert!(harness.source.result_calls().is_empty());
    assert!(!harness.sink.calls().contains(&Call::ShowLoading));

    harness.click("search");
    settle().await;

    let calls = harness.source.result_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sort.field, SortField::Forks);
    assert_eq!(calls[0].page.get(), 2);
    assert_eq!(calls[0].per_page.get(), 50);
}

#[tokio::test(start_paused = true)]
async fn empty_keyword_trigger_is_ignored() {
    let harness = Harness::start(ScriptedSource::default());

    harness.click("search");
    settle().await;

    assert!(harness.source.result_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn page_size_change_reuses_captured_keyword() {
    let harness = Harness::start(ScriptedSource::default());

    harness.search("rxjs");
    settle().await;
    harness.input("angular");
    harness.change("per-page", "30");
    settle().await;

    let calls = harness.source.result_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].keyword, "rxjs");
    assert_eq!(calls[1].per_page.get(), 30);
}

#[tokio::test(start_paused = true)]
async fn newer_search_supersedes_slower_older_one() {
    let source = ScriptedSource::default().with_latency("slow", Duration::from_secs(2));
    let harness = Harness::start(source);

    harness.search("slow");
    pause(10).await;
    harness.search("fast");
    settle().await;

    assert_eq!(harness.source.result_calls().len(), 2);
    assert_eq!(harness.sink.rows(), vec![vec!["fast/repo".to_string()]]);
}

#[tokio::test(start_paused = true)]
async fn previous_page_on_first_page_does_not_requery() {
    let harness = Harness::start(ScriptedSource::default());

    harness.search("rxjs");
    settle().await;
    harness.click("previous-page");
    settle().await;

    assert_eq!(harness.source.result_calls().len(), 1);
    assert_eq!(harness.sink.pages(), vec![1, 1]);
}

// ============================================================================
// Result dispatch
// ============================================================================

#[tokio::test(start_paused = true)]
async fn failure_renders_empty_rows_and_alerts() {
    let harness = Harness::start(ScriptedSource::failing("API rate limit exceeded"));
    let envelopes = Arc::new(Mutex::new(Vec::<ResultEnvelope>::new()));
    let seen = Arc::clone(&envelopes);
    harness.results.on(move |envelope| seen.lock().push(envelope.clone()));

    harness.search("rxjs");
    settle().await;

    assert_eq!(
        *envelopes.lock(),
        vec![ResultEnvelope {
            success: false,
            message: Some("API rate limit exceeded".to_string()),
            data: vec![],
        }]
    );
    assert_eq!(
        harness.sink.without_suggestions(),
        vec![
            Call::Page(1),
            Call::ClearSort,
            Call::Sort(SortField::Stars, SortDirection::Descending),
            Call::ShowLoading,
            Call::Rows(vec![]),
            Call::HideLoading,
            Call::Alert("API rate limit exceeded".to_string()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn extra_subscribers_do_not_cause_extra_fetches() {
    let harness = Harness::start(ScriptedSource::default());
    let deliveries = Arc::new(Mutex::new(0_usize));
    for _ in 0..3 {
        let deliveries = Arc::clone(&deliveries);
        harness.results.on(move |_| *deliveries.lock() += 1);
    }

    harness.search("rxjs");
    settle().await;

    assert_eq!(harness.source.result_calls().len(), 1);
    assert_eq!(*deliveries.lock(), 3);
    assert_eq!(harness.sink.rows(), vec![vec!["rxjs/repo".to_string()]]);
}

#[tokio::test(start_paused = true)]
async fn panicking_fetch_fails_the_search_and_session_recovers() {
    let harness = Harness::start(ScriptedSource::panicking_once());

    harness.search("rxjs");
    settle().await;

    let calls = harness.sink.without_suggestions();
    assert!(calls.contains(&Call::Alert("search task failed".to_string())));
    assert_eq!(calls.last(), Some(&Call::Alert("search task failed".to_string())));
    assert!(calls.contains(&Call::HideLoading));

    harness.click("search");
    settle().await;

    assert_eq!(harness.source.result_calls().len(), 2);
    assert_eq!(harness.sink.rows(), vec![vec![], vec!["rxjs/repo".to_string()]]);
    assert_eq!(harness.sink.without_suggestions().last(), Some(&Call::HideLoading));
}

// ============================================================================
// Derived indicators
// ============================================================================

#[tokio::test(start_paused = true)]
async fn page_steps_render_every_accumulated_page() {
    let harness = Harness::start(ScriptedSource::default());

    for control in ["next-page", "next-page", "previous-page", "previous-page", "previous-page"] {
        harness.click(control);
    }
    settle().await;

    assert_eq!(harness.sink.pages(), vec![1, 2, 3, 2, 1, 1]);
}

#[tokio::test(start_paused = true)]
async fn sort_clicks_toggle_and_reset_direction() {
    let harness = Harness::start(ScriptedSource::default());

    for control in ["sort-stars", "sort-stars", "sort-forks"] {
        harness.click(control);
    }
    settle().await;

    let indicators: Vec<Call> = harness
        .sink
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::Sort(..) | Call::ClearSort))
        .collect();
    assert_eq!(
        indicators,
        vec![
            Call::ClearSort,
            Call::Sort(SortField::Stars, SortDirection::Descending),
            Call::ClearSort,
            Call::Sort(SortField::Stars, SortDirection::Ascending),
            Call::ClearSort,
            Call::Sort(SortField::Stars, SortDirection::Descending),
            Call::ClearSort,
            Call::Sort(SortField::Forks, SortDirection::Descending),
        ]
    );
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn invalid_events_are_skipped() {
    let harness = Harness::start(ScriptedSource::default());

    harness.click("reset-everything");
    harness.change("per-page", "0");
    harness.search("rxjs");
    settle().await;

    assert_eq!(harness.source.result_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_sender_ends_the_session() {
    let Harness { events, session, .. } = Harness::start(ScriptedSource::default());
    let extra = events.clone();

    drop(events);
    extra.send(RawEvent::click("next-page")).unwrap();
    drop(extra);

    tokio::time::timeout(Duration::from_secs(1), session)
        .await
        .expect("session should stop once every sender is gone")
        .unwrap();
}
