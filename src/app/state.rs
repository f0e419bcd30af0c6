//! Session state owned by the state machine.
//!
//! [`AppState`] holds the state stores, both pipelines and the cursors used
//! to drive the page-number and sort-indicator renderers. It is plain data:
//! no channels, no clock, no I/O. The session runtime owns exactly one.

use crate::domain::PageSize;
use crate::pipeline::{QueryCoordinator, SuggestionPipeline};
use crate::store::{Stores, Watcher};
use crate::Config;
use std::time::Duration;

/// State of one search session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Keyword, sort, page and page-size cells.
    pub stores: Stores,

    /// Keystroke to suggestion-fetch pipeline.
    pub suggestions: SuggestionPipeline,

    /// Search trigger plus axes to query intents.
    pub coordinator: QueryCoordinator,

    /// Whether a search is running for the current intent.
    ///
    /// Set together with [`crate::app::Action::ShowLoading`], cleared when the
    /// envelope for the current token is delivered.
    pub loading: bool,

    /// Last rendered suggestion list.
    pub suggestion_list: Vec<String>,

    pub(crate) page_render: Watcher,
    pub(crate) sort_render: Watcher,
}

impl AppState {
    /// Creates the initial session state from `config`.
    ///
    /// A zero `per_page` falls back to the default page size.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let per_page = PageSize::new(config.per_page).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid per_page in config, using default");
            PageSize::DEFAULT
        });
        let stores = Stores::new(per_page);

        Self {
            suggestions: SuggestionPipeline::new(Duration::from_millis(config.debounce_ms), config.min_keyword_len),
            coordinator: QueryCoordinator::new(&stores),
            loading: false,
            suggestion_list: Vec::new(),
            page_render: stores.page.watch(),
            sort_render: stores.sort.watch(),
            stores,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
