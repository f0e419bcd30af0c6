//! Reposearch: interactive repository search with a reactive core.
//!
//! A keyword input drives live suggestions; a search action fetches a
//! paginated, sortable result list. The core turns high-frequency UI events
//! into a few well-formed, rate-limited, cancel-safe queries:
//!
//! - suggestions are debounced, deduplicated and length-gated, and only the
//!   newest response is rendered;
//! - searches combine the keyword captured at the last trigger with the
//!   latest sort, page and page size, and a newer search always supersedes
//!   an older one;
//! - every search yields exactly one success-or-failure envelope, fanned out
//!   to the render and alert paths.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Front end (main.rs, or any RawEvent producer)      │
//! └─────────────────────────────────────────────────────┘
//!                        │ RawEvent
//! ┌─────────────────────────────────────────────────────┐
//! │  Session runtime (runtime/)                         │  ← tokio tasks
//! │  - timers, fetch tasks, abort on supersede          │
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │  ← state machine
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Stores        │   │ Pipelines     │   │ Sources       │
//! │ (store/)      │   │ (pipeline/)   │   │ (source/)     │
//! │ - sort, page  │   │ - suggestions │   │ - GitHub API  │
//! │ - page size   │   │ - coordinator │   │               │
//! │ - keyword     │   │ - dispatcher  │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, UI, infrastructure, observability          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Settings come from a TOML file (`$XDG_CONFIG_HOME/reposearch/config.toml`
//! or `config=<path>`) and `key=value` command-line overrides:
//!
//! ```toml
//! api_base = "https://api.github.com"
//! api_token = "ghp_..."
//! debounce_ms = 700
//! min_keyword_len = 3
//! per_page = 10
//! suggestion_limit = 10
//! theme = "catppuccin-latte"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use reposearch::{handle_event, initialize, Action, Config, Event, RawEvent};
//!
//! let mut state = initialize(&Config::default());
//! for raw in [RawEvent::input("keyword", "rxjs"), RawEvent::click("search")] {
//!     let actions = handle_event(&mut state, &Event::try_from(raw)?);
//!     if actions.contains(&Action::ShowLoading) {
//!         assert_eq!(state.coordinator.captured(), Some("rxjs"));
//!     }
//! }
//! # Ok::<(), reposearch::SearchError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod pipeline;
pub mod runtime;
pub mod source;
pub mod store;
pub mod ui;

pub use app::{handle_event, start, Action, AppState, Event, RawEvent};
pub use domain::{FetchError, Result, SearchError};
pub use runtime::{EventSender, RenderSink, Session};
pub use source::{GithubSource, SearchSource};
pub use ui::{TerminalSink, Theme};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Session and front-end settings.
///
/// Missing keys take their defaults, both in TOML files and in key/value
/// maps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the GitHub REST API.
    pub api_base: String,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,

    /// Quiet period before a keystroke is looked up, in milliseconds.
    pub debounce_ms: u64,

    /// Shortest keyword that is looked up.
    pub min_keyword_len: usize,

    /// Initial rows per page.
    pub per_page: u32,

    /// Maximum number of suggestions shown.
    pub suggestion_limit: usize,

    /// Built-in theme name.
    pub theme: Option<String>,

    /// Path to a custom theme TOML file; wins over `theme`.
    pub theme_file: Option<String>,

    /// Tracing filter directive, e.g. `debug` or `reposearch=trace`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            api_token: None,
            debounce_ms: 700,
            min_keyword_len: 3,
            per_page: 10,
            suggestion_limit: 10,
            theme: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// Unknown keys are ignored; unparsable numbers keep their defaults.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| SearchError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Applies string key/value overrides on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| map.get(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        if let Some(api_base) = text("api_base") {
            self.api_base = api_base;
        }
        self.api_token = text("api_token").or(self.api_token);
        self.theme = text("theme").or(self.theme);
        self.theme_file = text("theme_file").or(self.theme_file);
        self.trace_level = text("trace_level").or(self.trace_level);

        override_number(map, "debounce_ms", &mut self.debounce_ms);
        override_number(map, "min_keyword_len", &mut self.min_keyword_len);
        override_number(map, "per_page", &mut self.per_page);
        override_number(map, "suggestion_limit", &mut self.suggestion_limit);
        self
    }
}

fn override_number<T: FromStr>(map: &BTreeMap<String, String>, key: &str, target: &mut T) {
    let Some(raw) = map.get(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparsable config value"),
    }
}

/// Creates the initial session state for `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        debounce_ms = config.debounce_ms,
        min_keyword_len = config.min_keyword_len,
        per_page = config.per_page,
        "initializing search session"
    );
    AppState::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn map_values_override_defaults() {
        let config = Config::from_map(&map(&[
            ("debounce_ms", "250"),
            ("per_page", "30"),
            ("theme", "catppuccin-latte"),
            ("unknown", "ignored"),
        ]));

        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.per_page, 30);
        assert_eq!(config.theme.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.min_keyword_len, 3);
    }

    #[test]
    fn unparsable_numbers_keep_defaults() {
        let config = Config::from_map(&map(&[("debounce_ms", "soon"), ("per_page", "-1")]));
        assert_eq!(config.debounce_ms, 700);
        assert_eq!(config.per_page, 10);
    }

    #[test]
    fn toml_file_with_partial_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 300\napi_token = \"secret\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.api_base, "https://api.github.com");
    }

    #[test]
    fn overrides_apply_on_top_of_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "per_page = 50\ntheme = \"catppuccin-latte\"").unwrap();

        let config = Config::from_file(file.path())
            .unwrap()
            .with_overrides(&map(&[("per_page", "20")]));
        assert_eq!(config.per_page, 20);
        assert_eq!(config.theme.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "per_page = \"many").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(SearchError::Config(_))));
    }
}
