//! Raw UI events and their normalized form.
//!
//! A front end reports what happened to which control as a [`RawEvent`].
//! [`Event::try_from`] maps it onto the typed [`Event`] the state machine
//! understands; anything that does not fit the control table is an
//! [`SearchError::InvalidEvent`].
//!
//! | Raw event                | Event                          |
//! |--------------------------|--------------------------------|
//! | `Input(keyword, text)`   | `KeywordChanged(text)`         |
//! | `Click(search)`          | `SearchTriggered`              |
//! | `Click(sort-stars)`      | `SortClicked(Stars)`           |
//! | `Click(sort-forks)`      | `SortClicked(Forks)`           |
//! | `Change(per-page, "30")` | `PerPageChanged(PageSize(30))` |
//! | `Click(previous-page)`   | `PageStepped(Previous)`        |
//! | `Click(next-page)`       | `PageStepped(Next)`            |
//!
//! Fired timers and fetch completions are not user events; the session
//! runtime constructs those variants directly.

use crate::app::actions::TimerId;
use crate::domain::{FetchError, PageSize, PageStep, Repository, SearchError, SortField};
use crate::pipeline::RequestToken;
use std::fmt;
use std::str::FromStr;

/// Named UI control an event is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Keyword text input.
    Keyword,
    /// Search button.
    Search,
    /// Sort-by-stars button.
    SortStars,
    /// Sort-by-forks button.
    SortForks,
    /// Rows-per-page select.
    PerPage,
    /// Previous page button.
    PreviousPage,
    /// Next page button.
    NextPage,
}

impl Control {
    /// Control id as used by front ends.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Search => "search",
            Self::SortStars => "sort-stars",
            Self::SortForks => "sort-forks",
            Self::PerPage => "per-page",
            Self::PreviousPage => "previous-page",
            Self::NextPage => "next-page",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Control {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword" => Ok(Self::Keyword),
            "search" => Ok(Self::Search),
            "sort-stars" => Ok(Self::SortStars),
            "sort-forks" => Ok(Self::SortForks),
            "per-page" => Ok(Self::PerPage),
            "previous-page" => Ok(Self::PreviousPage),
            "next-page" => Ok(Self::NextPage),
            other => Err(SearchError::InvalidEvent(format!("unknown control: {other}"))),
        }
    }
}

/// Event as reported by a front end, addressed by control id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Text of an input changed.
    Input {
        /// Control id.
        control: String,
        /// Full current text.
        value: String,
    },
    /// A button was clicked.
    Click {
        /// Control id.
        control: String,
    },
    /// A select changed its value.
    Change {
        /// Control id.
        control: String,
        /// Selected value.
        value: String,
    },
}

impl RawEvent {
    /// Text input on `control`.
    pub fn input(control: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Input {
            control: control.into(),
            value: value.into(),
        }
    }

    /// Click on `control`.
    pub fn click(control: impl Into<String>) -> Self {
        Self::Click {
            control: control.into(),
        }
    }

    /// Selection change on `control`.
    pub fn change(control: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Change {
            control: control.into(),
            value: value.into(),
        }
    }
}

/// Everything the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The keyword input now holds this text.
    KeywordChanged(String),
    /// The search button was pressed.
    SearchTriggered,
    /// A sort button was pressed.
    SortClicked(SortField),
    /// A new page size was selected.
    PerPageChanged(PageSize),
    /// The previous or next page button was pressed.
    PageStepped(PageStep),

    /// A scheduled debounce timer expired.
    TimerFired(TimerId),

    /// A suggestion fetch finished.
    SuggestionsLoaded {
        /// Token the fetch was issued with.
        token: RequestToken,
        /// Suggestions or the fetch failure.
        result: Result<Vec<String>, FetchError>,
    },

    /// A search finished.
    QueryCompleted {
        /// Token the search was issued with.
        token: RequestToken,
        /// Result rows or the fetch failure.
        result: Result<Vec<Repository>, FetchError>,
    },
}

impl Event {
    /// Short name for spans and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::KeywordChanged(_) => "keyword_changed",
            Self::SearchTriggered => "search_triggered",
            Self::SortClicked(_) => "sort_clicked",
            Self::PerPageChanged(_) => "per_page_changed",
            Self::PageStepped(_) => "page_stepped",
            Self::TimerFired(_) => "timer_fired",
            Self::SuggestionsLoaded { .. } => "suggestions_loaded",
            Self::QueryCompleted { .. } => "query_completed",
        }
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = SearchError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let event = match raw {
            RawEvent::Input { control, value } => match control.parse()? {
                Control::Keyword => Self::KeywordChanged(value),
                other => return Err(mismatch("input", other)),
            },
            RawEvent::Click { control } => match control.parse()? {
                Control::Search => Self::SearchTriggered,
                Control::SortStars => Self::SortClicked(SortField::Stars),
                Control::SortForks => Self::SortClicked(SortField::Forks),
                Control::PreviousPage => Self::PageStepped(PageStep::Previous),
                Control::NextPage => Self::PageStepped(PageStep::Next),
                other => return Err(mismatch("click", other)),
            },
            RawEvent::Change { control, value } => match control.parse()? {
                Control::PerPage => Self::PerPageChanged(value.parse()?),
                other => return Err(mismatch("change", other)),
            },
        };
        Ok(event)
    }
}

fn mismatch(kind: &str, control: Control) -> SearchError {
    SearchError::InvalidEvent(format!("{kind} event is not valid for control {control}"))
}
