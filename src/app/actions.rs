//! Side effects requested by the state machine.
//!
//! [`crate::app::handle_event`] never touches the render sink, the clock or
//! the result source. It returns a `Vec<Action>` and the session runtime
//! executes the actions in order. Effects that finish later (timers, fetches)
//! report back as [`crate::app::Event`]s.

use crate::domain::{ResultEnvelope, SortDirection, SortField};
use crate::source::FetchRequest;
use std::fmt;
use std::time::Duration;

/// Identifies one scheduled debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    /// Debounce generation the timer belongs to.
    pub generation: u64,
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "debounce@{}", self.generation)
    }
}

/// Commands for the session runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the loading indicator; a search is about to run.
    ShowLoading,

    /// Replace the suggestion list.
    RenderSuggestions(Vec<String>),

    /// Display this page number.
    RenderPageNumber(u32),

    /// Remove the sort glyph from every sort control.
    ClearSortIndicators,

    /// Mark the active sort control.
    RenderSortIndicator {
        /// Active field.
        field: SortField,
        /// Its direction.
        direction: SortDirection,
    },

    /// Post [`crate::app::Event::TimerFired`] after `after` elapses.
    ///
    /// Scheduling a new timer makes earlier ones redundant; the runtime may
    /// cancel them.
    ScheduleTimer {
        /// Timer to report when it fires.
        timer: TimerId,
        /// Delay before firing.
        after: Duration,
    },

    /// Run a fetch against the result source.
    ///
    /// A fetch supersedes any running fetch of the same kind.
    Fetch(FetchRequest),

    /// Publish a search outcome to the result listeners.
    Deliver(ResultEnvelope),
}
