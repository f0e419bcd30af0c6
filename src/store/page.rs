//! Pagination reducer.
//!
//! Folds relative page steps into an absolute, one-based page index. The fold
//! is pure: the next index depends only on the previous index and the step,
//! never on timing. The initial value (page 1) counts as an emission, so the
//! page-number renderer and the query coordinator both see a defined page
//! before the first step.

use crate::domain::{PageIndex, PageStep};
use crate::store::cell::{StateCell, Watcher};

/// Accumulates [`PageStep`]s into a floor-clamped [`PageIndex`].
#[derive(Debug, Clone, Default)]
pub struct PageReducer {
    cell: StateCell<PageIndex>,
}

impl PageReducer {
    /// Creates a reducer positioned on the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one step and returns the accumulated index.
    ///
    /// Stepping back from page 1 stays on page 1 but is still an emission.
    pub fn step(&mut self, step: PageStep) -> PageIndex {
        let next = *self.cell.update(|current| current.step(step));
        tracing::debug!(?step, page = next.get(), "page stepped");
        next
    }

    /// Current page.
    #[must_use]
    pub fn get(&self) -> PageIndex {
        *self.cell.get()
    }

    /// Underlying cell, for polling watchers.
    #[must_use]
    pub const fn cell(&self) -> &StateCell<PageIndex> {
        &self.cell
    }

    /// Returns a cursor that replays the current page on first poll.
    #[must_use]
    pub const fn watch(&self) -> Watcher {
        self.cell.watch()
    }
}
