//! Sort state store.

use crate::domain::{SortField, SortState};
use crate::store::cell::{StateCell, Watcher};

/// Holds the current [`SortState`], starting at stars/descending.
#[derive(Debug, Clone, Default)]
pub struct SortStore {
    cell: StateCell<SortState>,
}

impl SortStore {
    /// Creates a store holding the default sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a click on the sort control for `field` and returns the new state.
    pub fn click(&mut self, field: SortField) -> SortState {
        let next = *self.cell.update(|current| current.clicked(field));
        tracing::debug!(field = %next.field, direction = %next.direction, "sort changed");
        next
    }

    /// Current sort state.
    #[must_use]
    pub fn get(&self) -> SortState {
        *self.cell.get()
    }

    /// Underlying cell, for polling watchers.
    #[must_use]
    pub const fn cell(&self) -> &StateCell<SortState> {
        &self.cell
    }

    /// Returns a cursor that replays the current sort on first poll.
    #[must_use]
    pub const fn watch(&self) -> Watcher {
        self.cell.watch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortDirection;

    #[test]
    fn clicks_follow_toggle_and_reset_rules() {
        let mut store = SortStore::new();
        let sequence = [
            store.click(SortField::Stars),
            store.click(SortField::Stars),
            store.click(SortField::Forks),
            store.click(SortField::Forks),
            store.click(SortField::Stars),
        ];

        let expected = [
            (SortField::Stars, SortDirection::Ascending),
            (SortField::Stars, SortDirection::Descending),
            (SortField::Forks, SortDirection::Descending),
            (SortField::Forks, SortDirection::Ascending),
            (SortField::Stars, SortDirection::Descending),
        ];
        for (state, (field, direction)) in sequence.iter().zip(expected) {
            assert_eq!(state.field, field);
            assert_eq!(state.direction, direction);
        }
    }

    #[test]
    fn watcher_sees_each_click() {
        let mut store = SortStore::new();
        let mut watcher = store.watch();
        assert_eq!(watcher.changed(store.cell()).copied(), Some(SortState::default()));

        store.click(SortField::Forks);
        assert_eq!(watcher.changed(store.cell()).map(|s| s.field), Some(SortField::Forks));
        assert!(watcher.changed(store.cell()).is_none());
    }
}
