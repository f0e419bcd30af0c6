//! Observable state cells with pull-based change cursors.
//!
//! A [`StateCell`] holds the latest value of one UI axis and counts every
//! emission. Observers keep a [`Watcher`], a cursor over that count, and ask
//! it whether anything was emitted since they last looked. A fresh watcher
//! always reports the current value on its first poll, so late observers never
//! wait for a first event.
//!
//! Every [`StateCell::set`] is an emission, including one that stores a value
//! equal to the previous one. Consumers that only care about real changes
//! compare values themselves.

/// Latest value of one axis plus an emission counter.
#[derive(Debug, Clone)]
pub struct StateCell<T> {
    value: T,
    version: u64,
}

impl<T> StateCell<T> {
    /// Creates a cell whose initial value counts as the first emission.
    pub const fn new(value: T) -> Self {
        Self { value, version: 1 }
    }

    /// Returns the latest value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and records an emission.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.version += 1;
    }

    /// Folds the current value through `f`, stores the result, and returns it.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> &T {
        let next = f(&self.value);
        self.set(next);
        &self.value
    }

    /// Number of emissions so far, starting at 1 for the initial value.
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns a cursor that has not seen any emission yet.
    #[must_use]
    pub const fn watch(&self) -> Watcher {
        Watcher { seen: 0 }
    }
}

impl<T: Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Cursor over the emissions of one [`StateCell`].
///
/// A watcher does not remember which cell it came from; always poll it
/// against the cell that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watcher {
    seen: u64,
}

impl Watcher {
    /// Returns the latest value if the cell emitted since the last poll.
    pub fn changed<'a, T>(&mut self, cell: &'a StateCell<T>) -> Option<&'a T> {
        if cell.version == self.seen {
            return None;
        }
        self.seen = cell.version;
        Some(&cell.value)
    }
}
