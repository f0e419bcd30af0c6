//! Composable stream-transform stages.
//!
//! The suggestion pipeline and the query coordinator are assembled from these
//! small, clock-free stages:
//!
//! - [`Debounce`]: timer-based coalescing. Each pushed value gets a new
//!   generation; only the value whose generation's timer fires is released.
//! - [`Distinct`]: equality-gated forwarding against the last admitted value.
//! - [`MinLength`] and [`Gate`]: predicate gating.
//! - [`LatestWins`]: request tokens for switch semantics.
//!
//! Timing lives outside the stages. The caller schedules a timer for the
//! generation [`Debounce::push`] returns and calls [`Debounce::settle`] when
//! it fires; a timer for any older generation is a no-op.

use std::fmt;
use std::time::Duration;

/// A forwarding decision over one value.
pub trait Filter<T: ?Sized> {
    /// Returns whether `value` may continue down the pipeline.
    fn admit(&mut self, value: &T) -> bool;
}

/// Quiet-period coalescing.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    window: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debounce<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    /// Quiet period a pushed value has to survive.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Replaces the pending value and returns the generation to schedule.
    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Releases the pending value if `generation` is still the latest push.
    pub fn settle(&mut self, generation: u64) -> Option<T> {
        if generation != self.generation {
            return None;
        }
        self.pending.take()
    }
}

/// Suppresses a value equal to the previously admitted one.
#[derive(Debug, Clone, Default)]
pub struct Distinct<T> {
    last: Option<T>,
}

impl<T> Distinct<T> {
    /// Creates a filter that admits the first value unconditionally.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> Filter<T> for Distinct<T> {
    fn admit(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }
}

/// Admits strings with at least `min` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLength {
    min: usize,
}

impl MinLength {
    /// Creates a gate requiring `min` characters.
    #[must_use]
    pub const fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Filter<str> for MinLength {
    fn admit(&mut self, value: &str) -> bool {
        value.chars().count() >= self.min
    }
}

/// Admits values matching an arbitrary predicate.
#[derive(Clone, Copy)]
pub struct Gate<F> {
    predicate: F,
}

impl<F> Gate<F> {
    /// Wraps `predicate` as a filter stage.
    pub const fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<T: ?Sized, F: FnMut(&T) -> bool> Filter<T> for Gate<F> {
    fn admit(&mut self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<F> fmt::Debug for Gate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate").finish_non_exhaustive()
    }
}

/// Identifies one issued request within a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic request tokens; only the newest one is accepted.
#[derive(Debug, Clone, Default)]
pub struct LatestWins {
    issued: u64,
}

impl LatestWins {
    /// Creates a tracker with no request issued.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issues a token that supersedes every earlier one.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// Whether `token` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        self.issued != 0 && token.0 == self.issued
    }
}
