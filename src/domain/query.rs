//! Query axes and the combined query intent.
//!
//! A search is determined by four independently changing axes: the captured
//! keyword, the sort state, the page index and the page size. This module
//! defines the value types for each axis and [`QueryIntent`], the snapshot
//! that combines them.

use crate::domain::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field a result list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Star count.
    Stars,
    /// Fork count.
    Forks,
}

impl SortField {
    /// Every sortable field, in indicator display order.
    pub const ALL: [Self; 2] = [Self::Stars, Self::Forks];

    /// Name used on the wire and in control ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stars" => Ok(Self::Stars),
            "forks" => Ok(Self::Forks),
            other => Err(SearchError::InvalidEvent(format!("unknown sort field: {other}"))),
        }
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first (`asc`).
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first (`desc`).
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current sort field and direction.
///
/// Replaced as a whole on every sort-control click via [`SortState::clicked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// Field being sorted by.
    pub field: SortField,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl SortState {
    /// Returns the state after the control for `field` was clicked.
    ///
    /// Reselecting the current field flips the direction; selecting another
    /// field starts over at [`SortDirection::Descending`].
    ///
    /// ```
    /// use reposearch::domain::{SortDirection, SortField, SortState};
    ///
    /// let start = SortState::default();
    /// assert_eq!(start.clicked(SortField::Stars).direction, SortDirection::Ascending);
    ///
    /// let forks = start.clicked(SortField::Stars).clicked(SortField::Forks);
    /// assert_eq!(forks.field, SortField::Forks);
    /// assert_eq!(forks.direction, SortDirection::Descending);
    /// ```
    #[must_use]
    pub fn clicked(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.toggled(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Descending,
            }
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Stars,
            direction: SortDirection::Descending,
        }
    }
}

/// Relative page movement from the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStep {
    /// One page back (-1).
    Previous,
    /// One page forward (+1).
    Next,
}

impl PageStep {
    /// Signed offset applied to the page index.
    #[must_use]
    pub const fn offset(self) -> i64 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// One-based page index that never drops below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageIndex(u32);

impl PageIndex {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Creates a page index, clamping to the first page.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    /// Returns the page reached by applying `step`, clamped at 1.
    ///
    /// ```
    /// use reposearch::domain::{PageIndex, PageStep};
    ///
    /// assert_eq!(PageIndex::FIRST.step(PageStep::Previous), PageIndex::FIRST);
    /// assert_eq!(PageIndex::FIRST.step(PageStep::Next).get(), 2);
    /// ```
    #[must_use]
    pub fn step(self, step: PageStep) -> Self {
        let next = i64::from(self.0) + step.offset();
        Self(u32::try_from(next.max(1)).unwrap_or(u32::MAX))
    }

    /// The raw one-based page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Number of rows requested per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSize(u32);

impl PageSize {
    /// Page size used until the per-page control changes.
    pub const DEFAULT: Self = Self(10);

    /// Creates a page size.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEvent`] for a size of zero.
    pub fn new(size: u32) -> Result<Self, SearchError> {
        if size == 0 {
            return Err(SearchError::InvalidEvent("page size must be positive".to_string()));
        }
        Ok(Self(size))
    }

    /// The raw row count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for PageSize {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s
            .trim()
            .parse::<u32>()
            .map_err(|e| SearchError::InvalidEvent(format!("page size {s:?}: {e}")))?;
        Self::new(size)
    }
}

/// Snapshot of every axis that determines one search execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryIntent {
    /// Keyword captured at the most recent accepted search trigger.
    pub keyword: String,
    /// Sort field and direction.
    pub sort: SortState,
    /// Page to fetch.
    pub page: PageIndex,
    /// Rows per page.
    pub per_page: PageSize,
}
