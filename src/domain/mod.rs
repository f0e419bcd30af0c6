//! Domain layer for reposearch.
//!
//! This module contains the value types the search core reasons about,
//! independent of the session runtime, the result source, or the terminal
//! front end.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: Sort, page and page-size axes and the combined [`QueryIntent`]
//! - [`repository`]: Result rows and the [`ResultEnvelope`] wrapper
//!
//! # Examples
//!
//! ```
//! use reposearch::domain::{PageIndex, PageSize, QueryIntent, SortState};
//!
//! let intent = QueryIntent {
//!     keyword: "rxjs".to_string(),
//!     sort: SortState::default(),
//!     page: PageIndex::FIRST,
//!     per_page: PageSize::DEFAULT,
//! };
//! assert_eq!(intent.sort.field.as_str(), "stars");
//! ```

pub mod error;
pub mod query;
pub mod repository;

pub use error::{FetchError, Result, SearchError};
pub use query::{PageIndex, PageSize, PageStep, QueryIntent, SortDirection, SortField, SortState};
pub use repository::{Repository, ResultEnvelope};
