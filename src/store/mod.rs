//! Derived state stores.
//!
//! Four independently updatable axes feed the query coordinator: the keyword
//! text, the sort state, the page index and the page size. Each is an
//! observable [`StateCell`] owned by [`Stores`]; observers poll them through
//! [`Watcher`] cursors instead of registering callbacks.
//!
//! # Modules
//!
//! - [`cell`]: Generic state cell and change cursor
//! - [`sort`]: Sort state store with toggle/reset click rules
//! - [`page`]: Pagination reducer folding page steps into a page index

pub mod cell;
pub mod page;
pub mod sort;

pub use cell::{StateCell, Watcher};
pub use page::PageReducer;
pub use sort::SortStore;

use crate::domain::PageSize;

/// All state cells of one search session.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Latest keyword text, updated on every keystroke. Starts empty.
    pub keyword: StateCell<String>,
    /// Current sort.
    pub sort: SortStore,
    /// Current page.
    pub page: PageReducer,
    /// Current page size.
    pub per_page: StateCell<PageSize>,
}

impl Stores {
    /// Creates stores at their initial values with the given default page size.
    #[must_use]
    pub fn new(per_page: PageSize) -> Self {
        Self {
            keyword: StateCell::default(),
            sort: SortStore::new(),
            page: PageReducer::new(),
            per_page: StateCell::new(per_page),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::new(PageSize::DEFAULT)
    }
}
