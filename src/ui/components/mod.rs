//! Components that turn render calls into themed text.
//!
//! Components are pure: they return the ANSI-styled string and leave writing
//! it to [`crate::ui::TerminalSink`].
//!
//! - [`table`]: Result rows with name, stars and forks columns
//! - [`status`]: Suggestions, page number, sort controls, loading and alerts

pub mod status;
pub mod table;

pub use status::{render_alert, render_loading, render_page, render_sort, render_suggestions};
pub use table::render_table;
