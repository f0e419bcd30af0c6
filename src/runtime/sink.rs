//! Render sink interface.

use crate::domain::{Repository, SortDirection, SortField};

/// Output side of the search UI.
///
/// All methods take `&self`: the sink is shared between the session and the
/// result listeners, so implementations synchronize their own output.
pub trait RenderSink: Send + Sync {
    /// Replace the suggestion list.
    fn render_suggestions(&self, suggestions: &[String]);

    /// Replace the result table. An empty slice clears it.
    fn render_result_rows(&self, rows: &[Repository]);

    /// Show the loading indicator.
    fn show_loading(&self);

    /// Hide the loading indicator.
    fn hide_loading(&self);

    /// Display the current page number.
    fn render_page_number(&self, page: u32);

    /// Remove every sort glyph.
    fn clear_sort_indicators(&self);

    /// Mark `field` as the active sort in `direction`.
    fn render_sort_indicator(&self, field: SortField, direction: SortDirection);

    /// Tell the user something went wrong.
    fn alert(&self, message: &str);
}
