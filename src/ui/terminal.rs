//! [`RenderSink`] writing themed text to a terminal or any writer.

use crate::domain::{Repository, SortDirection, SortField};
use crate::runtime::RenderSink;
use crate::ui::components;
use crate::ui::theme::Theme;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};

struct Output {
    writer: Box<dyn Write + Send>,
    sort: Option<(SortField, SortDirection)>,
    loading: bool,
}

/// Line-oriented terminal renderer.
///
/// Every render call appends its block to the writer; nothing is redrawn in
/// place. Write failures are logged and otherwise ignored so a closed stdout
/// never takes the session down.
pub struct TerminalSink {
    output: Mutex<Output>,
    theme: Theme,
}

impl TerminalSink {
    /// Renders into `writer` using `theme`.
    pub fn new(writer: impl Write + Send + 'static, theme: Theme) -> Self {
        Self {
            output: Mutex::new(Output {
                writer: Box::new(writer),
                sort: None,
                loading: false,
            }),
            theme,
        }
    }

    /// Renders to standard output.
    #[must_use]
    pub fn stdout(theme: Theme) -> Self {
        Self::new(io::stdout(), theme)
    }

    /// Whether the loading indicator is currently shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.output.lock().loading
    }

    fn write(output: &mut Output, text: &str) {
        if let Err(e) = output.writer.write_all(text.as_bytes()).and_then(|()| output.writer.flush()) {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }

    fn emit(&self, text: &str) {
        Self::write(&mut self.output.lock(), text);
    }
}

impl RenderSink for TerminalSink {
    fn render_suggestions(&self, suggestions: &[String]) {
        self.emit(&components::render_suggestions(suggestions, &self.theme));
    }

    fn render_result_rows(&self, rows: &[Repository]) {
        self.emit(&components::render_table(rows, &self.theme));
    }

    fn show_loading(&self) {
        let mut output = self.output.lock();
        output.loading = true;
        Self::write(&mut output, &components::render_loading(&self.theme));
    }

    fn hide_loading(&self) {
        self.output.lock().loading = false;
    }

    fn render_page_number(&self, page: u32) {
        self.emit(&components::render_page(page, &self.theme));
    }

    fn clear_sort_indicators(&self) {
        self.output.lock().sort = None;
    }

    fn render_sort_indicator(&self, field: SortField, direction: SortDirection) {
        let mut output = self.output.lock();
        output.sort = Some((field, direction));
        let line = components::render_sort(output.sort, &self.theme);
        Self::write(&mut output, &line);
    }

    fn alert(&self, message: &str) {
        self.emit(&components::render_alert(message, &self.theme));
    }
}

impl fmt::Debug for TerminalSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalSink")
            .field("theme", &self.theme.name)
            .finish_non_exhaustive()
    }
}
