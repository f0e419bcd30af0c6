//! Result table component.

use crate::domain::Repository;
use crate::ui::helpers::{fit, format_count};
use crate::ui::theme::Theme;

const NAME_WIDTH: usize = 48;
const COUNT_WIDTH: usize = 8;

/// Renders the header, a separator and one line per repository.
///
/// An empty slice renders an empty-state line instead of the table.
#[must_use]
pub fn render_table(rows: &[Repository], theme: &Theme) -> String {
    if rows.is_empty() {
        return format!("{}no results{}\n", Theme::fg(&theme.colors.empty_state_fg), Theme::reset());
    }

    let mut out = format!(
        "{}{}{} {:>w$} {:>w$}{}\n",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        fit("NAME", NAME_WIDTH),
        "STARS",
        "FORKS",
        Theme::reset(),
        w = COUNT_WIDTH,
    );
    out.push_str(&format!(
        "{}{}{}\n",
        Theme::fg(&theme.colors.border),
        "─".repeat(NAME_WIDTH + 2 * (COUNT_WIDTH + 1)),
        Theme::reset(),
    ));

    for repository in rows {
        out.push_str(&render_row(repository, theme));
    }
    out
}

fn render_row(repository: &Repository, theme: &Theme) -> String {
    format!(
        "{}{} {:>w$} {:>w$}{}\n",
        Theme::fg(&theme.colors.text_normal),
        fit(&repository.name, NAME_WIDTH),
        format_count(repository.stars),
        format_count(repository.forks),
        Theme::reset(),
        w = COUNT_WIDTH,
    )
}
