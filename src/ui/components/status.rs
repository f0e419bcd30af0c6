//! One-line status components: suggestions, page, sort, loading, alerts.

use crate::domain::{SortDirection, SortField};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;

const SUGGESTION_WIDTH: usize = 60;

/// Suggestion list, one entry per line.
#[must_use]
pub fn render_suggestions(suggestions: &[String], theme: &Theme) -> String {
    if suggestions.is_empty() {
        return format!("{}  no suggestions{}\n", Theme::fg(&theme.colors.empty_state_fg), Theme::reset());
    }

    suggestions
        .iter()
        .map(|suggestion| {
            format!(
                "{}  › {}{}\n",
                Theme::fg(&theme.colors.suggestion_fg),
                truncate(suggestion, SUGGESTION_WIDTH),
                Theme::reset()
            )
        })
        .collect()
}

/// Current page number.
#[must_use]
pub fn render_page(page: u32, theme: &Theme) -> String {
    format!("{}page {page}{}\n", Theme::fg(&theme.colors.page_fg), Theme::reset())
}

/// Glyph shown next to the active sort control.
#[must_use]
pub const fn direction_glyph(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    }
}

/// Sort controls with the glyph on `active`, if any.
#[must_use]
pub fn render_sort(active: Option<(SortField, SortDirection)>, theme: &Theme) -> String {
    let controls: Vec<String> = SortField::ALL
        .iter()
        .map(|field| match active {
            Some((active_field, direction)) if active_field == *field => format!(
                "{}{}{field} {}{}",
                Theme::bold(),
                Theme::fg(&theme.colors.indicator_fg),
                direction_glyph(direction),
                Theme::reset()
            ),
            _ => format!("{}{field}{}", Theme::fg(&theme.colors.text_dim), Theme::reset()),
        })
        .collect();

    format!("sort: {}\n", controls.join("  "))
}

/// Loading line.
#[must_use]
pub fn render_loading(theme: &Theme) -> String {
    format!("{}{}loading…{}\n", Theme::dim(), Theme::fg(&theme.colors.loading_fg), Theme::reset())
}

/// Alert line.
#[must_use]
pub fn render_alert(message: &str, theme: &Theme) -> String {
    format!("{}{}! {message}{}\n", Theme::bold(), Theme::fg(&theme.colors.alert_fg), Theme::reset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_glyph_only_on_active_field() {
        let line = render_sort(Some((SortField::Forks, SortDirection::Ascending)), &Theme::default());
        assert!(line.contains("forks ↑"));
        assert!(!line.contains("stars ↑") && !line.contains("stars ↓"));

        let cleared = render_sort(None, &Theme::default());
        assert!(!cleared.contains('↑') && !cleared.contains('↓'));
    }

    #[test]
    fn suggestions_render_each_entry() {
        let list = vec!["ReactiveX/rxjs".to_string(), "rxjs-tools/rxjs-spy".to_string()];
        let out = render_suggestions(&list, &Theme::default());
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("› ReactiveX/rxjs"));
    }
}
