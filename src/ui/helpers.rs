//! Text layout helpers shared by the components.
//!
//! All widths are counted in `char`s, not bytes, so repository names with
//! non-ASCII characters line up.

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

/// Compact count: `999`, `1.2k`, `34.5k`, `1.2M`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}k", count as f64 / 1_000.0),
        _ => format!("{:.1}M", count as f64 / 1_000_000.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("ReactiveX/rxjs", 20), "ReactiveX/rxjs");
        assert_eq!(truncate("ReactiveX/rxjs", 9), "Reactive…");
        assert_eq!(truncate("日本語のリポジトリ", 4), "日本語…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn fit_pads_to_width() {
        assert_eq!(fit("rxjs", 6), "rxjs  ");
        assert_eq!(fit("rxjs-spy", 6).chars().count(), 6);
    }

    #[test]
    fn counts_are_compacted() {
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1_234), "1.2k");
        assert_eq!(format_count(30_960), "31.0k");
        assert_eq!(format_count(2_500_000), "2.5M");
    }
}
