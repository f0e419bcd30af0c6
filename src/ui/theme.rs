//! Colour themes and ANSI escape generation.
//!
//! Themes are TOML files with a `name` and a `[colors]` table of hex strings.
//! Two are built in: `catppuccin-mocha` (default) and `catppuccin-latte`.
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! suggestion_fg = "#89b4fa"
//! indicator_fg = "#f9e2af"
//! page_fg = "#cba6f7"
//! loading_fg = "#fab387"
//! alert_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! ```

use crate::domain::{Result, SearchError};
use crate::infrastructure::expand_tilde;
use crate::Config;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// A named colour palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Colours for every UI element.
    pub colors: ThemeColors,
}

/// Hex colours for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Table header text.
    pub header_fg: String,
    /// Repository names and counts.
    pub text_normal: String,
    /// Secondary text.
    pub text_dim: String,
    /// Separator lines.
    pub border: String,
    /// Suggestion entries.
    pub suggestion_fg: String,
    /// Active sort glyph.
    pub indicator_fg: String,
    /// Page number.
    pub page_fg: String,
    /// Loading line.
    pub loading_fg: String,
    /// Alert messages.
    pub alert_fg: String,
    /// "No results" and "no suggestions" lines.
    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SearchError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| SearchError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Resolves the theme selected by `config`.
    ///
    /// `theme_file` wins over `theme`; with neither set the default theme is
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Theme`] for an unreadable theme file or an
    /// unknown built-in name.
    pub fn from_config(config: &Config) -> Result<Self> {
        if let Some(file) = &config.theme_file {
            return Self::from_file(expand_tilde(file));
        }

        let name = config.theme.as_deref().unwrap_or(DEFAULT_THEME);
        Self::from_name(name).ok_or_else(|| SearchError::Theme(format!("unknown theme: {name}")))
    }

    /// Parses `#rrggbb`, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Bold escape.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Dim escape.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Reset escape; clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in `catppuccin-mocha` theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}
