//! Terminal user interface.
//!
//! ```text
//! RenderSink call → component (themed String) → TerminalSink writer
//! ```
//!
//! # Modules
//!
//! - [`terminal`]: [`crate::runtime::RenderSink`] implementation over any writer
//! - [`components`]: Result table and status line renderers
//! - [`helpers`]: Width fitting and count formatting
//! - [`theme`]: Colour themes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod terminal;
pub mod theme;

pub use terminal::TerminalSink;
pub use theme::Theme;
