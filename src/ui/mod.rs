//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait so commands can be tested against [`MockUI`]
//! - [`TerminalUI`] for real terminal usage
//! - [`Table`] and [`PermisTheme`] for formatting
//!
//! # Example
//!
//! ```
//! use permis::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Silent);
//! ui.show_header("Categories");
//! ui.success("Rule table is valid");
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, PermisTheme};

/// Trait for user-facing output.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode, e.g. from the configured default.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Styles for building formatted lines.
    fn theme(&self) -> &PermisTheme;

    /// Display a result line.
    fn message(&mut self, msg: &str);

    /// Display a secondary line, shown in verbose mode only.
    fn detail(&mut self, msg: &str);

    /// Write machine-readable output. Never suppressed.
    fn data(&mut self, text: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a follow-up suggestion.
    fn show_hint(&mut self, hint: &str);
}
