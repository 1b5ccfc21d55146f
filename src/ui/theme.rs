//! Visual theme and styling.

use console::Style;

use crate::license::LicenseStatus;

/// Terminal styles used by permis output.
#[derive(Debug, Clone)]
pub struct PermisTheme {
    /// Success lines and verified rows (green).
    pub success: Style,
    /// Warnings and unverified rows (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Secondary text (dim).
    pub dim: Style,
    /// Emphasis (bold).
    pub highlight: Style,
    /// Header banner (cyan bold).
    pub header: Style,
    /// Follow-up hints (cyan dim).
    pub hint: Style,
    /// Labels in key-value displays (bold).
    pub key: Style,
}

impl Default for PermisTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PermisTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            hint: Style::new().cyan().dim(),
            key: Style::new().bold(),
        }
    }

    /// A theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
            key: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("▣"), self.highlight.apply_to(title))
    }

    /// Verification marker for an external row.
    pub fn format_verified(&self, verified: bool) -> String {
        if verified {
            self.success.apply_to("✓ verified").to_string()
        } else {
            self.warning.apply_to("○ unverified").to_string()
        }
    }

    /// Status label colored by severity.
    pub fn format_status(&self, status: LicenseStatus) -> String {
        let style = match status {
            LicenseStatus::Active => &self.success,
            LicenseStatus::Expired => &self.warning,
            LicenseStatus::Suspended => &self.error,
        };
        style.apply_to(status.label()).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_with_icons() {
        let theme = PermisTheme::plain();
        assert_eq!(theme.format_success("Resolved"), "✓ Resolved");
        assert_eq!(theme.format_warning("Lookup failed"), "⚠ Lookup failed");
        assert_eq!(theme.format_error("Bad input"), "✗ Bad input");
        assert!(theme.format_header("Categories").contains("Categories"));
    }

    #[test]
    fn verified_marker() {
        let theme = PermisTheme::plain();
        assert_eq!(theme.format_verified(true), "✓ verified");
        assert_eq!(theme.format_verified(false), "○ unverified");
    }

    #[test]
    fn status_uses_label() {
        let theme = PermisTheme::plain();
        assert_eq!(
            theme.format_status(LicenseStatus::Suspended),
            LicenseStatus::Suspended.label()
        );
    }

    #[test]
    fn colored_theme_keeps_text() {
        let theme = PermisTheme::new();
        let line = console::strip_ansi_codes(&theme.format_success("done")).to_string();
        assert_eq!(line, "✓ done");
    }
}
