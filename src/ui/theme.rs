//! Visual theme and styling.

use console::Style;

use crate::rules::Severity;

/// Terminal styles for rule listings and status lines.
#[derive(Debug, Clone)]
pub struct RulebookTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (bold magenta).
    pub header: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
    /// Per-severity styles, indexed by rank.
    severities: [Style; 4],
}

impl Default for RulebookTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RulebookTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            key: Style::new().bold(),
            severities: [
                Style::new().cyan(),
                Style::new().color256(208),
                Style::new().red(),
                Style::new().red().bold(),
            ],
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
            severities: [Style::new(), Style::new(), Style::new(), Style::new()],
        }
    }

    /// Style for a severity.
    pub fn severity(&self, severity: Severity) -> &Style {
        &self.severities[usize::from(severity.rank())]
    }

    /// Format a severity as its bracketed letter.
    pub fn format_severity(&self, severity: Severity) -> String {
        format!(
            "{}",
            self.severity(severity)
                .apply_to(format!("[{}]", severity.letter()))
        )
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
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
