//! Styles shared by the view widgets.

use ratatui::style::{Color, Modifier, Style};

/// Honour the `NO_COLOR` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colors on unless `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Whether colors are on.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Resolved styles for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Styles {
    /// Header bar while live.
    pub header: Style,
    /// Header bar while frozen.
    pub header_frozen: Style,
    /// LIVE badge.
    pub live: Style,
    /// FROZEN badge.
    pub frozen: Style,
    /// Header button.
    pub button: Style,
    /// Button with nothing to do.
    pub button_disabled: Style,
    /// Active filter chip.
    pub chip: Style,
    /// Table header row.
    pub column_header: Style,
    /// Row at error severity or worse.
    pub error_row: Style,
    /// Row at warning severity.
    pub warning_row: Style,
    /// Selected row.
    pub selected_row: Style,
    /// Warning text in the details panel.
    pub warning: Style,
    /// Details field label.
    pub label: Style,
    /// Snackbar popup.
    pub snackbar: Style,
}

impl Styles {
    /// Styles for `colors`; bold-only when colors are off.
    pub fn new(colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            let bold = Style::default().add_modifier(Modifier::BOLD);
            return Self {
                header: Style::default(),
                header_frozen: Style::default().add_modifier(Modifier::REVERSED),
                live: bold,
                frozen: bold,
                button: Style::default(),
                button_disabled: Style::default().add_modifier(Modifier::DIM),
                chip: Style::default().add_modifier(Modifier::UNDERLINED),
                column_header: bold,
                error_row: bold,
                warning_row: Style::default(),
                selected_row: Style::default().add_modifier(Modifier::REVERSED),
                warning: bold,
                label: bold,
                snackbar: Style::default().add_modifier(Modifier::REVERSED),
            };
        }

        Self {
            header: Style::default().bg(Color::DarkGray).fg(Color::White),
            header_frozen: Style::default().bg(Color::Blue).fg(Color::White),
            live: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            frozen: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            button: Style::default().fg(Color::White),
            button_disabled: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            chip: Style::default().bg(Color::Gray).fg(Color::Black),
            column_header: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            error_row: Style::default().fg(Color::Red),
            warning_row: Style::default().fg(Color::Yellow),
            selected_row: Style::default().bg(Color::Blue).fg(Color::White),
            warning: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            snackbar: Style::default().bg(Color::White).fg(Color::Black),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}
