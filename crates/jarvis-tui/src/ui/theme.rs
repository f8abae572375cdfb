//! Theme and styling definitions for the jarvis TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(24, 26, 34);
    pub const FG: Color = Color::Rgb(222, 224, 232);
    pub const DIM: Color = Color::Rgb(136, 140, 158);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(120, 170, 255);
    pub const USER: Color = Color::Rgb(170, 200, 255);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(42, 45, 58);
    pub const STATUS_KEY_BG: Color = Color::Rgb(66, 88, 140);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(126, 216, 130);
    pub const WARNING: Color = Color::Rgb(238, 198, 102);
    pub const ERROR: Color = Color::Rgb(238, 104, 104);

    // Border colors
    pub const BORDER: Color = Color::Rgb(78, 82, 102);
    pub const BORDER_ACTIVE: Color = Color::Rgb(120, 170, 255);
}

/// Status indicator symbols (ASCII so every terminal renders them).
pub struct Symbols;

impl Symbols {
    pub const CHECK: &'static str = "[ok]";
    pub const WARN: &'static str = "[!]";
    pub const ERROR: &'static str = "[x]";
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Styling for the user's own messages.
    pub fn user() -> Style {
        Style::default()
            .fg(Palette::USER)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Styling for the assistant label.
    pub fn assistant() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Success status.
    pub fn success() -> Style {
        Style::default().fg(Palette::SUCCESS).bg(Palette::BG)
    }

    /// Warning status.
    pub fn warning() -> Style {
        Style::default().fg(Palette::WARNING).bg(Palette::BG)
    }

    /// Error status.
    pub fn error() -> Style {
        Style::default().fg(Palette::ERROR).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}

/// Health states shown in the system-info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Warning,
    Error,
}

/// Symbol and style for a health indicator.
pub fn health_indicator(health: Health) -> (&'static str, Style) {
    match health {
        Health::Healthy => (Symbols::CHECK, Styles::success()),
        Health::Warning => (Symbols::WARN, Styles::warning()),
        Health::Error => (Symbols::ERROR, Styles::error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_indicator() {
        let (sym, _) = health_indicator(Health::Healthy);
        assert_eq!(sym, "[ok]");
        let (sym, _) = health_indicator(Health::Error);
        assert_eq!(sym, "[x]");
    }
}
