//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{TrackerColor, UptimeLevel};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for successful checks and healthy uptime.
    pub success: Color,
    /// Color for degraded uptime.
    pub warning: Color,
    /// Color for failed checks and poor uptime.
    pub failure: Color,
    /// Color for secondary text.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headings.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            failure: Color::Red,
            muted: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            failure: Color::Red,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for one tracker cell
    pub fn tracker_style(&self, color: TrackerColor) -> Style {
        match color {
            TrackerColor::Success => Style::default().fg(self.success),
            TrackerColor::Failure => Style::default().fg(self.failure),
        }
    }

    /// Style for an uptime figure
    pub fn uptime_style(&self, level: UptimeLevel) -> Style {
        match level {
            UptimeLevel::Healthy => Style::default().fg(self.success).add_modifier(Modifier::BOLD),
            UptimeLevel::Degraded => Style::default().fg(self.warning).add_modifier(Modifier::BOLD),
            UptimeLevel::Down => Style::default().fg(self.failure).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for muted, secondary text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.tracker_style(TrackerColor::Success).fg, Some(Color::Green));
        assert_eq!(theme.tracker_style(TrackerColor::Failure).fg, Some(Color::Red));
    }

    #[test]
    fn test_uptime_levels() {
        let theme = Theme::light();
        assert_eq!(theme.uptime_style(UptimeLevel::Healthy).fg, Some(Color::Green));
        assert_eq!(theme.uptime_style(UptimeLevel::Degraded).fg, Some(Color::Yellow));
        assert_eq!(theme.uptime_style(UptimeLevel::Down).fg, Some(Color::Red));
    }
}
