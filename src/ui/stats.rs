//! Compact statistics strip.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::common::{bordered, render_loading};
use crate::app::App;

/// Render the Stats view: one line of successful, failed, rate and total.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let stats = match app.statistics {
        Some(stats) if app.error.is_none() => stats,
        _ if app.is_loading() => {
            render_loading(frame, app, chunks[0], "stats");
            return;
        }
        _ => {
            let paragraph = Paragraph::new(Span::styled(
                "Failed to load statistics",
                Style::default().fg(app.theme.failure),
            ))
            .block(bordered(app, " Stats "));
            frame.render_widget(paragraph, chunks[0]);
            return;
        }
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("● ", Style::default().fg(app.theme.success)),
        Span::styled(stats.successful.to_string(), bold),
        Span::raw(" successful   "),
        Span::styled("● ", Style::default().fg(app.theme.failure)),
        Span::styled(stats.failed.to_string(), bold),
        Span::raw(" failed   "),
        Span::styled(
            format!("{:.2}%", stats.success_rate),
            app.theme.uptime_style(stats.uptime_level()),
        ),
        Span::raw(" success rate   "),
        Span::styled(stats.total.to_string(), bold),
        Span::raw(" total"),
    ]);

    frame.render_widget(Paragraph::new(line).block(bordered(app, " Stats ")), chunks[0]);
}
