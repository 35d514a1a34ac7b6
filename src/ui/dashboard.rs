//! Dashboard view rendering.
//!
//! Displays the statistics grid, the list of monitored services and a
//! refresh hint.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::common::{bordered, render_error, render_loading};
use crate::app::App;
use crate::data::StatusStatistics;

/// Render the Dashboard view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(stats) = app.statistics else {
        if app.is_loading() {
            render_loading(frame, app, area, "dashboard");
        } else {
            render_error(frame, app, area, "Failed to load dashboard");
        }
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Statistics grid
            Constraint::Min(3),    // Services
            Constraint::Length(1), // Refresh hint
        ])
        .split(area);

    render_stat_grid(frame, app, &stats, chunks[0]);
    render_services(frame, app, chunks[1]);

    let hint = Paragraph::new(" Data refreshes automatically. Press r to refresh now.")
        .style(app.theme.muted_style());
    frame.render_widget(hint, chunks[2]);
}

fn render_stat_grid(frame: &mut Frame, app: &App, stats: &StatusStatistics, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let level = stats.uptime_level();
    let items = [
        ("Total Checks", stats.total.to_string(), Style::default()),
        (
            "Successful",
            stats.successful.to_string(),
            Style::default().fg(app.theme.success),
        ),
        (
            "Failed",
            stats.failed.to_string(),
            Style::default().fg(app.theme.failure),
        ),
        (
            "Success Rate",
            format!("{:.2}%", stats.success_rate),
            app.theme.uptime_style(level),
        ),
    ];

    for ((title, value, style), cell) in items.into_iter().zip(cells.iter()) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            value,
            style.add_modifier(Modifier::BOLD),
        )))
        .block(bordered(app, title));
        frame.render_widget(paragraph, *cell);
    }
}

fn render_services(frame: &mut Frame, app: &App, area: Rect) {
    let block = bordered(app, " Monitored Services ");

    if app.targets.is_empty() {
        let paragraph = Paragraph::new("No URLs configured")
            .style(app.theme.muted_style())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .targets
        .iter()
        .map(|target| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<16}", target.alias),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(target.url.clone(), app.theme.muted_style()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
