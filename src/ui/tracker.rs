//! Uptime tracker view.
//!
//! Shows the headline uptime, a strip with one cell per check and a
//! successful/failed/total summary. The strip shrinks to the widest scope
//! that fits the terminal, never beyond the configured scope.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::common::{bordered, render_error, render_loading};
use crate::app::App;
use crate::data::{slice_for_scope, Scope};

/// Cell drawn for each check.
const CHECK_CELL: &str = "█";

/// The scope the strip uses for a given inner width.
pub fn effective_scope(configured: Scope, width: u16) -> Scope {
    configured.min(Scope::fitting(width))
}

/// Render the Tracker view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(stats) = app.statistics else {
        if app.is_loading() {
            render_loading(frame, app, area, "uptime");
        } else {
            render_error(frame, app, area, "Error loading data");
        }
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Headline
            Constraint::Length(4), // Strip
            Constraint::Length(3), // Summary
            Constraint::Min(0),
        ])
        .split(area);

    // Headline
    let level = stats.uptime_level();
    let target_line = match app.headline_target() {
        Some(target) => Line::from(Span::styled(
            format!("{} - {}", target.alias, target.url),
            app.theme.muted_style(),
        )),
        None => Line::from(Span::styled("No URLs configured", app.theme.muted_style())),
    };
    let headline = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!("{:.2}%", stats.success_rate),
                app.theme.uptime_style(level),
            ),
            Span::raw(" uptime "),
            Span::styled(level.symbol(), app.theme.uptime_style(level)),
        ]),
        target_line,
    ])
    .block(bordered(app, " Project Uptime "));
    frame.render_widget(headline, chunks[0]);

    // Strip
    let strip_width = chunks[1].width.saturating_sub(2);
    let scope = effective_scope(app.scope, strip_width);
    let entries = slice_for_scope(&app.entries, scope);

    let legend = Line::from(vec![
        Span::raw(format!("Last {} checks: ", scope.bound())),
        Span::styled(CHECK_CELL, Style::default().fg(app.theme.success)),
        Span::raw(" Online "),
        Span::styled(CHECK_CELL, Style::default().fg(app.theme.failure)),
        Span::raw(" Offline"),
    ]);
    let cells: Line = if entries.is_empty() {
        Line::from(Span::styled("No checks recorded", app.theme.muted_style()))
    } else {
        entries
            .iter()
            .map(|entry| Span::styled(CHECK_CELL, app.theme.tracker_style(entry.color)))
            .collect::<Vec<_>>()
            .into()
    };
    let strip = Paragraph::new(vec![legend, cells])
        .wrap(Wrap { trim: false })
        .block(bordered(app, " Tracker "));
    frame.render_widget(strip, chunks[1]);

    // Summary
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut summary = vec![
        Span::styled(stats.successful.to_string(), bold.fg(app.theme.success)),
        Span::raw(" successful │ "),
        Span::styled(stats.failed.to_string(), bold.fg(app.theme.failure)),
        Span::raw(" failed │ "),
        Span::styled(stats.total.to_string(), bold),
        Span::raw(" total"),
    ];
    if let Some(latest) = entries.last() {
        summary.push(Span::raw(" │ Latest: "));
        summary.push(Span::styled(
            latest.tooltip.clone(),
            app.theme.tracker_style(latest.color),
        ));
    }
    let summary = Paragraph::new(Line::from(summary))
        .alignment(Alignment::Left)
        .block(bordered(app, ""));
    frame.render_widget(summary, chunks[2]);
}
