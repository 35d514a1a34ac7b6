//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, help overlay,
//! and the loading/error placeholders every view falls back to.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, FetchState, View};

/// Render the header bar with the overall uptime.
///
/// Displays: status indicator, success rate, check and target counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(stats) = app.statistics else {
        let suffix = if app.state == FetchState::Failed {
            "| Unavailable"
        } else {
            "| Loading..."
        };
        let line = Line::from(vec![
            Span::styled(
                " STATUS SENTINEL ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(suffix),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let level = stats.uptime_level();
    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.uptime_style(level)),
        Span::styled("STATUS SENTINEL ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(level.symbol(), app.theme.uptime_style(level)),
        Span::raw(" │ "),
        Span::styled(
            format!("{:.2}%", stats.success_rate),
            app.theme.uptime_style(level),
        ),
        Span::raw(" uptime │ "),
        Span::styled(
            stats.total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" checks │ "),
        Span::styled(
            app.targets.len().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" targets"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Dashboard "),
        Line::from(" 2:Stats "),
        Line::from(" 3:Tracker "),
    ];

    let selected = match app.current_view {
        View::Dashboard => 0,
        View::Stats => 1,
        View::Tracker => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, scope, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = match (&app.error, app.last_updated) {
        (Some(err), _) => format!(" Error: {} | r:retry q:quit", err),
        (None, Some(updated)) => {
            let refreshing = if app.state == FetchState::Loading {
                " (refreshing)"
            } else {
                ""
            };
            format!(
                " {} | Updated {:.1}s ago{} | scope:{} | Tab:switch r:refresh ?:help q:quit",
                app.source_description(),
                updated.elapsed().as_secs_f64(),
                refreshing,
                app.scope,
            )
        }
        (None, None) => format!(" {} | Loading... | q:quit", app.source_description()),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the loading placeholder.
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect, what: &str) {
    let paragraph = Paragraph::new(format!("Loading {}...", what))
        .style(app.theme.muted_style())
        .alignment(Alignment::Center)
        .block(bordered(app, ""));
    frame.render_widget(paragraph, area);
}

/// Render the error placeholder with a retry hint.
pub fn render_error(frame: &mut Frame, app: &App, area: Rect, message: &str) {
    let mut lines = vec![Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(app.theme.failure).add_modifier(Modifier::BOLD),
    ))];
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(err.clone(), app.theme.muted_style())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Press r to retry"));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(bordered(app, ""));
    frame.render_widget(paragraph, area);
}

/// A bordered block in the theme's style.
pub fn bordered<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  1-3         Jump to view"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Tracker",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  m         Mobile scope (30)"),
        Line::from("  t         Tablet scope (60)"),
        Line::from("  d         Desktop scope (150)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
