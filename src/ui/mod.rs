//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Statistics grid, monitored services and refresh hint
//! - [`stats`]: Compact one-line statistics strip
//! - [`tracker`]: Headline uptime and the responsive check strip
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (dashboard/stats/tracker::render)    │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod dashboard;
pub mod stats;
pub mod theme;
pub mod tracker;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, View};

/// Render one full frame: chrome, the current view and any overlay.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Tabs
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);
    render_view(frame, app, chunks[2]);
    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

fn render_view(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_view {
        View::Dashboard => dashboard::render(frame, app, area),
        View::Stats => stats::render(frame, app, area),
        View::Tracker => tracker::render(frame, app, area),
    }
}
