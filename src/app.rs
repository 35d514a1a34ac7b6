//! Application state and navigation logic.

use std::time::Instant;

use anyhow::Result;

use crate::data::{slice_for_scope, Scope, StatusData, StatusStatistics, TrackerEntry};
use crate::export;
use crate::feed::{FetchEvent, StatusFeed};
use crate::store::Target;
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Statistics grid, monitored services and refresh hint.
    Dashboard,
    /// Compact one-line statistics strip.
    Stats,
    /// Headline uptime with the tracker strip.
    Tracker,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Stats,
            View::Stats => View::Tracker,
            View::Tracker => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::Tracker,
            View::Stats => View::Dashboard,
            View::Tracker => View::Stats,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Stats => "Stats",
            View::Tracker => "Tracker",
        }
    }
}

/// Where the app is in its fetch cycle.
///
/// ```text
/// Idle ──▶ Loading ──▶ Ready
///            ▲   └───▶ Failed
///            └── refresh / timer tick
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing requested yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; earlier data, if any, is still shown.
    Failed,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data feed
    feed: Box<dyn StatusFeed>,
    pub state: FetchState,
    /// All tracker entries from the last successful fetch, oldest first.
    pub entries: Vec<TrackerEntry>,
    pub statistics: Option<StatusStatistics>,
    pub targets: Vec<Target>,
    pub error: Option<String>,
    pub last_updated: Option<Instant>,

    // Display
    pub scope: Scope,
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `feed`, with the theme detected from the terminal.
    pub fn new(feed: Box<dyn StatusFeed>, scope: Scope) -> Self {
        Self::with_theme(feed, scope, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(feed: Box<dyn StatusFeed>, scope: Scope, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            feed,
            state: FetchState::Idle,
            entries: Vec::new(),
            statistics: None,
            targets: Vec::new(),
            error: None,
            last_updated: None,
            scope,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.feed.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain pending fetch events from the feed.
    ///
    /// Returns true if new data was applied.
    pub fn reload_data(&mut self) -> bool {
        let mut updated = false;
        while let Some(event) = self.feed.poll() {
            updated |= self.apply(event);
        }
        updated
    }

    /// Apply one fetch event. Returns true if it carried new data.
    pub fn apply(&mut self, event: FetchEvent) -> bool {
        match event {
            FetchEvent::Started => {
                self.state = FetchState::Loading;
                self.error = None;
                false
            }
            FetchEvent::Finished(Ok(data)) => {
                let StatusData {
                    entries,
                    statistics,
                    targets,
                } = data;
                self.entries = entries;
                self.statistics = Some(statistics);
                self.targets = targets;
                self.last_updated = Some(Instant::now());
                self.state = FetchState::Ready;
                true
            }
            FetchEvent::Finished(Err(err)) => {
                // Previously loaded data stays visible
                self.error = Some(err.to_string());
                self.state = FetchState::Failed;
                false
            }
        }
    }

    /// Ask the feed for a fresh fetch.
    pub fn refresh(&mut self) {
        self.feed.request_refresh();
    }

    /// Returns true if a fetch has ever succeeded.
    pub fn has_data(&self) -> bool {
        self.statistics.is_some()
    }

    /// Returns true while the first fetch has not completed.
    pub fn is_loading(&self) -> bool {
        !self.has_data() && matches!(self.state, FetchState::Idle | FetchState::Loading)
    }

    /// Tracker entries for the configured scope, oldest first.
    pub fn visible_entries(&self) -> &[TrackerEntry] {
        slice_for_scope(&self.entries, self.scope)
    }

    /// The target the tracker headline describes.
    ///
    /// Statistics are computed across all targets; the headline names the
    /// first one.
    pub fn headline_target(&self) -> Option<&Target> {
        self.targets.first()
    }

    /// Change the tracker scope.
    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
        self.set_status_message(format!(
            "Scope: {} (last {} checks)",
            scope.label(),
            scope.bound()
        ));
    }

    /// Switch to the next view (cycles through Dashboard → Stats → Tracker).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current state to a JSON file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        let Some(statistics) = self.statistics else {
            anyhow::bail!("No data to export");
        };

        let export = export::status_json(
            &statistics,
            &self.targets,
            self.scope,
            self.visible_entries(),
        );
        export::write_json(path, &export)
    }
}
