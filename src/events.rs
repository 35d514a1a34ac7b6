use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::data::Scope;

/// File written by the export key.
pub const EXPORT_PATH: &str = "status_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Dashboard),
        KeyCode::Char('2') => app.set_view(View::Stats),
        KeyCode::Char('3') => app.set_view(View::Tracker),

        // Tracker scope
        KeyCode::Char('m') => app.set_scope(Scope::Mobile),
        KeyCode::Char('t') => app.set_scope(Scope::Tablet),
        KeyCode::Char('d') => app.set_scope(Scope::Desktop),

        // Refresh (also the retry action in error states)
        KeyCode::Char('r') => {
            app.refresh();
            app.set_status_message("Refreshing...".to_string());
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.prev_view(),
        MouseEventKind::ScrollDown => app.next_view(),

        // Tab clicks (row 1, after header)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            // Tab positions: Dashboard (0-15), Stats (16-27), Tracker (28-40)
            let col = mouse.column;
            if col < 16 {
                app.set_view(View::Dashboard);
            } else if col < 28 {
                app.set_view(View::Stats);
            } else if col <= 40 {
                app.set_view(View::Tracker);
            }
        }

        _ => {}
    }
}
