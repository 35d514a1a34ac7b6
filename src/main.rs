// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

mod app;
mod config;
mod data;
mod events;
mod export;
mod feed;
mod logging;
mod store;
mod ui;

use app::App;
use crate::config::{Overrides, Settings};
use data::Scope;
use feed::{RefreshOptions, Refresher};
use store::StatusStore;

#[derive(Parser, Debug)]
#[command(name = "status-sentinel")]
#[command(about = "Terminal dashboard for URL health-check results")]
struct Args {
    /// Path to the status database file
    #[arg(short, long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// URL serving the whole status database as a snapshot
    #[arg(short, long)]
    url: Option<String>,

    /// Tracker scope: mobile (30), tablet (60) or desktop (150)
    #[arg(short, long)]
    scope: Option<Scope>,

    /// Refresh interval in milliseconds (0 disables polling)
    #[arg(long = "refresh-ms")]
    refresh_ms: Option<u64>,

    /// Maximum number of recent results to fetch
    #[arg(short, long)]
    limit: Option<usize>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file for the interactive UI
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export current state to JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            file: self.file.clone(),
            url: self.url.clone(),
            scope: self.scope,
            refresh_interval_ms: self.refresh_ms,
            limit: self.limit,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        logging::init_stderr()?;
        return export_to_file(&settings, export_path);
    }

    logging::init_file(&settings.log_file)?;
    run_tui(&settings)
}

/// Run the TUI against the store the settings select
fn run_tui(settings: &Settings) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let store = Arc::new(StatusStore::new(settings.loader()));
    info!("Starting dashboard ({})", store.description());
    let refresher = Refresher::spawn(
        Arc::clone(&store),
        RefreshOptions::new(settings.limit, settings.refresh_interval_ms),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(Box::new(refresher), settings.scope);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Dropping the app stops the refresher
    drop(app);
    rt.block_on(store.close());
    info!("Dashboard closed");

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5u16.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::draw(frame, app);
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Pick up whatever the refresher finished since the last frame
        app.reload_data();
    }

    Ok(())
}

/// Read the store once and write the export document
fn export_to_file(settings: &Settings, export_path: &Path) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let store = StatusStore::new(settings.loader());

    let document = rt.block_on(async {
        let document = export::fetch_status_json(&store, settings.scope, settings.limit).await;
        store.close().await;
        document
    });
    let document = match document {
        Ok(document) => document,
        Err(e) => {
            error!("Export failed: {}", e);
            return Err(e.into());
        }
    };

    export::write_json(export_path, &document)?;

    println!("Exported status to: {}", export_path.display());
    Ok(())
}
