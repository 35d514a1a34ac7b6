// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # status-sentinel
//!
//! A terminal dashboard and library for URL health-check results.
//!
//! This crate reads a SQLite database of periodic URL checks, written by a
//! separate checker, and shows summary statistics plus an uptime tracker
//! strip. The database is opened from a local file or fetched whole over
//! HTTP as a snapshot.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(entries) │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │ poll / request_refresh                              │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │  feed   │◀── Refresher | ChannelFeed                     │
//! │  └────┬────┘                                                │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │  store  │◀── FileLoader | SnapshotLoader                 │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`store`]**: Lazily opened, read-only access to the `url` and `results`
//!   tables ([`StatusStore`]) through a pluggable [`StoreLoader`]
//! - **[`data`]**: Pure transformations into [`TrackerEntry`] values,
//!   [`StatusStatistics`] and [`Scope`] slices
//! - **[`feed`]**: Background fetching with polling ([`Refresher`]) behind
//!   the [`StatusFeed`] trait
//! - **[`app`]**: Fetch state machine, view navigation and user interaction
//! - **[`ui`]**: Terminal rendering using ratatui: dashboard, stats strip,
//!   tracker and theme support
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Local database file
//! status-sentinel --file status-checker-database.db
//!
//! # Snapshot served over HTTP, polled every 30 seconds
//! status-sentinel --url http://localhost:8080/status-checker-database.db --refresh-ms 30000
//!
//! # Write JSON and exit
//! status-sentinel --file status-checker-database.db --export status.json
//! ```
//!
//! ### Querying the store
//!
//! ```no_run
//! use status_sentinel::{FileLoader, StatusStore};
//!
//! # tokio_test::block_on(async {
//! let store = StatusStore::new(Box::new(FileLoader::new("status-checker-database.db")));
//! let targets = store.list_targets().await?;
//! let stats = store.overall_statistics().await?;
//! println!("{} targets, {:.2}% uptime", targets.len(), stats.success_rate);
//! store.close().await;
//! # Ok::<(), status_sentinel::StoreError>(())
//! # });
//! ```
//!
//! ### Driving the app from a background refresher
//!
//! ```no_run
//! use std::sync::Arc;
//! use status_sentinel::{App, FileLoader, RefreshOptions, Refresher, Scope, StatusStore, Theme};
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(StatusStore::new(Box::new(FileLoader::default())));
//! let refresher = Refresher::spawn(store, RefreshOptions::new(150, 60_000));
//! let mut app = App::with_theme(Box::new(refresher), Scope::Desktop, Theme::dark());
//! app.reload_data();
//! # });
//! ```
//!
//! ### Pure transformations
//!
//! ```
//! use status_sentinel::{slice_for_scope, Scope, TrackerColor, TrackerEntry};
//!
//! let entries: Vec<TrackerEntry> = (0..45)
//!     .map(|i| TrackerEntry {
//!         color: TrackerColor::Success,
//!         tooltip: format!("check {}", i),
//!     })
//!     .collect();
//!
//! let visible = slice_for_scope(&entries, Scope::Mobile);
//! assert_eq!(visible.len(), 30);
//! assert_eq!(visible[0].tooltip, "check 15");
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod feed;
pub mod logging;
pub mod store;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, FetchState, View};
pub use crate::config::{Overrides, Settings};
pub use data::{
    compute_statistics, slice_for_scope, to_tracker_entries, Scope, StatusData,
    StatusStatistics, TrackerColor, TrackerEntry, UptimeLevel,
};
pub use feed::{ChannelFeed, FeedHandle, FetchEvent, RefreshOptions, Refresher, StatusFeed};
pub use store::{
    CheckResult, FileLoader, InitState, SnapshotLoader, StatusStore, StoreError, StoreLoader,
    Target,
};
pub use ui::Theme;
