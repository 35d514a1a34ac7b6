//! Background refresh task.
//!
//! Fetches status data once on spawn, then again on every manual request and
//! every interval tick. Fetches run one at a time; a request that arrives
//! mid-fetch is served after it, so the last completed fetch wins.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use super::{FetchEvent, StatusFeed};
use crate::store::{StatusStore, DEFAULT_RECENT_LIMIT};

/// How a [`Refresher`] fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Maximum number of recent results per fetch.
    pub limit: usize,
    /// Polling period; `None` disables polling.
    pub interval: Option<Duration>,
}

impl RefreshOptions {
    /// Options from a result limit and a polling period in milliseconds.
    ///
    /// A period of 0 disables polling.
    pub fn new(limit: usize, refresh_interval_ms: u64) -> Self {
        Self {
            limit,
            interval: (refresh_interval_ms > 0).then(|| Duration::from_millis(refresh_interval_ms)),
        }
    }
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECENT_LIMIT,
            interval: None,
        }
    }
}

/// A feed that fetches from a [`StatusStore`] on a background task.
///
/// Dropping the refresher aborts the task, which also stops the timer.
#[derive(Debug)]
pub struct Refresher {
    requests: mpsc::UnboundedSender<()>,
    events: mpsc::UnboundedReceiver<FetchEvent>,
    task: JoinHandle<()>,
    description: String,
}

impl Refresher {
    /// Spawn the refresh task. Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<StatusStore>, options: RefreshOptions) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let description = store.description().to_string();

        match options.interval {
            Some(period) => info!("Refreshing every {:?} ({})", period, description),
            None => info!("Polling disabled; refreshing on request only ({})", description),
        }

        let task = tokio::spawn(run(store, options, request_rx, event_tx));

        Self {
            requests: request_tx,
            events: event_rx,
            task,
            description,
        }
    }

    /// Returns true once the background task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl StatusFeed for Refresher {
    fn poll(&mut self) -> Option<FetchEvent> {
        self.events.try_recv().ok()
    }

    fn request_refresh(&mut self) {
        if self.requests.send(()).is_err() {
            debug!("Refresh requested after the refresh task stopped");
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

async fn run(
    store: Arc<StatusStore>,
    options: RefreshOptions,
    mut requests: mpsc::UnboundedReceiver<()>,
    events: mpsc::UnboundedSender<FetchEvent>,
) {
    let mut ticker = options.interval.map(|period| {
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    if !fetch_once(&store, options.limit, &events).await {
        return;
    }

    loop {
        tokio::select! {
            request = requests.recv() => {
                if request.is_none() {
                    break;
                }
                // Requests queued during the last fetch are served by this one
                while requests.try_recv().is_ok() {}
                debug!("Manual refresh requested");
            }
            _ = next_tick(&mut ticker) => {
                debug!("Refresh interval elapsed");
            }
        }

        if !fetch_once(&store, options.limit, &events).await {
            break;
        }
    }

    debug!("Refresh task stopped");
}

/// Wait for the next tick, or forever when polling is disabled.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Run one fetch cycle. Returns false once nobody is listening.
async fn fetch_once(
    store: &StatusStore,
    limit: usize,
    events: &mpsc::UnboundedSender<FetchEvent>,
) -> bool {
    if events.send(FetchEvent::Started).is_err() {
        return false;
    }

    let outcome = store.status_data(limit).await;
    match &outcome {
        Ok(data) => debug!(
            "Loaded {} tracker entries, {} targets",
            data.entries.len(),
            data.targets.len()
        ),
        Err(err) => error!("Error loading status data: {}", err),
    }

    events.send(FetchEvent::Finished(outcome)).is_ok()
}
