//! Read-only access to the health-check result store.
//!
//! [`StatusStore`] wraps a [`StoreLoader`] and opens the database lazily on
//! the first query. The open happens at most once per lifecycle: callers that
//! arrive while an open is in flight wait for it and share its outcome.
//! [`StatusStore::close`] releases the handle and returns the store to its
//! uninitialized state, after which the next query opens it again.
//!
//! ```text
//!   Uninitialized ──query──▶ Initializing ──ok──▶ Ready ──close──▶ Uninitialized
//!                                 │
//!                                 └──err──▶ Failed ──query──▶ Initializing
//! ```

mod error;
mod loader;
pub mod schema;

pub use error::StoreError;
pub use loader::{
    FileLoader, OpenStore, SnapshotLoader, StoreLoader, DEFAULT_DATABASE_PATH,
    DEFAULT_SNAPSHOT_PATH,
};
pub use schema::{CheckResult, Target};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;
use tracing::{debug, error, info};

use crate::data::{to_tracker_entries, StatusData, StatusStatistics, TrackerEntry};

/// Number of results fetched for the dashboard tracker.
pub const DEFAULT_RECENT_LIMIT: usize = 150;

/// Number of results fetched for a single target's tracker.
pub const DEFAULT_TARGET_LIMIT: usize = 100;

/// Lifecycle state of a [`StatusStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// Not opened yet, or closed.
    Uninitialized,
    /// An open is in flight.
    Initializing,
    /// Open and serving queries.
    Ready,
    /// The last open attempt failed; the next query tries again.
    Failed,
}

#[derive(Debug)]
enum Slot {
    Uninitialized,
    Initializing,
    Ready(Arc<OpenStore>),
    Failed(StoreError),
}

/// Lazily opened, read-only view of the status database.
#[derive(Debug)]
pub struct StatusStore {
    loader: Box<dyn StoreLoader>,
    slot: Mutex<Slot>,
    /// Held for the duration of an open; waiters queue here.
    init_gate: tokio::sync::Mutex<()>,
    /// Bumped each time an open attempt completes.
    completed_opens: AtomicU64,
}

impl StatusStore {
    /// Create a store that opens through `loader` on first use.
    pub fn new(loader: Box<dyn StoreLoader>) -> Self {
        Self {
            loader,
            slot: Mutex::new(Slot::Uninitialized),
            init_gate: tokio::sync::Mutex::new(()),
            completed_opens: AtomicU64::new(0),
        }
    }

    /// Returns a description of the underlying loader.
    pub fn description(&self) -> &str {
        self.loader.description()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InitState {
        match &*self.slot() {
            Slot::Uninitialized => InitState::Uninitialized,
            Slot::Initializing => InitState::Initializing,
            Slot::Ready(_) => InitState::Ready,
            Slot::Failed(_) => InitState::Failed,
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the store now rather than on the first query.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.ensure_ready().await.map(|_| ())
    }

    async fn ensure_ready(&self) -> Result<Arc<OpenStore>, StoreError> {
        let seen = self.completed_opens.load(Ordering::Acquire);
        if let Slot::Ready(store) = &*self.slot() {
            return Ok(Arc::clone(store));
        }

        let _gate = self.init_gate.lock().await;

        match &*self.slot() {
            Slot::Ready(store) => return Ok(Arc::clone(store)),
            // An open finished while we waited: share its failure instead of retrying
            Slot::Failed(err) if self.completed_opens.load(Ordering::Acquire) != seen => {
                return Err(err.clone());
            }
            _ => {}
        }

        *self.slot() = Slot::Initializing;
        info!("Initializing status store ({})", self.loader.description());

        let outcome = self.loader.open().await;
        let result = match outcome {
            Ok(store) => {
                info!("Database loaded successfully ({} tables)", store.tables().len());
                let store = Arc::new(store);
                *self.slot() = Slot::Ready(Arc::clone(&store));
                Ok(store)
            }
            Err(err) => {
                error!("Failed to initialize database: {}", err);
                *self.slot() = Slot::Failed(err.clone());
                Err(err)
            }
        };
        self.completed_opens.fetch_add(1, Ordering::AcqRel);
        result
    }

    /// Run a read-only query on the blocking pool.
    async fn with_connection<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let store = self.ensure_ready().await?;
        tokio::task::spawn_blocking(move || {
            let conn = store.connection();
            query(&*conn).map_err(StoreError::from)
        })
        .await
        .map_err(|e| StoreError::unavailable(format!("query task failed: {}", e)))?
    }

    /// All monitored targets, ascending by id.
    pub async fn list_targets(&self) -> Result<Vec<Target>, StoreError> {
        self.with_connection(schema::select_targets).await
    }

    /// Up to `limit` results, newest first, optionally for a single target.
    pub async fn list_recent_results(
        &self,
        limit: usize,
        target_id: Option<i64>,
    ) -> Result<Vec<CheckResult>, StoreError> {
        self.with_connection(move |conn| schema::select_recent_results(conn, limit, target_id))
            .await
    }

    /// Statistics over every row in the `results` table.
    pub async fn overall_statistics(&self) -> Result<StatusStatistics, StoreError> {
        let (total, successful) = self.with_connection(schema::select_result_counts).await?;
        Ok(StatusStatistics::from_counts(total, successful))
    }

    /// Tracker entries for one target, oldest first.
    ///
    /// Fails with [`StoreError::TargetNotFound`] if the id is unknown.
    pub async fn target_tracker(
        &self,
        target_id: i64,
        limit: usize,
    ) -> Result<Vec<TrackerEntry>, StoreError> {
        let found = self
            .with_connection(move |conn| {
                let Some(target) = schema::select_target(conn, target_id)? else {
                    return Ok(None);
                };
                let results = schema::select_recent_results(conn, limit, Some(target_id))?;
                Ok(Some((target, results)))
            })
            .await?;

        let Some((target, mut results)) = found else {
            return Err(StoreError::TargetNotFound(target_id));
        };
        debug!("Loaded {} results for {}", results.len(), target.alias);

        results.reverse();
        Ok(to_tracker_entries(&results))
    }

    /// Everything the dashboard needs in one call.
    ///
    /// Recent results, statistics and targets are queried concurrently.
    pub async fn status_data(&self, limit: usize) -> Result<StatusData, StoreError> {
        let (results, statistics, targets) = tokio::try_join!(
            self.list_recent_results(limit, None),
            self.overall_statistics(),
            self.list_targets(),
        )?;
        Ok(StatusData::assemble(results, statistics, targets))
    }

    /// Release the database handle.
    ///
    /// Waits for an in-flight open to finish. The next query re-opens the store.
    pub async fn close(&self) {
        let _gate = self.init_gate.lock().await;
        let previous = std::mem::replace(&mut *self.slot(), Slot::Uninitialized);

        if let Slot::Ready(store) = previous {
            match Arc::try_unwrap(store) {
                Ok(store) => store.close(),
                Err(_) => debug!("Store handle still in use by a query; closing when it finishes"),
            }
            info!("Status store closed");
        }
    }
}
