//! JSON export of the dashboard state.
//!
//! Used by the `e` key in the TUI and by the non-interactive `--export` mode,
//! which reads the store once and exits.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use crate::data::{Scope, StatusStatistics, TrackerEntry};
use crate::store::{StatusStore, StoreError, Target};

/// Build the export document.
///
/// `entries` are written as given; callers pass the scope-sliced entries.
pub fn status_json(
    statistics: &StatusStatistics,
    targets: &[Target],
    scope: Scope,
    entries: &[TrackerEntry],
) -> Value {
    json!({
        "exported_at": chrono::Local::now().to_rfc3339(),
        "statistics": statistics,
        "targets": targets,
        "scope": scope,
        "entries": entries,
    })
}

/// Fetch once from `store` and build the export document.
pub async fn fetch_status_json(
    store: &StatusStore,
    scope: Scope,
    limit: usize,
) -> Result<Value, StoreError> {
    let data = store.status_data(limit).await?;
    Ok(status_json(
        &data.statistics,
        &data.targets,
        scope,
        data.entries_for(scope),
    ))
}

/// Write a document as pretty-printed JSON.
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
