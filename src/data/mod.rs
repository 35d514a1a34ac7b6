//! View transformation for stored check results.
//!
//! This module turns rows from the result store into display-ready values.
//! Everything here is pure: inputs are borrowed and never mutated.
//!
//! ## Submodules
//!
//! - [`stats`]: [`StatusStatistics`] aggregates and [`UptimeLevel`] banding
//! - [`timestamp`]: Parsing stored timestamps and formatting them for tooltips
//! - [`tracker`]: [`TrackerEntry`] derivation and [`Scope`] slicing
//!
//! ## Data Flow
//!
//! ```text
//! Vec<CheckResult> (newest first, from the store)
//!        │
//!        ▼  reversed once
//! StatusData::assemble()
//!        │
//!        ├──▶ to_tracker_entries() (oldest first)
//!        │
//!        └──▶ slice_for_scope() (at render time)
//! ```

pub mod stats;
pub mod timestamp;
pub mod tracker;

pub use stats::{compute_statistics, StatusStatistics, UptimeLevel};
pub use tracker::{slice_for_scope, to_tracker_entries, Scope, TrackerColor, TrackerEntry};

use serde::Serialize;

use crate::store::{CheckResult, Target};

/// The combined result of one dashboard fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusData {
    /// Tracker entries in chronological order (oldest first).
    pub entries: Vec<TrackerEntry>,
    pub statistics: StatusStatistics,
    pub targets: Vec<Target>,
}

impl StatusData {
    /// Assemble from query output.
    ///
    /// `newest_first` is the order the store returns recent results in; it is
    /// reversed here, once, so entries read left to right in time.
    pub fn assemble(
        mut newest_first: Vec<CheckResult>,
        statistics: StatusStatistics,
        targets: Vec<Target>,
    ) -> Self {
        newest_first.reverse();
        Self {
            entries: to_tracker_entries(&newest_first),
            statistics,
            targets,
        }
    }

    /// The entries shown at `scope`.
    pub fn entries_for(&self, scope: Scope) -> &[TrackerEntry] {
        slice_for_scope(&self.entries, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_reverses_once() {
        let newest_first: Vec<CheckResult> = ["00:10", "00:05", "00:00"]
            .iter()
            .enumerate()
            .map(|(i, time)| CheckResult {
                id: 3 - i as i64,
                target_id: 1,
                success: i != 1,
                timestamp: format!("2024-01-01T{}", time),
                alias: "API".to_string(),
            })
            .collect();

        let stats = compute_statistics(&newest_first);
        let data = StatusData::assemble(newest_first, stats, Vec::new());

        let tooltips: Vec<&str> = data.entries.iter().map(|e| e.tooltip.as_str()).collect();
        assert_eq!(
            tooltips,
            vec![
                "API: Success at 1/1/2024, 12:00:00 AM",
                "API: Error at 1/1/2024, 12:05:00 AM",
                "API: Success at 1/1/2024, 12:10:00 AM",
            ]
        );
        assert_eq!(data.statistics.success_rate, 66.67);
        assert_eq!(data.entries_for(Scope::Mobile).len(), 3);
    }
}
