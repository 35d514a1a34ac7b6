//! Tracker entries and breakpoint scopes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::timestamp::format_local;
use crate::store::CheckResult;

/// Color tag of a tracker cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerColor {
    Success,
    Failure,
}

/// One cell of the uptime tracker strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEntry {
    pub color: TrackerColor,
    pub tooltip: String,
}

impl TrackerEntry {
    /// Derive the entry for a single check result.
    pub fn from_result(result: &CheckResult) -> Self {
        let (color, status) = if result.success {
            (TrackerColor::Success, "Success")
        } else {
            (TrackerColor::Failure, "Error")
        };

        Self {
            color,
            tooltip: format!(
                "{}: {} at {}",
                result.alias,
                status,
                format_local(&result.timestamp)
            ),
        }
    }
}

/// Map results to tracker entries, one to one and in the same order.
pub fn to_tracker_entries(results: &[CheckResult]) -> Vec<TrackerEntry> {
    results.iter().map(TrackerEntry::from_result).collect()
}

/// A display breakpoint bounding how many tracker entries are shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl Scope {
    /// All scopes, narrowest first.
    pub const ALL: [Scope; 3] = [Scope::Mobile, Scope::Tablet, Scope::Desktop];

    /// Maximum number of entries shown at this scope.
    pub fn bound(self) -> usize {
        match self {
            Scope::Mobile => 30,
            Scope::Tablet => 60,
            Scope::Desktop => 150,
        }
    }

    /// Returns the display label for this scope.
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Mobile => "mobile",
            Scope::Tablet => "tablet",
            Scope::Desktop => "desktop",
        }
    }

    /// The widest scope whose entries fit in `width` cells.
    ///
    /// Falls back to [`Scope::Mobile`] when nothing fits.
    pub fn fitting(width: u16) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|scope| scope.bound() <= width as usize)
            .unwrap_or(Scope::Mobile)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Scope::Mobile),
            "tablet" => Ok(Scope::Tablet),
            "desktop" => Ok(Scope::Desktop),
            other => Err(format!(
                "unknown scope '{}' (expected mobile, tablet or desktop)",
                other
            )),
        }
    }
}

/// The most recent entries that fit `scope`, oldest first.
///
/// Entries are expected in chronological order; the returned slice is their
/// trailing part.
pub fn slice_for_scope(entries: &[TrackerEntry], scope: Scope) -> &[TrackerEntry] {
    let start = entries.len().saturating_sub(scope.bound());
    &entries[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64, success: bool, stamp: &str) -> CheckResult {
        CheckResult {
            id,
            target_id: 1,
            success,
            timestamp: stamp.to_string(),
            alias: "API".to_string(),
        }
    }

    fn numbered_entries(n: usize) -> Vec<TrackerEntry> {
        (0..n)
            .map(|i| TrackerEntry {
                color: if i % 7 == 0 {
                    TrackerColor::Failure
                } else {
                    TrackerColor::Success
                },
                tooltip: format!("check {}", i),
            })
            .collect()
    }

    #[test]
    fn test_entry_from_result() {
        let ok = TrackerEntry::from_result(&result(1, true, "2024-01-01T00:00"));
        assert_eq!(ok.color, TrackerColor::Success);
        assert_eq!(ok.tooltip, "API: Success at 1/1/2024, 12:00:00 AM");

        let failed = TrackerEntry::from_result(&result(2, false, "2024-01-01T00:05"));
        assert_eq!(failed.color, TrackerColor::Failure);
        assert_eq!(failed.tooltip, "API: Error at 1/1/2024, 12:05:00 AM");
    }

    #[test]
    fn test_to_tracker_entries_preserves_order_and_input() {
        let results = vec![
            result(1, true, "2024-01-01T00:00"),
            result(2, false, "2024-01-01T00:05"),
            result(3, true, "2024-01-01T00:10"),
        ];
        let before = results.clone();

        let entries = to_tracker_entries(&results);
        assert_eq!(results, before);
        assert_eq!(entries.len(), 3);
        let colors: Vec<TrackerColor> = entries.iter().map(|e| e.color).collect();
        assert_eq!(
            colors,
            vec![TrackerColor::Success, TrackerColor::Failure, TrackerColor::Success]
        );

        // Same input, same output
        assert_eq!(to_tracker_entries(&results), entries);
        assert!(to_tracker_entries(&[]).is_empty());
    }

    #[test]
    fn test_slice_mobile_keeps_last_30() {
        let entries = numbered_entries(45);
        let sliced = slice_for_scope(&entries, Scope::Mobile);

        assert_eq!(sliced.len(), 30);
        assert_eq!(sliced, &entries[15..]);
        assert_eq!(sliced[0].tooltip, "check 15");
        assert_eq!(sliced[29].tooltip, "check 44");
        assert_eq!(entries.len(), 45);
    }

    #[test]
    fn test_slice_is_bounded_suffix_for_every_scope() {
        for n in [0, 1, 29, 30, 31, 60, 149, 150, 151, 400] {
            let entries = numbered_entries(n);
            for scope in Scope::ALL {
                let sliced = slice_for_scope(&entries, scope);
                assert!(sliced.len() <= scope.bound());
                assert_eq!(sliced.len(), n.min(scope.bound()));
                assert!(entries.ends_with(sliced));
            }
        }
    }

    #[test]
    fn test_scope_fitting() {
        assert_eq!(Scope::fitting(20), Scope::Mobile);
        assert_eq!(Scope::fitting(30), Scope::Mobile);
        assert_eq!(Scope::fitting(100), Scope::Tablet);
        assert_eq!(Scope::fitting(150), Scope::Desktop);
        assert_eq!(Scope::fitting(400), Scope::Desktop);
    }

    #[test]
    fn test_scope_parse_and_display() {
        assert_eq!("Mobile".parse::<Scope>().unwrap(), Scope::Mobile);
        assert_eq!(" tablet ".parse::<Scope>().unwrap(), Scope::Tablet);
        assert!("watch".parse::<Scope>().is_err());
        assert_eq!(Scope::Desktop.to_string(), "desktop");
        assert_eq!(Scope::default(), Scope::Desktop);
    }

    #[test]
    fn test_entry_serializes_color_tag() {
        let json = serde_json::to_string(&TrackerEntry {
            color: TrackerColor::Failure,
            tooltip: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"color":"failure","tooltip":"x"}"#);
    }
}
