//! Aggregate statistics and uptime banding.

use serde::{Deserialize, Serialize};

use crate::store::CheckResult;

/// Success rate at or above which a target counts as healthy.
const HEALTHY_RATE: f64 = 99.0;
/// Success rate at or above which a target counts as degraded rather than down.
const DEGRADED_RATE: f64 = 95.0;

/// Aggregate counts over a set of check results.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusStatistics {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    /// Percentage of successful checks, rounded to two decimals.
    pub success_rate: f64,
}

impl StatusStatistics {
    /// Build statistics from raw counts.
    ///
    /// `successful` is clamped to `total`, so `failed` never underflows.
    pub fn from_counts(total: u64, successful: u64) -> Self {
        let successful = successful.min(total);
        let success_rate = if total > 0 {
            round_to_hundredths(successful as f64 / total as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            total,
            successful,
            failed: total - successful,
            success_rate,
        }
    }

    /// Uptime band for the success rate.
    pub fn uptime_level(&self) -> UptimeLevel {
        UptimeLevel::from_rate(self.success_rate)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute statistics over a result set. Empty input yields zeros.
pub fn compute_statistics(results: &[CheckResult]) -> StatusStatistics {
    let successful = results.iter().filter(|r| r.success).count() as u64;
    StatusStatistics::from_counts(results.len() as u64, successful)
}

/// Headline uptime band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UptimeLevel {
    Down,
    Degraded,
    Healthy,
}

impl UptimeLevel {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= HEALTHY_RATE {
            UptimeLevel::Healthy
        } else if rate >= DEGRADED_RATE {
            UptimeLevel::Degraded
        } else {
            UptimeLevel::Down
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            UptimeLevel::Healthy => "UP",
            UptimeLevel::Degraded => "DEGRADED",
            UptimeLevel::Down => "DOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(outcomes: &[bool]) -> Vec<CheckResult> {
        outcomes
            .iter()
            .enumerate()
            .map(|(i, &success)| CheckResult {
                id: i as i64 + 1,
                target_id: 1,
                success,
                timestamp: format!("2024-01-01T00:{:02}", i),
                alias: "API".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_scenario_two_of_three() {
        let stats = compute_statistics(&results(&[true, false, true]));
        assert_eq!(
            stats,
            StatusStatistics {
                total: 3,
                successful: 2,
                failed: 1,
                success_rate: 66.67,
            }
        );
    }

    #[test]
    fn test_empty_set_is_zero() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, StatusStatistics::default());
        assert_eq!(stats.success_rate, 0.0);
    }

    #[test]
    fn test_invariants_hold_for_many_sets() {
        for len in 0..40usize {
            for stride in 1..6usize {
                let outcomes: Vec<bool> = (0..len).map(|i| i % stride != 0).collect();
                let stats = compute_statistics(&results(&outcomes));

                assert_eq!(stats.failed + stats.successful, stats.total);
                assert!((0.0..=100.0).contains(&stats.success_rate));
                if stats.total == 0 {
                    assert_eq!(stats.success_rate, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_from_counts_clamps_successful() {
        let stats = StatusStatistics::from_counts(2, 5);
        assert_eq!(stats.successful, 2);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.success_rate, 100.0);
    }

    #[test]
    fn test_uptime_levels() {
        assert_eq!(UptimeLevel::from_rate(100.0), UptimeLevel::Healthy);
        assert_eq!(UptimeLevel::from_rate(99.0), UptimeLevel::Healthy);
        assert_eq!(UptimeLevel::from_rate(98.99), UptimeLevel::Degraded);
        assert_eq!(UptimeLevel::from_rate(95.0), UptimeLevel::Degraded);
        assert_eq!(UptimeLevel::from_rate(66.67), UptimeLevel::Down);
        assert_eq!(StatusStatistics::default().uptime_level(), UptimeLevel::Down);
    }
}
