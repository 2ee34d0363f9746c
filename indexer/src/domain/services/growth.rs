//! Holder growth over fixed look-back windows.
//!
//! A window compares the latest snapshot with the nearest snapshot taken
//! at or before `now - window`, and counts history entries first seen
//! inside the window.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::models::{HolderHistoryEntry, HolderSnapshot};

/// A look-back window ending now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthWindow {
    pub label: &'static str,
    pub hours: i64,
}

impl GrowthWindow {
    pub const LAST_24_HOURS: GrowthWindow = GrowthWindow {
        label: "last24Hours",
        hours: 24,
    };
    pub const LAST_7_DAYS: GrowthWindow = GrowthWindow {
        label: "last7Days",
        hours: 24 * 7,
    };
    pub const LAST_30_DAYS: GrowthWindow = GrowthWindow {
        label: "last30Days",
        hours: 24 * 30,
    };

    /// Windows reported by the stats endpoint
    pub const STANDARD: [GrowthWindow; 3] = [
        GrowthWindow::LAST_24_HOURS,
        GrowthWindow::LAST_7_DAYS,
        GrowthWindow::LAST_30_DAYS,
    ];

    pub fn duration(&self) -> Duration {
        Duration::hours(self.hours)
    }

    /// Start of the window
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.duration()
    }

    /// Whether an address first seen at `first_seen` is new in this window
    pub fn is_new(&self, entry: &HolderHistoryEntry, now: DateTime<Utc>) -> bool {
        entry.first_seen >= self.cutoff(now)
    }
}

/// Growth figures for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetrics {
    pub new_holders: u64,
    /// `None` when no snapshot predates the window
    pub holder_change: Option<i64>,
    /// `None` without a baseline or when the baseline had no holders
    pub percentage_change: Option<f64>,
}

/// Compares the current snapshot against the window baseline
pub fn growth_metrics(
    current: &HolderSnapshot,
    baseline: Option<&HolderSnapshot>,
    new_holders: u64,
) -> GrowthMetrics {
    let holder_change =
        baseline.map(|base| current.total_holders as i64 - base.total_holders as i64);
    let percentage_change = match (baseline, holder_change) {
        (Some(base), Some(change)) if base.total_holders > 0 => {
            Some(change as f64 / base.total_holders as f64 * 100.0)
        }
        _ => None,
    };

    GrowthMetrics {
        new_holders,
        holder_change,
        percentage_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(timestamp: DateTime<Utc>, holders: u64) -> HolderSnapshot {
        HolderSnapshot {
            timestamp,
            total_holders: holders,
            total_supply: 100,
            total_transactions: 0,
            unique_tokens_tracked: 0,
            coverage: 0.0,
        }
    }

    #[test]
    fn test_new_holder_window_membership() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let entry = HolderHistoryEntry {
            address: "0xaaa".to_string(),
            nft_count: 1,
            first_seen: now - Duration::hours(2),
            last_seen: now - Duration::hours(2),
            is_active: true,
        };
        let last_hour = GrowthWindow {
            label: "lastHour",
            hours: 1,
        };

        assert!(GrowthWindow::LAST_24_HOURS.is_new(&entry, now));
        assert!(GrowthWindow::LAST_7_DAYS.is_new(&entry, now));
        assert!(!last_hour.is_new(&entry, now));
    }

    #[test]
    fn test_growth_against_baseline() {
        let now = Utc::now();
        let current = snapshot(now, 120);
        let base = snapshot(now - Duration::days(2), 100);
        let metrics = growth_metrics(&current, Some(&base), 25);

        assert_eq!(metrics.new_holders, 25);
        assert_eq!(metrics.holder_change, Some(20));
        assert!((metrics.percentage_change.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_without_baseline_or_from_zero() {
        let now = Utc::now();
        let current = snapshot(now, 5);
        let none = growth_metrics(&current, None, 5);
        assert_eq!(none.holder_change, None);
        assert_eq!(none.percentage_change, None);

        let empty_base = snapshot(now - Duration::days(1), 0);
        let from_zero = growth_metrics(&current, Some(&empty_base), 5);
        assert_eq!(from_zero.holder_change, Some(5));
        assert_eq!(from_zero.percentage_change, None);
    }
}
