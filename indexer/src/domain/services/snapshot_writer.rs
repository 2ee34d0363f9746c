//! Snapshot construction. Snapshots form an append-only time series;
//! persistence only ever inserts them.

use chrono::{DateTime, Utc};

use crate::domain::models::{HolderSnapshot, SnapshotTotals};

/// Percentage of supply whose owner is known; 0 when supply is 0
pub fn coverage_percent(unique_tokens_tracked: u64, total_supply: u64) -> f64 {
    if total_supply > 0 {
        (unique_tokens_tracked as f64 / total_supply as f64) * 100.0
    } else {
        0.0
    }
}

/// Builds the snapshot recorded at the end of a sync run
pub fn build_snapshot(totals: SnapshotTotals, timestamp: DateTime<Utc>) -> HolderSnapshot {
    HolderSnapshot {
        timestamp,
        total_holders: totals.total_holders,
        total_supply: totals.total_supply,
        total_transactions: totals.total_transactions,
        unique_tokens_tracked: totals.unique_tokens_tracked,
        coverage: coverage_percent(totals.unique_tokens_tracked, totals.total_supply),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_math() {
        assert!((coverage_percent(42, 100) - 42.0).abs() < 1e-9);
        assert_eq!(coverage_percent(42, 0), 0.0);
        assert_eq!(coverage_percent(0, 0), 0.0);
    }

    #[test]
    fn test_build_snapshot_copies_totals() {
        let now = Utc::now();
        let snapshot = build_snapshot(
            SnapshotTotals {
                total_holders: 10,
                total_supply: 200,
                total_transactions: 350,
                unique_tokens_tracked: 50,
            },
            now,
        );
        assert_eq!(snapshot.timestamp, now);
        assert_eq!(snapshot.total_holders, 10);
        assert_eq!(snapshot.total_transactions, 350);
        assert!((snapshot.coverage - 25.0).abs() < 1e-9);
    }
}
