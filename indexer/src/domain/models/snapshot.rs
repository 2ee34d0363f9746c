use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate counts a snapshot is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotTotals {
    pub total_holders: u64,
    pub total_supply: u64,
    pub total_transactions: u64,
    pub unique_tokens_tracked: u64,
}

/// Immutable point-in-time rollup; one is appended per sync run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderSnapshot {
    pub timestamp: DateTime<Utc>,
    pub total_holders: u64,
    pub total_supply: u64,
    pub total_transactions: u64,
    pub unique_tokens_tracked: u64,
    /// Percentage of supply with a known owner
    pub coverage: f64,
}
