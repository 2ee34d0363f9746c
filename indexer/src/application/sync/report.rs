use serde::Serialize;

use crate::domain::models::HolderSnapshot;

/// Totals of one committed sync run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub total_supply: u64,
    /// Transfers received from the explorer after deduplication
    pub transactions_processed: u64,
    /// Transfers actually written
    pub transactions_saved: u64,
    pub tokens_tracked: u64,
    pub unique_holders: u64,
    /// Addresses seen for the first time in this run
    pub new_holders: u64,
    pub coverage: f64,
    /// Pagination stopped early (page cap or a tolerated page failure)
    pub incomplete: bool,
    pub snapshot: HolderSnapshot,
}
