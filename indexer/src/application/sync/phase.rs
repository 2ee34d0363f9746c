use serde::Serialize;
use std::fmt;

/// Step a sync run is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncPhase {
    Idle,
    FetchingSupply,
    FetchingTransfers,
    ClearingState,
    PersistingTransactions,
    Resolving,
    PersistingOwnership,
    PersistingHolders,
    UpdatingHistory,
    Snapshotting,
    Committing,
}

impl SyncPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPhase::Idle => "idle",
            SyncPhase::FetchingSupply => "fetchingSupply",
            SyncPhase::FetchingTransfers => "fetchingTransfers",
            SyncPhase::ClearingState => "clearingState",
            SyncPhase::PersistingTransactions => "persistingTransactions",
            SyncPhase::Resolving => "resolving",
            SyncPhase::PersistingOwnership => "persistingOwnership",
            SyncPhase::PersistingHolders => "persistingHolders",
            SyncPhase::UpdatingHistory => "updatingHistory",
            SyncPhase::Snapshotting => "snapshotting",
            SyncPhase::Committing => "committing",
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
