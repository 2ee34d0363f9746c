use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// First-seen ledger entry for an address that has held a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderHistoryEntry {
    pub address: String,
    /// Holding at the time the address was first observed
    pub nft_count: u32,
    pub first_seen: DateTime<Utc>,
    /// Equal to `first_seen`; entries are not refreshed after creation
    pub last_seen: DateTime<Utc>,
    pub is_active: bool,
}
