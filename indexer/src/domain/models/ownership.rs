use serde::{Deserialize, Serialize};

/// Current owner of a single token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipEntry {
    pub token_id: String,
    /// To-address of the chronologically last transfer; may be the burn address
    pub current_owner: String,
}

/// Current-state holder row, fully replaced on every sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    pub address: String,
    pub nft_count: u32,
    /// Share of total supply held, in percent
    pub percentage: f64,
}
