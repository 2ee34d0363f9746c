//! Holder-history ledger maintenance.
//!
//! An address gets exactly one history entry, created the first time it is
//! seen holding a token. Existing entries are never refreshed, so
//! `last_seen`, `nft_count` and `is_active` reflect the first observation.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};

use crate::domain::models::HolderHistoryEntry;

/// Builds entries for holders absent from the previously recorded set
pub fn diff_new_holders(
    holder_counts: &BTreeMap<String, u32>,
    known_addresses: &HashSet<String>,
    now: DateTime<Utc>,
) -> Vec<HolderHistoryEntry> {
    holder_counts
        .iter()
        .filter(|(address, _)| !known_addresses.contains(address.as_str()))
        .map(|(address, &count)| HolderHistoryEntry {
            address: address.clone(),
            nft_count: count,
            first_seen: now,
            last_seen: now,
            is_active: true,
        })
        .collect()
}
