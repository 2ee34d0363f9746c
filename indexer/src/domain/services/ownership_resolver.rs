//! Ownership reconstruction from the full transfer history.
//!
//! ## Resolution rules
//! 1. Transfers are ordered by `(block_number, timestamp)` ascending with a
//!    stable sort, so equal keys keep their input order.
//! 2. Last transfer wins: each transfer overwrites the owner of its token.
//! 3. Holder counts tally final owners, skipping the burn address. Burned
//!    tokens stay in the ownership map.
//!
//! Output maps are ordered, so resolving the same input twice yields
//! identical results.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::models::{is_burn_address, Holder, OwnershipEntry, TransferRecord};

/// Final ownership derived from a transfer set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// token id -> current owner
    pub ownership: BTreeMap<String, String>,
    /// holder address -> number of tokens held (burn address excluded)
    pub holder_counts: BTreeMap<String, u32>,
}

impl Resolution {
    /// Tokens with a known owner, burned tokens included
    pub fn unique_tokens_tracked(&self) -> u64 {
        self.ownership.len() as u64
    }

    /// Distinct addresses holding at least one token
    pub fn total_holders(&self) -> u64 {
        self.holder_counts.len() as u64
    }

    pub fn ownership_entries(&self) -> Vec<OwnershipEntry> {
        self.ownership
            .iter()
            .map(|(token_id, owner)| OwnershipEntry {
                token_id: token_id.clone(),
                current_owner: owner.clone(),
            })
            .collect()
    }

    /// Current-state holder rows, largest holders first
    pub fn holders(&self, total_supply: u64) -> Vec<Holder> {
        let mut holders: Vec<Holder> = self
            .holder_counts
            .iter()
            .map(|(address, &count)| Holder {
                address: address.clone(),
                nft_count: count,
                percentage: holder_percentage(count, total_supply),
            })
            .collect();
        holders.sort_by(|a, b| {
            b.nft_count
                .cmp(&a.nft_count)
                .then_with(|| a.address.cmp(&b.address))
        });
        holders
    }
}

/// Share of supply held, in percent; 0 when supply is unknown
pub fn holder_percentage(count: u32, total_supply: u64) -> f64 {
    if total_supply > 0 {
        (count as f64 / total_supply as f64) * 100.0
    } else {
        0.0
    }
}

/// Orders transfers chronologically. `sort_by` is stable, which fixes the
/// outcome for same-block transfers with identical timestamps.
pub fn sort_chronologically(records: &mut [TransferRecord]) {
    records.sort_by(chronological);
}

fn chronological(a: &TransferRecord, b: &TransferRecord) -> Ordering {
    a.block_number
        .cmp(&b.block_number)
        .then(a.timestamp.cmp(&b.timestamp))
}

/// Computes final owner per token and token count per holder
pub fn resolve(records: &[TransferRecord]) -> Resolution {
    let mut ordered: Vec<&TransferRecord> = records.iter().collect();
    ordered.sort_by(|a, b| chronological(a, b));

    let mut ownership = BTreeMap::new();
    for record in ordered {
        ownership.insert(record.token_id.clone(), record.to.clone());
    }

    let mut holder_counts: BTreeMap<String, u32> = BTreeMap::new();
    for owner in ownership.values() {
        if !is_burn_address(owner) {
            *holder_counts.entry(owner.clone()).or_insert(0) += 1;
        }
    }

    Resolution {
        ownership,
        holder_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ZERO_ADDRESS;

    const CONTRACT: &str = "0xcontract";

    fn transfer(hash: &str, block: u64, ts: u64, to: &str, token: &str) -> TransferRecord {
        TransferRecord::new(hash, block, ts, "0xfrom", to, token, CONTRACT)
    }

    #[test]
    fn test_last_transfer_wins_by_block_then_timestamp() {
        let records = vec![
            transfer("0x1", 5, 100, "0xaaa", "7"),
            transfer("0x2", 7, 200, "0xbbb", "7"),
            transfer("0x3", 7, 150, "0xccc", "7"),
        ];
        let resolution = resolve(&records);
        // block 7 / ts 200 sorts after block 7 / ts 150
        assert_eq!(resolution.ownership.get("7").map(String::as_str), Some("0xbbb"));

        let reversed: Vec<TransferRecord> = records.into_iter().rev().collect();
        assert_eq!(resolve(&reversed), resolution);
    }

    #[test]
    fn test_later_timestamp_in_same_block_wins() {
        let records = vec![
            transfer("0x1", 5, 100, "0xaaa", "1"),
            transfer("0x2", 7, 150, "0xccc", "1"),
            transfer("0x3", 7, 140, "0xbbb", "1"),
        ];
        let resolution = resolve(&records);
        assert_eq!(resolution.ownership["1"], "0xccc");
    }

    #[test]
    fn test_ties_resolve_by_input_order() {
        let records = vec![
            transfer("0x1", 9, 500, "0xfirst", "3"),
            transfer("0x2", 9, 500, "0xsecond", "3"),
        ];
        assert_eq!(resolve(&records).ownership["3"], "0xsecond");

        let swapped = vec![records[1].clone(), records[0].clone()];
        assert_eq!(resolve(&swapped).ownership["3"], "0xfirst");
    }

    #[test]
    fn test_burned_token_tracked_but_not_held() {
        let records = vec![
            transfer("0x1", 1, 10, "0xaaa", "1"),
            transfer("0x2", 1, 10, "0xaaa", "2"),
            transfer("0x3", 2, 20, ZERO_ADDRESS, "2"),
        ];
        let resolution = resolve(&records);
        assert_eq!(resolution.unique_tokens_tracked(), 2);
        assert_eq!(resolution.ownership["2"], ZERO_ADDRESS);
        assert_eq!(resolution.total_holders(), 1);
        assert_eq!(resolution.holder_counts["0xaaa"], 1);
        assert!(!resolution.holder_counts.contains_key(ZERO_ADDRESS));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let records = vec![
            transfer("0x1", 3, 30, "0xaaa", "1"),
            transfer("0x2", 1, 10, "0xbbb", "2"),
            transfer("0x3", 2, 20, "0xaaa", "3"),
            transfer("0x4", 4, 40, "0xccc", "1"),
        ];
        let first = resolve(&records);
        let second = resolve(&records);
        assert_eq!(first, second);
        assert_eq!(first.ownership_entries(), second.ownership_entries());
    }

    #[test]
    fn test_holders_sorted_with_percentage() {
        let records = vec![
            transfer("0x1", 1, 1, "0xaaa", "1"),
            transfer("0x2", 1, 2, "0xbbb", "2"),
            transfer("0x3", 1, 3, "0xbbb", "3"),
        ];
        let holders = resolve(&records).holders(4);
        assert_eq!(holders[0].address, "0xbbb");
        assert_eq!(holders[0].nft_count, 2);
        assert!((holders[0].percentage - 50.0).abs() < f64::EPSILON);
        assert!((holders[1].percentage - 25.0).abs() < f64::EPSILON);

        let without_supply = resolve(&records).holders(0);
        assert!(without_supply.iter().all(|h| h.percentage == 0.0));
    }

    #[test]
    fn test_sort_chronologically_is_stable() {
        let mut records = vec![
            transfer("0xb", 2, 5, "0x1", "1"),
            transfer("0xa", 1, 9, "0x2", "2"),
            transfer("0xc", 2, 5, "0x3", "3"),
        ];
        sort_chronologically(&mut records);
        let hashes: Vec<&str> = records.iter().map(|r| r.hash.as_str()).collect();
        assert_eq!(hashes, vec!["0xa", "0xb", "0xc"]);
    }
}
