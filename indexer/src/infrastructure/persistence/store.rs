//! Storage seam used by the sync orchestrator.
//!
//! A run opens one [`SyncTransaction`], performs every write through it and
//! commits at the end. Dropping an uncommitted transaction rolls it back,
//! so readers only ever see the previous run or the complete new one.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::models::{
    Holder, HolderHistoryEntry, HolderSnapshot, OwnershipEntry, TransferRecord,
};
use crate::infrastructure::persistence::error::DbError;

#[async_trait]
pub trait SyncStore: Send + Sync {
    type Transaction: SyncTransaction;

    async fn begin(&self) -> Result<Self::Transaction, DbError>;
}

#[async_trait]
pub trait SyncTransaction: Send + Sized {
    /// Deletes transactions, holders and token ownership. History and
    /// snapshots are kept.
    async fn clear_current_state(&mut self) -> Result<(), DbError>;

    /// Inserts transfers, skipping rows whose `(hash, token_id)` already
    /// exists. Returns the number of rows written.
    async fn insert_transfers(&mut self, records: &[TransferRecord]) -> Result<u64, DbError>;

    async fn insert_ownership(
        &mut self,
        contract_address: &str,
        entries: &[OwnershipEntry],
    ) -> Result<(), DbError>;

    async fn insert_holders(&mut self, holders: &[Holder]) -> Result<(), DbError>;

    /// Addresses that already have a history entry
    async fn known_holder_addresses(&mut self) -> Result<HashSet<String>, DbError>;

    /// Appends first-seen entries; existing addresses are left untouched
    async fn insert_history(&mut self, entries: &[HolderHistoryEntry]) -> Result<(), DbError>;

    /// Number of transfers currently stored
    async fn count_transfers(&mut self) -> Result<u64, DbError>;

    /// Appends a snapshot. Snapshots are never updated or deleted.
    async fn append_snapshot(&mut self, snapshot: &HolderSnapshot) -> Result<(), DbError>;

    /// Inserts or replaces a statistics value
    async fn put_statistic(&mut self, key: &str, value: &str) -> Result<(), DbError>;

    async fn commit(self) -> Result<(), DbError>;
}
