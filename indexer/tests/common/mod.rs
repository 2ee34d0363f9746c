#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use holders_indexer::application::sync::SyncSettings;
use holders_indexer::config::FetchFailurePolicy;
use holders_indexer::domain::models::{
    Holder, HolderHistoryEntry, HolderSnapshot, OwnershipEntry, TransferRecord,
};
use holders_indexer::infrastructure::explorer::{ApiClientError, TransferPage, TransferSource};
use holders_indexer::infrastructure::persistence::{DbError, SyncStore, SyncTransaction};

pub const CONTRACT: &str = "0xcontract";
pub const ALICE: &str = "0x00000000000000000000000000000000000a11ce";
pub const BOB: &str = "0x0000000000000000000000000000000000000b0b";
pub const CAROL: &str = "0x00000000000000000000000000000000000ca701";

pub fn transfer(hash: &str, block: u64, from: &str, to: &str, token: &str) -> TransferRecord {
    TransferRecord::new(hash, block, 1_700_000_000 + block, from, to, token, CONTRACT)
}

pub fn settings(page_size: usize, max_pages: u32) -> SyncSettings {
    SyncSettings {
        contract_address: CONTRACT.to_string(),
        page_size,
        max_pages,
        batch_size: 2,
        fetch_failure_policy: FetchFailurePolicy::Abort,
        run_timeout: Duration::from_secs(60),
    }
}

/// Canned answer for one page request
pub enum Scripted {
    Page(Vec<TransferRecord>),
    Exhausted,
    Fail(String),
}

/// Transfer source serving either a scripted page sequence or, once the
/// script is empty, block-range pages over `history` like the explorer does.
#[derive(Default)]
pub struct FakeSource {
    pub total_supply: Mutex<u64>,
    pub history: Mutex<Vec<TransferRecord>>,
    pub script: Mutex<VecDeque<Scripted>>,
    /// Zero-based page call that fails
    pub fail_at_call: Mutex<Option<usize>>,
    pub page_delay: Mutex<Option<Duration>>,
    pub calls: AtomicUsize,
    pub requested_starts: Mutex<Vec<Option<u64>>>,
}

impl FakeSource {
    pub fn with_history(total_supply: u64, history: Vec<TransferRecord>) -> Self {
        let source = FakeSource::default();
        *source.total_supply.lock().unwrap() = total_supply;
        *source.history.lock().unwrap() = history;
        source
    }

    pub fn scripted(pages: Vec<Scripted>) -> Self {
        let source = FakeSource::default();
        *source.script.lock().unwrap() = pages.into();
        source
    }

    pub fn push_history(&self, record: TransferRecord) {
        self.history.lock().unwrap().push(record);
    }
}

#[async_trait]
impl TransferSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn fetch_total_supply(&self) -> Result<u64, ApiClientError> {
        Ok(*self.total_supply.lock().unwrap())
    }

    async fn fetch_transfer_page(
        &self,
        start_block: Option<u64>,
        page_size: usize,
    ) -> Result<TransferPage, ApiClientError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested_starts.lock().unwrap().push(start_block);

        let delay = *self.page_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail_at_call.lock().unwrap() == Some(call) {
            return Err(ApiClientError::ApiError("rate limit reached".to_string()));
        }

        let scripted = self.script.lock().unwrap().pop_front();
        if let Some(answer) = scripted {
            return match answer {
                Scripted::Page(records) => Ok(TransferPage::Records(records)),
                Scripted::Exhausted => Ok(TransferPage::Exhausted),
                Scripted::Fail(msg) => Err(ApiClientError::ApiError(msg)),
            };
        }

        let mut history = self.history.lock().unwrap().clone();
        history.sort_by_key(|record| record.block_number);
        let page: Vec<TransferRecord> = history
            .into_iter()
            .filter(|record| record.block_number >= start_block.unwrap_or(0))
            .take(page_size)
            .collect();

        if page.is_empty() {
            Ok(TransferPage::Exhausted)
        } else {
            Ok(TransferPage::Records(page))
        }
    }
}

/// Everything a committed sync leaves behind
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub transfers: Vec<TransferRecord>,
    pub ownership: BTreeMap<String, String>,
    pub holders: Vec<Holder>,
    pub history: BTreeMap<String, HolderHistoryEntry>,
    pub snapshots: Vec<HolderSnapshot>,
    pub statistics: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    InsertTransfers,
    InsertHolders,
    AppendSnapshot,
    Commit,
}

/// Store that copies committed state into each transaction and swaps it
/// back on commit
#[derive(Default, Clone)]
pub struct MemoryStore {
    pub committed: Arc<Mutex<MemoryState>>,
    pub fail_at: Arc<Mutex<Option<FailPoint>>>,
    pub begins: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn state(&self) -> MemoryState {
        self.committed.lock().unwrap().clone()
    }

    pub fn fail_at(&self, point: Option<FailPoint>) {
        *self.fail_at.lock().unwrap() = point;
    }
}

pub struct MemoryTransaction {
    working: MemoryState,
    committed: Arc<Mutex<MemoryState>>,
    fail_at: Option<FailPoint>,
}

impl MemoryTransaction {
    fn check(&self, point: FailPoint) -> Result<(), DbError> {
        if self.fail_at == Some(point) {
            Err(DbError::QueryError(format!("injected failure at {:?}", point)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SyncStore for MemoryStore {
    type Transaction = MemoryTransaction;

    async fn begin(&self) -> Result<Self::Transaction, DbError> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryTransaction {
            working: self.state(),
            committed: self.committed.clone(),
            fail_at: *self.fail_at.lock().unwrap(),
        })
    }
}

#[async_trait]
impl SyncTransaction for MemoryTransaction {
    async fn clear_current_state(&mut self) -> Result<(), DbError> {
        self.working.transfers.clear();
        self.working.holders.clear();
        self.working.ownership.clear();
        Ok(())
    }

    async fn insert_transfers(&mut self, records: &[TransferRecord]) -> Result<u64, DbError> {
        self.check(FailPoint::InsertTransfers)?;
        let mut existing: HashSet<(String, String)> =
            self.working.transfers.iter().map(|r| r.dedup_key()).collect();
        let mut inserted = 0;
        for record in records {
            if existing.insert(record.dedup_key()) {
                self.working.transfers.push(record.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn insert_ownership(
        &mut self,
        _contract_address: &str,
        entries: &[OwnershipEntry],
    ) -> Result<(), DbError> {
        for entry in entries {
            self.working
                .ownership
                .entry(entry.token_id.clone())
                .or_insert_with(|| entry.current_owner.clone());
        }
        Ok(())
    }

    async fn insert_holders(&mut self, holders: &[Holder]) -> Result<(), DbError> {
        self.check(FailPoint::InsertHolders)?;
        self.working.holders.extend_from_slice(holders);
        Ok(())
    }

    async fn known_holder_addresses(&mut self) -> Result<HashSet<String>, DbError> {
        Ok(self.working.history.keys().cloned().collect())
    }

    async fn insert_history(&mut self, entries: &[HolderHistoryEntry]) -> Result<(), DbError> {
        for entry in entries {
            self.working
                .history
                .entry(entry.address.clone())
                .or_insert_with(|| entry.clone());
        }
        Ok(())
    }

    async fn count_transfers(&mut self) -> Result<u64, DbError> {
        Ok(self.working.transfers.len() as u64)
    }

    async fn append_snapshot(&mut self, snapshot: &HolderSnapshot) -> Result<(), DbError> {
        self.check(FailPoint::AppendSnapshot)?;
        self.working.snapshots.push(snapshot.clone());
        Ok(())
    }

    async fn put_statistic(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.working
            .statistics
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn commit(self) -> Result<(), DbError> {
        self.check(FailPoint::Commit)?;
        *self.committed.lock().unwrap() = self.working;
        Ok(())
    }
}
