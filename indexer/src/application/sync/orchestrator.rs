//! Sequences one full sync run.
//!
//! fetch supply -> fetch transfers -> (one transaction: clear, persist
//! transfers, resolve, persist ownership and holders, append history,
//! append snapshot, statistics) -> commit.

use chrono::{SecondsFormat, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

use crate::application::sync::fetcher::{fetch_all_transfers, FetchOutcome};
use crate::application::sync::phase::SyncPhase;
use crate::application::sync::report::SyncReport;
use crate::config::{AppConfig, FetchFailurePolicy};
use crate::domain::errors::SyncError;
use crate::domain::models::SnapshotTotals;
use crate::domain::services::history_tracker::diff_new_holders;
use crate::domain::services::ownership_resolver::{resolve, sort_chronologically};
use crate::domain::services::snapshot_writer::build_snapshot;
use crate::infrastructure::explorer::TransferSource;
use crate::infrastructure::persistence::entities::statistics::{LAST_SYNC_KEY, TOTAL_SUPPLY_KEY};
use crate::infrastructure::persistence::{SyncStore, SyncTransaction};
use crate::utils::logging;

/// Tunables for a sync run
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub contract_address: String,
    pub page_size: usize,
    pub max_pages: u32,
    pub batch_size: usize,
    pub fetch_failure_policy: FetchFailurePolicy,
    pub run_timeout: Duration,
}

impl SyncSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            contract_address: config.explorer.contract_address.to_lowercase(),
            page_size: config.explorer.page_size,
            max_pages: config.explorer.max_pages,
            batch_size: config.sync.batch_size,
            fetch_failure_policy: config.sync.fetch_failure_policy,
            run_timeout: config.sync.run_timeout,
        }
    }
}

/// Publishes `Idle` when dropped, including when a run future is cancelled
struct IdleOnDrop<'a>(&'a watch::Sender<SyncPhase>);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.send_replace(SyncPhase::Idle);
    }
}

/// Runs syncs against a transfer source and a store, one at a time
pub struct SyncOrchestrator<S, P> {
    source: S,
    store: P,
    settings: SyncSettings,
    run_lock: Mutex<()>,
    phase_tx: watch::Sender<SyncPhase>,
}

impl<S, P> SyncOrchestrator<S, P>
where
    S: TransferSource,
    P: SyncStore,
{
    pub fn new(source: S, store: P, settings: SyncSettings) -> Self {
        let (phase_tx, _) = watch::channel(SyncPhase::Idle);
        Self {
            source,
            store,
            settings,
            run_lock: Mutex::new(()),
            phase_tx,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Current phase of the in-flight run, `Idle` otherwise
    pub fn phase(&self) -> SyncPhase {
        *self.phase_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncPhase> {
        self.phase_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    fn enter(&self, phase: SyncPhase) {
        logging::log_info(&format!("Sync phase: {}", phase));
        self.phase_tx.send_replace(phase);
    }

    /// Runs one sync. Fails with `InProgress` when another run holds the
    /// lock. Nothing is visible to readers unless the run commits.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let _guard = self.run_lock.try_lock().map_err(|_| SyncError::InProgress)?;
        // Declared after the lock guard so the phase resets before the lock is released
        let _idle = IdleOnDrop(&self.phase_tx);

        logging::log_info(&format!(
            "Starting sync for contract {} via {}",
            self.settings.contract_address,
            self.source.source_name()
        ));

        let result = match tokio::time::timeout(self.settings.run_timeout, self.execute()).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::TimedOut(self.settings.run_timeout)),
        };

        match &result {
            Ok(report) => logging::log_info(&format!(
                "Sync completed: {} transactions processed, {} saved, {} tokens tracked, {} holders ({} new), coverage {:.2}%{}",
                report.transactions_processed,
                report.transactions_saved,
                report.tokens_tracked,
                report.unique_holders,
                report.new_holders,
                report.coverage,
                if report.incomplete { " (incomplete)" } else { "" }
            )),
            Err(e) => logging::log_error(&format!("Sync aborted: {}", e)),
        }

        result
    }

    /// Runs a sync every `interval` until `shutdown` resolves. A run still in
    /// flight at shutdown is dropped, which rolls back its transaction.
    pub async fn run_periodically<F>(&self, interval: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tokio::select! {
                        // Failures are already logged by `run`; the next tick retries
                        _ = self.run() => {}
                        _ = &mut shutdown => {
                            logging::log_info("Shutdown requested, cancelling in-flight sync");
                            return;
                        }
                    }
                }
                _ = &mut shutdown => {
                    logging::log_info("Shutdown requested, stopping periodic sync");
                    return;
                }
            }
        }
    }

    async fn execute(&self) -> Result<SyncReport, SyncError> {
        let batch_size = self.settings.batch_size.max(1);

        self.enter(SyncPhase::FetchingSupply);
        let total_supply = self.source.fetch_total_supply().await?;
        logging::log_info(&format!("Total supply: {}", total_supply));

        self.enter(SyncPhase::FetchingTransfers);
        let fetch = fetch_all_transfers(
            &self.source,
            self.settings.page_size,
            self.settings.max_pages,
        )
        .await;
        let incomplete = match fetch.outcome {
            FetchOutcome::Exhausted => false,
            FetchOutcome::CapReached => true,
            FetchOutcome::Failed(e) => match self.settings.fetch_failure_policy {
                FetchFailurePolicy::Abort => return Err(SyncError::UpstreamFetch(e)),
                FetchFailurePolicy::Lenient => {
                    logging::log_warning(&format!(
                        "Continuing with {} transfers from {} pages after fetch failure: {}",
                        fetch.records.len(),
                        fetch.pages_fetched,
                        e
                    ));
                    true
                }
            },
        };
        if fetch.duplicates_skipped > 0 {
            logging::log_info(&format!(
                "Skipped {} duplicate transfers across page boundaries",
                fetch.duplicates_skipped
            ));
        }

        let mut records = fetch.records;
        sort_chronologically(&mut records);
        let transactions_processed = records.len() as u64;

        self.enter(SyncPhase::ClearingState);
        let mut txn = self.store.begin().await?;
        txn.clear_current_state().await?;

        self.enter(SyncPhase::PersistingTransactions);
        let mut transactions_saved = 0u64;
        for chunk in records.chunks(batch_size) {
            transactions_saved += txn.insert_transfers(chunk).await?;
            logging::log_info(&format!(
                "Saved {}/{} transactions",
                transactions_saved, transactions_processed
            ));
        }

        self.enter(SyncPhase::Resolving);
        let resolution = resolve(&records);

        self.enter(SyncPhase::PersistingOwnership);
        let ownership = resolution.ownership_entries();
        for chunk in ownership.chunks(batch_size) {
            txn.insert_ownership(&self.settings.contract_address, chunk).await?;
        }

        self.enter(SyncPhase::PersistingHolders);
        let holders = resolution.holders(total_supply);
        for chunk in holders.chunks(batch_size) {
            txn.insert_holders(chunk).await?;
        }

        self.enter(SyncPhase::UpdatingHistory);
        let now = Utc::now();
        let known = txn.known_holder_addresses().await?;
        let new_entries = diff_new_holders(&resolution.holder_counts, &known, now);
        for chunk in new_entries.chunks(batch_size) {
            txn.insert_history(chunk).await?;
        }

        self.enter(SyncPhase::Snapshotting);
        let totals = SnapshotTotals {
            total_holders: resolution.total_holders(),
            total_supply,
            total_transactions: txn.count_transfers().await?,
            unique_tokens_tracked: resolution.unique_tokens_tracked(),
        };
        let snapshot = build_snapshot(totals, now);
        txn.append_snapshot(&snapshot).await?;
        let last_sync = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        txn.put_statistic(TOTAL_SUPPLY_KEY, &total_supply.to_string()).await?;
        txn.put_statistic(LAST_SYNC_KEY, &last_sync).await?;

        self.enter(SyncPhase::Committing);
        txn.commit().await?;

        Ok(SyncReport {
            total_supply,
            transactions_processed,
            transactions_saved,
            tokens_tracked: resolution.unique_tokens_tracked(),
            unique_holders: resolution.total_holders(),
            new_holders: new_entries.len() as u64,
            coverage: snapshot.coverage,
            incomplete,
            snapshot,
        })
    }
}
