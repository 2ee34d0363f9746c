mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{settings, transfer, FailPoint, FakeSource, MemoryStore, ALICE, BOB, CAROL};
use holders_indexer::application::sync::{SyncOrchestrator, SyncPhase};
use holders_indexer::config::FetchFailurePolicy;
use holders_indexer::domain::errors::SyncError;
use holders_indexer::domain::models::{TransferRecord, ZERO_ADDRESS};

fn collection_history() -> Vec<TransferRecord> {
    vec![
        transfer("0x1", 1, ZERO_ADDRESS, ALICE, "1"),
        transfer("0x2", 2, ZERO_ADDRESS, ALICE, "2"),
        transfer("0x3", 3, ZERO_ADDRESS, BOB, "3"),
        transfer("0x4", 4, ALICE, BOB, "1"),
        transfer("0x5", 5, BOB, ZERO_ADDRESS, "3"),
    ]
}

#[tokio::test]
async fn test_sync_rebuilds_current_state() {
    let store = MemoryStore::default();
    let orchestrator = SyncOrchestrator::new(
        FakeSource::with_history(10, collection_history()),
        store.clone(),
        settings(100, 5),
    );

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.total_supply, 10);
    assert_eq!(report.transactions_processed, 5);
    assert_eq!(report.transactions_saved, 5);
    assert_eq!(report.tokens_tracked, 3);
    assert_eq!(report.unique_holders, 2);
    assert_eq!(report.new_holders, 2);
    assert!((report.coverage - 30.0).abs() < 1e-9);
    assert!(!report.incomplete);

    let state = store.state();
    assert_eq!(state.ownership["1"], BOB);
    assert_eq!(state.ownership["2"], ALICE);
    assert_eq!(state.ownership["3"], ZERO_ADDRESS);
    assert_eq!(state.holders.len(), 2);
    assert!(state.holders.iter().all(|h| h.nft_count == 1));
    assert!(state.holders.iter().all(|h| (h.percentage - 10.0).abs() < 1e-9));
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.snapshots.len(), 1);
    assert_eq!(state.snapshots[0].total_transactions, 5);
    assert_eq!(state.statistics["totalSupply"], "10");
    assert!(state.statistics["lastSync"].ends_with('Z'));
    assert_eq!(orchestrator.phase(), SyncPhase::Idle);
    assert!(!orchestrator.is_running());
}

#[tokio::test]
async fn test_each_run_appends_one_snapshot() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    let orchestrator = SyncOrchestrator::new(source, store.clone(), settings(2, 10));

    orchestrator.run().await.unwrap();
    let first = store.state().snapshots[0].clone();

    let second = orchestrator.run().await.unwrap();
    assert_eq!(second.new_holders, 0);

    let third = orchestrator.run().await.unwrap();
    assert_eq!(third.new_holders, 0);

    let state = store.state();
    assert_eq!(state.snapshots.len(), 3);
    assert_eq!(state.snapshots[0], first);
    assert!(state
        .snapshots
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    // the current-state tables are replaced, not accumulated
    assert_eq!(state.transfers.len(), 5);
    assert_eq!(state.history.len(), 2);
}

#[tokio::test]
async fn test_history_created_once_per_address() {
    let store = MemoryStore::default();
    let orchestrator = SyncOrchestrator::new(
        FakeSource::with_history(10, collection_history()),
        store.clone(),
        settings(100, 5),
    );
    orchestrator.run().await.unwrap();
    let alice_entry = store.state().history[ALICE].clone();

    // Alice sells her last token to Carol
    orchestrator
        .source()
        .push_history(transfer("0x6", 6, ALICE, CAROL, "2"));
    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.new_holders, 1);
    assert_eq!(report.unique_holders, 2);
    let state = store.state();
    assert_eq!(state.history.len(), 3);
    assert_eq!(state.history[ALICE], alice_entry);
    assert!(state.history[ALICE].is_active);
    assert_eq!(state.history[CAROL].nft_count, 1);
}

#[tokio::test]
async fn test_persistence_failure_keeps_previous_state() {
    let store = MemoryStore::default();
    let orchestrator = SyncOrchestrator::new(
        FakeSource::with_history(10, collection_history()),
        store.clone(),
        settings(100, 5),
    );
    orchestrator.run().await.unwrap();
    let before = store.state();

    for point in [FailPoint::InsertTransfers, FailPoint::InsertHolders, FailPoint::Commit] {
        store.fail_at(Some(point));
        let err = orchestrator.run().await.unwrap_err();
        assert!(matches!(err, SyncError::Persistence(_)), "{:?}", point);

        let after = store.state();
        assert_eq!(after.snapshots, before.snapshots);
        assert_eq!(after.statistics, before.statistics);
        assert_eq!(after.transfers, before.transfers);
        assert_eq!(after.holders, before.holders);
    }
    assert_eq!(orchestrator.phase(), SyncPhase::Idle);
}

#[tokio::test]
async fn test_fetch_failure_aborts_before_clearing() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    *source.fail_at_call.lock().unwrap() = Some(1);
    let orchestrator = SyncOrchestrator::new(source, store.clone(), settings(2, 10));

    let err = orchestrator.run().await.unwrap_err();

    assert!(matches!(err, SyncError::UpstreamFetch(_)));
    assert_eq!(store.begins.load(Ordering::SeqCst), 0);
    assert!(store.state().snapshots.is_empty());
}

#[tokio::test]
async fn test_lenient_policy_keeps_partial_fetch() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    *source.fail_at_call.lock().unwrap() = Some(1);
    let mut lenient = settings(2, 10);
    lenient.fetch_failure_policy = FetchFailurePolicy::Lenient;
    let orchestrator = SyncOrchestrator::new(source, store.clone(), lenient);

    let report = orchestrator.run().await.unwrap();

    assert!(report.incomplete);
    assert_eq!(report.transactions_processed, 2);
    assert_eq!(store.state().snapshots.len(), 1);
}

#[tokio::test]
async fn test_page_cap_reports_incomplete() {
    let store = MemoryStore::default();
    let orchestrator = SyncOrchestrator::new(
        FakeSource::with_history(10, collection_history()),
        store.clone(),
        settings(2, 1),
    );

    let report = orchestrator.run().await.unwrap();

    assert!(report.incomplete);
    assert_eq!(report.transactions_processed, 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_run_rejected() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    *source.page_delay.lock().unwrap() = Some(Duration::from_millis(100));
    let orchestrator = SyncOrchestrator::new(source, store.clone(), settings(100, 5));

    let (first, second) = tokio::join!(orchestrator.run(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let running = orchestrator.is_running();
        (running, orchestrator.run().await)
    });

    assert!(first.is_ok());
    let (was_running, second) = second;
    assert!(was_running);
    assert!(matches!(second, Err(SyncError::InProgress)));
    assert_eq!(store.state().snapshots.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_rolls_back() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    *source.page_delay.lock().unwrap() = Some(Duration::from_secs(30));
    let mut short = settings(100, 5);
    short.run_timeout = Duration::from_secs(1);
    let orchestrator = SyncOrchestrator::new(source, store.clone(), short);

    let err = orchestrator.run().await.unwrap_err();

    assert!(matches!(err, SyncError::TimedOut(_)));
    assert!(store.state().snapshots.is_empty());
    assert_eq!(orchestrator.phase(), SyncPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_run_resets_phase() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    *source.page_delay.lock().unwrap() = Some(Duration::from_secs(30));
    let orchestrator = SyncOrchestrator::new(source, store.clone(), settings(100, 5));

    // The caller gives up and drops the run future mid-fetch
    let cancelled = tokio::time::timeout(Duration::from_secs(1), orchestrator.run()).await;

    assert!(cancelled.is_err());
    assert!(!orchestrator.is_running());
    assert_eq!(orchestrator.phase(), SyncPhase::Idle);
    assert!(store.state().snapshots.is_empty());

    // The lock was released, so the next run goes through
    *orchestrator.source().page_delay.lock().unwrap() = None;
    assert!(orchestrator.run().await.is_ok());
    assert_eq!(orchestrator.phase(), SyncPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_periodic_runs_until_shutdown() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    let orchestrator = SyncOrchestrator::new(source, store.clone(), settings(100, 5));

    // Ticks at 0h, 1h and 2h; shutdown lands in between
    orchestrator
        .run_periodically(
            Duration::from_secs(3600),
            tokio::time::sleep(Duration::from_secs(9000)),
        )
        .await;

    assert_eq!(store.state().snapshots.len(), 3);
    assert_eq!(orchestrator.phase(), SyncPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_in_flight_run() {
    let store = MemoryStore::default();
    let source = FakeSource::with_history(10, collection_history());
    *source.page_delay.lock().unwrap() = Some(Duration::from_secs(300));
    let orchestrator = SyncOrchestrator::new(source, store.clone(), settings(100, 5));

    let started = tokio::time::Instant::now();
    orchestrator
        .run_periodically(
            Duration::from_secs(3600),
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await;

    assert!(started.elapsed() < Duration::from_secs(300));
    assert!(store.state().snapshots.is_empty());
    assert!(!orchestrator.is_running());
    assert_eq!(orchestrator.phase(), SyncPhase::Idle);
}
