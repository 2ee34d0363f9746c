// Sync trigger and status

use holders_indexer::application::sync::{SyncPhase, SyncReport};
use holders_indexer::domain::errors::SyncError;
use serde::Serialize;

use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::services::format;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStats {
    pub total_supply: u64,
    pub transactions_processed: u64,
    pub transactions_saved: u64,
    pub tokens_tracked: u64,
    pub unique_holders: u64,
    pub new_holders: u64,
    pub coverage: String,
    pub incomplete: bool,
}

impl From<&SyncReport> for SyncStats {
    fn from(report: &SyncReport) -> Self {
        SyncStats {
            total_supply: report.total_supply,
            transactions_processed: report.transactions_processed,
            transactions_saved: report.transactions_saved,
            tokens_tracked: report.tokens_tracked,
            unique_holders: report.unique_holders,
            new_holders: report.new_holders,
            coverage: format::coverage(report.tokens_tracked, report.total_supply),
            incomplete: report.incomplete,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    pub stats: SyncStats,
}

#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    pub running: bool,
    pub phase: SyncPhase,
}

/// Runs one sync and renders its report
pub async fn run_sync(state: &AppState) -> ExplorerResult<SyncResponse> {
    let orchestrator = state.sync.as_ref().ok_or_else(|| {
        ExplorerError::Configuration("ETHERSCAN_API_KEY is not set".to_string())
    })?;

    match orchestrator.run().await {
        Ok(report) => {
            let message = if report.incomplete {
                "Sync completed with incomplete transfer history".to_string()
            } else {
                "Sync completed successfully".to_string()
            };
            Ok(SyncResponse {
                success: true,
                message,
                stats: SyncStats::from(&report),
            })
        }
        Err(SyncError::InProgress) => Err(ExplorerError::Conflict(
            "A sync is already running; retry when it finishes".to_string(),
        )),
        Err(SyncError::Configuration(e)) => Err(ExplorerError::Configuration(e.to_string())),
        Err(e) => Err(ExplorerError::SyncFailed(e.to_string())),
    }
}

pub fn sync_status(state: &AppState) -> SyncStatusResponse {
    match &state.sync {
        Some(orchestrator) => SyncStatusResponse {
            running: orchestrator.is_running(),
            phase: orchestrator.phase(),
        },
        None => SyncStatusResponse {
            running: false,
            phase: SyncPhase::Idle,
        },
    }
}
