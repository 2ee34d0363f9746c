use axum::{extract::State, Json};

use crate::error::ExplorerResult;
use crate::handlers::AppState;
use crate::services::sync_service::{self, SyncResponse, SyncStatusResponse};

/// Handler for POST /sync - runs one full sync and waits for it
pub async fn trigger_sync(State(state): State<AppState>) -> ExplorerResult<Json<SyncResponse>> {
    tracing::info!("Sync requested");
    let response = sync_service::run_sync(&state).await?;
    Ok(Json(response))
}

/// Handler for GET /sync/status
pub async fn get_sync_status(State(state): State<AppState>) -> Json<SyncStatusResponse> {
    Json(sync_service::sync_status(&state))
}
