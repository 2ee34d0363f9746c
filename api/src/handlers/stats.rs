use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::ExplorerResult;
use crate::handlers::AppState;
use crate::services::stats_service::{self, StatsResponse};

/// Handler for GET /stats - 404 until the first sync has committed a snapshot
pub async fn get_stats(State(state): State<AppState>) -> ExplorerResult<Json<StatsResponse>> {
    let response = stats_service::get_stats(&state, Utc::now()).await?;
    Ok(Json(response))
}
