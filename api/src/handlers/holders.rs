use axum::{extract::State, Json};

use crate::error::ExplorerResult;
use crate::handlers::AppState;
use crate::services::holders_service::{self, HoldersResponse};

/// Handler for GET /holders - top holders and coverage from the last sync
pub async fn get_holders(State(state): State<AppState>) -> ExplorerResult<Json<HoldersResponse>> {
    let response = holders_service::get_holders(&state).await?;
    Ok(Json(response))
}
