// Upstream diagnostic endpoint handler implementation

use axum::{extract::State, Json};

use crate::error::ExplorerResult;
use crate::handlers::AppState;
use crate::services::diagnostic::{self, ProbeResponse};

/// Handler for GET /test - Probes the explorer endpoints without touching state
pub async fn test_endpoints(State(state): State<AppState>) -> ExplorerResult<Json<ProbeResponse>> {
    let response = diagnostic::probe(&state).await?;
    Ok(Json(response))
}
