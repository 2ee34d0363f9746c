// Upstream endpoint probe

use holders_indexer::infrastructure::explorer::ProbeResult;
use serde::Serialize;

use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResponse {
    pub message: String,
    pub contract_address: String,
    pub total_endpoints_tested: usize,
    pub working_endpoints: usize,
    pub results: Vec<ProbeResult>,
}

/// Queries the explorer endpoints concurrently; nothing is written
pub async fn probe(state: &AppState) -> ExplorerResult<ProbeResponse> {
    let client = state.explorer.as_ref().ok_or_else(|| {
        ExplorerError::Configuration("ETHERSCAN_API_KEY is not set".to_string())
    })?;

    let results = client.probe_endpoints().await;
    let working_endpoints = results.iter().filter(|result| result.success).count();

    Ok(ProbeResponse {
        message: "Testing Etherscan API V2 endpoints for the tracked contract".to_string(),
        contract_address: client.contract_address().to_string(),
        total_endpoints_tested: results.len(),
        working_endpoints,
        results,
    })
}
