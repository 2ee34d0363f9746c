// Current holder rankings and coverage

use chrono::SecondsFormat;
use holders_indexer::infrastructure::persistence::entities::statistics::{
    LAST_SYNC_KEY, TOTAL_SUPPLY_KEY,
};
use serde::Serialize;

use crate::error::ExplorerResult;
use crate::handlers::AppState;
use crate::services::format;

/// Number of holders listed in the response
const TOP_HOLDERS: u64 = 10;

#[derive(Debug, Serialize)]
pub struct TopHolder {
    pub address: String,
    pub count: i32,
    pub percentage: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldersResponse {
    pub success: bool,
    pub contract_address: String,
    pub total_supply: u64,
    pub total_holders: u64,
    pub transactions_in_database: u64,
    pub tokens_tracked: u64,
    pub coverage: String,
    pub top_holders: Vec<TopHolder>,
    pub last_sync: Option<String>,
    pub note: String,
}

/// Builds the holders overview from the last committed sync
pub async fn get_holders(state: &AppState) -> ExplorerResult<HoldersResponse> {
    let repositories = &state.repositories;

    let total_supply = repositories
        .statistics
        .get(TOTAL_SUPPLY_KEY)
        .await?
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(0);
    let last_sync = repositories
        .statistics
        .get(LAST_SYNC_KEY)
        .await?
        .as_deref()
        .and_then(format::parse_timestamp);

    let top_holders = repositories
        .holders
        .top(TOP_HOLDERS)
        .await?
        .into_iter()
        .map(|holder| TopHolder {
            address: holder.address,
            count: holder.nft_count,
            percentage: format::percent(holder.percentage),
        })
        .collect();

    let total_holders = repositories.holders.count().await?;
    let tokens_tracked = repositories.ownership.count().await?;
    let transactions_in_database = repositories.transactions.count().await?;

    Ok(HoldersResponse {
        success: true,
        contract_address: state.contract_address.clone(),
        total_supply,
        total_holders,
        transactions_in_database,
        tokens_tracked,
        coverage: format::coverage(tokens_tracked, total_supply),
        top_holders,
        last_sync: last_sync
            .as_ref()
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        note: format::sync_note(last_sync.as_ref()),
    })
}
