// Snapshot-based growth statistics

use chrono::{DateTime, Utc};
use holders_indexer::domain::models::HolderSnapshot;
use holders_indexer::domain::services::growth::growth_metrics;
use holders_indexer::domain::services::GrowthWindow;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::services::format;

/// Points returned for the history chart
const HISTORY_LIMIT: u64 = 100;

const GROWTH_NOTE: &str = "New holders are tracked from their first appearance in the blockchain. \
                           Run POST /sync regularly to update metrics.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStats {
    pub total_holders: u64,
    pub total_supply: u64,
    pub unique_tokens_tracked: u64,
    pub coverage: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowGrowth {
    pub new_holders: u64,
    pub holder_change: Option<i64>,
    pub percentage_change: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub total_holders: u64,
    pub coverage: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub current: CurrentStats,
    /// Keyed by window label (`last24Hours`, `last7Days`, `last30Days`)
    pub growth: BTreeMap<&'static str, WindowGrowth>,
    pub history: Vec<HistoryPoint>,
    pub note: String,
}

pub async fn get_stats(state: &AppState, now: DateTime<Utc>) -> ExplorerResult<StatsResponse> {
    let repositories = &state.repositories;

    let current = repositories.snapshots.latest().await?.ok_or_else(|| {
        ExplorerError::NotFound("No snapshots available. Run POST /sync first.".to_string())
    })?;

    let mut growth = BTreeMap::new();
    for window in GrowthWindow::STANDARD {
        let cutoff = window.cutoff(now);
        let baseline = repositories.snapshots.latest_at_or_before(cutoff).await?;
        let new_holders = repositories.history.count_first_seen_since(cutoff).await?;
        growth.insert(window.label, window_growth(&current, baseline.as_ref(), new_holders));
    }

    let history = repositories
        .snapshots
        .series(HISTORY_LIMIT)
        .await?
        .into_iter()
        .map(|snapshot| HistoryPoint {
            timestamp: snapshot.timestamp,
            total_holders: snapshot.total_holders,
            coverage: snapshot.coverage,
        })
        .collect();

    Ok(StatsResponse {
        success: true,
        current: CurrentStats {
            total_holders: current.total_holders,
            total_supply: current.total_supply,
            unique_tokens_tracked: current.unique_tokens_tracked,
            coverage: format::percent(current.coverage),
            timestamp: current.timestamp,
        },
        growth,
        history,
        note: GROWTH_NOTE.to_string(),
    })
}

fn window_growth(
    current: &HolderSnapshot,
    baseline: Option<&HolderSnapshot>,
    new_holders: u64,
) -> WindowGrowth {
    let metrics = growth_metrics(current, baseline, new_holders);
    WindowGrowth {
        new_holders: metrics.new_holders,
        holder_change: metrics.holder_change,
        percentage_change: metrics.percentage_change.map(format::percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(holders: u64) -> HolderSnapshot {
        HolderSnapshot {
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            total_holders: holders,
            total_supply: 100,
            total_transactions: 10,
            unique_tokens_tracked: 50,
            coverage: 50.0,
        }
    }

    #[test]
    fn test_window_growth_strings() {
        let growth = window_growth(&snapshot(120), Some(&snapshot(100)), 25);
        assert_eq!(growth.new_holders, 25);
        assert_eq!(growth.holder_change, Some(20));
        assert_eq!(growth.percentage_change.as_deref(), Some("20.00%"));

        let no_baseline = window_growth(&snapshot(120), None, 3);
        assert_eq!(no_baseline.holder_change, None);
        assert_eq!(no_baseline.percentage_change, None);
    }
}
