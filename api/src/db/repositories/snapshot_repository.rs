// Read access to the append-only snapshot series

use chrono::{DateTime, Utc};
use holders_indexer::domain::models::HolderSnapshot;
use sea_orm::*;
use std::sync::Arc;

use crate::db::DbError;
use crate::entity::holder_snapshots;

pub struct SnapshotRepository {
    conn: Arc<DatabaseConnection>,
}

impl SnapshotRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn latest(&self) -> Result<Option<HolderSnapshot>, DbError> {
        let row = holder_snapshots::Entity::find()
            .order_by_desc(holder_snapshots::Column::Timestamp)
            .one(self.conn.as_ref())
            .await?;
        Ok(row.map(to_domain_model))
    }

    /// Nearest snapshot taken at or before `boundary`
    pub async fn latest_at_or_before(
        &self,
        boundary: DateTime<Utc>,
    ) -> Result<Option<HolderSnapshot>, DbError> {
        let row = holder_snapshots::Entity::find()
            .filter(holder_snapshots::Column::Timestamp.lte(boundary))
            .order_by_desc(holder_snapshots::Column::Timestamp)
            .one(self.conn.as_ref())
            .await?;
        Ok(row.map(to_domain_model))
    }

    /// Oldest snapshots first
    pub async fn series(&self, limit: u64) -> Result<Vec<HolderSnapshot>, DbError> {
        let rows = holder_snapshots::Entity::find()
            .order_by_asc(holder_snapshots::Column::Timestamp)
            .limit(limit)
            .all(self.conn.as_ref())
            .await?;
        Ok(rows.into_iter().map(to_domain_model).collect())
    }
}

fn to_domain_model(model: holder_snapshots::Model) -> HolderSnapshot {
    HolderSnapshot {
        timestamp: model.timestamp,
        total_holders: model.total_holders.max(0) as u64,
        total_supply: model.total_supply.max(0) as u64,
        total_transactions: model.total_transactions.max(0) as u64,
        unique_tokens_tracked: model.unique_tokens_tracked.max(0) as u64,
        coverage: model.coverage,
    }
}
