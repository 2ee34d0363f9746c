use chrono::{DateTime, Utc};
use sea_orm::*;
use std::sync::Arc;

use crate::db::DbError;
use crate::entity::holder_history;

pub struct HolderHistoryRepository {
    conn: Arc<DatabaseConnection>,
}

impl HolderHistoryRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Addresses first seen at or after `cutoff`
    pub async fn count_first_seen_since(&self, cutoff: DateTime<Utc>) -> Result<u64, DbError> {
        Ok(holder_history::Entity::find()
            .filter(holder_history::Column::FirstSeen.gte(cutoff))
            .count(self.conn.as_ref())
            .await?)
    }
}
