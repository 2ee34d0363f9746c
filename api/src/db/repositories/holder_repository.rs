use sea_orm::*;
use std::sync::Arc;

use crate::db::DbError;
use crate::entity::holders;

pub struct HolderRepository {
    conn: Arc<DatabaseConnection>,
}

impl HolderRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Largest holders first
    pub async fn top(&self, limit: u64) -> Result<Vec<holders::Model>, DbError> {
        holders::Entity::find()
            .order_by_desc(holders::Column::NftCount)
            .order_by_asc(holders::Column::Address)
            .limit(limit)
            .all(self.conn.as_ref())
            .await
            .map_err(Into::into)
    }

    pub async fn count(&self) -> Result<u64, DbError> {
        Ok(holders::Entity::find().count(self.conn.as_ref()).await?)
    }
}
