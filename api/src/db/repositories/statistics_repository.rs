use sea_orm::*;
use std::sync::Arc;

use crate::db::DbError;
use crate::entity::statistics;

pub struct StatisticsRepository {
    conn: Arc<DatabaseConnection>,
}

impl StatisticsRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Value stored under `key`, if any
    pub async fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        let row = statistics::Entity::find()
            .filter(statistics::Column::Key.eq(key))
            .one(self.conn.as_ref())
            .await?;
        Ok(row.map(|model| model.value))
    }
}
