use sea_orm::*;
use std::sync::Arc;

use crate::db::DbError;
use crate::entity::transactions;

pub struct TransactionRepository {
    conn: Arc<DatabaseConnection>,
}

impl TransactionRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn count(&self) -> Result<u64, DbError> {
        Ok(transactions::Entity::find().count(self.conn.as_ref()).await?)
    }
}
