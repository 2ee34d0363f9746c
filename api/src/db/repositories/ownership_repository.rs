use sea_orm::*;
use std::sync::Arc;

use crate::db::DbError;
use crate::entity::token_ownership;

pub struct OwnershipRepository {
    conn: Arc<DatabaseConnection>,
}

impl OwnershipRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Tokens with a known owner, burned ones included
    pub async fn count(&self) -> Result<u64, DbError> {
        Ok(token_ownership::Entity::find().count(self.conn.as_ref()).await?)
    }
}
