// Error types for read-side database access

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Pool could not be created or a connection could not be acquired
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),
}

impl From<sea_orm::DbErr> for DbError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
                DbError::ConnectionError(err.to_string())
            }
            other => DbError::QueryError(other.to_string()),
        }
    }
}
