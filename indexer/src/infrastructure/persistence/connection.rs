use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::infrastructure::persistence::error::DbError;
use crate::utils::logging;

/// Manages database connection pool
pub struct DbPool {
    connection: Arc<DatabaseConnection>,
}

impl DbPool {
    /// Creates a new database connection pool
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        logging::log_database_connection_details(&config.database.url);

        match Database::connect(&config.database.url).await {
            Ok(connection) => {
                logging::log_info("Database connection established successfully");
                Ok(DbPool {
                    connection: Arc::new(connection),
                })
            }
            Err(e) => {
                logging::log_error(&format!("Failed to connect to database: {}", e));
                Err(DbError::ConnectionError(format!(
                    "Failed to connect to database: {}",
                    e
                )))
            }
        }
    }

    /// Returns the shared database connection
    pub fn get_connection(&self) -> &Arc<DatabaseConnection> {
        &self.connection
    }
}
