// Configuration management from environment variables

use holders_indexer::config::AppConfig;
use std::env;

/// Configuration settings for the holders API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Database pool bounds
    pub pool_max: u32,
    pub pool_min: u32,

    /// Explorer, sync and database settings shared with the indexer
    pub app: AppConfig,
}

impl ApiConfig {
    /// Creates configuration instance from environment variables with defaults
    pub fn from_env() -> Self {
        let app = AppConfig::from_env();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .unwrap_or(3000);
        let pool_max = env::var("DB_POOL_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let pool_min = env::var("DB_POOL_MIN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        Self {
            host,
            port,
            pool_max,
            pool_min,
            app,
        }
    }

    pub fn database_url(&self) -> &str {
        &self.app.database.url
    }

    pub fn contract_address(&self) -> &str {
        &self.app.explorer.contract_address
    }

    /// Returns formatted server address string (host:port)
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
