use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::config::ConfigError;
use crate::infrastructure::explorer::ApiClientError;
use crate::infrastructure::persistence::error::DbError;

/// Error type for sync runs
#[derive(Debug)]
pub enum SyncError {
    /// Required configuration is missing; raised before any work starts
    Configuration(ConfigError),
    /// The explorer could not be read
    UpstreamFetch(ApiClientError),
    /// A write failed; the run was rolled back
    Persistence(DbError),
    /// Another run holds the sync lock
    InProgress,
    /// The run exceeded its time budget and was rolled back
    TimedOut(Duration),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Configuration(e) => write!(f, "Configuration error: {}", e),
            SyncError::UpstreamFetch(e) => write!(f, "Upstream fetch error: {}", e),
            SyncError::Persistence(e) => write!(f, "Persistence error: {}", e),
            SyncError::InProgress => write!(f, "A sync is already in progress"),
            SyncError::TimedOut(limit) => {
                write!(f, "Sync timed out after {}s", limit.as_secs())
            }
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SyncError::Configuration(e) => Some(e),
            SyncError::UpstreamFetch(e) => Some(e),
            SyncError::Persistence(e) => Some(e),
            SyncError::InProgress | SyncError::TimedOut(_) => None,
        }
    }
}

impl From<ConfigError> for SyncError {
    fn from(error: ConfigError) -> Self {
        SyncError::Configuration(error)
    }
}

impl From<ApiClientError> for SyncError {
    fn from(error: ApiClientError) -> Self {
        match error {
            ApiClientError::MissingApiKey => SyncError::Configuration(ConfigError::MissingApiKey),
            other => SyncError::UpstreamFetch(other),
        }
    }
}

impl From<DbError> for SyncError {
    fn from(error: DbError) -> Self {
        SyncError::Persistence(error)
    }
}
