// Database repository management

mod holder_history_repository;
mod holder_repository;
mod ownership_repository;
mod snapshot_repository;
mod statistics_repository;
mod transaction_repository;

pub use holder_history_repository::HolderHistoryRepository;
pub use holder_repository::HolderRepository;
pub use ownership_repository::OwnershipRepository;
pub use snapshot_repository::SnapshotRepository;
pub use statistics_repository::StatisticsRepository;
pub use transaction_repository::TransactionRepository;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Container for all database repositories
pub struct Repositories {
    pub statistics: StatisticsRepository,
    pub holders: HolderRepository,
    pub ownership: OwnershipRepository,
    pub transactions: TransactionRepository,
    pub snapshots: SnapshotRepository,
    pub history: HolderHistoryRepository,
}

impl Repositories {
    /// Creates a new repositories container sharing one connection
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Repositories {
            statistics: StatisticsRepository::new(conn.clone()),
            holders: HolderRepository::new(conn.clone()),
            ownership: OwnershipRepository::new(conn.clone()),
            transactions: TransactionRepository::new(conn.clone()),
            snapshots: SnapshotRepository::new(conn.clone()),
            history: HolderHistoryRepository::new(conn),
        }
    }
}
