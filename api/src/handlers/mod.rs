// Handlers Module
// This module contains the API endpoint handlers

mod diagnostic;
mod health;
mod holders;
mod stats;
mod sync;

pub use diagnostic::test_endpoints;
pub use health::health_check;
pub use holders::get_holders;
pub use stats::get_stats;
pub use sync::{get_sync_status, trigger_sync};

use holders_indexer::application::sync::SyncOrchestrator;
use holders_indexer::infrastructure::explorer::EtherscanClient;
use holders_indexer::infrastructure::persistence::SeaOrmSyncStore;
use std::sync::Arc;

use crate::db::Repositories;

pub type ApiSyncOrchestrator = SyncOrchestrator<EtherscanClient, SeaOrmSyncStore>;

/// Shared state for all handlers. `sync` and `explorer` are absent when no
/// API key is configured.
#[derive(Clone)]
pub struct AppState {
    pub repositories: Arc<Repositories>,
    pub contract_address: String,
    pub sync: Option<Arc<ApiSyncOrchestrator>>,
    pub explorer: Option<EtherscanClient>,
}
