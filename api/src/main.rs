// Holders API server entry point

mod config;
mod db;
mod entity;
mod error;
mod handlers;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;

use holders_indexer::application::sync::{SyncOrchestrator, SyncSettings};
use holders_indexer::infrastructure::explorer::EtherscanClient;
use holders_indexer::infrastructure::persistence::SeaOrmSyncStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ApiConfig;
use db::DbPool;
use handlers::AppState;

#[tokio::main]
async fn main() {
    // Configure logging with tracing; indexer `log` records are bridged
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load API configuration from environment
    let config = ApiConfig::from_env();
    tracing::info!("Configuration loaded");

    // Establish database connection pool
    let db_pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database");

    let explorer = match EtherscanClient::new(&config.app.explorer) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!("Explorer client disabled: {}; /sync and /test will fail", e);
            None
        }
    };

    let sync = explorer.clone().map(|client| {
        let store = SeaOrmSyncStore::new(db_pool.get_connection().clone());
        Arc::new(SyncOrchestrator::new(
            client,
            store,
            SyncSettings::from_config(&config.app),
        ))
    });

    let app_state = AppState {
        repositories: Arc::new(db_pool.repositories()),
        contract_address: config.contract_address().to_string(),
        sync,
        explorer,
    };

    let app = routes::create_router(app_state);

    // Parse server address from config
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");

    // Start HTTP server
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
