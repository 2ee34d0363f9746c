use holders_indexer::application::sync::{SyncOrchestrator, SyncSettings};
use holders_indexer::config::AppConfig;
use holders_indexer::infrastructure::explorer::EtherscanClient;
use holders_indexer::infrastructure::persistence::{DbPool, SeaOrmSyncStore};
use holders_indexer::utils::logging;

#[tokio::main]
async fn main() {
    logging::init_logger();

    let config = AppConfig::from_env();
    logging::log_info(&format!(
        "holders-indexer {} starting",
        env!("CARGO_PKG_VERSION")
    ));
    logging::log_explorer_details(
        &config.explorer.base_url,
        config.explorer.chain_id,
        &config.explorer.contract_address,
    );

    let client = match EtherscanClient::new(&config.explorer) {
        Ok(client) => client,
        Err(e) => {
            logging::log_error(&format!("Cannot start indexer: {}", e));
            std::process::exit(1);
        }
    };

    let db_pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            logging::log_error(&format!("Database connection failed: {}", e));
            std::process::exit(1);
        }
    };

    let store = SeaOrmSyncStore::new(db_pool.get_connection().clone());
    let orchestrator = SyncOrchestrator::new(client, store, SyncSettings::from_config(&config));

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => logging::log_info("Shutdown signal received, stopping indexer"),
            Err(e) => {
                logging::log_error(&format!("Cannot listen for shutdown signal: {}", e));
                std::future::pending::<()>().await;
            }
        }
    };

    orchestrator.run_periodically(config.sync.interval, shutdown).await;
}
