use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::prelude::*;
use std::error::Error;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::migration::Migrator;

async fn connect() -> Result<DatabaseConnection, Box<dyn Error>> {
    let config = DatabaseConfig::from_env()?;
    info!(
        "Connecting to database {} on {}:{}",
        config.name, config.host, config.port
    );

    Database::connect(&config.url).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        e.into()
    })
}

/// Execute the migrate command
pub async fn execute(steps: Option<u32>) -> Result<(), Box<dyn Error>> {
    let connection = connect().await?;

    let all_migrations = Migrator::get_migration_files();
    info!("Found {} migration files", all_migrations.len());
    for m in &all_migrations {
        info!("Migration file: {}", m.name());
    }

    match steps {
        Some(n) => info!("Running {} migrations", n),
        None => info!("Running all pending migrations"),
    }

    Migrator::up(&connection, steps).await.map_err(|e| {
        error!("Failed to run migrations: {}", e);
        e
    })?;

    info!("Migrations applied");
    Ok(())
}

/// Drop every table managed by the migrator and apply all migrations again
pub async fn reset() -> Result<(), Box<dyn Error>> {
    let connection = connect().await?;

    info!("Resetting database");
    Migrator::fresh(&connection).await.map_err(|e| {
        error!("Failed to reset database: {}", e);
        e
    })?;

    info!("Database reset complete");
    Ok(())
}

/// Print applied and pending migrations
pub async fn status() -> Result<(), Box<dyn Error>> {
    let connection = connect().await?;

    let applied = Migrator::get_applied_migrations(&connection).await?;
    let pending = Migrator::get_pending_migrations(&connection).await?;

    for m in &applied {
        info!("[applied] {}", m.name());
    }
    for m in &pending {
        info!("[pending] {}", m.name());
    }
    info!("{} applied, {} pending", applied.len(), pending.len());

    Ok(())
}
