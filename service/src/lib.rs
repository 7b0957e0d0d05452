use config::Config;
use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::time::Duration;

pub mod config;
pub mod logging;

pub async fn init_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    // Every pooled connection to an in-memory SQLite URL opens its own empty
    // database, so the pool must be pinned to a single connection there.
    let max_connections = if config.database_url().contains(":memory:") {
        1
    } else {
        config.db_max_connections
    };

    info!(
        "Database pool config: max_connections={}, connect_timeout={}s, acquire_timeout={}s",
        max_connections, config.db_connect_timeout_secs, config.db_acquire_timeout_secs,
    );

    let mut opt = ConnectOptions::new::<&str>(config.database_url());
    opt.max_connections(max_connections)
        .connect_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    Ok(db)
}
