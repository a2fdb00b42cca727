use crate::config::AppConfig;
use crate::errors::ToolError;
use crate::repositories::{Connector, CustomerStore, SeaOrmCustomerStore};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for the ORM client handle
pub type DbPool = DatabaseConnection;

/// Configuration for database connection
///
/// One request is in flight per invocation, so the pool is pinned to a
/// single connection.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL
    pub url: String,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Acquire connection timeout
    pub acquire_timeout: Duration,
    /// Forward sqlx statement logs
    pub sqlx_logging: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout: Duration::from_secs(10),
            acquire_timeout: Duration::from_secs(10),
            sqlx_logging: false,
        }
    }
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

impl From<&AppConfig> for DbConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            url: cfg.database_url.clone(),
            connect_timeout: Duration::from_secs(cfg.db_connect_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.db_acquire_timeout_secs),
            sqlx_logging: cfg.db_sqlx_logging,
        }
    }
}

/// Opens the database client described by `config`
///
/// # Errors
/// Returns a `ToolError::Database` if the connection cannot be established
pub async fn establish_connection_with_config(config: &DbConfig) -> Result<DbPool, ToolError> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .sqlx_logging(config.sqlx_logging);

    debug!(
        connect_timeout = ?config.connect_timeout,
        "Connecting to database"
    );

    let db = Database::connect(opt).await?;
    info!("Database connection established");

    Ok(db)
}

/// Closes the database client
pub async fn close_pool(pool: DbPool) -> Result<(), ToolError> {
    debug!("Closing database connection");

    pool.close().await.map_err(ToolError::Database)
}

#[async_trait]
impl Connector for DbConfig {
    async fn connect(&self) -> Result<Box<dyn CustomerStore>, ToolError> {
        let db = establish_connection_with_config(self).await?;
        Ok(Box::new(SeaOrmCustomerStore::new(db)))
    }
}
