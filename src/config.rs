use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info};
use validator::{Validate, ValidationError};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_ENV: &str = "development";
const DEFAULT_DATABASE_URL: &str = "sqlite://customers.db";
const CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "APP";

/// Conventional variable read by ORM tooling for the connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const SUPPORTED_SCHEMES: [&str; 3] = ["postgres://", "postgresql://", "sqlite:"];

/// Configuration shared by the customer tools
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    #[validate(custom = "validate_database_url")]
    pub database_url: String,

    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// DB timeouts (seconds)
    #[serde(default = "default_db_connect_timeout_secs")]
    #[validate(range(min = 1))]
    pub db_connect_timeout_secs: u64,
    #[serde(default = "default_db_acquire_timeout_secs")]
    #[validate(range(min = 1))]
    pub db_acquire_timeout_secs: u64,

    /// Forward sqlx statement logging into tracing
    #[serde(default)]
    pub db_sqlx_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL.to_string())
    }
}

impl AppConfig {
    /// Creates a configuration for the given database with default tuning
    pub fn new(database_url: String) -> Self {
        Self {
            database_url,
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            db_sqlx_logging: false,
        }
    }

    /// Gets database URL reference
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Replaces the database URL when a command-line override is present
    pub fn with_database_url(mut self, url: Option<String>) -> Result<Self, AppConfigError> {
        if let Some(url) = url {
            self.database_url = url;
            self.validate()?;
        }
        Ok(self)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_db_connect_timeout_secs() -> u64 {
    10
}

fn default_db_acquire_timeout_secs() -> u64 {
    10
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

fn validate_database_url(url: &str) -> Result<(), ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("database_url");
        err.message = Some("Database URL must not be empty".into());
        return Err(err);
    }

    if !SUPPORTED_SCHEMES
        .iter()
        .any(|scheme| trimmed.starts_with(scheme))
    {
        let mut err = ValidationError::new("database_url");
        err.message = Some("Database URL must use postgres:// or sqlite: scheme".into());
        return Err(err);
    }

    Ok(())
}

/// Initializes tracing on stderr using the provided log level as the default filter
///
/// stdout is reserved for program output, so diagnostics never interleave
/// with the JSON the tools print.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("customer_db_tools={},sea_orm={}", level, level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let builder = fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .with_writer(std::io::stderr);

    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// Loads configuration from the `config/` directory and the environment
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    load_config_from(Path::new(CONFIG_DIR))
}

/// Loads configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (`{dir}/default.toml`)
/// 3. Environment-specific config (`{dir}/{env}.toml`)
/// 4. `DATABASE_URL`
/// 5. Environment variables (`APP__*`)
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    debug!("Loading configuration for environment: {}", run_env);

    if !config_dir.exists() {
        debug!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            config_dir.display()
        );
    }

    let dir = config_dir.display();
    let config = Config::builder()
        .set_default("database_url", DEFAULT_DATABASE_URL)?
        .set_default("environment", run_env.as_str())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", dir)).required(false))
        .add_source(File::with_name(&format!("{}/{}", dir, run_env)).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let mut app_config: AppConfig = config.try_deserialize()?;

    // APP__DATABASE_URL is more specific than the ORM-wide variable
    if env::var(format!("{}__DATABASE_URL", ENV_PREFIX)).is_err() {
        if let Ok(url) = env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                app_config.database_url = url;
            }
        }
    }

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!(environment = %app_config.environment, "Configuration loaded successfully");
    Ok(app_config)
}
