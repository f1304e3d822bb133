//! Product API configuration module.
//!
//! Built-in defaults overlaid by environment variables. Variables use the
//! `PRODUCT_APP_` prefix and `__` between nested keys:
//!
//! ```text
//! PRODUCT_APP_SERVER__PORT=9090
//! PRODUCT_APP_DATABASE__HOST=db.internal
//! PRODUCT_APP_DATABASE__MAX_CONNECTIONS=20
//! ```

use std::time::Duration;

use config::{Config, Environment};
use product_db::DbConfig;
use serde::{Deserialize, Serialize};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PRODUCT_APP";

/// Product API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind (default: localhost)
    pub host: String,

    /// HTTP port (default: 8080)
    pub port: u16,
}

impl ServerSettings {
    /// Returns `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// PostgreSQL connection and pool settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,

    /// Maximum pooled connections (default: 10)
    pub max_connections: u32,

    /// Connections kept open while idle (default: 1)
    pub min_connections: u32,

    /// Idle connection lifetime in seconds (default: 30)
    pub idle_timeout_secs: u64,

    /// Pool acquire timeout in seconds (default: 5)
    pub connect_timeout_secs: u64,

    /// Per-query deadline in seconds (default: 5)
    pub query_timeout_secs: u64,

    /// Apply embedded migrations at startup (default: true)
    pub run_migrations: bool,
}

// Keeps the password out of logs.
impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("query_timeout_secs", &self.query_timeout_secs)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

impl DatabaseSettings {
    /// Converts to the pool configuration used by product-db.
    pub fn to_db_config(&self) -> DbConfig {
        DbConfig::new(&self.host, &self.name)
            .port(self.port)
            .credentials(&self.user, &self.password)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .query_timeout(Duration::from_secs(self.query_timeout_secs))
            .run_migrations(self.run_migrations)
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment.
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment().source(Some(vars)))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8080_i64)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 6432_i64)?
            .set_default("database.name", "productapp")?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "postgres")?
            .set_default("database.max_connections", 10_i64)?
            .set_default("database.min_connections", 1_i64)?
            .set_default("database.idle_timeout_secs", 30_i64)?
            .set_default("database.connect_timeout_secs", 5_i64)?
            .set_default("database.query_timeout_secs", 5_i64)?
            .set_default("database.run_migrations", true)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue("server.port must be non-zero".to_string()));
        }

        let db = &self.database;
        if db.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if db.min_connections > db.max_connections {
            return Err(ConfigError::InvalidValue(
                "database.min_connections exceeds database.max_connections".to_string(),
            ));
        }
        if db.idle_timeout_secs == 0 || db.connect_timeout_secs == 0 || db.query_timeout_secs == 0
        {
            return Err(ConfigError::InvalidValue(
                "database timeouts must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}
