//! # Database Pool Management
//!
//! Connection pool creation and configuration for PostgreSQL.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Server startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(host, database) ← Configure pool settings               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │              PgPool                      │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ One task per HTTP request                                      │
//! │       ▼                                                                 │
//! │  GET  /api/v1/products     ──► uses Conn1                              │
//! │  POST /api/v1/products     ──► uses Conn2                              │
//! │                                                                         │
//! │  Shutdown: server drains, then Database::close()                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::PgProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("localhost", "productapp")
///     .port(6432)
///     .credentials("postgres", "postgres")
///     .max_connections(10);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host name.
    pub host: String,

    /// PostgreSQL port.
    /// Default: 5432
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Login role.
    pub user: String,

    /// Login password.
    pub password: String,

    /// Maximum number of connections in the pool.
    /// Default: 10
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a connection from the pool.
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Idle time before a pooled connection is closed.
    /// Default: 30 seconds
    pub idle_timeout: Duration,

    /// Deadline applied to every repository query.
    /// Default: 5 seconds
    pub query_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for `database` on `host` with default settings.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        DbConfig {
            host: host.into(),
            port: 5432,
            database: database.into(),
            user: "postgres".to_string(),
            password: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(30),
            query_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets user and password.
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the pool acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the idle connection lifetime.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Sets the per-query deadline.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Builds the sqlx connection options. The password never reaches the logs.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: the pool is reference counted, and every clone shares
/// the same connections.
#[derive(Debug, Clone)]
pub struct Database {
    /// The PostgreSQL connection pool.
    pool: PgPool,

    /// Deadline handed to every repository.
    query_timeout: Duration,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Builds connection options from the config
    /// 2. Creates the connection pool (opens `min_connections` eagerly)
    /// 3. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Connection or migration failed
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            user = %config.user,
            "Initializing database connection"
        );

        let connect_options = config.connect_options();

        debug!("Connection options configured");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            query_timeout: config.query_timeout,
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Wraps an existing pool, using the default query deadline.
    ///
    /// ## Usage
    /// Integration tests that connect from a URL.
    pub fn from_pool(pool: PgPool) -> Self {
        Database {
            pool,
            query_timeout: Duration::from_secs(5),
        }
    }

    /// Runs database migrations.
    ///
    /// Idempotent: applied migrations are tracked in `_sqlx_migrations`.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> PgProductRepository {
        PgProductRepository::new(self.pool.clone(), self.query_timeout)
    }

    /// Closes the database connection pool.
    ///
    /// Waits for checked-out connections to be returned. After this call all
    /// repository operations fail with `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
