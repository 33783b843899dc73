/// Database connection pool management
///
/// This module wraps a SQLite connection pool from sqlx. Request handlers never
/// hold a connection longer than their own execution: they call
/// [`Database::acquire`] and get back a [`DbConnection`] guard which returns the
/// connection to the pool when dropped, on every exit path.
///
/// # Example
///
/// ```no_run
/// use quillpad_shared::db::pool::{Database, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://database/app.db".to_string(),
///         ..Default::default()
///     };
///
///     let db = Database::connect(config).await?;
///
///     let mut conn = db.acquire().await?;
///     let (answer,): (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&mut *conn)
///         .await?;
///
///     Ok(())
/// }
/// ```

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions,
};
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Default location of the application database
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database/app.db";

/// Pool settings
///
/// Durations are whole seconds so they map directly onto env vars.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlite://path/to/file.db` or `sqlite::memory:`
    pub url: String,

    /// SQLite serializes writers on the file, so extra connections only help
    /// concurrent page reads.
    pub max_connections: u32,
    pub min_connections: u32,

    /// How long a request waits for a free connection
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: Option<u64>,
    pub max_lifetime_seconds: Option<u64>,
    pub test_before_acquire: bool,

    /// `PRAGMA foreign_keys` on every connection. Off lets posts and comments
    /// reference missing rows.
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            min_connections: 0,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(10 * 60),
            max_lifetime_seconds: Some(30 * 60),
            test_before_acquire: true,
            foreign_keys: true,
        }
    }
}

/// Returns the filesystem path behind a SQLite URL
///
/// Returns `None` for in-memory databases.
///
/// # Example
///
/// ```
/// use quillpad_shared::db::pool::database_path;
/// use std::path::Path;
///
/// assert_eq!(database_path("sqlite://database/app.db"), Some(Path::new("database/app.db")));
/// assert_eq!(database_path("sqlite::memory:"), None);
/// ```
pub fn database_path(url: &str) -> Option<&Path> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(Path::new(path))
}

/// Creates the directory that will hold the database file
///
/// SQLite creates the file itself but not its parent directories.
pub async fn ensure_database_dir(url: &str) -> std::io::Result<()> {
    let Some(parent) = database_path(url).and_then(Path::parent) else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    debug!(directory = %parent.display(), "Ensuring database directory exists");
    tokio::fs::create_dir_all(parent).await
}

/// Creates and initializes a SQLite connection pool
///
/// This function:
/// 1. Creates the database directory and file if they are missing
/// 2. Creates a pool with the specified configuration
/// 3. Performs a health check to verify the database is readable
///
/// # Errors
///
/// Returns an error if:
/// - The database URL is invalid
/// - The database directory cannot be created
/// - Health check fails
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        foreign_keys = config.foreign_keys,
        "Creating database connection pool"
    );

    ensure_database_dir(&config.url).await?;

    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(config.foreign_keys);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .test_before_acquire(config.test_before_acquire);

    if let Some(idle_timeout) = config.idle_timeout_seconds {
        pool_options = pool_options.idle_timeout(Duration::from_secs(idle_timeout));
        debug!(idle_timeout_seconds = idle_timeout, "Set idle timeout");
    }

    if let Some(max_lifetime) = config.max_lifetime_seconds {
        pool_options = pool_options.max_lifetime(Duration::from_secs(max_lifetime));
        debug!(max_lifetime_seconds = max_lifetime, "Set max lifetime");
    }

    let pool = pool_options.connect_with(connect_options).await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// # Errors
///
/// Returns an error if the health check query fails
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Current pool statistics for monitoring
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub active_connections: usize,

    /// Number of idle connections available
    pub idle_connections: usize,

    /// Total connections in the pool
    pub total_connections: usize,
}

pub fn get_pool_stats(pool: &SqlitePool) -> PoolStats {
    let size = pool.size();
    let idle = pool.num_idle();

    PoolStats {
        active_connections: (size as usize).saturating_sub(idle),
        idle_connections: idle,
        total_connections: size as usize,
    }
}

/// Handle to the application database
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Creates the pool described by `config`
    pub async fn connect(config: DatabaseConfig) -> Result<Self, sqlx::Error> {
        Ok(Self {
            pool: create_pool(config).await?,
        })
    }

    /// Underlying sqlx pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquires a connection scoped to the caller
    ///
    /// The connection goes back to the pool when the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection becomes available within the
    /// configured acquire timeout.
    pub async fn acquire(&self) -> Result<DbConnection, sqlx::Error> {
        let inner = self.pool.acquire().await?;
        trace!("Acquired database connection");
        Ok(DbConnection { inner })
    }

    pub fn stats(&self) -> PoolStats {
        get_pool_stats(&self.pool)
    }

    /// Gracefully closes the connection pool
    ///
    /// Call during shutdown so SQLite can checkpoint and release the file.
    pub async fn close(self) {
        info!("Closing database connection pool");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

/// A pooled connection held for the duration of one unit of work
///
/// Dereferences to [`SqliteConnection`], so it can be passed anywhere a
/// `&mut SqliteConnection` is expected.
pub struct DbConnection {
    inner: PoolConnection<Sqlite>,
}

impl Deref for DbConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Drop for DbConnection {
    fn drop(&mut self) {
        trace!("Releasing database connection");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.min_connections, 0);
        assert_eq!(config.connect_timeout_seconds, 30);
        assert_eq!(config.idle_timeout_seconds, Some(600));
        assert_eq!(config.max_lifetime_seconds, Some(1800));
        assert!(config.test_before_acquire);
        assert!(config.foreign_keys);
    }

    #[test]
    fn test_database_path_variants() {
        assert_eq!(
            database_path("sqlite://database/app.db"),
            Some(Path::new("database/app.db"))
        );
        assert_eq!(
            database_path("sqlite:/tmp/app.db?mode=rwc"),
            Some(Path::new("/tmp/app.db"))
        );
        assert_eq!(database_path("sqlite::memory:"), None);
        assert_eq!(database_path("sqlite://"), None);
    }

    #[tokio::test]
    async fn test_ensure_database_dir_skips_memory() {
        assert!(ensure_database_dir("sqlite::memory:").await.is_ok());
        assert!(ensure_database_dir("sqlite://app.db").await.is_ok());
    }

    // Tests against a real database file are in tests/db_pool_tests.rs
}
