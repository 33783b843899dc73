/// Configuration management for the web server
///
/// Configuration is read once at process start and shared read-only through
/// [`crate::app::AppState`].
///
/// # Environment Variables
///
/// - `APP_HOST`: Host to bind to (default: 0.0.0.0)
/// - `APP_PORT`: Port to bind to (default: 5000)
/// - `APP_DEBUG`: Debug mode; verbose logs, no HSTS (default: false)
/// - `DATABASE_URL`: SQLite URL (default: sqlite://database/app.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `DATABASE_FOREIGN_KEYS`: Enforce declared foreign keys (default: true)
/// - `SECRET_KEY`: Key used to sign flash cookies, at least 32 characters.
///   Optional in debug mode, where a fixed development key is used.
/// - `RUST_LOG`: Log filter (default depends on `APP_DEBUG`)
/// - `LOG_FORMAT`: `text` or `json` (default: text)
///
/// # Example
///
/// ```no_run
/// use quillpad_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use axum_extra::extract::cookie::Key;
use quillpad_shared::db::pool::{self, DEFAULT_DATABASE_URL};
use sha2::{Digest, Sha512};
use std::env;

/// Signing key used when `SECRET_KEY` is unset in debug mode
pub const DEV_SECRET_KEY: &str = "quillpad-development-secret-key-do-not-deploy";

/// Minimum accepted length of `SECRET_KEY`
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session (flash cookie) configuration
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Debug mode
    pub debug: bool,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Whether SQLite enforces foreign keys
    pub foreign_keys: bool,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret used to sign flash cookies
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret_key: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A variable has an invalid value
    /// - `SECRET_KEY` is missing outside debug mode, or too short
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()?;
        let debug = parse_bool("APP_DEBUG", env::var("APP_DEBUG").ok(), false)?;
        let log_json = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => true,
            Ok("text") | Err(_) => false,
            Ok(other) => anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", other),
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;
        let foreign_keys = parse_bool(
            "DATABASE_FOREIGN_KEYS",
            env::var("DATABASE_FOREIGN_KEYS").ok(),
            true,
        )?;

        let secret_key = match env::var("SECRET_KEY") {
            Ok(secret) => secret,
            Err(_) if debug => DEV_SECRET_KEY.to_string(),
            Err(_) => anyhow::bail!("SECRET_KEY environment variable is required unless APP_DEBUG is set"),
        };

        let config = Self {
            server: ServerConfig {
                host,
                port,
                debug,
                log_json,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                foreign_keys,
            },
            session: SessionConfig { secret_key },
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that environment parsing alone cannot
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.session.secret_key.len() < MIN_SECRET_KEY_LEN {
            anyhow::bail!("SECRET_KEY must be at least {} characters long", MIN_SECRET_KEY_LEN);
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> pool::DatabaseConfig {
        pool::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            foreign_keys: self.database.foreign_keys,
            ..Default::default()
        }
    }

    /// Cookie signing key derived from `SECRET_KEY`
    ///
    /// The secret is stretched to the 64 bytes the signing key needs with
    /// SHA-512, so the same secret always yields the same key.
    pub fn cookie_key(&self) -> Key {
        let digest = Sha512::digest(self.session.secret_key.as_bytes());
        Key::from(digest.as_slice())
    }

    /// Whether flash cookies are signed with the development key
    pub fn uses_dev_secret(&self) -> bool {
        self.session.secret_key == DEV_SECRET_KEY
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        default_log_filter(self.server.debug)
    }
}

/// Default `tracing` filter for the given debug mode
pub fn default_log_filter(debug: bool) -> &'static str {
    if debug {
        "quillpad_web=debug,quillpad_shared=debug,tower_http=debug"
    } else {
        "quillpad_web=info,quillpad_shared=info,tower_http=info"
    }
}

fn parse_bool(name: &str, value: Option<String>, default: bool) -> anyhow::Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                debug: false,
                log_json: false,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                foreign_keys: true,
            },
            session: SessionConfig {
                secret_key: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut config = test_config();
        config.session.secret_key = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let mut config = test_config();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dev_secret_is_long_enough() {
        assert!(DEV_SECRET_KEY.len() >= MIN_SECRET_KEY_LEN);
    }

    #[test]
    fn test_pool_config_carries_database_settings() {
        let pool_config = test_config().pool_config();
        assert_eq!(pool_config.url, "sqlite::memory:");
        assert_eq!(pool_config.max_connections, 1);
        assert!(pool_config.foreign_keys);
    }

    #[test]
    fn test_cookie_key_is_deterministic() {
        let config = test_config();
        assert_eq!(config.cookie_key().master(), config.cookie_key().master());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", Some("TRUE".to_string()), false).unwrap());
        assert!(!parse_bool("X", Some("off".to_string()), true).unwrap());
        assert!(parse_bool("X", None, true).unwrap());
        assert!(parse_bool("X", Some("maybe".to_string()), true).is_err());
    }
}
