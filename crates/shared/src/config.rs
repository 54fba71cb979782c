//! Application configuration management.
//!
//! Configuration is layered: `config/default`, then `config/{RUN_MODE}`, then
//! environment variables prefixed with `SALESDB__` (e.g.
//! `SALESDB__DATABASE__HOST`). Every field has a default, so an empty
//! environment connects to a local development database.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Postgres SSL negotiation mode, rendered as the `sslmode` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// Never use TLS.
    #[default]
    Disable,
    /// Use TLS only if the server insists.
    Allow,
    /// Try TLS first, fall back to plaintext.
    Prefer,
    /// Require TLS without certificate verification.
    Require,
    /// Require TLS and verify the CA.
    VerifyCa,
    /// Require TLS and verify CA and hostname.
    VerifyFull,
}

impl SslMode {
    /// Returns the libpq spelling of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Allow => "allow",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the discrete fields below.
    pub url: Option<String>,
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub dbname: String,
    /// SSL mode.
    pub sslmode: SslMode,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    pub min_connections: u32,
    /// Timeout for establishing a single connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Timeout for checking a connection out of the pool, in seconds.
    pub acquire_timeout_secs: u64,
    /// How many times to retry opening the pool after the first failure.
    pub open_retries: u32,
    /// Base delay between open attempts in milliseconds (grows linearly).
    pub retry_backoff_ms: u64,
    /// Whether sqlx logs every statement.
    pub sqlx_logging: bool,
    /// Whether the `salesdb` binary applies pending migrations on startup.
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "myuser".to_string(),
            password: "mypassword".to_string(),
            dbname: "gofiberdb".to_string(),
            sslmode: SslMode::Disable,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            open_retries: 0,
            retry_backoff_ms: 500,
            sqlx_logging: false,
            auto_migrate: false,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("dbname", &self.dbname)
            .field("sslmode", &self.sslmode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("open_retries", &self.open_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("sqlx_logging", &self.sqlx_logging)
            .field("auto_migrate", &self.auto_migrate)
            .finish()
    }
}

impl DatabaseConfig {
    /// Renders the key/value data-source descriptor.
    ///
    /// `host=<h> user=<u> password=<p> dbname=<d> port=<n> sslmode=<mode>`
    #[must_use]
    pub fn dsn(&self) -> String {
        self.render_dsn(&self.password)
    }

    /// Same as [`Self::dsn`] with the password masked, for logging.
    #[must_use]
    pub fn redacted_dsn(&self) -> String {
        self.render_dsn("***")
    }

    fn render_dsn(&self, password: &str) -> String {
        format!(
            "host={} user={} password={} dbname={} port={} sslmode={}",
            self.host, self.user, password, self.dbname, self.port, self.sslmode
        )
    }

    /// Returns the `postgres://` URL handed to the driver.
    ///
    /// An explicit `url` wins; otherwise the URL is assembled from the
    /// discrete fields with user and password percent-encoded.
    pub fn connection_url(&self) -> AppResult<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let invalid = |what: &str| AppError::Configuration(format!("invalid database {what}"));

        let mut url = Url::parse("postgres://localhost").map_err(|e| invalid(&e.to_string()))?;
        url.set_host(Some(&self.host))
            .map_err(|_| invalid("host"))?;
        url.set_port(Some(self.port)).map_err(|()| invalid("port"))?;
        url.set_username(&self.user).map_err(|()| invalid("user"))?;
        url.set_password(Some(&self.password))
            .map_err(|()| invalid("password"))?;
        url.set_path(&format!("/{}", self.dbname));
        url.query_pairs_mut()
            .append_pair("sslmode", self.sslmode.as_str());

        Ok(url.into())
    }

    /// Per-connection open timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Pool checkout timeout.
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "salesdb=info,sea_orm=warn,sqlx=warn".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SALESDB").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
