//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Database
//!
//! ```bash
//! export DATABASE_URL="sqlite://data.db"
//! ```
//!
//! If `DATABASE_URL` is not set it is built from `DB_PATH` (default: `data.db`),
//! so a plain `cargo run` opens `data.db` in the working directory.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base for short links (default: derived from the `Host` header)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)
//! - `SESSION_SECURE_COOKIE` - Mark the session cookie `Secure` (default: false)
//! - `SESSION_IDLE_MINUTES` - Expire sessions after this much inactivity (default: never)
//! - `RESET_LINKS_ON_STARTUP` - Drop and recreate the links table on start (default: false)
//! - `STATIC_DIR` - Directory served under `/static` (default: `static`)

use anyhow::{Context, Result};
use std::env;

/// Upper bound for `SESSION_IDLE_MINUTES`: one year.
pub const MAX_SESSION_IDLE_MINUTES: i64 = 365 * 24 * 60;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Public base URL for rendered short links. `None` derives it per request.
    pub base_url: Option<String>,
    pub log_level: String,
    pub log_format: String,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,

    // ── Sessions ────────────────────────────────────────────────────────────
    pub session_secure_cookie: bool,
    /// Inactivity expiry in minutes. `None` keeps sessions until logout or restart.
    pub session_idle_minutes: Option<i64>,

    /// Wipes all links at startup. Users are never touched.
    pub reset_links_on_startup: bool,
    pub static_dir: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let database_url = Self::load_database_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url = env::var("BASE_URL").ok().filter(|v| !v.trim().is_empty());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let db_max_connections = parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(5);
        let db_connect_timeout = parse_var("DB_CONNECT_TIMEOUT")?.unwrap_or(30);

        let session_secure_cookie = flag_var("SESSION_SECURE_COOKIE");
        let session_idle_minutes = parse_var("SESSION_IDLE_MINUTES")?;

        let reset_links_on_startup = flag_var("RESET_LINKS_ON_STARTUP");
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            db_max_connections,
            db_connect_timeout,
            session_secure_cookie,
            session_idle_minutes,
            reset_links_on_startup,
            static_dir,
        })
    }

    /// Loads database URL with fallback to a file path.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. `sqlite://` + `DB_PATH` (default `data.db`)
    fn load_database_url() -> String {
        if let Ok(url) = env::var("DATABASE_URL") {
            return url;
        }

        let path = env::var("DB_PATH").unwrap_or_else(|_| "data.db".to_string());
        format!("sqlite://{}", path)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL
    /// - `base_url` is not an absolute http(s) URL
    /// - pool or session settings are zero
    /// - `session_idle_minutes` exceeds [`MAX_SESSION_IDLE_MINUTES`]
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if let Some(ref base_url) = self.base_url {
            let parsed = url::Url::parse(base_url)
                .with_context(|| format!("BASE_URL is not a valid URL: '{}'", base_url))?;

            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("BASE_URL must use http or https, got '{}'", base_url);
            }
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        if let Some(minutes) = self.session_idle_minutes
            && minutes <= 0
        {
            anyhow::bail!("SESSION_IDLE_MINUTES must be greater than 0, got {}", minutes);
        }

        if let Some(minutes) = self.session_idle_minutes
            && minutes > MAX_SESSION_IDLE_MINUTES
        {
            anyhow::bail!(
                "SESSION_IDLE_MINUTES must be at most {} (one year), got {}",
                MAX_SESSION_IDLE_MINUTES,
                minutes
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);

        match self.base_url {
            Some(ref base_url) => tracing::info!("  Base URL: {}", base_url),
            None => tracing::info!("  Base URL: derived from Host header"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        match self.session_idle_minutes {
            Some(minutes) => tracing::info!("  Session idle expiry: {} min", minutes),
            None => tracing::info!("  Session idle expiry: disabled"),
        }

        if self.reset_links_on_startup {
            tracing::warn!("  RESET_LINKS_ON_STARTUP is set: links will be wiped");
        }
    }
}

/// Parses an optional numeric variable. Unset means `None`; set but invalid is an error.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: '{}'", name, value)),
        Err(_) => Ok(None),
    }
}

fn flag_var(name: &str) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
