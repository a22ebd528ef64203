//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts; nothing is hot-reloaded.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://shortener.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base URL used to render short links
//!   (default: `http://localhost:3000`)
//! - `SHORT_MIN_LEN` / `SHORT_MAX_LEN` - Exclusive bounds on short-ID
//!   length (defaults: 0 / 16, i.e. 1-15 characters inclusive)
//! - `DEFAULT_ID_LENGTH` - Length of generated short IDs (default: 6)
//! - `MAX_GENERATE_ATTEMPTS` - Cap on the generation retry loop (default: 10)
//! - `RESERVED_PREFIXES` - Comma-separated prefixes short IDs may never
//!   equal or start with (default: `api,files,health`)
//! - `DISK_TOKEN` - OAuth token for the external storage API; file uploads
//!   are disabled when unset
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Connection pool size (default: 10)

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Base URL prepended to short IDs when rendering short links.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// OAuth token for the external storage API. `None` disables uploads.
    pub disk_token: Option<String>,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`).
    pub db_max_connections: u32,
    pub short_ids: ShortIdConfig,
}

/// Policy for short-ID validation and generation.
///
/// Length bounds are exclusive on both ends: a short ID is valid when
/// `min_len < len < max_len`.
#[derive(Debug, Clone)]
pub struct ShortIdConfig {
    pub min_len: usize,
    pub max_len: usize,
    /// Length of generated IDs; must sit strictly inside the bounds.
    pub default_length: usize,
    /// Generation retry cap before giving up with `IdSpaceExhausted`.
    pub max_generate_attempts: u32,
    /// Short IDs may neither equal nor start with any of these.
    pub reserved_prefixes: Vec<String>,
}

impl Default for ShortIdConfig {
    fn default() -> Self {
        Self {
            min_len: 0,
            max_len: 16,
            default_length: 6,
            max_generate_attempts: 10,
            reserved_prefixes: vec!["api".to_string(), "files".to_string(), "health".to_string()],
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://shortener.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let disk_token = env::var("DISK_TOKEN").ok().filter(|t| !t.is_empty());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let defaults = ShortIdConfig::default();

        let min_len = env::var("SHORT_MIN_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.min_len);

        let max_len = env::var("SHORT_MAX_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_len);

        let default_length = env::var("DEFAULT_ID_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.default_length);

        let max_generate_attempts = env::var("MAX_GENERATE_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_generate_attempts);

        let reserved_prefixes = match env::var("RESERVED_PREFIXES") {
            Ok(raw) => raw
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            Err(_) => defaults.reserved_prefixes,
        };

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            disk_token,
            db_max_connections,
            short_ids: ShortIdConfig {
                min_len,
                max_len,
                default_length,
                max_generate_attempts,
                reserved_prefixes,
            },
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `database_url` is not a SQLite connection string
    /// - `listen_addr` or `base_url` are malformed
    /// - the short-ID length bounds admit no valid length, or the default
    ///   generated length falls outside them
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let ids = &self.short_ids;

        // Exclusive bounds: at least one length must satisfy min < len < max.
        if ids.min_len + 1 >= ids.max_len {
            anyhow::bail!(
                "short-ID bounds admit no valid length: SHORT_MIN_LEN={}, SHORT_MAX_LEN={}",
                ids.min_len,
                ids.max_len
            );
        }

        if ids.default_length <= ids.min_len || ids.default_length >= ids.max_len {
            anyhow::bail!(
                "DEFAULT_ID_LENGTH={} must be strictly between {} and {}",
                ids.default_length,
                ids.min_len,
                ids.max_len
            );
        }

        if ids.max_generate_attempts == 0 {
            anyhow::bail!("MAX_GENERATE_ATTEMPTS must be at least 1");
        }

        Ok(())
    }

    /// Returns whether file uploads are enabled.
    pub fn is_upload_enabled(&self) -> bool {
        self.disk_token.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!(
            "  File uploads: {}",
            if self.is_upload_enabled() {
                "enabled"
            } else {
                "disabled (DISK_TOKEN not set)"
            }
        );
        tracing::info!(
            "  Short IDs: generated length {}, valid lengths {}..{} (exclusive), reserved: {:?}",
            self.short_ids.default_length,
            self.short_ids.min_len,
            self.short_ids.max_len,
            self.short_ids.reserved_prefixes
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// Expects the environment to be populated already (e.g. via
/// `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
