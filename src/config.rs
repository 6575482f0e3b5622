//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! All state lives in process memory, so nothing here is required; every
//! variable has a default.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3001`)
//! - `BASE_URL` - Prefix for generated short links (default: `http://localhost:3001`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_VALIDITY_MINUTES` - Validity used when a request omits it (default: 30)
//! - `GENERATED_CODE_LENGTH` - Length of generated shortcodes (default: 8)
//! - `EVENT_QUEUE_CAPACITY` - Registry event buffer size (default: 10000, min: 100)
//! - `BEHIND_PROXY` - Read client IP from `X-Forwarded-For` / `X-Real-IP` (default: false)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated origins allowed by CORS, `*` for any (default: `*`)

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;
use url::Url;

use crate::application::services::{
    DEFAULT_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES, MIN_VALIDITY_MINUTES,
};
use crate::utils::code_generator::{
    DEFAULT_GENERATED_LENGTH, MAX_CODE_LENGTH, MIN_GENERATED_LENGTH,
};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: i64,
    pub generated_code_length: usize,
    pub event_queue_capacity: usize,
    /// When true, the client address of a click is read from X-Forwarded-For / X-Real-IP.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3001".to_string(),
            base_url: "http://localhost:3001".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            generated_code_length: DEFAULT_GENERATED_LENGTH,
            event_queue_capacity: 10_000,
            behind_proxy: false,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let base_url = env::var("BASE_URL").unwrap_or(defaults.base_url);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let default_validity_minutes =
            parse_var("DEFAULT_VALIDITY_MINUTES")?.unwrap_or(defaults.default_validity_minutes);

        let generated_code_length =
            parse_var("GENERATED_CODE_LENGTH")?.unwrap_or(defaults.generated_code_length);

        let event_queue_capacity =
            parse_var("EVENT_QUEUE_CAPACITY")?.unwrap_or(defaults.event_queue_capacity);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or(defaults.cors_allowed_origins);

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            default_validity_minutes,
            generated_code_length,
            event_queue_capacity,
            behind_proxy,
            cors_allowed_origins,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `event_queue_capacity` is outside 100..=1000000
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not a `host:port` socket address
    /// - `base_url` is not an http(s) URL
    /// - `default_validity_minutes` is outside 1..=10080
    /// - `generated_code_length` is outside 6..=20
    /// - an entry of `cors_allowed_origins` is not a valid header value
    pub fn validate(&self) -> Result<()> {
        if self.event_queue_capacity < 100 {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY must be at least 100, got {}",
                self.event_queue_capacity
            );
        }

        if self.event_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.event_queue_capacity
            );
        }

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
        self.listen_addr.parse::<SocketAddr>().with_context(|| {
            format!(
                "LISTEN is not a valid socket address: '{}'",
                self.listen_addr
            )
        })?;

        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if !(MIN_VALIDITY_MINUTES..=MAX_VALIDITY_MINUTES).contains(&self.default_validity_minutes) {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be between {} and {}, got {}",
                MIN_VALIDITY_MINUTES,
                MAX_VALIDITY_MINUTES,
                self.default_validity_minutes
            );
        }

        if !(MIN_GENERATED_LENGTH..=MAX_CODE_LENGTH).contains(&self.generated_code_length) {
            anyhow::bail!(
                "GENERATED_CODE_LENGTH must be between {} and {}, got {}",
                MIN_GENERATED_LENGTH,
                MAX_CODE_LENGTH,
                self.generated_code_length
            );
        }

        for origin in self.cors_allowed_origins.iter().filter(|o| *o != "*") {
            HeaderValue::from_str(origin).with_context(|| {
                format!("CORS_ALLOWED_ORIGINS has an invalid origin: '{origin}'")
            })?;
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Default validity: {} min", self.default_validity_minutes);
        tracing::info!("  Generated code length: {}", self.generated_code_length);
        tracing::info!("  Event queue capacity: {}", self.event_queue_capacity);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!(
            "  CORS allowed origins: {}",
            self.cors_allowed_origins.join(", ")
        );
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
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
