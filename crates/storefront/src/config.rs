//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `DISCOUNT_EVERY_N` - Orders per discount milestone (default: 5);
//!   `NTH_ORDER` is accepted as a fallback name
//! - `LOG_FORMAT` - `json` for JSON log lines, anything else for plain text
//!
//! The discount interval is read once at startup and stays fixed for the
//! lifetime of the store.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU64;

use thiserror::Error;

/// Discount interval used when none (or an unusable one) is configured.
pub const DEFAULT_DISCOUNT_EVERY_N: NonZeroU64 = match NonZeroU64::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` (after loading `.env`).
    ///
    /// Read on its own, ahead of [`StorefrontConfig::from_env`], whose
    /// warnings need the subscriber already installed.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        parse_log_format(get_optional_env("LOG_FORMAT").as_deref())
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Orders between discount milestones
    pub discount_every_n: NonZeroU64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            discount_every_n: DEFAULT_DISCOUNT_EVERY_N,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the host or port cannot be parsed. An
    /// unusable discount interval is not an error; it falls back to the
    /// default with a warning.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let raw_every_n =
            get_optional_env("DISCOUNT_EVERY_N").or_else(|| get_optional_env("NTH_ORDER"));
        let discount_every_n = parse_discount_every_n(raw_every_n.as_deref());

        Ok(Self {
            host,
            port,
            discount_every_n,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the discount interval, falling back to the default when the value
/// is missing, non-numeric or zero.
fn parse_discount_every_n(raw: Option<&str>) -> NonZeroU64 {
    let Some(raw) = raw else {
        return DEFAULT_DISCOUNT_EVERY_N;
    };

    raw.trim()
        .parse::<NonZeroU64>()
        .unwrap_or_else(|e| {
            tracing::warn!(
                value = raw,
                error = %e,
                default = DEFAULT_DISCOUNT_EVERY_N.get(),
                "ignoring invalid discount interval"
            );
            DEFAULT_DISCOUNT_EVERY_N
        })
}

fn parse_log_format(raw: Option<&str>) -> LogFormat {
    match raw.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
