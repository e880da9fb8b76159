//! Configuration management for the reservation client.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::ConfigError;
use crate::schema::SchemaOptions;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Movie backend
    pub api: ApiConfig,
    /// Optional validation rules
    pub schema: SchemaOptions,
    /// Tracing filter directive (same syntax as `RUST_LOG`)
    pub log_filter: String,
}

/// Movie backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                timeout_secs: 30,
            },
            schema: SchemaOptions::default(),
            log_filter: "reservation=debug,showtime_runtime=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `SHOWTIME_API_URL` | `http://localhost:3000` |
    /// | `SHOWTIME_HTTP_TIMEOUT_SECS` | `30` |
    /// | `SHOWTIME_REQUIRE_TERMS` | `false` |
    /// | `SHOWTIME_LOG` | `reservation=debug,showtime_runtime=info` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to
    /// something that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            api: ApiConfig {
                base_url: lookup("SHOWTIME_API_URL").unwrap_or(defaults.api.base_url),
                timeout_secs: parse_var(&lookup, "SHOWTIME_HTTP_TIMEOUT_SECS", "a number of seconds")?
                    .unwrap_or(defaults.api.timeout_secs),
            },
            schema: SchemaOptions {
                require_terms: parse_flag(&lookup, "SHOWTIME_REQUIRE_TERMS")?
                    .unwrap_or(defaults.schema.require_terms),
            },
            log_filter: lookup("SHOWTIME_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key,
                value,
                reason: expected,
            })
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key,
                value,
                reason: "a boolean",
            }),
        })
        .transpose()
}
