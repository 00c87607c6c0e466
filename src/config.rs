// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! by the client. Configuration is loaded from the environment once, when
//! the application root builds its [`crate::state::AppState`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `WILLBANK_API_BASE_URL` | API gateway base URL | `http://localhost:8080` |
//! | `WILLBANK_API_TIMEOUT_SECS` | Timeout applied to every request | `30` |
//! | `WILLBANK_MIN_DEPOSIT` | Smallest accepted deposit (XAF) | `1000` |
//! | `WILLBANK_MAX_WITHDRAWAL` | Largest accepted withdrawal (XAF) | `500000` |
//! | `WILLBANK_MIN_TRANSFER` | Smallest transfer or withdrawal (XAF) | `100` |
//! | `WILLBANK_MAX_TRANSFER` | Largest accepted transfer (XAF) | `1000000` |
//! | `DATA_DIR` | Directory holding the persisted session | `.willbank` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |
//!
//! A malformed value is a startup error ([`ConfigError`]); it is the only
//! failure class in the crate that is meant to be fatal.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::validation::{Amount, BusinessLimits};

pub const API_BASE_URL_ENV: &str = "WILLBANK_API_BASE_URL";
pub const API_TIMEOUT_ENV: &str = "WILLBANK_API_TIMEOUT_SECS";
pub const MIN_DEPOSIT_ENV: &str = "WILLBANK_MIN_DEPOSIT";
pub const MAX_WITHDRAWAL_ENV: &str = "WILLBANK_MAX_WITHDRAWAL";
pub const MIN_TRANSFER_ENV: &str = "WILLBANK_MIN_TRANSFER";
pub const MAX_TRANSFER_ENV: &str = "WILLBANK_MAX_TRANSFER";

/// Environment variable name for the directory holding the session file.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_DATA_DIR: &str = ".willbank";

/// Uniform request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("{name} must be a whole number, got {value:?}")]
    InvalidNumber { name: String, value: String },

    #[error("{name} must be at least one second, got {value:?}")]
    InvalidTimeout { name: String, value: String },

    #[error("{name} must be `json` or `pretty`, got {value:?}")]
    InvalidLogFormat { name: String, value: String },

    #[error("invalid business limits: {0}")]
    InvalidLimits(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Everything the client needs to talk to the gateway.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub limits: BusinessLimits,
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
            limits: BusinessLimits::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_format: LogFormat::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_limits(mut self, limits: BusinessLimits) -> Result<Self, ConfigError> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = var(API_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = var(API_TIMEOUT_ENV) {
            let secs: u64 = parse_number(API_TIMEOUT_ENV, &raw)?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout {
                    name: API_TIMEOUT_ENV.to_string(),
                    value: raw,
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        let defaults = BusinessLimits::default();
        let limit = |name: &str, default: Amount| match var(name) {
            Some(raw) => parse_number(name, &raw),
            None => Ok(default),
        };
        let limits = BusinessLimits {
            min_deposit: limit(MIN_DEPOSIT_ENV, defaults.min_deposit)?,
            max_withdrawal: limit(MAX_WITHDRAWAL_ENV, defaults.max_withdrawal)?,
            min_transfer: limit(MIN_TRANSFER_ENV, defaults.min_transfer)?,
            max_transfer: limit(MAX_TRANSFER_ENV, defaults.max_transfer)?,
        };
        config = config.with_limits(limits)?;

        if let Some(dir) = var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = var(LOG_FORMAT_ENV) {
            config.log_format = match raw.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::InvalidLogFormat {
                        name: LOG_FORMAT_ENV.to_string(),
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.limits, BusinessLimits::default());
        assert_eq!(config.data_dir, PathBuf::from(".willbank"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_BASE_URL_ENV, "https://api.willbank.com"),
            (API_TIMEOUT_ENV, " 5 "),
            (MIN_DEPOSIT_ENV, "500"),
            (LOG_FORMAT_ENV, "JSON"),
            (DATA_DIR_ENV, "/tmp/willbank"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.limits.min_deposit, 500);
        assert_eq!(config.limits.max_transfer, 1_000_000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/willbank"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[(API_TIMEOUT_ENV, "   ")])).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(API_BASE_URL_ENV, "ftp://example.com")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(MAX_TRANSFER_ENV, "lots")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(API_TIMEOUT_ENV, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(API_TIMEOUT_ENV, "-5")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(MIN_TRANSFER_ENV, "2000000")])),
            Err(ConfigError::InvalidLimits(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(LOG_FORMAT_ENV, "xml")])),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
    }
}
