// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH_BASE_URL` | Base URL of the credential API | `http://localhost:5193/api` |
//! | `PROFILE_DIR` | Directory holding the persisted session | `.session-gate` |
//! | `HTTP_TIMEOUT_SECS` | Timeout for outbound calls | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::storage::paths::DEFAULT_PROFILE_DIR;

/// Environment variable name for the credential API base URL.
pub const AUTH_BASE_URL_ENV: &str = "AUTH_BASE_URL";

/// Environment variable name for the profile directory.
pub const PROFILE_DIR_ENV: &str = "PROFILE_DIR";

/// Environment variable name for the outbound call timeout, in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "HTTP_TIMEOUT_SECS";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:5193/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} must be a positive number of seconds, got `{value}`")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("{name} must be `json` or `pretty`, got `{value}`")]
    InvalidLogFormat { name: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub base_url: Url,
    pub profile_dir: PathBuf,
    pub http_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            base_url: parse_base_url(DEFAULT_AUTH_BASE_URL).expect("default base URL is valid"),
            profile_dir: PathBuf::from(DEFAULT_PROFILE_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_format: LogFormat::Pretty,
        }
    }
}

impl GateConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`. Values are trimmed and empty
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = match get(AUTH_BASE_URL_ENV) {
            Some(raw) => parse_base_url(&raw).map_err(|reason| ConfigError::InvalidUrl {
                name: AUTH_BASE_URL_ENV,
                reason,
            })?,
            None => Self::default().base_url,
        };

        let profile_dir = get(PROFILE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_DIR));

        let http_timeout = match get(HTTP_TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: HTTP_TIMEOUT_ENV,
                        value: raw,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let log_format = match get(LOG_FORMAT_ENV).map(|v| v.to_ascii_lowercase()) {
            None => LogFormat::Pretty,
            Some(v) if v == "pretty" => LogFormat::Pretty,
            Some(v) if v == "json" => LogFormat::Json,
            Some(value) => {
                return Err(ConfigError::InvalidLogFormat {
                    name: LOG_FORMAT_ENV,
                    value,
                })
            }
        };

        Ok(Self {
            base_url,
            profile_dir,
            http_timeout,
            log_format,
        })
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw).map_err(|reason| ConfigError::InvalidUrl {
            name: AUTH_BASE_URL_ENV,
            reason,
        })?;
        Ok(self)
    }

    /// Override the profile directory.
    pub fn with_profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profile_dir = dir.into();
        self
    }
}

/// Parse a base URL so that relative endpoint paths join under it.
///
/// `Url::join` replaces the last segment unless the path ends in `/`,
/// so one is appended when missing.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("URL cannot be used as a base".to_string());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = GateConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5193/api/");
        assert_eq!(config.profile_dir, PathBuf::from(DEFAULT_PROFILE_DIR));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn values_are_trimmed_and_blank_is_unset() {
        let config = GateConfig::from_lookup(lookup(&[
            (AUTH_BASE_URL_ENV, "  https://auth.example.com/api  "),
            (PROFILE_DIR_ENV, "   "),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://auth.example.com/api/");
        assert_eq!(config.profile_dir, PathBuf::from(DEFAULT_PROFILE_DIR));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn base_url_joins_endpoint_paths() {
        let config = GateConfig::default()
            .with_base_url("http://localhost:5193/api")
            .unwrap();
        let login = config.base_url.join("auth/login").unwrap();
        assert_eq!(login.as_str(), "http://localhost:5193/api/auth/login");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            GateConfig::from_lookup(lookup(&[(AUTH_BASE_URL_ENV, "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            GateConfig::from_lookup(lookup(&[(HTTP_TIMEOUT_ENV, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            GateConfig::from_lookup(lookup(&[(LOG_FORMAT_ENV, "xml")])),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
    }
}
