//! Environment-driven settings.

use std::net::SocketAddr;

use stockroom_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_APP_NAME: &str = "Stockroom API";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid value: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub api_prefix: String,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub access_token_ttl_minutes: i64,
    pub log_format: LogFormat,
    /// Postgres connection string. Unset means in-memory storage.
    pub database_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_prefix = get("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        if !api_prefix.starts_with('/') || api_prefix.ends_with('/') {
            return Err(ConfigError::invalid(
                "API_PREFIX",
                "must start with '/' and must not end with '/'",
            ));
        }

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", e.to_string()))?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        let access_token_ttl_minutes = match get("ACCESS_TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::invalid("ACCESS_TOKEN_TTL_MINUTES", e.to_string()))?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };
        if access_token_ttl_minutes <= 0 {
            return Err(ConfigError::invalid(
                "ACCESS_TOKEN_TTL_MINUTES",
                "must be a positive number of minutes",
            ));
        }

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid("LOG_FORMAT", e.to_string()))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_version: get("APP_VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            api_prefix,
            bind_addr,
            jwt_secret,
            access_token_ttl_minutes,
            log_format,
            database_url: get("DATABASE_URL"),
        })
    }

    /// True when no `JWT_SECRET` was supplied. Settings are read before
    /// logging is up, so reporting this is left to the caller.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_ttl_minutes)
    }
}

impl core::fmt::Debug for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("api_prefix", &self.api_prefix)
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("log_format", &self.log_format)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.app_name, "Stockroom API");
        assert_eq!(s.api_prefix, "/api/v1");
        assert_eq!(s.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(s.jwt_secret, "dev-secret");
        assert!(s.uses_dev_secret());
        assert_eq!(s.access_token_ttl_minutes, 30);
        assert_eq!(s.log_format, LogFormat::Json);
        assert_eq!(s.database_url, None);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("APP_NAME", "Depot"),
            ("API_PREFIX", "/v2"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_TTL_MINUTES", "5"),
            ("LOG_FORMAT", "pretty"),
            ("DATABASE_URL", "postgres://stock:pw@db/stockroom"),
        ])
        .unwrap();
        assert_eq!(s.app_name, "Depot");
        assert_eq!(s.api_prefix, "/v2");
        assert_eq!(s.bind_addr.port(), 9000);
        assert_eq!(s.jwt_secret, "s3cret");
        assert!(!s.uses_dev_secret());
        assert_eq!(s.access_token_ttl(), chrono::Duration::minutes(5));
        assert_eq!(s.log_format, LogFormat::Pretty);
        assert_eq!(s.database_url.as_deref(), Some("postgres://stock:pw@db/stockroom"));
    }

    #[test]
    fn rejects_malformed_values() {
        for (var, value) in [
            ("BIND_ADDR", "not-an-addr"),
            ("ACCESS_TOKEN_TTL_MINUTES", "soon"),
            ("ACCESS_TOKEN_TTL_MINUTES", "0"),
            ("LOG_FORMAT", "xml"),
            ("API_PREFIX", "api/v1"),
            ("API_PREFIX", "/api/"),
        ] {
            let err = settings(&[(var, value)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { var: v, .. } if v == var), "{var}={value}");
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let s = settings(&[
            ("JWT_SECRET", "top-secret"),
            ("DATABASE_URL", "postgres://stock:hunter2@db/stockroom"),
        ])
        .unwrap();
        let debug = format!("{s:?}");
        assert!(!debug.contains("top-secret"));
        assert!(!debug.contains("hunter2"));
    }
}
