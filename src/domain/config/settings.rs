use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 8090;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Unknown IPFS provider: {0}")]
    UnknownProvider(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Provider {
    #[serde(rename = "kubo")]
    Kubo,
}

impl std::str::FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kubo" => Ok(Provider::Kubo),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub provider: Provider,
    #[serde(rename = "apiUrl")]
    pub api_url: String,
    #[serde(rename = "gatewayUrl")]
    pub gateway_url: String,
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,
    pub port: u16,
    #[serde(rename = "corsAllowedOrigins")]
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Kubo,
            api_url: DEFAULT_API_URL.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            port: DEFAULT_PORT,
            cors_allowed_origins: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to
    /// defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let provider = match lookup("IPFS_PROVIDER") {
            Some(value) => value.parse()?,
            None => defaults.provider,
        };

        let api_url = lookup("IPFS_API_URL")
            .map(|url| trim_url(&url))
            .unwrap_or(defaults.api_url);

        let gateway_url = lookup("IPFS_GATEWAY_URL")
            .map(|url| trim_url(&url))
            .unwrap_or(defaults.gateway_url);

        let timeout_secs = match lookup("IPFS_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: "IPFS_TIMEOUT_SECS",
                value,
            })?,
            None => defaults.timeout_secs,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?,
            None => defaults.port,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            provider,
            api_url,
            gateway_url,
            timeout_secs,
            port,
            cors_allowed_origins,
        })
    }
}

fn trim_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.provider, Provider::Kubo);
        assert_eq!(config.port, 8090);
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn trims_trailing_slashes_and_splits_origins() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("IPFS_API_URL", "http://node:5001/"),
            ("IPFS_GATEWAY_URL", "https://gw//"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://node:5001");
        assert_eq!(config.gateway_url, "https://gw");
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }

    #[test]
    fn rejects_bad_numbers_and_providers() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[("IPFS_PROVIDER", "pinata")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider(_)));
    }
}
