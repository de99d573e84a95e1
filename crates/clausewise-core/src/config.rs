//! Service configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 5;

/// Top-level ClauseWise configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseWiseConfig {
    /// HTTP server port.
    pub port: u16,
    /// Upload size limit in megabytes.
    pub max_upload_mb: u64,
    /// Optional JSON file holding LLM provider settings.
    pub llm_config_file: Option<PathBuf>,
}

impl Default for ClauseWiseConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            llm_config_file: None,
        }
    }
}

impl ClauseWiseConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT: {}", p)))?,
            None => DEFAULT_PORT,
        };

        let max_upload_mb = match lookup("MAX_UPLOAD_MB") {
            Some(m) => m
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid MAX_UPLOAD_MB: {}", m)))?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        let llm_config_file = lookup("CLAUSEWISE_LLM_CONFIG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            max_upload_mb,
            llm_config_file,
        })
    }

    /// Upload size limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_mb as usize).saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClauseWiseConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_upload_mb, 5);
        assert_eq!(config.max_upload_bytes(), 5 * 1024 * 1024);
        assert!(config.llm_config_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ClauseWiseConfig::from_lookup(lookup(&[
            ("PORT", "9001"),
            ("MAX_UPLOAD_MB", "12"),
            ("CLAUSEWISE_LLM_CONFIG", "/etc/clausewise/llm.json"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.max_upload_mb, 12);
        assert_eq!(
            config.llm_config_file,
            Some(PathBuf::from("/etc/clausewise/llm.json"))
        );
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let err = ClauseWiseConfig::from_lookup(lookup(&[("MAX_UPLOAD_MB", "lots")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
