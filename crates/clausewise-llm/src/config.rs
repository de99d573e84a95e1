//! LLM provider configuration and selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::types::{LLMProvider, LLMStatus};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Provider settings, read from an optional JSON file with env fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: default_preferred(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            groq_model: default_groq_model(),
        }
    }
}

/// Everything needed to call one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LLMEndpoint {
    pub provider: LLMProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

impl LLMConfig {
    /// Load config from an optional file, falling back to env vars and defaults.
    pub fn load(config_path: Option<&Path>) -> Self {
        let file_config = config_path.and_then(|path| {
            let raw = std::fs::read_to_string(path).ok()?;
            match serde_json::from_str::<LLMConfig>(&raw) {
                Ok(c) => {
                    info!("Loaded LLM config from {}", path.display());
                    Some(c)
                }
                Err(e) => {
                    warn!("Ignoring malformed LLM config {}: {}", path.display(), e);
                    None
                }
            }
        });

        file_config
            .unwrap_or_default()
            .with_env_fallbacks(|key| std::env::var(key).ok())
    }

    /// Fill unset values from environment-style variables.
    pub fn with_env_fallbacks(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(p) = non_empty("LLM_PROVIDER") {
            self.preferred_provider = p.trim().to_lowercase();
        }

        self.openai_api_key = non_blank(self.openai_api_key).or_else(|| non_empty("OPENAI_API_KEY"));
        self.anthropic_api_key =
            non_blank(self.anthropic_api_key).or_else(|| non_empty("ANTHROPIC_API_KEY"));
        self.groq_api_key = non_blank(self.groq_api_key).or_else(|| non_empty("GROQ_API_KEY"));

        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            if self.openai_base_url == DEFAULT_OPENAI_BASE_URL {
                self.openai_base_url = url;
            }
        }
        if let Some(model) = non_empty("OPENAI_MODEL") {
            if self.openai_model == DEFAULT_OPENAI_MODEL {
                self.openai_model = model;
            }
        }

        self
    }

    /// Resolve which provider, model and key to use.
    pub fn resolve_provider(&self) -> Option<LLMEndpoint> {
        // Explicit preference
        if self.preferred_provider != "auto" {
            return self
                .preferred_provider
                .parse::<LLMProvider>()
                .ok()
                .and_then(|p| self.endpoint(p));
        }

        // Auto mode: Anthropic > Groq > OpenAI
        [LLMProvider::Anthropic, LLMProvider::Groq, LLMProvider::OpenAI]
            .into_iter()
            .find_map(|p| self.endpoint(p))
    }

    /// Whether any provider can be called.
    pub fn available(&self) -> bool {
        self.resolve_provider().is_some()
    }

    fn endpoint(&self, provider: LLMProvider) -> Option<LLMEndpoint> {
        let (key, base_url, model) = match provider {
            LLMProvider::OpenAI => (
                &self.openai_api_key,
                self.openai_base_url.trim_end_matches('/'),
                &self.openai_model,
            ),
            LLMProvider::Anthropic => (&self.anthropic_api_key, ANTHROPIC_BASE_URL, &self.anthropic_model),
            LLMProvider::Groq => (&self.groq_api_key, GROQ_BASE_URL, &self.groq_model),
        };
        key.as_ref().filter(|k| !k.trim().is_empty()).map(|k| LLMEndpoint {
            provider,
            base_url: base_url.to_string(),
            model: model.clone(),
            api_key: k.clone(),
        })
    }

    /// Build the public status response (no API keys exposed).
    pub fn to_status(&self) -> LLMStatus {
        let resolved = self.resolve_provider();
        LLMStatus {
            llm_available: resolved.is_some(),
            llm_provider: resolved.as_ref().map(|e| e.provider.to_string()),
            model: resolved.map(|e| e.model),
            preferred_provider: self.preferred_provider.clone(),
            openai_configured: non_blank(self.openai_api_key.clone()).is_some(),
            anthropic_configured: non_blank(self.anthropic_api_key.clone()).is_some(),
            groq_configured: non_blank(self.groq_api_key.clone()).is_some(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_unconfigured_is_unavailable() {
        let config = LLMConfig::default().with_env_fallbacks(env(&[]));
        assert!(!config.available());
        assert!(config.resolve_provider().is_none());
        assert!(!config.to_status().llm_available);
    }

    #[test]
    fn test_empty_key_counts_as_unset() {
        let config = LLMConfig::default().with_env_fallbacks(env(&[("OPENAI_API_KEY", "  ")]));
        assert!(!config.available());
    }

    #[test]
    fn test_openai_from_env() {
        let config = LLMConfig::default().with_env_fallbacks(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1/"),
            ("OPENAI_MODEL", "llama3"),
        ]));
        let endpoint = config.resolve_provider().unwrap();
        assert_eq!(endpoint.provider, LLMProvider::OpenAI);
        assert_eq!(endpoint.base_url, "http://localhost:11434/v1");
        assert_eq!(endpoint.model, "llama3");
        assert_eq!(endpoint.api_key, "sk-test");
    }

    #[test]
    fn test_auto_prefers_anthropic_then_groq() {
        let config = LLMConfig::default().with_env_fallbacks(env(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("GROQ_API_KEY", "gsk-groq"),
        ]));
        assert_eq!(config.resolve_provider().unwrap().provider, LLMProvider::Groq);

        let config = config.with_env_fallbacks(env(&[("ANTHROPIC_API_KEY", "sk-ant")]));
        assert_eq!(
            config.resolve_provider().unwrap().provider,
            LLMProvider::Anthropic
        );
    }

    #[test]
    fn test_explicit_preference_without_key() {
        let config = LLMConfig::default().with_env_fallbacks(env(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("LLM_PROVIDER", "Anthropic"),
        ]));
        assert_eq!(config.preferred_provider, "anthropic");
        assert!(config.resolve_provider().is_none());
    }

    #[test]
    fn test_status_hides_keys() {
        let config = LLMConfig::default().with_env_fallbacks(env(&[("GROQ_API_KEY", "gsk-secret")]));
        let json = serde_json::to_string(&config.to_status()).unwrap();
        assert!(!json.contains("gsk-secret"));
        assert!(json.contains("\"llmProvider\":\"groq\""));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llm.json");
        std::fs::write(
            &path,
            r#"{"preferred_provider": "openai", "openai_api_key": "sk-file", "openai_model": "gpt-4o"}"#,
        )
        .unwrap();

        let config = LLMConfig::load(Some(path.as_path()));
        let endpoint = config.resolve_provider().unwrap();
        assert_eq!(endpoint.api_key, "sk-file");
        assert_eq!(endpoint.model, "gpt-4o");
    }
}
