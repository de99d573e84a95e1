//! Shared application state.

use clausewise_core::{ClauseWiseConfig, Result};
use clausewise_llm::LLMConfig;

use crate::store::DocumentStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: ClauseWiseConfig,
    pub documents: DocumentStore,
    pub llm_config: LLMConfig,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state, loading LLM provider settings from the configured file and env.
    pub fn new(config: ClauseWiseConfig) -> Result<Self> {
        let llm_config = LLMConfig::load(config.llm_config_file.as_deref());
        Self::with_llm_config(config, llm_config)
    }

    /// Build state with explicit LLM settings.
    pub fn with_llm_config(config: ClauseWiseConfig, llm_config: LLMConfig) -> Result<Self> {
        Ok(Self {
            config,
            documents: DocumentStore::new(),
            llm_config,
            http: clausewise_llm::providers::build_client()?,
        })
    }
}
