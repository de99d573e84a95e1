//! Remote LLM path for summaries and what-if analysis.
//!
//! Used only when a provider key is configured. Callers are expected to fall
//! back to the heuristic analyzers in `clausewise-analyze` when anything here
//! fails.

pub mod config;
pub mod providers;
pub mod tasks;
pub mod types;

pub use config::{LLMConfig, LLMEndpoint};
pub use types::*;
