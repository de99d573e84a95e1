//! ClauseWise Core: error type and service configuration.

pub mod config;
pub mod error;

pub use config::ClauseWiseConfig;
pub use error::{Error, Result};
