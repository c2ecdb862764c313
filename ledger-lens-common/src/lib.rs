pub mod config;
pub use config::{Config, FilteringConfig, PresetsConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LedgerLensError>;
