//! Error types shared across the crate

use thiserror::Error;

use crate::platform::StorageError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("could not load asset '{key}'")]
    AssetMissing { key: &'static str },
    #[error("asset '{key}' is unusable: {reason}")]
    AssetInvalid { key: &'static str, reason: String },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Tuning(String),
}
