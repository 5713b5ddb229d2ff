use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::export::EmptyDocument;

#[derive(Debug, Error, Serialize, Deserialize)]
pub enum AppError {
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Backend error: {0}")]
    BackendError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    /// User-facing notice, not a fault
    #[error("{0}")]
    NothingToExport(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<EmptyDocument> for AppError {
    fn from(err: EmptyDocument) -> Self {
        AppError::NothingToExport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
