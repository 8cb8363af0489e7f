//! Error types for malla.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MallaError>;

#[derive(Debug, Error)]
pub enum MallaError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),

    #[error("course {0} not found in catalog")]
    CourseNotFound(u32),

    #[error("import rejected: {0}")]
    ImportRejected(String),

    #[error("confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}
