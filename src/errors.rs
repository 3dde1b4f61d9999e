use thiserror::Error;
use uuid::Uuid;

/// Failures reported by a category data-access collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Category not found: {0}")]
    NotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Rejected(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Local validation failures raised before any service call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a category name")]
    MissingName,
    #[error("Please select a category type")]
    MissingKind,
}

/// Rejections from the form modal while it cannot accept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("A save is already in progress")]
    Busy,
    #[error("No category form is open")]
    NoModal,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
