//! Catalog error taxonomy / 目录错误类型
//!
//! Queries have no error category: any string is a literal substring pattern.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required field missing or blank. Nothing was written.
    #[error("{0}")]
    Validation(String),

    /// The persistence collaborator failed. The caller decides whether to retry.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CatalogError {
    pub fn missing_field(field: &str) -> Self {
        CatalogError::Validation(format!("Field '{}' is required and must not be empty", field))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::StorageUnavailable(format!("corrupt record: {}", err))
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
