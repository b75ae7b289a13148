//! Error handling module
//!
//! Caller-facing failures of the document service and their HTTP mapping.

use freshness_gate::GateError;
use tb_expiry_core_types::RecordId;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Document not found.";

/// Client-visible failures of the document operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Unknown document id
    #[error("Document not found.")]
    NotFound(Option<RecordId>),

    /// Use-gate rejected the document
    #[error(transparent)]
    Blocked(#[from] GateError),
}

impl ServiceError {
    pub fn not_found(id: RecordId) -> Self {
        ServiceError::NotFound(Some(id))
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Blocked(_) => "forbidden",
        }
    }

    /// HTTP status code
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Blocked(_) => 403,
        }
    }

    /// Message shown to API callers
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
