//! Error types for the use-gate

use thiserror::Error;

/// Gate rejection enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Record is past the last freshness tier
    #[error("Blocked: Data expired and cannot be used.")]
    Expired,
}

impl GateError {
    /// Short machine-readable reason attached to a blocked decision
    pub fn reason(&self) -> &'static str {
        match self {
            GateError::Expired => "expired",
        }
    }
}
