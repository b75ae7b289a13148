//! Core types for the freshness gate

use std::fmt;

use serde::{Deserialize, Serialize};
use tb_expiry_core_types::RecordId;

use crate::errors::GateError;

/// Freshness status of a record at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreshnessStatus {
    Safe,
    Risky,
    Expired,
}

impl FreshnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessStatus::Safe => "SAFE",
            FreshnessStatus::Risky => "RISKY",
            FreshnessStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation - transient view of a record at one instant
///
/// Never stored. Recomputed on every read because the status depends on
/// the time elapsed since verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub id: RecordId,
    pub title: String,
    pub notifications_total: u64,
    pub status: FreshnessStatus,
    pub freshness_score: u8,
    pub explanation: &'static str,
}

/// Use-gate decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Record may be used; carries the evaluated status (SAFE or RISKY)
    Allowed { status: FreshnessStatus },

    /// Record may not be used
    Blocked { reason: &'static str },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }

    pub fn is_blocked(&self) -> bool {
        !self.is_allowed()
    }

    /// Convert into a `Result` so callers can propagate a block with `?`
    pub fn into_result(self) -> Result<FreshnessStatus, GateError> {
        match self {
            Decision::Allowed { status } => Ok(status),
            Decision::Blocked { .. } => Err(GateError::Expired),
        }
    }
}

impl From<GateError> for Decision {
    fn from(err: GateError) -> Self {
        Decision::Blocked {
            reason: err.reason(),
        }
    }
}
