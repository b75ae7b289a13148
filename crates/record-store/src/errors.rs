use thiserror::Error;

/// Whole-source failure. Never fatal: the store comes up empty.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid csv: {0}")]
    Csv(String),
}

impl From<csv::Error> for IngestError {
    fn from(value: csv::Error) -> Self {
        match value.kind() {
            csv::ErrorKind::Io(err) => IngestError::Io(err.to_string()),
            _ => IngestError::Csv(value.to_string()),
        }
    }
}

/// Row-level failure. The row is skipped and ingestion continues.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowError {
    #[error("malformed row: {0}")]
    Malformed(String),
    #[error("no region column resolved")]
    NoRegionColumn,
    #[error("missing region value in column '{0}'")]
    MissingRegion(String),
    #[error("missing field {0}")]
    MissingField(usize),
    #[error("count '{0}' is not a number")]
    InvalidCount(String),
    #[error("count '{0}' is negative")]
    NegativeCount(String),
    #[error("count '{0}' is not finite")]
    NonFiniteCount(String),
    #[error("verification date for row {0} is out of range")]
    VerificationOutOfRange(u64),
}
