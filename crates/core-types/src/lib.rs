use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Shared error type for record primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),
}

/// Ordinal position of a row in the ingested source, 0-based.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(transparent))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn from_ordinal(ordinal: usize) -> Self {
        Self(ordinal as u64)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(RecordId)
            .map_err(|_| CoreError::InvalidRecordId(s.to_string()))
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A normalized notification record. Never mutated after ingestion.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub notifications_total: u64,
    pub last_verified: DateTime<Utc>,
}

impl Record {
    pub const TITLE_PREFIX: &'static str = "TB Notifications - ";

    pub fn new(
        id: RecordId,
        region: &str,
        notifications_total: u64,
        last_verified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: Self::title_for(region),
            notifications_total,
            last_verified,
        }
    }

    pub fn title_for(region: &str) -> String {
        format!("{}{}", Self::TITLE_PREFIX, region)
    }
}

/// Source of the current instant. Sampled once per evaluation pass.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for tests and offline reports.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_id_parses_and_displays() {
        let id: RecordId = "42".parse().unwrap();
        assert_eq!(id, RecordId(42));
        assert_eq!(id.to_string(), "42");
        assert!("-1".parse::<RecordId>().is_err());
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn title_uses_region_label() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = Record::new(RecordId(0), "Kerala", 10, at);
        assert_eq!(record.title, "TB Notifications - Kerala");
    }

    #[test]
    fn fixed_clock_is_stable() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), clock.now());
    }
}
