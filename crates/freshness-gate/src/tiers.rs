//! Tier table for the aging policy
//!
//! Tiers are scanned in order and the first whose upper bound exceeds the
//! age wins. Upper bounds are exclusive, so an age equal to a bound falls
//! into the next tier.

use chrono::{DateTime, Duration, Utc};

use crate::types::FreshnessStatus;

/// Age at which a record stops being SAFE
pub const RISKY_AFTER_DAYS: i64 = 120;

/// Age at which a record stops being usable
pub const EXPIRED_AFTER_DAYS: i64 = 240;

/// One row of the aging policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub status: FreshnessStatus,
    /// Exclusive upper bound in whole days; `None` for the last tier
    pub below_age_days: Option<i64>,
    pub freshness_score: u8,
    pub explanation: &'static str,
}

impl Tier {
    pub fn contains(&self, age_days: i64) -> bool {
        match self.below_age_days {
            Some(bound) => age_days < bound,
            None => true,
        }
    }
}

pub const SAFE_TIER: Tier = Tier {
    status: FreshnessStatus::Safe,
    below_age_days: Some(RISKY_AFTER_DAYS),
    freshness_score: 90,
    explanation: "Recently verified public health data.",
};

pub const RISKY_TIER: Tier = Tier {
    status: FreshnessStatus::Risky,
    below_age_days: Some(EXPIRED_AFTER_DAYS),
    freshness_score: 60,
    explanation: "Data aging. Review recommended.",
};

pub const EXPIRED_TIER: Tier = Tier {
    status: FreshnessStatus::Expired,
    below_age_days: None,
    freshness_score: 20,
    explanation: "Data outdated. Re-verification required.",
};

/// The policy, in evaluation order.
pub static TIERS: [Tier; 3] = [SAFE_TIER, RISKY_TIER, EXPIRED_TIER];

/// Whole days elapsed between `last_verified` and `now`, floored.
///
/// A verification slightly in the future yields `-1`, not `0`.
pub fn age_in_days(last_verified: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = now - last_verified;
    let days = elapsed.num_days();
    if elapsed < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// First tier containing `age_days`.
pub fn tier_for_age(age_days: i64) -> &'static Tier {
    TIERS
        .iter()
        .find(|tier| tier.contains(age_days))
        .unwrap_or(&EXPIRED_TIER)
}

pub fn classify_age(age_days: i64) -> FreshnessStatus {
    tier_for_age(age_days).status
}
