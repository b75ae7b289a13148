//! Record evaluation and use-gate

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tb_expiry_core_types::{Clock, Record, SystemClock};
use tracing::debug;

use crate::errors::GateError;
use crate::tiers::{age_in_days, tier_for_age};
use crate::types::{Decision, Evaluation, FreshnessStatus};

/// Classify a record at `now`.
///
/// Pure: the same `(record, now)` pair always yields the same evaluation.
pub fn evaluate(record: &Record, now: DateTime<Utc>) -> Evaluation {
    let age_days = age_in_days(record.last_verified, now);
    let tier = tier_for_age(age_days);
    Evaluation {
        id: record.id,
        title: record.title.clone(),
        notifications_total: record.notifications_total,
        status: tier.status,
        freshness_score: tier.freshness_score,
        explanation: tier.explanation,
    }
}

/// Gate a use of `record` at `now`. Only EXPIRED blocks.
pub fn authorize_use(record: &Record, now: DateTime<Utc>) -> Decision {
    let evaluation = evaluate(record, now);
    match evaluation.status {
        FreshnessStatus::Expired => {
            debug!(id = %record.id, "use blocked for expired record");
            Decision::from(GateError::Expired)
        }
        status => Decision::Allowed { status },
    }
}

/// Evaluate every record against the same instant, preserving order.
pub fn evaluate_all<'a, I>(records: I, now: DateTime<Utc>) -> Vec<Evaluation>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|record| evaluate(record, now))
        .collect()
}

/// Evaluator bound to a clock
#[derive(Clone)]
pub struct FreshnessEvaluator {
    clock: Arc<dyn Clock>,
}

impl FreshnessEvaluator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Sample the clock once; every call on the returned pass shares that instant.
    pub fn pass(&self) -> EvaluationPass {
        EvaluationPass {
            now: self.clock.now(),
        }
    }
}

impl Default for FreshnessEvaluator {
    fn default() -> Self {
        Self::system()
    }
}

/// One request's worth of evaluations at a single instant
#[derive(Debug, Clone, Copy)]
pub struct EvaluationPass {
    now: DateTime<Utc>,
}

impl EvaluationPass {
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn evaluate(&self, record: &Record) -> Evaluation {
        evaluate(record, self.now)
    }

    pub fn evaluate_all<'a, I>(&self, records: I) -> Vec<Evaluation>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        evaluate_all(records, self.now)
    }

    pub fn authorize_use(&self, record: &Record) -> Decision {
        authorize_use(record, self.now)
    }
}
