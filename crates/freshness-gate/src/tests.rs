use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tb_expiry_core_types::{FixedClock, Record, RecordId};

use crate::errors::GateError;
use crate::evaluator::{authorize_use, evaluate, evaluate_all, FreshnessEvaluator};
use crate::tiers::{age_in_days, classify_age, TIERS};
use crate::types::{Decision, FreshnessStatus};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
}

fn record_aged(days: i64) -> Record {
    Record::new(
        RecordId(7),
        "Gujarat",
        1234,
        now() - Duration::days(days),
    )
}

#[test]
fn fifty_days_is_safe() {
    let evaluation = evaluate(&record_aged(50), now());
    assert_eq!(evaluation.status, FreshnessStatus::Safe);
    assert_eq!(evaluation.freshness_score, 90);
    assert_eq!(
        evaluation.explanation,
        "Recently verified public health data."
    );
}

#[test]
fn one_hundred_fifty_days_is_risky() {
    let evaluation = evaluate(&record_aged(150), now());
    assert_eq!(evaluation.status, FreshnessStatus::Risky);
    assert_eq!(evaluation.freshness_score, 60);
    assert_eq!(evaluation.explanation, "Data aging. Review recommended.");
}

#[test]
fn three_hundred_days_is_expired_and_blocked() {
    let record = record_aged(300);
    let evaluation = evaluate(&record, now());
    assert_eq!(evaluation.status, FreshnessStatus::Expired);
    assert_eq!(evaluation.freshness_score, 20);
    assert_eq!(
        evaluation.explanation,
        "Data outdated. Re-verification required."
    );
    assert_eq!(
        authorize_use(&record, now()),
        Decision::Blocked { reason: "expired" }
    );
}

#[test]
fn boundaries_fall_into_the_older_tier() {
    assert_eq!(classify_age(119), FreshnessStatus::Safe);
    assert_eq!(classify_age(120), FreshnessStatus::Risky);
    assert_eq!(classify_age(239), FreshnessStatus::Risky);
    assert_eq!(classify_age(240), FreshnessStatus::Expired);

    assert_eq!(evaluate(&record_aged(120), now()).status, FreshnessStatus::Risky);
    assert_eq!(evaluate(&record_aged(240), now()).status, FreshnessStatus::Expired);
}

#[test]
fn partial_days_are_floored() {
    let verified = now() - Duration::days(119) - Duration::hours(23);
    assert_eq!(age_in_days(verified, now()), 119);

    let ahead = now() + Duration::hours(1);
    assert_eq!(age_in_days(ahead, now()), -1);
    assert_eq!(classify_age(-1), FreshnessStatus::Safe);
}

#[test]
fn evaluation_copies_record_fields() {
    let record = record_aged(10);
    let evaluation = evaluate(&record, now());
    assert_eq!(evaluation.id, record.id);
    assert_eq!(evaluation.title, "TB Notifications - Gujarat");
    assert_eq!(evaluation.notifications_total, 1234);
}

#[test]
fn same_record_changes_tier_as_time_passes() {
    let record = record_aged(100);
    assert_eq!(evaluate(&record, now()).status, FreshnessStatus::Safe);
    let later = now() + Duration::days(30);
    assert_eq!(evaluate(&record, later).status, FreshnessStatus::Risky);
    let much_later = now() + Duration::days(200);
    assert_eq!(evaluate(&record, much_later).status, FreshnessStatus::Expired);
}

#[test]
fn gate_collapses_safe_and_risky_into_allowed() {
    assert_eq!(
        authorize_use(&record_aged(5), now()),
        Decision::Allowed {
            status: FreshnessStatus::Safe
        }
    );
    assert_eq!(
        authorize_use(&record_aged(200), now()),
        Decision::Allowed {
            status: FreshnessStatus::Risky
        }
    );
}

#[test]
fn decision_into_result_propagates_block() {
    let blocked = authorize_use(&record_aged(400), now()).into_result();
    assert_eq!(blocked, Err(GateError::Expired));
    assert_eq!(
        GateError::Expired.to_string(),
        "Blocked: Data expired and cannot be used."
    );

    let allowed = authorize_use(&record_aged(1), now()).into_result();
    assert_eq!(allowed, Ok(FreshnessStatus::Safe));
}

#[test]
fn evaluate_all_preserves_order() {
    let records = vec![record_aged(300), record_aged(10), record_aged(130)];
    let statuses: Vec<_> = evaluate_all(&records, now())
        .into_iter()
        .map(|evaluation| evaluation.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            FreshnessStatus::Expired,
            FreshnessStatus::Safe,
            FreshnessStatus::Risky
        ]
    );
}

#[test]
fn pass_samples_the_clock_once() {
    let evaluator = FreshnessEvaluator::new(Arc::new(FixedClock(now())));
    let pass = evaluator.pass();
    assert_eq!(pass.now(), now());
    assert_eq!(pass.evaluate(&record_aged(50)).status, FreshnessStatus::Safe);
    assert!(pass.authorize_use(&record_aged(250)).is_blocked());
}

#[test]
fn tier_table_is_ordered() {
    let statuses: Vec<_> = TIERS.iter().map(|tier| tier.status).collect();
    assert_eq!(
        statuses,
        vec![
            FreshnessStatus::Safe,
            FreshnessStatus::Risky,
            FreshnessStatus::Expired
        ]
    );
    assert!(TIERS[2].below_age_days.is_none());
}

#[test]
fn evaluation_serializes_with_wire_names() {
    let value = serde_json::to_value(evaluate(&record_aged(150), now())).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["status"], "RISKY");
    assert_eq!(value["freshness_score"], 60);
    assert_eq!(value["title"], "TB Notifications - Gujarat");
}
