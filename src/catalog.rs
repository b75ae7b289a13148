//! Document catalog: the record store paired with the freshness evaluator.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use freshness_gate::{Evaluation, FreshnessEvaluator, FreshnessStatus};
use serde::Serialize;
use tb_expiry_core_types::RecordId;
use tb_expiry_record_store::{load_store, IngestReport, RecordStore};
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::errors::{ServiceError, ServiceResult};

pub const USE_ALLOWED_MESSAGE: &str = "Action allowed";

/// Successful `use` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseOutcome {
    pub message: &'static str,
    pub document_status: FreshnessStatus,
}

/// Read-only catalog shared by every request handler
#[derive(Clone)]
pub struct DocumentCatalog {
    store: Arc<RecordStore>,
    evaluator: FreshnessEvaluator,
}

impl DocumentCatalog {
    pub fn new(store: RecordStore, evaluator: FreshnessEvaluator) -> Self {
        Self {
            store: Arc::new(store),
            evaluator,
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Every record evaluated at one instant, in store order.
    pub fn list_documents(&self) -> Vec<Evaluation> {
        self.evaluator.pass().evaluate_all(self.store.list_all())
    }

    /// Gate a use of document `id`.
    pub fn use_document(&self, id: RecordId) -> ServiceResult<UseOutcome> {
        let record = self
            .store
            .get_by_id(id)
            .ok_or_else(|| ServiceError::not_found(id))?;

        let status = match self.evaluator.pass().authorize_use(record).into_result() {
            Ok(status) => status,
            Err(err) => {
                warn!(%id, title = %record.title, "use rejected: {}", err);
                return Err(ServiceError::from(err));
            }
        };

        info!(%id, %status, "use allowed");
        Ok(UseOutcome {
            message: USE_ALLOWED_MESSAGE,
            document_status: status,
        })
    }
}

/// Ingest the configured source once. A missing or unreadable source gives an empty catalog.
pub fn load_catalog(
    source: &SourceConfig,
    started_at: DateTime<Utc>,
    evaluator: FreshnessEvaluator,
) -> (DocumentCatalog, IngestReport) {
    let (store, report) = load_store(&source.path, &source.resolver(), started_at);
    (DocumentCatalog::new(store, evaluator), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use freshness_gate::GateError;
    use tb_expiry_core_types::{FixedClock, Record};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
    }

    fn catalog() -> DocumentCatalog {
        let records = vec![
            Record::new(RecordId(0), "Kerala", 10, now() - Duration::days(50)),
            Record::new(RecordId(1), "Bihar", 20, now() - Duration::days(150)),
            Record::new(RecordId(3), "Assam", 30, now() - Duration::days(300)),
        ];
        DocumentCatalog::new(
            RecordStore::from_records(records),
            FreshnessEvaluator::new(Arc::new(FixedClock(now()))),
        )
    }

    #[test]
    fn lists_in_store_order() {
        let statuses: Vec<_> = catalog()
            .list_documents()
            .into_iter()
            .map(|doc| (doc.id.value(), doc.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                (0, FreshnessStatus::Safe),
                (1, FreshnessStatus::Risky),
                (3, FreshnessStatus::Expired)
            ]
        );
    }

    #[test]
    fn use_allows_safe_and_risky() {
        let catalog = catalog();
        assert_eq!(
            catalog.use_document(RecordId(0)).unwrap().document_status,
            FreshnessStatus::Safe
        );
        let risky = catalog.use_document(RecordId(1)).unwrap();
        assert_eq!(risky.document_status, FreshnessStatus::Risky);
        assert_eq!(risky.message, "Action allowed");
    }

    #[test]
    fn use_rejects_expired_and_unknown() {
        let catalog = catalog();
        assert_eq!(
            catalog.use_document(RecordId(3)),
            Err(ServiceError::Blocked(GateError::Expired))
        );
        assert_eq!(
            catalog.use_document(RecordId(2)),
            Err(ServiceError::not_found(RecordId(2)))
        );
    }

    #[test]
    fn empty_catalog_lists_nothing() {
        let catalog = DocumentCatalog::new(RecordStore::empty(), FreshnessEvaluator::system());
        assert!(catalog.is_empty());
        assert!(catalog.list_documents().is_empty());
    }
}
