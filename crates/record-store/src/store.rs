use std::collections::HashMap;

use tb_expiry_core_types::{Record, RecordId};

/// Immutable, ordered catalog of records.
///
/// Built once at startup and shared read-only afterwards, so concurrent
/// readers need no coordination.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    index: HashMap<RecordId, usize>,
}

impl RecordStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from normalized records, keeping their order.
    ///
    /// When two records share an id the first one wins the lookup.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            index.entry(record.id).or_insert(position);
        }
        Self { records, index }
    }

    /// All records in ingestion order.
    pub fn list_all(&self) -> &[Record] {
        &self.records
    }

    pub fn get_by_id(&self, id: RecordId) -> Option<&Record> {
        self.index
            .get(&id)
            .and_then(|position| self.records.get(*position))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
