pub mod errors;
pub mod ingest;
pub mod resolver;
pub mod store;

pub use errors::{IngestError, RowError};
pub use ingest::{
    load_store, load_store_from_reader, normalize_table, read_table, simulated_last_verified,
    IngestReport, RawRow, RawTable, SkippedRow, BASE_OFFSET_DAYS, STEP_DAYS,
};
pub use resolver::{ColumnResolverConfig, Fallback, FieldMatcher, FieldRule, ResolvedColumns};
pub use store::RecordStore;
