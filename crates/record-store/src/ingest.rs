//! Best-effort CSV ingestion.
//!
//! Loading never fails the process: a missing or unreadable source produces
//! an empty store, and a malformed row is skipped without renumbering the
//! rows after it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
use tb_expiry_core_types::{Record, RecordId};
use tracing::{error, info, warn};

use crate::errors::{IngestError, RowError};
use crate::resolver::{ColumnResolverConfig, ResolvedColumns};
use crate::store::RecordStore;

/// Days between process start and the newest simulated verification.
pub const BASE_OFFSET_DAYS: i64 = 180;

/// Extra age given to each subsequent row.
pub const STEP_DAYS: i64 = 7;

/// Simulated verification instant for the row at `id`.
///
/// `None` when the date would fall before year 1 or outside chrono's range.
pub fn simulated_last_verified(
    started_at: DateTime<Utc>,
    id: RecordId,
) -> Option<DateTime<Utc>> {
    let step_days = i64::try_from(id.value())
        .ok()
        .and_then(|id| id.checked_mul(STEP_DAYS))?;
    let offset = Duration::try_days(BASE_OFFSET_DAYS)?;
    let step = Duration::try_days(step_days)?;
    started_at
        .checked_sub_signed(offset)?
        .checked_sub_signed(step)
        .filter(|at| at.year() >= 1)
}

/// One data row with its source position
#[derive(Debug, Clone)]
pub struct RawRow {
    pub ordinal: usize,
    pub cells: Result<Vec<String>, RowError>,
}

/// Parsed table before normalization
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    fn well_formed_rows(&self) -> Vec<&[String]> {
        self.rows
            .iter()
            .filter_map(|row| row.cells.as_ref().ok().map(|cells| cells.as_slice()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub ordinal: usize,
    pub reason: String,
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub rows_seen: usize,
    pub records_loaded: usize,
    pub skipped: Vec<SkippedRow>,
    pub region_column: Option<String>,
    pub count_column: Option<String>,
    /// Set when the whole source was unusable
    pub failure: Option<String>,
}

impl IngestReport {
    pub fn rows_skipped(&self) -> usize {
        self.skipped.len()
    }

    fn failed(err: &IngestError) -> Self {
        Self {
            failure: Some(err.to_string()),
            ..Self::default()
        }
    }
}

/// Read a CSV source with a header row.
///
/// Row-level decoding problems are kept per row; only I/O and header
/// failures abort the read.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for (ordinal, result) in csv_reader.records().enumerate() {
        let cells = match result {
            Ok(record) => Ok(record.iter().map(str::to_string).collect()),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                return Err(IngestError::from(err));
            }
            Err(err) => Err(RowError::Malformed(err.to_string())),
        };
        rows.push(RawRow { ordinal, cells });
    }

    Ok(RawTable { headers, rows })
}

/// Normalize a table into records, collecting skipped rows.
pub fn normalize_table(
    table: &RawTable,
    resolver: &ColumnResolverConfig,
    started_at: DateTime<Utc>,
) -> (Vec<Record>, IngestReport) {
    let sample = table.well_formed_rows();
    let columns = resolver.resolve(&table.headers, &sample);
    let mut report = IngestReport {
        rows_seen: table.rows.len(),
        region_column: column_name(&table.headers, columns.region),
        count_column: column_name(&table.headers, columns.count),
        ..IngestReport::default()
    };

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        match normalize_row(row, &table.headers, &columns, started_at) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(row = row.ordinal, error = %err, "Skipping row");
                report.skipped.push(SkippedRow {
                    ordinal: row.ordinal,
                    reason: err.to_string(),
                });
            }
        }
    }
    report.records_loaded = records.len();
    (records, report)
}

fn normalize_row(
    row: &RawRow,
    headers: &[String],
    columns: &ResolvedColumns,
    started_at: DateTime<Utc>,
) -> Result<Record, RowError> {
    let cells = row.cells.as_ref().map_err(Clone::clone)?;
    let region = columns.region_label(headers, cells)?;
    let total = columns.count(cells)?;
    let id = RecordId::from_ordinal(row.ordinal);
    let last_verified = simulated_last_verified(started_at, id)
        .ok_or(RowError::VerificationOutOfRange(id.value()))?;
    Ok(Record::new(id, region, total, last_verified))
}

fn column_name(headers: &[String], column: Option<usize>) -> Option<String> {
    column.and_then(|idx| headers.get(idx).cloned())
}

/// Build a store from any CSV reader. Never fails.
pub fn load_store_from_reader<R: Read>(
    reader: R,
    resolver: &ColumnResolverConfig,
    started_at: DateTime<Utc>,
) -> (RecordStore, IngestReport) {
    match read_table(reader) {
        Ok(table) => {
            info!(
                columns = ?table.headers,
                rows = table.rows.len(),
                "CSV loaded"
            );
            let (records, report) = normalize_table(&table, resolver, started_at);
            info!(
                records = report.records_loaded,
                skipped = report.rows_skipped(),
                region_column = report.region_column.as_deref().unwrap_or("-"),
                count_column = report.count_column.as_deref().unwrap_or("-"),
                "Total documents loaded"
            );
            (RecordStore::from_records(records), report)
        }
        Err(err) => {
            error!(error = %err, "Error reading CSV; serving an empty catalog");
            (RecordStore::empty(), IngestReport::failed(&err))
        }
    }
}

/// Build a store from a CSV file. A missing or unreadable file gives an empty store.
pub fn load_store(
    path: &Path,
    resolver: &ColumnResolverConfig,
    started_at: DateTime<Utc>,
) -> (RecordStore, IngestReport) {
    if !path.exists() {
        let err = IngestError::NotFound(path.display().to_string());
        error!(path = %path.display(), "File not found; serving an empty catalog");
        return (RecordStore::empty(), IngestReport::failed(&err));
    }

    match File::open(path) {
        Ok(file) => load_store_from_reader(file, resolver, started_at),
        Err(err) => {
            let err = IngestError::Io(err.to_string());
            error!(
                path = %path.display(),
                error = %err,
                "Error opening CSV; serving an empty catalog"
            );
            (RecordStore::empty(), IngestReport::failed(&err))
        }
    }
}
