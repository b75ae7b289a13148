//! Column resolution for tabular sources.
//!
//! Each field is resolved in two steps: a matcher picks the first column it
//! accepts, and when none matches the fallback applies.

use serde::{Deserialize, Serialize};

use crate::errors::RowError;

/// Cell spellings treated as missing values.
const NA_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

pub fn is_missing(cell: &str) -> bool {
    NA_MARKERS.contains(&cell.trim())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMatcher {
    /// Header contains `needle`
    NameContains {
        needle: String,
        #[serde(default = "default_case_insensitive")]
        case_insensitive: bool,
    },
    /// Every present value parses as an integer or decimal; an all-missing column qualifies
    NumericValues,
}

fn default_case_insensitive() -> bool {
    true
}

impl FieldMatcher {
    pub fn name_contains(needle: impl Into<String>) -> Self {
        FieldMatcher::NameContains {
            needle: needle.into(),
            case_insensitive: true,
        }
    }

    pub fn find(&self, headers: &[String], rows: &[&[String]]) -> Option<usize> {
        match self {
            FieldMatcher::NameContains {
                needle,
                case_insensitive,
            } => headers.iter().position(|header| {
                if *case_insensitive {
                    header.to_lowercase().contains(&needle.to_lowercase())
                } else {
                    header.contains(needle.as_str())
                }
            }),
            FieldMatcher::NumericValues => {
                (0..headers.len()).find(|&column| column_is_numeric(column, rows))
            }
        }
    }
}

/// A column with no rows is untyped; one whose cells are all missing is numeric.
fn column_is_numeric(column: usize, rows: &[&[String]]) -> bool {
    !rows.is_empty()
        && rows
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|cell| !is_missing(cell))
            .all(|cell| is_numeric(cell))
}

fn is_numeric(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.parse::<i64>().is_ok()
        || trimmed.parse::<u64>().is_ok()
        || trimmed.parse::<f64>().is_ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Use the first column of the table
    FirstField,
    /// Leave the field unresolved
    Unresolved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub matcher: FieldMatcher,
    pub fallback: Fallback,
}

impl FieldRule {
    pub fn resolve(&self, headers: &[String], rows: &[&[String]]) -> Option<usize> {
        self.matcher
            .find(headers, rows)
            .or_else(|| match self.fallback {
                Fallback::FirstField if !headers.is_empty() => Some(0),
                _ => None,
            })
    }
}

/// Which columns feed the region label and the count
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnResolverConfig {
    pub region: FieldRule,
    pub count: FieldRule,
}

impl ColumnResolverConfig {
    /// Default rules with a custom region header hint
    pub fn with_region_hint(hint: impl Into<String>) -> Self {
        Self {
            region: FieldRule {
                matcher: FieldMatcher::name_contains(hint),
                fallback: Fallback::FirstField,
            },
            ..Self::default()
        }
    }

    pub fn resolve(&self, headers: &[String], rows: &[&[String]]) -> ResolvedColumns {
        ResolvedColumns {
            region: self.region.resolve(headers, rows),
            count: self.count.resolve(headers, rows),
        }
    }
}

impl Default for ColumnResolverConfig {
    fn default() -> Self {
        Self {
            region: FieldRule {
                matcher: FieldMatcher::name_contains("state"),
                fallback: Fallback::FirstField,
            },
            count: FieldRule {
                matcher: FieldMatcher::NumericValues,
                fallback: Fallback::Unresolved,
            },
        }
    }
}

/// Column indices chosen for one table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ResolvedColumns {
    pub region: Option<usize>,
    /// `None` means every row counts as 0
    pub count: Option<usize>,
}

impl ResolvedColumns {
    pub fn region_label<'a>(
        &self,
        headers: &[String],
        cells: &'a [String],
    ) -> Result<&'a str, RowError> {
        let column = self.region.ok_or(RowError::NoRegionColumn)?;
        let cell = cells.get(column).ok_or(RowError::MissingField(column))?;
        if is_missing(cell) {
            let name = headers.get(column).cloned().unwrap_or_default();
            return Err(RowError::MissingRegion(name));
        }
        Ok(cell.trim())
    }

    pub fn count(&self, cells: &[String]) -> Result<u64, RowError> {
        let Some(column) = self.count else {
            return Ok(0);
        };
        let cell = cells.get(column).ok_or(RowError::MissingField(column))?;
        parse_count(cell)
    }
}

/// Blank is 0, integers pass through, decimals truncate toward zero.
pub fn parse_count(cell: &str) -> Result<u64, RowError> {
    if is_missing(cell) {
        return Ok(0);
    }
    let trimmed = cell.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(value);
    }
    if trimmed.parse::<i64>().is_ok() {
        return Err(RowError::NegativeCount(trimmed.to_string()));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| RowError::InvalidCount(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(RowError::NonFiniteCount(trimmed.to_string()));
    }
    if value < 0.0 && value.trunc() != 0.0 {
        return Err(RowError::NegativeCount(trimmed.to_string()));
    }
    Ok(value.trunc().max(0.0) as u64)
}
