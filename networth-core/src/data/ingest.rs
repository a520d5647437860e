//! CSV ingest for net-worth records.
//!
//! Expected header: `Data,Instituição,Valor` (any column order, extra columns
//! ignored). Dates are `dd/mm/yyyy`, values use `.` as decimal separator.

use crate::domain::Record;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATE_COLUMN: &str = "Data";
pub const INSTITUTION_COLUMN: &str = "Instituição";
pub const VALUE_COLUMN: &str = "Valor";
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors raised while reading an uploaded file. Processing of that upload stops.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid date '{value}' (expected dd/mm/yyyy)")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: invalid value '{value}'")]
    InvalidValue { line: usize, value: String },

    #[error("file has a header but no records")]
    Empty,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    institution: usize,
    value: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, InputError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or(InputError::MissingColumn(name))
        };
        Ok(Self {
            date: find(DATE_COLUMN)?,
            institution: find(INSTITUTION_COLUMN)?,
            value: find(VALUE_COLUMN)?,
        })
    }
}

/// Parse records from any reader holding CSV text.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::resolve(rdr.headers()?)?;
    let mut records = Vec::new();

    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        // header is line 1
        let line = i + 2;

        let raw_date = row.get(columns.date).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
            InputError::InvalidDate {
                line,
                value: raw_date.to_string(),
            }
        })?;

        let raw_value = row.get(columns.value).unwrap_or_default();
        let value = raw_value
            .parse::<f64>()
            .map_err(|_| InputError::InvalidValue {
                line,
                value: raw_value.to_string(),
            })?;

        let institution = row.get(columns.institution).unwrap_or_default();
        records.push(Record::new(date, institution, value));
    }

    if records.is_empty() {
        return Err(InputError::Empty);
    }

    tracing::debug!(records = records.len(), "parsed net-worth CSV");
    Ok(records)
}

/// Parse records from an in-memory upload.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, InputError> {
    read_records(bytes)
}

/// Parse records from a CSV file on disk.
pub fn read_records_from_path(path: &Path) -> Result<Vec<Record>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}
