//! Record: one institution's balance on one date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Net-worth balance held at a single institution on a single date.
///
/// Several records may share a date (one per institution). Records are never
/// mutated after ingest; every derived view is rebuilt from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub institution: String,
    pub value: f64,
}

impl Record {
    pub fn new(date: NaiveDate, institution: impl Into<String>, value: f64) -> Self {
        Self {
            date,
            institution: institution.into(),
            value,
        }
    }
}

/// Sort records the way the raw-data view shows them: by date, then institution.
pub fn sort_for_display(records: &mut [Record]) {
    records.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.institution.cmp(&b.institution))
    });
}
