//! Date × institution pivot of the raw records.
//!
//! Cells with several records for the same date and institution hold their
//! mean, which is what a spreadsheet pivot table shows by default. The
//! consolidated series sums instead; see `stats::engine`.

use crate::domain::Record;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One pivot row: the value per institution on a date.
///
/// `values` is aligned with [`InstitutionPivot::institutions`]; `None` means
/// the institution has no record on that date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// One institution's slice of a date's total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionShare {
    pub institution: String,
    pub value: f64,
    /// `value / total`; non-finite when the date's total is zero.
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstitutionPivot {
    institutions: Vec<String>,
    rows: Vec<PivotRow>,
}

impl InstitutionPivot {
    pub fn from_records(records: &[Record]) -> Self {
        let institutions: Vec<String> = records
            .iter()
            .map(|r| r.institution.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // (sum, count) per cell
        let mut cells: BTreeMap<NaiveDate, Vec<(f64, u32)>> = BTreeMap::new();
        for record in records {
            let col = institutions
                .binary_search(&record.institution)
                .unwrap_or_default();
            let row = cells
                .entry(record.date)
                .or_insert_with(|| vec![(0.0, 0); institutions.len()]);
            row[col].0 += record.value;
            row[col].1 += 1;
        }

        let rows = cells
            .into_iter()
            .map(|(date, cells)| PivotRow {
                date,
                values: cells
                    .into_iter()
                    .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                    .collect(),
            })
            .collect();

        Self { institutions, rows }
    }

    /// Institution names, sorted.
    pub fn institutions(&self) -> &[String] {
        &self.institutions
    }

    /// Rows sorted by date ascending.
    pub fn rows(&self) -> &[PivotRow] {
        &self.rows
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, date: NaiveDate) -> Option<&PivotRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// One institution's values over time, for a history chart.
    pub fn history(&self, institution: &str) -> Option<Vec<(NaiveDate, Option<f64>)>> {
        let col = self
            .institutions
            .iter()
            .position(|name| name == institution)?;
        Some(self.rows.iter().map(|r| (r.date, r.values[col])).collect())
    }

    /// How the total on `date` splits across institutions.
    ///
    /// Institutions without a record on that date are left out. Returns `None`
    /// if `date` is not a pivot row.
    pub fn distribution(&self, date: NaiveDate) -> Option<Vec<InstitutionShare>> {
        let row = self.row(date)?;
        let total: f64 = row.values.iter().flatten().sum();
        Some(
            self.institutions
                .iter()
                .zip(&row.values)
                .filter_map(|(name, value)| {
                    value.map(|value| InstitutionShare {
                        institution: name.clone(),
                        value,
                        share: value / total,
                    })
                })
                .collect(),
        )
    }
}
