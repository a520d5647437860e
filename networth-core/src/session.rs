//! Per-user session: the current upload and everything derived from it.
//!
//! Derived views are rebuilt only when the uploaded bytes change, detected by
//! a BLAKE3 hash of the content. Nothing is shared between sessions.

use crate::data::{parse_records, InputError, InstitutionPivot};
use crate::domain::{sort_for_display, GoalInputs, RateSeries, Record};
use crate::goal::{run_goal, GoalError, GoalReport};
use crate::stats::{compute_stats, ConsolidatedSeries};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Recomputed,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct Session {
    content_hash: Option<blake3::Hash>,
    records: Vec<Record>,
    pivot: InstitutionPivot,
    series: ConsolidatedSeries,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an upload. On error the previous state is kept untouched.
    pub fn load(&mut self, bytes: &[u8]) -> Result<LoadStatus, InputError> {
        let hash = blake3::hash(bytes);
        if self.content_hash == Some(hash) {
            return Ok(LoadStatus::Unchanged);
        }

        let mut records = parse_records(bytes)?;
        sort_for_display(&mut records);

        self.pivot = InstitutionPivot::from_records(&records);
        self.series = compute_stats(&records);
        self.records = records;
        self.content_hash = Some(hash);

        tracing::debug!(hash = %hash.to_hex(), rows = self.series.len(), "session recomputed");
        Ok(LoadStatus::Recomputed)
    }

    pub fn is_loaded(&self) -> bool {
        self.content_hash.is_some()
    }

    /// Hex digest of the current upload.
    pub fn content_hash(&self) -> Option<String> {
        self.content_hash.map(|h| h.to_hex().to_string())
    }

    /// Records sorted by date, then institution.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn pivot(&self) -> &InstitutionPivot {
        &self.pivot
    }

    pub fn series(&self) -> &ConsolidatedSeries {
        &self.series
    }

    pub fn goal(
        &self,
        inputs: &GoalInputs,
        rates: &RateSeries,
        today: NaiveDate,
    ) -> Result<GoalReport, GoalError> {
        run_goal(&self.series, inputs, rates, today)
    }
}
