use serde::{Deserialize, Serialize};
use std::path::Path;

use super::aggregate::aggregate;
use super::filter::{FilterCriteria, FilteredView};
use super::parser::{read_records, ReadOptions};
use super::{DataError, DoctorRecord, RawRecord};

/// The aggregated doctor table, built once and never mutated afterwards
///
/// Share it between sessions behind an [`Arc`](std::sync::Arc). Per-session filter and
/// selection state lives in [`Session`](crate::pipeline::Session), never here.
///
/// # Example
///
/// ```rust
/// use sharecurve::data::{Dataset, FilterCriteria, RawRecord};
///
/// let dataset = Dataset::from_raw(&[
///     RawRecord::builder("1").sample(10.0).quarter("2024Q1").build(),
///     RawRecord::builder("2").sample(5.0).quarter("2024Q2").build(),
/// ]);
///
/// let view = dataset.filter(&FilterCriteria::default().with_quarter(["2024Q1"]));
/// assert_eq!(view.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DoctorRecord>,
    raw_rows: Option<usize>,
}

/// Size and volume totals of a [Dataset]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    /// Event-level rows behind the table, `None` when it was supplied already aggregated
    pub raw_rows: Option<usize>,
    pub doctors: usize,
    pub sample_total: f64,
    pub extra_total: f64,
}

impl Dataset {
    /// Aggregate event-level rows into the doctor table
    pub fn from_raw(records: &[RawRecord]) -> Self {
        let doctors = aggregate(records);
        tracing::info!(
            raw_rows = records.len(),
            doctors = doctors.len(),
            "aggregated input table"
        );
        Dataset {
            records: doctors,
            raw_rows: Some(records.len()),
        }
    }

    /// Read and aggregate a CSV file
    pub fn from_csv(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self, DataError> {
        let records = read_records(path, options)?;
        Ok(Self::from_raw(&records))
    }

    /// Wrap an already aggregated table
    ///
    /// Records are kept in the given order, which becomes the table's natural order.
    /// The number of raw rows behind them is unknown.
    pub fn from_records(records: Vec<DoctorRecord>) -> Self {
        Dataset {
            records,
            raw_rows: None,
        }
    }

    pub fn records(&self) -> &[DoctorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply filter criteria, see [FilteredView::new]
    pub fn filter(&self, criteria: &FilterCriteria) -> FilteredView<'_> {
        FilteredView::new(&self.records, criteria)
    }

    /// A view over every record
    pub fn full_view(&self) -> FilteredView<'_> {
        FilteredView::from_rows(self.records.iter().collect())
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            raw_rows: self.raw_rows,
            doctors: self.records.len(),
            sample_total: self.records.iter().map(|r| r.sum_sample).sum(),
            extra_total: self.records.iter().map(|r| r.sum_extra).sum(),
        }
    }
}
