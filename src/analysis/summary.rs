//! Headline statistics of a filtered population

use serde::{Deserialize, Serialize};

use crate::data::FilteredView;

/// Counts and volume totals of a [FilteredView]
///
/// An empty view gives all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub doc_count: usize,
    pub sample_total: f64,
    pub extra_total: f64,
}

/// Compute the [Summary] of a view
pub fn summarize(view: &FilteredView<'_>) -> Summary {
    view.iter().fold(
        Summary {
            doc_count: 0,
            sample_total: 0.0,
            extra_total: 0.0,
        },
        |acc, record| Summary {
            doc_count: acc.doc_count + 1,
            sample_total: acc.sample_total + record.sum_sample,
            extra_total: acc.extra_total + record.sum_extra,
        },
    )
}
