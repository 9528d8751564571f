use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use super::cycle::{run_cycle, Snapshot};
use crate::data::{Dataset, FilterCriteria};

/// One externally triggered input change
///
/// Fields left out keep their current value. An empty `Change` still triggers a
/// full cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Change {
    /// New filter criteria
    pub filters: Option<FilterCriteria>,
    /// New brand selection; `null` clears it
    #[serde(deserialize_with = "present_or_null")]
    pub brands: Option<Vec<String>>,
}

impl Change {
    pub fn filters(filters: FilterCriteria) -> Self {
        Change {
            filters: Some(filters),
            brands: None,
        }
    }

    pub fn brands<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Change {
            filters: None,
            brands: Some(brands.into_iter().map(Into::into).collect()),
        }
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }
}

/// Filter and selection state of one client
///
/// The dataset is shared; everything a client changes lives here. Each call to
/// [Session::apply] is one complete cycle, and the validated selection it produces
/// replaces the stored selection.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    criteria: FilterCriteria,
    selection: Vec<String>,
    generation: u64,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Session {
            dataset,
            criteria: FilterCriteria::default(),
            selection: Vec::new(),
            generation: 0,
        }
    }

    /// Apply a change and recompute everything
    pub fn apply(&mut self, change: Change) -> Snapshot {
        if let Some(filters) = change.filters {
            self.criteria = filters;
        }
        if let Some(brands) = change.brands {
            self.selection = brands;
        }
        self.generation += 1;

        let mut snapshot = run_cycle(&self.dataset, &self.criteria, &self.selection);
        snapshot.generation = self.generation;
        self.selection.clone_from(&snapshot.validated_selection);

        tracing::debug!(
            generation = self.generation,
            doctors = snapshot.summary.doc_count,
            "session updated"
        );
        snapshot
    }

    /// Recompute with unchanged inputs
    pub fn refresh(&mut self) -> Snapshot {
        self.apply(Change::default())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The selection as of the last cycle, already validated
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Number of cycles run so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }
}

// `Some(vec![])` for an explicit null, `None` only when the field is absent
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<String>> = Deserialize::deserialize(deserializer)?;
    Ok(Some(values.unwrap_or_default()))
}
