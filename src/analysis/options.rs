//! Facet option lists for the next round of selections
//!
//! Options are derived from the already filtered population, not from the population
//! filtered by every *other* facet. Picking a value in one facet can therefore shrink
//! that same facet's list, and the lists of all other facets.

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Facet, FilteredView};

/// Sorted distinct values per facet, plus the brands available for partitioning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub quarter: Vec<String>,
    pub class: Vec<String>,
    pub speciality: Vec<String>,
    pub inn: Vec<String>,
    pub diagnosis: Vec<String>,
    pub atc3: Vec<String>,
    pub brand: Vec<String>,
}

impl FacetOptions {
    /// Options of one facet
    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Quarter => &self.quarter,
            Facet::Class => &self.class,
            Facet::Speciality => &self.speciality,
            Facet::Inn => &self.inn,
            Facet::Diagnosis => &self.diagnosis,
            Facet::Atc3 => &self.atc3,
            Facet::Brand => &self.brand,
        }
    }

    fn from_view(view: &FilteredView<'_>) -> Self {
        let values = |facet: Facet| -> Vec<String> {
            view.distinct(facet).into_iter().map(str::to_string).collect()
        };
        FacetOptions {
            quarter: values(Facet::Quarter),
            class: values(Facet::Class),
            speciality: values(Facet::Speciality),
            inn: values(Facet::Inn),
            diagnosis: values(Facet::Diagnosis),
            atc3: values(Facet::Atc3),
            brand: values(Facet::Brand),
        }
    }
}

/// Derive the option lists from a view
///
/// An empty view falls back to the whole table so there is always something to pick.
/// Empty-string values are never offered.
pub fn derive_options(view: &FilteredView<'_>, dataset: &Dataset) -> FacetOptions {
    if view.is_empty() {
        FacetOptions::from_view(&dataset.full_view())
    } else {
        FacetOptions::from_view(view)
    }
}
