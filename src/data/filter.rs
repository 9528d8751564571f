//! Multi-facet filtering of the aggregated table
//!
//! Values within one facet are OR-ed, facets are AND-ed. A facet with no values is
//! unconstrained.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};

use super::facet::Facet;
use super::record::DoctorRecord;

/// Allowed values per facet
///
/// An empty list (or `null` in a request body) leaves the facet unconstrained. A value
/// that matches no row is not an error, it simply filters everything out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[serde(deserialize_with = "null_as_empty")]
    pub quarter: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub class: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub speciality: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub inn: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub diagnosis: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub atc3: Vec<String>,
}

impl FilterCriteria {
    /// Allowed values for a facet; always empty for [Facet::Brand]
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Quarter => &self.quarter,
            Facet::Class => &self.class,
            Facet::Speciality => &self.speciality,
            Facet::Inn => &self.inn,
            Facet::Diagnosis => &self.diagnosis,
            Facet::Atc3 => &self.atc3,
            Facet::Brand => &[],
        }
    }

    /// Replace the allowed values of one facet
    ///
    /// Brand is not a filter facet; setting it is ignored.
    pub fn with<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match facet {
            Facet::Quarter => self.quarter = values,
            Facet::Class => self.class = values,
            Facet::Speciality => self.speciality = values,
            Facet::Inn => self.inn = values,
            Facet::Diagnosis => self.diagnosis = values,
            Facet::Atc3 => self.atc3 = values,
            Facet::Brand => {}
        }
        self
    }

    pub fn with_quarter<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.with(Facet::Quarter, values)
    }

    pub fn with_class<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.with(Facet::Class, values)
    }

    pub fn with_speciality<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.with(Facet::Speciality, values)
    }

    pub fn with_inn<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.with(Facet::Inn, values)
    }

    pub fn with_diagnosis<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.with(Facet::Diagnosis, values)
    }

    pub fn with_atc3<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.with(Facet::Atc3, values)
    }

    /// Facets that carry at least one allowed value
    pub fn constrained(&self) -> impl Iterator<Item = Facet> + '_ {
        Facet::FILTERS
            .into_iter()
            .filter(|facet| !self.values(*facet).is_empty())
    }

    /// True when no facet is constrained
    pub fn is_unconstrained(&self) -> bool {
        self.constrained().next().is_none()
    }
}

/// The rows of the aggregated table that satisfy a [FilterCriteria]
///
/// Rows keep the table's relative order. A view borrows the table and is rebuilt
/// from scratch on every cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a DoctorRecord>,
}

impl<'a> FilteredView<'a> {
    /// Filter a table
    ///
    /// One boolean mask is built per constrained facet and the masks are combined
    /// with a logical AND. Unconstrained criteria keep every row.
    pub fn new(records: &'a [DoctorRecord], criteria: &FilterCriteria) -> Self {
        let mut keep = vec![true; records.len()];

        for facet in criteria.constrained() {
            let allowed: HashSet<&str> = criteria.values(facet).iter().map(String::as_str).collect();
            let mask = records
                .iter()
                .map(|record| allowed.contains(facet.value_of(record)));
            for (k, m) in keep.iter_mut().zip(mask) {
                *k &= m;
            }
        }

        let rows = records
            .iter()
            .zip(keep)
            .filter_map(|(record, k)| k.then_some(record))
            .collect();
        FilteredView { rows }
    }

    pub(crate) fn from_rows(rows: Vec<&'a DoctorRecord>) -> Self {
        FilteredView { rows }
    }

    pub fn rows(&self) -> &[&'a DoctorRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a DoctorRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only rows whose value for `facet` is one of `values`
    pub fn restrict<S: AsRef<str>>(&self, facet: Facet, values: &[S]) -> FilteredView<'a> {
        let allowed: HashSet<&str> = values.iter().map(|v| v.as_ref()).collect();
        let rows = self
            .iter()
            .filter(|record| allowed.contains(facet.value_of(record)))
            .collect();
        FilteredView { rows }
    }

    /// Sorted distinct non-empty values of a facet
    pub fn distinct(&self, facet: Facet) -> BTreeSet<&'a str> {
        self.iter()
            .map(|record| facet.value_of(record))
            .filter(|value| !value.is_empty())
            .collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<String>> = Deserialize::deserialize(deserializer)?;
    Ok(values.unwrap_or_default())
}
