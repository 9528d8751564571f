//! Categorical dimensions of the aggregated table
//!
//! Six of them ([`Facet::FILTERS`]) can constrain the population through
//! [`FilterCriteria`](crate::data::filter::FilterCriteria). [`Facet::Brand`] is never
//! filtered on directly; it partitions the concentration curve instead.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::DoctorRecord;

/// A categorical column of the aggregated table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    /// Reporting period label
    Quarter,
    /// Product class / market
    Class,
    /// Doctor speciality
    Speciality,
    /// Active ingredient
    Inn,
    /// Diagnosis group
    Diagnosis,
    /// Therapeutic subclass
    Atc3,
    /// Product brand, the curve partition key
    Brand,
}

impl Facet {
    /// The facets a [`FilterCriteria`](crate::data::filter::FilterCriteria) can constrain, in request order
    pub const FILTERS: [Facet; 6] = [
        Facet::Quarter,
        Facet::Class,
        Facet::Speciality,
        Facet::Inn,
        Facet::Diagnosis,
        Facet::Atc3,
    ];

    /// Every categorical column, filters first, then the partition key
    pub const ALL: [Facet; 7] = [
        Facet::Quarter,
        Facet::Class,
        Facet::Speciality,
        Facet::Inn,
        Facet::Diagnosis,
        Facet::Atc3,
        Facet::Brand,
    ];

    /// Canonical column header of this facet in the input table
    pub fn column(&self) -> &'static str {
        match self {
            Facet::Quarter => "Quarter",
            Facet::Class => "Class",
            Facet::Speciality => "Speciality",
            Facet::Inn => "INN",
            Facet::Diagnosis => "Diagnosis",
            Facet::Atc3 => "ATC3",
            Facet::Brand => "Brand",
        }
    }

    /// Read this facet's value from an aggregated record
    pub fn value_of<'a>(&self, record: &'a DoctorRecord) -> &'a str {
        match self {
            Facet::Quarter => &record.quarter,
            Facet::Class => &record.class,
            Facet::Speciality => &record.speciality,
            Facet::Inn => &record.inn,
            Facet::Diagnosis => &record.diagnosis,
            Facet::Atc3 => &record.atc3,
            Facet::Brand => &record.brand,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
