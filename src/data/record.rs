//! Typed rows of the input table and of the aggregated table
//!
//! # Example
//!
//! ```rust
//! use sharecurve::data::{DoctorRecord, RawRecord};
//!
//! let raw = RawRecord::builder("1042")
//!     .sample(12.0)
//!     .extra(3.0)
//!     .brand("Brand A")
//!     .quarter("2024Q1")
//!     .build();
//!
//! let doctor = DoctorRecord::from(raw);
//! assert_eq!(doctor.sum_sample, 12.0);
//! assert_eq!(doctor.brand, "Brand A");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a doctor
///
/// Ids are trimmed, and ids that parse as integers are stored in canonical form, so
/// `"042"` and `"42"` name the same doctor.
///
/// Ordering is natural: two ids that both parse as integers compare numerically,
/// otherwise they compare as strings. Integer ids sort before the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DoctorId(String);

impl DoctorId {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => DoctorId(n.to_string()),
            Err(_) => DoctorId(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }
}

impl Ord for DoctorId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DoctorId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DoctorId {
    fn from(id: &str) -> Self {
        DoctorId::new(id)
    }
}

impl From<String> for DoctorId {
    fn from(id: String) -> Self {
        DoctorId::new(id)
    }
}

impl From<DoctorId> for String {
    fn from(id: DoctorId) -> Self {
        id.0
    }
}

/// One prescription event of one doctor, as read from the input table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub doctor_id: DoctorId,
    /// Prescription sample volume, never negative
    pub sample: f64,
    /// Secondary volume metric, never negative
    pub extra: f64,
    pub brand: String,
    pub class: String,
    pub inn: String,
    pub atc3: String,
    pub diagnosis: String,
    pub speciality: String,
    pub quarter: String,
}

impl RawRecord {
    /// Start building a record for the given doctor, with zero volumes and empty categories
    pub fn builder(doctor_id: impl Into<String>) -> RawRecordBuilder {
        RawRecordBuilder {
            record: RawRecord {
                doctor_id: DoctorId::new(doctor_id),
                sample: 0.0,
                extra: 0.0,
                brand: String::new(),
                class: String::new(),
                inn: String::new(),
                atc3: String::new(),
                diagnosis: String::new(),
                speciality: String::new(),
                quarter: String::new(),
            },
        }
    }
}

/// Builder for [RawRecord]
#[derive(Debug, Clone)]
pub struct RawRecordBuilder {
    record: RawRecord,
}

impl RawRecordBuilder {
    pub fn sample(mut self, sample: f64) -> Self {
        self.record.sample = sample;
        self
    }

    pub fn extra(mut self, extra: f64) -> Self {
        self.record.extra = extra;
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.record.brand = brand.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.record.class = class.into();
        self
    }

    pub fn inn(mut self, inn: impl Into<String>) -> Self {
        self.record.inn = inn.into();
        self
    }

    pub fn atc3(mut self, atc3: impl Into<String>) -> Self {
        self.record.atc3 = atc3.into();
        self
    }

    pub fn diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.record.diagnosis = diagnosis.into();
        self
    }

    pub fn speciality(mut self, speciality: impl Into<String>) -> Self {
        self.record.speciality = speciality.into();
        self
    }

    pub fn quarter(mut self, quarter: impl Into<String>) -> Self {
        self.record.quarter = quarter.into();
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}

/// One row per doctor: summed volumes plus one representative value per category
///
/// Representative values come from the first raw row (in input order) that has a
/// non-empty value for that column. Doctors whose raw rows disagree on a category
/// silently collapse to that first value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    pub doctor_id: DoctorId,
    pub sum_sample: f64,
    pub sum_extra: f64,
    pub brand: String,
    pub class: String,
    pub inn: String,
    pub diagnosis: String,
    pub atc3: String,
    pub speciality: String,
    pub quarter: String,
}

impl From<RawRecord> for DoctorRecord {
    fn from(raw: RawRecord) -> Self {
        DoctorRecord {
            doctor_id: raw.doctor_id,
            sum_sample: raw.sample,
            sum_extra: raw.extra,
            brand: raw.brand,
            class: raw.class,
            inn: raw.inn,
            diagnosis: raw.diagnosis,
            atc3: raw.atc3,
            speciality: raw.speciality,
            quarter: raw.quarter,
        }
    }
}
