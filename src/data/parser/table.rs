use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::columns::ColumnAliases;
use crate::data::{DataError, DoctorId, RawRecord};

/// Options for reading the input table
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
    /// Header renaming rules (default: built-in survey aliases)
    pub aliases: ColumnAliases,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            aliases: ColumnAliases::default(),
        }
    }
}

impl ReadOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_aliases(mut self, aliases: ColumnAliases) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Read the event-level input table from a CSV file
///
/// # Example
///
/// ```rust,no_run
/// use sharecurve::data::parser::{read_records, ReadOptions};
///
/// let records = read_records("ipsos.csv", &ReadOptions::default()).unwrap();
/// println!("Number of rows: {}", records.len());
/// ```
///
/// # Format details
///
/// - Headers are renamed through [ColumnAliases] before anything else
/// - Every column in [REQUIRED_COLUMNS](super::REQUIRED_COLUMNS) must be present, others are ignored
/// - Empty, `.` or `NA` volume cells count as zero
/// - Negative or non-finite volumes are rejected
pub fn read_records(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Vec<RawRecord>, DataError> {
    let file = File::open(path.as_ref())
        .map_err(|e| DataError::Csv(format!("{}: {}", path.as_ref().display(), e)))?;
    read_records_from(file, options)
}

/// Read the event-level input table from any reader
pub fn read_records_from<R: Read>(reader: R, options: &ReadOptions) -> Result<Vec<RawRecord>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataError::Csv(e.to_string()))?
        .clone();
    let headers = options.aliases.rename_headers(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DataError::Csv(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: Row = record
            .deserialize(Some(&headers))
            .map_err(|e| DataError::Parse {
                line,
                reason: e.to_string(),
            })?;
        records.push(row.into_record(line)?);
    }

    tracing::debug!(rows = records.len(), "read input table");
    Ok(records)
}

/// A [Row] is one line of the input table after header renaming
#[derive(Deserialize, Debug)]
struct Row {
    #[serde(rename = "DoctorId")]
    doctor_id: String,
    #[serde(rename = "Sample", deserialize_with = "deserialize_option_f64")]
    sample: Option<f64>,
    #[serde(rename = "Extra", deserialize_with = "deserialize_option_f64")]
    extra: Option<f64>,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Class")]
    class: String,
    #[serde(rename = "INN")]
    inn: String,
    #[serde(rename = "ATC3")]
    atc3: String,
    #[serde(rename = "Diagnosis")]
    diagnosis: String,
    #[serde(rename = "Speciality")]
    speciality: String,
    #[serde(rename = "Quarter")]
    quarter: String,
}

impl Row {
    fn into_record(self, line: u64) -> Result<RawRecord, DataError> {
        let sample = volume(self.sample, "Sample", line)?;
        let extra = volume(self.extra, "Extra", line)?;
        Ok(RawRecord {
            doctor_id: DoctorId::new(self.doctor_id),
            sample,
            extra,
            brand: self.brand,
            class: self.class,
            inn: self.inn,
            atc3: self.atc3,
            diagnosis: self.diagnosis,
            speciality: self.speciality,
            quarter: self.quarter,
        })
    }
}

fn volume(value: Option<f64>, column: &str, line: u64) -> Result<f64, DataError> {
    match value {
        None => Ok(0.0),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(DataError::InvalidValue {
            line,
            column: column.to_string(),
            value: v,
        }),
    }
}

/// Deserialize Option<T> from a string
fn deserialize_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s.is_empty() || s == "." || s == "NA" {
        Ok(None)
    } else {
        T::from_str(&s).map(Some).map_err(serde::de::Error::custom)
    }
}

fn deserialize_option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_option::<f64, D>(deserializer)
}
