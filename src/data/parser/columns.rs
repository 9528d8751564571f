//! Header renaming for the input table

use std::collections::HashMap;

use crate::data::DataError;

/// Canonical names of the columns every input table must provide
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Class",
    "Brand",
    "INN",
    "ATC3",
    "Diagnosis",
    "Speciality",
    "Quarter",
    "Sample",
    "Extra",
    "DoctorId",
];

/// Header names used by the survey export, mapped to canonical names
const BUILTIN_ALIASES: [(&str, &str); 7] = [
    ("Class/Market Servier RU", "Class"),
    ("Brand RU", "Brand"),
    ("INN RU", "INN"),
    ("ATC3 RU", "ATC3"),
    ("Diagnosis Group L3 (Prescr) RU", "Diagnosis"),
    ("Speciality RU", "Speciality"),
    ("IDdoc", "DoctorId"),
];

/// Maps source headers onto canonical column names
///
/// Headers that are neither canonical nor aliased pass through untouched and are
/// ignored by the reader.
#[derive(Debug, Clone)]
pub struct ColumnAliases {
    aliases: HashMap<String, String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { aliases }
    }
}

impl ColumnAliases {
    /// Aliases without the built-in survey mapping
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Add an alias, replacing any previous target for the same source header
    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Extend with several aliases at once
    pub fn extend<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (from, to) in aliases {
            self.aliases.insert(from.into(), to.into());
        }
        self
    }

    /// Rename a single header
    pub fn resolve<'a>(&'a self, header: &'a str) -> &'a str {
        let header = header.trim();
        self.aliases.get(header).map(String::as_str).unwrap_or(header)
    }

    /// Rename all headers and check that every required column is present exactly once
    pub fn rename_headers(&self, headers: &csv::StringRecord) -> Result<csv::StringRecord, DataError> {
        let renamed: Vec<&str> = headers.iter().map(|h| self.resolve(h)).collect();

        for column in REQUIRED_COLUMNS {
            let sources: Vec<String> = headers
                .iter()
                .zip(renamed.iter())
                .filter(|(_, resolved)| **resolved == column)
                .map(|(source, _)| source.to_string())
                .collect();
            if sources.len() > 1 {
                return Err(DataError::DuplicateColumn {
                    column: column.to_string(),
                    headers: sources,
                });
            }
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !renamed.contains(column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::MissingColumns { columns: missing });
        }

        Ok(csv::StringRecord::from(renamed))
    }
}
