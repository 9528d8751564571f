use std::path::PathBuf;

use sharecurve::data::parser::ReadOptions;
use sharecurve::data::{Dataset, FilterCriteria};

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/prescriptions.csv")
}

/// The fixture aggregated: 8 doctors, 150 sample, 16 extra
pub fn fixture() -> Dataset {
    Dataset::from_csv(fixture_path(), &ReadOptions::default()).expect("fixture should load")
}

/// A spread of criteria, including unconstrained and unmatched ones
pub fn criteria_grid() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::default(),
        FilterCriteria::default().with_class(["Statins"]),
        FilterCriteria::default().with_quarter(["2024Q1"]),
        FilterCriteria::default().with_quarter(["2024Q1", "2024Q2"]),
        FilterCriteria::default()
            .with_class(["ACE inhibitors"])
            .with_speciality(["Therapist"]),
        FilterCriteria::default()
            .with_atc3(["C10A"])
            .with_diagnosis(["Hyperlipidemia"])
            .with_inn(["atorvastatin"]),
        FilterCriteria::default().with_diagnosis(["Heart failure"]),
        FilterCriteria::default().with_class(["Antibiotics"]),
    ]
}

/// Brand selections to combine with [criteria_grid]
pub fn selections() -> Vec<Vec<&'static str>> {
    vec![
        vec![],
        vec!["Atoris"],
        vec!["Crestor", "Prestarium"],
        vec!["Enap", "Atoris", "Unknown"],
    ]
}
