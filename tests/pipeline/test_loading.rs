use approx::assert_relative_eq;
use sharecurve::data::parser::{read_records, ColumnAliases, ReadOptions};
use sharecurve::data::{DataError, Dataset, DoctorId};

use crate::common::{fixture, fixture_path};

#[test]
fn survey_export_loads_and_aggregates() {
    let dataset = fixture();
    let info = dataset.info();

    assert_eq!(info.raw_rows, Some(10));
    assert_eq!(info.doctors, 8);
    assert_relative_eq!(info.sample_total, 150.0);
    assert_relative_eq!(info.extra_total, 16.0);
}

#[test]
fn doctors_in_natural_id_order() {
    let dataset = fixture();
    let ids: Vec<&str> = dataset.records().iter().map(|r| r.doctor_id.as_str()).collect();
    assert_eq!(ids, vec!["20", "101", "102", "103", "104", "105", "106", "107"]);
}

#[test]
fn repeated_doctor_rows_are_summed_and_first_brand_wins() {
    let dataset = fixture();
    let doctor = dataset
        .records()
        .iter()
        .find(|r| r.doctor_id == DoctorId::new("101"))
        .unwrap();

    assert_relative_eq!(doctor.sum_sample, 60.0);
    assert_relative_eq!(doctor.sum_extra, 6.0);
    assert_eq!(doctor.brand, "Atoris");
    assert_eq!(doctor.speciality, "Cardiologist");
}

#[test]
fn empty_volumes_count_as_zero() {
    let dataset = fixture();
    let find = |id: &str| {
        dataset
            .records()
            .iter()
            .find(|r| r.doctor_id.as_str() == id)
            .unwrap()
    };

    assert_relative_eq!(find("103").sum_sample, 35.0);
    assert_relative_eq!(find("103").sum_extra, 0.0);
    assert_relative_eq!(find("106").sum_sample, 0.0);
    assert_relative_eq!(find("106").sum_extra, 1.0);
}

#[test]
fn raw_rows_are_kept_in_file_order() {
    let rows = read_records(fixture_path(), &ReadOptions::default()).unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].brand, "Atoris");
    assert_eq!(rows[1].brand, "Crestor");
    assert_eq!(rows[9].doctor_id.as_str(), "20");
}

#[test]
fn survey_headers_need_aliases() {
    let options = ReadOptions::default().with_aliases(ColumnAliases::empty());
    let err = read_records(fixture_path(), &options).unwrap_err();
    match err {
        DataError::MissingColumns { columns } => assert!(columns.contains(&"DoctorId".to_string())),
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn missing_file_is_a_load_error() {
    let result = Dataset::from_csv("tests/data/does-not-exist.csv", &ReadOptions::default());
    assert!(matches!(result, Err(DataError::Csv(_))));
}
