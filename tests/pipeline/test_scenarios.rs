use approx::assert_relative_eq;
use sharecurve::curve::Curve;
use sharecurve::data::FilterCriteria;
use sharecurve::pipeline::{run_cycle, Change, Session};
use std::sync::Arc;

use crate::common::fixture;

#[test]
fn statins_market() {
    let dataset = fixture();
    let criteria = FilterCriteria::default().with_class(["Statins"]);
    let snapshot = run_cycle::<&str>(&dataset, &criteria, &[]);

    assert_eq!(snapshot.summary.doc_count, 4);
    assert_relative_eq!(snapshot.summary.sample_total, 70.0);
    assert_relative_eq!(snapshot.summary.extra_total, 8.0);

    // volumes 60, 10, 0, 0
    let series = snapshot.curve.single().unwrap();
    let points: Vec<(f64, f64)> = series.points.iter().map(|p| (p.doctor_share, p.sample_share)).collect();
    assert_eq!(points.len(), 4);
    assert_relative_eq!(points[0].0, 0.25);
    assert_relative_eq!(points[0].1, 60.0 / 70.0);
    assert_relative_eq!(points[1].0, 0.5);
    assert_relative_eq!(points[1].1, 1.0);
    assert_relative_eq!(points[3].0, 1.0);
    assert_relative_eq!(points[3].1, 1.0);
}

#[test]
fn options_follow_the_filtered_population() {
    let dataset = fixture();
    let criteria = FilterCriteria::default().with_class(["Statins"]);
    let options = run_cycle::<&str>(&dataset, &criteria, &[]).facet_options;

    assert_eq!(options.class, vec!["Statins"]);
    assert_eq!(options.brand, vec!["Atoris", "Crestor"]);
    assert_eq!(
        options.speciality,
        vec!["Cardiologist", "Endocrinologist", "Therapist"]
    );
    assert_eq!(options.quarter, vec!["2024Q1", "2024Q2"]);
    assert_eq!(options.atc3, vec!["C10A"]);
}

#[test]
fn brand_comes_from_the_first_row_of_a_doctor() {
    // doctor 101 also prescribed Crestor, but is counted under Atoris
    let dataset = fixture();
    let criteria = FilterCriteria::default().with_class(["Statins"]);
    let snapshot = run_cycle(&dataset, &criteria, &["Crestor", "Prestarium"]);

    assert_eq!(snapshot.validated_selection, vec!["Crestor"]);
    let crestor = snapshot.curve.partition("Crestor").unwrap();
    assert_eq!(crestor.doctors, 1);
    assert_relative_eq!(crestor.sample_total, 10.0);
    assert_eq!(crestor.points.len(), 1);
    assert_relative_eq!(crestor.points[0].doctor_share, 1.0);
    assert_relative_eq!(crestor.points[0].sample_share, 1.0);
}

#[test]
fn brands_keep_selection_order() {
    let dataset = fixture();
    let snapshot = run_cycle(&dataset, &FilterCriteria::default(), &["Prestarium", "Atoris"]);

    assert_eq!(snapshot.validated_selection, vec!["Prestarium", "Atoris"]);
    assert_eq!(snapshot.curve.brands(), vec!["Prestarium", "Atoris"]);

    // Atoris: 101 (60) then 105 and 106 with no volume
    let atoris = snapshot.curve.partition("Atoris").unwrap();
    assert_eq!(atoris.doctors, 3);
    assert_relative_eq!(atoris.points[0].sample_share, 1.0);
    assert_relative_eq!(atoris.points[0].doctor_share, 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn brand_without_volume_draws_nothing() {
    let dataset = fixture();
    let criteria = FilterCriteria::default().with_speciality(["Endocrinologist"]);
    let snapshot = run_cycle(&dataset, &criteria, &["Atoris"]);

    // doctor 106 is in the view, but prescribed nothing
    assert_eq!(snapshot.summary.doc_count, 1);
    assert_eq!(snapshot.validated_selection, vec!["Atoris"]);
    assert_eq!(snapshot.curve, Curve::Partitioned { partitions: vec![] });
    assert!(snapshot.curve.is_empty());
}

#[test]
fn unmatched_filter_is_an_empty_result() {
    let dataset = fixture();
    let criteria = FilterCriteria::default()
        .with_class(["Statins"])
        .with_diagnosis(["Hypertension"]);
    let snapshot = run_cycle(&dataset, &criteria, &["Atoris"]);

    assert_eq!(snapshot.summary.doc_count, 0);
    assert_relative_eq!(snapshot.summary.sample_total, 0.0);
    assert_relative_eq!(snapshot.summary.extra_total, 0.0);
    assert_eq!(snapshot.curve, Curve::Empty);
    assert!(snapshot.validated_selection.is_empty());

    // options fall back to the whole table
    assert_eq!(snapshot.facet_options.class, vec!["ACE inhibitors", "Statins"]);
    assert_eq!(
        snapshot.facet_options.brand,
        vec!["Atoris", "Crestor", "Enap", "Prestarium"]
    );
}

#[test]
fn session_walkthrough() {
    let mut session = Session::new(Arc::new(fixture()));

    let first = session.refresh();
    assert_eq!(first.summary.doc_count, 8);
    assert!(first.curve.single().is_some());

    let with_brands = session.apply(Change::brands(["Enap", "Atoris"]));
    assert_eq!(with_brands.curve.brands(), vec!["Enap", "Atoris"]);

    // Enap is not prescribed for statins and drops out of the selection
    let narrowed = session.apply(Change::filters(
        FilterCriteria::default().with_class(["Statins"]),
    ));
    assert_eq!(narrowed.validated_selection, vec!["Atoris"]);
    assert_eq!(session.selection(), ["Atoris".to_string()]);

    // widening again does not bring it back
    let widened = session.apply(Change::filters(FilterCriteria::default()));
    assert_eq!(widened.validated_selection, vec!["Atoris"]);
    assert_eq!(widened.generation, 4);
}
