use approx::assert_relative_eq;
use sharecurve::analysis::summarize;
use sharecurve::curve::{concentration_series, Curve, CurveSeries};
use sharecurve::data::Facet;
use sharecurve::pipeline::{run_cycle, Stage};

use crate::common::{criteria_grid, fixture, selections};

fn all_series(curve: &Curve) -> Vec<&CurveSeries> {
    match curve {
        Curve::Empty => Vec::new(),
        Curve::Single { series } => vec![series],
        Curve::Partitioned { partitions } => partitions.iter().map(|p| &p.series).collect(),
    }
}

#[test]
fn filtered_rows_match_every_constrained_facet() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        let view = dataset.filter(&criteria);
        for row in view.iter() {
            for facet in Facet::FILTERS {
                let allowed = criteria.values(facet);
                assert!(
                    allowed.is_empty() || allowed.iter().any(|v| v == facet.value_of(row)),
                    "{} = {:?} escaped the filter",
                    facet,
                    facet.value_of(row)
                );
            }
        }
    }
}

#[test]
fn filtered_view_keeps_every_matching_row() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        let view = dataset.filter(&criteria);
        let matching = dataset
            .records()
            .iter()
            .filter(|row| {
                Facet::FILTERS.iter().all(|&facet| {
                    let allowed = criteria.values(facet);
                    allowed.is_empty() || allowed.iter().any(|v| v == facet.value_of(row))
                })
            })
            .count();
        assert_eq!(view.len(), matching);
    }
}

#[test]
fn unconstrained_filter_keeps_the_table() {
    let dataset = fixture();
    let snapshot = run_cycle::<&str>(&dataset, &Default::default(), &[]);
    assert_eq!(snapshot.summary.doc_count, dataset.len());
    assert_relative_eq!(snapshot.summary.sample_total, 150.0);
}

#[test]
fn every_curve_is_monotone_and_ends_at_one() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        for selection in selections() {
            let snapshot = run_cycle(&dataset, &criteria, &selection);
            for series in all_series(&snapshot.curve) {
                let last = series.points.last().unwrap();
                assert_relative_eq!(last.doctor_share, 1.0);
                assert_relative_eq!(last.sample_share, 1.0);
                for pair in series.points.windows(2) {
                    assert!(pair[0].doctor_share < pair[1].doctor_share);
                    assert!(pair[0].sample_share <= pair[1].sample_share);
                }
                assert_eq!(series.points.len(), series.doctors);
            }
        }
    }
}

#[test]
fn validated_selection_is_within_selection_and_view() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        let view = dataset.filter(&criteria);
        let brands = view.distinct(Facet::Brand);
        for selection in selections() {
            let snapshot = run_cycle(&dataset, &criteria, &selection);
            for brand in &snapshot.validated_selection {
                assert!(selection.iter().any(|s| *s == brand.as_str()));
                assert!(brands.contains(brand.as_str()));
            }
        }
    }
}

#[test]
fn partitions_match_curves_of_restricted_views() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        let view = dataset.filter(&criteria);
        for selection in selections() {
            let snapshot = run_cycle(&dataset, &criteria, &selection);
            for brand in snapshot.curve.brands() {
                let restricted = view.restrict(Facet::Brand, &[brand]);
                let expected = concentration_series(restricted.iter()).unwrap();
                assert_eq!(snapshot.curve.partition(brand), Some(&expected));
                assert!(expected.doctors <= view.len());
            }
        }
    }
}

#[test]
fn partition_totals_add_up_to_the_selected_volume() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        let view = dataset.filter(&criteria);
        for selection in selections() {
            let snapshot = run_cycle(&dataset, &criteria, &selection);
            if let Curve::Partitioned { partitions } = &snapshot.curve {
                let covered: f64 = partitions.iter().map(|p| p.series.sample_total).sum();
                let selected = summarize(&view.restrict(Facet::Brand, &snapshot.validated_selection));
                assert_relative_eq!(covered, selected.sample_total);
            }
        }
    }
}

#[test]
fn cycles_are_idempotent() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        for selection in selections() {
            let first = run_cycle(&dataset, &criteria, &selection);
            let second = run_cycle(&dataset, &criteria, &selection);
            assert_eq!(first, second);
            assert_eq!(first.trace, Stage::ORDER.to_vec());
        }
    }
}

#[test]
fn options_are_the_distinct_values_of_the_view() {
    let dataset = fixture();
    for criteria in criteria_grid() {
        let view = dataset.filter(&criteria);
        let snapshot = run_cycle::<&str>(&dataset, &criteria, &[]);
        let source = if view.is_empty() { dataset.full_view() } else { view };
        for facet in Facet::ALL {
            let expected: Vec<&str> = source.distinct(facet).into_iter().collect();
            assert_eq!(snapshot.facet_options.get(facet), expected.as_slice());
        }
    }
}
