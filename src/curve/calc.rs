//! Pure curve calculations

use std::collections::HashSet;

use super::types::{Curve, CurvePoint, CurveSeries, Partition};
use crate::data::{DoctorRecord, Facet, FilteredView};

/// Build one concentration curve from a set of doctors
///
/// Doctors are ranked by `sum_sample` descending with a stable sort, so equal volumes
/// keep their input order. Returns `None` when there are no doctors, no volume, or a
/// total that is not finite.
pub fn concentration_series<'a, I>(rows: I) -> Option<CurveSeries>
where
    I: IntoIterator<Item = &'a DoctorRecord>,
{
    let mut volumes: Vec<f64> = rows.into_iter().map(|r| r.sum_sample).collect();
    let n = volumes.len();
    if n == 0 {
        return None;
    }

    volumes.sort_by(|a, b| b.total_cmp(a));

    let total: f64 = volumes.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return None;
    }

    let mut running = 0.0;
    let points: Vec<CurvePoint> = volumes
        .iter()
        .enumerate()
        .map(|(i, v)| {
            running += v;
            CurvePoint::new((i + 1) as f64 / n as f64, running / total)
        })
        .collect();

    let concentration_index = 2.0 * area(&points) - 1.0;
    Some(CurveSeries {
        points,
        doctors: n,
        sample_total: total,
        concentration_index,
    })
}

/// Compute the curve(s) for a view
///
/// With no partition keys, a single curve over the whole view. Otherwise one curve per
/// distinct key, computed only from the rows carrying that brand; keys without usable
/// rows are left out.
pub fn compute_curve<S: AsRef<str>>(view: &FilteredView<'_>, partition_keys: &[S]) -> Curve {
    if partition_keys.is_empty() {
        return match concentration_series(view.iter()) {
            Some(series) => Curve::Single { series },
            None => Curve::Empty,
        };
    }

    let restricted = view.restrict(Facet::Brand, partition_keys);
    let mut seen = HashSet::new();
    let partitions = partition_keys
        .iter()
        .map(|key| key.as_ref())
        .filter(|brand| seen.insert(*brand))
        .filter_map(|brand| {
            let rows = restricted.iter().filter(|r| r.brand == brand);
            concentration_series(rows).map(|series| Partition {
                brand: brand.to_string(),
                series,
            })
        })
        .collect();

    Curve::Partitioned { partitions }
}

/// Trapezoidal area under the curve, starting from the origin
pub fn area(points: &[CurvePoint]) -> f64 {
    std::iter::once(&CurvePoint::ORIGIN)
        .chain(points)
        .zip(points)
        .map(|(a, b)| (b.doctor_share - a.doctor_share) * (a.sample_share + b.sample_share) / 2.0)
        .sum()
}

/// Share of volume held by the top `fraction` of doctors
///
/// Interpolates linearly between points, with the origin as the implicit first point.
/// `fraction` is clamped to `[0, 1]`.
pub fn share_of_top(points: &[CurvePoint], fraction: f64) -> f64 {
    let fraction = fraction.clamp(0.0, 1.0);
    let mut previous = CurvePoint::ORIGIN;
    for point in points {
        if point.doctor_share >= fraction {
            let width = point.doctor_share - previous.doctor_share;
            if width <= 0.0 {
                return point.sample_share;
            }
            let t = (fraction - previous.doctor_share) / width;
            return previous.sample_share + t * (point.sample_share - previous.sample_share);
        }
        previous = *point;
    }
    previous.sample_share
}

impl CurveSeries {
    /// See [share_of_top]
    pub fn share_of_top(&self, fraction: f64) -> f64 {
        share_of_top(&self.points, fraction)
    }

    /// See [area]
    pub fn area(&self) -> f64 {
        area(&self.points)
    }
}
