//! Curve result types

use serde::{Deserialize, Serialize};

/// A point of a concentration curve
///
/// Serialized as a `[doctor_share, sample_share]` pair, the shape a chart consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct CurvePoint {
    /// Cumulative share of doctors, ranked by volume descending
    pub doctor_share: f64,
    /// Cumulative share of sample volume held by those doctors
    pub sample_share: f64,
}

impl CurvePoint {
    pub fn new(doctor_share: f64, sample_share: f64) -> Self {
        Self {
            doctor_share,
            sample_share,
        }
    }

    pub(crate) const ORIGIN: CurvePoint = CurvePoint {
        doctor_share: 0.0,
        sample_share: 0.0,
    };
}

impl From<[f64; 2]> for CurvePoint {
    fn from([doctor_share, sample_share]: [f64; 2]) -> Self {
        CurvePoint::new(doctor_share, sample_share)
    }
}

impl From<CurvePoint> for [f64; 2] {
    fn from(point: CurvePoint) -> Self {
        [point.doctor_share, point.sample_share]
    }
}

/// One concentration curve
///
/// Points are non-decreasing in both coordinates and end at `(1, 1)`. There is no
/// leading `(0, 0)` point; the first point belongs to the highest-volume doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSeries {
    pub points: Vec<CurvePoint>,
    /// Number of doctors behind the curve
    pub doctors: usize,
    /// Total sample volume behind the curve
    pub sample_total: f64,
    /// `2 * area - 1`; 0 when volume is spread evenly, close to 1 when one doctor holds it all
    pub concentration_index: f64,
}

/// The curve of one partition key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub brand: String,
    pub series: CurveSeries,
}

/// Output of the curve computation
///
/// [Curve::Empty] is a regular, renderable outcome meaning "no data for the current
/// filters"; it is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    /// No rows, or no volume, to draw
    Empty,
    /// One curve over the whole view
    Single { series: CurveSeries },
    /// One curve per partition key with data, in key order
    Partitioned { partitions: Vec<Partition> },
}

impl Curve {
    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        match self {
            Curve::Empty => true,
            Curve::Single { .. } => false,
            Curve::Partitioned { partitions } => partitions.is_empty(),
        }
    }

    /// The unpartitioned series, if any
    pub fn single(&self) -> Option<&CurveSeries> {
        match self {
            Curve::Single { series } => Some(series),
            _ => None,
        }
    }

    /// The series of one partition key, if it produced one
    pub fn partition(&self, brand: &str) -> Option<&CurveSeries> {
        match self {
            Curve::Partitioned { partitions } => partitions
                .iter()
                .find(|p| p.brand == brand)
                .map(|p| &p.series),
            _ => None,
        }
    }

    /// Partition keys that produced a series, in order
    pub fn brands(&self) -> Vec<&str> {
        match self {
            Curve::Partitioned { partitions } => partitions.iter().map(|p| p.brand.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}
