//! Concentration (cumulative share) curves
//!
//! A concentration curve ranks doctors by sample volume, highest first, and plots the
//! cumulative share of doctors against the cumulative share of volume they hold. The
//! further the curve bows above the diagonal, the more the volume is concentrated in a
//! few high-volume doctors.
//!
//! # Algorithm
//!
//! For `N` doctors with total volume `T > 0`, sorted by volume descending, the i-th
//! point (1-based) is `(i / N, cumulative_volume_i / T)`. Every doctor weighs `1/N`
//! regardless of volume. The last point is exactly `(1, 1)`.
//!
//! | Input | Result |
//! |-------|--------|
//! | No rows | [`Curve::Empty`] (unpartitioned) or the key is omitted (partitioned) |
//! | `T = 0` | same as no rows, nothing is divided by zero |
//! | Equal volumes | stable order: ties keep the view's row order |
//!
//! # Usage
//!
//! ```rust
//! use sharecurve::curve::compute_curve;
//! use sharecurve::data::{Dataset, FilterCriteria, RawRecord};
//!
//! let dataset = Dataset::from_raw(&[
//!     RawRecord::builder("D1").sample(100.0).brand("A").build(),
//!     RawRecord::builder("D2").sample(50.0).brand("A").build(),
//!     RawRecord::builder("D3").sample(50.0).brand("B").build(),
//! ]);
//! let view = dataset.filter(&FilterCriteria::default());
//!
//! let curve = compute_curve(&view, &["A"]);
//! let series = curve.partition("A").unwrap();
//! assert_eq!(series.points.len(), 2);
//! assert_eq!(series.points[1].doctor_share, 1.0);
//! ```

mod calc;
mod types;


pub use calc::{area, compute_curve, concentration_series, share_of_top};
pub use types::{Curve, CurvePoint, CurveSeries, Partition};
