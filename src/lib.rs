//! Concentration curves of prescription volume across doctors
//!
//! Raw prescription events are aggregated once into one row per doctor
//! ([`data::Dataset`]). Every change of the facet filters or of the brand selection
//! then runs a full, deterministic recomputation ([`pipeline`]): filter the table,
//! project headline statistics and the next round of facet options, prune stale
//! brand selections, and compute one concentration curve per selected brand (or a
//! single curve when none is selected).
//!
//! # Example
//!
//! ```rust
//! use sharecurve::prelude::*;
//!
//! let dataset = Dataset::from_raw(&[
//!     RawRecord::builder("D1").sample(100.0).brand("A").build(),
//!     RawRecord::builder("D2").sample(50.0).brand("A").build(),
//!     RawRecord::builder("D3").sample(50.0).brand("B").build(),
//! ]);
//!
//! let snapshot = run_cycle::<&str>(&dataset, &FilterCriteria::default(), &[]);
//! let series = snapshot.curve.single().unwrap();
//! assert_eq!(series.points.last().unwrap().sample_share, 1.0);
//! assert_eq!(snapshot.summary.doc_count, 3);
//! ```

pub mod analysis;
pub mod config;
pub mod curve;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod server;

pub use error::SharecurveError;

pub mod prelude {
    pub use crate::analysis::{derive_options, summarize, validate_selection, FacetOptions, Summary};
    pub use crate::curve::{compute_curve, Curve, CurvePoint, CurveSeries};
    pub use crate::data::{
        Dataset, DoctorId, DoctorRecord, Facet, FilterCriteria, FilteredView, RawRecord,
    };
    pub use crate::pipeline::{run_cycle, Change, Session, Snapshot, Stage};
}
