//! Projections of a [FilteredView](crate::data::FilteredView) that feed the response:
//! headline statistics, facet option lists and the validated brand selection.

pub mod options;
pub mod selection;
pub mod summary;

pub use options::{derive_options, FacetOptions};
pub use selection::validate_selection;
pub use summary::{summarize, Summary};
