pub mod aggregate;
pub mod error;
pub mod facet;
pub mod filter;
pub mod parser;
pub mod record;
pub mod store;

pub use aggregate::aggregate;
pub use error::DataError;
pub use facet::Facet;
pub use filter::{FilterCriteria, FilteredView};
pub use record::{DoctorId, DoctorRecord, RawRecord, RawRecordBuilder};
pub use store::{Dataset, DatasetInfo};
