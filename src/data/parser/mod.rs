//! Reading the event-level input table
//!
//! The table is a delimited text file with one row per prescription event. Headers are
//! renamed through [ColumnAliases] and must then cover [REQUIRED_COLUMNS].

pub mod columns;
pub mod table;

pub use columns::{ColumnAliases, REQUIRED_COLUMNS};
pub use table::{read_records, read_records_from, ReadOptions};
