//! Recomputation on every input change
//!
//! A cycle walks a fixed, acyclic stage graph:
//!
//! ```text
//! criteria ──> Filter ──┬──> Summary
//!                       ├──> Options
//! selection ────────────┼──> Selection ──┐
//!                       └────────────────┴──> Curve
//! ```
//!
//! Each stage runs exactly once per cycle, in [Stage::ORDER], and only reads outputs
//! of stages that ran before it. Nothing is carried over between cycles except the
//! session inputs, so every cycle is a full recomputation.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use sharecurve::data::{Dataset, FilterCriteria, RawRecord};
//! use sharecurve::pipeline::{Change, Session};
//!
//! let dataset = Arc::new(Dataset::from_raw(&[
//!     RawRecord::builder("1").sample(3.0).brand("A").quarter("Q1").build(),
//!     RawRecord::builder("2").sample(1.0).brand("B").quarter("Q2").build(),
//! ]));
//!
//! let mut session = Session::new(dataset);
//! session.apply(Change::brands(["A", "B"]));
//!
//! // B disappears from the population, so it is pruned from the selection
//! let snapshot = session.apply(Change::filters(FilterCriteria::default().with_quarter(["Q1"])));
//! assert_eq!(snapshot.validated_selection, vec!["A"]);
//! assert_eq!(session.selection(), ["A".to_string()]);
//! ```

mod cycle;
mod session;
mod stage;


pub use cycle::{run_cycle, Snapshot};
pub use session::{Change, Session};
pub use stage::{is_topological, Stage};
