use serde::{Deserialize, Serialize};

use super::stage::Stage;
use crate::analysis::{derive_options, summarize, validate_selection, FacetOptions, Summary};
use crate::curve::{compute_curve, Curve};
use crate::data::{Dataset, FilterCriteria};

/// Everything one cycle produces
///
/// Serializes to the response payload: `docCount`, `sampleTotal`, `extraTotal`,
/// `facetOptions`, `curve`, `validatedSelection` (plus the session `generation`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Trigger count of the session that produced this snapshot, 0 for stateless cycles
    pub generation: u64,
    #[serde(flatten)]
    pub summary: Summary,
    pub facet_options: FacetOptions,
    pub curve: Curve,
    pub validated_selection: Vec<String>,
    /// Stages in the order they ran
    #[serde(skip)]
    pub trace: Vec<Stage>,
}

/// Book-keeping for one pass through the stage graph
struct Cycle {
    trace: Vec<Stage>,
}

impl Cycle {
    fn new() -> Self {
        Cycle {
            trace: Vec::with_capacity(Stage::ORDER.len()),
        }
    }

    /// Run one stage, checking it is the next one in [Stage::ORDER]
    fn stage<T>(&mut self, stage: Stage, compute: impl FnOnce() -> T) -> T {
        debug_assert_eq!(
            Stage::ORDER.get(self.trace.len()),
            Some(&stage),
            "stage {} out of order",
            stage
        );
        let _span = tracing::debug_span!("stage", name = stage.name()).entered();
        let value = compute();
        self.trace.push(stage);
        value
    }
}

/// Run a full recomputation for the given inputs
///
/// Pure: the dataset is only read and nothing is cached between calls, so the same
/// inputs always produce the same snapshot.
pub fn run_cycle<S: AsRef<str>>(dataset: &Dataset, criteria: &FilterCriteria, selection: &[S]) -> Snapshot {
    let mut cycle = Cycle::new();

    let view = cycle.stage(Stage::Filter, || dataset.filter(criteria));
    let summary = cycle.stage(Stage::Summary, || summarize(&view));
    let facet_options = cycle.stage(Stage::Options, || derive_options(&view, dataset));
    let validated = cycle.stage(Stage::Selection, || validate_selection(&view, selection));
    let curve = cycle.stage(Stage::Curve, || compute_curve(&view, &validated));

    tracing::debug!(
        doctors = summary.doc_count,
        brands = validated.len(),
        empty = curve.is_empty(),
        "cycle complete"
    );

    Snapshot {
        generation: 0,
        summary,
        facet_options,
        curve,
        validated_selection: validated,
        trace: cycle.trace,
    }
}
