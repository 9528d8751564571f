use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the recomputation graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Criteria -> filtered view
    Filter,
    /// View -> headline statistics
    Summary,
    /// View -> facet option lists
    Options,
    /// View + requested brands -> validated brands
    Selection,
    /// View + validated brands -> curve(s)
    Curve,
}

impl Stage {
    /// Evaluation order of a cycle
    pub const ORDER: [Stage; 5] = [
        Stage::Filter,
        Stage::Summary,
        Stage::Options,
        Stage::Selection,
        Stage::Curve,
    ];

    /// Stages whose output this stage reads
    pub fn depends_on(&self) -> &'static [Stage] {
        match self {
            Stage::Filter => &[],
            Stage::Summary | Stage::Options | Stage::Selection => &[Stage::Filter],
            Stage::Curve => &[Stage::Filter, Stage::Selection],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Filter => "filter",
            Stage::Summary => "summary",
            Stage::Options => "options",
            Stage::Selection => "selection",
            Stage::Curve => "curve",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// True when every stage appears once and only after all of its dependencies
pub fn is_topological(order: &[Stage]) -> bool {
    order.iter().enumerate().all(|(i, stage)| {
        let earlier = &order[..i];
        !earlier.contains(stage) && stage.depends_on().iter().all(|dep| earlier.contains(dep))
    })
}
