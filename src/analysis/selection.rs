//! Pruning of stale brand selections

use std::collections::HashSet;

use crate::data::{Facet, FilteredView};

/// Keep only the selected brands that still occur in the view
///
/// The result keeps the order of `selection`, with repeated brands listed once at their
/// first position. An empty view or an empty selection
/// clears the selection entirely.
pub fn validate_selection<S: AsRef<str>>(view: &FilteredView<'_>, selection: &[S]) -> Vec<String> {
    if view.is_empty() || selection.is_empty() {
        return Vec::new();
    }

    let available = view.distinct(Facet::Brand);
    let mut seen = HashSet::new();
    selection
        .iter()
        .map(|brand| brand.as_ref())
        .filter(|brand| available.contains(brand) && seen.insert(*brand))
        .map(str::to_string)
        .collect()
}
