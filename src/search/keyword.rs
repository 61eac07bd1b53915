use crate::catalog::{NodeId, NodeStore};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Outcome of a keyword search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordMatches {
    pub term: String,
    /// Matching node ids in document order
    pub matches: Vec<NodeId>,
    /// Every ancestor of every match, deduplicated
    pub ancestors: Vec<NodeId>,
}

/// Case-insensitive substring on the name, or literal substring on the
/// field number
pub fn find_keyword(store: &NodeStore, term: &str) -> KeywordMatches {
    let lowered = term.to_lowercase();

    let matches: Vec<NodeId> = store
        .nodes()
        .iter()
        .filter(|n| n.name.to_lowercase().contains(&lowered) || n.field_no.contains(term))
        .map(|n| n.id)
        .collect();

    let mut seen = FxHashSet::default();
    let mut ancestors = Vec::new();
    for &id in &matches {
        for ancestor in store.ancestors(id) {
            if seen.insert(ancestor) {
                ancestors.push(ancestor);
            }
        }
    }

    KeywordMatches {
        term: term.to_string(),
        matches,
        ancestors,
    }
}
