use crate::catalog::{NodeId, NodeStore};
use rustc_hash::FxHashSet;

/// Ids whose children are shown
pub type ExpandedSet = FxHashSet<NodeId>;

/// Ids matched by the current search
pub type HighlightedSet = FxHashSet<NodeId>;

/// Expansion and highlight state for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub expanded: ExpandedSet,
    pub highlighted: HighlightedSet,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip whether `id`'s children are shown
    pub fn toggle(&mut self, id: NodeId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn is_highlighted(&self, id: NodeId) -> bool {
        self.highlighted.contains(&id)
    }

    /// Expand exactly the nodes that have children
    pub fn expand_all(&mut self, store: &NodeStore) {
        self.expanded = store.parent_ids().collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Clear expansion and highlights together
    pub fn reset(&mut self) {
        self.expanded.clear();
        self.highlighted.clear();
    }
}
