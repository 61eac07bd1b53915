use super::state::ExpandedSet;
use crate::catalog::{Node, NodeStore, ROOT_ID};

/// Nodes currently visible, in document order
pub fn project<'a>(store: &'a NodeStore, expanded: &ExpandedSet) -> Vec<&'a Node> {
    store
        .nodes()
        .iter()
        .filter(|node| is_visible(store, expanded, node))
        .collect()
}

/// A node is visible when it is top-level or its whole ancestor chain is
/// expanded. A dangling parent reference hides the node.
pub fn is_visible(store: &NodeStore, expanded: &ExpandedSet, node: &Node) -> bool {
    let mut current = node.parent_id;
    let mut steps = 0;

    while current != ROOT_ID {
        if !expanded.contains(&current) || steps > store.len() {
            return false;
        }
        match store.get(current) {
            Some(parent) => current = parent.parent_id,
            None => return false,
        }
        steps += 1;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NodeId;

    fn node(id: NodeId, parent_id: NodeId) -> Node {
        Node {
            id,
            parent_id,
            field_no: id.to_string(),
            level: 0,
            name: format!("n{id}"),
            description: String::new(),
        }
    }

    fn store() -> NodeStore {
        NodeStore::new(vec![node(1, 0), node(2, 1), node(3, 2), node(4, 1), node(5, 0)])
    }

    fn ids(nodes: &[&Node]) -> Vec<NodeId> {
        nodes.iter().map(|n| n.id).collect()
    }

    fn expanded(ids: &[NodeId]) -> ExpandedSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_nothing_expanded_shows_roots() {
        let store = store();
        assert_eq!(ids(&project(&store, &ExpandedSet::default())), vec![1, 5]);
    }

    #[test]
    fn test_partial_expansion() {
        let store = store();
        assert_eq!(ids(&project(&store, &expanded(&[1]))), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_requires_whole_chain() {
        let store = store();
        // 2 expanded but its parent is not, so 3 stays hidden
        assert_eq!(ids(&project(&store, &expanded(&[2]))), vec![1, 5]);
        assert_eq!(ids(&project(&store, &expanded(&[1, 2]))), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_dangling_parent_is_hidden() {
        let store = NodeStore::new(vec![node(1, 0), node(2, 7)]);
        assert_eq!(ids(&project(&store, &expanded(&[1, 7]))), vec![1]);
    }

    #[test]
    fn test_cycle_through_duplicates_terminates() {
        let store = NodeStore::new(vec![node(5, 6), node(6, 5)]);
        assert!(project(&store, &expanded(&[5, 6])).is_empty());
    }
}
