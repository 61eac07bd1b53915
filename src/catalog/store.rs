use super::types::{Node, NodeId, ROOT_ID};
use rustc_hash::FxHashMap;

/// Flat node list with id and child indexes. Built once per parse and
/// never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    /// id -> position of the first node carrying that id
    index: FxHashMap<NodeId, usize>,
    /// parent id -> positions of its children, in document order
    children: FxHashMap<NodeId, Vec<usize>>,
}

impl NodeStore {
    pub fn new(nodes: Vec<Node>) -> Self {
        let mut index = FxHashMap::default();
        let mut children: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();

        for (pos, node) in nodes.iter().enumerate() {
            index.entry(node.id).or_insert(pos);
            children.entry(node.parent_id).or_default().push(pos);
        }

        let duplicates = nodes.len() - index.len();
        if duplicates > 0 {
            tracing::debug!(duplicates, "duplicate node ids in catalog");
        }

        Self {
            nodes,
            index,
            children,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Children in document order. `ROOT_ID` yields the top-level nodes.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&pos| &self.nodes[pos])
    }

    pub fn roots(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children(ROOT_ID)
    }

    /// Only real nodes have children. Rows pointing at a missing parent
    /// do not make that id expandable.
    pub fn has_children(&self, id: NodeId) -> bool {
        id != ROOT_ID
            && self.contains(id)
            && self.children.get(&id).is_some_and(|c| !c.is_empty())
    }

    /// Ids of real nodes that have at least one child
    pub fn parent_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children
            .keys()
            .copied()
            .filter(|&id| id != ROOT_ID && self.contains(id))
    }

    /// Ancestors of `id`, nearest first, stopping at the root sentinel or a
    /// dangling parent. Bounded by the node count so duplicate ids cannot loop.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let Some(mut current) = self.get(id).map(|n| n.parent_id) else {
            return chain;
        };

        while current != ROOT_ID && chain.len() < self.nodes.len() {
            let Some(node) = self.get(current) else {
                break;
            };
            chain.push(current);
            current = node.parent_id;
        }

        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, parent_id: NodeId, name: &str) -> Node {
        Node {
            id,
            parent_id,
            field_no: id.to_string(),
            level: 0,
            name: name.into(),
            description: String::new(),
        }
    }

    fn sample() -> NodeStore {
        NodeStore::new(vec![
            node(1, 0, "Root"),
            node(2, 1, "A"),
            node(3, 2, "A1"),
            node(4, 1, "B"),
            node(5, 0, "Other"),
        ])
    }

    #[test]
    fn test_children_in_document_order() {
        let store = sample();
        let names: Vec<_> = store.children(1).map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        let roots: Vec<_> = store.roots().map(|n| n.id).collect();
        assert_eq!(roots, vec![1, 5]);
        assert_eq!(store.children(3).count(), 0);
    }

    #[test]
    fn test_parent_ids() {
        let mut ids: Vec<_> = sample().parent_ids().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let store = sample();
        assert_eq!(store.ancestors(3), vec![2, 1]);
        assert!(store.ancestors(1).is_empty());
        assert!(store.ancestors(42).is_empty());
    }

    #[test]
    fn test_dangling_parent_stops_walk() {
        let store = NodeStore::new(vec![node(2, 9, "Orphan"), node(3, 2, "Child")]);
        assert_eq!(store.ancestors(3), vec![2]);
        assert!(!store.has_children(9));
        assert_eq!(store.parent_ids().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_has_children_only_for_present_nodes() {
        let store = NodeStore::new(vec![node(1, 0, "Root"), node(4, 7, "Stray")]);
        assert!(!store.has_children(7));
        assert!(!store.has_children(ROOT_ID));
        assert!(!store.has_children(1));
        assert_eq!(store.children(7).count(), 1);
    }

    #[test]
    fn test_duplicate_ids_cannot_loop() {
        // Second "5" points back under 6, forming a cycle through the index
        let store = NodeStore::new(vec![node(5, 6, "A"), node(6, 5, "B"), node(5, 0, "C")]);
        assert_eq!(store.get(5).map(|n| n.name.as_str()), Some("A"));
        assert!(store.ancestors(6).len() <= store.len());
    }
}
