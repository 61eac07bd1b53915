//! Hierarchical path resolution.
//!
//! Segments are resolved one level at a time from the root sentinel. At each
//! position three rules are tried in order:
//!
//! 1. compound: `segments[i] + "." + segments[i + 1]` against the children,
//!    consuming two segments (catalog names are often `property.Type`)
//! 2. single: `segments[i]` against the children
//! 3. choice: `segments[i]` against the children of a `Choice` child, which
//!    paths written against the schema never mention
//!
//! A child matches a term when its name equals the term ignoring case, or
//! contains the term exactly (case-sensitive).

use super::query::PathQuery;
use crate::catalog::{Node, NodeId, NodeStore, ROOT_ID};
use serde::Serialize;

/// Outcome of resolving a path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathResolution {
    pub query: PathQuery,
    /// Nodes to expand, root-most first
    pub expanded: Vec<NodeId>,
    /// Last node reached, if any segment resolved
    pub target: Option<NodeId>,
    /// Number of segments consumed
    pub consumed: usize,
}

impl PathResolution {
    /// Every segment resolved
    pub fn is_complete(&self) -> bool {
        self.target.is_some() && self.consumed == self.query.segments.len()
    }

    pub fn is_partial(&self) -> bool {
        self.target.is_some() && !self.is_complete()
    }
}

/// One successful descent
struct Step {
    target: NodeId,
    choice: Option<NodeId>,
    consumed: usize,
}

impl Step {
    fn record(&self, expanded: &mut Vec<NodeId>) {
        expanded.extend(self.choice);
        expanded.push(self.target);
    }
}

pub fn resolve_path(store: &NodeStore, query: PathQuery) -> PathResolution {
    let segments = &query.segments;
    let mut expanded = Vec::new();
    let mut current = ROOT_ID;
    let mut target = None;
    let mut index = 0;

    while index < segments.len() {
        if let Some(step) = try_step(store, current, segments, index) {
            step.record(&mut expanded);
            current = step.target;
            target = Some(step.target);
            index += step.consumed;
            continue;
        }

        // The stripped root token stands for a top-level node; step into it
        // and retry the same segment there
        if target.is_none()
            && let Some(entry) = entry_node(store, query.root.as_deref())
            && let Some(step) = try_step(store, entry.id, segments, index)
        {
            expanded.push(entry.id);
            step.record(&mut expanded);
            current = step.target;
            target = Some(step.target);
            index += step.consumed;
            continue;
        }

        break;
    }

    tracing::debug!(
        segments = segments.len(),
        consumed = index,
        ?target,
        "path resolved"
    );

    PathResolution {
        expanded,
        target,
        consumed: index,
        query,
    }
}

fn try_step(store: &NodeStore, current: NodeId, segments: &[String], index: usize) -> Option<Step> {
    let segment = &segments[index];

    if let Some(next) = segments.get(index + 1) {
        let compound = format!("{segment}.{next}");
        if let Some(child) = find_child(store, current, &compound) {
            return Some(Step {
                target: child.id,
                choice: None,
                consumed: 2,
            });
        }
    }

    if let Some(child) = find_child(store, current, segment) {
        return Some(Step {
            target: child.id,
            choice: None,
            consumed: 1,
        });
    }

    let choice = store.children(current).find(|c| c.is_choice())?;
    let child = find_child(store, choice.id, segment)?;
    Some(Step {
        target: child.id,
        choice: Some(choice.id),
        consumed: 1,
    })
}

fn find_child<'a>(store: &'a NodeStore, parent: NodeId, term: &str) -> Option<&'a Node> {
    let lowered = term.to_lowercase();
    store
        .children(parent)
        .find(|child| child.name.to_lowercase() == lowered || child.name.contains(term))
}

/// Top-level node a path implicitly starts from: the first one matching the
/// root token, else the only one
fn entry_node<'a>(store: &'a NodeStore, root: Option<&str>) -> Option<&'a Node> {
    if let Some(token) = root
        && let Some(node) = find_child(store, ROOT_ID, token)
    {
        return Some(node);
    }

    let mut roots = store.roots();
    let first = roots.next()?;
    roots.next().is_none().then_some(first)
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

    fn resolve(store: &NodeStore, query: &str) -> PathResolution {
        resolve_path(store, PathQuery::parse(query))
    }

    fn simple() -> NodeStore {
        NodeStore::new(vec![
            node(1, 0, "Pip3A4.Root"),
            node(2, 1, "ServiceHeader"),
            node(3, 2, "ProcessControl"),
        ])
    }

    fn with_choice() -> NodeStore {
        NodeStore::new(vec![
            node(1, 0, "Pip3A4.Root"),
            node(2, 1, "ServiceHeader"),
            node(7, 2, "Choice"),
            node(3, 7, "ProcessControl"),
            node(8, 7, "TransactionControl"),
        ])
    }

    #[test]
    fn test_full_path_through_document_root() {
        let r = resolve(&simple(), "/Pip3A4/ServiceHeader/ProcessControl");
        assert_eq!(r.target, Some(3));
        assert_eq!(r.expanded, vec![1, 2, 3]);
        assert!(r.is_complete());
    }

    #[test]
    fn test_path_naming_root_explicitly() {
        let r = resolve(&simple(), "Pip3A4/ServiceHeader/ProcessControl");
        assert_eq!(r.target, Some(3));
        assert_eq!(r.expanded, vec![1, 2, 3]);
    }

    #[test]
    fn test_choice_fallback() {
        let r = resolve(&with_choice(), "/Pip3A4/ServiceHeader/ProcessControl");
        assert_eq!(r.target, Some(3));
        assert!(r.expanded.contains(&7));
        assert_eq!(r.expanded, vec![1, 2, 7, 3]);
    }

    #[test]
    fn test_parenthesised_choice() {
        let store = NodeStore::new(vec![
            node(1, 0, "Root"),
            node(2, 1, "(Choice)"),
            node(3, 2, "Alternative"),
        ]);
        let r = resolve(&store, "Root/Alternative");
        assert_eq!(r.target, Some(3));
        assert_eq!(r.expanded, vec![1, 2, 3]);
    }

    #[test]
    fn test_compound_segment() {
        let store = NodeStore::new(vec![
            node(1, 0, "Pip3A4.Root"),
            node(2, 1, "fromRole.PartnerRoleDescription"),
            node(3, 2, "ContactInformation"),
        ]);
        let r = resolve(&store, "/Pip3A4/fromRole/PartnerRoleDescription/ContactInformation");
        assert_eq!(r.target, Some(3));
        assert_eq!(r.consumed, 3);
        assert!(r.is_complete());
    }

    #[test]
    fn test_equality_ignores_case_but_contains_does_not() {
        let store = NodeStore::new(vec![
            node(1, 0, "Root"),
            node(2, 1, "ServiceHeader"),
            node(3, 1, "thisDocumentIdentifier.ProprietaryDocumentIdentifier"),
        ]);

        assert_eq!(resolve(&store, "root/serviceheader").target, Some(2));
        assert_eq!(resolve(&store, "Root/DocumentIdentifier").target, Some(3));
        // Lower-case substring of a longer name does not match
        let r = resolve(&store, "Root/documentidentifier");
        assert_eq!(r.target, Some(1));
        assert!(r.is_partial());
    }

    #[test]
    fn test_partial_resolution_keeps_last_node() {
        let r = resolve(&simple(), "/Pip3A4/ServiceHeader/Missing/ProcessControl");
        assert_eq!(r.target, Some(2));
        assert_eq!(r.consumed, 1);
        assert_eq!(r.expanded, vec![1, 2]);
        assert!(r.is_partial());
    }

    #[test]
    fn test_unresolvable_first_segment() {
        let r = resolve(&simple(), "/Pip3A4/Nothing/Here");
        assert_eq!(r.target, None);
        assert!(r.expanded.is_empty());
        assert!(!r.is_complete());
    }

    #[test]
    fn test_entry_prefers_matching_root() {
        let store = NodeStore::new(vec![
            node(1, 0, "Pip3B2.Root"),
            node(2, 1, "ServiceHeader"),
            node(3, 0, "Pip3A4.Root"),
            node(4, 3, "ServiceHeader"),
        ]);
        let r = resolve(&store, "/Pip3A4/ServiceHeader");
        assert_eq!(r.target, Some(4));
        assert_eq!(r.expanded, vec![3, 4]);

        // Without a matching token and several roots there is no implicit entry
        assert_eq!(resolve(&store, "/Pip9Z9/ServiceHeader").target, None);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let store = with_choice();
        let a = resolve(&store, "/Pip3A4/ServiceHeader/TransactionControl");
        let b = resolve(&store, "/Pip3A4/ServiceHeader/TransactionControl");
        assert_eq!(a, b);
        assert_eq!(a.target, Some(8));
    }
}
