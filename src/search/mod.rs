//! Keyword and path search over a catalog.
//!
//! Searching is split in two steps: [`resolve`] is a pure function of the
//! tree and the query text, and [`Resolution::apply`] folds the outcome into
//! a [`ViewState`]. Resolutions can therefore be cached per query.
//!
//! ```
//! use pipview::search::{resolve, Resolution};
//! use pipview::view::ViewState;
//!
//! let html = "<table>\
//!     <tr><td>1</td><td></td><td>Pip3A4.Root</td></tr>\
//!     <tr><td>2</td><td></td><td>|--ServiceHeader</td></tr>\
//!     </table>";
//! let catalog = pipview::parse(html).unwrap();
//!
//! let mut state = ViewState::new();
//! resolve(catalog.store(), "/Pip3A4/ServiceHeader").apply(&mut state);
//! assert!(state.is_highlighted(2));
//! assert!(state.is_expanded(1));
//! ```

pub mod keyword;
pub mod path;
pub mod query;

pub use keyword::{KeywordMatches, find_keyword};
pub use path::{PathResolution, resolve_path};
pub use query::{PathQuery, SearchMode};

use crate::catalog::{NodeId, NodeStore};
use crate::view::ViewState;
use serde::Serialize;

/// What a query resolved to against one tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Resolution {
    /// Blank query
    Cleared,
    Keyword(KeywordMatches),
    Path(PathResolution),
}

impl Resolution {
    pub fn mode(&self) -> Option<SearchMode> {
        match self {
            Resolution::Cleared => None,
            Resolution::Keyword(_) => Some(SearchMode::Keyword),
            Resolution::Path(_) => Some(SearchMode::Path),
        }
    }

    /// Ids that end up highlighted once applied
    pub fn highlighted(&self) -> Vec<NodeId> {
        match self {
            Resolution::Cleared => Vec::new(),
            Resolution::Keyword(k) => k.matches.clone(),
            Resolution::Path(p) => p.target.into_iter().collect(),
        }
    }

    pub fn is_match(&self) -> bool {
        !self.highlighted().is_empty()
    }

    /// Fold into view state.
    ///
    /// Keyword matches extend the expanded set with their ancestors. A path
    /// that resolved at least one segment replaces the expanded set with its
    /// own expansions. A miss only clears the highlight.
    pub fn apply(&self, state: &mut ViewState) {
        match self {
            Resolution::Cleared => state.highlighted.clear(),
            Resolution::Keyword(k) => {
                state.highlighted = k.matches.iter().copied().collect();
                if !k.matches.is_empty() {
                    state.expanded.extend(k.ancestors.iter().copied());
                }
            }
            Resolution::Path(p) => match p.target {
                Some(target) => {
                    state.expanded = p.expanded.iter().copied().collect();
                    state.highlighted = std::iter::once(target).collect();
                }
                None => state.highlighted.clear(),
            },
        }
    }
}

/// Resolve `query` against `store`, choosing the mode from its shape
pub fn resolve(store: &NodeStore, query: &str) -> Resolution {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Resolution::Cleared;
    }

    match SearchMode::detect(trimmed) {
        SearchMode::Keyword => Resolution::Keyword(find_keyword(store, trimmed)),
        SearchMode::Path => Resolution::Path(resolve_path(store, PathQuery::parse(trimmed))),
    }
}
