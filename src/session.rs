//! A single viewing session: one parsed catalog plus its view state.

use crate::catalog::{self, Catalog, CatalogError, Node, NodeId, NodeStore};
use crate::search::{self, Resolution};
use crate::view::{self, ViewState};

/// Outcome of loading a document that had at least one table
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { nodes: usize, definitions: usize },
    /// Tables were found but no row was a valid catalog row
    Empty,
}

/// Owns the node store, the expanded and highlighted sets, and the active
/// search text. Every operation goes through `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    catalog: Catalog,
    state: ViewState,
    query: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` and replace the current tree. View state and search text
    /// are reset. On error the previous tree is kept.
    pub fn load(&mut self, raw: &str) -> Result<LoadStatus, CatalogError> {
        let catalog = catalog::parse(raw)?;
        Ok(self.replace(catalog))
    }

    pub fn replace(&mut self, catalog: Catalog) -> LoadStatus {
        self.catalog = catalog;
        self.state.reset();
        self.query.clear();

        if self.catalog.is_empty() {
            tracing::info!("document parsed but contains no catalog rows");
            LoadStatus::Empty
        } else {
            let nodes = self.catalog.store().len();
            let definitions = self.catalog.dictionary().len();
            tracing::info!(nodes, definitions, "catalog loaded");
            LoadStatus::Loaded { nodes, definitions }
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &NodeStore {
        self.catalog.store()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn toggle(&mut self, id: NodeId) {
        self.state.toggle(id);
    }

    pub fn expand_all(&mut self) {
        self.state.expand_all(self.catalog.store());
    }

    pub fn collapse_all(&mut self) {
        self.state.collapse_all();
    }

    /// Clear expansion, highlights and the search text
    pub fn reset_view(&mut self) {
        self.state.reset();
        self.query.clear();
    }

    /// Run `query` and fold the outcome into the view state
    pub fn search(&mut self, query: &str) -> Resolution {
        let resolution = search::resolve(self.catalog.store(), query);
        self.apply(query, &resolution);
        resolution
    }

    /// Apply an already-resolved query, e.g. from a cache
    pub fn apply(&mut self, query: &str, resolution: &Resolution) {
        self.query = query.to_string();
        resolution.apply(&mut self.state);
    }

    /// Currently visible nodes in document order
    pub fn visible(&self) -> Vec<&Node> {
        view::project(self.catalog.store(), &self.state.expanded)
    }

    /// Highlighted nodes in document order
    pub fn highlighted(&self) -> Vec<&Node> {
        self.store()
            .nodes()
            .iter()
            .filter(|n| self.state.is_highlighted(n.id))
            .collect()
    }
}
