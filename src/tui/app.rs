use crate::catalog::{Node, NodeId};
use crate::search::{self, Resolution};
use crate::session::Session;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the tree
    Browse,
    /// Editing the search query
    Query,
    Help,
}

/// LRU cache size for search resolutions
const SEARCH_CACHE_SIZE: usize = 64;

/// Rows moved by page up/down
const PAGE_SIZE: usize = 10;

/// Application state
pub struct App {
    pub session: Session,
    /// Shown in the tree panel title
    pub title: String,
    /// Query being edited; committed to the session on Enter
    pub input: String,
    /// Position in the visible list
    pub selected: usize,
    pub mode: Mode,
    /// Previous mode before entering help (to return to)
    pub previous_mode: Mode,
    pub status_message: String,
    /// Pending key for vim multi-key commands (e.g., 'g' for 'gg')
    pub pending_key: Option<char>,
    /// Resolutions are pure in (tree, query), so they survive until reload
    search_cache: LruCache<String, Resolution>,
}

impl App {
    pub fn new(session: Session, title: String) -> Self {
        let status_message = format!(
            "{} nodes, {} definitions",
            session.store().len(),
            session.catalog().dictionary().len()
        );

        Self {
            session,
            title,
            input: String::new(),
            selected: 0,
            mode: Mode::Browse,
            previous_mode: Mode::Browse,
            status_message,
            pending_key: None,
            search_cache: LruCache::new(
                NonZeroUsize::new(SEARCH_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN),
            ),
        }
    }

    pub fn visible(&self) -> Vec<&Node> {
        self.session.visible()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_page_down(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + PAGE_SIZE).min(len - 1);
        }
    }

    pub fn select_page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_SIZE);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible().len().saturating_sub(1);
    }

    /// Expand or collapse the selected node
    pub fn toggle_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let id = node.id;

        if self.session.store().has_children(id) {
            self.session.toggle(id);
        }
    }

    pub fn expand_all(&mut self) {
        let keep = self.selected_node().map(|n| n.id);
        self.session.expand_all();
        self.restore_selection(keep);
        self.status_message = "Expanded all".to_string();
    }

    pub fn collapse_all(&mut self) {
        let keep = self.selected_node().map(|n| n.id);
        self.session.collapse_all();
        self.restore_selection(keep);
        self.status_message = "Collapsed all".to_string();
    }

    pub fn reset_view(&mut self) {
        self.session.reset_view();
        self.input.clear();
        self.selected = 0;
        self.status_message = "View reset".to_string();
    }

    /// Keep `id` selected, or its nearest visible ancestor
    fn restore_selection(&mut self, id: Option<NodeId>) {
        let Some(id) = id else {
            self.selected = 0;
            return;
        };

        let candidates: Vec<NodeId> = std::iter::once(id)
            .chain(self.session.store().ancestors(id))
            .collect();

        let visible = self.visible();
        let position = candidates
            .iter()
            .find_map(|c| visible.iter().position(|n| n.id == *c));

        self.selected = position.unwrap_or(0);
    }

    pub fn start_query(&mut self) {
        self.input = self.session.query().to_string();
        self.mode = Mode::Query;
    }

    pub fn cancel_query(&mut self) {
        self.input = self.session.query().to_string();
        self.mode = Mode::Browse;
    }

    /// Delete word backward from the query (vim Ctrl+w)
    pub fn delete_word(&mut self) {
        while self.input.ends_with(' ') {
            self.input.pop();
        }
        while !self.input.is_empty() && !self.input.ends_with(' ') {
            self.input.pop();
        }
    }

    /// Run the edited query against the tree
    pub fn execute_search(&mut self) {
        self.mode = Mode::Browse;
        let query = self.input.clone();

        let (resolution, cached) = match self.search_cache.get(&query) {
            Some(hit) => (hit.clone(), true),
            None => {
                let resolution = search::resolve(self.session.store(), &query);
                self.search_cache.put(query.clone(), resolution.clone());
                (resolution, false)
            }
        };

        self.session.apply(&query, &resolution);
        self.status_message = describe(&resolution, cached);

        match resolution.highlighted().first() {
            Some(&first) => self.restore_selection(Some(first)),
            None => self.selected = self.selected.min(self.visible().len().saturating_sub(1)),
        }
    }

    /// Move to the next highlighted node below the selection, wrapping
    pub fn next_highlight(&mut self) {
        let positions = self.highlight_positions();
        if let Some(&pos) = positions
            .iter()
            .find(|&&p| p > self.selected)
            .or_else(|| positions.first())
        {
            self.selected = pos;
        }
    }

    /// Move to the previous highlighted node above the selection, wrapping
    pub fn prev_highlight(&mut self) {
        let positions = self.highlight_positions();
        if let Some(&pos) = positions
            .iter()
            .rev()
            .find(|&&p| p < self.selected)
            .or_else(|| positions.last())
        {
            self.selected = pos;
        }
    }

    fn highlight_positions(&self) -> Vec<usize> {
        let state = self.session.state();
        self.visible()
            .iter()
            .enumerate()
            .filter(|(_, n)| state.is_highlighted(n.id))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn show_help(&mut self) {
        if self.mode != Mode::Help {
            self.previous_mode = self.mode;
            self.mode = Mode::Help;
        }
    }

    pub fn hide_help(&mut self) {
        if self.mode == Mode::Help {
            self.mode = self.previous_mode;
        }
    }

    /// Clear pending key state
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

fn describe(resolution: &Resolution, cached: bool) -> String {
    let suffix = if cached { " (cached)" } else { "" };
    match resolution {
        Resolution::Cleared => "Search cleared".to_string(),
        Resolution::Keyword(k) => format!("{} matches{}", k.matches.len(), suffix),
        Resolution::Path(p) if p.is_complete() => format!("Path resolved{}", suffix),
        Resolution::Path(p) if p.is_partial() => format!(
            "Partial path: {}/{} segments{}",
            p.consumed,
            p.query.segments.len(),
            suffix
        ),
        Resolution::Path(_) => format!("Path not found{}", suffix),
    }
}
