//! Expansion state and the visible projection of the tree.

pub mod projector;
pub mod state;

pub use projector::{is_visible, project};
pub use state::{ExpandedSet, HighlightedSet, ViewState};
