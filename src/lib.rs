//! # pipview - field catalog tree viewer
//!
//! pipview reads exported message guidelines whose tables describe a message
//! format as an indented field catalog (`|--` per level), rebuilds the
//! hierarchy, and lets you find fields by keyword or by path.
//!
//! ## Architecture
//!
//! - [`document`] - Raw HTML / tab-separated text into tables
//! - [`catalog`] - Definition dictionary and parent-linked node list
//! - [`view`] - Expanded set and the visible projection of the tree
//! - [`search`] - Keyword and path search
//! - [`session`] - One catalog plus its view state
//! - [`storage`] - Saved documents keyed by name
//! - [`output`] - Coloured tree printing
//! - [`tui`] - Interactive tree viewer
//! - [`utils`] - App data directory and configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use pipview::session::Session;
//!
//! let raw = std::fs::read_to_string("Pip3A4.html")?;
//! let mut session = Session::new();
//! session.load(&raw)?;
//!
//! session.search("/Pip3A4/ServiceHeader/ProcessControl");
//! for node in session.visible() {
//!     println!("{}{}", "  ".repeat(node.level), node.name);
//! }
//! ```

pub mod catalog;
pub mod document;
pub mod output;
pub mod search;
pub mod session;
pub mod storage;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
pub mod view;

pub use catalog::{Catalog, CatalogError, Node, NodeId, parse};
pub use session::{LoadStatus, Session};
