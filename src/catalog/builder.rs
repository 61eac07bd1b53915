//! Catalog tree construction.
//!
//! The catalog table encodes depth purely through a pipe indentation
//! convention in its name column:
//!
//! ```text
//! 1   Pip3A4.Root
//! 2   |--ServiceHeader
//! 3   |--|--ProcessControl
//! ```
//!
//! Each row's parent is the most recent row seen one level shallower, tracked
//! in a flat map indexed by depth.

use super::error::CatalogError;
use super::types::{Dictionary, NAME_SEPARATOR, Node, NodeId, ROOT_ID};
use crate::document::{Document, Row, Table};
use rustc_hash::FxHashMap;

/// Marker that introduces one level of nesting
pub const HIERARCHY_MARKER: &str = "|--";

/// Tables with this many rows or fewer are never preferred as the catalog
const MIN_CATALOG_ROWS: usize = 5;

const ID_COLUMN: usize = 0;
const NAME_COLUMN: usize = 2;
const SHIFTED_NAME_COLUMN: usize = 3;

/// Derives a dictionary key from a node name
type LookupStrategy = fn(&str) -> Option<&str>;

/// Tried in order; first dictionary hit wins
const LOOKUP_STRATEGIES: &[LookupStrategy] = &[full_name, property_half, type_half];

fn full_name(name: &str) -> Option<&str> {
    Some(name)
}

fn property_half(name: &str) -> Option<&str> {
    name.split_once(NAME_SEPARATOR).map(|(property, _)| property)
}

fn type_half(name: &str) -> Option<&str> {
    name.split_once(NAME_SEPARATOR).map(|(_, type_name)| type_name)
}

/// Build the flat, parent-linked node list from the document's catalog table
pub fn build_tree(document: &Document, dictionary: &Dictionary) -> Result<Vec<Node>, CatalogError> {
    let table = select_catalog_table(document.tables()).ok_or(CatalogError::StructureNotFound)?;

    let mut nodes = Vec::with_capacity(table.row_count());
    let mut last_id_at_level: FxHashMap<usize, NodeId> = FxHashMap::default();
    let mut skipped = 0usize;

    for row in table.rows() {
        match build_node(row, dictionary, &mut last_id_at_level) {
            Some(node) => nodes.push(node),
            None => skipped += 1,
        }
    }

    tracing::debug!(nodes = nodes.len(), skipped, "catalog tree built");
    Ok(nodes)
}

/// Pick the table with the most marker rows among tables longer than
/// [`MIN_CATALOG_ROWS`], else the longest table
pub fn select_catalog_table(tables: &[Table]) -> Option<&Table> {
    let mut best: Option<(&Table, usize)> = None;

    for table in tables.iter().filter(|t| t.row_count() > MIN_CATALOG_ROWS) {
        let markers = table.count_rows_containing(HIERARCHY_MARKER);
        if markers > 0 && best.is_none_or(|(_, most)| markers > most) {
            best = Some((table, markers));
        }
    }

    if let Some((table, _)) = best {
        return Some(table);
    }

    let mut longest: Option<&Table> = None;
    for table in tables {
        if longest.is_none_or(|l| table.row_count() > l.row_count()) {
            longest = Some(table);
        }
    }
    longest
}

fn build_node(
    row: &Row,
    dictionary: &Dictionary,
    last_id_at_level: &mut FxHashMap<usize, NodeId>,
) -> Option<Node> {
    if row.len() < 3 {
        return None;
    }

    let field_no = row.cell(ID_COLUMN)?;
    let id = parse_id(field_no)?;

    let (mut level, mut name) = read_label(row.cell(NAME_COLUMN)?);
    if name.is_empty()
        && let Some(shifted) = row.cell(SHIFTED_NAME_COLUMN)
    {
        (level, name) = read_label(shifted);
    }

    let parent_id = match level.checked_sub(1) {
        Some(parent_level) => last_id_at_level.get(&parent_level).copied().unwrap_or(ROOT_ID),
        None => ROOT_ID,
    };
    last_id_at_level.insert(level, id);

    let description = lookup_description(dictionary, &name).to_string();

    Some(Node {
        id,
        parent_id,
        field_no: field_no.to_string(),
        level,
        name,
        description,
    })
}

/// Digits of the field-number token as an id. `None` when there are no
/// digits or the value overflows.
pub fn parse_id(token: &str) -> Option<NodeId> {
    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// `(level, name)` from an indented label cell
fn read_label(cell: &str) -> (usize, String) {
    let label = cell.replace('\u{a0}', " ");
    let level = label.chars().filter(|&c| c == '|').count();
    let name: String = label.chars().filter(|&c| c != '|' && c != '-').collect();
    (level, name.trim().to_string())
}

fn lookup_description<'a>(dictionary: &'a Dictionary, name: &str) -> &'a str {
    LOOKUP_STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(name))
        .find_map(|key| dictionary.get(key))
        .unwrap_or("")
}
