use super::{Row, Table};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use std::sync::LazyLock;

/// Elements whose boundaries separate words in cell text
const BLOCK_TAGS: &[&str] = &["p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6"];

/// ASCII whitespace runs. U+00A0 is left alone for the builder to normalise.
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r\n]+").unwrap());

/// Read all `<table>` elements. Nested tables are returned as separate
/// tables, ordered by where they open, and do not contribute to the text
/// of the cell that contains them.
pub(super) fn read_tables(raw: &str) -> Vec<Table> {
    let dom = parse_document(RcDom::default(), Default::default()).one(raw);

    let mut tables = Vec::new();
    collect_tables(&dom.document, &mut tables);
    tables
}

fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn collect_tables(handle: &Handle, tables: &mut Vec<Table>) {
    if element_name(handle) == Some("table") {
        let slot = tables.len();
        tables.push(Table::default());

        let mut rows = Vec::new();
        collect_rows(handle, &mut rows, tables);
        tables[slot] = Table::new(rows);
        return;
    }

    for child in handle.children.borrow().iter() {
        collect_tables(child, tables);
    }
}

/// Rows of one table, looking through `thead`/`tbody`/`tfoot`
fn collect_rows(handle: &Handle, rows: &mut Vec<Row>, tables: &mut Vec<Table>) {
    for child in handle.children.borrow().iter() {
        match element_name(child) {
            Some("tr") => {
                let cells: Vec<String> = child
                    .children
                    .borrow()
                    .iter()
                    .filter(|cell| matches!(element_name(cell), Some("td" | "th")))
                    .map(|cell| read_cell(cell, tables))
                    .collect();

                if !cells.is_empty() {
                    rows.push(Row::new(cells));
                }
            }
            Some("table") => collect_tables(child, tables),
            Some(_) => collect_rows(child, rows, tables),
            None => {}
        }
    }
}

/// Cell text with whitespace collapsed and edges trimmed
fn read_cell(cell: &Handle, tables: &mut Vec<Table>) -> String {
    let mut text = String::new();
    push_text(cell, &mut text, tables);
    SPACE_RE.replace_all(&text, " ").trim().to_string()
}

fn push_text(handle: &Handle, out: &mut String, tables: &mut Vec<Table>) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { name, .. } => match &*name.local {
                "table" => collect_tables(child, tables),
                "br" => out.push(' '),
                tag => {
                    let block = BLOCK_TAGS.contains(&tag);
                    if block {
                        out.push(' ');
                    }
                    push_text(child, out, tables);
                    if block {
                        out.push(' ');
                    }
                }
            },
            _ => {}
        }
    }
}
