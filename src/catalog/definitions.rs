//! Definition table extraction.
//!
//! Exports usually carry one or more two-column "Name / Definition" tables
//! alongside the catalog. Every such table contributes to a single
//! [`Dictionary`]; names seen later overwrite earlier ones.

use super::types::Dictionary;
use crate::document::{Document, Table};
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder converters emit for definitions with no real text
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^unformatted text\.?$").unwrap());

/// Build the dictionary from every definition table in the document
pub fn extract_definitions(document: &Document) -> Dictionary {
    let mut dict = Dictionary::new();

    for table in document.tables().iter().filter(|t| is_definition_table(t)) {
        for row in table.rows() {
            let (Some(name), Some(definition)) = (row.cell(0), row.cell(1)) else {
                continue;
            };

            let name = name.trim();
            if name.is_empty() || name.eq_ignore_ascii_case("name") {
                continue;
            }

            let definition = definition.trim();
            let definition = if PLACEHOLDER_RE.is_match(definition) {
                ""
            } else {
                definition
            };

            dict.insert(name.to_string(), definition.to_string());
        }
    }

    tracing::debug!(entries = dict.len(), "definitions extracted");
    dict
}

/// A table qualifies if any single row mentions both "name" and "definition"
fn is_definition_table(table: &Table) -> bool {
    table.rows().iter().any(|row| {
        let text = row.text().to_lowercase();
        text.contains("name") && text.contains("definition")
    })
}
