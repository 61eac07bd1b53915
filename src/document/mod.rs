//! Tabular document model.
//!
//! Catalog exports arrive either as HTML (the usual output of document
//! converters) or as tab-separated plain text. Both are read into the same
//! shape: an ordered list of [`Table`]s, each an ordered list of [`Row`]s of
//! trimmed cell strings. Everything downstream works on this model only.
//!
//! ```
//! use pipview::document::Document;
//!
//! let doc = Document::parse("<table><tr><td>1</td><td>Root</td></tr></table>");
//! assert_eq!(doc.tables().len(), 1);
//! assert_eq!(doc.tables()[0].rows()[0].cell(1), Some("Root"));
//! ```

mod html;
mod tsv;

/// A single table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Combined text of all cells, used for table classification
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }
}

/// A table in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows whose text contains `needle`
    pub fn count_rows_containing(&self, needle: &str) -> usize {
        self.rows.iter().filter(|r| r.text().contains(needle)).count()
    }
}

/// Input format detected for a raw document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Html,
    Tsv,
}

/// A parsed tabular document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    tables: Vec<Table>,
}

impl Document {
    /// Read raw text into tables. Never fails; text without any table
    /// yields an empty document.
    pub fn parse(raw: &str) -> Self {
        let format = detect_format(raw);
        let tables = match format {
            SourceFormat::Html => html::read_tables(raw),
            SourceFormat::Tsv => tsv::read_tables(raw),
        };

        tracing::debug!(?format, tables = tables.len(), "document read");
        Self { tables }
    }

    pub fn from_tables(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn has_tables(&self) -> bool {
        !self.tables.is_empty()
    }
}

fn detect_format(raw: &str) -> SourceFormat {
    let has_table_tag = raw
        .as_bytes()
        .windows(6)
        .any(|w| w.eq_ignore_ascii_case(b"<table"));

    if has_table_tag {
        SourceFormat::Html
    } else {
        SourceFormat::Tsv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_html() {
        assert_eq!(detect_format("<TABLE><tr></tr></TABLE>"), SourceFormat::Html);
        assert_eq!(detect_format("a\tb\nc\td"), SourceFormat::Tsv);
    }

    #[test]
    fn test_row_text_joins_cells() {
        let row = Row::new(vec!["Name".into(), "Definition".into()]);
        assert_eq!(row.text(), "Name Definition");
        assert_eq!(row.cell(1), Some("Definition"));
        assert_eq!(row.cell(2), None);
    }

    #[test]
    fn test_count_rows_containing_marker() {
        let table = Table::new(vec![
            Row::new(vec!["1".into(), "Root".into()]),
            Row::new(vec!["2".into(), "|--Child".into()]),
            Row::new(vec!["3".into(), "|--|--Leaf".into()]),
        ]);
        assert_eq!(table.count_rows_containing("|--"), 2);
    }

    #[test]
    fn test_garbage_has_no_tables() {
        let doc = Document::parse("just some prose\nwith no structure");
        assert!(!doc.has_tables());
    }
}
