//! Field catalog parsing.
//!
//! - [`definitions`] - name → description dictionary from definition tables
//! - [`builder`] - indentation-driven tree construction
//! - [`store`] - flat node list with id and child indexes
//!
//! ```
//! let html = "<table>\
//!     <tr><td>1</td><td></td><td>Pip3A4.Root</td></tr>\
//!     <tr><td>2</td><td></td><td>|--ServiceHeader</td></tr>\
//!     </table>";
//! let catalog = pipview::parse(html).unwrap();
//! assert_eq!(catalog.store().len(), 2);
//! assert_eq!(catalog.store().get(2).unwrap().parent_id, 1);
//! ```

pub mod builder;
pub mod definitions;
pub mod error;
pub mod store;
pub mod types;

pub use builder::build_tree;
pub use definitions::extract_definitions;
pub use error::CatalogError;
pub use store::NodeStore;
pub use types::{Dictionary, Node, NodeId, ROOT_ID};

use crate::document::Document;

/// Result of one parse: the node store and the dictionary it was
/// described from. Replaced wholesale on every parse.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    store: NodeStore,
    dictionary: Dictionary,
}

impl Catalog {
    pub fn from_document(document: &Document) -> Result<Self, CatalogError> {
        if !document.has_tables() {
            return Err(CatalogError::StructureNotFound);
        }

        let dictionary = extract_definitions(document);
        let nodes = build_tree(document, &dictionary)?;

        Ok(Self {
            store: NodeStore::new(nodes),
            dictionary,
        })
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Parsed fine but yielded no valid rows. Callers decide whether that
    /// is an error.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Parse raw document text into a catalog
pub fn parse(raw: &str) -> Result<Catalog, CatalogError> {
    Catalog::from_document(&Document::parse(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"
<html><body>
<h1>PIP 3A4 Message Guideline</h1>
<table>
  <tr><th>Name</th><th>Definition</th></tr>
  <tr><td>ServiceHeader</td><td>Unformatted Text.</td></tr>
  <tr><td>ProcessControl</td><td>Process control information.</td></tr>
  <tr><td>PartnerRoleDescription</td><td>Describes a partner role.</td></tr>
</table>
<table>
  <tr><th>No</th><th>Card</th><th>Element</th></tr>
  <tr><td>1</td><td>1</td><td>Pip3A4PurchaseOrderRequest</td></tr>
  <tr><td>2</td><td>1</td><td>|--ServiceHeader</td></tr>
  <tr><td>3</td><td>1</td><td>|--|--ProcessControl</td></tr>
  <tr><td>4</td><td>1</td><td>|--fromRole.PartnerRoleDescription</td></tr>
  <tr><td>5</td><td>0..1</td><td>|--|--ContactInformation</td></tr>
  <tr><td>6*</td><td>1</td><td>|--&nbsp;thisDocumentGenerationDateTime.DateTimeStamp</td></tr>
</table>
</body></html>
"#;

    #[test]
    fn test_parse_full_export() {
        let catalog = parse(EXPORT).unwrap();
        let store = catalog.store();

        assert_eq!(store.len(), 6);
        assert_eq!(catalog.dictionary().len(), 3);

        let header = store.get(2).unwrap();
        assert_eq!(header.description, "");

        let control = store.get(3).unwrap();
        assert_eq!(control.parent_id, 2);
        assert_eq!(control.description, "Process control information.");

        let role = store.get(4).unwrap();
        assert_eq!(role.parent_id, 1);
        assert_eq!(role.description, "Describes a partner role.");

        let stamp = store.get(6).unwrap();
        assert_eq!(stamp.field_no, "6*");
        assert_eq!(stamp.name, "thisDocumentGenerationDateTime.DateTimeStamp");
        assert_eq!(stamp.level, 1);
    }

    #[test]
    fn test_no_table_is_structure_error() {
        assert_eq!(parse("").unwrap_err(), CatalogError::StructureNotFound);
        assert_eq!(
            parse("<html><p>nothing tabular</p></html>").unwrap_err(),
            CatalogError::StructureNotFound
        );
    }

    #[test]
    fn test_tables_without_rows_are_empty_result() {
        let catalog = parse("<table><tr><td>Name</td><td>Definition</td></tr></table>").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_tsv_export() {
        let raw = "1\t\tRoot\n2\t\t|--Child\n3\t\t|--|--Leaf\n";
        let catalog = parse(raw).unwrap();
        let parents: Vec<_> = catalog.store().nodes().iter().map(|n| n.parent_id).collect();
        assert_eq!(parents, vec![0, 1, 2]);
    }
}
