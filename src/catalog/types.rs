use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Node identifier, taken from the document's field-number column
pub type NodeId = u64;

/// Parent id of top-level nodes. Not a real node.
pub const ROOT_ID: NodeId = 0;

/// Separator between the property and type halves of a compound name
pub const NAME_SEPARATOR: char = '.';

/// One row of the field catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub parent_id: NodeId,
    /// Original field-number token, decoration included
    pub field_no: String,
    pub level: usize,
    /// Cleaned label, possibly `property.Type`
    pub name: String,
    pub description: String,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_ID
    }

    /// `(property, type)` halves of a compound name
    pub fn split_name(&self) -> Option<(&str, &str)> {
        self.name.split_once(NAME_SEPARATOR)
    }

    /// Whether this node groups mutually exclusive alternatives
    pub fn is_choice(&self) -> bool {
        self.name == "Choice" || self.name == "(Choice)"
    }
}

/// Definition name to description, immutable once built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dictionary {
    entries: FxHashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins
    pub(crate) fn insert(&mut self, name: String, description: String) {
        self.entries.insert(name, description);
    }

    /// Case-sensitive exact lookup
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (name, description) in iter {
            dict.insert(name, description);
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> Node {
        Node {
            id: 1,
            parent_id: ROOT_ID,
            field_no: "1".into(),
            level: 0,
            name: name.into(),
            description: String::new(),
        }
    }

    #[test]
    fn test_split_name_on_first_separator() {
        assert_eq!(node("a.B.c").split_name(), Some(("a", "B.c")));
        assert_eq!(node("plain").split_name(), None);
    }

    #[test]
    fn test_choice_names() {
        assert!(node("Choice").is_choice());
        assert!(node("(Choice)").is_choice());
        assert!(!node("choice").is_choice());
        assert!(!node("ChoiceGroup").is_choice());
    }

    #[test]
    fn test_dictionary_is_case_sensitive() {
        let dict: Dictionary = [("Name".to_string(), "desc".to_string())]
            .into_iter()
            .collect();
        assert_eq!(dict.get("Name"), Some("desc"));
        assert_eq!(dict.get("name"), None);
    }
}
