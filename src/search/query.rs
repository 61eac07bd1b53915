use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Leading `/Segment/` naming the document root, e.g. `/Pip3A4/`
static ROOT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/([^/]+)/").unwrap());

/// Array index annotations such as `[0]` or `[n]`
static INDEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Prefix shared by document-root names in these exports
const ROOT_NAME_PREFIX: &str = "Pip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Keyword,
    Path,
}

impl SearchMode {
    /// Path mode when the query contains a slash or names a document root
    pub fn detect(query: &str) -> Self {
        let query = query.trim();
        if query.contains('/') || query.starts_with(ROOT_NAME_PREFIX) {
            SearchMode::Path
        } else {
            SearchMode::Keyword
        }
    }
}

/// A normalized hierarchical path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathQuery {
    /// Stripped document-root token, if the query had one
    pub root: Option<String>,
    pub segments: Vec<String>,
}

impl PathQuery {
    pub fn parse(query: &str) -> Self {
        let query = query.trim();

        let (root, rest) = match ROOT_PREFIX_RE.captures(query) {
            Some(caps) => {
                let token = strip_indexes(&caps[1]).trim().to_string();
                let rest = &query[caps[0].len()..];
                ((!token.is_empty()).then_some(token), rest)
            }
            None => (None, query),
        };

        let rest = strip_indexes(rest);
        let mut segments: Vec<String> = rest
            .trim_matches('/')
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        // "/Pip3A4/" alone still names something to find
        if segments.is_empty()
            && let Some(token) = &root
        {
            segments.push(token.clone());
        }

        Self { root, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn strip_indexes(text: &str) -> String {
    INDEX_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(query: &str) -> Vec<String> {
        PathQuery::parse(query).segments
    }

    #[test]
    fn test_mode_detection() {
        assert_eq!(SearchMode::detect("ServiceHeader/ProcessControl"), SearchMode::Path);
        assert_eq!(SearchMode::detect("  Pip3A4"), SearchMode::Path);
        assert_eq!(SearchMode::detect("ProcessControl"), SearchMode::Keyword);
        assert_eq!(SearchMode::detect("pip3a4"), SearchMode::Keyword);
        assert_eq!(SearchMode::detect("1.2"), SearchMode::Keyword);
    }

    #[test]
    fn test_root_prefix_stripped() {
        let q = PathQuery::parse("/Pip3A4/ServiceHeader/ProcessControl");
        assert_eq!(q.root.as_deref(), Some("Pip3A4"));
        assert_eq!(q.segments, vec!["ServiceHeader", "ProcessControl"]);
    }

    #[test]
    fn test_indexes_and_slashes_stripped() {
        assert_eq!(
            segments("/Pip3A4/ProductLineItem[0]/ProductQuantity[n]/"),
            vec!["ProductLineItem", "ProductQuantity"]
        );
        assert_eq!(segments("A//B/"), vec!["A", "B"]);
    }

    #[test]
    fn test_relative_path_keeps_first_segment() {
        let q = PathQuery::parse("ServiceHeader/ProcessControl");
        assert_eq!(q.root, None);
        assert_eq!(q.segments, vec!["ServiceHeader", "ProcessControl"]);
    }

    #[test]
    fn test_bare_root_token() {
        let q = PathQuery::parse("/Pip3A4[1]/");
        assert_eq!(q.root.as_deref(), Some("Pip3A4"));
        assert_eq!(q.segments, vec!["Pip3A4"]);

        assert_eq!(segments("Pip3A4"), vec!["Pip3A4"]);
        assert!(PathQuery::parse("/").is_empty());
    }
}
