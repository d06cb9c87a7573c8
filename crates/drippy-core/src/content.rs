//! Content types and rendering values.

use std::{collections::BTreeMap, path::Path};

use serde::Serialize;

use crate::frontmatter::Frontmatter;

/// File name prefix reserved for a directory's own index template.
pub const INDEX_PREFIX: &str = "index";

/// File name of a directory's index template.
pub const INDEX_TEMPLATE: &str = "index.liquid";

/// Kind of page source, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Template source (.liquid files), rendered directly.
    Template,
    /// Markdown source (.md files), composed into a named template.
    Markdown,
}

impl SourceKind {
    /// Determine source kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "liquid" => Some(Self::Template),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Determine source kind from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Get the file extension for this source kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Template => "liquid",
            Self::Markdown => "md",
        }
    }
}

/// A value bound into a template.
///
/// The set of shapes is closed, so rendering is total over it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// Variable bindings passed to a template.
pub type Bindings = BTreeMap<String, Value>;

/// Frontmatter records of one directory's pages, in listing order.
pub type Collection = Vec<Frontmatter>;

/// All collections of a build, keyed by directory path relative to the pages root.
pub type Collections = BTreeMap<String, Collection>;

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Bindings> for Value {
    fn from(map: Bindings) -> Self {
        Self::Map(map)
    }
}

impl From<&Frontmatter> for Value {
    fn from(frontmatter: &Frontmatter) -> Self {
        Self::Map(frontmatter.to_bindings())
    }
}

impl From<Frontmatter> for Value {
    fn from(frontmatter: Frontmatter) -> Self {
        Self::from(&frontmatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_from_path() {
        assert_eq!(
            SourceKind::from_path(Path::new("posts/a.md")),
            Some(SourceKind::Markdown)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("about.liquid")),
            Some(SourceKind::Template)
        );
        assert_eq!(SourceKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(SourceKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_value_serializes_untagged() {
        let mut item = Bindings::new();
        item.insert("name".to_string(), Value::from("Item 1"));
        item.insert("count".to_string(), Value::from(3_i64));

        let mut bindings = Bindings::new();
        bindings.insert("show".to_string(), Value::from(true));
        bindings.insert("items".to_string(), Value::from(vec![Value::from(item)]));

        let json = serde_json::to_value(&bindings).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "show": true,
                "items": [{ "count": 3, "name": "Item 1" }],
            })
        );
    }

    #[test]
    fn test_frontmatter_into_map_value() {
        let fm: Frontmatter = [("title", "Hello")].into_iter().collect();
        let Value::Map(map) = Value::from(&fm) else {
            panic!("expected map");
        };
        assert_eq!(map.get("title"), Some(&Value::from("Hello")));
    }
}
