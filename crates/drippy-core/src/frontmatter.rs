//! Frontmatter parsing for source files.
//!
//! A frontmatter block is a `---` line, flat `key: value` lines and a closing
//! `---`. Anything that does not have this shape is treated as a body with no
//! frontmatter rather than as an error.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    content::{Bindings, Value},
    error::{CoreError, Result},
};

/// Frontmatter block delimiter.
pub const DELIMITER: &str = "---";

/// Flat string metadata extracted from a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter(BTreeMap<String, String>);

impl Frontmatter {
    /// Create empty frontmatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert a key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every entry into fresh template bindings.
    #[must_use]
    pub fn to_bindings(&self) -> Bindings {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Result of parsing a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Parsed metadata, possibly empty.
    pub frontmatter: Frontmatter,

    /// Body text after the frontmatter block.
    pub content: String,

    /// Path the content was read from.
    pub path: PathBuf,
}

/// Read `path` and split it into frontmatter and body.
pub fn parse(path: &Path) -> Result<ParseResult> {
    let text = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    Ok(parse_str(&text, path))
}

/// Split already-read text into frontmatter and body.
pub fn parse_str(text: &str, path: &Path) -> ParseResult {
    let Some((raw, body)) = split_frontmatter(text) else {
        return ParseResult {
            frontmatter: Frontmatter::default(),
            content: text.to_string(),
            path: path.to_path_buf(),
        };
    };

    ParseResult {
        frontmatter: parse_block(raw),
        content: body.trim().to_string(),
        path: path.to_path_buf(),
    }
}

/// Split content into the raw frontmatter block and the rest.
///
/// Returns `None` when the text does not open with the delimiter or the
/// opening delimiter is never closed.
pub fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let after_open = text.strip_prefix(DELIMITER)?;
    let close = after_open.find(DELIMITER)?;

    Some((
        &after_open[..close],
        &after_open[close + DELIMITER.len()..],
    ))
}

fn parse_block(raw: &str) -> Frontmatter {
    raw.trim()
        .lines()
        .filter_map(|line| {
            // Split on the first colon only; values such as times keep theirs.
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key, value.trim()))
        })
        .collect()
}
