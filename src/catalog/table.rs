//! Language table input definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde_json::{
    Map,
    Value,
};

use super::CatalogError;
use crate::types::LanguageCode;

/// Shape of a leaf in a language table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafShape {
    Text,
    /// List leaf with its length (select options, feature bullets).
    List(usize),
    /// Numbers, booleans and nulls. Never valid for text resolution.
    Other,
}

impl fmt::Display for LeafShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::List(len) => write!(f, "list of {len}"),
            Self::Other => f.write_str("non-text value"),
        }
    }
}

/// One language's translation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageTable {
    language: LanguageCode,
    root: Map<String, Value>,
}

impl LanguageTable {
    /// # Errors
    /// Returns error if the top level is not a JSON object.
    pub fn from_value(language: LanguageCode, value: Value) -> Result<Self, CatalogError> {
        match value {
            Value::Object(root) => Ok(Self { language, root }),
            _ => Err(CatalogError::NotAnObject { language }),
        }
    }

    /// # Errors
    /// Returns error if the text is not valid JSON or not an object.
    pub fn from_json_str(language: LanguageCode, text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|source| CatalogError::Parse { language: language.clone(), source })?;
        Self::from_value(language, value)
    }

    /// Load `<dir>/<code>.json`.
    ///
    /// # Errors
    /// Returns error if file read or JSON parse fails.
    pub fn load_file(language: LanguageCode, path: &Path) -> Result<Self, CatalogError> {
        tracing::debug!("Loading translation table '{}' from {:?}", language, path);
        let content = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(language, &content)
    }

    /// Language this table belongs to.
    #[must_use]
    pub const fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Walk the tree along `key` split by `separator`.
    ///
    /// Object segments are field names; a numeric segment indexes into a list.
    #[must_use]
    pub fn lookup(&self, key: &str, separator: &str) -> Option<&Value> {
        let mut segments = key.split(separator);
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Flatten the tree into key path -> leaf shape.
    ///
    /// Lists are leaves: their elements are not addressed individually.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use site_i18n::catalog::{LanguageTable, LeafShape};
    ///
    /// let table = LanguageTable::from_value(
    ///     "en".into(),
    ///     json!({ "nav": { "services": "Services" }, "topics": ["SAP", "AI"] }),
    /// )
    /// .unwrap();
    ///
    /// let leaves = table.leaves(".");
    /// assert_eq!(leaves.get("nav.services"), Some(&LeafShape::Text));
    /// assert_eq!(leaves.get("topics"), Some(&LeafShape::List(2)));
    /// ```
    #[must_use]
    pub fn leaves(&self, separator: &str) -> BTreeMap<String, LeafShape> {
        self.walk(separator).leaves
    }

    /// Paths of entries whose own name contains `separator`.
    ///
    /// [`lookup`](Self::lookup) can never reach these, so they are left out of
    /// [`leaves`](Self::leaves).
    #[must_use]
    pub fn unaddressable_keys(&self, separator: &str) -> Vec<String> {
        self.walk(separator).unaddressable
    }

    /// Flatten the table once, collecting leaves and unreachable names.
    fn walk(&self, separator: &str) -> Walk {
        let mut walk = Walk::default();
        for (key, value) in &self.root {
            walk.visit(value, separator, key, key);
        }
        walk
    }
}

/// Flattened view of a table.
#[derive(Default)]
struct Walk {
    leaves: BTreeMap<String, LeafShape>,
    unaddressable: Vec<String>,
}

impl Walk {
    /// Record `value` found under `name` at `path`.
    fn visit(&mut self, value: &Value, separator: &str, name: &str, path: &str) {
        if !separator.is_empty() && name.contains(separator) {
            self.unaddressable.push(path.to_string());
            return;
        }
        let shape = match value {
            Value::Object(map) => {
                for (key, value) in map {
                    let full_key = format!("{path}{separator}{key}");
                    self.visit(value, separator, key, &full_key);
                }
                return;
            }
            Value::Array(items) => LeafShape::List(items.len()),
            Value::String(_) => LeafShape::Text,
            _ => LeafShape::Other,
        };
        self.leaves.insert(path.to_string(), shape);
    }
}
