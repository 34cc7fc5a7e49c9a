//! Key path resolution with default-language fallback.

use std::collections::HashMap;

use serde_json::Value;

use super::interpolate;
use crate::catalog::{
    Catalog,
    LanguageTable,
};

/// Outcome of resolving a key path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Found in the active language.
    Active(&'a str),
    /// Found only in the default language.
    Fallback(&'a str),
    /// Found nowhere.
    Missing,
}

impl<'a> Resolution<'a> {
    /// Resolved text, or `key` itself when missing.
    #[must_use]
    pub fn or_key<'k>(self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        match self {
            Self::Active(text) | Self::Fallback(text) => text,
            Self::Missing => key,
        }
    }

    /// True when neither table had the key.
    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Result of walking one table.
enum Lookup<'a> {
    Text(&'a str),
    NotText,
    Absent,
}

/// String at `key`; any other value is a miss.
fn lookup_text<'a>(table: &'a LanguageTable, key: &str, separator: &str) -> Lookup<'a> {
    match table.lookup(key, separator) {
        Some(Value::String(text)) => Lookup::Text(text),
        Some(_) => Lookup::NotText,
        None => Lookup::Absent,
    }
}

/// List of strings at `key`, if every item is a string.
fn lookup_list<'a>(table: &'a LanguageTable, key: &str, separator: &str) -> Option<Vec<&'a str>> {
    let Some(Value::Array(items)) = table.lookup(key, separator) else {
        return None;
    };
    let texts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    if texts.len() != items.len() {
        tracing::warn!(
            "Translation list contains non-string entries: {key} ({})",
            table.language()
        );
    }
    Some(texts)
}

/// Resolves key paths against one active language.
///
/// Holds no state of its own: build one per pass from the current language.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    language: &'a str,
    separator: &'a str,
}

impl<'a> Resolver<'a> {
    /// Resolver for `language`, falling back to the catalog default.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, language: &'a str, separator: &'a str) -> Self {
        Self { catalog, language, separator }
    }

    /// Language tried first.
    #[must_use]
    pub const fn language(&self) -> &'a str {
        self.language
    }

    /// Catalog lookups go to.
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Resolve `key`: active table, then default table.
    ///
    /// A value that is not a string (list, object) counts as a miss.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Resolution<'a> {
        let active = self.catalog.table(self.language);
        let lookup = active.map_or(Lookup::Absent, |table| lookup_text(table, key, self.separator));
        match lookup {
            Lookup::Text(text) => return Resolution::Active(text),
            Lookup::NotText => {
                tracing::warn!(
                    "Translation key does not point to a string: {key} ({})",
                    self.language
                );
            }
            Lookup::Absent => {
                tracing::warn!("Translation key not found: {key} ({})", self.language);
            }
        }

        let default = self.catalog.default_table();
        if default.language() == self.language {
            return Resolution::Missing;
        }

        match lookup_text(default, key, self.separator) {
            Lookup::Text(text) => Resolution::Fallback(text),
            Lookup::NotText => {
                tracing::warn!(
                    "Translation key does not point to a string: {key} ({})",
                    default.language()
                );
                Resolution::Missing
            }
            Lookup::Absent => {
                tracing::warn!(
                    "Translation key not found in default language: {key} ({})",
                    default.language()
                );
                Resolution::Missing
            }
        }
    }

    /// Resolved text, or the key itself when nothing matches.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.resolve(key).or_key(key).to_string()
    }

    /// Resolved text with `{token}` placeholders substituted.
    ///
    /// A missing key is returned as-is, without substitution.
    #[must_use]
    #[allow(clippy::implicit_hasher)]
    pub fn text_with(&self, key: &str, replacements: &HashMap<&str, &str>) -> String {
        match self.resolve(key) {
            Resolution::Active(text) | Resolution::Fallback(text) => {
                interpolate(text, replacements)
            }
            Resolution::Missing => key.to_string(),
        }
    }

    /// String list at `key` (select options), active table first, then default.
    #[must_use]
    pub fn options(&self, key: &str) -> Option<Vec<&'a str>> {
        if let Some(list) = self
            .catalog
            .table(self.language)
            .and_then(|table| lookup_list(table, key, self.separator))
        {
            return Some(list);
        }

        tracing::warn!("Translation list not found: {key} ({})", self.language);
        let default = self.catalog.default_table();
        if default.language() == self.language {
            return None;
        }
        lookup_list(default, key, self.separator)
    }
}
