//! Language tables compiled into the crate.

use super::{
    CatalogError,
    LanguageTable,
};
use crate::types::LanguageCode;

/// (code, JSON source) for every bundled language. English comes first.
const BUNDLED: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("de", include_str!("../../locales/de.json")),
    ("fr", include_str!("../../locales/fr.json")),
];

/// Codes of the bundled languages.
pub fn bundled_languages() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|(code, _)| *code)
}

/// Parse one bundled table, or `None` if the language is not bundled.
pub fn bundled_table(language: &str) -> Option<Result<LanguageTable, CatalogError>> {
    BUNDLED
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(code, source)| LanguageTable::from_json_str(LanguageCode::new(*code), source))
}
