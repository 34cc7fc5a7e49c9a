//! Translation store: per-language tables and their loading.
/// Tables compiled into the crate
mod bundled;
/// Default-table parity checks
pub mod parity;
/// Single language table
mod table;

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

pub use bundled::bundled_languages;
pub use parity::{
    ParityIssue,
    ParityIssueKind,
    ParityReport,
    check_parity,
};
pub use table::{
    LanguageTable,
    LeafShape,
};
use thiserror::Error;

use crate::config::{
    MissingKeyPolicy,
    SiteSettings,
};
use crate::types::LanguageCode;

/// Failure to load or accept the translation tables.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read translation file {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse translation table '{language}': {source}")]
    Parse { language: LanguageCode, source: serde_json::Error },

    #[error("Translation table '{language}' must be a JSON object at the top level")]
    NotAnObject { language: LanguageCode },

    #[error("No translation table for the default language '{0}'")]
    MissingDefault(LanguageCode),

    #[error("No bundled translation table for '{0}'. Set `localesDir` to load it from disk")]
    NotBundled(LanguageCode),

    #[error("Translation tables diverge from the default language:\n{0}")]
    Parity(ParityReport),
}

/// All language tables of the site.
///
/// The default table is held apart so lookups against it never fail.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_table: LanguageTable,
    others: BTreeMap<LanguageCode, LanguageTable>,
}

impl Catalog {
    /// # Errors
    /// Returns error if no table is given for `default_language`.
    pub fn new(
        default_language: &LanguageCode,
        tables: impl IntoIterator<Item = LanguageTable>,
    ) -> Result<Self, CatalogError> {
        let mut others: BTreeMap<LanguageCode, LanguageTable> =
            tables.into_iter().map(|table| (table.language().clone(), table)).collect();
        let default_table = others
            .remove(default_language)
            .ok_or_else(|| CatalogError::MissingDefault(default_language.clone()))?;
        Ok(Self { default_table, others })
    }

    /// Catalog of every bundled table with English as the default.
    ///
    /// # Errors
    /// Returns error if a bundled table fails to parse.
    pub fn bundled() -> Result<Self, CatalogError> {
        let tables = bundled_languages()
            .filter_map(bundled::bundled_table)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&LanguageCode::new("en"), tables)
    }

    /// Load `<dir>/<code>.json` for every language.
    ///
    /// # Errors
    /// Returns error if a file cannot be read or parsed.
    pub fn load_dir(
        dir: &Path,
        languages: &[LanguageCode],
        default_language: &LanguageCode,
    ) -> Result<Self, CatalogError> {
        let tables = languages
            .iter()
            .map(|code| LanguageTable::load_file(code.clone(), &dir.join(format!("{code}.json"))))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(default_language, tables)
    }

    /// Build the catalog described by the settings and apply the missing key policy.
    ///
    /// `locales_dir` overrides the bundled tables when set.
    ///
    /// # Errors
    /// - Table missing, unreadable or malformed
    /// - Tables diverge and the policy is `strict`
    pub fn from_settings(
        settings: &SiteSettings,
        locales_dir: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let catalog = if let Some(dir) = locales_dir {
            Self::load_dir(dir, &settings.supported_languages, &settings.default_language)?
        } else {
            let tables = settings
                .supported_languages
                .iter()
                .map(|code| {
                    bundled::bundled_table(code.as_str())
                        .unwrap_or_else(|| Err(CatalogError::NotBundled(code.clone())))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Self::new(&settings.default_language, tables)?
        };

        let report = check_parity(&catalog, &settings.key_separator);
        if !report.is_clean() {
            match settings.missing_keys {
                MissingKeyPolicy::Strict => return Err(CatalogError::Parity(report)),
                MissingKeyPolicy::Fallback => {
                    for issue in &report.issues {
                        tracing::warn!("Translation table divergence: {issue}");
                    }
                }
            }
        }

        tracing::debug!("Catalog ready with languages: {:?}", catalog.languages().collect::<Vec<_>>());
        Ok(catalog)
    }

    /// Language every lookup falls back to.
    #[must_use]
    pub const fn default_language(&self) -> &LanguageCode {
        self.default_table.language()
    }

    /// Table of the default language.
    #[must_use]
    pub const fn default_table(&self) -> &LanguageTable {
        &self.default_table
    }

    /// Table of `language`, the default one included.
    #[must_use]
    pub fn table(&self, language: &str) -> Option<&LanguageTable> {
        if self.default_table.language() == language {
            return Some(&self.default_table);
        }
        self.others.get(language)
    }

    /// Returns true if a table exists for the language.
    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        self.table(language).is_some()
    }

    /// The default language first, then the rest in code order.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.tables().map(LanguageTable::language)
    }

    /// All tables, default first.
    pub fn tables(&self) -> impl Iterator<Item = &LanguageTable> {
        std::iter::once(&self.default_table).chain(self.others.values())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn table(code: &str, value: serde_json::Value) -> LanguageTable {
        LanguageTable::from_value(LanguageCode::new(code), value).unwrap()
    }

    #[googletest::test]
    fn bundled_catalog_languages() {
        let catalog = Catalog::bundled().unwrap();

        let languages: Vec<&str> = catalog.languages().map(LanguageCode::as_str).collect();

        assert_eq!(languages, vec!["en", "de", "fr"]);
        expect_that!(catalog.default_language().as_str(), eq("en"));
        expect_that!(catalog.supports("de"), eq(true));
        expect_that!(catalog.supports("it"), eq(false));
    }

    #[rstest]
    fn new_requires_default_table() {
        let result = Catalog::new(&LanguageCode::new("en"), vec![table("de", json!({}))]);

        assert!(matches!(result, Err(CatalogError::MissingDefault(code)) if code == "en"));
    }

    #[rstest]
    fn from_settings_uses_bundled_subset() {
        let settings = SiteSettings {
            supported_languages: vec![LanguageCode::new("en"), LanguageCode::new("fr")],
            ..SiteSettings::default()
        };

        let catalog = Catalog::from_settings(&settings, None).unwrap();

        assert!(catalog.supports("fr"));
        assert!(!catalog.supports("de"));
    }

    #[rstest]
    fn from_settings_rejects_unbundled_language() {
        let settings = SiteSettings {
            supported_languages: vec![LanguageCode::new("en"), LanguageCode::new("it")],
            ..SiteSettings::default()
        };

        let result = Catalog::from_settings(&settings, None);

        assert!(matches!(result, Err(CatalogError::NotBundled(code)) if code == "it"));
    }

    #[rstest]
    fn from_settings_loads_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"nav": {"services": "Services"}}"#)
            .unwrap();
        fs::write(temp_dir.path().join("it.json"), r#"{"nav": {"services": "Servizi"}}"#)
            .unwrap();
        let settings = SiteSettings {
            supported_languages: vec![LanguageCode::new("en"), LanguageCode::new("it")],
            ..SiteSettings::default()
        };

        let catalog = Catalog::from_settings(&settings, Some(temp_dir.path())).unwrap();

        let value = catalog.table("it").and_then(|t| t.lookup("nav.services", "."));
        assert_eq!(value, Some(&json!("Servizi")));
    }

    #[rstest]
    fn from_settings_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), "{}").unwrap();
        let settings = SiteSettings {
            supported_languages: vec![LanguageCode::new("en"), LanguageCode::new("de")],
            ..SiteSettings::default()
        };

        let result = Catalog::from_settings(&settings, Some(temp_dir.path()));

        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[rstest]
    #[case::fallback(MissingKeyPolicy::Fallback, true)]
    #[case::strict(MissingKeyPolicy::Strict, false)]
    fn from_settings_applies_missing_key_policy(
        #[case] policy: MissingKeyPolicy,
        #[case] expect_ok: bool,
    ) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"nav": {"services": "Services"}}"#)
            .unwrap();
        fs::write(temp_dir.path().join("de.json"), r#"{"nav": {}}"#).unwrap();
        let settings = SiteSettings {
            supported_languages: vec![LanguageCode::new("en"), LanguageCode::new("de")],
            missing_keys: policy,
            ..SiteSettings::default()
        };

        let result = Catalog::from_settings(&settings, Some(temp_dir.path()));

        assert_eq!(result.is_ok(), expect_ok);
        if let Err(error) = result {
            assert!(matches!(error, CatalogError::Parity(ref report) if report.issues.len() == 1));
            assert!(error.to_string().contains("nav.services"));
        }
    }
}
