use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::{
    LanguageCode,
    is_well_formed_language_code,
};

/// A single invalid setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLanguages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    /// Error for the setting at `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failure to load or validate the site settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What to do when a language table diverges from the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MissingKeyPolicy {
    /// Log the divergence and fall back to the default language at lookup time.
    #[default]
    Fallback,
    /// Refuse to load a catalog whose tables diverge.
    Strict,
}

/// Contents of `.site-i18n.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub default_language: LanguageCode,
    pub supported_languages: Vec<LanguageCode>,

    /// Directory holding `<code>.json` tables.
    /// If unset, the tables compiled into the crate are used.
    pub locales_dir: Option<String>,

    pub key_separator: String,
    pub missing_keys: MissingKeyPolicy,

    /// Languages written right to left. Empty for the bundled set.
    pub rtl_languages: Vec<LanguageCode>,

    pub attributes: BindingAttributes,
    pub storage_keys: StorageKeys,
    pub elements: ElementIds,
    pub consent: ConsentSettings,

    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Attribute names making up the document binding contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BindingAttributes {
    pub key: String,
    pub options: String,
    pub placeholder: String,
    /// Selects `placeholder` or `value` as the write target on inputs.
    pub target: String,
    pub language_option: String,
}

impl Default for BindingAttributes {
    fn default() -> Self {
        Self {
            key: "data-i18n".to_string(),
            options: "data-i18n-options".to_string(),
            placeholder: "data-i18n-placeholder".to_string(),
            target: "data-i18n-target".to_string(),
            language_option: "data-lang".to_string(),
        }
    }
}

/// Keys used in the preference store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageKeys {
    pub language: String,
    pub theme: String,
    pub gdpr_accepted: String,
    pub cookie_preferences: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            language: "language".to_string(),
            theme: "theme".to_string(),
            gdpr_accepted: "gdprAccepted".to_string(),
            cookie_preferences: "cookiePreferences".to_string(),
        }
    }
}

/// Ids of singleton elements the glue code looks up.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub current_language: String,
    pub theme_toggle: String,
    /// Footer element showing the current year.
    pub year: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            current_language: "currentLang".to_string(),
            theme_toggle: "themeToggle".to_string(),
            year: "year".to_string(),
        }
    }
}

/// Timing of the consent prompts.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentSettings {
    /// Delay before the GDPR notice is shown.
    pub gdpr_delay_ms: u64,
    /// Delay before the cookie consent prompt is shown.
    pub cookie_delay_ms: u64,
}

impl Default for ConsentSettings {
    fn default() -> Self {
        Self { gdpr_delay_ms: 1000, cookie_delay_ms: 2000 }
    }
}

impl SiteSettings {
    /// # Errors
    /// - Required field is empty
    /// - Malformed or duplicated language code
    /// - Default language not supported
    /// - Invalid log filter
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.supported_languages.is_empty() {
            errors.push(ValidationError::new(
                "supportedLanguages",
                "At least one language is required. Example: [\"en\", \"de\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, code) in self.supported_languages.iter().enumerate() {
            if !is_well_formed_language_code(code.as_str()) {
                errors.push(ValidationError::new(
                    format!("supportedLanguages[{index}]"),
                    format!("Invalid language code '{code}'. Example: \"en\" or \"de-AT\""),
                ));
            }
            if !seen.insert(code.as_str()) {
                errors.push(ValidationError::new(
                    format!("supportedLanguages[{index}]"),
                    format!("Language '{code}' is listed more than once"),
                ));
            }
        }

        if self.default_language.as_str().is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The default language cannot be empty. Example: \"en\"",
            ));
        } else if !self.supported_languages.contains(&self.default_language) {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "Default language '{}' must be one of the supported languages",
                    self.default_language
                ),
            ));
        }

        if let Some(dir) = &self.locales_dir
            && dir.is_empty()
        {
            errors.push(ValidationError::new(
                "localesDir",
                "The directory cannot be empty. Please specify a path, or remove this field",
            ));
        }

        let attribute_fields = [
            ("attributes.key", &self.attributes.key),
            ("attributes.options", &self.attributes.options),
            ("attributes.placeholder", &self.attributes.placeholder),
            ("attributes.target", &self.attributes.target),
            ("attributes.languageOption", &self.attributes.language_option),
            ("elements.currentLanguage", &self.elements.current_language),
            ("elements.themeToggle", &self.elements.theme_toggle),
            ("elements.year", &self.elements.year),
        ];
        for (field_path, name) in attribute_fields {
            if name.is_empty() {
                errors.push(ValidationError::new(field_path, "The name cannot be empty"));
            }
        }

        let storage_fields = [
            ("storageKeys.language", &self.storage_keys.language),
            ("storageKeys.theme", &self.storage_keys.theme),
            ("storageKeys.gdprAccepted", &self.storage_keys.gdpr_accepted),
            ("storageKeys.cookiePreferences", &self.storage_keys.cookie_preferences),
        ];
        let mut seen_keys = HashSet::new();
        for (field_path, key) in storage_fields {
            if key.is_empty() {
                errors.push(ValidationError::new(field_path, "The storage key cannot be empty"));
            } else if !seen_keys.insert(key.as_str()) {
                errors.push(ValidationError::new(
                    field_path,
                    format!("Storage key '{key}' is already used by another preference"),
                ));
            }
        }

        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.log_level) {
            errors.push(ValidationError::new(
                "logLevel",
                format!("Invalid log filter '{}': {e}", self.log_level),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Returns true if the language is written right to left.
    #[must_use]
    pub fn is_rtl(&self, language: &LanguageCode) -> bool {
        self.rtl_languages.contains(language)
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::new("en"),
            supported_languages: vec![
                LanguageCode::new("en"),
                LanguageCode::new("de"),
                LanguageCode::new("fr"),
            ],
            locales_dir: None,
            key_separator: ".".to_string(),
            missing_keys: MissingKeyPolicy::default(),
            rtl_languages: Vec::new(),
            attributes: BindingAttributes::default(),
            storage_keys: StorageKeys::default(),
            elements: ElementIds::default(),
            consent: ConsentSettings::default(),
            log_level: "info".to_string(),
        }
    }
}
