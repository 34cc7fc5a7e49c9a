//! Entry point: checks the translation tables of a site.
//!
//! Usage: `site-i18n [SITE_ROOT]`

use std::path::PathBuf;
use std::process::ExitCode;

use site_i18n::catalog::{
    Catalog,
    CatalogError,
    check_parity,
};
use site_i18n::config::ConfigManager;
use site_i18n::logging;

/// Check the translation tables of the site given on the command line.
fn main() -> ExitCode {
    let site_root = std::env::args_os().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);

    let mut config_manager = ConfigManager::new();
    let loaded = config_manager.load_settings(Some(site_root));
    let settings = config_manager.get_settings();
    let _guard = logging::init(&settings.log_level);

    if let Err(e) = loaded {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    match Catalog::from_settings(settings, config_manager.locales_dir()) {
        Ok(catalog) => {
            let report = check_parity(&catalog, &settings.key_separator);
            let languages = catalog.languages().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            if report.is_clean() {
                tracing::info!("Translation tables consistent: {languages}");
            } else {
                tracing::warn!(
                    "{} divergences across {languages}; missing keys fall back to '{}'",
                    report.issues.len(),
                    catalog.default_language()
                );
            }
            ExitCode::SUCCESS
        }
        Err(CatalogError::Parity(report)) => {
            for issue in &report.issues {
                tracing::error!("{issue}");
            }
            tracing::error!("{} divergences with missingKeys set to strict", report.issues.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
