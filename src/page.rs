//! Per-page context shared by the language, theme and consent handlers.

use crate::catalog::Catalog;
use crate::config::SiteSettings;
use crate::dom::Document;
use crate::storage::PreferenceStore;

/// Everything a handler may read or write while reacting to a page event.
pub struct Page<'a> {
    pub catalog: &'a Catalog,
    pub settings: &'a SiteSettings,
    pub document: &'a mut dyn Document,
    pub store: &'a mut dyn PreferenceStore,
}

impl<'a> Page<'a> {
    /// Bundle the parts of one loaded page.
    #[must_use]
    pub fn new(
        catalog: &'a Catalog,
        settings: &'a SiteSettings,
        document: &'a mut dyn Document,
        store: &'a mut dyn PreferenceStore,
    ) -> Self {
        Self { catalog, settings, document, store }
    }
}

impl std::fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("catalog", &"<Catalog>")
            .field("settings", &self.settings)
            .field("document", &"<dyn Document>")
            .field("store", &"<dyn PreferenceStore>")
            .finish()
    }
}
