//! Active language state and switching.

use super::events::{
    LanguageChanged,
    LanguageEvents,
};
use crate::catalog::Catalog;
use crate::config::SiteSettings;
use crate::dom::{
    BindReport,
    Document,
    ElementId,
    apply_translations,
};
use crate::page::Page;
use crate::resolve::Resolver;
use crate::storage::{
    PreferenceStore,
    PreferenceStoreExt,
};
use crate::types::{
    LanguageCode,
    TextDirection,
    primary_subtag,
};

/// Result of a switch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched { from: LanguageCode, to: LanguageCode },
    /// Already the active language; nothing was written.
    Unchanged,
    Unsupported,
}

/// Owns the active language of a page.
#[derive(Debug)]
pub struct LanguageManager {
    current: LanguageCode,
    events: LanguageEvents,
}

impl LanguageManager {
    /// Manager with `language` active and no listeners.
    #[must_use]
    pub fn new(language: LanguageCode) -> Self {
        Self { current: language, events: LanguageEvents::new() }
    }

    /// Pick the starting language.
    ///
    /// A stored choice wins, then the primary subtag of the browser language,
    /// then the catalog default. Unsupported candidates are skipped.
    #[must_use]
    pub fn detect(
        catalog: &Catalog,
        settings: &SiteSettings,
        store: &dyn PreferenceStore,
        browser_language: Option<&str>,
    ) -> LanguageCode {
        if let Some(stored) = store.load_string(&settings.storage_keys.language) {
            if catalog.supports(&stored) {
                return LanguageCode::new(stored);
            }
            tracing::debug!("Ignoring unsupported stored language '{}'", stored);
        }

        if let Some(browser) = browser_language.map(primary_subtag)
            && catalog.supports(browser)
        {
            return LanguageCode::new(browser);
        }

        catalog.default_language().clone()
    }

    /// Detect the starting language and render the page in it.
    pub fn initialize(page: &mut Page<'_>, browser_language: Option<&str>) -> Self {
        let language = Self::detect(page.catalog, page.settings, &*page.store, browser_language);
        tracing::debug!("Initial language: {}", language);
        let manager = Self::new(language);
        manager.render(page);
        manager
    }

    /// Active language.
    #[must_use]
    pub const fn current(&self) -> &LanguageCode {
        &self.current
    }

    /// Change notifications of this manager.
    #[must_use]
    pub const fn events(&self) -> &LanguageEvents {
        &self.events
    }

    /// Listen for [`LanguageChanged`].
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    /// Resolver bound to the active language.
    #[must_use]
    pub fn resolver<'a>(&'a self, catalog: &'a Catalog, settings: &'a SiteSettings) -> Resolver<'a> {
        Resolver::new(catalog, self.current.as_str(), &settings.key_separator)
    }

    /// Direction of the active language.
    #[must_use]
    pub fn text_direction(&self, settings: &SiteSettings) -> TextDirection {
        if settings.is_rtl(&self.current) { TextDirection::Rtl } else { TextDirection::Ltr }
    }

    /// Bring the whole page in line with the active language.
    pub fn render(&self, page: &mut Page<'_>) -> BindReport {
        let settings = page.settings;
        self.update_display(page.document, settings);

        let resolver = self.resolver(page.catalog, settings);
        let report = apply_translations(page.document, &resolver, &settings.attributes);

        page.document.set_document_attribute("lang", self.current.as_str());
        page.document.set_document_attribute("dir", self.text_direction(settings).as_str());
        report
    }

    /// Switch to `requested` if it is supported and not already active.
    ///
    /// A switch persists the choice, re-renders the page and notifies
    /// listeners. Any other outcome leaves store, page and listeners untouched.
    pub fn switch_language(&mut self, requested: &str, page: &mut Page<'_>) -> SwitchOutcome {
        if !page.catalog.supports(requested) {
            tracing::debug!("Language '{}' is not supported", requested);
            return SwitchOutcome::Unsupported;
        }
        if self.current == requested {
            return SwitchOutcome::Unchanged;
        }

        let previous = std::mem::replace(&mut self.current, LanguageCode::new(requested));
        if !page.store.save_string(&page.settings.storage_keys.language, requested) {
            tracing::warn!("Language '{}' is active but was not persisted", requested);
        }
        self.render(page);

        let reached = self.events.publish(LanguageChanged {
            language: self.current.clone(),
            previous: previous.clone(),
        });
        tracing::debug!("Switched language {} -> {} ({} listeners)", previous, self.current, reached);

        SwitchOutcome::Switched { from: previous, to: self.current.clone() }
    }

    /// Click on a language option element.
    pub fn handle_option_click(&mut self, element: ElementId, page: &mut Page<'_>) -> SwitchOutcome {
        let requested = page
            .document
            .attribute(element, &page.settings.attributes.language_option)
            .map(str::to_string);
        let Some(requested) = requested else {
            tracing::debug!("Clicked element {:?} names no language", element);
            return SwitchOutcome::Unsupported;
        };
        self.switch_language(&requested, page)
    }

    /// Current language label and active dropdown option.
    fn update_display(&self, document: &mut dyn Document, settings: &SiteSettings) {
        if let Some(label) = document.element_by_id(&settings.elements.current_language) {
            document.set_text_content(label, &self.current.display_label());
        }

        let attribute = &settings.attributes.language_option;
        for option in document.elements_with_attribute(attribute) {
            let is_current = document.attribute(option, attribute) == Some(self.current.as_str());
            if is_current {
                document.add_class(option, "active");
            } else {
                document.remove_class(option, "active");
            }
        }
    }
}
