//! Light/dark theme toggle.

use crate::config::{
    ElementIds,
    StorageKeys,
};
use crate::dom::Document;
use crate::page::Page;
use crate::storage::{
    PreferenceStore,
    PreferenceStoreExt,
};

/// Body attribute the stylesheet keys on.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Bootstrap color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value of [`THEME_ATTRIBUTE`] and of the stored preference.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored or attribute value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle: the theme a click switches to.
    const fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "bi-moon-stars",
            Self::Dark => "bi-sun",
        }
    }

    /// Tooltip of the toggle: the theme a click switches to.
    const fn toggle_title(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }

    /// Stored theme if valid, else the system preference.
    #[must_use]
    pub fn preferred(store: &dyn PreferenceStore, keys: &StorageKeys, prefers_dark: bool) -> Self {
        if let Some(stored) = store.load_string(&keys.theme) {
            if let Some(theme) = Self::from_name(&stored) {
                return theme;
            }
            tracing::debug!("Ignoring unknown stored theme '{}'", stored);
        }
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// Theme currently set on `body`.
    #[must_use]
    pub fn current(document: &dyn Document) -> Option<Self> {
        let body = document.elements_with_tag("body").into_iter().next()?;
        document.attribute(body, THEME_ATTRIBUTE).and_then(Self::from_name)
    }
}

/// Set the theme on `body` and refresh the toggle button.
pub fn apply_theme(document: &mut dyn Document, elements: &ElementIds, theme: Theme) {
    if let Some(body) = document.elements_with_tag("body").into_iter().next() {
        document.set_attribute(body, THEME_ATTRIBUTE, theme.as_str());
    } else {
        tracing::debug!("No body element to apply theme '{}' to", theme.as_str());
    }

    if let Some(toggle) = document.element_by_id(&elements.theme_toggle) {
        document.set_attribute(toggle, "title", theme.toggle_title());
        document.remove_class(toggle, theme.toggled().icon_class());
        document.add_class(toggle, theme.icon_class());
    }
}

/// Flip the current theme and persist the new one.
pub fn toggle_theme(page: &mut Page<'_>) -> Theme {
    let next = Theme::current(&*page.document).unwrap_or(Theme::Light).toggled();
    apply_theme(page.document, &page.settings.elements, next);
    page.store.save_string(&page.settings.storage_keys.theme, next.as_str());
    next
}
