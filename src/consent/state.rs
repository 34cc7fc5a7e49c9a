use std::time::Duration;

use chrono::{
    DateTime,
    Utc,
};

use super::preferences::{
    ConsentChoice,
    CookiePreferences,
    EnabledCategories,
};
use crate::config::{
    ConsentSettings,
    StorageKeys,
};
use crate::storage::{
    PreferenceStore,
    PreferenceStoreExt,
};

/// Which consent prompt to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Gdpr,
    Cookies,
}

/// A prompt to show once `delay` has elapsed after page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPrompt {
    pub kind: PromptKind,
    pub delay: Duration,
}

/// What the visitor has agreed to so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsentState {
    pub gdpr_accepted: bool,
    pub cookie_preferences: Option<CookiePreferences>,
}

impl ConsentState {
    /// Read both flags; unreadable or corrupt values count as absent.
    #[must_use]
    pub fn load(store: &dyn PreferenceStore, keys: &StorageKeys) -> Self {
        Self {
            gdpr_accepted: store.load_json(&keys.gdpr_accepted).unwrap_or(false),
            cookie_preferences: store.load_json(&keys.cookie_preferences),
        }
    }

    /// Prompts still owed to the visitor, GDPR first.
    #[must_use]
    pub fn pending_prompts(&self, settings: &ConsentSettings) -> Vec<PendingPrompt> {
        let mut prompts = Vec::new();
        if !self.gdpr_accepted {
            prompts.push(PendingPrompt {
                kind: PromptKind::Gdpr,
                delay: Duration::from_millis(settings.gdpr_delay_ms),
            });
        }
        if self.cookie_preferences.is_none() {
            prompts.push(PendingPrompt {
                kind: PromptKind::Cookies,
                delay: Duration::from_millis(settings.cookie_delay_ms),
            });
        }
        prompts
    }

    /// Cookie prompt requested from the "Manage Cookies" button: shown at once,
    /// whether or not a record exists.
    #[must_use]
    pub const fn manage_cookies() -> PendingPrompt {
        PendingPrompt { kind: PromptKind::Cookies, delay: Duration::ZERO }
    }

    /// Returns `true` if the acceptance was persisted.
    pub fn accept_gdpr(&mut self, store: &mut dyn PreferenceStore, keys: &StorageKeys) -> bool {
        let persisted = store.save_json(&keys.gdpr_accepted, &true);
        if persisted {
            self.gdpr_accepted = true;
        }
        persisted
    }

    /// Persist `choice` and return the categories to activate.
    ///
    /// Returns `None` if the record could not be written; the state is then
    /// left as it was.
    pub fn save_cookie_preferences(
        &mut self,
        store: &mut dyn PreferenceStore,
        keys: &StorageKeys,
        choice: ConsentChoice,
        now: DateTime<Utc>,
    ) -> Option<EnabledCategories> {
        let preferences = CookiePreferences::from_choice(choice, now);
        if !store.save_json(&keys.cookie_preferences, &preferences) {
            return None;
        }
        let enabled = EnabledCategories::from_preferences(Some(&preferences));
        self.cookie_preferences = Some(preferences);
        Some(enabled)
    }

    /// [`Self::save_cookie_preferences`] with every category granted.
    pub fn accept_all(
        &mut self,
        store: &mut dyn PreferenceStore,
        keys: &StorageKeys,
        now: DateTime<Utc>,
    ) -> Option<EnabledCategories> {
        self.save_cookie_preferences(store, keys, ConsentChoice::ALL, now)
    }

    /// Categories granted by the stored record.
    #[must_use]
    pub fn enabled_categories(&self) -> EnabledCategories {
        EnabledCategories::from_preferences(self.cookie_preferences.as_ref())
    }
}
