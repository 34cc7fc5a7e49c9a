use std::time::Duration;

use super::preferences::{
    ConsentChoice,
    CookiePreferences,
};
use super::state::{
    ConsentState,
    PromptKind,
};
use crate::resolve::Resolver;

/// How long the "preferences saved" confirmation stays up.
pub const SAVED_NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// Localized texts of a consent prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentPrompt {
    pub kind: PromptKind,
    pub header: String,
    pub message: String,
    /// Labels of the optional and required categories, cookies prompt only.
    pub categories: Vec<String>,
    /// Button labels, primary action first.
    pub actions: Vec<String>,
    /// Initial state of the analytics and marketing toggles.
    pub choice: ConsentChoice,
}

impl ConsentPrompt {
    /// GDPR notice texts.
    #[must_use]
    pub fn gdpr(resolver: &Resolver<'_>) -> Self {
        Self {
            kind: PromptKind::Gdpr,
            header: resolver.text("gdpr.header"),
            message: resolver.text("gdpr.message"),
            categories: Vec::new(),
            actions: vec![resolver.text("gdpr.accept"), resolver.text("gdpr.learn_more")],
            choice: ConsentChoice::default(),
        }
    }

    /// Cookie prompt with the toggles set from the stored record, if any.
    #[must_use]
    pub fn cookies(resolver: &Resolver<'_>, current: Option<&CookiePreferences>) -> Self {
        Self {
            kind: PromptKind::Cookies,
            header: resolver.text("cookies.header"),
            message: resolver.text("cookies.message"),
            categories: ["cookies.necessary", "cookies.analytics", "cookies.marketing"]
                .into_iter()
                .map(|key| resolver.text(key))
                .collect(),
            actions: vec![resolver.text("cookies.accept_all"), resolver.text("cookies.save_preferences")],
            choice: current.map(CookiePreferences::choice).unwrap_or_default(),
        }
    }

    /// Prompt for `kind`; the cookie prompt starts from the stored choice.
    #[must_use]
    pub fn for_kind(kind: PromptKind, resolver: &Resolver<'_>, state: &ConsentState) -> Self {
        match kind {
            PromptKind::Gdpr => Self::gdpr(resolver),
            PromptKind::Cookies => Self::cookies(resolver, state.cookie_preferences.as_ref()),
        }
    }
}

/// Short-lived confirmation shown after a consent decision was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentNotice {
    pub message: String,
    pub duration: Duration,
}

impl ConsentNotice {
    /// Confirmation after cookie preferences were stored.
    #[must_use]
    pub fn saved(resolver: &Resolver<'_>) -> Self {
        Self { message: resolver.text("cookies.saved"), duration: SAVED_NOTICE_DURATION }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{
        TimeZone,
        Utc,
    };
    use googletest::prelude::*;

    use super::*;
    use crate::catalog::Catalog;

    #[googletest::test]
    fn gdpr_prompt_in_english() {
        let catalog = Catalog::bundled().unwrap();
        let prompt = ConsentPrompt::gdpr(&Resolver::new(&catalog, "en", "."));

        expect_that!(prompt.header, eq("GDPR Notice"));
        expect_that!(prompt.actions, elements_are![eq("I Understand"), eq("Learn More")]);
        expect_that!(prompt.categories, len(eq(0)));
    }

    #[googletest::test]
    fn every_bundled_language_has_complete_cookie_prompt() {
        let catalog = Catalog::bundled().unwrap();
        for language in catalog.languages() {
            let prompt = ConsentPrompt::for_kind(
                PromptKind::Cookies,
                &Resolver::new(&catalog, language.as_str(), "."),
                &ConsentState::default(),
            );

            expect_that!(prompt.categories, len(eq(3)));
            for text in prompt.categories.iter().chain(&prompt.actions).chain([&prompt.header]) {
                expect_that!(text.as_str(), not(starts_with("cookies.")));
            }
        }
    }

    #[googletest::test]
    fn cookie_prompt_starts_from_stored_choice() {
        let catalog = Catalog::bundled().unwrap();
        let resolver = Resolver::new(&catalog, "en", ".");
        let accepted_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let state = ConsentState {
            gdpr_accepted: true,
            cookie_preferences: Some(CookiePreferences::from_choice(
                ConsentChoice { analytics: false, marketing: true },
                accepted_at,
            )),
        };

        let stored = ConsentPrompt::for_kind(PromptKind::Cookies, &resolver, &state);
        let fresh = ConsentPrompt::cookies(&resolver, None);

        expect_that!(stored.choice, eq(ConsentChoice { analytics: false, marketing: true }));
        expect_that!(fresh.choice, eq(ConsentChoice::default()));
    }

    #[googletest::test]
    fn saved_notice_is_localized() {
        let catalog = Catalog::bundled().unwrap();

        let english = ConsentNotice::saved(&Resolver::new(&catalog, "en", "."));
        let german = ConsentNotice::saved(&Resolver::new(&catalog, "de", "."));

        expect_that!(english.message, eq("Your preferences have been saved"));
        expect_that!(german.message, eq("Ihre Einstellungen wurden gespeichert"));
        expect_that!(english.duration, eq(Duration::from_millis(3000)));
    }
}
