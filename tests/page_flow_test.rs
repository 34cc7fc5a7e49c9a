//! ページ読み込みから言語切り替え、同意までの一連の流れに関するテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::time::Duration;

use chrono::{
    TimeZone,
    Utc,
};
use site_i18n::catalog::Catalog;
use site_i18n::config::{
    ConfigManager,
    SiteSettings,
};
use site_i18n::consent::{
    ConsentChoice,
    ConsentPrompt,
    ConsentState,
    PromptKind,
};
use site_i18n::dom::{
    Document,
    ElementId,
    MemoryDocument,
};
use site_i18n::language::{
    LanguageChanged,
    LanguageManager,
    SwitchOutcome,
};
use site_i18n::page::Page;
use site_i18n::storage::FileStore;
use site_i18n::theme::{
    Theme,
    apply_theme,
};
use site_i18n::types::LanguageCode;

struct Landing {
    doc: MemoryDocument,
    options: Vec<ElementId>,
    services: ElementId,
    topics: ElementId,
    name: ElementId,
}

fn landing_page() -> Landing {
    let mut doc = MemoryDocument::new();
    doc.append("body");
    doc.append_with("span", &[("id", "currentLang")]);
    let options = ["en", "de", "fr"]
        .into_iter()
        .map(|code| doc.append_with("a", &[("class", "dropdown-item"), ("data-lang", code)]))
        .collect();
    doc.append_with("button", &[("id", "themeToggle")]);
    let services = doc.append_with("a", &[("class", "nav-link"), ("data-i18n", "nav.services")]);
    let name = doc.append_with(
        "input",
        &[("data-i18n", "contact.form.name"), ("data-i18n-target", "placeholder")],
    );
    let topics = doc.append_with(
        "select",
        &[
            ("data-i18n-options", "contact.form.topics"),
            ("data-i18n-placeholder", "contact.form.topic_placeholder"),
        ],
    );
    Landing { doc, options, services, topics, name }
}

fn load_settings(site_root: &std::path::Path) -> SiteSettings {
    std::fs::write(site_root.join(".site-i18n.json"), r#"{ "consent": { "gdprDelayMs": 500 } }"#)
        .unwrap();
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(site_root.to_path_buf())).unwrap();
    manager.get_settings().clone()
}

#[tokio::test]
async fn visitor_switches_language_and_consents() {
    let site = tempfile::tempdir().unwrap();
    let settings = load_settings(site.path());
    let catalog = Catalog::from_settings(&settings, None).unwrap();
    let mut store = FileStore::in_dir(site.path());
    let mut landing = landing_page();

    // First visit: nothing stored, Swiss German browser.
    let mut language = LanguageManager::initialize(
        &mut Page::new(&catalog, &settings, &mut landing.doc, &mut store),
        Some("de-CH"),
    );
    assert_eq!(language.current().as_str(), "de");
    assert_eq!(landing.doc.text_content(landing.services), Some("Leistungen"));
    assert_eq!(landing.doc.attribute(landing.name, "placeholder"), Some("Name"));
    assert_eq!(landing.doc.options(landing.topics).len(), 5);

    let theme = Theme::preferred(&store, &settings.storage_keys, true);
    apply_theme(&mut landing.doc, &settings.elements, theme);
    assert_eq!(Theme::current(&landing.doc), Some(Theme::Dark));

    let consent = ConsentState::load(&store, &settings.storage_keys);
    let prompts = consent.pending_prompts(&settings.consent);
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].delay, Duration::from_millis(500));
    let gdpr = ConsentPrompt::for_kind(prompts[0].kind, &language.resolver(&catalog, &settings), &consent);
    assert_eq!(gdpr.header, "DSGVO-Hinweis");

    // Pick a topic, then switch to French from the dropdown.
    assert!(landing.doc.select_value(landing.topics, "1"));
    let mut receiver = language.subscribe();
    let listener = tokio::spawn(async move { receiver.recv().await.unwrap() });

    let french = landing.options[2];
    let outcome = language
        .handle_option_click(french, &mut Page::new(&catalog, &settings, &mut landing.doc, &mut store));

    assert_eq!(
        outcome,
        SwitchOutcome::Switched { from: LanguageCode::new("de"), to: LanguageCode::new("fr") }
    );
    assert_eq!(
        listener.await.unwrap(),
        LanguageChanged { language: LanguageCode::new("fr"), previous: LanguageCode::new("de") }
    );
    assert_eq!(landing.doc.document_attribute("lang"), Some("fr"));
    assert_eq!(landing.doc.attribute(landing.name, "placeholder"), Some("Nom"));
    assert_eq!(landing.doc.selected_value(landing.topics), Some("1"));
    assert_eq!(landing.doc.options(landing.topics)[2].label, "IA");

    // Consent.
    let mut consent = consent;
    assert!(consent.accept_gdpr(&mut store, &settings.storage_keys));
    let enabled = consent
        .save_cookie_preferences(
            &mut store,
            &settings.storage_keys,
            ConsentChoice { analytics: true, marketing: false },
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
        .unwrap();
    assert_eq!(enabled.names(), vec!["analytics"]);

    // Second visit: everything comes back from the store.
    let mut store = FileStore::in_dir(site.path());
    let mut revisit = landing_page();
    let language = LanguageManager::initialize(
        &mut Page::new(&catalog, &settings, &mut revisit.doc, &mut store),
        Some("de-CH"),
    );

    assert_eq!(language.current().as_str(), "fr");
    assert!(revisit.doc.has_class(revisit.options[2], "active"));
    let consent = ConsentState::load(&store, &settings.storage_keys);
    assert!(consent.pending_prompts(&settings.consent).is_empty());
    let preferences = consent.cookie_preferences.as_ref().unwrap();
    assert!(preferences.necessary);
    assert_eq!(preferences.accepted_at.as_deref(), Some("2024-05-01T12:00:00.000Z"));
    assert_eq!(prompts[1].kind, PromptKind::Cookies);

    // "Manage Cookies" reopens the prompt with the stored choice.
    let reopened = ConsentState::manage_cookies();
    let cookies =
        ConsentPrompt::for_kind(reopened.kind, &language.resolver(&catalog, &settings), &consent);
    assert_eq!(cookies.choice, ConsentChoice { analytics: true, marketing: false });
    assert_eq!(cookies.header, "Avis de confidentialité");
}
