//! One-time page setup: the footer year and init-once markers for Bootstrap
//! widgets.

use chrono::{
    DateTime,
    Datelike,
    Utc,
};

use crate::config::ElementIds;
use crate::dom::{
    Document,
    ElementId,
};

/// Set on a `.modal` once its widget exists.
pub const MODAL_INITIALIZED: &str = "data-bs-modal-initialized";
/// Set on a modal trigger once its click handler is wired.
pub const MODAL_TRIGGER_INITIALIZED: &str = "data-bs-modal-trigger-initialized";
/// Set on a toast once its widget exists.
pub const TOAST_INITIALIZED: &str = "data-bs-toast-initialized";

/// Write the year of `today` into the footer. Returns false without a footer.
pub fn set_footer_year(document: &mut dyn Document, elements: &ElementIds, today: DateTime<Utc>) -> bool {
    let Some(year) = document.element_by_id(&elements.year) else {
        return false;
    };
    document.set_text_content(year, &today.year().to_string());
    true
}

/// Set `marker` on `element`.
///
/// Returns true the first time, false if the element was already initialized.
pub fn mark_initialized(document: &mut dyn Document, element: ElementId, marker: &str) -> bool {
    if document.attribute(element, marker).is_some() {
        return false;
    }
    document.set_attribute(element, marker, "true");
    true
}

/// `.modal` elements not yet initialized, marked as initialized.
pub fn claim_modals(document: &mut dyn Document) -> Vec<ElementId> {
    let modals = document.elements_with_class("modal");
    modals.into_iter().filter(|&modal| mark_initialized(document, modal, MODAL_INITIALIZED)).collect()
}

/// `data-bs-toggle="modal"` triggers not yet wired, marked as wired.
pub fn claim_modal_triggers(document: &mut dyn Document) -> Vec<ElementId> {
    let triggers: Vec<_> = document
        .elements_with_attribute("data-bs-toggle")
        .into_iter()
        .filter(|&trigger| document.attribute(trigger, "data-bs-toggle") == Some("modal"))
        .collect();
    triggers
        .into_iter()
        .filter(|&trigger| mark_initialized(document, trigger, MODAL_TRIGGER_INITIALIZED))
        .collect()
}
