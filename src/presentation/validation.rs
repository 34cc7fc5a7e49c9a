//! Live feedback classes for form fields.
//!
//! Validity comes from the host (constraint validation in a browser); these
//! functions only move classes around.

use std::time::Duration;

use crate::dom::{
    Document,
    ElementId,
};
use crate::resolve::Resolver;

/// Field passes validation.
pub const VALID: &str = "is-valid";
/// Field fails validation.
pub const INVALID: &str = "is-invalid";
/// Attention animation on the first invalid field.
pub const SHAKE: &str = "shake-invalid";
/// Set on the form at its first submit.
pub const WAS_VALIDATED: &str = "was-validated";
/// Set on the form after an accepted submit.
pub const FORM_SUCCESS: &str = "form-success";

/// How long the shake class should stay before [`clear_shake`].
pub const SHAKE_DURATION: Duration = Duration::from_millis(600);

/// Key of the message shown after a successful submit.
pub const SUCCESS_MESSAGE_KEY: &str = "contact.form.success";

/// Values this short are not flagged invalid while the visitor is typing.
const MIN_LENGTH_FOR_LIVE_ERRORS: usize = 3;

/// A field changed.
pub fn on_input(document: &mut dyn Document, field: ElementId, value: &str, valid: bool) {
    if valid {
        document.add_class(field, VALID);
        document.remove_class(field, INVALID);
        document.remove_class(field, SHAKE);
    } else if value.chars().count() > MIN_LENGTH_FOR_LIVE_ERRORS {
        document.add_class(field, INVALID);
        document.remove_class(field, VALID);
    }
}

/// A field lost focus.
pub fn on_blur(document: &mut dyn Document, field: ElementId, value: &str, valid: bool) {
    if value.is_empty() {
        document.remove_class(field, VALID);
        document.remove_class(field, INVALID);
        document.remove_class(field, SHAKE);
    } else if !valid {
        document.add_class(field, INVALID);
        document.remove_class(field, VALID);
    }
}

/// Result of [`on_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submission blocked; the first invalid field was marked to shake.
    ///
    /// The host calls [`clear_shake`] once `shake_for` has passed.
    Rejected { first_invalid: Option<ElementId>, shake_for: Duration },
    Accepted { message: String },
}

/// The form was submitted.
///
/// `invalid_fields` lists the fields failing validation in document order.
pub fn on_submit(
    document: &mut dyn Document,
    form: ElementId,
    invalid_fields: &[ElementId],
    resolver: &Resolver<'_>,
) -> SubmitOutcome {
    document.add_class(form, WAS_VALIDATED);

    if let Some(&first) = invalid_fields.first() {
        document.add_class(first, SHAKE);
        return SubmitOutcome::Rejected { first_invalid: Some(first), shake_for: SHAKE_DURATION };
    }

    document.add_class(form, FORM_SUCCESS);
    SubmitOutcome::Accepted { message: resolver.text(SUCCESS_MESSAGE_KEY) }
}

/// End of the animation started by [`on_submit`].
pub fn clear_shake(document: &mut dyn Document, field: ElementId) {
    document.remove_class(field, SHAKE);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::catalog::Catalog;
    use crate::dom::MemoryDocument;

    fn field() -> (MemoryDocument, ElementId) {
        let mut doc = MemoryDocument::new();
        let input = doc.append_with("input", &[("type", "email")]);
        (doc, input)
    }

    #[rstest]
    #[case::short_value_stays_neutral("abc", false, &[])]
    #[case::longer_value_is_flagged("abcd", false, &[INVALID])]
    #[case::valid_value("a@b.c", true, &[VALID])]
    fn input_feedback(#[case] value: &str, #[case] valid: bool, #[case] expected: &[&str]) {
        let (mut doc, input) = field();

        on_input(&mut doc, input, value, valid);

        assert_eq!(doc.classes(input), expected);
    }

    #[rstest]
    fn becoming_valid_clears_error_and_shake() {
        let (mut doc, input) = field();
        on_input(&mut doc, input, "not-an-email", false);
        doc.add_class(input, SHAKE);

        on_input(&mut doc, input, "me@example.com", true);

        assert_eq!(doc.classes(input), [VALID].as_slice());
    }

    #[rstest]
    fn blur_on_empty_field_resets_state() {
        let (mut doc, input) = field();
        on_input(&mut doc, input, "me@example.com", true);

        on_blur(&mut doc, input, "", false);

        assert!(doc.classes(input).is_empty());
    }

    #[rstest]
    fn blur_flags_short_invalid_value() {
        let (mut doc, input) = field();
        on_input(&mut doc, input, "ab", false);

        on_blur(&mut doc, input, "ab", false);

        assert_eq!(doc.classes(input), [INVALID].as_slice());
    }

    #[googletest::test]
    fn rejected_submit_shakes_first_invalid_field() {
        let catalog = Catalog::bundled().unwrap();
        let mut doc = MemoryDocument::new();
        let form = doc.append("form");
        let name = doc.append("input");
        let email = doc.append("input");

        let outcome = on_submit(&mut doc, form, &[name, email], &Resolver::new(&catalog, "en", "."));

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected { first_invalid: Some(name), shake_for: Duration::from_millis(600) }
        );
        expect_that!(doc.has_class(name, SHAKE), eq(true));
        expect_that!(doc.has_class(email, SHAKE), eq(false));
        expect_that!(doc.has_class(form, WAS_VALIDATED), eq(true));

        clear_shake(&mut doc, name);
        expect_that!(doc.has_class(name, SHAKE), eq(false));
    }

    #[googletest::test]
    fn accepted_submit_returns_localized_message() {
        let catalog = Catalog::bundled().unwrap();
        let mut doc = MemoryDocument::new();
        let form = doc.append("form");

        let resolver = Resolver::new(&catalog, "de", ".");

        let outcome = on_submit(&mut doc, form, &[], &resolver);

        let message = resolver.text(SUCCESS_MESSAGE_KEY);
        expect_that!(message.as_str(), not(eq(SUCCESS_MESSAGE_KEY)));
        assert_eq!(outcome, SubmitOutcome::Accepted { message });
        expect_that!(doc.has_class(form, FORM_SUCCESS), eq(true));
        expect_that!(doc.has_class(form, WAS_VALIDATED), eq(true));
    }
}
