//! Writes resolved translations into a [`Document`].
//!
//! Binding is split in two: [`plan_bindings`] reads the document and resolves
//! every key without touching it, [`apply_bindings`] performs the writes.

use super::{
    Document,
    ElementId,
    SelectOption,
};
use crate::config::BindingAttributes;
use crate::resolve::Resolver;

/// Where a resolved string is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    Text,
    /// `alt` of an image.
    Alt,
    /// `placeholder` of an input.
    Placeholder,
    /// `value` of an input.
    Value,
}

impl BindingTarget {
    /// Pick the target for an element carrying a translation key.
    ///
    /// Inputs are flagged through the target attribute; the overloaded `type`
    /// attribute (`type="placeholder"`) is honored as well.
    #[must_use]
    pub fn for_element(
        document: &dyn Document,
        element: ElementId,
        attributes: &BindingAttributes,
    ) -> Self {
        match document.tag_name(element) {
            Some("img") => Self::Alt,
            Some("input") => {
                let flag = document
                    .attribute(element, &attributes.target)
                    .or_else(|| document.attribute(element, "type"));
                match flag {
                    Some("placeholder") => Self::Placeholder,
                    Some("value") => Self::Value,
                    _ => Self::Text,
                }
            }
            _ => Self::Text,
        }
    }

    /// Attribute written for this target, `None` for text content.
    #[must_use]
    pub const fn attribute_name(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Alt => Some("alt"),
            Self::Placeholder => Some("placeholder"),
            Self::Value => Some("value"),
        }
    }
}

/// A single pending write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedBinding {
    Text { element: ElementId, target: BindingTarget, text: String },
    /// Complete replacement option list, placeholder included.
    Options { element: ElementId, options: Vec<SelectOption> },
}

/// Counts from one translation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindReport {
    pub texts: usize,
    pub option_lists: usize,
    /// Selects whose previous choice survived the rebuild.
    pub restored_selections: usize,
}

/// Resolve every binding in the document without mutating it.
#[must_use]
pub fn plan_bindings(
    document: &dyn Document,
    resolver: &Resolver<'_>,
    attributes: &BindingAttributes,
) -> Vec<PlannedBinding> {
    let mut plan = Vec::new();

    for element in document.elements_with_attribute(&attributes.key) {
        let Some(key) = document.attribute(element, &attributes.key) else {
            continue;
        };
        plan.push(PlannedBinding::Text {
            element,
            target: BindingTarget::for_element(document, element, attributes),
            text: resolver.text(key),
        });
    }

    for element in document.elements_with_attribute(&attributes.options) {
        if document.tag_name(element) != Some("select") {
            tracing::debug!("Ignoring options binding on non-select element {:?}", element);
            continue;
        }
        let Some(key) = document.attribute(element, &attributes.options) else {
            continue;
        };
        let Some(labels) = resolver.options(key) else {
            continue;
        };

        let placeholder = document
            .attribute(element, &attributes.placeholder)
            .map(|placeholder_key| SelectOption::new("", resolver.text(placeholder_key)));
        let options = placeholder
            .into_iter()
            .chain(
                labels
                    .into_iter()
                    .enumerate()
                    .map(|(index, label)| SelectOption::new(index.to_string(), label)),
            )
            .collect();

        plan.push(PlannedBinding::Options { element, options });
    }

    plan
}

/// Perform the writes of a plan.
pub fn apply_bindings(document: &mut dyn Document, plan: Vec<PlannedBinding>) -> BindReport {
    let mut report = BindReport::default();

    for binding in plan {
        match binding {
            PlannedBinding::Text { element, target, text } => {
                match target.attribute_name() {
                    Some(name) => document.set_attribute(element, name, &text),
                    None => document.set_text_content(element, &text),
                }
                report.texts += 1;
            }
            PlannedBinding::Options { element, options } => {
                let previous = document.selected_value(element).map(str::to_string);
                document.replace_options(element, options);
                if let Some(previous) = previous.filter(|value| !value.is_empty())
                    && document.select_value(element, &previous)
                {
                    report.restored_selections += 1;
                }
                report.option_lists += 1;
            }
        }
    }

    report
}

/// One full translation pass: plan, then apply.
pub fn apply_translations(
    document: &mut dyn Document,
    resolver: &Resolver<'_>,
    attributes: &BindingAttributes,
) -> BindReport {
    let plan = plan_bindings(&*document, resolver, attributes);
    let report = apply_bindings(document, plan);
    tracing::debug!("Applied translations for '{}': {:?}", resolver.language(), report);
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::catalog::Catalog;
    use crate::dom::MemoryDocument;
    use crate::test_utils::catalog_from_json;

    #[fixture]
    fn catalog() -> Catalog {
        catalog_from_json(&[
            (
                "en",
                json!({
                    "nav": { "services": "Services" },
                    "hero": { "image_alt": "Team at work" },
                    "contact": {
                        "form": {
                            "name": "Name",
                            "submit": "Send",
                            "topic_placeholder": "Choose…",
                            "topics": ["A", "B", "C"]
                        }
                    }
                }),
            ),
            (
                "de",
                json!({
                    "nav": { "services": "Leistungen" },
                    "hero": { "image_alt": "Team bei der Arbeit" },
                    "contact": {
                        "form": {
                            "name": "Name",
                            "submit": "Senden",
                            "topic_placeholder": "Auswählen…",
                            "topics": ["X", "Y"]
                        }
                    }
                }),
            ),
        ])
    }

    #[rstest]
    #[case::image("img", &[], BindingTarget::Alt)]
    #[case::placeholder_flag("input", &[("data-i18n-target", "placeholder")], BindingTarget::Placeholder)]
    #[case::value_flag("input", &[("data-i18n-target", "value")], BindingTarget::Value)]
    #[case::type_overload("input", &[("type", "placeholder")], BindingTarget::Placeholder)]
    #[case::flag_wins_over_type("input", &[("type", "placeholder"), ("data-i18n-target", "value")], BindingTarget::Value)]
    #[case::plain_input("input", &[("type", "text")], BindingTarget::Text)]
    #[case::flag_ignored_off_input("span", &[("data-i18n-target", "value")], BindingTarget::Text)]
    fn target_for_element(
        #[case] tag: &str,
        #[case] attrs: &[(&str, &str)],
        #[case] expected: BindingTarget,
    ) {
        let mut doc = MemoryDocument::new();
        let element = doc.append_with(tag, attrs);

        assert_eq!(
            BindingTarget::for_element(&doc, element, &BindingAttributes::default()),
            expected
        );
    }

    #[rstest]
    fn binds_text_and_attributes(catalog: Catalog) {
        let mut doc = MemoryDocument::new();
        let link = doc.append_with("a", &[("data-i18n", "nav.services")]);
        let image = doc.append_with("img", &[("data-i18n", "hero.image_alt")]);
        let input = doc.append_with(
            "input",
            &[("data-i18n", "contact.form.name"), ("data-i18n-target", "placeholder")],
        );
        let button = doc.append_with(
            "input",
            &[("data-i18n", "contact.form.submit"), ("data-i18n-target", "value")],
        );
        let broken = doc.append_with("p", &[("data-i18n", "nav.missing")]);
        let resolver = Resolver::new(&catalog, "de", ".");

        let report = apply_translations(&mut doc, &resolver, &BindingAttributes::default());

        assert_eq!(report.texts, 5);
        assert_eq!(doc.text_content(link), Some("Leistungen"));
        assert_eq!(doc.attribute(image, "alt"), Some("Team bei der Arbeit"));
        assert_eq!(doc.text_content(image), Some(""));
        assert_eq!(doc.attribute(input, "placeholder"), Some("Name"));
        assert_eq!(doc.attribute(button, "value"), Some("Senden"));
        assert_eq!(doc.text_content(broken), Some("nav.missing"));
    }

    #[rstest]
    fn rebuilds_options_with_index_values(catalog: Catalog) {
        let mut doc = MemoryDocument::new();
        let select = doc.append_with("select", &[("data-i18n-options", "contact.form.topics")]);
        let resolver = Resolver::new(&catalog, "en", ".");

        let report = apply_translations(&mut doc, &resolver, &BindingAttributes::default());

        assert_that!(report.option_lists, eq(1));
        assert_that!(
            doc.options(select).to_vec(),
            elements_are![
                all![field!(SelectOption.value, eq("0")), field!(SelectOption.label, eq("A"))],
                all![field!(SelectOption.value, eq("1")), field!(SelectOption.label, eq("B"))],
                all![field!(SelectOption.value, eq("2")), field!(SelectOption.label, eq("C"))]
            ]
        );
    }

    #[rstest]
    fn prepends_placeholder_option(catalog: Catalog) {
        let mut doc = MemoryDocument::new();
        let select = doc.append_with(
            "select",
            &[
                ("data-i18n-options", "contact.form.topics"),
                ("data-i18n-placeholder", "contact.form.topic_placeholder"),
            ],
        );
        let resolver = Resolver::new(&catalog, "en", ".");

        apply_translations(&mut doc, &resolver, &BindingAttributes::default());

        assert_eq!(
            doc.options(select),
            [
                SelectOption::new("", "Choose…"),
                SelectOption::new("0", "A"),
                SelectOption::new("1", "B"),
                SelectOption::new("2", "C"),
            ]
        );
        assert_eq!(doc.selected_value(select), Some(""));
    }

    #[rstest]
    fn restores_selection_across_language_switch(catalog: Catalog) {
        let mut doc = MemoryDocument::new();
        let select = doc.append_with(
            "select",
            &[
                ("data-i18n-options", "contact.form.topics"),
                ("data-i18n-placeholder", "contact.form.topic_placeholder"),
            ],
        );
        let attributes = BindingAttributes::default();
        apply_translations(&mut doc, &Resolver::new(&catalog, "en", "."), &attributes);
        assert!(doc.select_value(select, "1"));

        let report = apply_translations(&mut doc, &Resolver::new(&catalog, "de", "."), &attributes);

        assert_eq!(report.restored_selections, 1);
        assert_eq!(doc.selected_value(select), Some("1"));
        assert_eq!(doc.options(select).get(2).map(|o| o.label.as_str()), Some("Y"));
    }

    #[rstest]
    fn selection_lost_when_index_disappears(catalog: Catalog) {
        let mut doc = MemoryDocument::new();
        let select = doc.append_with("select", &[("data-i18n-options", "contact.form.topics")]);
        let attributes = BindingAttributes::default();
        apply_translations(&mut doc, &Resolver::new(&catalog, "en", "."), &attributes);
        assert!(doc.select_value(select, "2"));

        let report = apply_translations(&mut doc, &Resolver::new(&catalog, "de", "."), &attributes);

        assert_eq!(report.restored_selections, 0);
        assert_eq!(doc.selected_value(select), None);
    }

    #[rstest]
    fn leaves_select_untouched_when_key_is_not_a_list(catalog: Catalog) {
        let mut doc = MemoryDocument::new();
        let select = doc.append_with("select", &[("data-i18n-options", "nav.services")]);
        let not_select = doc.append_with("div", &[("data-i18n-options", "contact.form.topics")]);
        doc.replace_options(select, vec![SelectOption::new("keep", "Keep me")]);

        let report = apply_translations(
            &mut doc,
            &Resolver::new(&catalog, "en", "."),
            &BindingAttributes::default(),
        );

        assert_eq!(report.option_lists, 0);
        assert_eq!(doc.options(select), [SelectOption::new("keep", "Keep me")]);
        assert!(doc.options(not_select).is_empty());
    }

    #[rstest]
    fn planning_does_not_mutate_and_is_idempotent(catalog: Catalog) {
        let mut doc = MemoryDocument::new();
        let link = doc.append_with("a", &[("data-i18n", "nav.services")]);
        let resolver = Resolver::new(&catalog, "de", ".");
        let attributes = BindingAttributes::default();

        let plan = plan_bindings(&doc, &resolver, &attributes);
        assert_eq!(doc.text_content(link), Some(""));

        apply_bindings(&mut doc, plan.clone());
        let replan = plan_bindings(&doc, &resolver, &attributes);
        apply_bindings(&mut doc, replan);

        assert_eq!(plan_bindings(&doc, &resolver, &attributes), plan);
        assert_eq!(doc.text_content(link), Some("Leistungen"));
    }
}
