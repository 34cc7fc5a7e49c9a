//! Reveal-on-scroll animation classes.
//!
//! The host owns the intersection observer and forwards its entries to
//! [`RevealTracker::on_intersection`].

use std::collections::BTreeSet;
use std::time::Duration;

use crate::dom::{
    Document,
    ElementId,
};

/// Initial hidden state of an animated element.
pub const READY: &str = "animate-ready";
/// Visible state, added while the element is in view.
pub const REVEALED: &str = "animate-in";
/// Marks elements that animate every time they come back into view.
pub const SECTION: &str = "section";

/// Visible fraction at which an entry counts as intersecting.
pub const VISIBILITY_THRESHOLD: f64 = 0.15;
/// Shrinks the viewport bottom so elements reveal a little late.
pub const ROOT_MARGIN: &str = "0px 0px -100px 0px";

/// Extra transition delay per card, in document order.
pub const CARD_STAGGER: Duration = Duration::from_millis(100);
/// Transition delay of every heading.
pub const HEADING_DELAY: Duration = Duration::from_millis(100);

const HEADING_TAGS: [&str; 3] = ["h1", "h2", "h3"];
const HEADING_CLASSES: [&str; 2] = ["display-5", "display-6"];

/// Settings for the host's intersection observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

/// Elements still waiting for (re)animation.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: BTreeSet<ElementId>,
}

impl RevealTracker {
    /// Mark sections, cards and headings ready and start tracking them.
    pub fn prepare(document: &mut dyn Document) -> Self {
        let mut tracker = Self::default();

        for section in document.elements_with_tag("section") {
            document.add_class(section, READY);
            document.add_class(section, SECTION);
            tracker.observed.insert(section);
        }

        let mut step = Duration::ZERO;
        for card in document.elements_with_class("card") {
            document.add_class(card, READY);
            set_transition_delay(document, card, step);
            tracker.observed.insert(card);
            step += CARD_STAGGER;
        }

        let mut headings: BTreeSet<ElementId> =
            HEADING_TAGS.iter().flat_map(|tag| document.elements_with_tag(tag)).collect();
        headings.extend(HEADING_CLASSES.iter().flat_map(|class| document.elements_with_class(class)));
        for heading in headings {
            document.add_class(heading, READY);
            set_transition_delay(document, heading, HEADING_DELAY);
            tracker.observed.insert(heading);
        }

        tracing::debug!("Tracking {} elements for reveal", tracker.observed.len());
        tracker
    }

    /// How the host should configure the observer feeding [`Self::on_intersection`].
    #[must_use]
    pub const fn observer_options() -> ObserverOptions {
        ObserverOptions { threshold: VISIBILITY_THRESHOLD, root_margin: ROOT_MARGIN }
    }

    /// True while `element` may still change on intersection.
    #[must_use]
    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }

    /// Number of elements still tracked.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Handle one observer entry.
    ///
    /// Sections toggle on every pass; any other element is revealed once and
    /// then dropped.
    pub fn on_intersection(&mut self, document: &mut dyn Document, element: ElementId, intersecting: bool) {
        if !self.observed.contains(&element) {
            return;
        }
        let is_section = document.has_class(element, SECTION);

        if intersecting {
            document.add_class(element, REVEALED);
            if !is_section {
                self.observed.remove(&element);
            }
        } else if is_section {
            document.remove_class(element, REVEALED);
        }
    }
}

/// Replace any `transition-delay` in the inline style.
fn set_transition_delay(document: &mut dyn Document, element: ElementId, delay: Duration) {
    let mut declarations: Vec<String> = document
        .attribute(element, "style")
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty() && !declaration.starts_with("transition-delay"))
        .map(str::to_string)
        .collect();
    declarations.push(format!("transition-delay: {}ms", delay.as_millis()));
    document.set_attribute(element, "style", &declarations.join("; "));
}
