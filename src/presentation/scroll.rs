//! Navbar state, scroll spy, anchor navigation and hero parallax.

use std::time::Duration;

use crate::dom::{
    Document,
    ElementId,
};

/// Scroll offset past which the navbar gets [`SCROLLED`].
pub const NAVBAR_THRESHOLD: i64 = 50;
/// A section becomes current this far before its top reaches the viewport.
pub const SPY_OFFSET: i64 = 100;

/// Height of the fixed header; anchor targets scroll to just below it.
pub const ANCHOR_OFFSET: i64 = 80;
/// Parallax stops updating past this scroll offset.
pub const PARALLAX_LIMIT: i64 = 600;
/// Parallax shift in percent of the scroll offset.
pub const PARALLAX_PERCENT: i64 = 15;

/// Navbar state once the page has scrolled.
pub const SCROLLED: &str = "scrolled";
/// Nav link of the section in view.
pub const ACTIVE: &str = "active";
/// Briefly added to the target of an in-page link.
pub const SECTION_HIGHLIGHT: &str = "section-highlight";
/// How long [`SECTION_HIGHLIGHT`] stays on.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(1000);
/// Open state of the collapsed mobile menu.
pub const MENU_OPEN: &str = "show";

/// Where to scroll after an in-page link was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorScroll {
    pub target: ElementId,
    /// Vertical offset to scroll to.
    pub top: i64,
    /// Remove [`SECTION_HIGHLIGHT`] from `target` after this long.
    pub highlight_for: Duration,
}

/// Layout box of a section with an `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBox {
    pub id: String,
    pub top: i64,
    pub height: i64,
}

impl SectionBox {
    /// Box of the section `id`.
    #[must_use]
    pub fn new(id: impl Into<String>, top: i64, height: i64) -> Self {
        Self { id: id.into(), top, height }
    }

    /// True while `scroll_y` is inside the section, offset by [`SPY_OFFSET`].
    const fn contains(&self, scroll_y: i64) -> bool {
        let start = self.top - SPY_OFFSET;
        scroll_y >= start && scroll_y < start + self.height
    }
}

/// Toggle [`SCROLLED`] on every `.navbar`.
pub fn update_navbar(document: &mut dyn Document, scroll_y: i64) {
    for navbar in document.elements_with_class("navbar") {
        if scroll_y > NAVBAR_THRESHOLD {
            document.add_class(navbar, SCROLLED);
        } else {
            document.remove_class(navbar, SCROLLED);
        }
    }
}

/// Section under `scroll_y`; the last matching section wins.
#[must_use]
pub fn current_section(sections: &[SectionBox], scroll_y: i64) -> Option<&str> {
    sections.iter().rev().find(|section| section.contains(scroll_y)).map(|section| section.id.as_str())
}

/// Mark the nav link pointing at `current` active and clear the others.
pub fn update_active_link(document: &mut dyn Document, current: Option<&str>) {
    let target = current.map(|id| format!("#{id}"));
    for link in document.elements_with_class("nav-link") {
        let is_current = target.is_some() && document.attribute(link, "href") == target.as_deref();
        if is_current {
            document.add_class(link, ACTIVE);
        } else {
            document.remove_class(link, ACTIVE);
        }
    }
}

/// Full scroll handler; returns the id of the current section.
pub fn on_scroll(document: &mut dyn Document, sections: &[SectionBox], scroll_y: i64) -> Option<String> {
    update_navbar(document, scroll_y);
    let current = current_section(sections, scroll_y).map(str::to_string);
    update_active_link(document, current.as_deref());
    current
}

/// Handle a click on a link with `href` `#id`.
///
/// `target_top` is the layout offset of the target element. Highlights the
/// target and closes the mobile menu. Returns `None` for a bare `#` or an
/// unknown target, leaving the document as it was.
pub fn navigate_to_anchor(document: &mut dyn Document, href: &str, target_top: i64) -> Option<AnchorScroll> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let target = document.element_by_id(id)?;

    document.add_class(target, SECTION_HIGHLIGHT);
    for menu in document.elements_with_class("navbar-collapse") {
        if document.has_class(menu, MENU_OPEN) {
            document.remove_class(menu, MENU_OPEN);
        }
    }

    Some(AnchorScroll { target, top: target_top - ANCHOR_OFFSET, highlight_for: HIGHLIGHT_DURATION })
}

/// End of the highlight started by [`navigate_to_anchor`].
pub fn clear_highlight(document: &mut dyn Document, target: ElementId) {
    document.remove_class(target, SECTION_HIGHLIGHT);
}

/// Vertical shift of the hero image, or `None` once past [`PARALLAX_LIMIT`].
#[must_use]
pub const fn parallax_offset(scroll_y: i64) -> Option<i64> {
    if scroll_y < PARALLAX_LIMIT { Some(scroll_y * PARALLAX_PERCENT / 100) } else { None }
}

/// Shift `image` for `scroll_y`. Past the limit the last transform stays.
pub fn apply_parallax(document: &mut dyn Document, image: ElementId, scroll_y: i64) {
    if let Some(offset) = parallax_offset(scroll_y) {
        document.set_attribute(image, "style", &format!("transform: translateY({offset}px)"));
    }
}
