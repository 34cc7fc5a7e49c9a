//! The slice of the DOM the binder and page glue operate on.

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Handle to the element at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the owning document.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One `<option>` of a select element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// Option with `value` and visible `label`.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// Document operations used by this crate.
///
/// Query methods return elements in document order. Mutations on an unknown
/// element are ignored, as they would be on a detached node.
pub trait Document {
    /// Elements carrying attribute `name`, whatever its value.
    fn elements_with_attribute(&self, name: &str) -> Vec<ElementId>;

    /// Elements with lowercase tag name `tag`.
    fn elements_with_tag(&self, tag: &str) -> Vec<ElementId>;

    /// Elements whose class list contains `class`.
    fn elements_with_class(&self, class: &str) -> Vec<ElementId>;

    /// First element whose `id` is `id`.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Lowercase tag name.
    fn tag_name(&self, element: ElementId) -> Option<&str>;

    /// Value of attribute `name`.
    fn attribute(&self, element: ElementId, name: &str) -> Option<&str>;

    /// Set attribute `name`, replacing any previous value.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Text of `element`, `None` if it has none.
    fn text_content(&self, element: ElementId) -> Option<&str>;

    /// Replace the text of `element`.
    fn set_text_content(&mut self, element: ElementId, text: &str);

    /// True if the class list of `element` contains `class`.
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Add `class` unless present.
    fn add_class(&mut self, element: ElementId, class: &str);

    /// Remove `class` if present.
    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Options of a select element, empty for anything else.
    fn options(&self, element: ElementId) -> &[SelectOption];

    /// Replace all options. The first option becomes selected.
    fn replace_options(&mut self, element: ElementId, options: Vec<SelectOption>);

    /// Value of the selected option of a select element.
    fn selected_value(&self, element: ElementId) -> Option<&str>;

    /// Select the option whose value is `value`.
    ///
    /// Returns false and clears the selection if there is no such option.
    fn select_value(&mut self, element: ElementId, value: &str) -> bool;

    /// Attribute of the root `<html>` element (`lang`, `dir`).
    fn document_attribute(&self, name: &str) -> Option<&str>;

    /// Set an attribute of the root `<html>` element.
    fn set_document_attribute(&mut self, name: &str, value: &str);
}
