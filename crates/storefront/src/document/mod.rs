//! Display surface the storefront renders into.
//!
//! In a browser this is the page's DOM. The storefront only ever addresses
//! elements through the selectors in its configuration, so the surface is
//! modelled as a small selector-addressed interface: every operation names
//! its target with an `#id` or `.class` selector and acts on the first match.
//!
//! A missing target is never an error. Getters return `None` and setters
//! return `false`, and callers treat that as "nothing to update".

pub mod headless;

pub use headless::{Element, HeadlessDocument, NodeId};

/// A parsed `#id` or `.class` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
}

impl<'a> Selector<'a> {
    /// Parse a selector string. Anything other than a non-empty `#id` or
    /// `.class` yields `None`.
    #[must_use]
    pub fn parse(selector: &'a str) -> Option<Self> {
        if let Some(id) = selector.strip_prefix('#') {
            (!id.is_empty()).then_some(Self::Id(id))
        } else if let Some(class) = selector.strip_prefix('.') {
            (!class.is_empty()).then_some(Self::Class(class))
        } else {
            None
        }
    }
}

/// Selector-addressed access to the page.
pub trait Document {
    /// Whether any element matches `selector`.
    fn contains(&self, selector: &str) -> bool;

    /// Text content of the element.
    fn text(&self, selector: &str) -> Option<String>;

    /// Replace the element's content with plain text.
    fn set_text(&mut self, selector: &str, text: &str) -> bool;

    /// Markup content of the element.
    fn inner_html(&self, selector: &str) -> Option<String>;

    /// Replace the element's content with markup.
    fn set_inner_html(&mut self, selector: &str, html: &str) -> bool;

    /// Whether the element carries the `hidden` flag.
    fn is_hidden(&self, selector: &str) -> Option<bool>;

    fn set_hidden(&mut self, selector: &str, hidden: bool) -> bool;

    fn attribute(&self, selector: &str, name: &str) -> Option<String>;

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) -> bool;

    fn has_class(&self, selector: &str, class: &str) -> Option<bool>;

    /// Add (`present = true`) or remove a class.
    fn set_class(&mut self, selector: &str, class: &str, present: bool) -> bool;

    /// Current value of a form field.
    fn value(&self, selector: &str) -> Option<String>;

    fn set_value(&mut self, selector: &str, value: &str) -> bool;

    /// Move keyboard focus to the element.
    fn focus(&mut self, selector: &str) -> bool;

    /// Restore every field inside the form to its default value.
    fn reset_form(&mut self, selector: &str) -> bool;
}
