//! In-memory document.
//!
//! `HeadlessDocument` is a flat element table with parent links. It keeps
//! just enough state for the storefront's selector contract: ids, classes,
//! attributes, content, the `hidden` flag, form values and focus. Markup
//! written with `set_inner_html` is stored as-is and not parsed into
//! elements.
//!
//! Page fixtures build the stock markup for each storefront page from a
//! [`Selectors`] set, so tests and previews work against the same element
//! contract the real pages use.

use std::collections::BTreeMap;

use corner_shop_core::Catalog;

use super::{Document, Selector};
use crate::config::Selectors;
use crate::events::{EventKind, EventTarget, UiEvent};

/// Handle to an element in a [`HeadlessDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Html(String),
}

/// An element, also used as the builder for new elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    content: Content,
    hidden: bool,
    value: String,
    default_value: String,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            content: Content::Text(String::new()),
            hidden: false,
            value: String::new(),
            default_value: String::new(),
        }
    }

    /// Create an element that the given `#id` or `.class` selector matches.
    #[must_use]
    pub fn matching(tag: impl Into<String>, selector: &str) -> Self {
        let element = Self::new(tag);
        match Selector::parse(selector) {
            Some(Selector::Id(id)) => element.id(id),
            Some(Selector::Class(class)) => element.class(class),
            None => element,
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set both the current and the default value of a form field.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.default_value.clone_from(&self.value);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn matches(&self, selector: Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
        }
    }

    fn text_content(&self) -> String {
        match &self.content {
            Content::Text(text) => text.clone(),
            Content::Html(html) => strip_tags(html),
        }
    }

    fn snapshot(&self) -> EventTarget {
        EventTarget {
            id: self.id.clone(),
            classes: self.classes.clone(),
            data: self
                .attrs
                .iter()
                .filter_map(|(k, v)| k.strip_prefix("data-").map(|k| (k.to_string(), v.clone())))
                .collect(),
            value: matches!(self.tag.as_str(), "input" | "textarea" | "select")
                .then(|| self.value.clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    element: Element,
}

/// In-memory implementation of [`Document`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
}

impl HeadlessDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or at the top level).
    pub fn append(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, element });
        id
    }

    /// First element matching `selector`.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.nodes
            .iter()
            .position(|node| node.element.matches(selector))
            .map(NodeId)
    }

    /// First element matching `selector` whose `data-<key>` equals `value`.
    #[must_use]
    pub fn query_data(&self, selector: &str, key: &str, value: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        let attr = format!("data-{key}");
        self.nodes
            .iter()
            .position(|node| {
                node.element.matches(selector)
                    && node.element.attrs.get(&attr).is_some_and(|v| v == value)
            })
            .map(NodeId)
    }

    /// The element behind a handle.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).map(|n| &n.element)
    }

    /// Whether keyboard focus is on the element matching `selector`.
    #[must_use]
    pub fn is_focused(&self, selector: &str) -> bool {
        self.focused.is_some() && self.focused == self.query(selector)
    }

    /// Build an event targeting `node`, with its ancestors on the path.
    #[must_use]
    pub fn event(&self, kind: EventKind, node: NodeId) -> UiEvent {
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get(id.0) else {
                break;
            };
            path.push(n.element.snapshot());
            current = n.parent;
        }
        UiEvent { kind, path }
    }

    /// Build an event targeting the first element matching `selector`.
    #[must_use]
    pub fn event_for(&self, kind: EventKind, selector: &str) -> Option<UiEvent> {
        self.query(selector).map(|node| self.event(kind, node))
    }

    fn find(&self, selector: &str) -> Option<&Element> {
        self.query(selector).and_then(|id| self.element(id))
    }

    fn find_mut(&mut self, selector: &str) -> Option<&mut Element> {
        let id = self.query(selector)?;
        self.nodes.get_mut(id.0).map(|n| &mut n.element)
    }

    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes.get(node.0).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    // =========================================================================
    // Page fixtures
    // =========================================================================

    /// Site chrome shared by every page: cart badge, navigation, modal and toast.
    #[must_use]
    pub fn layout(selectors: &Selectors) -> Self {
        let mut doc = Self::new();
        let header = doc.append(None, Element::new("header").class("site-header"));
        doc.append(
            Some(header),
            Element::matching("span", &selectors.cart_badge).text("0"),
        );
        doc.append(
            Some(header),
            Element::matching("button", &selectors.menu_toggle).attr("aria-expanded", "false"),
        );
        doc.append(
            Some(header),
            Element::matching("ul", &selectors.nav_list).attr("aria-hidden", "true"),
        );

        doc.append(
            None,
            Element::matching("div", &selectors.modal_overlay).hidden(true),
        );
        let modal = doc.append(
            None,
            Element::matching("div", &selectors.modal)
                .attr("role", "dialog")
                .hidden(true),
        );
        doc.append(
            Some(modal),
            Element::matching("p", &selectors.modal_description),
        );
        doc.append(
            Some(modal),
            Element::matching("button", &selectors.modal_close).text("×"),
        );

        doc.append(
            None,
            Element::matching("div", &selectors.toast)
                .attr("role", "status")
                .hidden(true),
        );
        doc
    }

    /// Product grid with one add-to-cart control per catalog product.
    #[must_use]
    pub fn with_product_grid(mut self, catalog: &Catalog, selectors: &Selectors) -> Self {
        let grid = self.append(None, Element::new("section").class("product-grid"));
        for product in catalog.iter() {
            let card = self.append(Some(grid), Element::new("article").class("card"));
            self.append(Some(card), Element::new("h3").text(product.title.clone()));
            self.append(
                Some(card),
                Element::matching("button", &selectors.add_to_cart)
                    .class("button")
                    .attr("data-id", product.id.as_str()),
            );
        }
        self
    }

    /// Cart page: item list, summary with total, and empty-state message.
    #[must_use]
    pub fn with_cart_section(mut self, selectors: &Selectors) -> Self {
        let container = self.append(None, Element::matching("section", &selectors.cart_container));
        self.append(Some(container), Element::matching("ul", &selectors.cart_items));
        self.append(Some(container), Element::matching("p", &selectors.cart_empty));
        let summary = self.append(Some(container), Element::matching("div", &selectors.cart_summary));
        self.append(Some(summary), Element::matching("span", &selectors.cart_total));
        self
    }

    /// Product detail page.
    #[must_use]
    pub fn with_product_section(mut self, selectors: &Selectors) -> Self {
        let section = self.append(None, Element::new("section").class("product"));
        self.append(Some(section), Element::matching("h1", &selectors.product_title));
        self.append(Some(section), Element::matching("img", &selectors.product_image));
        self.append(Some(section), Element::matching("p", &selectors.product_price));
        self.append(Some(section), Element::matching("p", &selectors.product_description));
        self.append(Some(section), Element::matching("button", &selectors.product_add));
        self
    }

    /// Contact page form with its error slots and status line.
    #[must_use]
    pub fn with_contact_form(mut self, selectors: &Selectors) -> Self {
        let form = self.append(None, Element::matching("form", &selectors.contact_form));
        self.append(Some(form), Element::matching("input", &selectors.contact_name).attr("name", "name"));
        self.append(Some(form), Element::matching("span", &selectors.contact_name_error));
        self.append(Some(form), Element::matching("input", &selectors.contact_email).attr("name", "email"));
        self.append(Some(form), Element::matching("span", &selectors.contact_email_error));
        self.append(Some(form), Element::new("button").attr("type", "submit"));
        self.append(None, Element::matching("p", &selectors.contact_status));
        self
    }
}

impl Document for HeadlessDocument {
    fn contains(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    fn text(&self, selector: &str) -> Option<String> {
        self.find(selector).map(Element::text_content)
    }

    fn set_text(&mut self, selector: &str, text: &str) -> bool {
        self.find_mut(selector)
            .map(|el| el.content = Content::Text(text.to_string()))
            .is_some()
    }

    fn inner_html(&self, selector: &str) -> Option<String> {
        self.find(selector).map(|el| match &el.content {
            Content::Text(text) => escape_text(text),
            Content::Html(html) => html.clone(),
        })
    }

    fn set_inner_html(&mut self, selector: &str, html: &str) -> bool {
        self.find_mut(selector)
            .map(|el| el.content = Content::Html(html.to_string()))
            .is_some()
    }

    fn is_hidden(&self, selector: &str) -> Option<bool> {
        self.find(selector).map(|el| el.hidden)
    }

    fn set_hidden(&mut self, selector: &str, hidden: bool) -> bool {
        self.find_mut(selector).map(|el| el.hidden = hidden).is_some()
    }

    fn attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.find(selector).and_then(|el| el.attrs.get(name).cloned())
    }

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) -> bool {
        self.find_mut(selector)
            .map(|el| el.attrs.insert(name.to_string(), value.to_string()))
            .is_some()
    }

    fn has_class(&self, selector: &str, class: &str) -> Option<bool> {
        self.find(selector).map(|el| el.classes.iter().any(|c| c == class))
    }

    fn set_class(&mut self, selector: &str, class: &str, present: bool) -> bool {
        let Some(el) = self.find_mut(selector) else {
            return false;
        };
        let has = el.classes.iter().any(|c| c == class);
        if present && !has {
            el.classes.push(class.to_string());
        } else if !present {
            el.classes.retain(|c| c != class);
        }
        true
    }

    fn value(&self, selector: &str) -> Option<String> {
        self.find(selector).map(|el| el.value.clone())
    }

    fn set_value(&mut self, selector: &str, value: &str) -> bool {
        self.find_mut(selector)
            .map(|el| el.value = value.to_string())
            .is_some()
    }

    fn focus(&mut self, selector: &str) -> bool {
        let Some(node) = self.query(selector) else {
            return false;
        };
        self.focused = Some(node);
        true
    }

    fn reset_form(&mut self, selector: &str) -> bool {
        let Some(form) = self.query(selector) else {
            return false;
        };
        let fields: Vec<usize> = (0..self.nodes.len())
            .filter(|&i| self.is_descendant_of(NodeId(i), form))
            .collect();
        for i in fields {
            if let Some(node) = self.nodes.get_mut(i) {
                node.element.value.clone_from(&node.element.default_value);
            }
        }
        true
    }
}

/// Text content of a markup fragment: tags dropped, common entities decoded.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&#60;", "<")
        .replace("&gt;", ">")
        .replace("&#62;", ">")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
        .replace("&#38;", "&")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
