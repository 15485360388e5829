//! User events and the dispatch table that maps them to storefront actions.
//!
//! The page has a single delegated listener: whatever element the shopper
//! clicks, changes or submits, the event is described as a [`UiEvent`]
//! carrying the target and its ancestors, and the [`DispatchTable`] picks
//! the action. Because events are plain data the whole dispatch path is
//! testable without a live page.

use std::collections::BTreeMap;

use corner_shop_core::ProductId;

use crate::config::Selectors;
use crate::document::Selector;

/// Kind of user event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Submit,
}

/// Snapshot of one element on an event's path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// `data-*` attributes, keyed without the `data-` prefix
    pub data: BTreeMap<String, String>,
    /// Current value, for form fields
    pub value: Option<String>,
}

impl EventTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Whether this element matches an `#id` or `.class` selector.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        match Selector::parse(selector) {
            Some(Selector::Id(id)) => self.id.as_deref() == Some(id),
            Some(Selector::Class(class)) => self.classes.iter().any(|c| c == class),
            None => false,
        }
    }

    fn product_id(&self) -> Option<ProductId> {
        self.data
            .get("id")
            .filter(|id| !id.is_empty())
            .map(|id| ProductId::new(id.as_str()))
    }
}

/// A user event: its kind and the path from the target element outwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub kind: EventKind,
    /// Target first, then each ancestor up to the document root
    pub path: Vec<EventTarget>,
}

impl UiEvent {
    #[must_use]
    pub fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            path: vec![target],
        }
    }

    #[must_use]
    pub fn click(target: EventTarget) -> Self {
        Self::new(EventKind::Click, target)
    }

    #[must_use]
    pub fn change(target: EventTarget) -> Self {
        Self::new(EventKind::Change, target)
    }

    #[must_use]
    pub fn submit(target: EventTarget) -> Self {
        Self::new(EventKind::Submit, target)
    }

    /// Append an ancestor to the path.
    #[must_use]
    pub fn within(mut self, ancestor: EventTarget) -> Self {
        self.path.push(ancestor);
        self
    }
}

/// What a dispatch rule does once it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    AddToCart,
    RemoveItem,
    SetQuantity,
    CloseModal,
    ToggleMenu,
    AddBoundProduct,
    SubmitContact,
}

/// A resolved storefront action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart(ProductId),
    RemoveItem(ProductId),
    SetQuantity { id: ProductId, raw: String },
    CloseModal,
    ToggleMenu,
    /// Add the product currently shown on the detail page
    AddBoundProduct,
    SubmitContact,
}

impl Action {
    /// Whether the browser's default handling of the event is suppressed.
    #[must_use]
    pub const fn prevents_default(&self) -> bool {
        matches!(
            self,
            Self::AddToCart(_) | Self::RemoveItem(_) | Self::SubmitContact
        )
    }
}

#[derive(Debug, Clone)]
struct Rule {
    kind: EventKind,
    selector: String,
    action: ActionKind,
}

/// Ordered mapping from (event kind, selector) to action.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    rules: Vec<Rule>,
}

impl DispatchTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Earlier rules win when several match the same element.
    #[must_use]
    pub fn on(mut self, kind: EventKind, selector: impl Into<String>, action: ActionKind) -> Self {
        self.rules.push(Rule {
            kind,
            selector: selector.into(),
            action,
        });
        self
    }

    /// The storefront's standard rules for the given selectors.
    #[must_use]
    pub fn for_selectors(selectors: &Selectors) -> Self {
        Self::new()
            .on(EventKind::Click, &selectors.add_to_cart, ActionKind::AddToCart)
            .on(EventKind::Click, &selectors.remove_item, ActionKind::RemoveItem)
            .on(EventKind::Change, &selectors.cart_quantity, ActionKind::SetQuantity)
            .on(EventKind::Click, &selectors.modal_close, ActionKind::CloseModal)
            .on(EventKind::Click, &selectors.modal_overlay, ActionKind::CloseModal)
            .on(EventKind::Click, &selectors.menu_toggle, ActionKind::ToggleMenu)
            .on(EventKind::Click, &selectors.product_add, ActionKind::AddBoundProduct)
            .on(EventKind::Submit, &selectors.contact_form, ActionKind::SubmitContact)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve an event to an action.
    ///
    /// Walks the path from the target outwards and stops at the first
    /// element matched by any rule for this event kind. Cart actions on an
    /// element without a `data-id` resolve to nothing.
    #[must_use]
    pub fn resolve(&self, event: &UiEvent) -> Option<Action> {
        for target in &event.path {
            let rule = self
                .rules
                .iter()
                .find(|rule| rule.kind == event.kind && target.matches(&rule.selector));
            if let Some(rule) = rule {
                return Self::build(rule.action, target);
            }
        }
        None
    }

    fn build(action: ActionKind, target: &EventTarget) -> Option<Action> {
        let action = match action {
            ActionKind::AddToCart => Action::AddToCart(target.product_id()?),
            ActionKind::RemoveItem => Action::RemoveItem(target.product_id()?),
            ActionKind::SetQuantity => Action::SetQuantity {
                id: target.product_id()?,
                raw: target.value.clone().unwrap_or_default(),
            },
            ActionKind::CloseModal => Action::CloseModal,
            ActionKind::ToggleMenu => Action::ToggleMenu,
            ActionKind::AddBoundProduct => Action::AddBoundProduct,
            ActionKind::SubmitContact => Action::SubmitContact,
        };
        Some(action)
    }
}
