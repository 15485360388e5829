//! Storefront context.
//!
//! [`Storefront`] owns everything a page needs: configuration, catalog,
//! the cart store, the display surface, timers and notification state.
//! There are no globals; a page creates one storefront at load time, calls
//! [`Storefront::init`], and then forwards every user event to
//! [`Storefront::handle_event`] and every due timer to
//! [`Storefront::fire_timer`].
//!
//! Every cart mutation follows the same cycle: read the persisted cart,
//! modify it, write it back, update the badge, re-render.

use std::time::Duration;

use corner_shop_core::{Cart, Catalog, ProductId};
use tracing::instrument;

use crate::config::StorefrontConfig;
use crate::contact::{ContactOutcome, submit_contact_form};
use crate::document::{Document, HeadlessDocument};
use crate::error::{self, Result};
use crate::events::{Action, DispatchTable, UiEvent};
use crate::nav::{NavState, toggle_menu};
use crate::notify::{ManualTimers, Modal, ModalState, TimerTask, Timers, Toast};
use crate::render::{CartView, ProductPage, apply_cart_view, apply_product_page};
use crate::storage::{CartStore, KeyValueStore, MemoryStorage, parse_quantity};

/// Storefront over in-memory collaborators.
pub type HeadlessStorefront = Storefront<MemoryStorage, HeadlessDocument, ManualTimers>;

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// No rule matched, or the matched action had nothing to act on.
    Ignored,
    /// The event ran an action. `prevent_default` says whether the
    /// browser's own handling must be suppressed.
    Handled { prevent_default: bool },
}

/// A running storefront page.
pub struct Storefront<S, D, T> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore<S>,
    document: D,
    timers: T,
    toast: Toast,
    modal: Modal,
    bound_product: Option<ProductId>,
    dispatch: DispatchTable,
}

impl<S: KeyValueStore, D: Document, T: Timers> Storefront<S, D, T> {
    /// Create a storefront. Nothing on the page changes until [`init`](Self::init).
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: S,
        document: D,
        timers: T,
    ) -> Self {
        let cart = CartStore::new(storage, config.storage_key.clone());
        let dispatch = DispatchTable::for_selectors(&config.selectors);
        Self {
            config,
            catalog,
            cart,
            document,
            timers,
            toast: Toast::new(),
            modal: Modal::new(),
            bound_product: None,
            dispatch,
        }
    }

    /// Initial render pass: badge, cart page and product page.
    ///
    /// `location_search` is the page's query string, e.g. `"?id=p2"`.
    #[instrument(skip(self))]
    pub fn init(&mut self, location_search: &str) {
        self.update_badge();
        self.render_cart_page();
        self.render_product_page(location_search);
        tracing::debug!(rules = self.dispatch.len(), "Storefront initialized");
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The persisted cart.
    #[must_use]
    pub fn read_cart(&self) -> Cart {
        self.cart.read()
    }

    /// Persist `cart` and refresh the badge.
    pub fn write_cart(&mut self, cart: &Cart) {
        self.cart.write(cart);
        self.update_badge();
    }

    /// Add one unit of `id`.
    ///
    /// Opens the confirmation modal when the product is in the catalog,
    /// shows the toast either way, and re-renders the cart.
    #[instrument(skip(self), fields(product = %id))]
    pub fn add_to_cart(&mut self, id: &ProductId) {
        let mut cart = self.read_cart();
        let quantity = cart.increment(id.clone());
        self.write_cart(&cart);
        tracing::debug!(quantity, "Added to cart");

        if let Some(product) = self.catalog.get(id) {
            let title = product.title.clone();
            self.open_modal(&title);
        }
        let message = self.config.messages.toast_added.clone();
        self.show_toast(&message);
        self.render_cart_page();
    }

    /// Set the quantity of `id` from raw field input.
    ///
    /// See [`parse_quantity`] for how input is read; the result is always
    /// at least 1.
    #[instrument(skip(self), fields(product = %id))]
    pub fn set_quantity(&mut self, id: &ProductId, raw: &str) {
        let quantity = parse_quantity(raw);
        let mut cart = self.read_cart();
        cart.set(id.clone(), quantity);
        self.write_cart(&cart);
        tracing::debug!(quantity, "Quantity updated");
        self.render_cart_page();
    }

    /// Remove `id` from the cart. Unknown ids are a no-op.
    #[instrument(skip(self), fields(product = %id))]
    pub fn remove_item(&mut self, id: &ProductId) {
        let mut cart = self.read_cart();
        let removed = cart.remove(id);
        self.write_cart(&cart);
        tracing::debug!(removed = removed.is_some(), "Removed from cart");
        self.render_cart_page();
    }

    /// Show the persisted item count on the cart badge.
    pub fn update_badge(&mut self) {
        let count = self.read_cart().item_count();
        self.document
            .set_text(&self.config.selectors.cart_badge, &count.to_string());
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Re-render the cart page from the persisted cart.
    pub fn render_cart_page(&mut self) {
        if let Err(e) = self.try_render_cart_page() {
            error::report("render cart", &e);
        }
    }

    fn try_render_cart_page(&mut self) -> Result<()> {
        let view = CartView::build(&self.read_cart(), &self.catalog, self.config.currency);
        apply_cart_view(
            &view,
            &mut self.document,
            &self.config.selectors,
            &self.config.messages,
        )
    }

    /// Render the product detail page for a query string and bind its add
    /// control.
    #[instrument(skip(self))]
    pub fn render_product_page(&mut self, location_search: &str) {
        let page = ProductPage::resolve(location_search, &self.catalog, &self.config);
        match apply_product_page(
            &page,
            &mut self.document,
            &self.config.selectors,
            &self.config.messages.product_not_found,
        ) {
            Ok(bound) => self.bound_product = bound,
            Err(e) => error::report("render product", &e),
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Open the confirmation modal for `product_title`.
    pub fn open_modal(&mut self, product_title: &str) {
        self.modal.open(
            &mut self.document,
            &self.config.selectors,
            &self.config.messages,
            product_title,
        );
    }

    pub fn close_modal(&mut self) {
        self.modal.close(&mut self.document, &self.config.selectors);
    }

    /// Show a toast for the configured duration.
    pub fn show_toast(&mut self, message: &str) {
        self.show_toast_for(message, self.config.toast_duration());
    }

    pub fn show_toast_for(&mut self, message: &str, duration: Duration) {
        self.toast.show(
            &mut self.document,
            &mut self.timers,
            &self.config.selectors,
            message,
            duration,
        );
    }

    /// Run a timer task that has come due.
    pub fn fire_timer(&mut self, task: TimerTask) {
        match task {
            TimerTask::HideToast { generation } => {
                let hidden = self
                    .toast
                    .expire(&mut self.document, &self.config.selectors, generation);
                tracing::trace!(generation, hidden, "Toast timer fired");
            }
        }
    }

    // =========================================================================
    // Forms and navigation
    // =========================================================================

    pub fn toggle_menu(&mut self) -> Option<NavState> {
        toggle_menu(&mut self.document, &self.config.selectors)
    }

    pub fn submit_contact(&mut self) -> ContactOutcome {
        let outcome = submit_contact_form(
            &mut self.document,
            &self.config.selectors,
            &self.config.messages,
        );
        match &outcome {
            ContactOutcome::Submitted(_) => tracing::info!("Contact form submitted"),
            ContactOutcome::Invalid(errors) => {
                tracing::debug!(errors = errors.len(), "Contact form rejected");
            }
            ContactOutcome::Ignored => {}
        }
        outcome
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Dispatch a user event.
    #[instrument(skip(self, event), fields(kind = ?event.kind))]
    pub fn handle_event(&mut self, event: &UiEvent) -> EventOutcome {
        let Some(action) = self.dispatch.resolve(event) else {
            return EventOutcome::Ignored;
        };
        let prevent_default = action.prevents_default();
        if self.perform(action) {
            EventOutcome::Handled { prevent_default }
        } else {
            EventOutcome::Ignored
        }
    }

    fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::AddToCart(id) => self.add_to_cart(&id),
            Action::RemoveItem(id) => self.remove_item(&id),
            Action::SetQuantity { id, raw } => self.set_quantity(&id, &raw),
            Action::CloseModal => self.close_modal(),
            Action::ToggleMenu => {
                self.toggle_menu();
            }
            Action::AddBoundProduct => {
                let Some(id) = self.bound_product.clone() else {
                    return false;
                };
                self.add_to_cart(&id);
            }
            Action::SubmitContact => {
                self.submit_contact();
            }
        }
        true
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart_store(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    pub const fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    #[must_use]
    pub const fn timers(&self) -> &T {
        &self.timers
    }

    #[must_use]
    pub const fn modal_state(&self) -> ModalState {
        self.modal.state()
    }

    /// Product the detail page's add control is bound to.
    #[must_use]
    pub const fn bound_product(&self) -> Option<&ProductId> {
        self.bound_product.as_ref()
    }
}

impl<S: KeyValueStore, D: Document> Storefront<S, D, ManualTimers> {
    /// Move the virtual clock forward and run every task that came due.
    ///
    /// Returns the number of tasks run.
    pub fn advance_time(&mut self, by: Duration) -> usize {
        let due = self.timers.advance(by);
        let count = due.len();
        for task in due {
            self.fire_timer(task);
        }
        count
    }
}
