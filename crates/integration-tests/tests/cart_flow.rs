//! Cart scenarios: add, edit, remove, render, persist.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use corner_shop_core::{Cart, ProductId};
use corner_shop_integration_tests::{full_page, storefront, storefront_with};
use corner_shop_storefront::document::Document;
use corner_shop_storefront::events::{EventKind, EventTarget, UiEvent};
use corner_shop_storefront::notify::ModalState;
use corner_shop_storefront::storage::{KeyValueStore, MemoryStorage};
use corner_shop_storefront::{EventOutcome, HeadlessStorefront, StorefrontConfig};

const KEY: &str = "shop_cart_v1";

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

fn click_add(shop: &mut HeadlessStorefront, product: &str) -> EventOutcome {
    let node = shop
        .document()
        .query_data(".add-to-cart", "id", product)
        .expect("product card on the page");
    let event = shop.document().event(EventKind::Click, node);
    shop.handle_event(&event)
}

fn quantity_change(product: &str, value: &str) -> UiEvent {
    UiEvent::change(
        EventTarget::new()
            .with_class("cart-qty")
            .with_data("id", product)
            .with_value(value),
    )
    .within(EventTarget::new().with_class("cart-item"))
    .within(EventTarget::new().with_id("cart-items"))
}

// =============================================================================
// Adding
// =============================================================================

#[test]
fn test_add_counts_each_click() {
    let mut shop = storefront();
    for product in ["p1", "p3", "p1", "p1"] {
        assert_eq!(
            click_add(&mut shop, product),
            EventOutcome::Handled {
                prevent_default: true
            }
        );
    }

    let cart = shop.read_cart();
    assert_eq!(cart.quantity(&id("p1")), Some(3));
    assert_eq!(cart.quantity(&id("p3")), Some(1));
    assert_eq!(shop.document().text("#cart-badge").unwrap(), "4");
}

#[test]
fn test_add_persists_in_insertion_order() {
    let storage = MemoryStorage::new();
    let mut shop = storefront_with(storage.clone(), full_page(&StorefrontConfig::default()));
    shop.init("");
    click_add(&mut shop, "p3");
    click_add(&mut shop, "p1");
    click_add(&mut shop, "p3");

    assert_eq!(storage.get_item(KEY).unwrap().unwrap(), r#"{"p3":2,"p1":1}"#);
}

#[test]
fn test_add_opens_modal_and_toast() {
    let mut shop = storefront();
    click_add(&mut shop, "p1");

    assert_eq!(shop.modal_state(), ModalState::Open);
    assert_eq!(
        shop.document().text("#modal-desc").unwrap(),
        "Wireless Headphones X100 added to cart"
    );
    assert_eq!(shop.document().text("#toast").unwrap(), "Added to cart");

    let close = shop
        .document()
        .event_for(EventKind::Click, "#modal-close")
        .unwrap();
    shop.handle_event(&close);
    assert_eq!(shop.modal_state(), ModalState::Closed);
    assert_eq!(shop.document().is_hidden("#modal"), Some(true));
    assert_eq!(shop.document().is_hidden("#modal-overlay"), Some(true));
}

#[test]
fn test_modal_shows_only_latest_title() {
    let mut shop = storefront();
    click_add(&mut shop, "p1");
    click_add(&mut shop, "p2");
    assert_eq!(
        shop.document().text("#modal-desc").unwrap(),
        "Boom Portable Speaker added to cart"
    );
}

#[test]
fn test_rapid_adds_keep_latest_toast_visible() {
    let mut shop = storefront();
    click_add(&mut shop, "p1");
    shop.advance_time(Duration::from_millis(1000));
    click_add(&mut shop, "p2");

    // First toast's timer is due now but must not hide the second one
    shop.advance_time(Duration::from_millis(900));
    assert_eq!(shop.document().is_hidden("#toast"), Some(false));

    shop.advance_time(Duration::from_millis(900));
    assert_eq!(shop.document().is_hidden("#toast"), Some(true));
    assert_eq!(shop.document().text("#toast").unwrap(), "");
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_total_matches_catalog_prices() {
    let mut shop = storefront();
    click_add(&mut shop, "p1");
    click_add(&mut shop, "p1");
    click_add(&mut shop, "p2");

    assert_eq!(shop.document().text("#cart-total").unwrap(), "12497 ₽");
    assert_eq!(shop.document().is_hidden("#cart-summary"), Some(false));
    assert_eq!(shop.document().is_hidden("#empty-cart"), Some(true));
}

#[test]
fn test_empty_cart_shows_empty_state() {
    let shop = storefront();
    assert_eq!(shop.document().is_hidden("#empty-cart"), Some(false));
    assert_eq!(shop.document().is_hidden("#cart-items"), Some(true));
    assert_eq!(shop.document().is_hidden("#cart-summary"), Some(true));
    assert_eq!(shop.document().text("#cart-badge").unwrap(), "0");
}

#[test]
fn test_rerender_is_idempotent() {
    let mut shop = storefront();
    click_add(&mut shop, "p2");
    click_add(&mut shop, "p3");
    let before = shop.document().clone();

    shop.render_cart_page();
    shop.render_cart_page();

    for selector in ["#cart-items", "#cart-total", "#cart-summary", "#empty-cart"] {
        assert_eq!(
            shop.document().inner_html(selector),
            before.inner_html(selector),
            "{selector}"
        );
        assert_eq!(
            shop.document().is_hidden(selector),
            before.is_hidden(selector),
            "{selector}"
        );
    }
}

#[test]
fn test_unknown_product_renders_placeholder() {
    let storage = MemoryStorage::new();
    storage.set_item(KEY, r#"{"ghost":2,"p2":1}"#).unwrap();
    let mut shop = storefront_with(storage, full_page(&StorefrontConfig::default()));
    shop.init("");

    let html = shop.document().inner_html("#cart-items").unwrap();
    assert!(html.contains("<strong>ghost</strong>"));
    assert_eq!(shop.document().text("#cart-total").unwrap(), "2499 ₽");
    assert_eq!(shop.document().text("#cart-badge").unwrap(), "3");
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn test_invalid_quantities_become_one() {
    let mut shop = storefront();
    click_add(&mut shop, "p1");

    for raw in ["0", "-3", "abc"] {
        shop.handle_event(&quantity_change("p1", "6"));
        assert_eq!(shop.read_cart().quantity(&id("p1")), Some(6));

        shop.handle_event(&quantity_change("p1", raw));
        assert_eq!(shop.read_cart().quantity(&id("p1")), Some(1), "input {raw:?}");
    }
}

#[test]
fn test_quantity_edit_updates_total_and_badge() {
    let mut shop = storefront();
    click_add(&mut shop, "p2");
    shop.handle_event(&quantity_change("p2", "3"));

    assert_eq!(shop.document().text("#cart-total").unwrap(), "7497 ₽");
    assert_eq!(shop.document().text("#cart-badge").unwrap(), "3");
}

#[test]
fn test_remove_nonexistent_is_noop() {
    let mut shop = storefront();
    click_add(&mut shop, "p1");
    click_add(&mut shop, "p2");
    let before = shop.read_cart();

    let remove = UiEvent::click(
        EventTarget::new()
            .with_class("remove-item")
            .with_data("id", "p3"),
    );
    shop.handle_event(&remove);
    assert_eq!(shop.read_cart(), before);
}

#[test]
fn test_remove_last_item_empties_cart() {
    let mut shop = storefront();
    click_add(&mut shop, "p1");
    let remove = UiEvent::click(
        EventTarget::new()
            .with_class("remove-item")
            .with_data("id", "p1"),
    );
    assert_eq!(
        shop.handle_event(&remove),
        EventOutcome::Handled {
            prevent_default: true
        }
    );

    assert!(shop.read_cart().is_empty());
    assert_eq!(shop.document().is_hidden("#empty-cart"), Some(false));
    assert_eq!(shop.document().text("#cart-badge").unwrap(), "0");
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_malformed_storage_reads_as_empty() {
    for raw in ["not json", "[1,2]", r#"{"p1":"two"}"#, "null"] {
        let storage = MemoryStorage::new();
        storage.set_item(KEY, raw).unwrap();
        let mut shop = storefront_with(storage, full_page(&StorefrontConfig::default()));
        shop.init("");

        assert_eq!(shop.read_cart(), Cart::new(), "stored {raw:?}");
        assert_eq!(shop.document().text("#cart-badge").unwrap(), "0");
        assert_eq!(shop.document().is_hidden("#empty-cart"), Some(false));

        // The next mutation overwrites the bad value
        shop.add_to_cart(&id("p1"));
        assert_eq!(shop.read_cart().quantity(&id("p1")), Some(1));
    }
}

#[test]
fn test_disabled_storage_shows_empty_cart() {
    let mut shop = storefront_with(MemoryStorage::disabled(), full_page(&StorefrontConfig::default()));
    shop.init("");
    assert_eq!(shop.document().is_hidden("#empty-cart"), Some(false));

    assert_eq!(
        click_add(&mut shop, "p1"),
        EventOutcome::Handled {
            prevent_default: true
        }
    );
    assert!(shop.read_cart().is_empty());
    assert_eq!(shop.document().text("#cart-badge").unwrap(), "0");
}

#[test]
fn test_quota_failure_keeps_previous_cart() {
    let storage = MemoryStorage::with_quota(KEY.len() + r#"{"p1":1}"#.len());
    let mut shop = storefront_with(storage, full_page(&StorefrontConfig::default()));
    shop.init("");

    shop.add_to_cart(&id("p1"));
    shop.add_to_cart(&id("p2"));

    assert_eq!(shop.read_cart().len(), 1);
    assert_eq!(shop.document().text("#cart-badge").unwrap(), "1");
}

#[test]
fn test_two_tabs_last_writer_wins() {
    let storage = MemoryStorage::new();
    let config = StorefrontConfig::default();
    let mut tab_a = storefront_with(storage.clone(), full_page(&config));
    let mut tab_b = storefront_with(storage.clone(), full_page(&config));
    tab_a.init("");
    tab_b.init("");

    tab_a.add_to_cart(&id("p1"));
    // Tab B reads fresh state on every mutation, so it sees A's write
    tab_b.add_to_cart(&id("p2"));
    assert_eq!(storage.get_item(KEY).unwrap().unwrap(), r#"{"p1":1,"p2":1}"#);

    // A's rendered page is stale until it mutates or re-renders
    assert_eq!(tab_a.document().text("#cart-badge").unwrap(), "1");
    tab_a.render_cart_page();
    tab_a.update_badge();
    assert_eq!(tab_a.document().text("#cart-badge").unwrap(), "2");

    // A full-cart write from a stale snapshot overwrites the other tab's work
    let stale: Cart = [(id("p3"), 1)].into_iter().collect();
    tab_b.write_cart(&stale);
    assert_eq!(tab_a.read_cart(), stale);
}
