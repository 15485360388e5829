//! Property tests for the cart cycle.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use corner_shop_core::{Cart, CurrencyCode, Price, ProductId};
use corner_shop_integration_tests::{full_page, storefront_with};
use corner_shop_storefront::render::CartView;
use corner_shop_storefront::storage::{CartStore, MemoryStorage};
use corner_shop_storefront::{StorefrontConfig, default_catalog};
use proptest::prelude::*;

fn product_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("p1".to_string()),
        Just("p2".to_string()),
        Just("p3".to_string()),
        "[a-z0-9_-]{1,8}",
    ]
}

fn cart() -> impl Strategy<Value = Cart> {
    prop::collection::vec((product_id(), 0u32..1000), 0..8)
        .prop_map(|entries| entries.into_iter().map(|(id, q)| (ProductId::new(id), q)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quantity_counts_adds(ids in prop::collection::vec(product_id(), 0..20)) {
        let mut shop = storefront_with(MemoryStorage::new(), full_page(&StorefrontConfig::default()));
        shop.init("");
        for id in &ids {
            shop.add_to_cart(&ProductId::new(id.as_str()));
        }

        let mut expected: HashMap<&str, u32> = HashMap::new();
        for id in &ids {
            *expected.entry(id.as_str()).or_default() += 1;
        }
        let cart = shop.read_cart();
        prop_assert_eq!(cart.len(), expected.len());
        for (id, count) in expected {
            prop_assert_eq!(cart.quantity(&ProductId::new(id)), Some(count));
        }
    }

    #[test]
    fn prop_remove_missing_id_is_noop(cart in cart(), missing in "[A-Z]{1,6}") {
        // Generated ids are lowercase, so an uppercase id is never present
        let store = CartStore::new(MemoryStorage::new(), "shop_cart_v1");
        store.write(&cart);
        let mut shop = storefront_with(store.storage().clone(), full_page(&StorefrontConfig::default()));
        let before = shop.read_cart();

        shop.remove_item(&ProductId::new(missing));
        prop_assert_eq!(shop.read_cart(), before);
    }

    #[test]
    fn prop_write_then_read_round_trips(cart in cart()) {
        let store = CartStore::new(MemoryStorage::new(), "shop_cart_v1");
        store.write(&cart);
        prop_assert_eq!(store.read(), cart);
    }

    #[test]
    fn prop_total_is_sum_of_lines(cart in cart()) {
        let catalog = default_catalog();
        let expected: u64 = cart
            .iter()
            .map(|(id, qty)| catalog.get(id).map_or(0, |p| p.price.amount()) * u64::from(qty))
            .sum();

        let view = CartView::build(&cart, &catalog, CurrencyCode::RUB);
        prop_assert_eq!(view.total(), Price::new(expected));
        if cart.is_empty() {
            prop_assert_eq!(view, CartView::Empty);
        }
    }
}
