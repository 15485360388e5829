//! Integration tests for Corner Shop.
//!
//! Scenarios drive a [`HeadlessStorefront`] the way a page would: build the
//! page, call `init`, then feed it events and timer ticks.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! RUST_LOG=corner_shop_storefront=debug cargo test -p corner-shop-integration-tests -- --nocapture
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use corner_shop_storefront::document::HeadlessDocument;
use corner_shop_storefront::notify::ManualTimers;
use corner_shop_storefront::storage::MemoryStorage;
use corner_shop_storefront::{HeadlessStorefront, Storefront, StorefrontConfig, default_catalog};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Route storefront logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("corner_shop_storefront=debug,warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Every storefront page section in one document.
#[must_use]
pub fn full_page(config: &StorefrontConfig) -> HeadlessDocument {
    let selectors = &config.selectors;
    HeadlessDocument::layout(selectors)
        .with_product_grid(&default_catalog(), selectors)
        .with_cart_section(selectors)
        .with_product_section(selectors)
        .with_contact_form(selectors)
}

/// A storefront over `storage` with the default configuration and catalog,
/// not yet initialized.
#[must_use]
pub fn storefront_with(storage: MemoryStorage, document: HeadlessDocument) -> HeadlessStorefront {
    init_tracing();
    Storefront::new(
        StorefrontConfig::default(),
        default_catalog(),
        storage,
        document,
        ManualTimers::new(),
    )
}

/// An initialized storefront on a full page with empty storage.
#[must_use]
pub fn storefront() -> HeadlessStorefront {
    let mut shop = storefront_with(MemoryStorage::new(), full_page(&StorefrontConfig::default()));
    shop.init("");
    shop
}
