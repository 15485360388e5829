//! Demo product catalog.

use corner_shop_core::{Catalog, Price, Product};

/// The three products the stock pages are built around.
#[must_use]
pub fn default_catalog() -> Catalog {
    [
        Product::new("p1", "Wireless Headphones X100", Price::new(4999), "product-1-600.jpg"),
        Product::new("p2", "Boom Portable Speaker", Price::new(2499), "product-2-600.jpg"),
        Product::new("p3", "FitPro Smart Watch", Price::new(3199), "product-3-600.jpg"),
    ]
    .into_iter()
    .collect()
}
