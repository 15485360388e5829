//! Page renderers.
//!
//! Each renderer is split in two: a pure view model computed from the cart
//! and catalog, and an `apply_*` function that writes it into a
//! [`Document`](crate::document::Document).

pub mod cart;
pub mod product;

pub use cart::{CartItemsTemplate, CartRow, CartView, apply_cart_view};
pub use product::{
    ProductDetail, ProductPage, ProductPriceTemplate, apply_product_page, product_id_from_query,
};
