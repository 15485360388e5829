//! Core types for Corner Shop.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod catalog;
pub mod email;
pub mod price;
pub mod product;

pub use cart::Cart;
pub use catalog::Catalog;
pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price};
pub use product::{Product, ProductId};
