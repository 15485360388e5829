//! Corner Shop Core - Shared domain types.
//!
//! This crate provides the types the storefront is built from:
//! - [`Product`] and [`Catalog`] - the static product table
//! - [`Cart`] - the persisted mapping of product id to quantity
//! - [`Price`] - integer prices in minor currency units
//! - [`Email`] - a validated contact address
//!
//! # Architecture
//!
//! The core crate holds plain data types and never performs I/O.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
