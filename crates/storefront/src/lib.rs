//! Corner Shop storefront library.
//!
//! Page logic for the storefront: the persisted cart and its badge, the
//! cart and product page renderers, toast and modal notifications, the
//! contact form and the navigation toggle.
//!
//! The browser pieces the storefront depends on are traits so the whole
//! crate runs headlessly:
//!
//! - [`storage::KeyValueStore`] for local storage ([`storage::MemoryStorage`])
//! - [`document::Document`] for the page ([`document::HeadlessDocument`])
//! - [`notify::Timers`] for deferred work ([`notify::ManualTimers`])

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod document;
pub mod error;
pub mod events;
pub mod nav;
pub mod notify;
pub mod render;
pub mod storage;

pub use app::{EventOutcome, HeadlessStorefront, Storefront};
pub use catalog::default_catalog;
pub use config::{ConfigError, StorefrontConfig};
pub use error::AppError;
