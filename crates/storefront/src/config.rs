//! Storefront configuration.
//!
//! Every setting has a default matching the stock page markup, so
//! `StorefrontConfig::default()` is a complete configuration. Pages that
//! deviate from the stock markup can supply a JSON document with only the
//! fields they override:
//!
//! ```
//! use corner_shop_storefront::config::StorefrontConfig;
//!
//! let config = StorefrontConfig::from_json(r##"{
//!     "storage_key": "shop_cart_v2",
//!     "toast_duration_ms": 2500,
//!     "selectors": { "cart_badge": "#basket-count" }
//! }"##).unwrap();
//!
//! assert_eq!(config.storage_key, "shop_cart_v2");
//! assert_eq!(config.selectors.cart_badge, "#basket-count");
//! assert_eq!(config.selectors.toast, "#toast");
//! ```

use std::time::Duration;

use corner_shop_core::CurrencyCode;
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid setting {0}: {1}")]
    Invalid(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Key the cart is persisted under in the key-value store
    pub storage_key: String,
    /// How long a toast stays visible, in milliseconds
    pub toast_duration_ms: u64,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Directory product images are served from
    pub image_dir: String,
    /// Query parameter naming the product on the detail page
    pub product_query_param: String,
    /// Element selectors the storefront attaches to
    pub selectors: Selectors,
    /// User-visible text
    pub messages: Messages,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: "shop_cart_v1".to_string(),
            toast_duration_ms: 1800,
            currency: CurrencyCode::default(),
            image_dir: "images".to_string(),
            product_query_param: "id".to_string(),
            selectors: Selectors::default(),
            messages: Messages::default(),
        }
    }
}

/// Selectors for the elements the storefront reads and writes.
///
/// Each selector is either `#id` or `.class`; the first matching element
/// is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub cart_badge: String,
    /// Class carried by every add-to-cart control (with a `data-id`)
    pub add_to_cart: String,
    /// Class carried by every remove control in the cart list
    pub remove_item: String,
    /// Class carried by every quantity field in the cart list
    pub cart_quantity: String,
    pub modal: String,
    pub modal_overlay: String,
    pub modal_close: String,
    pub modal_description: String,
    pub toast: String,
    pub cart_container: String,
    pub cart_items: String,
    pub cart_summary: String,
    pub cart_total: String,
    pub cart_empty: String,
    pub product_title: String,
    pub product_image: String,
    pub product_price: String,
    pub product_description: String,
    pub product_add: String,
    pub contact_form: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_name_error: String,
    pub contact_email_error: String,
    pub contact_status: String,
    pub menu_toggle: String,
    pub nav_list: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            cart_badge: "#cart-badge".to_string(),
            add_to_cart: ".add-to-cart".to_string(),
            remove_item: ".remove-item".to_string(),
            cart_quantity: ".cart-qty".to_string(),
            modal: "#modal".to_string(),
            modal_overlay: "#modal-overlay".to_string(),
            modal_close: "#modal-close".to_string(),
            modal_description: "#modal-desc".to_string(),
            toast: "#toast".to_string(),
            cart_container: "#cart-container".to_string(),
            cart_items: "#cart-items".to_string(),
            cart_summary: "#cart-summary".to_string(),
            cart_total: "#cart-total".to_string(),
            cart_empty: "#empty-cart".to_string(),
            product_title: "#product-title".to_string(),
            product_image: "#product-img".to_string(),
            product_price: "#product-price".to_string(),
            product_description: "#product-desc".to_string(),
            product_add: "#product-add".to_string(),
            contact_form: "#contact-form".to_string(),
            contact_name: "#fname".to_string(),
            contact_email: "#femail".to_string(),
            contact_name_error: "#fname-error".to_string(),
            contact_email_error: "#femail-error".to_string(),
            contact_status: "#contact-status".to_string(),
            menu_toggle: ".menu-toggle".to_string(),
            nav_list: ".nav__list".to_string(),
        }
    }
}

impl Selectors {
    /// All selectors with their field names, for validation.
    fn named(&self) -> [(&'static str, &str); 27] {
        [
            ("cart_badge", self.cart_badge.as_str()),
            ("add_to_cart", self.add_to_cart.as_str()),
            ("remove_item", self.remove_item.as_str()),
            ("cart_quantity", self.cart_quantity.as_str()),
            ("modal", self.modal.as_str()),
            ("modal_overlay", self.modal_overlay.as_str()),
            ("modal_close", self.modal_close.as_str()),
            ("modal_description", self.modal_description.as_str()),
            ("toast", self.toast.as_str()),
            ("cart_container", self.cart_container.as_str()),
            ("cart_items", self.cart_items.as_str()),
            ("cart_summary", self.cart_summary.as_str()),
            ("cart_total", self.cart_total.as_str()),
            ("cart_empty", self.cart_empty.as_str()),
            ("product_title", self.product_title.as_str()),
            ("product_image", self.product_image.as_str()),
            ("product_price", self.product_price.as_str()),
            ("product_description", self.product_description.as_str()),
            ("product_add", self.product_add.as_str()),
            ("contact_form", self.contact_form.as_str()),
            ("contact_name", self.contact_name.as_str()),
            ("contact_email", self.contact_email.as_str()),
            ("contact_name_error", self.contact_name_error.as_str()),
            ("contact_email_error", self.contact_email_error.as_str()),
            ("contact_status", self.contact_status.as_str()),
            ("menu_toggle", self.menu_toggle.as_str()),
            ("nav_list", self.nav_list.as_str()),
        ]
    }
}

/// User-visible text.
///
/// `modal_added` may contain a `{title}` placeholder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub toast_added: String,
    pub modal_added: String,
    pub product_not_found: String,
    pub product_description: String,
    pub price_label: String,
    pub remove_label: String,
    pub name_required: String,
    pub email_invalid: String,
    pub contact_thanks: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            toast_added: "Added to cart".to_string(),
            modal_added: "{title} added to cart".to_string(),
            product_not_found: "Product not found".to_string(),
            product_description: "Full product description.".to_string(),
            price_label: "Price".to_string(),
            remove_label: "Remove".to_string(),
            name_required: "Please enter your name".to_string(),
            email_invalid: "Please enter a valid email".to_string(),
            contact_thanks: "Thank you! We have received your message.".to_string(),
        }
    }
}

impl Messages {
    /// Confirmation sentence shown in the modal for a product.
    #[must_use]
    pub fn modal_added_for(&self, title: &str) -> String {
        self.modal_added.replace("{title}", title)
    }
}

impl StorefrontConfig {
    /// Load configuration from a JSON document.
    ///
    /// Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed or a setting
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise fail silently at runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty storage key or query
    /// parameter, a zero toast duration, or a selector that is neither
    /// `#id` nor `.class`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage_key".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "toast_duration_ms".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        if self.product_query_param.is_empty() {
            return Err(ConfigError::Invalid(
                "product_query_param".to_string(),
                "must not be empty".to_string(),
            ));
        }
        for (name, selector) in self.selectors.named() {
            let valid = selector.len() > 1 && (selector.starts_with('#') || selector.starts_with('.'));
            if !valid {
                return Err(ConfigError::Invalid(
                    format!("selectors.{name}"),
                    format!("'{selector}' must be an #id or .class selector"),
                ));
            }
        }
        Ok(())
    }

    /// How long a toast stays visible.
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Image URL for a product image file.
    #[must_use]
    pub fn image_url(&self, file: &str) -> String {
        format!("{}/{file}", self.image_dir.trim_end_matches('/'))
    }
}
