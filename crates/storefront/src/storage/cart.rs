//! Cart persistence.
//!
//! The persisted layout is a single JSON object under the configured key,
//! mapping product id to quantity: `{"p1":2,"p3":1}`. The stored value is
//! the only source of truth; nothing here caches a cart between calls.

use corner_shop_core::Cart;
use tracing::instrument;

use super::KeyValueStore;
use crate::error::AppError;

/// Repository for the persisted cart.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart store over `storage`, persisting under `key`.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key the cart lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted cart.
    ///
    /// A missing value, a JSON `null`, an unreadable store, or malformed
    /// data all yield an empty cart. Failures are logged, never returned.
    #[must_use]
    pub fn read(&self) -> Cart {
        self.try_read().unwrap_or_else(|e| {
            tracing::error!(key = %self.key, error = %e, "Discarding unreadable cart");
            Cart::new()
        })
    }

    /// Persist `cart`, replacing the stored value.
    ///
    /// Storage failures (e.g. quota exceeded) are logged and swallowed; the
    /// previously stored cart stays in place.
    #[instrument(skip(self, cart), fields(key = %self.key, entries = cart.len()))]
    pub fn write(&self, cart: &Cart) {
        if let Err(e) = self.try_write(cart) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }

    /// Read the persisted cart, reporting why it could not be read.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the store fails, or
    /// `AppError::CorruptCart` if the stored text is not a cart.
    pub fn try_read(&self) -> Result<Cart, AppError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Cart::new());
        };
        let cart: Option<Cart> = serde_json::from_str(&raw)?;
        Ok(cart.unwrap_or_default())
    }

    /// Persist `cart`, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the store rejects the write.
    pub fn try_write(&self, cart: &Cart) -> Result<(), AppError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set_item(&self.key, &raw)?;
        Ok(())
    }
}

/// Parse a quantity typed into a cart row.
///
/// Parsing is lenient: leading whitespace and an optional sign are
/// accepted, and anything after the leading digits is ignored (`"3abc"` is
/// 3). Input with no leading digits, zero, or a negative number yields 1.
/// Values beyond `u32::MAX` saturate.
///
/// ```
/// use corner_shop_storefront::storage::parse_quantity;
///
/// assert_eq!(parse_quantity("4"), 4);
/// assert_eq!(parse_quantity(" 12 pcs"), 12);
/// assert_eq!(parse_quantity("0"), 1);
/// assert_eq!(parse_quantity("-3"), 1);
/// assert_eq!(parse_quantity("abc"), 1);
/// ```
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = s
        .strip_prefix('-')
        .map_or_else(|| (false, s.strip_prefix('+').unwrap_or(s)), |rest| (true, rest));

    let mut value: u32 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if !seen_digit || negative || value == 0 {
        1
    } else {
        value
    }
}
