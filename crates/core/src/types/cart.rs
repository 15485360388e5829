//! Shopping cart contents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::product::ProductId;

/// Mapping from product id to quantity, in insertion order.
///
/// Serialized as a flat JSON object, e.g. `{"p1":2,"p3":1}`. Entries written
/// through [`Cart::increment`] and [`Cart::set`] always hold a quantity of at
/// least 1; setting a quantity of 0 removes the entry instead.
///
/// ## Examples
///
/// ```
/// use corner_shop_core::{Cart, ProductId};
///
/// let mut cart = Cart::new();
/// cart.increment(ProductId::new("p1"));
/// cart.increment(ProductId::new("p1"));
/// cart.increment(ProductId::new("p3"));
///
/// assert_eq!(cart.item_count(), 3);
/// assert_eq!(serde_json::to_string(&cart).unwrap(), r#"{"p1":2,"p3":1}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(IndexMap<ProductId, u32>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product, returning the new quantity.
    pub fn increment(&mut self, id: ProductId) -> u32 {
        let qty = self.0.entry(id).or_insert(0);
        *qty = qty.saturating_add(1);
        *qty
    }

    /// Set the quantity of a product. A quantity of 0 removes the entry.
    pub fn set(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.0.shift_remove(&id);
        } else {
            self.0.insert(id, quantity);
        }
    }

    /// Remove a product, returning its previous quantity.
    ///
    /// Remaining entries keep their relative order.
    pub fn remove(&mut self, id: &ProductId) -> Option<u32> {
        self.0.shift_remove(id)
    }

    /// Quantity of a product, if present.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> Option<u32> {
        self.0.get(id).copied()
    }

    /// Total number of units across all entries (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.0.values().map(|&q| u64::from(q)).sum()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.0.iter().map(|(id, &qty)| (id, qty))
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ProductId, u32)> for Cart {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
