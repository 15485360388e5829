//! The static product table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::price::Price;
use super::product::{Product, ProductId};

/// Mapping from product id to product, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: IndexMap<ProductId, Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, replacing any previous product with the same id.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Title of a product, or the id itself when the product is unknown.
    #[must_use]
    pub fn title_or_id<'a>(&'a self, id: &'a ProductId) -> &'a str {
        self.get(id).map_or(id.as_str(), |p| p.title.as_str())
    }

    /// Unit price of a product, or zero when the product is unknown.
    #[must_use]
    pub fn price_or_zero(&self, id: &ProductId) -> Price {
        self.get(id).map_or(Price::ZERO, |p| p.price)
    }

    /// Iterate products in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        products.into_iter().collect()
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products.into_values().collect()
    }
}
