//! Product detail page rendering.

use askama::Template;
use corner_shop_core::{Catalog, ProductId};
use url::form_urlencoded;

use crate::config::{Selectors, StorefrontConfig};
use crate::document::Document;
use crate::error::Result;

/// Extract the product id from a location query string.
///
/// The leading `?` is optional. If the parameter appears more than once
/// the first occurrence wins.
#[must_use]
pub fn product_id_from_query(search: &str, param: &str) -> Option<ProductId> {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| ProductId::new(value.into_owned()))
}

/// Resolved product shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: String,
    pub description: String,
}

/// What the detail page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPage {
    NotFound,
    Found(ProductDetail),
}

impl ProductPage {
    /// Resolve the page for a location query string.
    #[must_use]
    pub fn resolve(search: &str, catalog: &Catalog, config: &StorefrontConfig) -> Self {
        let Some(id) = product_id_from_query(search, &config.product_query_param) else {
            return Self::NotFound;
        };
        let Some(product) = catalog.get(&id) else {
            return Self::NotFound;
        };
        Self::Found(ProductDetail {
            id: product.id.clone(),
            title: product.title.clone(),
            image_url: config.image_url(&product.image),
            price: product.price.display(config.currency),
            description: config.messages.product_description.clone(),
        })
    }
}

/// Product price fragment.
#[derive(Template)]
#[template(path = "partials/product_price.html")]
pub struct ProductPriceTemplate<'a> {
    pub price: &'a str,
}

/// Write a product page into the document.
///
/// Requires the title element; without it nothing is written. For a
/// missing product only the title changes. Returns the product the add
/// control is now bound to.
///
/// # Errors
///
/// Returns `AppError::Template` if the price fragment fails to render.
pub fn apply_product_page(
    page: &ProductPage,
    doc: &mut impl Document,
    selectors: &Selectors,
    not_found: &str,
) -> Result<Option<ProductId>> {
    if !doc.contains(&selectors.product_title) {
        return Ok(None);
    }

    let detail = match page {
        ProductPage::NotFound => {
            doc.set_text(&selectors.product_title, not_found);
            return Ok(None);
        }
        ProductPage::Found(detail) => detail,
    };

    let price_html = ProductPriceTemplate {
        price: &detail.price,
    }
    .render()?;

    doc.set_text(&selectors.product_title, &detail.title);
    doc.set_attribute(&selectors.product_image, "src", &detail.image_url);
    doc.set_attribute(&selectors.product_image, "alt", &detail.title);
    doc.set_inner_html(&selectors.product_price, &price_html);
    doc.set_text(&selectors.product_description, &detail.description);
    doc.set_attribute(&selectors.product_add, "data-id", detail.id.as_str());
    Ok(Some(detail.id.clone()))
}
