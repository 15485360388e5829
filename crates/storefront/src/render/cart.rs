//! Cart page rendering.
//!
//! [`CartView::build`] projects the cart and catalog into display data and
//! never touches the page; [`apply_cart_view`] writes that data into the
//! page. Rendering the same cart twice produces the same page.

use askama::Template;
use corner_shop_core::{Cart, Catalog, CurrencyCode, Price};

use crate::config::{Messages, Selectors};
use crate::document::Document;
use crate::error::Result;

/// One cart line for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: String,
    pub title: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: Price,
}

/// Display data for the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    Empty,
    Items {
        rows: Vec<CartRow>,
        total: Price,
        total_display: String,
    },
}

impl CartView {
    /// Project `cart` against `catalog`.
    ///
    /// Rows follow the cart's insertion order. Products missing from the
    /// catalog are shown with their id as title and a zero price.
    #[must_use]
    pub fn build(cart: &Cart, catalog: &Catalog, currency: CurrencyCode) -> Self {
        if cart.is_empty() {
            return Self::Empty;
        }

        let rows: Vec<CartRow> = cart
            .iter()
            .map(|(id, quantity)| {
                let price = catalog.price_or_zero(id);
                CartRow {
                    id: id.to_string(),
                    title: catalog.title_or_id(id).to_string(),
                    unit_price: price.display(currency),
                    quantity,
                    line_total: price.line_total(quantity),
                }
            })
            .collect();
        let total: Price = rows.iter().map(|row| row.line_total).sum();

        Self::Items {
            rows,
            total,
            total_display: total.display(currency),
        }
    }

    /// Total across all rows; zero for an empty cart.
    #[must_use]
    pub const fn total(&self) -> Price {
        match self {
            Self::Empty => Price::ZERO,
            Self::Items { total, .. } => *total,
        }
    }
}

/// Cart rows fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub rows: &'a [CartRow],
    pub price_label: &'a str,
    pub remove_label: &'a str,
}

/// Write a cart view into the page.
///
/// Needs the cart container, item list, summary and total elements; if any
/// is missing the page is left untouched. The empty-state element is
/// optional.
///
/// # Errors
///
/// Returns `AppError::Template` if the rows fragment fails to render. The
/// page is not modified in that case.
pub fn apply_cart_view(
    view: &CartView,
    doc: &mut impl Document,
    selectors: &Selectors,
    messages: &Messages,
) -> Result<()> {
    let required = [
        &selectors.cart_container,
        &selectors.cart_items,
        &selectors.cart_summary,
        &selectors.cart_total,
    ];
    if !required.iter().all(|s| doc.contains(s)) {
        return Ok(());
    }

    match view {
        CartView::Empty => {
            doc.set_hidden(&selectors.cart_items, true);
            doc.set_hidden(&selectors.cart_summary, true);
            doc.set_hidden(&selectors.cart_empty, false);
        }
        CartView::Items {
            rows,
            total_display,
            ..
        } => {
            let html = CartItemsTemplate {
                rows,
                price_label: &messages.price_label,
                remove_label: &messages.remove_label,
            }
            .render()?;
            doc.set_inner_html(&selectors.cart_items, &html);
            doc.set_hidden(&selectors.cart_items, false);
            doc.set_hidden(&selectors.cart_empty, true);
            doc.set_hidden(&selectors.cart_summary, false);
            doc.set_text(&selectors.cart_total, total_display);
        }
    }
    Ok(())
}
