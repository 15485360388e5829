//! Integer price representation.
//!
//! Prices are whole amounts in the smallest unit the shop bills in. There is
//! no fractional arithmetic anywhere in the storefront: totals are plain sums
//! of `unit price * quantity`.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// A price in minor currency units.
///
/// ## Examples
///
/// ```
/// use corner_shop_core::{CurrencyCode, Price};
///
/// let unit = Price::new(4999);
/// assert_eq!(unit.line_total(2), Price::new(9998));
/// assert_eq!(unit.display(CurrencyCode::RUB), "4999 ₽");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero price, used for products missing from the catalog.
    pub const ZERO: Self = Self(0);

    /// Create a new price from an amount in minor units.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units, saturating at `u64::MAX`.
    #[must_use]
    pub const fn line_total(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Format for display with the currency symbol as a suffix (e.g., "4999 ₽").
    #[must_use]
    pub fn display(self, currency: CurrencyCode) -> String {
        format!("{} {}", self.0, currency.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}

/// ISO 4217 currency codes the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Display symbol appended to formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::RUB => "₽",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::RUB => "RUB",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}
