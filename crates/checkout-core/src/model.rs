//! Domain Models
//!
//! Products, cart lines and receipts.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

/// A product offered by the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also the unique key within a cart
    pub name: String,

    /// Unit price in rupees
    pub price: Decimal,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A product with a quantity, as held by the cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub price: Decimal,

    /// Always at least 1 while the item is in a cart
    pub quantity: u32,
}

impl CartItem {
    /// The product this line was created from
    pub fn product(&self) -> Product {
        Product::new(self.name.clone(), self.price)
    }

    /// price × quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Proof of a verified payment, handed back after capture
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    pub payment_id: String,
    pub order_id: String,

    /// Amount charged, in rupees
    pub amount: Decimal,

    pub captured_at: DateTime<Utc>,
}

/// Convert rupees to paise for the payment widget.
///
/// Fractional paise are rounded half-even.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|paise| paise.round().to_i64())
        .ok_or_else(|| CheckoutError::InvalidAmount(amount.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_total() {
        let item = CartItem {
            name: "Product B".into(),
            price: dec!(700),
            quantity: 3,
        };
        assert_eq!(item.line_total(), dec!(2100));
        assert_eq!(item.product(), Product::new("Product B", dec!(700)));
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(to_minor_units(dec!(1200)).unwrap(), 120_000);
        assert_eq!(to_minor_units(dec!(499.99)).unwrap(), 49_999);
        assert_eq!(to_minor_units(Decimal::ZERO).unwrap(), 0);
    }

    #[test]
    fn test_minor_units_overflow() {
        assert!(to_minor_units(Decimal::MAX).is_err());
    }
}
