//! Shopping Cart
//!
//! Ordered list of cart lines, unique by product name. Lines never hold a
//! quantity of zero: decrementing the last unit removes the line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{CartItem, Product};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, appending a new line if it isn't in the cart yet
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.name == product.name) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            });
        }

        tracing::debug!(product = %product.name, "Added to cart");
    }

    /// Remove one unit of the named product. No-op if absent.
    pub fn remove(&mut self, name: &str) {
        let Some(pos) = self.items.iter().position(|i| i.name == name) else {
            return;
        };

        let item = &mut self.items[pos];
        item.quantity = item.quantity.saturating_sub(1);
        if item.quantity == 0 {
            self.items.remove(pos);
        }

        tracing::debug!(product = %name, "Removed from cart");
    }

    /// Sum of price × quantity over all lines
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn quantity_of(&self, name: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.name == name)
            .map_or(0, |i| i.quantity)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
