//! Storefront
//!
//! Page state for headless use: catalog, cart, customer name and the
//! checkout orchestrator, with the full pay-and-reset flow.

use rust_decimal::Decimal;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::Checkout;
use crate::error::Result;
use crate::model::{Product, Receipt};

pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    customer_name: String,
    checkout: Checkout,
}

impl Storefront {
    pub fn new(catalog: Catalog, checkout: Checkout) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            customer_name: String::new(),
            checkout,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
    }

    /// Add the catalog product called `name`
    pub fn add_by_name(&mut self, name: &str) -> bool {
        match self.catalog.get(name) {
            Some(product) => {
                self.cart.add(product);
                true
            }
            None => false,
        }
    }

    pub fn remove_from_cart(&mut self, name: &str) {
        self.cart.remove(name);
    }

    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Run a whole checkout. On success the cart and name are reset.
    pub async fn pay(&mut self) -> Result<Receipt> {
        let pending = self.checkout.start(&self.cart, &self.customer_name).await?;
        let receipt = self.checkout.complete(pending).await?;

        self.reset();
        Ok(receipt)
    }

    fn reset(&mut self) {
        self.cart.clear();
        self.customer_name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockPaymentBackend;
    use crate::config::CheckoutConfig;
    use crate::error::CheckoutError;
    use crate::notify::TracingNotifier;
    use crate::widget::{MockWidget, WidgetBehavior};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn storefront(widget: MockWidget) -> Storefront {
        let checkout = Checkout::new(
            Arc::new(MockPaymentBackend::new()),
            Arc::new(widget),
            Arc::new(TracingNotifier),
            CheckoutConfig::default(),
        );
        Storefront::new(Catalog::default(), checkout)
    }

    #[test]
    fn test_add_by_name() {
        let mut store = storefront(MockWidget::default());
        assert!(store.add_by_name("Product B"));
        assert!(!store.add_by_name("Product Z"));
        assert_eq!(store.total(), dec!(700));
    }

    #[tokio::test]
    async fn test_pay_resets() {
        let mut store = storefront(MockWidget::default());
        store.add_by_name("Product A");
        store.set_customer_name("Asha");

        let receipt = store.pay().await.unwrap();

        assert_eq!(receipt.amount, dec!(500));
        assert!(store.cart().is_empty());
        assert_eq!(store.customer_name(), "");
    }

    #[tokio::test]
    async fn test_dismissed_keeps_cart() {
        let mut store = storefront(MockWidget::new(WidgetBehavior::Dismiss));
        store.add_by_name("Product A");
        store.set_customer_name("Asha");

        let result = store.pay().await;

        assert!(matches!(result, Err(CheckoutError::WidgetDismissed)));
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.customer_name(), "Asha");
    }
}
