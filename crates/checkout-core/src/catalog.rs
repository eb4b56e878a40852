//! Product Catalog
//!
//! The fixed set of products the storefront offers.

use rust_decimal_macros::dec;

use crate::model::Product;

/// Read-only product catalog
#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Self::default_products())
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Products shown on the checkout page
    pub fn default_products() -> Vec<Product> {
        vec![
            Product::new("Product A", dec!(500)),
            Product::new("Product B", dec!(700)),
        ]
    }

    /// Look up a product by name
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Product A").map(|p| p.price), Some(dec!(500)));
        assert_eq!(catalog.get("Product B").map(|p| p.price), Some(dec!(700)));
        assert!(catalog.get("Product C").is_none());
    }

    #[test]
    fn test_catalog_prices_positive() {
        assert!(Catalog::default().iter().all(|p| p.price > rust_decimal::Decimal::ZERO));
    }
}
