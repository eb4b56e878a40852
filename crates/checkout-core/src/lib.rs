//! # checkout-core
//!
//! Cart management and hosted-checkout orchestration for the storefront.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐  CreateOrder   ┌─────────────┐  open    ┌─────────────────┐
//! │   Cart   │───────────────▶│   Payment   │─────────▶│ Hosted checkout │
//! │ (total)  │                │   backend   │          │     widget      │
//! └──────────┘                └─────────────┘          └─────────────────┘
//!       ▲                            ▲                          │
//!       │ reset on success           │ CapturePayment           │ handler
//!       └────────────────────────────┴──────────────────────────┘
//! ```
//!
//! The backend, the widget and the shopper-facing alerts sit behind traits
//! (`PaymentBackend`, `PaymentWidget`, `Notifier`) so the same orchestration
//! runs in the browser and in tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use checkout_core::{Catalog, Checkout, CheckoutConfig, HttpPaymentBackend, Storefront};
//!
//! let config = CheckoutConfig::from_env();
//! let backend = Arc::new(HttpPaymentBackend::new(&config)?);
//! let checkout = Checkout::new(backend, widget, notifier, config);
//!
//! let mut store = Storefront::new(Catalog::default(), checkout);
//! store.add_by_name("Product A");
//! store.set_customer_name("Asha");
//! let receipt = store.pay().await?;
//! ```

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod storefront;
pub mod widget;

pub use backend::{HttpPaymentBackend, MockPaymentBackend, Order, PaymentBackend};
pub use cart::Cart;
pub use catalog::Catalog;
pub use checkout::{Checkout, CheckoutState, PendingPayment};
pub use config::CheckoutConfig;
pub use error::{CheckoutError, Result};
pub use model::{CartItem, Product, Receipt};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use storefront::Storefront;
pub use widget::{
    PaymentResult, PaymentWidget, ScriptHost, ScriptLoad, WidgetLoader, WidgetOptions,
};
