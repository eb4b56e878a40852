//! Storefront Checkout Frontend
//!
//! Leptos-based WASM checkout page backed by `checkout-core`.

mod app;
mod browser;
mod components;
mod logging;
mod pages;

pub use app::App;

use std::rc::Rc;
use std::sync::Arc;

use checkout_core::{Checkout, CheckoutConfig, HttpPaymentBackend};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::browser::{AlertNotifier, RazorpayWidget};

fn build_checkout(config: CheckoutConfig) -> checkout_core::Result<Checkout> {
    let backend = HttpPaymentBackend::new(&config)?;
    Ok(Checkout::new(
        Arc::new(backend),
        Arc::new(RazorpayWidget),
        Arc::new(AlertNotifier),
        config,
    ))
}

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = CheckoutConfig::from_env();
    logging::init(&config.log_filter);
    tracing::info!(backend = %config.backend_url, "Starting checkout page");

    match build_checkout(config) {
        Ok(checkout) => {
            let checkout = Rc::new(checkout);
            leptos::mount::mount_to_body(move || view! { <App checkout=checkout /> });
        }
        Err(e) => tracing::error!("Could not set up checkout: {}", e),
    }
}
