//! Main App Component

use std::rc::Rc;

use checkout_core::Checkout;
use leptos::prelude::*;

use crate::pages::CheckoutPage;

/// Root application component
#[component]
pub fn App(checkout: Rc<Checkout>) -> impl IntoView {
    view! {
        <main class="app">
            <CheckoutPage checkout=checkout />
        </main>
    }
}
