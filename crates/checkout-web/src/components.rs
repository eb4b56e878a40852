//! UI Components

use checkout_core::{CartItem, Product};
use leptos::prelude::*;

/// Catalog tile with an "Add" button
#[component]
pub fn ProductCard(product: Product, on_add: Callback<Product>) -> impl IntoView {
    let name = product.name.clone();
    let price = product.price.to_string();

    view! {
        <div class="product-card">
            <span class="product-name">{name}</span>
            <span class="product-price">"₹"{price}</span>
            <button class="btn btn-add" on:click=move |_| on_add.run(product.clone())>
                "➕ Add"
            </button>
        </div>
    }
}

/// One cart line with -/+ controls
#[component]
pub fn CartRow(
    item: CartItem,
    on_add: Callback<Product>,
    on_remove: Callback<String>,
) -> impl IntoView {
    let label = format!("{} - ₹{} x {}", item.name, item.price, item.quantity);
    let name = item.name.clone();
    let product = item.product();

    view! {
        <li class="cart-row">
            <span>{label}</span>
            <div class="cart-row-actions">
                <button class="btn btn-remove" on:click=move |_| on_remove.run(name.clone())>
                    "➖"
                </button>
                <button class="btn btn-add" on:click=move |_| on_add.run(product.clone())>
                    "➕"
                </button>
            </div>
        </li>
    }
}
