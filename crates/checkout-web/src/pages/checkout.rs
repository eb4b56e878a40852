//! Checkout Page

use std::rc::Rc;

use checkout_core::{Cart, Catalog, Checkout, CheckoutState, Product, WidgetLoader};
use leptos::prelude::*;

use crate::browser::DomScriptHost;
use crate::components::{CartRow, ProductCard};

#[component]
pub fn CheckoutPage(checkout: Rc<Checkout>) -> impl IntoView {
    let catalog = Catalog::default();
    let cart = RwSignal::new(Cart::new());
    let customer_name = RwSignal::new(String::new());
    let total = Memo::new(move |_| cart.with(Cart::total));

    let config = checkout.config().clone();
    Effect::new(move |_| {
        WidgetLoader::global().ensure_loaded(&DomScriptHost, &config);
    });

    // Mirror the orchestrator's state so the button locks while a payment runs.
    let state = RwSignal::new(checkout.state());
    let mut states = checkout.subscribe();
    leptos::task::spawn_local(async move {
        while states.changed().await.is_ok() {
            let next = *states.borrow_and_update();
            state.set(next);
        }
    });
    let busy = Memo::new(move |_| state.get().is_busy());

    let checkout = StoredValue::new_local(checkout);

    let add = Callback::new(move |product: Product| cart.update(|c| c.add(&product)));
    let remove = Callback::new(move |name: String| cart.update(|c| c.remove(&name)));

    let pay = move |_| {
        if busy.get_untracked() {
            return;
        }
        let checkout = checkout.get_value();
        let snapshot = cart.get_untracked();
        let name = customer_name.get_untracked();

        leptos::task::spawn_local(async move {
            // Failures are logged and alerted by the orchestrator.
            let Ok(pending) = checkout.start(&snapshot, &name).await else {
                return;
            };
            if checkout.complete(pending).await.is_ok() {
                cart.set(Cart::new());
                customer_name.set(String::new());
            }
        });
    };

    view! {
        <div class="checkout">
            <h2 class="title">"🛍️ Product List"</h2>

            <div class="catalog">
                {catalog
                    .products()
                    .iter()
                    .cloned()
                    .map(|product| view! { <ProductCard product=product on_add=add /> })
                    .collect_view()}
            </div>

            <div class="cart-panel">
                <h3>"🛒 Your Cart"</h3>
                <Show
                    when=move || cart.with(|c| !c.is_empty())
                    fallback=|| view! { <p class="cart-empty">"Cart is empty."</p> }
                >
                    <ul class="cart-items">
                        <For
                            each=move || cart.with(|c| c.items().to_vec())
                            key=|item| (item.name.clone(), item.quantity)
                            children=move |item| view! { <CartRow item=item on_add=add on_remove=remove /> }
                        />
                    </ul>
                </Show>

                <h3 class="total">"Total: ₹"{move || total.get().to_string()}</h3>

                <input
                    type="text"
                    placeholder="Enter Your Name"
                    prop:value=move || customer_name.get()
                    on:input=move |ev| customer_name.set(event_target_value(&ev))
                />

                <button
                    class="btn btn-primary"
                    on:click=pay
                    disabled=move || busy.get() || cart.with(Cart::is_empty)
                >
                    {move || if busy.get() { "Processing…" } else { "Checkout & Pay" }}
                </button>
            </div>
        </div>
    }
}
