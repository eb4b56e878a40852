//! Browser Bindings
//!
//! DOM-backed implementations of the checkout seams: script injection,
//! the hosted checkout widget, and `window.alert`.

use std::cell::RefCell;
use std::rc::Rc;

use checkout_core::widget::{PaymentReceiver, payment_channel};
use checkout_core::{
    CheckoutError, Notifier, PaymentResult, PaymentWidget, Result, ScriptHost, WidgetOptions,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn js_error(value: JsValue) -> CheckoutError {
    CheckoutError::Widget(format!("{value:?}"))
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Current page's `<body>`
pub struct DomScriptHost;

impl ScriptHost for DomScriptHost {
    fn has_script(&self, id: &str) -> bool {
        document().and_then(|d| d.get_element_by_id(id)).is_some()
    }

    fn inject_script(&self, id: &str, src: &str) -> Result<()> {
        let document = document().ok_or_else(|| CheckoutError::Widget("no document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| CheckoutError::Widget("no document body".into()))?;

        let script: web_sys::HtmlScriptElement = document
            .create_element("script")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| CheckoutError::Widget("not a script element".into()))?;

        script.set_id(id);
        script.set_src(src);
        script.set_async(true);

        let onload = Closure::<dyn FnMut()>::new(|| tracing::info!("Razorpay SDK loaded"));
        let onerror = Closure::<dyn FnMut()>::new(|| tracing::error!("Failed to load Razorpay SDK"));
        script.set_onload(Some(onload.as_ref().unchecked_ref()));
        script.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        body.append_child(&script).map_err(js_error)?;
        Ok(())
    }
}

/// Hosted checkout opened through the page's `Razorpay` global
pub struct RazorpayWidget;

impl RazorpayWidget {
    fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<()> {
        js_sys::Reflect::set(target, &JsValue::from_str(key), value)
            .map(|_| ())
            .map_err(js_error)
    }

    /// `window.Razorpay`, if the checkout script has run
    fn constructor() -> Option<js_sys::Function> {
        js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Razorpay"))
            .ok()
            .and_then(|ctor| ctor.dyn_into::<js_sys::Function>().ok())
    }

    fn parse_result(response: &JsValue) -> Result<PaymentResult> {
        let json: String = js_sys::JSON::stringify(response).map_err(js_error)?.into();
        Ok(serde_json::from_str(&json)?)
    }
}

impl PaymentWidget for RazorpayWidget {
    fn is_available(&self) -> bool {
        Self::constructor().is_some()
    }

    fn open(&self, options: &WidgetOptions) -> Result<PaymentReceiver> {
        let js_options = js_sys::JSON::parse(&serde_json::to_string(options)?).map_err(js_error)?;

        // Shared so that whichever of handler/ondismiss fires first consumes it.
        let (sender, receiver) = payment_channel();
        let slot = Rc::new(RefCell::new(Some(sender)));

        let handler_slot = slot.clone();
        let handler = Closure::once_into_js(move |response: JsValue| {
            let Some(sender) = handler_slot.borrow_mut().take() else {
                return;
            };
            let result = Self::parse_result(&response);
            if let Err(e) = &result {
                tracing::error!("Unreadable payment response: {}", e);
            }
            let _ = sender.send(result);
        });

        let ondismiss = Closure::once_into_js(move || {
            slot.borrow_mut().take();
        });

        let modal = js_sys::Object::new();
        Self::set(&modal, "ondismiss", &ondismiss)?;
        Self::set(&js_options, "modal", &modal)?;
        Self::set(&js_options, "handler", &handler)?;

        let ctor = Self::constructor().ok_or(CheckoutError::WidgetUnavailable)?;
        let instance = js_sys::Reflect::construct(&ctor, &js_sys::Array::of1(&js_options))
            .map_err(js_error)?;
        let open: js_sys::Function = js_sys::Reflect::get(&instance, &JsValue::from_str("open"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| CheckoutError::Widget("widget has no open()".into()))?;
        open.call0(&instance).map_err(js_error)?;

        Ok(receiver)
    }
}

/// Blocking `window.alert`
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                tracing::warn!("alert failed: {:?}", e);
            }
        }
    }
}
