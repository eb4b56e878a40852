//! Hosted Payment Widget
//!
//! The widget is an externally loaded script that shows its own modal and
//! reports back through a callback. Here the callback is a one-shot channel:
//! the widget keeps the sender and fires it once when the shopper pays,
//! with an error if the widget's response could not be read. Closing the
//! modal drops the sender instead.

mod loader;
mod mock;

pub use loader::{ScriptHost, ScriptLoad, WidgetLoader};
pub use mock::{MockWidget, WidgetBehavior};

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

use crate::backend::Order;
use crate::config::CheckoutConfig;
use crate::error::Result;
use crate::model::to_minor_units;

/// Sending half handed to the widget's completion handler
pub type PaymentSender = oneshot::Sender<Result<PaymentResult>>;

/// Receiving half kept by the checkout flow
pub type PaymentReceiver = oneshot::Receiver<Result<PaymentResult>>;

/// Create a connected sender/receiver pair
pub fn payment_channel() -> (PaymentSender, PaymentReceiver) {
    oneshot::channel()
}

/// What the widget hands to its handler after a completed payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetTheme {
    pub color: String,
}

/// Options the widget is constructed with
///
/// Field names match the hosted checkout's options object; the completion
/// handler is attached by the widget implementation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetOptions {
    pub key: String,

    /// Amount in paise
    pub amount: i64,

    pub currency: String,

    /// Shown in the widget header
    pub name: String,

    pub order_id: String,
    pub theme: WidgetTheme,
}

impl WidgetOptions {
    /// Build widget options for `order`, paid by `customer_name`
    pub fn for_order(order: &Order, customer_name: &str, config: &CheckoutConfig) -> Result<Self> {
        Ok(Self {
            key: order.razorpay_key.clone(),
            amount: to_minor_units(order.amount)?,
            currency: config.currency.clone(),
            name: customer_name.to_string(),
            order_id: order.order_id.clone(),
            theme: WidgetTheme {
                color: config.theme_color.clone(),
            },
        })
    }
}

/// Payment widget trait
pub trait PaymentWidget {
    /// Whether the widget's global constructor is present
    fn is_available(&self) -> bool;

    /// Open the widget modal; the receiver resolves when the shopper pays
    fn open(&self, options: &WidgetOptions) -> Result<PaymentReceiver>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_options_for_order() {
        let order = Order {
            order_id: "order_42".into(),
            razorpay_key: "rzp_test_key".into(),
            amount: dec!(1200),
        };
        let options =
            WidgetOptions::for_order(&order, "Asha", &CheckoutConfig::default()).unwrap();

        assert_eq!(options.amount, 120_000);
        assert_eq!(options.currency, "INR");
        assert_eq!(options.name, "Asha");
        assert_eq!(options.order_id, "order_42");

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["key"], "rzp_test_key");
        assert_eq!(json["amount"], 120_000);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["name"], "Asha");
        assert_eq!(json["order_id"], "order_42");
        assert_eq!(json["theme"]["color"], "#F37254");
    }

    #[test]
    fn test_payment_result_wire_names() {
        let result: PaymentResult = serde_json::from_str(
            r#"{"razorpay_payment_id":"pay_1","razorpay_order_id":"order_1","razorpay_signature":"sig"}"#,
        )
        .unwrap();
        assert_eq!(result.razorpay_payment_id, "pay_1");
        assert_eq!(result.razorpay_signature, "sig");
    }
}
