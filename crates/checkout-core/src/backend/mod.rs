//! Payment Backend Integration
//!
//! The storefront talks to a payment backend over two endpoints:
//!
//! ```text
//! POST /api/payments/CreateOrder     { amount }                       -> { orderId, razorpayKey, amount }
//! POST /api/payments/CapturePayment  { paymentId, orderId, signature } -> (status only)
//! ```

mod http;
mod mock;

pub use http::HttpPaymentBackend;
pub use mock::MockPaymentBackend;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CheckoutError, Result};
use crate::widget::PaymentResult;

/// Body of the CreateOrder call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Cart total in rupees, sent as a JSON number
    #[serde(
        serialize_with = "serialize_amount",
        deserialize_with = "rust_decimal::serde::float::deserialize"
    )]
    pub amount: Decimal,
}

/// Whole amounts go out as JSON integers (`1200`, not `1200.0`) so that
/// backends binding to an integer type accept them. Others are floats.
fn serialize_amount<S: Serializer>(
    amount: &Decimal,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        if let Some(whole) = normalized.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    rust_decimal::serde::float::serialize(amount, serializer)
}

/// Server-issued payment intent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,

    /// Public key the widget must be opened with
    pub razorpay_key: String,

    /// Order amount in rupees
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Order {
    /// Reject orders the widget could not be opened with
    pub fn validate(&self) -> Result<()> {
        if self.order_id.trim().is_empty() {
            return Err(CheckoutError::InvalidResponse("missing orderId".into()));
        }
        if self.razorpay_key.trim().is_empty() {
            return Err(CheckoutError::InvalidResponse("missing razorpayKey".into()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(CheckoutError::InvalidResponse(format!(
                "non-positive amount {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Body of the CapturePayment call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePaymentRequest {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

impl From<&PaymentResult> for CapturePaymentRequest {
    fn from(result: &PaymentResult) -> Self {
        Self {
            payment_id: result.razorpay_payment_id.clone(),
            order_id: result.razorpay_order_id.clone(),
            signature: result.razorpay_signature.clone(),
        }
    }
}

/// Payment backend client trait
///
/// Browser futures are not `Send`, so the bound is relaxed on `wasm32`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PaymentBackend {
    /// Ask the backend to create an order for `amount` rupees
    async fn create_order(&self, amount: Decimal) -> Result<Order>;

    /// Ask the backend to verify a payment reported by the widget
    async fn capture_payment(&self, request: &CapturePaymentRequest) -> Result<()>;

    /// Backend name for logs
    fn name(&self) -> &str;
}
