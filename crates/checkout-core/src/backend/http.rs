//! HTTP Payment Backend
//!
//! `reqwest` client for the CreateOrder / CapturePayment endpoints.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{CapturePaymentRequest, CreateOrderRequest, Order, PaymentBackend};
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};

/// Payment backend reached over HTTP
pub struct HttpPaymentBackend {
    client: reqwest::Client,
    create_order_url: String,
    capture_url: String,
}

impl HttpPaymentBackend {
    /// Create a client for the backend named in `config`
    pub fn new(config: &CheckoutConfig) -> Result<Self> {
        let builder = reqwest::Client::builder();

        // Browsers do not expose a client-level timeout.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        Ok(Self {
            client: builder.build()?,
            create_order_url: config.endpoint("CreateOrder"),
            capture_url: config.endpoint("CapturePayment"),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&CheckoutConfig::from_env())
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CheckoutError::Backend {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PaymentBackend for HttpPaymentBackend {
    async fn create_order(&self, amount: Decimal) -> Result<Order> {
        tracing::debug!(url = %self.create_order_url, %amount, "Creating order");

        let response = self
            .post(&self.create_order_url, &CreateOrderRequest { amount })
            .await?;

        let text = response.text().await?;
        let order: Order = serde_json::from_str(&text)
            .map_err(|e| CheckoutError::InvalidResponse(e.to_string()))?;
        order.validate()?;

        Ok(order)
    }

    async fn capture_payment(&self, request: &CapturePaymentRequest) -> Result<()> {
        tracing::debug!(
            url = %self.capture_url,
            order_id = %request.order_id,
            payment_id = %request.payment_id,
            "Capturing payment"
        );

        self.post(&self.capture_url, request).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "HttpPaymentBackend"
    }
}
