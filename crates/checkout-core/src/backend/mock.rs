//! Mock Payment Backend
//!
//! For testing and demo purposes. Issues predictable order ids and records
//! every call it receives.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{CapturePaymentRequest, Order, PaymentBackend};
use crate::error::{CheckoutError, Result};

/// In-memory backend with switchable failures
pub struct MockPaymentBackend {
    key: String,
    fail_create: AtomicBool,
    fail_capture: AtomicBool,
    next_order: AtomicUsize,
    created: Mutex<Vec<Decimal>>,
    captured: Mutex<Vec<CapturePaymentRequest>>,
}

impl Default for MockPaymentBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPaymentBackend {
    pub fn new() -> Self {
        Self {
            key: "rzp_test_mock".into(),
            fail_create: AtomicBool::new(false),
            fail_capture: AtomicBool::new(false),
            next_order: AtomicUsize::new(1),
            created: Mutex::new(Vec::new()),
            captured: Mutex::new(Vec::new()),
        }
    }

    /// Make every CreateOrder call fail
    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    /// Make every CapturePayment call fail
    pub fn failing_capture(self) -> Self {
        self.fail_capture.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_capture(&self, fail: bool) {
        self.fail_capture.store(fail, Ordering::SeqCst);
    }

    /// Amounts passed to CreateOrder, in call order
    pub fn created_orders(&self) -> Vec<Decimal> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Bodies passed to CapturePayment, in call order
    pub fn captured_payments(&self) -> Vec<CapturePaymentRequest> {
        self.captured.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Total number of backend calls of either kind
    pub fn call_count(&self) -> usize {
        self.created_orders().len() + self.captured_payments().len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PaymentBackend for MockPaymentBackend {
    async fn create_order(&self, amount: Decimal) -> Result<Order> {
        if let Ok(mut created) = self.created.lock() {
            created.push(amount);
        }

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(CheckoutError::Backend {
                status: 500,
                body: "order service unavailable".into(),
            });
        }

        let n = self.next_order.fetch_add(1, Ordering::SeqCst);
        Ok(Order {
            order_id: format!("order_mock_{n}"),
            razorpay_key: self.key.clone(),
            amount,
        })
    }

    async fn capture_payment(&self, request: &CapturePaymentRequest) -> Result<()> {
        if let Ok(mut captured) = self.captured.lock() {
            captured.push(request.clone());
        }

        if self.fail_capture.load(Ordering::SeqCst) {
            return Err(CheckoutError::Backend {
                status: 400,
                body: "signature mismatch".into(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "MockPaymentBackend"
    }
}
