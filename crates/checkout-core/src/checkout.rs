//! Checkout Orchestration
//!
//! Drives one checkout attempt through its states:
//!
//! ```text
//! Idle ─▶ Validating ─▶ CreatingOrder ─▶ AwaitingWidget ─▶ Capturing ─┬─▶ Succeeded
//!  ▲          │               │                │                       └─▶ Failed
//!  └──────────┴───────────────┴────────────────┘
//!        (alert and return to Idle; cart and name are kept)
//! ```
//!
//! [`Checkout::start`] runs up to opening the widget and hands back a
//! [`PendingPayment`]. The widget completes on its own schedule, so the
//! caller awaits the pending payment and passes it to [`Checkout::complete`].

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::backend::{CapturePaymentRequest, Order, PaymentBackend};
use crate::cart::Cart;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, MSG_PAYMENT_SUCCESS, Result};
use crate::model::Receipt;
use crate::notify::Notifier;
use crate::widget::{PaymentReceiver, PaymentResult, PaymentWidget, WidgetOptions};

/// Where a checkout attempt currently is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    CreatingOrder,
    AwaitingWidget,
    Capturing,
    Succeeded,
    Failed,
}

impl CheckoutState {
    /// Whether a network call or the widget is in flight
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Validating | Self::CreatingOrder | Self::AwaitingWidget | Self::Capturing
        )
    }
}

/// An order whose widget is open and waiting on the shopper
#[derive(Debug)]
pub struct PendingPayment {
    order: Order,
    receiver: PaymentReceiver,
}

impl PendingPayment {
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Wait for the widget's handler.
    ///
    /// A closed widget is `WidgetDismissed`. A payment the widget reported
    /// but that could not be read is `Verification`: the shopper has paid.
    pub async fn wait(self) -> Result<(Order, PaymentResult)> {
        match self.receiver.await {
            Ok(Ok(result)) => Ok((self.order, result)),
            Ok(Err(e)) => Err(CheckoutError::Verification(e.to_string())),
            Err(_) => Err(CheckoutError::WidgetDismissed),
        }
    }
}

/// Checkout orchestrator
pub struct Checkout {
    backend: Arc<dyn PaymentBackend>,
    widget: Arc<dyn PaymentWidget>,
    notifier: Arc<dyn Notifier>,
    config: CheckoutConfig,
    state: watch::Sender<CheckoutState>,
}

impl Checkout {
    pub fn new(
        backend: Arc<dyn PaymentBackend>,
        widget: Arc<dyn PaymentWidget>,
        notifier: Arc<dyn Notifier>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            backend,
            widget,
            notifier,
            config,
            state: watch::Sender::new(CheckoutState::Idle),
        }
    }

    pub fn state(&self) -> CheckoutState {
        *self.state.borrow()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    fn transition(&self, next: CheckoutState) {
        let prev = self.state.send_replace(next);
        tracing::debug!(from = ?prev, to = ?next, "Checkout state");
    }

    /// Log, alert the shopper, and move to `next`
    fn fail(&self, err: CheckoutError, next: CheckoutState) -> CheckoutError {
        match &err {
            CheckoutError::EmptyCart | CheckoutError::MissingCustomerName => {
                tracing::info!("Checkout blocked: {}", err);
            }
            CheckoutError::WidgetDismissed => {
                tracing::info!("Payment widget closed without payment");
            }
            _ => tracing::error!(retryable = err.is_retryable(), "Checkout failed: {}", err),
        }

        if let Some(message) = err.user_message() {
            self.notifier.alert(message);
        }

        self.transition(next);
        err
    }

    /// Check the preconditions for checkout, returning the trimmed name
    pub fn validate<'a>(&self, cart: &Cart, customer_name: &'a str) -> Result<&'a str> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let name = customer_name.trim();
        if name.is_empty() {
            return Err(CheckoutError::MissingCustomerName);
        }

        Ok(name)
    }

    /// Validate, create the order, and open the widget
    pub async fn start(&self, cart: &Cart, customer_name: &str) -> Result<PendingPayment> {
        self.transition(CheckoutState::Validating);
        let name = self
            .validate(cart, customer_name)
            .map_err(|e| self.fail(e, CheckoutState::Idle))?;

        self.transition(CheckoutState::CreatingOrder);
        let amount = cart.total();
        tracing::info!(%amount, items = cart.len(), backend = self.backend.name(), "Creating order");

        let order = self
            .backend
            .create_order(amount)
            .await
            .map_err(|e| self.fail(CheckoutError::OrderCreation(e.to_string()), CheckoutState::Idle))?;

        tracing::info!(order_id = %order.order_id, amount = %order.amount, "Order created");

        self.transition(CheckoutState::AwaitingWidget);
        if !self.widget.is_available() {
            return Err(self.fail(CheckoutError::WidgetUnavailable, CheckoutState::Idle));
        }

        let options = WidgetOptions::for_order(&order, name, &self.config)
            .map_err(|e| self.fail(e, CheckoutState::Idle))?;
        let receiver = self
            .widget
            .open(&options)
            .map_err(|e| self.fail(e, CheckoutState::Idle))?;

        tracing::info!(order_id = %order.order_id, amount_paise = options.amount, "Payment widget opened");

        Ok(PendingPayment { order, receiver })
    }

    /// Wait for the widget and verify the payment with the backend
    pub async fn complete(&self, pending: PendingPayment) -> Result<Receipt> {
        let (order, result) = pending.wait().await.map_err(|e| {
            let next = match e {
                CheckoutError::WidgetDismissed => CheckoutState::Idle,
                _ => CheckoutState::Failed,
            };
            self.fail(e, next)
        })?;

        self.capture(&order, &result).await
    }

    /// Verify a payment the widget reported for `order`
    pub async fn capture(&self, order: &Order, result: &PaymentResult) -> Result<Receipt> {
        self.transition(CheckoutState::Capturing);

        if result.razorpay_order_id != order.order_id {
            tracing::warn!(
                expected = %order.order_id,
                reported = %result.razorpay_order_id,
                "Widget reported a different order id"
            );
        }

        let request = CapturePaymentRequest::from(result);
        self.backend
            .capture_payment(&request)
            .await
            .map_err(|e| self.fail(CheckoutError::Verification(e.to_string()), CheckoutState::Failed))?;

        tracing::info!(
            order_id = %request.order_id,
            payment_id = %request.payment_id,
            "Payment captured"
        );

        self.notifier.alert(MSG_PAYMENT_SUCCESS);
        self.transition(CheckoutState::Succeeded);

        Ok(Receipt {
            payment_id: request.payment_id,
            order_id: request.order_id,
            amount: order.amount,
            captured_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockPaymentBackend;
    use crate::error::{
        MSG_EMPTY_CART, MSG_MISSING_NAME, MSG_ORDER_FAILED, MSG_VERIFICATION_FAILED,
        MSG_WIDGET_UNAVAILABLE,
    };
    use crate::model::Product;
    use crate::notify::RecordingNotifier;
    use crate::widget::{MockWidget, WidgetBehavior};
    use rust_decimal_macros::dec;

    struct Harness {
        backend: Arc<MockPaymentBackend>,
        widget: Arc<MockWidget>,
        notifier: Arc<RecordingNotifier>,
        checkout: Checkout,
    }

    fn harness(backend: MockPaymentBackend, widget: MockWidget) -> Harness {
        let backend = Arc::new(backend);
        let widget = Arc::new(widget);
        let notifier = Arc::new(RecordingNotifier::new());
        let checkout = Checkout::new(
            backend.clone(),
            widget.clone(),
            notifier.clone(),
            CheckoutConfig::default(),
        );
        Harness { backend, widget, notifier, checkout }
    }

    fn cart_with_a() -> Cart {
        let mut cart = Cart::new();
        cart.add(&Product::new("Product A", dec!(500)));
        cart
    }

    #[tokio::test]
    async fn test_empty_cart_blocks() {
        let h = harness(MockPaymentBackend::new(), MockWidget::default());

        let result = h.checkout.start(&Cart::new(), "Asha").await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(h.backend.call_count(), 0);
        assert_eq!(h.notifier.last().as_deref(), Some(MSG_EMPTY_CART));
        assert_eq!(h.checkout.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_blank_name_blocks() {
        let h = harness(MockPaymentBackend::new(), MockWidget::default());

        let result = h.checkout.start(&cart_with_a(), "   ").await;

        assert!(matches!(result, Err(CheckoutError::MissingCustomerName)));
        assert_eq!(h.backend.call_count(), 0);
        assert_eq!(h.notifier.last().as_deref(), Some(MSG_MISSING_NAME));
    }

    #[tokio::test]
    async fn test_start_opens_widget() {
        let h = harness(MockPaymentBackend::new(), MockWidget::new(WidgetBehavior::Hold));
        let mut cart = cart_with_a();
        cart.add(&Product::new("Product B", dec!(700)));

        let pending = h.checkout.start(&cart, "  Asha ").await.unwrap();

        assert_eq!(h.backend.created_orders(), vec![dec!(1200)]);
        assert_eq!(pending.order().order_id, "order_mock_1");
        assert_eq!(h.checkout.state(), CheckoutState::AwaitingWidget);

        let opened = h.widget.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].amount, 120_000);
        assert_eq!(opened[0].name, "Asha");
        assert_eq!(opened[0].key, "rzp_test_mock");
    }

    #[tokio::test]
    async fn test_order_failure_keeps_widget_closed() {
        let h = harness(MockPaymentBackend::new().failing_create(), MockWidget::default());

        let result = h.checkout.start(&cart_with_a(), "Asha").await;

        assert!(matches!(result, Err(CheckoutError::OrderCreation(_))));
        assert!(h.widget.opened().is_empty());
        assert_eq!(h.notifier.last().as_deref(), Some(MSG_ORDER_FAILED));
        assert_eq!(h.checkout.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_widget_unavailable() {
        let h = harness(MockPaymentBackend::new(), MockWidget::unavailable());

        let result = h.checkout.start(&cart_with_a(), "Asha").await;

        assert!(matches!(result, Err(CheckoutError::WidgetUnavailable)));
        assert_eq!(h.notifier.last().as_deref(), Some(MSG_WIDGET_UNAVAILABLE));
        assert_eq!(h.checkout.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_held_widget_completes_later() {
        let h = harness(MockPaymentBackend::new(), MockWidget::new(WidgetBehavior::Hold));
        let pending = h.checkout.start(&cart_with_a(), "Asha").await.unwrap();

        assert!(h.widget.complete());
        let receipt = h.checkout.complete(pending).await.unwrap();

        assert_eq!(receipt.order_id, "order_mock_1");
        assert_eq!(receipt.payment_id, "pay_order_mock_1");
        assert_eq!(receipt.amount, dec!(500));
        assert_eq!(h.checkout.state(), CheckoutState::Succeeded);
        assert_eq!(h.notifier.last().as_deref(), Some(MSG_PAYMENT_SUCCESS));
    }

    #[tokio::test]
    async fn test_dismissed_widget_skips_capture() {
        let h = harness(MockPaymentBackend::new(), MockWidget::new(WidgetBehavior::Dismiss));
        let pending = h.checkout.start(&cart_with_a(), "Asha").await.unwrap();

        let result = h.checkout.complete(pending).await;

        assert!(matches!(result, Err(CheckoutError::WidgetDismissed)));
        assert!(h.backend.captured_payments().is_empty());
        assert!(h.notifier.messages().is_empty());
        assert_eq!(h.checkout.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_unreadable_widget_result_alerts_verification_failure() {
        let h = harness(MockPaymentBackend::new(), MockWidget::new(WidgetBehavior::Garbled));
        let pending = h.checkout.start(&cart_with_a(), "Asha").await.unwrap();

        let result = h.checkout.complete(pending).await;

        assert!(matches!(result, Err(CheckoutError::Verification(_))));
        assert!(h.backend.captured_payments().is_empty());
        assert_eq!(h.notifier.messages(), vec![MSG_VERIFICATION_FAILED]);
        assert_eq!(h.checkout.state(), CheckoutState::Failed);
    }

    #[tokio::test]
    async fn test_state_is_observable() {
        let h = harness(MockPaymentBackend::new(), MockWidget::default());
        let mut states = h.checkout.subscribe();

        let pending = h.checkout.start(&cart_with_a(), "Asha").await.unwrap();
        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), CheckoutState::AwaitingWidget);
        assert!(CheckoutState::AwaitingWidget.is_busy());

        h.checkout.complete(pending).await.unwrap();
        assert_eq!(*states.borrow_and_update(), CheckoutState::Succeeded);
        assert!(!CheckoutState::Succeeded.is_busy());
    }

    #[tokio::test]
    async fn test_subscriber_sees_busy_until_widget_settles() {
        let h = harness(MockPaymentBackend::new(), MockWidget::new(WidgetBehavior::Hold));
        let mut states = h.checkout.subscribe();
        assert!(!states.borrow().is_busy());

        let pending = h.checkout.start(&cart_with_a(), "Asha").await.unwrap();
        assert!(states.borrow_and_update().is_busy());

        let watcher = tokio::spawn(async move {
            let mut seen = Vec::new();
            loop {
                states.changed().await.unwrap();
                let state = *states.borrow_and_update();
                seen.push(state);
                if !state.is_busy() {
                    return seen;
                }
            }
        });

        assert!(h.widget.complete());
        h.checkout.complete(pending).await.unwrap();

        let seen = watcher.await.unwrap();
        assert_eq!(seen.last(), Some(&CheckoutState::Succeeded));
        assert!(!h.checkout.state().is_busy());
    }
}
