//! Checkout Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Shown when the cart has no items at checkout time.
pub const MSG_EMPTY_CART: &str = "Cart is empty. Add products before checkout.";
/// Shown when the customer name is blank at checkout time.
pub const MSG_MISSING_NAME: &str = "Please enter your name before proceeding.";
/// Shown when the backend could not create an order.
pub const MSG_ORDER_FAILED: &str = "Failed to initiate payment. Please try again.";
/// Shown when the hosted checkout script never exposed its constructor.
pub const MSG_WIDGET_UNAVAILABLE: &str =
    "Razorpay SDK not loaded. Please check your internet connection.";
/// Shown when the backend rejected or failed the capture call.
pub const MSG_VERIFICATION_FAILED: &str = "Payment verification failed. Contact support.";
/// Shown after a successful capture.
pub const MSG_PAYMENT_SUCCESS: &str = "Payment Successful!";

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Checkout attempted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout attempted without a customer name
    #[error("Customer name is blank")]
    MissingCustomerName,

    /// The CreateOrder call failed
    #[error("Order creation failed: {0}")]
    OrderCreation(String),

    /// The payment widget global is not present
    #[error("Payment widget unavailable")]
    WidgetUnavailable,

    /// The widget could not be opened
    #[error("Payment widget error: {0}")]
    Widget(String),

    /// The shopper closed the widget without paying
    #[error("Payment widget dismissed")]
    WidgetDismissed,

    /// The CapturePayment call failed
    #[error("Payment verification failed: {0}")]
    Verification(String),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    /// Backend response did not have the expected shape
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    /// An amount could not be represented in minor units
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Check if the shopper can reasonably retry the same checkout
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::OrderCreation(_)
                | CheckoutError::Network(_)
                | CheckoutError::Backend { .. }
                | CheckoutError::WidgetUnavailable
                | CheckoutError::WidgetDismissed
        )
    }

    /// Alert text for the shopper, `None` when the flow ends silently
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            CheckoutError::EmptyCart => Some(MSG_EMPTY_CART),
            CheckoutError::MissingCustomerName => Some(MSG_MISSING_NAME),
            CheckoutError::WidgetUnavailable => Some(MSG_WIDGET_UNAVAILABLE),
            CheckoutError::Verification(_) => Some(MSG_VERIFICATION_FAILED),
            CheckoutError::WidgetDismissed => None,
            _ => Some(MSG_ORDER_FAILED),
        }
    }
}
