//! Mock Payment Widget
//!
//! Stands in for the hosted checkout in tests and headless runs.

use std::sync::Mutex;

use super::{PaymentReceiver, PaymentResult, PaymentSender, PaymentWidget, WidgetOptions, payment_channel};
use crate::error::{CheckoutError, Result};

/// What the mock does once opened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetBehavior {
    /// Report a payment immediately
    Pay,

    /// Close without paying
    Dismiss,

    /// Report a payment whose response cannot be read
    Garbled,

    /// Keep the handler until [`MockWidget::complete`] is called
    Hold,
}

pub struct MockWidget {
    available: bool,
    behavior: WidgetBehavior,
    opened: Mutex<Vec<WidgetOptions>>,
    held: Mutex<Vec<(String, PaymentSender)>>,
}

impl Default for MockWidget {
    fn default() -> Self {
        Self::new(WidgetBehavior::Pay)
    }
}

impl MockWidget {
    pub fn new(behavior: WidgetBehavior) -> Self {
        Self {
            available: true,
            behavior,
            opened: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        }
    }

    /// A widget whose script never loaded
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    /// Options of every open call, oldest first
    pub fn opened(&self) -> Vec<WidgetOptions> {
        self.opened.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// Fire the oldest held handler. Returns false if nothing was held.
    pub fn complete(&self) -> bool {
        let next = self.held.lock().ok().and_then(|mut held| {
            if held.is_empty() { None } else { Some(held.remove(0)) }
        });

        match next {
            Some((order_id, sender)) => sender.send(Ok(Self::result_for(&order_id))).is_ok(),
            None => false,
        }
    }

    /// The payment the mock reports for `order_id`
    pub fn result_for(order_id: &str) -> PaymentResult {
        PaymentResult {
            razorpay_payment_id: format!("pay_{order_id}"),
            razorpay_order_id: order_id.to_string(),
            razorpay_signature: format!("sig_{order_id}"),
        }
    }
}

impl PaymentWidget for MockWidget {
    fn is_available(&self) -> bool {
        self.available
    }

    fn open(&self, options: &WidgetOptions) -> Result<PaymentReceiver> {
        if !self.available {
            return Err(CheckoutError::WidgetUnavailable);
        }

        if let Ok(mut opened) = self.opened.lock() {
            opened.push(options.clone());
        }

        let (sender, receiver) = payment_channel();
        match self.behavior {
            WidgetBehavior::Pay => {
                // The receiver is returned below, so the send cannot fail.
                let _ = sender.send(Ok(Self::result_for(&options.order_id)));
            }
            WidgetBehavior::Dismiss => drop(sender),
            WidgetBehavior::Garbled => {
                let _ = sender.send(Err(CheckoutError::InvalidResponse(
                    "missing field `razorpay_signature`".into(),
                )));
            }
            WidgetBehavior::Hold => {
                if let Ok(mut held) = self.held.lock() {
                    held.push((options.order_id.clone(), sender));
                }
            }
        }

        Ok(receiver)
    }
}
