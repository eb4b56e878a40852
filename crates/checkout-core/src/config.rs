//! Checkout Configuration

use std::time::Duration;

/// Default payment backend origin
pub const DEFAULT_BACKEND_URL: &str = "https://localhost:7184";

/// Element id used to detect an already-injected checkout script
pub const DEFAULT_SCRIPT_ID: &str = "razorpay-sdk";

/// Hosted checkout script
pub const DEFAULT_SCRIPT_URL: &str = "https://checkout.razorpay.com/v1/checkout.js";

/// Checkout configuration
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Payment backend origin, without the `/api/payments` suffix
    pub backend_url: String,

    /// ISO currency code passed to the widget
    pub currency: String,

    /// Widget accent color
    pub theme_color: String,

    pub script_id: String,
    pub script_url: String,

    /// Per-request timeout (native targets only)
    pub request_timeout: Duration,

    /// Log filter for the frontend subscriber
    pub log_filter: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            currency: "INR".into(),
            theme_color: "#F37254".into(),
            script_id: DEFAULT_SCRIPT_ID.into(),
            script_url: DEFAULT_SCRIPT_URL.into(),
            request_timeout: Duration::from_secs(30),
            log_filter: "info".into(),
        }
    }
}

/// Value baked in by the build, for targets without a process environment
pub fn compiled_var(name: &str) -> Option<String> {
    let value = match name {
        "CHECKOUT_BACKEND_URL" => option_env!("CHECKOUT_BACKEND_URL"),
        "CHECKOUT_REQUEST_TIMEOUT_SECS" => option_env!("CHECKOUT_REQUEST_TIMEOUT_SECS"),
        "CHECKOUT_LOG" => option_env!("CHECKOUT_LOG"),
        _ => None,
    };
    value.map(str::to_string)
}

impl CheckoutConfig {
    /// Read overrides from the process environment, then from values set
    /// when the crate was compiled.
    ///
    /// In the browser there is no process environment, so only the
    /// compiled values apply (e.g. `CHECKOUT_BACKEND_URL=... trunk build`).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok().or_else(|| compiled_var(name)))
    }

    /// Build from `lookup`; names it does not know keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let backend_url = lookup("CHECKOUT_BACKEND_URL").unwrap_or(defaults.backend_url);
        let request_timeout = lookup("CHECKOUT_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .map_or(defaults.request_timeout, Duration::from_secs);
        let log_filter = lookup("CHECKOUT_LOG").unwrap_or(defaults.log_filter);

        Self {
            backend_url,
            request_timeout,
            log_filter,
            ..Self::default()
        }
    }

    /// Use a different backend origin
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Full URL of a payments endpoint, e.g. `endpoint("CreateOrder")`
    pub fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/api/payments/{}",
            self.backend_url.trim_end_matches('/'),
            action
        )
    }
}
